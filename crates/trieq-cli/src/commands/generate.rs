//! Test signal generation command.

use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};
use trieq_analysis::{impulse, sine, white_noise};
use trieq_io::{PlanarSamples, WavSpec, write_wav};

#[derive(Args)]
pub struct GenerateArgs {
    #[command(subcommand)]
    command: GenerateCommand,
}

/// Options shared by every signal.
#[derive(Args)]
struct SignalOptions {
    /// Sample rate
    #[arg(long, default_value = "48000")]
    sample_rate: u32,

    /// Number of channels (the signal is copied to each)
    #[arg(long, default_value = "1")]
    channels: u16,
}

#[derive(Subcommand)]
enum GenerateCommand {
    /// Generate white noise
    Noise {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Duration in seconds
        #[arg(long, default_value = "1.0")]
        duration: f32,

        /// Amplitude (0-1)
        #[arg(long, default_value = "0.5")]
        amplitude: f32,

        /// Noise generator seed
        #[arg(long, default_value = "1")]
        seed: u32,

        #[command(flatten)]
        options: SignalOptions,
    },

    /// Generate a sine tone
    Tone {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Frequency in Hz
        #[arg(long, default_value = "1000.0")]
        freq: f32,

        /// Duration in seconds
        #[arg(long, default_value = "1.0")]
        duration: f32,

        /// Amplitude (0-1)
        #[arg(long, default_value = "0.5")]
        amplitude: f32,

        #[command(flatten)]
        options: SignalOptions,
    },

    /// Generate a single-sample impulse followed by silence
    Impulse {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Length in samples
        #[arg(long, default_value = "48000")]
        length: usize,

        /// Impulse amplitude
        #[arg(long, default_value = "1.0")]
        amplitude: f32,

        #[command(flatten)]
        options: SignalOptions,
    },

    /// Generate silence
    Silence {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Duration in seconds
        #[arg(long, default_value = "1.0")]
        duration: f32,

        #[command(flatten)]
        options: SignalOptions,
    },
}

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    match args.command {
        GenerateCommand::Noise {
            output,
            duration,
            amplitude,
            seed,
            options,
        } => {
            let len = frames(duration, options.sample_rate)?;
            println!("Generating white noise: {duration}s, amplitude {amplitude}, seed {seed}");
            write_signal(&output, white_noise(len, amplitude, seed), &options)
        }
        GenerateCommand::Tone {
            output,
            freq,
            duration,
            amplitude,
            options,
        } => {
            let len = frames(duration, options.sample_rate)?;
            println!("Generating {freq} Hz tone: {duration}s, amplitude {amplitude}");
            let signal = sine(freq, options.sample_rate as f32, len, amplitude);
            write_signal(&output, signal, &options)
        }
        GenerateCommand::Impulse {
            output,
            length,
            amplitude,
            options,
        } => {
            println!("Generating impulse: {length} samples, amplitude {amplitude}");
            write_signal(&output, impulse(length, amplitude), &options)
        }
        GenerateCommand::Silence {
            output,
            duration,
            options,
        } => {
            let len = frames(duration, options.sample_rate)?;
            println!("Generating silence: {duration}s");
            write_signal(&output, vec![0.0; len], &options)
        }
    }
}

fn frames(duration: f32, sample_rate: u32) -> anyhow::Result<usize> {
    if !duration.is_finite() || duration < 0.0 {
        anyhow::bail!("duration must be a non-negative number of seconds, got {duration}");
    }
    Ok((duration * sample_rate as f32).round() as usize)
}

fn write_signal(output: &Path, signal: Vec<f32>, options: &SignalOptions) -> anyhow::Result<()> {
    if options.channels == 0 {
        anyhow::bail!("--channels must be at least 1");
    }
    let samples = PlanarSamples::new(vec![signal; usize::from(options.channels)])?;
    let spec = WavSpec {
        channels: options.channels,
        sample_rate: options.sample_rate,
        bits_per_sample: 32,
    };

    write_wav(output, &samples, spec)?;
    println!("Saved to {}", output.display());
    Ok(())
}
