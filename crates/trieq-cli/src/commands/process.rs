//! File-based equalization command.

use super::common::{parse_param, resolve_settings};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use trieq_analysis::{peak_db, rms_db};
use trieq_io::{PlanarSamples, ProcessingEngine, WavSpec, read_wav, write_wav};

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Settings file (TOML). Defaults to the user settings file if present
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Parameter override, e.g. "low_gain=6" (repeatable)
    #[arg(long = "param", value_name = "ID=VALUE", value_parser = parse_param)]
    params: Vec<(String, f32)>,

    /// Processing block size (overrides the settings file)
    #[arg(long)]
    block_size: Option<usize>,

    /// Output bit depth: 16, 24, or 32 (overrides the settings file)
    #[arg(long)]
    bit_depth: Option<u16>,

    /// Replace non-finite output samples with silence
    #[arg(long)]
    sanitize: bool,
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    let mut settings = resolve_settings(args.settings.as_deref(), &args.params)?;
    if let Some(block_size) = args.block_size {
        settings.processing.block_size = block_size;
    }
    if let Some(bit_depth) = args.bit_depth {
        settings.processing.bit_depth = bit_depth;
    }
    if args.sanitize {
        settings.processing.sanitize_output = true;
    }
    settings.processing.validate()?;
    let params = settings.params()?;

    println!("Reading {}...", args.input.display());
    let (mut samples, spec) = read_wav(&args.input)?;
    let sample_rate = spec.sample_rate as f32;

    println!(
        "  {} channel(s), {} frames, {} Hz, {:.2}s",
        samples.num_channels(),
        samples.len(),
        spec.sample_rate,
        samples.len() as f32 / sample_rate
    );
    println!(
        "  low {} Hz {:+.1} dB | mid {} Hz {:+.1} dB Q {} | high {} Hz {:+.1} dB",
        params.low_freq,
        params.low_gain,
        params.mid_freq,
        params.mid_gain,
        params.mid_q,
        params.high_freq,
        params.high_gain
    );

    let input_stats = stats(&samples);

    let mut engine = ProcessingEngine::new(params, settings.processing.block_size);
    engine.set_sanitize_output(settings.processing.sanitize_output);

    let pb = ProgressBar::new(samples.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );
    engine.process_with_progress(&mut samples, sample_rate, |done, _| {
        pb.set_position(done as u64);
    });
    pb.finish_with_message("done");

    let output_stats = stats(&samples);
    println!("\nStats:");
    for (channel, (input, output)) in input_stats.iter().zip(&output_stats).enumerate() {
        println!(
            "  ch{channel}: RMS {:.1} -> {:.1} dB, Peak {:.1} -> {:.1} dB",
            input.0, output.0, input.1, output.1
        );
    }

    let out_spec = WavSpec {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: settings.processing.bit_depth,
    };

    println!("\nWriting {}...", args.output.display());
    write_wav(&args.output, &samples, out_spec)?;
    println!("Done!");

    Ok(())
}

/// (RMS dB, peak dB) per channel.
fn stats(samples: &PlanarSamples) -> Vec<(f32, f32)> {
    samples
        .channels()
        .iter()
        .map(|channel| (rms_db(channel), peak_db(channel)))
        .collect()
}
