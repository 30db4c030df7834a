//! Per-band energy measurement.

use clap::Args;
use std::path::PathBuf;
use trieq_analysis::{DEFAULT_FFT_SIZE, band_levels, peak_db, rms_db};
use trieq_io::{WavFormat, read_wav, read_wav_info};

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Band edge in Hz (repeatable)
    #[arg(long = "split", value_name = "HZ", default_values_t = [200.0_f32, 2000.0, 6000.0])]
    splits: Vec<f32>,

    /// FFT size
    #[arg(long, default_value_t = DEFAULT_FFT_SIZE)]
    fft_size: usize,
}

pub fn run(args: AnalyzeArgs) -> anyhow::Result<()> {
    if !args.fft_size.is_power_of_two() || args.fft_size < 64 {
        anyhow::bail!("--fft-size must be a power of two >= 64, got {}", args.fft_size);
    }

    let info = read_wav_info(&args.input)?;
    let encoding = match info.format {
        WavFormat::Pcm => "PCM",
        WavFormat::IeeeFloat => "float",
    };
    println!("{}", args.input.display());
    println!(
        "  {} channel(s), {} frames, {} Hz, {}-bit {encoding}, {:.3} s",
        info.channels, info.num_frames, info.sample_rate, info.bits_per_sample, info.duration_secs
    );

    let (samples, spec) = read_wav(&args.input)?;
    let sample_rate = spec.sample_rate as f32;

    for (index, channel) in samples.channels().iter().enumerate() {
        println!();
        println!(
            "Channel {index}: RMS {:.1} dB, Peak {:.1} dB",
            rms_db(channel),
            peak_db(channel)
        );
        println!("  {:>18}  {:>8}", "Band (Hz)", "RMS dB");
        println!("  {:>18}  {:>8}", "---------", "------");
        for band in band_levels(channel, sample_rate, &args.splits, args.fft_size) {
            let range = format!("{:.0}-{:.0}", band.low_hz, band.high_hz);
            println!("  {range:>18}  {:>8.1}", band.rms_db());
        }
    }

    Ok(())
}
