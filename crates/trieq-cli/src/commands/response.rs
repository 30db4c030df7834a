//! Analytic frequency response of the current settings.

use super::common::{parse_param, resolve_settings};
use clap::Args;
use std::fmt::Write as _;
use std::path::PathBuf;
use trieq_analysis::{cascade_response, log_spaced};
use trieq_eq::BandRole;

#[derive(Args)]
pub struct ResponseArgs {
    /// Settings file (TOML). Defaults to the user settings file if present
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Parameter override, e.g. "mid_gain=-3" (repeatable)
    #[arg(long = "param", value_name = "ID=VALUE", value_parser = parse_param)]
    params: Vec<(String, f32)>,

    /// Sample rate the filters are designed for
    #[arg(long, default_value = "48000")]
    sample_rate: f32,

    /// Number of log-spaced frequencies between 20 Hz and 20 kHz
    #[arg(long, default_value = "31")]
    points: usize,

    /// Also write the response as CSV
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: ResponseArgs) -> anyhow::Result<()> {
    if !(args.sample_rate.is_finite() && args.sample_rate > 0.0) {
        anyhow::bail!("sample rate must be positive, got {}", args.sample_rate);
    }
    if args.points == 0 {
        anyhow::bail!("--points must be at least 1");
    }

    let settings = resolve_settings(args.settings.as_deref(), &args.params)?;
    let params = settings.params()?;

    let coefficients = BandRole::ALL.map(|role| role.design(args.sample_rate, &params));
    let end = 20000.0_f32.min(args.sample_rate * 0.5);
    let frequencies = log_spaced(20.0, end, args.points);
    let response = cascade_response(&coefficients, args.sample_rate, &frequencies);

    println!("Response at {} Hz:", args.sample_rate);
    println!();
    println!("  {:>10}  {:>8}", "Freq (Hz)", "dB");
    println!("  {:>10}  {:>8}", "---------", "--");
    for point in &response {
        println!("  {:>10.1}  {:>+8.2}", point.frequency, point.magnitude_db);
    }

    if let Some(path) = &args.output {
        let mut csv = String::from("frequency_hz,magnitude_db\n");
        for point in &response {
            let _ = writeln!(csv, "{},{}", point.frequency, point.magnitude_db);
        }
        std::fs::write(path, csv)?;
        println!("\nSaved to {}", path.display());
    }

    Ok(())
}
