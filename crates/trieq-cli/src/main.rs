//! trieq CLI - offline three-band equalization of WAV files.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "trieq")]
#[command(author, version, about = "Three-band parametric EQ", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Equalize a WAV file
    Process(commands::process::ProcessArgs),

    /// Generate test signals
    Generate(commands::generate::GenerateArgs),

    /// Print the magnitude response of the current settings
    Response(commands::response::ResponseArgs),

    /// Measure per-band energy of a WAV file
    Analyze(commands::analyze::AnalyzeArgs),

    /// List the equalizer parameters and their ranges
    Params(commands::params::ParamsArgs),
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Process(args) => commands::process::run(args),
        Commands::Generate(args) => commands::generate::run(args),
        Commands::Response(args) => commands::response::run(args),
        Commands::Analyze(args) => commands::analyze::run(args),
        Commands::Params(args) => commands::params::run(args),
    }
}

/// Log to stderr so command output on stdout stays machine-readable.
/// `RUST_LOG` overrides the default `info` filter.
fn init_logging() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();
    tracing_log::LogTracer::init().ok();
}
