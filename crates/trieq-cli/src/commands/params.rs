//! Parameter listing command.

#![allow(clippy::print_literal)] // Table headers use literal strings

use clap::Args;
use trieq_eq::PARAM_DESCRIPTORS;

#[derive(Args)]
pub struct ParamsArgs {
    /// Show example commands
    #[arg(long)]
    examples: bool,
}

pub fn run(args: ParamsArgs) -> anyhow::Result<()> {
    println!("Parameters");
    println!("==========");
    println!();
    println!(
        "  {:10}  {:16}  {:>16}  {:>8}",
        "ID", "Name", "Range", "Default"
    );
    println!(
        "  {:10}  {:16}  {:>16}  {:>8}",
        "--", "----", "-----", "-------"
    );

    for desc in &PARAM_DESCRIPTORS {
        let range = format!("{}..{}{}", desc.min, desc.max, desc.unit.suffix());
        println!(
            "  {:10}  {:16}  {:>16}  {:>8}",
            desc.string_id, desc.name, range, desc.default
        );
    }

    if args.examples {
        println!();
        println!("Examples:");
        println!();
        println!("  trieq process in.wav out.wav --param low_gain=6 --param high_gain=-4");
        println!("  trieq process in.wav out.wav --settings trieq.toml --bit-depth 24");
        println!("  trieq response --param mid_gain=-6 --param mid_q=4");
    }

    Ok(())
}
