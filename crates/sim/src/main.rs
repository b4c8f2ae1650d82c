//! Command-line battle simulator.
//!
//! Loads designs, rules and a scenario from a data directory, resolves the
//! battle and prints the record.
//! Run with: `cargo run -p battle-sim -- run --scenario skirmish`

mod commands;

use anyhow::Result;
use clap::Parser;
use commands::Run;

/// Fleet battle simulator
#[derive(Parser)]
#[command(name = "battle-sim")]
#[command(about = "Resolve fleet battles from scenario files", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Resolve one battle scenario
    Run(Run),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Run(cmd) => cmd.execute(),
    }
}
