//! # presenter CLI entry point
//!
//! Parses command-line arguments, initializes tracing, and runs the present
//! command against stdout.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use presenter_cli::present::{run_present, PresentArgs};

/// Shape a JSON model into a presentation using a configured presenter.
#[derive(Parser, Debug)]
#[command(name = "presenter", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(flatten)]
    present: PresentArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(config = %cli.present.config.display(), "presenter CLI starting");

    let stdout = std::io::stdout();
    match run_present(&cli.present, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
