mod cli;
mod config;
mod error;
mod file_scanner;
mod journal;
mod progress;
mod prompt;
mod sequencer;
mod utils;
mod workflow;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli_args = cli::Cli::parse();
    init_logging(cli_args.verbose);

    // Delegate the main application logic to the workflow module
    workflow::run_photoseq(cli_args)
}
