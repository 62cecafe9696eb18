//! NetZero CLI - Command-line interface
//!
//! Records emissions, carbon sinks, and reduction strategies in a local
//! ledger and reports the derived metrics.

mod cli;
mod commands;
mod config_loader;
mod errors;
mod output;
mod output_types;
mod storage;

use clap::Parser;
use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Logs go to stderr so `--json` output stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = tokio::runtime::Runtime::new()
        .map_err(anyhow::Error::from)
        .and_then(|runtime| runtime.block_on(commands::execute(cli)));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            errors::from_anyhow(&e).display();
            ExitCode::FAILURE
        }
    }
}
