//! Command implementations

mod emission;
mod factors;
mod metrics;
mod resolve;
mod sink;
mod status;
mod strategy;

use crate::cli::{Cli, Commands, StorageBackend};
use crate::config_loader::{load_config, load_factor_tables};
use crate::output::OutputWriter;
use crate::storage::open_ledger;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use netzero_core::config::LayeredConfig;
use netzero_core::Calculator;
use netzero_store::LedgerStore;

/// Everything a command needs, resolved once from the global flags
pub struct CommandContext {
    pub output: OutputWriter,
    pub config: LayeredConfig,
    pub storage: StorageBackend,
}

impl CommandContext {
    pub async fn ledger(&self) -> Result<LedgerStore> {
        open_ledger(self.storage, &self.config).await
    }

    pub fn calculator(&self) -> Result<Calculator> {
        Ok(Calculator::new(load_factor_tables(&self.config)?))
    }
}

/// Today's date in local time
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let config = load_config(cli.config_overrides())?;
    let ctx = CommandContext {
        output: OutputWriter::new(cli.json),
        config,
        storage: cli.storage,
    };

    match cli.command {
        Commands::Factors(args) => factors::execute(args, &ctx),
        Commands::Emission(command) => emission::execute(command, &ctx).await,
        Commands::Sink(command) => sink::execute(command, &ctx).await,
        Commands::Strategy(command) => strategy::execute(command, &ctx).await,
        Commands::Metrics(args) => metrics::execute(args, &ctx).await,
        Commands::Resolve(args) => resolve::execute(args, &ctx).await,
        Commands::Status(args) => status::execute(args, &ctx).await,
    }
}
