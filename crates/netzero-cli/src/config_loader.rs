//! Configuration loading for CLI commands

use anyhow::{Context, Result};
use netzero_core::config::{CliConfigOverrides, LayeredConfig};
use netzero_core::FactorTables;
use netzero_geo::{CoordinateResolver, ExpanderClient, RedirectResolver, UpstreamExpander};
use std::sync::Arc;
use std::time::Duration;

use crate::cli::Cli;

impl Cli {
    pub fn config_overrides(&self) -> CliConfigOverrides {
        CliConfigOverrides {
            data_dir: self.data_dir.clone(),
            seed_policy: self.seed_policy,
            resolver_url: self.resolver_url.clone(),
            factors_file: self.factors_file.clone(),
        }
    }
}

/// Load layered configuration: defaults, `netzero.toml` in the data
/// directory, environment, then CLI flags
///
/// The data directory itself can only come from the environment or a flag,
/// since it locates the config file.
pub fn load_config(overrides: CliConfigOverrides) -> Result<LayeredConfig> {
    let mut config = LayeredConfig::with_defaults().load_from_env();
    config.update_from_cli(overrides);

    let path = config.config_file_path();
    config
        .load_from_optional_file(&path)
        .with_context(|| format!("Failed to load configuration file {}", path.display()))
}

/// Factor tables named by configuration, or the built-in ones
pub fn load_factor_tables(config: &LayeredConfig) -> Result<FactorTables> {
    match &config.factors_file.value {
        Some(path) => FactorTables::load_from_file(path)
            .with_context(|| format!("Failed to load factor tables from {}", path.display())),
        None => Ok(FactorTables::builtin()),
    }
}

/// Coordinate resolver going through the resolver service, or straight to
/// the shortener when `direct` is set
pub fn build_resolver(config: &LayeredConfig, direct: bool) -> Result<CoordinateResolver> {
    let timeout = Duration::from_secs(config.resolver_timeout_secs.value);

    let redirect: Arc<dyn RedirectResolver> = if direct {
        Arc::new(UpstreamExpander::new(timeout)?)
    } else {
        Arc::new(ExpanderClient::new(&config.resolver_url.value, timeout)?)
    };

    Ok(CoordinateResolver::new(redirect, timeout))
}
