use crate::error::{NetZeroError, Result};
use crate::seed::SeedPolicy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the config file inside the data directory
pub const CONFIG_FILE_NAME: &str = "netzero.toml";

pub const DEFAULT_DATA_DIR: &str = ".netzero";
pub const DEFAULT_RESOLVER_URL: &str = "http://localhost:3001";
pub const DEFAULT_RESOLVER_TIMEOUT_SECS: u64 = 5;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for NetZero
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub data_dir: ConfigValue<PathBuf>,
    pub seed_policy: ConfigValue<SeedPolicy>,
    pub resolver_url: ConfigValue<String>,
    pub resolver_timeout_secs: ConfigValue<u64>,
    pub factors_file: ConfigValue<Option<PathBuf>>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            data_dir: ConfigValue::new(PathBuf::from(DEFAULT_DATA_DIR), ConfigSource::Default),
            seed_policy: ConfigValue::new(SeedPolicy::Demo, ConfigSource::Default),
            resolver_url: ConfigValue::new(
                DEFAULT_RESOLVER_URL.to_string(),
                ConfigSource::Default,
            ),
            resolver_timeout_secs: ConfigValue::new(
                DEFAULT_RESOLVER_TIMEOUT_SECS,
                ConfigSource::Default,
            ),
            factors_file: ConfigValue::new(None, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| NetZeroError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| NetZeroError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        // Update values from file
        // The file lives inside the data directory, so it cannot move it
        if let Some(data_dir) = file_config.data_dir {
            tracing::warn!(
                data_dir = %data_dir.display(),
                "Ignoring data_dir in config file; use NETZERO_DATA_DIR or --data-dir"
            );
        }

        if let Some(seed_policy) = file_config.seed_policy {
            self.seed_policy.update(seed_policy, ConfigSource::File);
        }

        if let Some(resolver_url) = file_config.resolver_url {
            self.resolver_url.update(resolver_url, ConfigSource::File);
        }

        if let Some(timeout) = file_config.resolver_timeout_secs {
            self.resolver_timeout_secs.update(validate_timeout(timeout)?, ConfigSource::File);
        }

        if let Some(factors_file) = file_config.factors_file {
            self.factors_file.update(Some(factors_file), ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from a TOML file if it exists
    pub fn load_from_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self> {
        if path.as_ref().exists() {
            self.load_from_file(path)
        } else {
            tracing::debug!(path = %path.as_ref().display(), "No config file, using defaults");
            Ok(self)
        }
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // NETZERO_DATA_DIR
        if let Ok(data_dir) = env::var("NETZERO_DATA_DIR") {
            self.data_dir.update(PathBuf::from(data_dir), ConfigSource::Environment);
        }

        // NETZERO_SEED_POLICY
        if let Ok(policy_str) = env::var("NETZERO_SEED_POLICY") {
            match policy_str.parse::<SeedPolicy>() {
                Ok(policy) => self.seed_policy.update(policy, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid NETZERO_SEED_POLICY value '{}': expected demo or empty",
                    policy_str
                ),
            }
        }

        // NETZERO_RESOLVER_URL
        if let Ok(url) = env::var("NETZERO_RESOLVER_URL") {
            self.resolver_url.update(url, ConfigSource::Environment);
        }

        // NETZERO_RESOLVER_TIMEOUT_SECS
        if let Ok(timeout_str) = env::var("NETZERO_RESOLVER_TIMEOUT_SECS") {
            match timeout_str.parse::<u64>().ok().filter(|t| *t > 0) {
                Some(timeout) => {
                    self.resolver_timeout_secs.update(timeout, ConfigSource::Environment)
                }
                None => tracing::warn!(
                    "Invalid NETZERO_RESOLVER_TIMEOUT_SECS value '{}': expected positive integer",
                    timeout_str
                ),
            }
        }

        // NETZERO_FACTORS_FILE
        if let Ok(path) = env::var("NETZERO_FACTORS_FILE") {
            self.factors_file.update(Some(PathBuf::from(path)), ConfigSource::Environment);
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(data_dir) = overrides.data_dir {
            self.data_dir.update(data_dir, ConfigSource::Cli);
        }

        if let Some(seed_policy) = overrides.seed_policy {
            self.seed_policy.update(seed_policy, ConfigSource::Cli);
        }

        if let Some(resolver_url) = overrides.resolver_url {
            self.resolver_url.update(resolver_url, ConfigSource::Cli);
        }

        if let Some(factors_file) = overrides.factors_file {
            self.factors_file.update(Some(factors_file), ConfigSource::Cli);
        }
    }

    /// Path of the config file inside the configured data directory
    pub fn config_file_path(&self) -> PathBuf {
        self.data_dir.value.join(CONFIG_FILE_NAME)
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "data_dir".to_string(),
            (self.data_dir.value.display().to_string(), self.data_dir.source),
        );

        map.insert(
            "seed_policy".to_string(),
            (self.seed_policy.value.to_string(), self.seed_policy.source),
        );

        map.insert(
            "resolver_url".to_string(),
            (self.resolver_url.value.clone(), self.resolver_url.source),
        );

        map.insert(
            "resolver_timeout_secs".to_string(),
            (self.resolver_timeout_secs.value.to_string(), self.resolver_timeout_secs.source),
        );

        map.insert(
            "factors_file".to_string(),
            (
                self.factors_file
                    .value
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(built-in)".to_string()),
                self.factors_file.source,
            ),
        );

        map
    }
}

fn validate_timeout(timeout: u64) -> Result<u64> {
    if timeout == 0 {
        return Err(NetZeroError::ConfigInvalid {
            key: "resolver_timeout_secs".to_string(),
            reason: "Timeout must be at least one second".to_string(),
        });
    }
    Ok(timeout)
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    data_dir: Option<PathBuf>,
    seed_policy: Option<SeedPolicy>,
    resolver_url: Option<String>,
    resolver_timeout_secs: Option<u64>,
    factors_file: Option<PathBuf>,
}

/// CLI configuration overrides
#[derive(Debug, Clone, Default)]
pub struct CliConfigOverrides {
    pub data_dir: Option<PathBuf>,
    pub seed_policy: Option<SeedPolicy>,
    pub resolver_url: Option<String>,
    pub factors_file: Option<PathBuf>,
}
