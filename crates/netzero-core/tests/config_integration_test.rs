//! Integration tests for layered configuration
//!
//! These tests verify that configuration loading follows the correct precedence:
//! CLI arguments > Environment variables > Config file > Defaults

use netzero_core::config::{CliConfigOverrides, ConfigSource, LayeredConfig};
use netzero_core::SeedPolicy;
use serial_test::serial;
use std::env;
use std::io::Write;
use std::path::PathBuf;
use tempfile::{NamedTempFile, TempDir};

const ENV_VARS: [&str; 5] = [
    "NETZERO_DATA_DIR",
    "NETZERO_SEED_POLICY",
    "NETZERO_RESOLVER_URL",
    "NETZERO_RESOLVER_TIMEOUT_SECS",
    "NETZERO_FACTORS_FILE",
];

fn clear_env() {
    for var in ENV_VARS {
        env::remove_var(var);
    }
}

fn config_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", content).unwrap();
    file
}

#[test]
fn test_partial_file_configuration() {
    let file = config_file(
        r#"
seed_policy = "empty"
# Only override the seed policy, leave others as defaults
"#,
    );

    let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

    assert_eq!(config.seed_policy.value, SeedPolicy::Empty);
    assert_eq!(config.seed_policy.source, ConfigSource::File);
    // These should still be defaults
    assert_eq!(config.resolver_url.value, "http://localhost:3001");
    assert_eq!(config.resolver_url.source, ConfigSource::Default);
    assert_eq!(config.data_dir.source, ConfigSource::Default);
}

#[test]
fn test_invalid_toml_is_reported() {
    let file = config_file("seed_policy = [not valid");
    let result = LayeredConfig::with_defaults().load_from_file(file.path());
    assert!(result.is_err());
}

#[test]
fn test_unknown_seed_policy_in_file_is_rejected() {
    let file = config_file(r#"seed_policy = "sometimes""#);
    let result = LayeredConfig::with_defaults().load_from_file(file.path());
    assert!(result.is_err());
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    clear_env();
    let file = config_file(
        r#"
resolver_url = "http://from-file:3001"
resolver_timeout_secs = 9
"#,
    );

    env::set_var("NETZERO_RESOLVER_URL", "http://from-env:3001");
    env::set_var("NETZERO_SEED_POLICY", "empty");

    let config = LayeredConfig::with_defaults()
        .load_from_file(file.path())
        .unwrap()
        .load_from_env();

    assert_eq!(config.resolver_url.value, "http://from-env:3001");
    assert_eq!(config.resolver_url.source, ConfigSource::Environment);
    assert_eq!(config.seed_policy.value, SeedPolicy::Empty);
    // Not set in env, file value stays
    assert_eq!(config.resolver_timeout_secs.value, 9);
    assert_eq!(config.resolver_timeout_secs.source, ConfigSource::File);

    clear_env();
}

#[test]
#[serial]
fn test_invalid_environment_values_are_ignored() {
    clear_env();
    env::set_var("NETZERO_SEED_POLICY", "sometimes");
    env::set_var("NETZERO_RESOLVER_TIMEOUT_SECS", "0");

    let config = LayeredConfig::with_defaults().load_from_env();

    assert_eq!(config.seed_policy.value, SeedPolicy::Demo);
    assert_eq!(config.seed_policy.source, ConfigSource::Default);
    assert_eq!(config.resolver_timeout_secs.value, 5);

    clear_env();
}

#[test]
#[serial]
fn test_cli_overrides_environment() {
    clear_env();
    env::set_var("NETZERO_DATA_DIR", "/from/env");

    let mut config = LayeredConfig::with_defaults().load_from_env();
    assert_eq!(config.data_dir.source, ConfigSource::Environment);

    config.update_from_cli(CliConfigOverrides {
        data_dir: Some(PathBuf::from("/from/cli")),
        ..CliConfigOverrides::default()
    });

    assert_eq!(config.data_dir.value, PathBuf::from("/from/cli"));
    assert_eq!(config.data_dir.source, ConfigSource::Cli);

    clear_env();
}

#[test]
fn test_config_file_inside_data_dir() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("netzero.toml"), "resolver_timeout_secs = 2\n").unwrap();

    let mut config = LayeredConfig::with_defaults();
    config.update_from_cli(CliConfigOverrides {
        data_dir: Some(dir.path().to_path_buf()),
        ..CliConfigOverrides::default()
    });

    let path = config.config_file_path();
    let config = config.load_from_optional_file(&path).unwrap();
    assert_eq!(config.resolver_timeout_secs.value, 2);
}

#[test]
fn test_config_file_cannot_move_data_dir() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("netzero.toml"),
        "data_dir = \"/somewhere/else\"\nseed_policy = \"empty\"\n",
    )
    .unwrap();

    let mut config = LayeredConfig::with_defaults();
    config.update_from_cli(CliConfigOverrides {
        data_dir: Some(dir.path().to_path_buf()),
        ..CliConfigOverrides::default()
    });
    let path = config.config_file_path();
    let config = config.load_from_optional_file(&path).unwrap();
    assert_eq!(config.data_dir.value, dir.path().to_path_buf());
    assert_eq!(config.seed_policy.value, SeedPolicy::Empty);

    let from_default = LayeredConfig::with_defaults().load_from_file(&path).unwrap();
    assert_eq!(from_default.data_dir.source, ConfigSource::Default);
}
