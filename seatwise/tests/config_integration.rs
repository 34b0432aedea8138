//! Integration tests for the configuration system.
//!
//! Tests that modify environment variables are marked with `#[serial]`:
//! environment variables are process-global, so concurrent access would
//! race.

mod common;

use std::env;
use std::fs;
use std::path::Path;

use serial_test::serial;
use seatwise::config::{Config, ConfigBuilder, OutputFormat, DEFAULT_PAGE_SIZE};
use seatwise::error::Error;
use seatwise::operations::{init_database, InitOptions};

/// RAII guard for setting and restoring environment variables.
struct EnvGuard {
    key: String,
    old_value: Option<String>,
}

impl EnvGuard {
    fn new(key: &str, value: &str) -> Self {
        let old_value = env::var(key).ok();
        env::set_var(key, value);
        Self {
            key: key.to_string(),
            old_value,
        }
    }

    fn remove(key: &str) -> Self {
        let old_value = env::var(key).ok();
        env::remove_var(key);
        Self {
            key: key.to_string(),
            old_value,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.old_value {
            Some(val) => env::set_var(&self.key, val),
            None => env::remove_var(&self.key),
        }
    }
}

/// Clears every `SEATWISE_*` variable the loader reads.
fn clear_seatwise_env_vars() -> Vec<EnvGuard> {
    [
        "SEATWISE_DISABLE_AUTOINIT",
        "SEATWISE_MAXIMUM_LOCK_WAIT_SECONDS",
        "SEATWISE_OUTPUT_FORMAT",
        "SEATWISE_PAGE_SIZE",
        "SEATWISE_MAX_PAGE_SIZE",
        "SEATWISE_TRANSIENT_RETRIES",
    ]
    .iter()
    .map(|key| EnvGuard::remove(key))
    .collect()
}

fn write_config(dir: &Path, content: &str) {
    fs::write(dir.join("config.yaml"), content).unwrap();
}

#[test]
#[serial]
fn test_missing_file_gives_defaults() {
    let _guards = clear_seatwise_env_vars();
    let dir = tempfile::tempdir().unwrap();

    let config = ConfigBuilder::new()
        .with_data_dir(dir.path())
        .build()
        .unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.page_size(), DEFAULT_PAGE_SIZE);
    assert_eq!(config.output_format(), OutputFormat::Table);
    assert_eq!(config.transient_retries(), 0);
}

#[test]
#[serial]
fn test_generated_template_loads_as_defaults() {
    let _guards = clear_seatwise_env_vars();
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("data");

    let result = init_database(&InitOptions::new(data_dir.clone()).with_create_config(true))
        .unwrap();
    assert!(result.config_created);

    let config = ConfigBuilder::new()
        .with_data_dir(&data_dir)
        .build()
        .unwrap();
    assert_eq!(config, Config::default());
}

#[test]
#[serial]
fn test_file_values_are_applied() {
    let _guards = clear_seatwise_env_vars();
    let dir = tempfile::tempdir().unwrap();
    write_config(
        dir.path(),
        "output_format: csv\npage_size: 25\nmax_page_size: 50\ntransient_retries: 2\n",
    );

    let config = ConfigBuilder::new()
        .with_data_dir(dir.path())
        .build()
        .unwrap();
    assert_eq!(config.output_format(), OutputFormat::Csv);
    assert_eq!(config.page_size(), 25);
    assert_eq!(config.max_page_size(), 50);
    assert_eq!(config.transient_retries(), 2);
}

#[test]
#[serial]
fn test_env_overrides_file() {
    let _guards = clear_seatwise_env_vars();
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), "output_format: csv\nmaximum_lock_wait_seconds: 9\n");
    let _format = EnvGuard::new("SEATWISE_OUTPUT_FORMAT", "json");

    let config = ConfigBuilder::new()
        .with_data_dir(dir.path())
        .build()
        .unwrap();
    assert_eq!(config.output_format(), OutputFormat::Json);
    assert_eq!(config.lock_wait_seconds(), 9);
}

#[test]
#[serial]
fn test_programmatic_overrides_env() {
    let _guards = clear_seatwise_env_vars();
    let _autoinit = EnvGuard::new("SEATWISE_DISABLE_AUTOINIT", "yes");

    let config = ConfigBuilder::new()
        .skip_files()
        .with_config(Config {
            disable_autoinit: Some(false),
            ..Default::default()
        })
        .build()
        .unwrap();
    assert!(!config.autoinit_disabled());
}

#[test]
#[serial]
fn test_invalid_env_value_is_rejected() {
    let _guards = clear_seatwise_env_vars();
    let _page = EnvGuard::new("SEATWISE_PAGE_SIZE", "lots");

    let err = ConfigBuilder::new().skip_files().build().unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
}

#[test]
#[serial]
fn test_unknown_field_is_rejected() {
    let _guards = clear_seatwise_env_vars();
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), "page_size: 5\nseat_map: true\n");

    let err = ConfigBuilder::new()
        .with_data_dir(dir.path())
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Validation { .. } | Error::Configuration(_)
    ));
}

#[test]
#[serial]
fn test_page_size_above_max_is_rejected() {
    let _guards = clear_seatwise_env_vars();
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), "page_size: 60\n");
    let _max = EnvGuard::new("SEATWISE_MAX_PAGE_SIZE", "50");

    let err = ConfigBuilder::new()
        .with_data_dir(dir.path())
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
}
