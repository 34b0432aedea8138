//! Layered configuration assembly.

use std::path::{Path, PathBuf};

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::ConfigLoader;
use crate::config::merger::ConfigMerger;
use crate::config::schema::Config;
use crate::config::validator::ConfigValidator;
use crate::error::Result;

/// Builds the effective configuration from every source.
///
/// Precedence, highest first: [`ConfigBuilder::with_config`] overrides,
/// `SEATWISE_*` environment variables, `{data_dir}/config.yaml`, defaults.
///
/// # Examples
///
/// ```
/// use seatwise::config::{Config, ConfigBuilder};
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_config(Config { page_size: Some(25), ..Default::default() })
///     .build()
///     .unwrap();
/// assert_eq!(config.page_size(), 25);
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    data_dir: Option<PathBuf>,
    skip_files: bool,
    skip_env: bool,
    overrides: Option<Config>,
}

impl ConfigBuilder {
    /// Creates a builder that reads every source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the configuration file from `data_dir` instead of the default
    /// data directory.
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: impl AsRef<Path>) -> Self {
        self.data_dir = Some(data_dir.as_ref().to_path_buf());
        self
    }

    /// Ignores configuration files.
    #[must_use]
    pub const fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Ignores environment variables.
    #[must_use]
    pub const fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Applies `config` on top of every other source.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Loads, merges and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be parsed, an environment
    /// variable is malformed, or the merged result fails validation.
    pub fn build(self) -> Result<Config> {
        let mut config = Config::default();

        if !self.skip_files {
            if let Some(source) = ConfigLoader::load_user_config(self.data_dir.as_deref())? {
                ConfigMerger::merge_into(&mut config, &source.config);
            }
        }

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        if let Some(overrides) = &self.overrides {
            ConfigMerger::merge_into(&mut config, overrides);
        }

        ConfigValidator::validate(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::OutputFormat;
    use crate::error::Error;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_build_defaults() {
        let config = ConfigBuilder::new().skip_files().skip_env().build().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_build_reads_data_dir_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("config.yaml"), "output_format: json\n").unwrap();

        let config = ConfigBuilder::new()
            .with_data_dir(temp.path())
            .skip_env()
            .build()
            .unwrap();
        assert_eq!(config.output_format(), OutputFormat::Json);
    }

    #[test]
    #[serial]
    fn test_precedence_override_env_file() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("config.yaml"),
            "page_size: 5\ntransient_retries: 1\nmaximum_lock_wait_seconds: 2\n",
        )
        .unwrap();
        std::env::set_var("SEATWISE_PAGE_SIZE", "7");
        std::env::set_var("SEATWISE_TRANSIENT_RETRIES", "3");

        let result = ConfigBuilder::new()
            .with_data_dir(temp.path())
            .with_config(Config {
                page_size: Some(9),
                ..Default::default()
            })
            .build();

        std::env::remove_var("SEATWISE_PAGE_SIZE");
        std::env::remove_var("SEATWISE_TRANSIENT_RETRIES");

        let config = result.unwrap();
        assert_eq!(config.page_size(), 9);
        assert_eq!(config.transient_retries(), 3);
        assert_eq!(config.lock_wait_seconds(), 2);
    }

    #[test]
    fn test_build_rejects_invalid_merge() {
        let err = ConfigBuilder::new()
            .skip_files()
            .skip_env()
            .with_config(Config {
                page_size: Some(0),
                ..Default::default()
            })
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }
}
