//! Configuration file loading.
//!
//! The only configuration file is the user file `{data_dir}/config.yaml`.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the user configuration inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// A loaded configuration file.
///
/// # Examples
///
/// ```
/// use seatwise::config::ConfigSource;
/// use std::path::PathBuf;
///
/// let source = ConfigSource {
///     path: PathBuf::from("/home/me/.seatwise/config.yaml"),
///     config: Default::default(),
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Path to the configuration file.
    pub path: PathBuf,
    /// Parsed configuration.
    pub config: Config,
}

/// Loads configuration files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads the user configuration file if it exists.
    ///
    /// If `data_dir` is provided, loads from `{data_dir}/config.yaml`;
    /// otherwise from the default data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_user_config(data_dir: Option<&Path>) -> Result<Option<ConfigSource>> {
        let config_path = if let Some(dir) = data_dir {
            dir.join(CONFIG_FILE_NAME)
        } else {
            crate::database::default_data_dir()?.join(CONFIG_FILE_NAME)
        };

        if !config_path.exists() {
            return Ok(None);
        }

        let config = Self::load_file(&config_path)?;
        log::debug!("loaded configuration from {}", config_path.display());
        Ok(Some(ConfigSource {
            path: config_path,
            config,
        }))
    }

    /// Loads and parses a YAML configuration file.
    ///
    /// A file holding only comments is an empty configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the YAML is invalid.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path)?;

        let value: serde_yaml::Value =
            serde_yaml::from_str(&contents).map_err(|e| Error::Validation {
                field: format!("{}", path.display()),
                message: format!("Invalid YAML: {e}"),
            })?;
        if value.is_null() {
            return Ok(Config::default());
        }

        serde_yaml::from_value(value).map_err(|e| Error::Validation {
            field: format!("{}", path.display()),
            message: format!("Invalid configuration: {e}"),
        })
    }
}
