//! Environment variable handling for configuration overrides.
//!
//! `SEATWISE_*` variables override values from the configuration file.

use crate::config::schema::{Config, OutputFormat};
use crate::error::{Error, Result};
use std::env;
use std::str::FromStr;

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use seatwise::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable value is invalid
    /// (e.g., a non-numeric page size or an unknown boolean).
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(val) = env::var("SEATWISE_DISABLE_AUTOINIT") {
            config.disable_autoinit = Some(Self::parse_bool("SEATWISE_DISABLE_AUTOINIT", &val)?);
        }

        if let Ok(val) = env::var("SEATWISE_MAXIMUM_LOCK_WAIT_SECONDS") {
            config.maximum_lock_wait_seconds =
                Some(Self::parse_number("SEATWISE_MAXIMUM_LOCK_WAIT_SECONDS", &val)?);
        }

        if let Ok(val) = env::var("SEATWISE_OUTPUT_FORMAT") {
            config.output_format = Some(OutputFormat::from_str(&val).map_err(|_| {
                Error::Validation {
                    field: "SEATWISE_OUTPUT_FORMAT".into(),
                    message: format!("Invalid output format: '{val}' (expected table/json/csv)"),
                }
            })?);
        }

        if let Ok(val) = env::var("SEATWISE_PAGE_SIZE") {
            config.page_size = Some(Self::parse_number("SEATWISE_PAGE_SIZE", &val)?);
        }

        if let Ok(val) = env::var("SEATWISE_MAX_PAGE_SIZE") {
            config.max_page_size = Some(Self::parse_number("SEATWISE_MAX_PAGE_SIZE", &val)?);
        }

        if let Ok(val) = env::var("SEATWISE_TRANSIENT_RETRIES") {
            config.transient_retries =
                Some(Self::parse_number("SEATWISE_TRANSIENT_RETRIES", &val)?);
        }

        Ok(())
    }

    /// Parse boolean from string (case-insensitive).
    ///
    /// Accepts: true/false, 1/0, yes/no, on/off
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }

    fn parse_number<T: FromStr>(field: &str, s: &str) -> Result<T> {
        s.trim().parse().map_err(|_| Error::Validation {
            field: field.into(),
            message: format!("Must be a non-negative integer, got '{s}'"),
        })
    }
}
