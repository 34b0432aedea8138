//! Configuration validation.

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Validates merged configuration.
///
/// # Examples
///
/// ```
/// use seatwise::config::{Config, ConfigValidator};
///
/// let ok = Config { page_size: Some(20), ..Default::default() };
/// assert!(ConfigValidator::validate(&ok).is_ok());
///
/// let too_big = Config { page_size: Some(500), ..Default::default() };
/// assert!(ConfigValidator::validate(&too_big).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first invalid field.
    pub fn validate(config: &Config) -> Result<()> {
        if config.maximum_lock_wait_seconds == Some(0) {
            return Err(Error::Validation {
                field: "maximum_lock_wait_seconds".into(),
                message: "Lock wait must be at least 1 second".into(),
            });
        }

        if config.max_page_size == Some(0) {
            return Err(Error::Validation {
                field: "max_page_size".into(),
                message: "Maximum page size must be at least 1".into(),
            });
        }

        if config.page_size == Some(0) {
            return Err(Error::Validation {
                field: "page_size".into(),
                message: "Page size must be at least 1".into(),
            });
        }

        if config.page_size() > config.max_page_size() {
            return Err(Error::Validation {
                field: "page_size".into(),
                message: format!(
                    "Page size {} exceeds maximum page size {}",
                    config.page_size(),
                    config.max_page_size()
                ),
            });
        }

        Ok(())
    }
}
