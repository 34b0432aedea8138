//! Where the store lives and how long callers wait for it.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// File name of the database inside the data directory.
pub const DATABASE_FILE_NAME: &str = "seatwise.db";

/// Lock wait used when the caller does not choose one.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Name of the data directory under the user's home.
const DATA_DIR_NAME: &str = ".seatwise";

/// Location and lock wait for one [`Database`](super::Database) handle.
///
/// # Examples
///
/// ```
/// use seatwise::database::DatabaseConfig;
/// use std::time::Duration;
///
/// let config = DatabaseConfig::new("/tmp/seatwise.db")
///     .with_busy_timeout(Duration::from_millis(10000));
/// assert_eq!(config.busy_timeout, Duration::from_secs(10));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Database file; its parent directory is created on open.
    pub path: PathBuf,
    /// How long a write waits for the lock before failing with
    /// [`Error::LockTimeout`].
    pub busy_timeout: Duration,
}

impl DatabaseConfig {
    /// A config for `path` with [`DEFAULT_BUSY_TIMEOUT`].
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    /// A config for the database file inside `data_dir`.
    #[must_use]
    pub fn in_data_dir(data_dir: impl AsRef<Path>) -> Self {
        Self::new(data_dir.as_ref().join(DATABASE_FILE_NAME))
    }

    /// Replaces the lock wait.
    #[must_use]
    pub const fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }
}

/// Returns `~/.seatwise`.
///
/// # Errors
///
/// Returns [`Error::Validation`] if there is no home directory.
pub fn default_data_dir() -> Result<PathBuf> {
    let home = home::home_dir().ok_or_else(|| Error::Validation {
        field: "home_directory".into(),
        message: "cannot determine the home directory".into(),
    })?;
    Ok(home.join(DATA_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_default_timeout() {
        let config = DatabaseConfig::new("/tmp/flights.db");
        assert_eq!(config.path, PathBuf::from("/tmp/flights.db"));
        assert_eq!(config.busy_timeout, DEFAULT_BUSY_TIMEOUT);
    }

    #[test]
    fn test_in_data_dir() {
        let config = DatabaseConfig::in_data_dir("/srv/seatwise")
            .with_busy_timeout(Duration::from_millis(250));
        assert_eq!(config.path, PathBuf::from("/srv/seatwise/seatwise.db"));
        assert_eq!(config.busy_timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_default_data_dir_is_under_home() {
        if let Ok(dir) = default_data_dir() {
            assert!(dir.ends_with(".seatwise"));
        }
    }
}
