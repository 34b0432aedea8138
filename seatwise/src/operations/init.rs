//! Data directory initialization.
//!
//! Creates the data directory and an empty database, and optionally a
//! commented configuration file listing every setting.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::CONFIG_FILE_NAME;
use crate::database::{Database, DatabaseConfig, DATABASE_FILE_NAME};
use crate::error::{Error, Result};

/// Options for data directory initialization.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Data directory to initialize.
    pub data_dir: PathBuf,
    /// Replace an existing database.
    pub overwrite: bool,
    /// Write a default configuration file.
    pub create_config: bool,
}

impl InitOptions {
    /// Creates new initialization options.
    #[must_use]
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            overwrite: false,
            create_config: false,
        }
    }

    /// Sets whether to overwrite an existing database.
    #[must_use]
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Sets whether to write a default configuration file.
    #[must_use]
    pub fn with_create_config(mut self, create_config: bool) -> Self {
        self.create_config = create_config;
        self
    }
}

/// What [`init_database`] did.
#[derive(Debug)]
pub struct InitResult {
    /// Whether the data directory was created.
    pub data_dir_created: bool,
    /// Whether the database was created or recreated.
    pub database_created: bool,
    /// Whether a configuration file was written.
    pub config_created: bool,
    /// Path to the data directory.
    pub data_dir: PathBuf,
}

const DEFAULT_CONFIG_TEMPLATE: &str = r"# seatwise configuration
# Every setting is optional. Environment variables (SEATWISE_*) and
# command-line flags take precedence over this file.

# Seconds to wait for the database write lock (default: 5)
# maximum_lock_wait_seconds: 5

# Fail instead of creating a missing data directory
# disable_autoinit: false

# Listing output: table, json or csv (default: table)
# output_format: table

# Rows per page for search and bookings (default: 10)
# page_size: 10

# Largest page a caller may request (default: 100)
# max_page_size: 100

# Extra attempts after a lock timeout (default: 0)
# transient_retries: 0
";

/// Initializes the data directory and database.
///
/// # Errors
///
/// Returns an error if:
/// - The data directory cannot be created
/// - The database already exists and `overwrite` is false
/// - The database cannot be created
/// - The configuration file cannot be written
///
/// # Examples
///
/// ```no_run
/// use seatwise::operations::init::{init_database, InitOptions};
/// use std::path::PathBuf;
///
/// let options = InitOptions::new(PathBuf::from("/tmp/seatwise-data")).with_create_config(true);
/// let result = init_database(&options).unwrap();
/// assert!(result.database_created);
/// ```
pub fn init_database(options: &InitOptions) -> Result<InitResult> {
    let mut result = InitResult {
        data_dir_created: false,
        database_created: false,
        config_created: false,
        data_dir: options.data_dir.clone(),
    };

    if !options.data_dir.exists() {
        fs::create_dir_all(&options.data_dir)?;
        result.data_dir_created = true;
    }

    let db_path = options.data_dir.join(DATABASE_FILE_NAME);
    if db_path.exists() {
        if !options.overwrite {
            return Err(Error::Validation {
                field: "database".into(),
                message: format!(
                    "Database already exists at {}. Use --overwrite to replace it.",
                    db_path.display()
                ),
            });
        }
        remove_database_files(&options.data_dir)?;
    }

    Database::open(DatabaseConfig::in_data_dir(&options.data_dir))?;
    result.database_created = true;
    log::info!("initialized database at {}", db_path.display());

    if options.create_config {
        let config_path = options.data_dir.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG_TEMPLATE)?;
            result.config_created = true;
        }
    }

    Ok(result)
}

/// Removes the database and its WAL sidecars.
fn remove_database_files(data_dir: &Path) -> Result<()> {
    for suffix in ["", "-wal", "-shm"] {
        let file = data_dir.join(format!("{DATABASE_FILE_NAME}{suffix}"));
        if file.exists() {
            fs::remove_file(file)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_fresh_directory() {
        let temp = TempDir::new().unwrap();
        let data_dir = temp.path().join("seatwise");

        let result = init_database(&InitOptions::new(data_dir.clone())).unwrap();

        assert!(result.data_dir_created);
        assert!(result.database_created);
        assert!(!result.config_created);
        assert!(data_dir.join("seatwise.db").exists());
    }

    #[test]
    fn test_init_with_config() {
        let temp = TempDir::new().unwrap();
        let data_dir = temp.path().join("seatwise");

        let options = InitOptions::new(data_dir.clone()).with_create_config(true);
        let result = init_database(&options).unwrap();
        assert!(result.config_created);

        let content = fs::read_to_string(data_dir.join("config.yaml")).unwrap();
        assert!(content.contains("seatwise configuration"));
        // Every line of the template is commented out
        let parsed = crate::config::ConfigLoader::load_file(&data_dir.join("config.yaml")).unwrap();
        assert_eq!(parsed, crate::config::Config::default());
    }

    #[test]
    fn test_init_fails_without_overwrite() {
        let temp = TempDir::new().unwrap();
        let data_dir = temp.path().join("seatwise");
        init_database(&InitOptions::new(data_dir.clone())).unwrap();

        match init_database(&InitOptions::new(data_dir)) {
            Err(Error::Validation { field, message }) => {
                assert_eq!(field, "database");
                assert!(message.contains("already exists"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_init_with_overwrite_clears_data() {
        let temp = TempDir::new().unwrap();
        let data_dir = temp.path().join("seatwise");
        init_database(&InitOptions::new(data_dir.clone())).unwrap();

        {
            let db = Database::open(DatabaseConfig::new(data_dir.join("seatwise.db"))).unwrap();
            db.connection()
                .execute(
                    "INSERT INTO flights (flight_number, origin, destination, depart_time, \
                     arrive_time, capacity, available_seats, price_cents) \
                     VALUES ('X', 'A', 'B', 0, 0, 1, 1, 0)",
                    [],
                )
                .unwrap();
        }

        let result =
            init_database(&InitOptions::new(data_dir.clone()).with_overwrite(true)).unwrap();
        assert!(!result.data_dir_created);

        let db = Database::open(DatabaseConfig::new(data_dir.join("seatwise.db"))).unwrap();
        assert!(Database::list_all_flights(db.connection())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_init_config_not_overwritten() {
        let temp = TempDir::new().unwrap();
        let data_dir = temp.path().join("seatwise");
        fs::create_dir_all(&data_dir).unwrap();
        let config_path = data_dir.join("config.yaml");
        fs::write(&config_path, "page_size: 5\n").unwrap();

        let result =
            init_database(&InitOptions::new(data_dir).with_create_config(true)).unwrap();
        assert!(!result.config_created);
        assert_eq!(fs::read_to_string(&config_path).unwrap(), "page_size: 5\n");
    }
}
