//! Utility functions for CLI operations.
//!
//! Configuration loading, database opening, principal selection and the
//! small argument parsers shared by the commands.

use crate::error::CliError;
use chrono::{DateTime, NaiveDate, Utc};
use seatwise::database::{default_data_dir, DATABASE_FILE_NAME};
use seatwise::operations::{retry_transient, RetryPolicy};
use seatwise::{Config, ConfigBuilder, Database, DatabaseConfig, OwnerId, Price};
use std::path::PathBuf;
use std::time::Duration;

/// Pause between attempts when retrying a lock timeout.
const RETRY_BACKOFF: Duration = Duration::from_millis(100);

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds).
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,

    /// The principal acting on bookings.
    pub owner: Option<String>,
}

/// Resolve the data directory: `--data-dir` / `SEATWISE_DATA_DIR`, else
/// `~/.seatwise`.
pub fn resolve_data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    match &global.data_dir {
        Some(dir) => Ok(dir.clone()),
        None => default_data_dir().map_err(|e| CliError::Config(e.to_string())),
    }
}

/// Load layered configuration for the resolved data directory.
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let data_dir = resolve_data_dir(global)?;
    ConfigBuilder::new()
        .with_data_dir(data_dir)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Open the database with the configured lock wait.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init is
/// disabled by flag or configuration.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let db_path = resolve_data_dir(global)?.join(DATABASE_FILE_NAME);

    if !db_path.exists() && (global.disable_autoinit || config.autoinit_disabled()) {
        return Err(CliError::NoDataDirectory);
    }

    let timeout_seconds = global
        .busy_timeout
        .map_or_else(|| config.lock_wait_seconds(), u64::from);
    log::debug!(
        "opening {} with a {timeout_seconds}s lock wait",
        db_path.display()
    );
    let db_config =
        DatabaseConfig::new(db_path).with_busy_timeout(Duration::from_secs(timeout_seconds));

    Database::open(db_config).map_err(CliError::from)
}

/// The authenticated principal from `--as` / `SEATWISE_OWNER`.
pub fn require_owner(global: &GlobalOptions) -> Result<OwnerId, CliError> {
    let raw = global.owner.as_deref().ok_or_else(|| {
        CliError::InvalidArguments(
            "this command acts on behalf of an owner; pass --as or set SEATWISE_OWNER".into(),
        )
    })?;
    OwnerId::new(raw).map_err(|e| CliError::InvalidArguments(e.to_string()))
}

/// Run a mutating operation, retrying lock timeouts as configured.
pub fn with_retries<T>(
    config: &Config,
    op: impl FnMut() -> seatwise::Result<T>,
) -> Result<T, CliError> {
    let policy = RetryPolicy::with_retries(config.transient_retries(), RETRY_BACKOFF);
    retry_transient(policy, op).map_err(CliError::from)
}

/// Check a requested page size against the configured maximum.
pub fn page_limit(config: &Config, requested: Option<u32>) -> Result<u32, CliError> {
    let limit = requested.unwrap_or_else(|| config.page_size());
    if limit == 0 || limit > config.max_page_size() {
        return Err(CliError::InvalidArguments(format!(
            "--limit must be between 1 and {}",
            config.max_page_size()
        )));
    }
    Ok(limit)
}

/// Parse an RFC 3339 timestamp argument.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("'{s}' is not an RFC 3339 timestamp: {e}"))
}

/// Parse a `YYYY-MM-DD` date argument.
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("'{s}' is not a date: {e}"))
}

/// Parse a price argument such as `199.99`.
pub fn parse_price(s: &str) -> Result<Price, String> {
    s.parse::<Price>().map_err(|e| e.to_string())
}

/// Format a timestamp for display.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}
