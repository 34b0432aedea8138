//! Opening the store.

use std::path::Path;
use std::time::Duration;

use rusqlite::{Connection, OpenFlags};

use crate::error::Result;

use super::config::DatabaseConfig;
use super::migrations::check_schema_compatibility;

/// A handle on the flight store.
///
/// A `Database` is one caller: `rusqlite::Connection` is `Send` but not
/// `Sync`, so threads and processes that contend for seats each open their
/// own handle on the same file.
///
/// # Examples
///
/// ```no_run
/// use seatwise::database::{Database, DatabaseConfig};
///
/// let db = Database::open(DatabaseConfig::in_data_dir("/tmp/seatwise")).unwrap();
/// ```
#[derive(Debug)]
pub struct Database {
    pub(super) conn: Connection,
    busy_timeout: Duration,
}

impl Database {
    /// Opens (creating if needed) the store at `config.path`, switches it to
    /// WAL, and installs or checks the schema.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the parent directory cannot be created, a
    /// database error if the file cannot be opened or initialized, or
    /// [`Error::UnsupportedSchemaVersion`](crate::Error::UnsupportedSchemaVersion).
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        if let Some(parent) = config.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut conn = Connection::open_with_flags(
            &config.path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        configure(&conn, config.busy_timeout)?;
        check_schema_compatibility(&mut conn)?;

        log_open(&config.path, config.busy_timeout);
        Ok(Self {
            conn,
            busy_timeout: config.busy_timeout,
        })
    }

    /// How long a write waits for the lock.
    #[must_use]
    pub const fn busy_timeout(&self) -> Duration {
        self.busy_timeout
    }

    /// The raw connection, for committed-data reads inside the crate.
    ///
    /// Every change to flights or bookings goes through
    /// [`Database::write_transaction`].
    #[must_use]
    pub(crate) const fn connection(&self) -> &Connection {
        &self.conn
    }
}

/// Busy timeout first, so the pragmas after it also wait for writers.
fn configure(conn: &Connection, busy_timeout: Duration) -> Result<()> {
    conn.busy_timeout(busy_timeout)?;
    let mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
    if !mode.eq_ignore_ascii_case("wal") {
        log::warn!("journal mode is {mode}, not WAL; readers may block writers");
    }
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    Ok(())
}

fn log_open(path: &Path, busy_timeout: Duration) {
    log::debug!(
        "opened {} (lock wait {}ms)",
        path.display(),
        busy_timeout.as_millis()
    );
}
