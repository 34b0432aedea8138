//! Database schema management and migrations.
//!
//! This module handles database schema initialization, version checking,
//! and migrations.

use rusqlite::{Connection, TransactionBehavior};

use crate::error::{Error, Result};

use super::schema::{
    CREATE_BOOKINGS_TABLE, CREATE_DEPART_INDEX, CREATE_FLIGHTS_TABLE, CREATE_FLIGHT_STATUS_INDEX,
    CREATE_METADATA_TABLE, CREATE_OWNER_INDEX, CURRENT_SCHEMA_VERSION, INSERT_SCHEMA_VERSION,
    SELECT_SCHEMA_VERSION,
};

/// Initializes the database schema.
///
/// Creates all tables, indices, and metadata for a fresh database. Every
/// statement is idempotent, so a second connection racing the first one
/// through initialization is harmless.
///
/// # Errors
///
/// Returns an error if any SQL statement fails to execute.
///
/// # Examples
///
/// ```
/// use rusqlite::Connection;
/// use seatwise::database::migrations::initialize_schema;
///
/// let conn = Connection::open_in_memory().unwrap();
/// initialize_schema(&conn).unwrap();
/// ```
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    conn.execute(CREATE_METADATA_TABLE, [])?;

    conn.execute(CREATE_FLIGHTS_TABLE, [])?;
    conn.execute(CREATE_BOOKINGS_TABLE, [])?;

    conn.execute(CREATE_OWNER_INDEX, [])?;
    conn.execute(CREATE_FLIGHT_STATUS_INDEX, [])?;
    conn.execute(CREATE_DEPART_INDEX, [])?;

    conn.execute(INSERT_SCHEMA_VERSION, [CURRENT_SCHEMA_VERSION])?;

    Ok(())
}

/// Gets the current schema version from the database.
///
/// # Errors
///
/// Returns an error if the query fails for reasons other than
/// "no rows returned" or "no such table" (both of which mean version 0).
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    let has_metadata: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type = 'table' AND name = 'metadata'",
        [],
        |row| row.get(0),
    )?;
    if !has_metadata {
        return Ok(0);
    }

    match conn.query_row(SELECT_SCHEMA_VERSION, [], |row| {
        let value: String = row.get(0)?;
        value
            .parse::<i32>()
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
    }) {
        Ok(version) => Ok(version),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(e) => Err(e.into()),
    }
}

/// Checks schema compatibility and initializes if needed.
///
/// A fresh database is initialized inside an IMMEDIATE transaction so that
/// concurrent first opens do not interleave.
///
/// # Errors
///
/// Returns [`Error::UnsupportedSchemaVersion`] if the database was written
/// by a different schema version, or a database error if initialization
/// fails.
pub fn check_schema_compatibility(conn: &mut Connection) -> Result<()> {
    let version = get_schema_version(conn)?;

    if version == 0 {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        if get_schema_version(&tx)? == 0 {
            initialize_schema(&tx)?;
        }
        tx.commit()?;
        return Ok(());
    }

    if version != CURRENT_SCHEMA_VERSION {
        #[allow(clippy::cast_sign_loss)]
        return Err(Error::UnsupportedSchemaVersion {
            expected: CURRENT_SCHEMA_VERSION as u32,
            found: version.max(0) as u32,
        });
    }

    Ok(())
}
