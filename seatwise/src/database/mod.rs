//! Database layer for the inventory store and the booking ledger.
//!
//! This module provides a SQLite-based storage layer, including connection
//! management, schema versioning, scoped transactions, and the row-level
//! operations the reservation engine builds on.
//!
//! # Examples
//!
//! ```no_run
//! use seatwise::database::{Database, DatabaseConfig};
//! use seatwise::operations::search_flights;
//! use seatwise::FlightQuery;
//!
//! let config = DatabaseConfig::new("/tmp/seatwise.db");
//! let db = Database::open(config).unwrap();
//!
//! for flight in search_flights(&db, &FlightQuery::new()).unwrap().results {
//!     println!("{} {}", flight.id(), flight.available_seats());
//! }
//! ```
//!
//! Callers outside the crate never see the raw connection, so every write
//! goes through the operations layer:
//!
//! ```compile_fail
//! use seatwise::database::{Database, DatabaseConfig};
//!
//! let db = Database::open(DatabaseConfig::new("/tmp/seatwise.db")).unwrap();
//! db.connection()
//!     .execute("UPDATE flights SET available_seats = 0", [])
//!     .unwrap();
//! ```

mod config;
mod connection;
mod inventory;
mod ledger;
pub mod migrations;
mod schema;
mod transaction;

#[cfg(test)]
pub(crate) mod test_util;

pub use config::{default_data_dir, DatabaseConfig, DATABASE_FILE_NAME, DEFAULT_BUSY_TIMEOUT};
pub use connection::Database;

pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
