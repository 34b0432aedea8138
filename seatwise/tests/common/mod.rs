//! Common test utilities for integration tests.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use seatwise::database::{Database, DatabaseConfig};
use seatwise::{FlightDetails, NewFlight, OwnerId, Price};

/// Creates a temporary directory for testing.
#[allow(dead_code)]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

/// Path of the database file inside `dir`.
#[allow(dead_code)]
pub fn db_path(dir: &Path) -> PathBuf {
    dir.join("seatwise.db")
}

/// Opens (creating if needed) the database at `path`.
#[allow(dead_code)]
pub fn open(path: &Path) -> Database {
    Database::open(DatabaseConfig::new(path)).unwrap()
}

/// Creates a test database in a temporary location that outlives the test.
#[allow(dead_code)]
pub fn create_test_database() -> Database {
    let dir = tempfile::tempdir().unwrap();
    let db = open(&db_path(dir.path()));

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}

/// Builds a flight with the given capacity and price (whole currency units).
#[allow(dead_code)]
pub fn flight(capacity: u32, price: &str) -> NewFlight {
    flight_on("DEL", "BOM", "2026-03-01T08:00:00Z", capacity, price)
}

/// Builds a two-hour flight departing at `depart` (RFC 3339).
#[allow(dead_code)]
pub fn flight_on(
    origin: &str,
    destination: &str,
    depart: &str,
    capacity: u32,
    price: &str,
) -> NewFlight {
    let depart_time = DateTime::parse_from_rfc3339(depart)
        .unwrap()
        .with_timezone(&Utc);
    NewFlight {
        details: FlightDetails {
            flight_number: format!("SW{}", depart_time.format("%d%H")),
            origin: origin.into(),
            destination: destination.into(),
            depart_time,
            arrive_time: depart_time + Duration::hours(2),
        },
        capacity,
        unit_price: price.parse::<Price>().unwrap(),
    }
}

/// Shorthand for a valid owner id.
#[allow(dead_code)]
pub fn owner(name: &str) -> OwnerId {
    OwnerId::new(name).unwrap()
}
