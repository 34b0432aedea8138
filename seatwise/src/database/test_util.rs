//! Shared test utilities for database and operation unit tests.

use chrono::{DateTime, Duration, Utc};
use tempfile::tempdir;

use crate::booking::OwnerId;
use crate::database::{Database, DatabaseConfig};
use crate::flight::{FlightDetails, NewFlight, Price};

/// Creates a temporary test database that will be cleaned up automatically.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
/// This is acceptable in test code where we want to fail fast.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let config = DatabaseConfig::new(path);
    let db = Database::open(config).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}

/// Builds a flight from DEL to BOM departing 2026-03-01 08:00 UTC.
#[must_use]
pub fn sample_flight(capacity: u32, price_cents: i64) -> NewFlight {
    flight_at("DEL", "BOM", "2026-03-01T08:00:00Z", capacity, price_cents)
}

/// Builds a two-hour flight departing at `depart` (RFC 3339).
///
/// # Panics
///
/// Panics if `depart` is not valid RFC 3339 or the price is negative.
#[must_use]
pub fn flight_at(
    origin: &str,
    destination: &str,
    depart: &str,
    capacity: u32,
    price_cents: i64,
) -> NewFlight {
    let depart_time = DateTime::parse_from_rfc3339(depart)
        .unwrap()
        .with_timezone(&Utc);
    NewFlight {
        details: FlightDetails {
            flight_number: "SW101".into(),
            origin: origin.into(),
            destination: destination.into(),
            depart_time,
            arrive_time: depart_time + Duration::hours(2),
        },
        capacity,
        unit_price: Price::from_cents(price_cents).unwrap(),
    }
}

/// Shorthand for a valid owner id.
///
/// # Panics
///
/// Panics if `name` is blank.
#[must_use]
pub fn owner(name: &str) -> OwnerId {
    OwnerId::new(name).unwrap()
}
