//! Database schema definitions and SQL constants.
//!
//! This module contains the table definitions, indices, and shared
//! statements for the inventory store and the booking ledger.

/// Current schema version for the database.
///
/// This version is stored in the metadata table and is used to ensure
/// compatibility between the database and the application.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the flights table (the inventory store).
///
/// `AUTOINCREMENT` keeps a retired flight's id from being reissued, since
/// cancelled bookings may still reference it. The CHECK constraints repeat
/// the record invariants so that no write path can store an impossible
/// seat count.
pub const CREATE_FLIGHTS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS flights (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        flight_number TEXT NOT NULL,
        origin TEXT NOT NULL,
        destination TEXT NOT NULL,
        depart_time INTEGER NOT NULL,
        arrive_time INTEGER NOT NULL,
        capacity INTEGER NOT NULL CHECK (capacity >= 1),
        available_seats INTEGER NOT NULL
            CHECK (available_seats >= 0 AND available_seats <= capacity),
        price_cents INTEGER NOT NULL CHECK (price_cents >= 0)
    )";

/// SQL statement to create the bookings table (the booking ledger).
///
/// `flight_id` is deliberately not a foreign key: bookings outlive the
/// flights they reference.
pub const CREATE_BOOKINGS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS bookings (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        flight_id INTEGER NOT NULL,
        owner_id TEXT NOT NULL,
        seats INTEGER NOT NULL CHECK (seats >= 1),
        total_price_cents INTEGER NOT NULL CHECK (total_price_cents >= 0),
        status TEXT NOT NULL CHECK (status IN ('active', 'cancelled')),
        created_at INTEGER NOT NULL
    )";

/// Index for listing a principal's bookings.
pub const CREATE_OWNER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_bookings_owner ON bookings(owner_id)";

/// Index for aggregating active seats per flight.
pub const CREATE_FLIGHT_STATUS_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_bookings_flight_status ON bookings(flight_id, status)";

/// Index for departure-ordered flight listings.
pub const CREATE_DEPART_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_flights_depart ON flights(depart_time)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// Column list shared by every flight query, in `row_to_flight` order.
pub const FLIGHT_COLUMNS: &str = "id, flight_number, origin, destination, depart_time, \
     arrive_time, capacity, available_seats, price_cents";

/// Column list shared by every booking query, in `row_to_booking` order.
pub const BOOKING_COLUMNS: &str =
    "id, flight_id, owner_id, seats, total_price_cents, status, created_at";
