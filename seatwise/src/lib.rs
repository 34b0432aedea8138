#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # seatwise
//!
//! A library for transactional flight seat reservations.
//!
//! Many callers may reserve, release and resize against the same flight at
//! once. The engine keeps allocated seats within capacity, restores seats
//! exactly on cancellation, and refuses capacity edits that would strand
//! existing bookings.
//!
//! ## Core Types
//!
//! - [`InventoryRecord`], [`NewFlight`], [`FlightUpdate`], [`FlightPatch`], [`Price`]: flight inventory
//! - [`Booking`], [`OwnerId`], [`BookingStatus`]: the booking ledger
//! - [`Database`]: the SQLite store and its scoped transactions
//! - [`operations`]: reserve, release, resize, retire and the read-side queries
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use seatwise::Price;
//!
//! let unit: Price = "200".parse().unwrap();
//! assert_eq!(unit.times(3).unwrap().cents(), 60_000);
//! ```

pub mod booking;
pub mod config;
pub mod database;
pub mod error;
pub mod flight;
pub mod logging;
pub mod operations;
pub mod search;

// Re-export key types at crate root for convenience
pub use booking::{Booking, BookingId, BookingStatus, BookingSummary, OwnerId};
pub use config::{Config, ConfigBuilder, OutputFormat};
pub use database::{Database, DatabaseConfig};
pub use error::{Error, Result};
pub use flight::{
    FlightDetails, FlightId, FlightPatch, FlightUpdate, InventoryRecord, NewFlight, Price,
};
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::{
    CapacityValidator, InventoryDiscrepancy, ReservationManager, ReserveRequest, RetryPolicy,
};
pub use search::{BookingQuery, BookingSortKey, FlightQuery, FlightSortKey, Page, SortOrder};
