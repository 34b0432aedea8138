//! Error types for the seatwise library.
//!
//! This module provides the error taxonomy for every engine operation,
//! using `thiserror` for ergonomic error handling. Each variant corresponds
//! to one failure kind a caller can map to a response; only the transient
//! kinds are safe to retry automatically.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::booking::BookingId;
use crate::flight::FlightId;

/// Result type alias for operations that may fail with a seatwise error.
///
/// # Examples
///
/// ```
/// use seatwise::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(3)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the seatwise library.
#[derive(Debug, Error)]
pub enum Error {
    /// The referenced flight or booking does not exist.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// Malformed input, e.g. a non-positive seat count.
    #[error("invalid request for '{field}': {message}")]
    InvalidRequest {
        /// The offending field.
        field: String,
        /// A description of the problem.
        message: String,
    },

    /// Not enough seats were available at decision time.
    #[error("insufficient inventory: requested {requested} seat(s), {available} available")]
    InsufficientInventory {
        /// Seats requested by the caller.
        requested: u32,
        /// Seats available when the request was evaluated.
        available: u32,
    },

    /// The caller does not own the booking it tried to act on.
    #[error("forbidden: {details}")]
    Forbidden {
        /// Details about the ownership mismatch.
        details: String,
    },

    /// The booking was already cancelled.
    #[error("booking {booking} is already cancelled")]
    AlreadyCancelled {
        /// The booking that was already cancelled.
        booking: BookingId,
    },

    /// A resize would leave fewer seats than are already booked.
    #[error("cannot reduce capacity to {requested}: {booked} seat(s) are already booked")]
    CapacityBelowBooked {
        /// The capacity the caller asked for.
        requested: u32,
        /// Seats currently held by active bookings.
        booked: u32,
    },

    /// A flight cannot be retired while it still has active bookings.
    #[error("cannot retire flight: {booked} seat(s) held by active bookings")]
    HasActiveBookings {
        /// Seats currently held by active bookings.
        booked: u32,
    },

    /// Waiting for the store's write lock exceeded the busy timeout.
    #[error("database lock timeout after {}ms", waited.as_millis())]
    LockTimeout {
        /// How long the connection was configured to wait.
        waited: Duration,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Stored inventory disagrees with the ledger; the operation was
    /// rolled back.
    #[error("inventory of flight {flight} is inconsistent: {details}")]
    InconsistentInventory {
        /// The flight whose record is out of step.
        flight: FlightId,
        /// What was found.
        details: String,
    },

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration value failed validation.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// The data directory was not found and auto-initialization is disabled.
    #[error("data directory not found: {}", path.display())]
    DataDirectoryNotFound {
        /// The expected path to the data directory.
        path: PathBuf,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: u32,
        /// The schema version found in the database.
        found: u32,
    },
}

impl Error {
    /// Shorthand for an [`Error::InvalidRequest`].
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Returns `true` if the failure is transient and the whole operation
    /// may be retried unchanged.
    ///
    /// Only lock timeouts and busy/locked storage errors qualify. Domain
    /// refusals such as [`Error::InsufficientInventory`] or
    /// [`Error::AlreadyCancelled`] are terminal for the request.
    ///
    /// # Examples
    ///
    /// ```
    /// use seatwise::Error;
    /// use std::time::Duration;
    ///
    /// let err = Error::LockTimeout { waited: Duration::from_secs(5) };
    /// assert!(err.is_transient());
    ///
    /// let err = Error::InsufficientInventory { requested: 3, available: 1 };
    /// assert!(!err.is_transient());
    /// ```
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::LockTimeout { .. } => true,
            Self::Database(err) => is_busy(err),
            _ => false,
        }
    }

    /// Returns `true` if the error is a refusal based on the current state
    /// of the inventory or ledger (as opposed to bad input or a storage
    /// failure).
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::InsufficientInventory { .. }
                | Self::AlreadyCancelled { .. }
                | Self::CapacityBelowBooked { .. }
                | Self::HasActiveBookings { .. }
        )
    }

    /// Check if error indicates a missing flight or booking.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Returns `true` if a SQLite error means another connection holds the lock.
pub(crate) fn is_busy(err: &rusqlite::Error) -> bool {
    matches!(
        err.sqlite_error_code(),
        Some(rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked)
    )
}
