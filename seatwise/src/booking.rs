//! Booking ledger types.
//!
//! A [`Booking`] records a seat reservation against one flight. Its seat
//! count and total price are fixed at creation; the only permitted change
//! is the one-way transition from [`BookingStatus::Active`] to
//! [`BookingStatus::Cancelled`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::flight::{FlightDetails, FlightId, Price};

/// Identifier of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(i64);

impl BookingId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BookingId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse()
            .map(Self)
            .map_err(|_| Error::invalid("booking_id", format!("'{s}' is not a booking id")))
    }
}

/// The authenticated principal that owns a booking.
///
/// Supplied by whatever layer verified the caller's credentials; the engine
/// treats it as opaque and only compares it for equality.
///
/// # Examples
///
/// ```
/// use seatwise::OwnerId;
///
/// let owner = OwnerId::new("  alice ").unwrap();
/// assert_eq!(owner.as_str(), "alice");
/// assert!(OwnerId::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    /// Creates an owner id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] if the id is empty after trimming.
    pub fn new(id: impl AsRef<str>) -> Result<Self> {
        let trimmed = id.as_ref().trim();
        if trimmed.is_empty() {
            return Err(Error::invalid("owner", "owner id must not be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle state of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Seats are held against the flight's inventory.
    Active,
    /// Seats have been returned. Terminal.
    Cancelled,
}

impl BookingStatus {
    /// Returns the stored representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "active" => Ok(Self::Active),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(Error::invalid(
                "status",
                format!("unknown booking status '{other}'"),
            )),
        }
    }
}

/// A seat reservation against one flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub(crate) id: BookingId,
    pub(crate) flight_id: FlightId,
    pub(crate) owner_id: OwnerId,
    pub(crate) seats: u32,
    pub(crate) total_price: Price,
    pub(crate) status: BookingStatus,
    pub(crate) created_at: DateTime<Utc>,
}

impl Booking {
    /// Returns the booking id.
    #[must_use]
    pub const fn id(&self) -> BookingId {
        self.id
    }

    /// Returns the booked flight.
    #[must_use]
    pub const fn flight_id(&self) -> FlightId {
        self.flight_id
    }

    /// Returns the owning principal.
    #[must_use]
    pub const fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }

    /// Returns the number of seats held.
    #[must_use]
    pub const fn seats(&self) -> u32 {
        self.seats
    }

    /// Returns the price paid, fixed at booking time.
    #[must_use]
    pub const fn total_price(&self) -> Price {
        self.total_price
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn status(&self) -> BookingStatus {
        self.status
    }

    /// Returns `true` while the booking holds seats.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == BookingStatus::Active
    }

    /// Returns the creation time.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A booking joined with the flight it references, for listings.
///
/// `flight` and `flight_unit_price` are `None` when the flight has since
/// been retired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingSummary {
    /// The booking itself.
    pub booking: Booking,
    /// The flight's descriptive fields.
    pub flight: Option<FlightDetails>,
    /// The flight's current price per seat.
    pub flight_unit_price: Option<Price>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [BookingStatus::Active, BookingStatus::Cancelled] {
            assert_eq!(status.as_str().parse::<BookingStatus>().unwrap(), status);
        }
        assert!("booked".parse::<BookingStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&BookingStatus::Cancelled).unwrap();
        assert_eq!(json, "\"cancelled\"");
    }

    #[test]
    fn test_owner_id_rejects_blank() {
        assert!(OwnerId::new("   ").is_err());
        assert_eq!(OwnerId::new("bob").unwrap().to_string(), "bob");
    }

    #[test]
    fn test_booking_id_parse() {
        assert_eq!("9".parse::<BookingId>().unwrap().value(), 9);
        assert!("-".parse::<BookingId>().is_err());
    }
}
