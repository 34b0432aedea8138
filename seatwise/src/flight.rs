//! Flight inventory types.
//!
//! An [`InventoryRecord`] is the per-flight record of capacity and remaining
//! sellable seats. It is created by [`crate::operations::create_flight`] and
//! afterwards mutated only by the reservation manager and the capacity
//! validator, both inside a write transaction.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Identifier of a flight's inventory record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlightId(i64);

impl FlightId {
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

impl fmt::Display for FlightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FlightId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse()
            .map(Self)
            .map_err(|_| Error::invalid("flight_id", format!("'{s}' is not a flight id")))
    }
}

/// A non-negative monetary amount with two fractional digits.
///
/// Stored as whole cents so that `seats x unit_price` is exact.
///
/// # Examples
///
/// ```
/// use seatwise::Price;
///
/// let price: Price = "199.5".parse().unwrap();
/// assert_eq!(price.cents(), 19_950);
/// assert_eq!(price.to_string(), "199.50");
///
/// assert!("-1".parse::<Price>().is_err());
/// assert!("1.234".parse::<Price>().is_err());
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(0);

    /// Creates a price from whole cents.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] if `cents` is negative.
    pub fn from_cents(cents: i64) -> Result<Self> {
        if cents < 0 {
            return Err(Error::invalid("price", "price must not be negative"));
        }
        Ok(Self(cents))
    }

    /// Returns the amount in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns the total for `seats` units at this price.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] if the total overflows.
    ///
    /// # Examples
    ///
    /// ```
    /// use seatwise::Price;
    ///
    /// let unit: Price = "200".parse().unwrap();
    /// assert_eq!(unit.times(3).unwrap().to_string(), "600.00");
    /// ```
    pub fn times(self, seats: u32) -> Result<Self> {
        self.0
            .checked_mul(i64::from(seats))
            .map(Self)
            .ok_or_else(|| Error::invalid("seats", "total price overflows"))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl FromStr for Price {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let malformed = || Error::invalid("price", format!("'{s}' is not a valid price"));

        let trimmed = s.trim();
        if trimmed.starts_with('-') {
            return Err(Error::invalid("price", "price must not be negative"));
        }

        let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        if fraction.len() > 2 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }

        let whole: i64 = whole.parse().map_err(|_| malformed())?;
        let fraction: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| malformed())? * 10,
            _ => fraction.parse().map_err(|_| malformed())?,
        };

        whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(fraction))
            .map(Self)
            .ok_or_else(malformed)
    }
}

/// Descriptive fields of a flight. None of these affect inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightDetails {
    /// Carrier flight number, e.g. `"SW101"`.
    pub flight_number: String,
    /// Origin airport or city.
    pub origin: String,
    /// Destination airport or city.
    pub destination: String,
    /// Scheduled departure.
    pub depart_time: DateTime<Utc>,
    /// Scheduled arrival.
    pub arrive_time: DateTime<Utc>,
}

impl FlightDetails {
    /// Checks that every text field is present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] naming the first empty field.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("flight_number", &self.flight_number),
            ("origin", &self.origin),
            ("destination", &self.destination),
        ] {
            if value.trim().is_empty() {
                return Err(Error::invalid(field, "must not be empty"));
            }
        }
        Ok(())
    }
}

/// Input for creating a flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFlight {
    /// Descriptive fields.
    pub details: FlightDetails,
    /// Total sellable seats.
    pub capacity: u32,
    /// Price per seat.
    pub unit_price: Price,
}

impl NewFlight {
    /// Validates the new flight.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] if a descriptive field is empty or
    /// the capacity is zero.
    pub fn validate(&self) -> Result<()> {
        self.details.validate()?;
        validate_capacity(self.capacity)
    }
}

/// Requested changes for an administrative flight update.
///
/// Every field is replaced; this mirrors a full-record edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightUpdate {
    /// New descriptive fields.
    pub details: FlightDetails,
    /// New total capacity.
    pub capacity: u32,
    /// New price per seat, applied to future bookings only.
    pub unit_price: Price,
}

impl FlightUpdate {
    /// Validates the update.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] if a descriptive field is empty or
    /// the capacity is zero.
    pub fn validate(&self) -> Result<()> {
        self.details.validate()?;
        validate_capacity(self.capacity)
    }
}

/// A partial administrative edit. `None` keeps the stored value.
///
/// Unlike [`FlightUpdate`], a patch is resolved against the record read
/// under the write lock, so two admins editing different fields of the same
/// flight both keep their change.
///
/// # Examples
///
/// ```
/// use seatwise::flight::FlightPatch;
///
/// let patch = FlightPatch { capacity: Some(20), ..FlightPatch::default() };
/// assert!(!patch.is_empty());
/// assert!(FlightPatch::default().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlightPatch {
    /// New flight number.
    pub flight_number: Option<String>,
    /// New origin.
    pub origin: Option<String>,
    /// New destination.
    pub destination: Option<String>,
    /// New departure time.
    pub depart_time: Option<DateTime<Utc>>,
    /// New arrival time.
    pub arrive_time: Option<DateTime<Utc>>,
    /// New total capacity.
    pub capacity: Option<u32>,
    /// New price per seat.
    pub unit_price: Option<Price>,
}

impl FlightPatch {
    /// Returns `true` if the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// The full update this patch makes to `record`.
    #[must_use]
    pub fn resolve(&self, record: &InventoryRecord) -> FlightUpdate {
        let current = &record.details;
        FlightUpdate {
            details: FlightDetails {
                flight_number: self
                    .flight_number
                    .clone()
                    .unwrap_or_else(|| current.flight_number.clone()),
                origin: self.origin.clone().unwrap_or_else(|| current.origin.clone()),
                destination: self
                    .destination
                    .clone()
                    .unwrap_or_else(|| current.destination.clone()),
                depart_time: self.depart_time.unwrap_or(current.depart_time),
                arrive_time: self.arrive_time.unwrap_or(current.arrive_time),
            },
            capacity: self.capacity.unwrap_or(record.capacity),
            unit_price: self.unit_price.unwrap_or(record.unit_price),
        }
    }
}

fn validate_capacity(capacity: u32) -> Result<()> {
    if capacity == 0 {
        return Err(Error::invalid("capacity", "capacity must be at least 1"));
    }
    Ok(())
}

/// The durable per-flight record of capacity and remaining seats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub(crate) id: FlightId,
    pub(crate) details: FlightDetails,
    pub(crate) capacity: u32,
    pub(crate) available_seats: u32,
    pub(crate) unit_price: Price,
}

impl InventoryRecord {
    /// Returns the flight id.
    #[must_use]
    pub const fn id(&self) -> FlightId {
        self.id
    }

    /// Returns the descriptive fields.
    #[must_use]
    pub const fn details(&self) -> &FlightDetails {
        &self.details
    }

    /// Returns the total sellable seats.
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Returns the seats still available for booking.
    #[must_use]
    pub const fn available_seats(&self) -> u32 {
        self.available_seats
    }

    /// Returns the current price per seat.
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        self.unit_price
    }

    /// Returns the seats held by active bookings.
    ///
    /// # Examples
    ///
    /// ```
    /// # use seatwise::InventoryRecord;
    /// # fn check(record: &InventoryRecord) {
    /// assert_eq!(record.booked_seats(), record.capacity() - record.available_seats());
    /// # }
    /// ```
    #[must_use]
    pub const fn booked_seats(&self) -> u32 {
        self.capacity - self.available_seats
    }
}
