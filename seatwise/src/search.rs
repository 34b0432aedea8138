//! Query types for flight search and booking listings.
//!
//! Sort selection is an enumerated set of permitted keys; each key maps to
//! a fixed column reference, so caller-supplied strings never reach SQL text.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::flight::Price;

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Direction of a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl SortOrder {
    pub(crate) const fn sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(Error::invalid("sort_order", format!("unknown sort order '{s}'"))),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        })
    }
}

/// Permitted sort keys for flight search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightSortKey {
    /// Scheduled departure.
    DepartTime,
    /// Price per seat.
    Price,
}

impl FlightSortKey {
    pub(crate) const fn column(self) -> &'static str {
        match self {
            Self::DepartTime => "depart_time",
            Self::Price => "price_cents",
        }
    }
}

impl FromStr for FlightSortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "depart_time" => Ok(Self::DepartTime),
            "price" => Ok(Self::Price),
            _ => Err(Error::invalid("sort_by", format!("cannot sort flights by '{s}'"))),
        }
    }
}

/// Permitted sort keys for booking listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingSortKey {
    /// Booking creation time.
    CreatedAt,
    /// The booked flight's departure.
    DepartTime,
    /// Price paid.
    TotalPrice,
}

impl BookingSortKey {
    pub(crate) const fn column(self) -> &'static str {
        match self {
            Self::CreatedAt => "b.created_at",
            Self::DepartTime => "f.depart_time",
            Self::TotalPrice => "b.total_price_cents",
        }
    }
}

impl FromStr for BookingSortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "created_at" => Ok(Self::CreatedAt),
            "depart_time" => Ok(Self::DepartTime),
            "total_price" => Ok(Self::TotalPrice),
            _ => Err(Error::invalid("sort_by", format!("cannot sort bookings by '{s}'"))),
        }
    }
}

/// Filters, ordering and pagination for flight search.
///
/// # Examples
///
/// ```
/// use seatwise::search::{FlightQuery, FlightSortKey, SortOrder};
///
/// let query = FlightQuery::new()
///     .origin("DEL")
///     .min_seats(2)
///     .sort(FlightSortKey::Price, SortOrder::Desc)
///     .page(20, 0);
/// assert_eq!(query.limit, 20);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightQuery {
    /// Exact origin match.
    pub origin: Option<String>,
    /// Exact destination match.
    pub destination: Option<String>,
    /// Departure on this calendar date (UTC). Overrides the window below.
    pub depart_date: Option<NaiveDate>,
    /// Departure at or after this instant.
    pub depart_after: Option<DateTime<Utc>>,
    /// Departure at or before this instant.
    pub depart_before: Option<DateTime<Utc>>,
    /// At least this many seats available.
    pub min_seats: Option<u32>,
    /// Price per seat at least this much.
    pub min_price: Option<Price>,
    /// Price per seat at most this much.
    pub max_price: Option<Price>,
    /// Sort key.
    pub sort_by: FlightSortKey,
    /// Sort direction.
    pub sort_order: SortOrder,
    /// Page size.
    pub limit: u32,
    /// Rows to skip.
    pub offset: u32,
}

impl Default for FlightQuery {
    fn default() -> Self {
        Self {
            origin: None,
            destination: None,
            depart_date: None,
            depart_after: None,
            depart_before: None,
            min_seats: None,
            min_price: None,
            max_price: None,
            sort_by: FlightSortKey::DepartTime,
            sort_order: SortOrder::Asc,
            limit: DEFAULT_PAGE_SIZE,
            offset: 0,
        }
    }
}

impl FlightQuery {
    /// Creates a query with no filters, sorted by departure ascending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters by origin.
    #[must_use]
    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Filters by destination.
    #[must_use]
    pub fn destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    /// Filters by departure date.
    #[must_use]
    pub const fn depart_date(mut self, date: NaiveDate) -> Self {
        self.depart_date = Some(date);
        self
    }

    /// Filters by a departure window; either end may be open.
    #[must_use]
    pub const fn depart_between(
        mut self,
        after: Option<DateTime<Utc>>,
        before: Option<DateTime<Utc>>,
    ) -> Self {
        self.depart_after = after;
        self.depart_before = before;
        self
    }

    /// Requires at least `seats` available.
    #[must_use]
    pub const fn min_seats(mut self, seats: u32) -> Self {
        self.min_seats = Some(seats);
        self
    }

    /// Restricts the price per seat.
    #[must_use]
    pub const fn price_between(mut self, min: Option<Price>, max: Option<Price>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    /// Sets the ordering.
    #[must_use]
    pub const fn sort(mut self, key: FlightSortKey, order: SortOrder) -> Self {
        self.sort_by = key;
        self.sort_order = order;
        self
    }

    /// Sets the page.
    #[must_use]
    pub const fn page(mut self, limit: u32, offset: u32) -> Self {
        self.limit = limit;
        self.offset = offset;
        self
    }
}

/// Ordering and pagination for a principal's booking listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingQuery {
    /// Sort key.
    pub sort_by: BookingSortKey,
    /// Sort direction.
    pub sort_order: SortOrder,
    /// Page size.
    pub limit: u32,
    /// Rows to skip.
    pub offset: u32,
}

impl Default for BookingQuery {
    fn default() -> Self {
        Self {
            sort_by: BookingSortKey::CreatedAt,
            sort_order: SortOrder::Desc,
            limit: DEFAULT_PAGE_SIZE,
            offset: 0,
        }
    }
}

impl BookingQuery {
    /// Creates a query returning the newest bookings first.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the ordering.
    #[must_use]
    pub const fn sort(mut self, key: BookingSortKey, order: SortOrder) -> Self {
        self.sort_by = key;
        self.sort_order = order;
        self
    }

    /// Sets the page.
    #[must_use]
    pub const fn page(mut self, limit: u32, offset: u32) -> Self {
        self.limit = limit;
        self.offset = offset;
        self
    }
}

/// One page of results together with the unpaginated total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Rows on this page.
    pub results: Vec<T>,
    /// Rows matching the query across all pages.
    pub total: u64,
    /// Page size used.
    pub limit: u32,
    /// Rows skipped.
    pub offset: u32,
}

pub(crate) fn validate_page(limit: u32) -> Result<()> {
    if limit == 0 {
        return Err(Error::invalid("limit", "page size must be at least 1"));
    }
    Ok(())
}
