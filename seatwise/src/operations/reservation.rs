//! Reservation transaction manager.
//!
//! [`ReservationManager`] owns the two operations that move seats between a
//! flight's inventory and the booking ledger. Each runs as one write
//! transaction: the availability check, the inventory update and the ledger
//! write either all commit or none do.
//!
//! Lock order is fixed. `reserve` touches only the inventory record;
//! `release` loads the booking first and then the inventory record.

use chrono::Utc;

use crate::booking::{Booking, BookingId, BookingStatus, OwnerId};
use crate::database::Database;
use crate::error::{Error, Result};
use crate::flight::FlightId;

/// A request to hold seats on a flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReserveRequest {
    /// The flight to book.
    pub flight_id: FlightId,
    /// The authenticated principal making the booking.
    pub owner_id: OwnerId,
    /// Number of seats, at least one.
    pub seats: u32,
}

impl ReserveRequest {
    /// Creates a reserve request.
    #[must_use]
    pub const fn new(flight_id: FlightId, owner_id: OwnerId, seats: u32) -> Self {
        Self {
            flight_id,
            owner_id,
            seats,
        }
    }
}

/// Executes reserve and release against one database connection.
///
/// # Examples
///
/// ```no_run
/// use seatwise::database::{Database, DatabaseConfig};
/// use seatwise::operations::{ReservationManager, ReserveRequest};
/// use seatwise::{FlightId, OwnerId};
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/seatwise.db")).unwrap();
/// let owner = OwnerId::new("alice").unwrap();
///
/// let booking = ReservationManager::new(&mut db)
///     .reserve(&ReserveRequest::new(FlightId::new(1), owner.clone(), 2))
///     .unwrap();
/// ReservationManager::new(&mut db)
///     .release(booking.id(), &owner)
///     .unwrap();
/// ```
pub struct ReservationManager<'a> {
    db: &'a mut Database,
}

impl<'a> ReservationManager<'a> {
    /// Creates a manager operating on `db`.
    #[must_use]
    pub fn new(db: &'a mut Database) -> Self {
        Self { db }
    }

    /// Holds `request.seats` seats on a flight for `request.owner_id`.
    ///
    /// The booking's total price is fixed at `seats x unit_price` as of the
    /// moment the lock is held.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidRequest`] if `seats` is zero (nothing is locked)
    /// - [`Error::NotFound`] if the flight doesn't exist
    /// - [`Error::InsufficientInventory`] if fewer seats are available than
    ///   requested; nothing changes
    /// - [`Error::LockTimeout`] if the write lock could not be acquired
    pub fn reserve(&mut self, request: &ReserveRequest) -> Result<Booking> {
        if request.seats == 0 {
            return Err(Error::invalid("seats", "seat count must be at least 1"));
        }

        let result = self.db.write_transaction(|tx| {
            let flight = Database::lock_flight(tx, request.flight_id)?;

            if flight.available_seats() < request.seats {
                return Err(Error::InsufficientInventory {
                    requested: request.seats,
                    available: flight.available_seats(),
                });
            }

            let total_price = flight.unit_price().times(request.seats)?;
            Database::set_available_seats(
                tx,
                flight.id(),
                flight.available_seats() - request.seats,
            )?;

            Database::insert_booking(
                tx,
                flight.id(),
                &request.owner_id,
                request.seats,
                total_price,
                Utc::now(),
            )
        });

        match &result {
            Ok(booking) => log::info!(
                "reserved {} seat(s) on flight {} for {} (booking {}, total {})",
                booking.seats(),
                booking.flight_id(),
                booking.owner_id(),
                booking.id(),
                booking.total_price()
            ),
            Err(e) => log::debug!(
                "reserve of {} seat(s) on flight {} refused: {e}",
                request.seats,
                request.flight_id
            ),
        }
        result
    }

    /// Cancels one of `owner`'s bookings and returns its seats to the flight.
    ///
    /// Returns the booking as cancelled.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if the booking doesn't exist
    /// - [`Error::Forbidden`] if `owner` does not own it
    /// - [`Error::AlreadyCancelled`] if it was cancelled before; release is
    ///   not idempotent
    /// - [`Error::LockTimeout`] if the write lock could not be acquired
    pub fn release(&mut self, booking_id: BookingId, owner: &OwnerId) -> Result<Booking> {
        let result = self.db.write_transaction(|tx| {
            let mut booking = Database::lock_booking(tx, booking_id)?;

            if booking.owner_id() != owner {
                return Err(Error::Forbidden {
                    details: format!("booking {booking_id} belongs to another owner"),
                });
            }
            if !booking.is_active() {
                return Err(Error::AlreadyCancelled {
                    booking: booking_id,
                });
            }

            Database::mark_cancelled(tx, booking_id)?;

            let flight = Database::lock_flight(tx, booking.flight_id())?;
            let restored = flight
                .available_seats()
                .checked_add(booking.seats())
                .filter(|seats| *seats <= flight.capacity())
                .ok_or_else(|| Error::InconsistentInventory {
                    flight: flight.id(),
                    details: format!(
                        "returning {} seat(s) to {} available would exceed capacity {}",
                        booking.seats(),
                        flight.available_seats(),
                        flight.capacity()
                    ),
                })?;
            Database::set_available_seats(tx, flight.id(), restored)?;

            booking.status = BookingStatus::Cancelled;
            Ok(booking)
        });

        match &result {
            Ok(booking) => log::info!(
                "released booking {} ({} seat(s) back to flight {})",
                booking.id(),
                booking.seats(),
                booking.flight_id()
            ),
            Err(e) => log::debug!("release of booking {booking_id} refused: {e}"),
        }
        result
    }
}
