//! Capacity adjustment validator.
//!
//! Administrative changes to a flight must keep every seat that active
//! bookings already hold. Booked seats are derived from the record itself
//! as `capacity - available_seats`, under the same write lock that guards
//! reserve and release.

use rusqlite::Transaction;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::flight::{FlightId, FlightPatch, FlightUpdate, InventoryRecord};

/// Resizes and retires flights without stranding booked seats.
///
/// # Examples
///
/// ```no_run
/// use seatwise::database::{Database, DatabaseConfig};
/// use seatwise::operations::CapacityValidator;
/// use seatwise::FlightId;
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/seatwise.db")).unwrap();
/// CapacityValidator::new(&mut db).retire(FlightId::new(3)).unwrap();
/// ```
pub struct CapacityValidator<'a> {
    db: &'a mut Database,
}

impl<'a> CapacityValidator<'a> {
    /// Creates a validator operating on `db`.
    #[must_use]
    pub fn new(db: &'a mut Database) -> Self {
        Self { db }
    }

    /// Applies a full update to a flight, recomputing its availability.
    ///
    /// Seats already booked stay booked: the new availability is
    /// `capacity - booked`. A price change applies to future bookings only.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidRequest`] if the update is malformed
    /// - [`Error::NotFound`] if the flight doesn't exist
    /// - [`Error::CapacityBelowBooked`] if the new capacity is smaller than
    ///   the seats already booked; nothing changes
    pub fn resize(&mut self, flight_id: FlightId, update: &FlightUpdate) -> Result<InventoryRecord> {
        update.validate()?;

        let result = self.db.write_transaction(|tx| {
            let record = Database::lock_flight(tx, flight_id)?;
            apply_update(tx, record, update)
        });
        log_resize(flight_id, &result);
        result
    }

    /// Applies the fields set in `patch` to the flight as it stands under
    /// the write lock. Fields left `None` keep whatever was committed last,
    /// including edits made since the caller last read the flight.
    ///
    /// # Errors
    ///
    /// Same as [`CapacityValidator::resize`].
    pub fn patch(&mut self, flight_id: FlightId, patch: &FlightPatch) -> Result<InventoryRecord> {
        let result = self.db.write_transaction(|tx| {
            let record = Database::lock_flight(tx, flight_id)?;
            let update = patch.resolve(&record);
            update.validate()?;
            apply_update(tx, record, &update)
        });
        log_resize(flight_id, &result);
        result
    }

    /// Deletes a flight that no active booking references.
    ///
    /// Cancelled bookings of the flight remain in the ledger.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if the flight doesn't exist
    /// - [`Error::HasActiveBookings`] if any seat is still booked
    pub fn retire(&mut self, flight_id: FlightId) -> Result<()> {
        let result = self.db.write_transaction(|tx| {
            let record = Database::lock_flight(tx, flight_id)?;
            let booked = record.booked_seats();
            if booked > 0 {
                return Err(Error::HasActiveBookings { booked });
            }
            Database::delete_flight(tx, flight_id)?;
            Ok(())
        });

        match &result {
            Ok(()) => log::info!("retired flight {flight_id}"),
            Err(e) => log::debug!("retire of flight {flight_id} refused: {e}"),
        }
        result
    }
}

/// Rewrites a locked record, keeping every booked seat.
fn apply_update(
    tx: &Transaction<'_>,
    mut record: InventoryRecord,
    update: &FlightUpdate,
) -> Result<InventoryRecord> {
    let booked = record.booked_seats();
    if update.capacity < booked {
        return Err(Error::CapacityBelowBooked {
            requested: update.capacity,
            booked,
        });
    }

    record.details = update.details.clone();
    record.capacity = update.capacity;
    record.available_seats = update.capacity - booked;
    record.unit_price = update.unit_price;
    Database::update_flight(tx, &record)?;
    Ok(record)
}

fn log_resize(flight_id: FlightId, result: &Result<InventoryRecord>) {
    match result {
        Ok(record) => log::info!(
            "resized flight {} to capacity {} ({} available)",
            record.id(),
            record.capacity(),
            record.available_seats()
        ),
        Err(e) => log::debug!("resize of flight {flight_id} refused: {e}"),
    }
}
