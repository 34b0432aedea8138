//! Inventory audit.
//!
//! Cross-checks every flight's stored availability against the ledger:
//! `available_seats` must equal `capacity` minus the seats of the flight's
//! active bookings.

use serde::Serialize;

use crate::database::Database;
use crate::error::Result;
use crate::flight::FlightId;

/// A flight whose stored availability disagrees with the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryDiscrepancy {
    /// The affected flight.
    pub flight_id: FlightId,
    /// Capacity on record.
    pub capacity: u32,
    /// Availability on record.
    pub available_seats: u32,
    /// Seats held by active bookings according to the ledger.
    pub active_seats: u64,
    /// What availability should be, `capacity - active_seats`.
    pub expected_available: i64,
}

/// Reports every flight whose availability disagrees with its active
/// bookings.
///
/// Reads both tables inside one transaction so the comparison is made
/// against a single snapshot. An empty result means the store is
/// consistent.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn verify_inventory(db: &Database) -> Result<Vec<InventoryDiscrepancy>> {
    let discrepancies = db.read_transaction(|tx| {
        let active = Database::active_seats_by_flight(tx)?;
        let flights = Database::list_all_flights(tx)?;

        Ok(flights
            .into_iter()
            .filter_map(|flight| {
                let active_seats = active.get(&flight.id()).copied().unwrap_or(0);
                #[allow(clippy::cast_possible_wrap)]
                let expected_available = i64::from(flight.capacity()) - active_seats as i64;
                (expected_available != i64::from(flight.available_seats())).then(|| {
                    InventoryDiscrepancy {
                        flight_id: flight.id(),
                        capacity: flight.capacity(),
                        available_seats: flight.available_seats(),
                        active_seats,
                        expected_available,
                    }
                })
            })
            .collect::<Vec<_>>())
    })?;

    for d in &discrepancies {
        log::warn!(
            "flight {} has {} seat(s) available, ledger implies {}",
            d.flight_id,
            d.available_seats,
            d.expected_available
        );
    }
    Ok(discrepancies)
}
