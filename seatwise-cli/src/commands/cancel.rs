//! Cancel command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, require_owner, with_retries, GlobalOptions};
use clap::Args;
use seatwise::{BookingId, ReservationManager};

/// Cancel one of your bookings and return its seats.
#[derive(Args)]
pub struct CancelCommand {
    /// Booking id
    #[arg(value_name = "BOOKING_ID")]
    pub booking_id: BookingId,
}

impl CancelCommand {
    /// Execute the cancel command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let owner = require_owner(global)?;
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let booking = with_retries(&config, || {
            ReservationManager::new(&mut db).release(self.booking_id, &owner)
        })?;

        if !global.quiet {
            eprintln!(
                "Cancelled booking {} ({} seat(s) returned to flight {})",
                booking.id(),
                booking.seats(),
                booking.flight_id()
            );
        }
        Ok(())
    }
}
