//! Book command implementation.
//!
//! Reserves seats on a flight for the acting owner and prints the booking
//! id.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, require_owner, with_retries, GlobalOptions};
use clap::Args;
use seatwise::{FlightId, ReservationManager, ReserveRequest};

/// Book seats on a flight.
#[derive(Args)]
pub struct BookCommand {
    /// Flight id
    #[arg(value_name = "FLIGHT_ID")]
    pub flight_id: FlightId,

    /// Number of seats
    #[arg(long, value_name = "N", default_value_t = 1)]
    pub seats: u32,
}

impl BookCommand {
    /// Execute the book command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let owner = require_owner(global)?;
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let request = ReserveRequest::new(self.flight_id, owner, self.seats);
        let booking = with_retries(&config, || {
            ReservationManager::new(&mut db).reserve(&request)
        })?;

        println!("{}", booking.id());
        if !global.quiet {
            eprintln!(
                "Booked {} seat(s) on flight {} for {} (total {})",
                booking.seats(),
                booking.flight_id(),
                booking.owner_id(),
                booking.total_price()
            );
        }
        Ok(())
    }
}
