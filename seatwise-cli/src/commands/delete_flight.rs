//! Delete-flight command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, with_retries, GlobalOptions};
use clap::Args;
use seatwise::{CapacityValidator, FlightId};

/// Retire a flight that has no active bookings.
#[derive(Args)]
pub struct DeleteFlightCommand {
    /// Flight id
    #[arg(value_name = "FLIGHT_ID")]
    pub flight_id: FlightId,
}

impl DeleteFlightCommand {
    /// Execute the delete-flight command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        with_retries(&config, || {
            CapacityValidator::new(&mut db).retire(self.flight_id)
        })?;

        if !global.quiet {
            eprintln!("Deleted flight {}", self.flight_id);
        }
        Ok(())
    }
}
