//! Show-flight command implementation.

use crate::error::CliError;
use crate::output::{print_rows, resolve_format, FlightRow, FormatArg};
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use seatwise::operations::get_flight;
use seatwise::FlightId;

/// Show one flight and its availability.
#[derive(Args)]
pub struct ShowFlightCommand {
    /// Flight id
    #[arg(value_name = "FLIGHT_ID")]
    pub flight_id: FlightId,

    /// Output format
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<FormatArg>,
}

impl ShowFlightCommand {
    /// Execute the show-flight command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let record = get_flight(&db, self.flight_id)?;
        print_rows(
            resolve_format(self.format, &config),
            &[FlightRow::from(&record)],
        )
    }
}
