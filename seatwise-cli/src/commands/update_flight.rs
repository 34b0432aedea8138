//! Update-flight command implementation.
//!
//! Edits a flight's descriptive fields, price and capacity. Unset options
//! keep the values stored when the write lock is taken. Capacity cannot drop below the seats already
//! booked.

use crate::error::CliError;
use crate::output::{print_rows, resolve_format, FlightRow, FormatArg};
use crate::utils::{
    load_configuration, open_database, parse_datetime, parse_price, with_retries, GlobalOptions,
};
use chrono::{DateTime, Utc};
use clap::Args;
use seatwise::{CapacityValidator, FlightId, FlightPatch, Price};

/// Update a flight's details, price or capacity.
#[derive(Args)]
pub struct UpdateFlightCommand {
    /// Flight id
    #[arg(value_name = "FLIGHT_ID")]
    pub flight_id: FlightId,

    /// New flight number
    #[arg(long, value_name = "NUMBER")]
    pub flight_number: Option<String>,

    /// New origin airport code
    #[arg(long, value_name = "CODE")]
    pub origin: Option<String>,

    /// New destination airport code
    #[arg(long, value_name = "CODE")]
    pub destination: Option<String>,

    /// New departure time (RFC 3339)
    #[arg(long, value_name = "TIME", value_parser = parse_datetime)]
    pub depart: Option<DateTime<Utc>>,

    /// New arrival time (RFC 3339)
    #[arg(long, value_name = "TIME", value_parser = parse_datetime)]
    pub arrive: Option<DateTime<Utc>>,

    /// New total seats
    #[arg(long, value_name = "SEATS")]
    pub capacity: Option<u32>,

    /// New price per seat
    #[arg(long, value_name = "PRICE", value_parser = parse_price)]
    pub price: Option<Price>,

    /// Output format for the updated flight
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<FormatArg>,
}

impl UpdateFlightCommand {
    /// Execute the update-flight command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let patch = FlightPatch {
            flight_number: self.flight_number,
            origin: self.origin,
            destination: self.destination,
            depart_time: self.depart,
            arrive_time: self.arrive,
            capacity: self.capacity,
            unit_price: self.price,
        };

        let record = with_retries(&config, || {
            CapacityValidator::new(&mut db).patch(self.flight_id, &patch)
        })?;

        print_rows(
            resolve_format(self.format, &config),
            &[FlightRow::from(&record)],
        )
    }
}
