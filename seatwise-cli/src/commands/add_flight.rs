//! Add-flight command implementation.
//!
//! Creates a flight with every seat available and prints its id.

use crate::error::CliError;
use crate::output::describe_flight;
use crate::utils::{
    load_configuration, open_database, parse_datetime, parse_price, with_retries, GlobalOptions,
};
use chrono::{DateTime, Utc};
use clap::Args;
use seatwise::operations::create_flight;
use seatwise::{FlightDetails, NewFlight, Price};

/// Add a flight to the catalogue.
#[derive(Args)]
pub struct AddFlightCommand {
    /// Flight number, e.g. SW101
    #[arg(long, value_name = "NUMBER")]
    pub flight_number: String,

    /// Origin airport code
    #[arg(long, value_name = "CODE")]
    pub origin: String,

    /// Destination airport code
    #[arg(long, value_name = "CODE")]
    pub destination: String,

    /// Departure time (RFC 3339)
    #[arg(long, value_name = "TIME", value_parser = parse_datetime)]
    pub depart: DateTime<Utc>,

    /// Arrival time (RFC 3339)
    #[arg(long, value_name = "TIME", value_parser = parse_datetime)]
    pub arrive: DateTime<Utc>,

    /// Total seats
    #[arg(long, value_name = "SEATS")]
    pub capacity: u32,

    /// Price per seat, e.g. 199.99
    #[arg(long, value_name = "PRICE", value_parser = parse_price)]
    pub price: Price,
}

impl AddFlightCommand {
    /// Execute the add-flight command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let flight = NewFlight {
            details: FlightDetails {
                flight_number: self.flight_number,
                origin: self.origin,
                destination: self.destination,
                depart_time: self.depart,
                arrive_time: self.arrive,
            },
            capacity: self.capacity,
            unit_price: self.price,
        };

        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;
        let record = with_retries(&config, || create_flight(&mut db, &flight))?;

        println!("{}", record.id());
        if !global.quiet {
            eprintln!(
                "Added flight {} with {} seats at {}",
                describe_flight(&record),
                record.capacity(),
                record.unit_price()
            );
        }
        Ok(())
    }
}
