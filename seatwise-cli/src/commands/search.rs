//! Search command implementation.
//!
//! Lists flights matching optional route, date, seat and price filters, one
//! page at a time.

use crate::error::CliError;
use crate::output::{print_rows, resolve_format, FlightRow, FormatArg, OrderArg};
use crate::utils::{
    load_configuration, open_database, page_limit, parse_date, parse_datetime, parse_price,
    GlobalOptions,
};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, ValueEnum};
use seatwise::operations::search_flights;
use seatwise::{FlightQuery, FlightSortKey, Price, SortOrder};

/// Sort keys accepted by `--sort`.
#[derive(Clone, Copy, Debug, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum FlightSortArg {
    /// Departure time
    DepartTime,
    /// Price per seat
    Price,
}

impl From<FlightSortArg> for FlightSortKey {
    fn from(arg: FlightSortArg) -> Self {
        match arg {
            FlightSortArg::DepartTime => FlightSortKey::DepartTime,
            FlightSortArg::Price => FlightSortKey::Price,
        }
    }
}

/// Search the flight catalogue.
#[derive(Args)]
pub struct SearchCommand {
    /// Origin airport code
    #[arg(long, value_name = "CODE")]
    pub origin: Option<String>,

    /// Destination airport code
    #[arg(long, value_name = "CODE")]
    pub destination: Option<String>,

    /// Departure date (YYYY-MM-DD, UTC); overrides --after/--before
    #[arg(long, value_name = "DATE", value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Departing at or after this time (RFC 3339)
    #[arg(long, value_name = "TIME", value_parser = parse_datetime)]
    pub after: Option<DateTime<Utc>>,

    /// Departing at or before this time (RFC 3339)
    #[arg(long, value_name = "TIME", value_parser = parse_datetime)]
    pub before: Option<DateTime<Utc>>,

    /// Require at least this many available seats
    #[arg(long, value_name = "SEATS")]
    pub min_seats: Option<u32>,

    /// Minimum price per seat
    #[arg(long, value_name = "PRICE", value_parser = parse_price)]
    pub min_price: Option<Price>,

    /// Maximum price per seat
    #[arg(long, value_name = "PRICE", value_parser = parse_price)]
    pub max_price: Option<Price>,

    /// Sort key
    #[arg(long, value_enum, default_value = "depart_time")]
    pub sort: FlightSortArg,

    /// Sort direction
    #[arg(long, value_enum, default_value = "asc", ignore_case = true)]
    pub order: OrderArg,

    /// Page size (default from configuration)
    #[arg(long, value_name = "N")]
    pub limit: Option<u32>,

    /// Rows to skip
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub offset: u32,

    /// Output format
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<FormatArg>,
}

impl SearchCommand {
    /// Execute the search command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let limit = page_limit(&config, self.limit)?;

        let mut query = FlightQuery::new()
            .depart_between(self.after, self.before)
            .price_between(self.min_price, self.max_price)
            .sort(self.sort.into(), SortOrder::from(self.order))
            .page(limit, self.offset);
        if let Some(origin) = self.origin {
            query = query.origin(origin);
        }
        if let Some(destination) = self.destination {
            query = query.destination(destination);
        }
        if let Some(date) = self.date {
            query = query.depart_date(date);
        }
        if let Some(seats) = self.min_seats {
            query = query.min_seats(seats);
        }

        let db = open_database(global, &config)?;
        let page = search_flights(&db, &query)?;

        let rows: Vec<FlightRow> = page.results.iter().map(FlightRow::from).collect();
        print_rows(resolve_format(self.format, &config), &rows)?;

        if global.verbose {
            eprintln!(
                "Showing {} of {} flight(s) from offset {}",
                rows.len(),
                page.total,
                page.offset
            );
        }
        Ok(())
    }
}
