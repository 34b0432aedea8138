//! Bookings command implementation.
//!
//! Lists the acting owner's bookings, active and cancelled, with the flight
//! each one is for.

use crate::error::CliError;
use crate::output::{print_rows, resolve_format, BookingRow, FormatArg, OrderArg};
use crate::utils::{load_configuration, open_database, page_limit, require_owner, GlobalOptions};
use clap::{Args, ValueEnum};
use seatwise::operations::list_bookings;
use seatwise::{BookingQuery, BookingSortKey, SortOrder};

/// Sort keys accepted by `--sort`.
#[derive(Clone, Copy, Debug, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum BookingSortArg {
    /// Booking time
    CreatedAt,
    /// Departure time of the flight
    DepartTime,
    /// Total price paid
    TotalPrice,
}

impl From<BookingSortArg> for BookingSortKey {
    fn from(arg: BookingSortArg) -> Self {
        match arg {
            BookingSortArg::CreatedAt => BookingSortKey::CreatedAt,
            BookingSortArg::DepartTime => BookingSortKey::DepartTime,
            BookingSortArg::TotalPrice => BookingSortKey::TotalPrice,
        }
    }
}

/// List your bookings.
#[derive(Args)]
pub struct BookingsCommand {
    /// Sort key
    #[arg(long, value_enum, default_value = "created_at")]
    pub sort: BookingSortArg,

    /// Sort direction
    #[arg(long, value_enum, default_value = "desc", ignore_case = true)]
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

impl BookingsCommand {
    /// Execute the bookings command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let owner = require_owner(global)?;
        let config = load_configuration(global)?;
        let limit = page_limit(&config, self.limit)?;
        let db = open_database(global, &config)?;

        let query = BookingQuery::new()
            .sort(self.sort.into(), SortOrder::from(self.order))
            .page(limit, self.offset);
        let page = list_bookings(&db, &owner, &query)?;

        let rows: Vec<BookingRow> = page.results.iter().map(BookingRow::from).collect();
        print_rows(resolve_format(self.format, &config), &rows)?;

        if global.verbose {
            eprintln!(
                "Showing {} of {} booking(s) from offset {}",
                rows.len(),
                page.total,
                page.offset
            );
        }
        Ok(())
    }
}
