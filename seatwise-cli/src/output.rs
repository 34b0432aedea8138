//! Rendering of flights and bookings as a table, JSON or CSV.

use crate::error::CliError;
use crate::utils::format_timestamp;
use clap::ValueEnum;
use seatwise::config::OutputFormat;
use seatwise::{Booking, BookingSummary, Config, InventoryRecord, SortOrder};
use serde::Serialize;
use std::io::Write;

/// `--format` values.
#[derive(Clone, Copy, Debug, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum FormatArg {
    /// Tab-separated table (human-readable)
    Table,
    /// JSON array
    Json,
    /// CSV with a header row
    Csv,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Table => OutputFormat::Table,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Csv => OutputFormat::Csv,
        }
    }
}

/// `--order` values.
#[derive(Clone, Copy, Debug, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OrderArg {
    /// Ascending
    Asc,
    /// Descending
    Desc,
}

impl From<OrderArg> for SortOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Asc => SortOrder::Asc,
            OrderArg::Desc => SortOrder::Desc,
        }
    }
}

/// The flag if given, else the configured format.
pub fn resolve_format(arg: Option<FormatArg>, config: &Config) -> OutputFormat {
    arg.map_or_else(|| config.output_format(), OutputFormat::from)
}

/// A flat record that can be written in every output format.
pub trait Tabular: Serialize {
    /// Column names, lowercase.
    const HEADERS: &'static [&'static str];

    /// Cell values in header order.
    fn cells(&self) -> Vec<String>;
}

/// One flight in listings.
#[derive(Debug, Serialize)]
pub struct FlightRow {
    pub id: i64,
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    pub depart_time: String,
    pub arrive_time: String,
    pub capacity: u32,
    pub available_seats: u32,
    pub price: String,
}

impl From<&InventoryRecord> for FlightRow {
    fn from(record: &InventoryRecord) -> Self {
        let details = record.details();
        Self {
            id: record.id().value(),
            flight_number: details.flight_number.clone(),
            origin: details.origin.clone(),
            destination: details.destination.clone(),
            depart_time: details.depart_time.to_rfc3339(),
            arrive_time: details.arrive_time.to_rfc3339(),
            capacity: record.capacity(),
            available_seats: record.available_seats(),
            price: record.unit_price().to_string(),
        }
    }
}

impl Tabular for FlightRow {
    const HEADERS: &'static [&'static str] = &[
        "id",
        "flight_number",
        "origin",
        "destination",
        "depart_time",
        "arrive_time",
        "capacity",
        "available_seats",
        "price",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.flight_number.clone(),
            self.origin.clone(),
            self.destination.clone(),
            self.depart_time.clone(),
            self.arrive_time.clone(),
            self.capacity.to_string(),
            self.available_seats.to_string(),
            self.price.clone(),
        ]
    }
}

/// One booking in listings, with its flight when it still exists.
#[derive(Debug, Serialize)]
pub struct BookingRow {
    pub id: i64,
    pub flight_id: i64,
    pub flight_number: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub depart_time: Option<String>,
    pub seats: u32,
    pub total_price: String,
    pub status: String,
    pub created_at: String,
}

impl From<&Booking> for BookingRow {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.id().value(),
            flight_id: booking.flight_id().value(),
            flight_number: None,
            origin: None,
            destination: None,
            depart_time: None,
            seats: booking.seats(),
            total_price: booking.total_price().to_string(),
            status: booking.status().to_string(),
            created_at: booking.created_at().to_rfc3339(),
        }
    }
}

impl From<&BookingSummary> for BookingRow {
    fn from(summary: &BookingSummary) -> Self {
        let mut row = Self::from(&summary.booking);
        if let Some(flight) = &summary.flight {
            row.flight_number = Some(flight.flight_number.clone());
            row.origin = Some(flight.origin.clone());
            row.destination = Some(flight.destination.clone());
            row.depart_time = Some(flight.depart_time.to_rfc3339());
        }
        row
    }
}

impl Tabular for BookingRow {
    const HEADERS: &'static [&'static str] = &[
        "id",
        "flight_id",
        "flight_number",
        "origin",
        "destination",
        "depart_time",
        "seats",
        "total_price",
        "status",
        "created_at",
    ];

    fn cells(&self) -> Vec<String> {
        let or_empty = |v: &Option<String>| v.clone().unwrap_or_default();
        vec![
            self.id.to_string(),
            self.flight_id.to_string(),
            or_empty(&self.flight_number),
            or_empty(&self.origin),
            or_empty(&self.destination),
            or_empty(&self.depart_time),
            self.seats.to_string(),
            self.total_price.clone(),
            self.status.clone(),
            self.created_at.clone(),
        ]
    }
}

/// Write `rows` to `out` in `format`.
pub fn render<T: Tabular, W: Write>(
    format: OutputFormat,
    rows: &[T],
    mut out: W,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Table => {
            let header = T::HEADERS
                .iter()
                .map(|h| h.to_uppercase())
                .collect::<Vec<_>>()
                .join("\t");
            writeln!(out, "{header}")?;
            for row in rows {
                let cells: Vec<String> = row
                    .cells()
                    .into_iter()
                    .map(|c| if c.is_empty() { "-".to_string() } else { c })
                    .collect();
                writeln!(out, "{}", cells.join("\t"))?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, rows)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            writer.write_record(T::HEADERS)?;
            for row in rows {
                writer.write_record(row.cells())?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}

/// Write `rows` to stdout.
pub fn print_rows<T: Tabular>(format: OutputFormat, rows: &[T]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    render(format, rows, stdout.lock())
}

/// A short human summary of a departure, for messages on stderr.
pub fn describe_flight(record: &InventoryRecord) -> String {
    let details = record.details();
    format!(
        "{} {} -> {} at {}",
        details.flight_number,
        details.origin,
        details.destination,
        format_timestamp(details.depart_time)
    )
}
