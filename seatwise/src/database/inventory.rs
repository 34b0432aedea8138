//! Inventory store: persistence of per-flight inventory records.
//!
//! Reads take any connection or transaction. Writes are `pub(crate)` and
//! take a [`Transaction`], so `available_seats` can only change inside a
//! write transaction opened by the engine.

use chrono::{DateTime, NaiveTime, Utc};
use rusqlite::types::{Type, Value};
use rusqlite::{params, params_from_iter, Connection, Row, Transaction};

use crate::error::{Error, Result};
use crate::flight::{FlightDetails, FlightId, InventoryRecord, NewFlight, Price};
use crate::search::FlightQuery;

use super::connection::Database;
use super::schema::FLIGHT_COLUMNS;

const INSERT_FLIGHT: &str = r"
    INSERT INTO flights
    (flight_number, origin, destination, depart_time, arrive_time,
     capacity, available_seats, price_cents)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?)
";

const UPDATE_FLIGHT: &str = r"
    UPDATE flights
    SET flight_number = ?, origin = ?, destination = ?, depart_time = ?,
        arrive_time = ?, capacity = ?, available_seats = ?, price_cents = ?
    WHERE id = ?
";

const UPDATE_AVAILABLE_SEATS: &str = "UPDATE flights SET available_seats = ? WHERE id = ?";

const DELETE_FLIGHT: &str = "DELETE FROM flights WHERE id = ?";

/// Converts Unix epoch seconds from the database to a UTC timestamp.
pub(super) fn from_unix_secs(column: usize, secs: i64) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            column,
            Type::Integer,
            format!("timestamp {secs} out of range").into(),
        )
    })
}

fn price_from_cents(column: usize, cents: i64) -> rusqlite::Result<Price> {
    Price::from_cents(cents)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Integer, Box::new(e)))
}

/// Deserializes an inventory record from a row.
///
/// Expects the columns of [`FLIGHT_COLUMNS`] starting at index 0.
pub(super) fn row_to_flight(row: &Row<'_>) -> rusqlite::Result<InventoryRecord> {
    Ok(InventoryRecord {
        id: FlightId::new(row.get(0)?),
        details: FlightDetails {
            flight_number: row.get(1)?,
            origin: row.get(2)?,
            destination: row.get(3)?,
            depart_time: from_unix_secs(4, row.get(4)?)?,
            arrive_time: from_unix_secs(5, row.get(5)?)?,
        },
        capacity: row.get(6)?,
        available_seats: row.get(7)?,
        unit_price: price_from_cents(8, row.get(8)?)?,
    })
}

/// Reads optional flight fields from a LEFT JOIN starting at `base`.
///
/// Returns `None` when the joined flight row is missing.
pub(super) fn row_to_joined_flight(
    row: &Row<'_>,
    base: usize,
) -> rusqlite::Result<Option<(FlightDetails, Price)>> {
    let Some(flight_number) = row.get::<_, Option<String>>(base)? else {
        return Ok(None);
    };
    let details = FlightDetails {
        flight_number,
        origin: row.get(base + 1)?,
        destination: row.get(base + 2)?,
        depart_time: from_unix_secs(base + 3, row.get(base + 3)?)?,
        arrive_time: from_unix_secs(base + 4, row.get(base + 4)?)?,
    };
    let price = price_from_cents(base + 5, row.get(base + 5)?)?;
    Ok(Some((details, price)))
}

/// Builds the WHERE clause and bound values for a flight query.
///
/// Only fixed fragments are concatenated; every caller value is bound.
fn flight_filter(query: &FlightQuery) -> (String, Vec<Value>) {
    let mut clauses: Vec<&str> = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    if let Some(origin) = &query.origin {
        clauses.push("origin = ?");
        values.push(Value::Text(origin.clone()));
    }
    if let Some(destination) = &query.destination {
        clauses.push("destination = ?");
        values.push(Value::Text(destination.clone()));
    }

    if let Some(date) = query.depart_date {
        let start = date.and_time(NaiveTime::MIN).and_utc().timestamp();
        clauses.push("depart_time >= ?");
        values.push(Value::Integer(start));
        clauses.push("depart_time < ?");
        values.push(Value::Integer(start + 86_400));
    } else {
        if let Some(after) = query.depart_after {
            clauses.push("depart_time >= ?");
            values.push(Value::Integer(after.timestamp()));
        }
        if let Some(before) = query.depart_before {
            clauses.push("depart_time <= ?");
            values.push(Value::Integer(before.timestamp()));
        }
    }

    if let Some(seats) = query.min_seats {
        clauses.push("available_seats >= ?");
        values.push(Value::Integer(i64::from(seats)));
    }
    if let Some(min) = query.min_price {
        clauses.push("price_cents >= ?");
        values.push(Value::Integer(min.cents()));
    }
    if let Some(max) = query.max_price {
        clauses.push("price_cents <= ?");
        values.push(Value::Integer(max.cents()));
    }

    if clauses.is_empty() {
        (String::new(), values)
    } else {
        (format!(" WHERE {}", clauses.join(" AND ")), values)
    }
}

impl Database {
    /// Inserts a new flight with every seat available.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub(crate) fn insert_flight(tx: &Transaction<'_>, flight: &NewFlight) -> Result<InventoryRecord> {
        let details = &flight.details;
        tx.execute(
            INSERT_FLIGHT,
            params![
                details.flight_number,
                details.origin,
                details.destination,
                details.depart_time.timestamp(),
                details.arrive_time.timestamp(),
                flight.capacity,
                flight.capacity,
                flight.unit_price.cents(),
            ],
        )?;

        Ok(InventoryRecord {
            id: FlightId::new(tx.last_insert_rowid()),
            details: details.clone(),
            capacity: flight.capacity,
            available_seats: flight.capacity,
            unit_price: flight.unit_price,
        })
    }

    /// Retrieves a flight's inventory record.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(record))` if the flight exists
    /// - `Ok(None)` if it doesn't
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub(crate) fn find_flight(conn: &Connection, id: FlightId) -> Result<Option<InventoryRecord>> {
        let sql = format!("SELECT {FLIGHT_COLUMNS} FROM flights WHERE id = ?");
        match conn.query_row(&sql, [id.value()], row_to_flight) {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Loads a flight's inventory record under the transaction's write lock.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the flight doesn't exist.
    pub(crate) fn lock_flight(tx: &Transaction<'_>, id: FlightId) -> Result<InventoryRecord> {
        Self::find_flight(tx, id)?.ok_or_else(|| Error::NotFound {
            resource: format!("flight {id}"),
        })
    }

    /// Overwrites a flight's available seat count.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails, including when the new count
    /// violates the table's seat constraints.
    pub(crate) fn set_available_seats(
        tx: &Transaction<'_>,
        id: FlightId,
        available_seats: u32,
    ) -> Result<()> {
        let rows = tx.execute(UPDATE_AVAILABLE_SEATS, params![available_seats, id.value()])?;
        if rows == 0 {
            return Err(Error::NotFound {
                resource: format!("flight {id}"),
            });
        }
        Ok(())
    }

    /// Writes every field of an inventory record back to the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub(crate) fn update_flight(tx: &Transaction<'_>, record: &InventoryRecord) -> Result<()> {
        let details = &record.details;
        let rows = tx.execute(
            UPDATE_FLIGHT,
            params![
                details.flight_number,
                details.origin,
                details.destination,
                details.depart_time.timestamp(),
                details.arrive_time.timestamp(),
                record.capacity,
                record.available_seats,
                record.unit_price.cents(),
                record.id.value(),
            ],
        )?;
        if rows == 0 {
            return Err(Error::NotFound {
                resource: format!("flight {}", record.id),
            });
        }
        Ok(())
    }

    /// Deletes a flight's inventory record.
    ///
    /// Returns `true` if a row was deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub(crate) fn delete_flight(tx: &Transaction<'_>, id: FlightId) -> Result<bool> {
        Ok(tx.execute(DELETE_FLIGHT, [id.value()])? > 0)
    }

    /// Returns one page of flights matching `query`.
    ///
    /// Rows with equal sort keys are ordered by id so pages are stable.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub(crate) fn search_flights(conn: &Connection, query: &FlightQuery) -> Result<Vec<InventoryRecord>> {
        let (filter, mut values) = flight_filter(query);
        let order = query.sort_order.sql();
        let sql = format!(
            "SELECT {FLIGHT_COLUMNS} FROM flights{filter} ORDER BY {} {order}, id {order} LIMIT ? OFFSET ?",
            query.sort_by.column(),
        );
        values.push(Value::Integer(i64::from(query.limit)));
        values.push(Value::Integer(i64::from(query.offset)));

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(values.iter()), row_to_flight)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
    }

    /// Counts the flights matching `query`'s filters, ignoring pagination.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    #[allow(clippy::cast_sign_loss)]
    pub(crate) fn count_flights(conn: &Connection, query: &FlightQuery) -> Result<u64> {
        let (filter, values) = flight_filter(query);
        let sql = format!("SELECT COUNT(*) FROM flights{filter}");
        let count: i64 = conn.query_row(&sql, params_from_iter(values.iter()), |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Lists every flight ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub(crate) fn list_all_flights(conn: &Connection) -> Result<Vec<InventoryRecord>> {
        let sql = format!("SELECT {FLIGHT_COLUMNS} FROM flights ORDER BY id");
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], row_to_flight)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
    }
}
