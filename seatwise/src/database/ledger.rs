//! Booking ledger: persistence of bookings.
//!
//! Rows are inserted once and afterwards change only from `active` to
//! `cancelled`. Nothing here deletes a booking.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row, Transaction};

use crate::booking::{Booking, BookingId, BookingStatus, BookingSummary, OwnerId};
use crate::error::{Error, Result};
use crate::flight::{FlightId, Price};
use crate::search::BookingQuery;

use super::connection::Database;
use super::inventory::{from_unix_secs, row_to_joined_flight};
use super::schema::BOOKING_COLUMNS;

const INSERT_BOOKING: &str = r"
    INSERT INTO bookings
    (flight_id, owner_id, seats, total_price_cents, status, created_at)
    VALUES (?, ?, ?, ?, 'active', ?)
";

const MARK_CANCELLED: &str = r"
    UPDATE bookings
    SET status = 'cancelled'
    WHERE id = ? AND status = 'active'
";

const COUNT_FOR_OWNER: &str = "SELECT COUNT(*) FROM bookings WHERE owner_id = ?";

const ACTIVE_SEATS_BY_FLIGHT: &str = r"
    SELECT flight_id, SUM(seats)
    FROM bookings
    WHERE status = 'active'
    GROUP BY flight_id
";

/// Deserializes a booking from a row, reading the columns of
/// [`BOOKING_COLUMNS`] starting at index 0.
fn row_to_booking(row: &Row<'_>) -> rusqlite::Result<Booking> {
    let status: String = row.get(5)?;
    let status = status
        .parse::<BookingStatus>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?;
    let total_price = Price::from_cents(row.get(4)?)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Integer, Box::new(e)))?;
    let owner_id = OwnerId::new(row.get::<_, String>(2)?)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;

    Ok(Booking {
        id: BookingId::new(row.get(0)?),
        flight_id: FlightId::new(row.get(1)?),
        owner_id,
        seats: row.get(3)?,
        total_price,
        status,
        created_at: from_unix_secs(6, row.get(6)?)?,
    })
}

fn row_to_summary(row: &Row<'_>) -> rusqlite::Result<BookingSummary> {
    let booking = row_to_booking(row)?;
    let joined = row_to_joined_flight(row, 7)?;
    let (flight, flight_unit_price) = match joined {
        Some((details, price)) => (Some(details), Some(price)),
        None => (None, None),
    };
    Ok(BookingSummary {
        booking,
        flight,
        flight_unit_price,
    })
}

impl Database {
    /// Inserts an active booking and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub(crate) fn insert_booking(
        tx: &Transaction<'_>,
        flight_id: FlightId,
        owner_id: &OwnerId,
        seats: u32,
        total_price: Price,
        created_at: DateTime<Utc>,
    ) -> Result<Booking> {
        // Stored at second precision, so the returned record matches a reload
        let created_at = from_unix_secs(6, created_at.timestamp())?;
        tx.execute(
            INSERT_BOOKING,
            params![
                flight_id.value(),
                owner_id.as_str(),
                seats,
                total_price.cents(),
                created_at.timestamp(),
            ],
        )?;

        Ok(Booking {
            id: BookingId::new(tx.last_insert_rowid()),
            flight_id,
            owner_id: owner_id.clone(),
            seats,
            total_price,
            status: BookingStatus::Active,
            created_at,
        })
    }

    /// Retrieves a booking.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub(crate) fn find_booking(conn: &Connection, id: BookingId) -> Result<Option<Booking>> {
        let sql = format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ?");
        match conn.query_row(&sql, [id.value()], row_to_booking) {
            Ok(booking) => Ok(Some(booking)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Loads a booking under the transaction's write lock.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the booking doesn't exist.
    pub(crate) fn lock_booking(tx: &Transaction<'_>, id: BookingId) -> Result<Booking> {
        Self::find_booking(tx, id)?.ok_or_else(|| Error::NotFound {
            resource: format!("booking {id}"),
        })
    }

    /// Moves an active booking to `cancelled`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyCancelled`] if no active booking with this id
    /// exists.
    pub(crate) fn mark_cancelled(tx: &Transaction<'_>, id: BookingId) -> Result<()> {
        if tx.execute(MARK_CANCELLED, [id.value()])? == 0 {
            return Err(Error::AlreadyCancelled { booking: id });
        }
        Ok(())
    }

    /// Returns one page of `owner`'s bookings joined with their flights.
    ///
    /// Bookings whose flight has been retired are included with no flight
    /// fields. Ties on the sort key are broken by booking id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub(crate) fn list_bookings_for_owner(
        conn: &Connection,
        owner: &OwnerId,
        query: &BookingQuery,
    ) -> Result<Vec<BookingSummary>> {
        let order = query.sort_order.sql();
        let sql = format!(
            "SELECT b.id, b.flight_id, b.owner_id, b.seats, b.total_price_cents, b.status, \
             b.created_at, f.flight_number, f.origin, f.destination, f.depart_time, \
             f.arrive_time, f.price_cents \
             FROM bookings b LEFT JOIN flights f ON f.id = b.flight_id \
             WHERE b.owner_id = ? \
             ORDER BY {} {order}, b.id {order} LIMIT ? OFFSET ?",
            query.sort_by.column(),
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(
            params![owner.as_str(), query.limit, query.offset],
            row_to_summary,
        )?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
    }

    /// Counts every booking `owner` holds, active or cancelled.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    #[allow(clippy::cast_sign_loss)]
    pub(crate) fn count_bookings_for_owner(conn: &Connection, owner: &OwnerId) -> Result<u64> {
        let count: i64 = conn.query_row(COUNT_FOR_OWNER, [owner.as_str()], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Sums the seats of active bookings per flight.
    ///
    /// Flights without active bookings are absent from the map.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub(crate) fn active_seats_by_flight(conn: &Connection) -> Result<HashMap<FlightId, u64>> {
        let mut stmt = conn.prepare(ACTIVE_SEATS_BY_FLIGHT)?;
        let rows = stmt.query_map([], |row| {
            let flight: i64 = row.get(0)?;
            let seats: i64 = row.get(1)?;
            Ok((FlightId::new(flight), seats))
        })?;

        let mut totals = HashMap::new();
        for row in rows {
            let (flight, seats) = row?;
            #[allow(clippy::cast_sign_loss)]
            totals.insert(flight, seats.max(0) as u64);
        }
        Ok(totals)
    }
}
