//! Flight catalogue operations: create, look up and search.

use crate::database::Database;
use crate::error::{Error, Result};
use crate::flight::{FlightId, InventoryRecord, NewFlight};
use crate::search::{validate_page, FlightQuery, Page};

/// Creates a flight with every seat available.
///
/// # Errors
///
/// Returns [`Error::InvalidRequest`] if the flight is malformed, or a
/// database error if the insert fails.
///
/// # Examples
///
/// ```no_run
/// use chrono::{TimeZone, Utc};
/// use seatwise::database::{Database, DatabaseConfig};
/// use seatwise::operations::create_flight;
/// use seatwise::{FlightDetails, NewFlight, Price};
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/seatwise.db")).unwrap();
/// let flight = create_flight(&mut db, &NewFlight {
///     details: FlightDetails {
///         flight_number: "SW101".into(),
///         origin: "DEL".into(),
///         destination: "BOM".into(),
///         depart_time: Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap(),
///         arrive_time: Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).unwrap(),
///     },
///     capacity: 10,
///     unit_price: "200".parse::<Price>().unwrap(),
/// }).unwrap();
/// assert_eq!(flight.available_seats(), 10);
/// ```
pub fn create_flight(db: &mut Database, flight: &NewFlight) -> Result<InventoryRecord> {
    flight.validate()?;
    let record = db.write_transaction(|tx| Database::insert_flight(tx, flight))?;
    log::info!(
        "created flight {} ({} {} -> {}, {} seats)",
        record.id(),
        record.details().flight_number,
        record.details().origin,
        record.details().destination,
        record.capacity()
    );
    Ok(record)
}

/// Looks up a flight's inventory record.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the flight doesn't exist.
pub fn get_flight(db: &Database, id: FlightId) -> Result<InventoryRecord> {
    Database::find_flight(db.connection(), id)?.ok_or_else(|| Error::NotFound {
        resource: format!("flight {id}"),
    })
}

/// Returns one page of flights matching `query` and the total match count.
///
/// # Errors
///
/// Returns [`Error::InvalidRequest`] if the page size is zero or the price
/// bounds are inverted.
pub fn search_flights(db: &Database, query: &FlightQuery) -> Result<Page<InventoryRecord>> {
    validate_page(query.limit)?;
    if let (Some(min), Some(max)) = (query.min_price, query.max_price) {
        if min > max {
            return Err(Error::invalid("min_price", "minimum price exceeds maximum"));
        }
    }

    db.read_transaction(|tx| {
        Ok(Page {
            results: Database::search_flights(tx, query)?,
            total: Database::count_flights(tx, query)?,
            limit: query.limit,
            offset: query.offset,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{create_test_database, flight_at, sample_flight};
    use crate::flight::Price;
    use crate::search::{FlightSortKey, SortOrder};

    #[test]
    fn test_create_flight_starts_full() {
        let mut db = create_test_database();
        let record = create_flight(&mut db, &sample_flight(42, 9_900)).unwrap();
        assert_eq!(record.capacity(), 42);
        assert_eq!(record.available_seats(), 42);
        assert_eq!(record.booked_seats(), 0);
    }

    #[test]
    fn test_create_flight_rejects_zero_capacity() {
        let mut db = create_test_database();
        let err = create_flight(&mut db, &sample_flight(0, 100)).unwrap_err();
        assert!(matches!(err, Error::InvalidRequest { .. }));
        assert!(Database::list_all_flights(db.connection())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_get_flight_not_found() {
        let db = create_test_database();
        assert!(get_flight(&db, FlightId::new(3)).unwrap_err().is_not_found());
    }

    #[test]
    fn test_search_flights_page_and_total() {
        let mut db = create_test_database();
        for (hour, price) in [(6, 300), (7, 100), (8, 200)] {
            create_flight(
                &mut db,
                &flight_at("DEL", "BOM", &format!("2026-03-01T0{hour}:00:00Z"), 5, price),
            )
            .unwrap();
        }

        let query = FlightQuery::new()
            .sort(FlightSortKey::Price, SortOrder::Desc)
            .page(2, 0);
        let page = search_flights(&db, &query).unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].unit_price().cents(), 300);
        assert_eq!(page.results[1].unit_price().cents(), 200);
    }

    #[test]
    fn test_search_flights_rejects_bad_bounds() {
        let db = create_test_database();
        assert!(search_flights(&db, &FlightQuery::new().page(0, 0)).is_err());

        let inverted = FlightQuery::new().price_between(
            Some(Price::from_cents(500).unwrap()),
            Some(Price::from_cents(100).unwrap()),
        );
        assert!(matches!(
            search_flights(&db, &inverted),
            Err(Error::InvalidRequest { .. })
        ));
    }
}
