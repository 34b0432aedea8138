//! Read-side booking operations, scoped to the authenticated owner.

use crate::booking::{Booking, BookingId, BookingSummary, OwnerId};
use crate::database::Database;
use crate::error::{Error, Result};
use crate::search::{validate_page, BookingQuery, Page};

/// Lists one page of `owner`'s bookings with their flights.
///
/// Only the owner's bookings are ever returned. `total` counts all of them,
/// active and cancelled.
///
/// # Errors
///
/// Returns [`Error::InvalidRequest`] if the page size is zero.
pub fn list_bookings(
    db: &Database,
    owner: &OwnerId,
    query: &BookingQuery,
) -> Result<Page<BookingSummary>> {
    validate_page(query.limit)?;
    db.read_transaction(|tx| {
        Ok(Page {
            results: Database::list_bookings_for_owner(tx, owner, query)?,
            total: Database::count_bookings_for_owner(tx, owner)?,
            limit: query.limit,
            offset: query.offset,
        })
    })
}

/// Fetches one booking on behalf of `owner`.
///
/// # Errors
///
/// - [`Error::NotFound`] if the booking doesn't exist
/// - [`Error::Forbidden`] if it belongs to someone else
pub fn get_booking(db: &Database, id: BookingId, owner: &OwnerId) -> Result<Booking> {
    let booking = Database::find_booking(db.connection(), id)?.ok_or_else(|| Error::NotFound {
        resource: format!("booking {id}"),
    })?;
    if booking.owner_id() != owner {
        return Err(Error::Forbidden {
            details: format!("booking {id} belongs to another owner"),
        });
    }
    Ok(booking)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{create_test_database, owner, sample_flight};
    use crate::operations::flights::create_flight;
    use crate::operations::reservation::{ReservationManager, ReserveRequest};
    use crate::search::{BookingSortKey, SortOrder};

    fn seeded() -> (Database, Vec<Booking>) {
        let mut db = create_test_database();
        let flight = create_flight(&mut db, &sample_flight(20, 1_000)).unwrap();
        let mut bookings = Vec::new();
        for (who, seats) in [("alice", 1), ("bob", 2), ("alice", 5), ("alice", 3)] {
            bookings.push(
                ReservationManager::new(&mut db)
                    .reserve(&ReserveRequest::new(flight.id(), owner(who), seats))
                    .unwrap(),
            );
        }
        (db, bookings)
    }

    #[test]
    fn test_list_bookings_scoped_to_owner() {
        let (db, _) = seeded();
        let page = list_bookings(&db, &owner("alice"), &BookingQuery::new()).unwrap();
        assert_eq!(page.total, 3);
        assert!(page
            .results
            .iter()
            .all(|s| s.booking.owner_id().as_str() == "alice"));
    }

    #[test]
    fn test_list_bookings_sorted_by_price() {
        let (db, _) = seeded();
        let query = BookingQuery::new()
            .sort(BookingSortKey::TotalPrice, SortOrder::Asc)
            .page(2, 1);
        let page = list_bookings(&db, &owner("alice"), &query).unwrap();
        let seats: Vec<u32> = page.results.iter().map(|s| s.booking.seats()).collect();
        assert_eq!(seats, vec![3, 5]);
        assert_eq!(page.total, 3);
        assert_eq!(page.offset, 1);
    }

    #[test]
    fn test_list_bookings_unknown_owner_is_empty() {
        let (db, _) = seeded();
        let page = list_bookings(&db, &owner("nobody"), &BookingQuery::new()).unwrap();
        assert!(page.results.is_empty());
        assert_eq!(page.total, 0);
    }

    #[test]
    fn test_get_booking_enforces_owner() {
        let (db, bookings) = seeded();
        let bobs = &bookings[1];

        assert_eq!(get_booking(&db, bobs.id(), &owner("bob")).unwrap(), *bobs);
        assert!(matches!(
            get_booking(&db, bobs.id(), &owner("alice")),
            Err(Error::Forbidden { .. })
        ));
        assert!(get_booking(&db, BookingId::new(999), &owner("bob"))
            .unwrap_err()
            .is_not_found());
    }
}
