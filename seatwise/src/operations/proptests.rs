//! Property-based tests for the reservation engine.
//!
//! Random sequences of reserve, release and resize run against a real
//! database and a simple in-memory model. After every step the stored
//! record must match the model and the ledger.

use proptest::prelude::*;

use crate::booking::{Booking, OwnerId};
use crate::database::test_util::{create_test_database, sample_flight};
use crate::database::Database;
use crate::error::Error;
use crate::flight::FlightUpdate;
use crate::operations::{
    create_flight, get_flight, verify_inventory, CapacityValidator, ReservationManager,
    ReserveRequest,
};

#[derive(Debug, Clone)]
enum Op {
    Reserve { owner: u8, seats: u32 },
    Release { pick: usize },
    Resize { capacity: u32 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0u8..3, 0u32..8).prop_map(|(owner, seats)| Op::Reserve { owner, seats }),
        2 => any::<usize>().prop_map(|pick| Op::Release { pick }),
        1 => (1u32..25).prop_map(|capacity| Op::Resize { capacity }),
    ]
}

fn owner(n: u8) -> OwnerId {
    OwnerId::new(format!("owner-{n}")).unwrap()
}

fn cases() -> u32 {
    if cfg!(feature = "property-tests") {
        512
    } else {
        32
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: cases(),
        .. ProptestConfig::default()
    })]

    // available == capacity - sum(active seats) after every operation
    #[test]
    fn inventory_matches_ledger(capacity in 1u32..20, ops in prop::collection::vec(op_strategy(), 1..30)) {
        let mut db = create_test_database();
        let flight = create_flight(&mut db, &sample_flight(capacity, 1_000)).unwrap();
        let mut model_capacity = capacity;
        let mut bookings: Vec<Booking> = Vec::new();

        for op in ops {
            let booked: u32 = bookings.iter().filter(|b| b.is_active()).map(Booking::seats).sum();
            match op {
                Op::Reserve { owner: who, seats } => {
                    let result = ReservationManager::new(&mut db)
                        .reserve(&ReserveRequest::new(flight.id(), owner(who), seats));
                    let available = model_capacity - booked;
                    if seats == 0 {
                        prop_assert!(matches!(result, Err(Error::InvalidRequest { .. })), "zero-seat reserve must be rejected");
                    } else if seats > available {
                        let is_insufficient = matches!(
                            result,
                            Err(Error::InsufficientInventory { requested, available: a })
                                if requested == seats && a == available
                        );
                        prop_assert!(is_insufficient, "expected insufficient inventory");
                    } else {
                        let booking = result.unwrap();
                        prop_assert_eq!(booking.total_price().cents(), i64::from(seats) * 1_000);
                        bookings.push(booking);
                    }
                }
                Op::Release { pick } => {
                    if bookings.is_empty() {
                        continue;
                    }
                    let index = pick % bookings.len();
                    let target = bookings[index].clone();
                    let result = ReservationManager::new(&mut db)
                        .release(target.id(), target.owner_id());
                    if target.is_active() {
                        bookings[index] = result.unwrap();
                        prop_assert!(!bookings[index].is_active());
                    } else {
                        prop_assert!(matches!(result, Err(Error::AlreadyCancelled { .. })), "second release must fail");
                    }
                }
                Op::Resize { capacity: requested } => {
                    let current = get_flight(&db, flight.id()).unwrap();
                    let update = FlightUpdate {
                        details: current.details().clone(),
                        capacity: requested,
                        unit_price: current.unit_price(),
                    };
                    let result = CapacityValidator::new(&mut db).resize(flight.id(), &update);
                    if requested < booked {
                        prop_assert!(matches!(result, Err(Error::CapacityBelowBooked { .. })), "shrinking below booked must fail");
                    } else {
                        prop_assert_eq!(result.unwrap().available_seats(), requested - booked);
                        model_capacity = requested;
                    }
                }
            }

            let record = get_flight(&db, flight.id()).unwrap();
            let booked: u32 = bookings.iter().filter(|b| b.is_active()).map(Booking::seats).sum();
            prop_assert_eq!(record.capacity(), model_capacity);
            prop_assert_eq!(record.available_seats(), model_capacity - booked);
            prop_assert!(record.available_seats() <= record.capacity());
            prop_assert!(verify_inventory(&db).unwrap().is_empty());
        }
    }

    // Reserving then releasing leaves availability where it started
    #[test]
    fn reserve_then_release_restores(capacity in 1u32..50, seats in 1u32..50, pre_booked in 0u32..50) {
        let mut db = create_test_database();
        let flight = create_flight(&mut db, &sample_flight(capacity, 250)).unwrap();
        let holder = owner(0);
        if pre_booked > 0 && pre_booked <= capacity {
            ReservationManager::new(&mut db)
                .reserve(&ReserveRequest::new(flight.id(), holder.clone(), pre_booked))
                .unwrap();
        }
        let before = get_flight(&db, flight.id()).unwrap().available_seats();

        let reserved = ReservationManager::new(&mut db)
            .reserve(&ReserveRequest::new(flight.id(), owner(1), seats));
        if let Ok(booking) = reserved {
            prop_assert_eq!(
                get_flight(&db, flight.id()).unwrap().available_seats(),
                before - seats
            );
            ReservationManager::new(&mut db)
                .release(booking.id(), &owner(1))
                .unwrap();
        } else {
            prop_assert!(seats > before);
        }

        prop_assert_eq!(get_flight(&db, flight.id()).unwrap().available_seats(), before);
        prop_assert_eq!(
            Database::count_bookings_for_owner(db.connection(), &owner(1)).unwrap(),
            u64::from(seats <= before)
        );
    }
}
