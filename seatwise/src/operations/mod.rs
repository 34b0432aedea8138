//! Engine operations on the inventory store and booking ledger.
//!
//! Every operation that changes `available_seats` runs inside one write
//! transaction (see [`crate::database::Database::write_transaction`]), so
//! the check and the write it guards cannot be separated by another
//! writer.
//!
//! # Examples
//!
//! ```no_run
//! use seatwise::database::{Database, DatabaseConfig};
//! use seatwise::operations::{search_flights, ReservationManager, ReserveRequest};
//! use seatwise::search::FlightQuery;
//! use seatwise::OwnerId;
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/seatwise.db")).unwrap();
//!
//! let page = search_flights(&db, &FlightQuery::new().origin("DEL").min_seats(2)).unwrap();
//! if let Some(flight) = page.results.first() {
//!     let owner = OwnerId::new("alice").unwrap();
//!     let booking = ReservationManager::new(&mut db)
//!         .reserve(&ReserveRequest::new(flight.id(), owner, 2))
//!         .unwrap();
//!     println!("booked {} for {}", booking.id(), booking.total_price());
//! }
//! ```

pub mod audit;
pub mod bookings;
pub mod capacity;
pub mod flights;
pub mod init;
pub mod reservation;
pub mod retry;

#[cfg(test)]
mod proptests;

pub use audit::{verify_inventory, InventoryDiscrepancy};
pub use bookings::{get_booking, list_bookings};
pub use capacity::CapacityValidator;
pub use flights::{create_flight, get_flight, search_flights};
pub use init::{init_database, InitOptions, InitResult};
pub use reservation::{ReservationManager, ReserveRequest};
pub use retry::{retry_transient, RetryPolicy};
