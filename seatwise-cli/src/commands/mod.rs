//! CLI command implementations.
//!
//! - `init`: Create the data directory and database
//! - `add-flight`, `update-flight`, `delete-flight`, `show-flight`: Flight catalogue
//! - `search`: Find flights with seats
//! - `book`, `cancel`, `bookings`: Reservations for the acting owner
//! - `verify`: Audit inventory against bookings
//! - `show-data-dir`: Show resolved data directory path
//! - `completions`: Generate shell completion scripts

pub mod add_flight;
pub mod book;
pub mod bookings;
pub mod cancel;
pub mod completions;
pub mod delete_flight;
pub mod init;
pub mod search;
pub mod show_data_dir;
pub mod show_flight;
pub mod update_flight;
pub mod verify;

pub use add_flight::AddFlightCommand;
pub use book::BookCommand;
pub use bookings::BookingsCommand;
pub use cancel::CancelCommand;
pub use completions::CompletionsCommand;
pub use delete_flight::DeleteFlightCommand;
pub use init::InitCommand;
pub use search::SearchCommand;
pub use show_data_dir::ShowDataDirCommand;
pub use show_flight::ShowFlightCommand;
pub use update_flight::UpdateFlightCommand;
pub use verify::VerifyCommand;
