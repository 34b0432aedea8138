//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    AddFlightCommand, BookCommand, BookingsCommand, CancelCommand, CompletionsCommand,
    DeleteFlightCommand, InitCommand, SearchCommand, ShowDataDirCommand, ShowFlightCommand,
    UpdateFlightCommand, VerifyCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for transactional flight seat reservations.
#[derive(Parser)]
#[command(name = "seatwise")]
#[command(version, about = "Book and manage flight seats", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "SEATWISE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the lock wait (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "SEATWISE_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization
    #[arg(long, global = true, env = "SEATWISE_DISABLE_AUTOINIT")]
    pub disable_autoinit: bool,

    /// Act on bookings as this owner
    #[arg(long = "as", value_name = "OWNER", global = true, env = "SEATWISE_OWNER")]
    pub owner: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize the data directory and database
    Init(InitCommand),

    /// Add a flight to the catalogue
    AddFlight(AddFlightCommand),

    /// Update a flight's details, price or capacity
    UpdateFlight(UpdateFlightCommand),

    /// Delete a flight with no active bookings
    DeleteFlight(DeleteFlightCommand),

    /// Show one flight and its availability
    ShowFlight(ShowFlightCommand),

    /// Search flights
    Search(SearchCommand),

    /// Book seats on a flight
    Book(BookCommand),

    /// Cancel one of your bookings
    Cancel(CancelCommand),

    /// List your bookings
    Bookings(BookingsCommand),

    /// Check inventory against bookings
    Verify(VerifyCommand),

    /// Show the resolved data directory path
    ShowDataDir(ShowDataDirCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
