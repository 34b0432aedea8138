//! Build script for seatwise-cli.
//!
//! Generates the `seatwise.1` man page into `OUT_DIR` with clap_mangen.
//! Build scripts cannot depend on the crate being built, so the command
//! tree is described again here in outline.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Outline of the CLI for the man page.
///
/// Keep in step with src/cli.rs.
fn build_cli() -> Command {
    Command::new("seatwise")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Book and manage flight seats")
        .long_about(
            "Command-line tool for transactional flight seat reservations: \
             a flight catalogue with live availability, and bookings that \
             never oversell",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("SEATWISE_DATA_DIR"),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Override the lock wait (in seconds)")
                .value_name("SECONDS")
                .global(true)
                .env("SEATWISE_BUSY_TIMEOUT"),
        )
        .arg(
            Arg::new("disable-autoinit")
                .long("disable-autoinit")
                .help("Disable automatic database initialization")
                .global(true)
                .action(ArgAction::SetTrue)
                .env("SEATWISE_DISABLE_AUTOINIT"),
        )
        .arg(
            Arg::new("as")
                .long("as")
                .help("Act on bookings as this owner")
                .value_name("OWNER")
                .global(true)
                .env("SEATWISE_OWNER"),
        )
        .subcommands(vec![
            Command::new("init")
                .about("Initialize the data directory and database")
                .long_about("Create the seatwise database and, optionally, a configuration template"),
            Command::new("add-flight")
                .about("Add a flight to the catalogue")
                .long_about("Create a flight with every seat available and print its id"),
            Command::new("update-flight")
                .about("Update a flight's details, price or capacity")
                .long_about(
                    "Edit a flight; capacity may not drop below the seats already booked",
                ),
            Command::new("delete-flight")
                .about("Delete a flight with no active bookings")
                .long_about("Retire a flight; its cancelled bookings remain listed"),
            Command::new("show-flight")
                .about("Show one flight and its availability"),
            Command::new("search")
                .about("Search flights")
                .long_about(
                    "List flights by route, departure date or window, seats and price, \
                     sorted and paged",
                ),
            Command::new("book")
                .about("Book seats on a flight")
                .long_about("Reserve seats for the owner given by --as and print the booking id"),
            Command::new("cancel")
                .about("Cancel one of your bookings")
                .long_about("Cancel a booking owned by --as and return its seats"),
            Command::new("bookings")
                .about("List your bookings")
                .long_about("List the bookings of the owner given by --as"),
            Command::new("verify")
                .about("Check inventory against bookings")
                .long_about(
                    "Compare each flight's stored availability with its active bookings; \
                     exits 1 on any mismatch",
                ),
            Command::new("show-data-dir")
                .about("Show the resolved data directory path"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() -> std::io::Result<()> {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").map_err(std::io::Error::other)?);
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let mut buffer = Vec::new();
    Man::new(build_cli()).render(&mut buffer)?;
    fs::write(man_dir.join("seatwise.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
