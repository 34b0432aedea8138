//! Main entry point for the seatwise CLI.
//!
//! This is the command-line interface for the seatwise reservation engine:
//! - `add-flight`, `update-flight`, `delete-flight`, `show-flight`, `search`: the catalogue
//! - `book`, `cancel`, `bookings`: reservations for the owner named by `--as`
//! - `verify`: audit inventory against bookings

mod cli;
mod commands;
mod error;
mod output;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    let _ = seatwise::init_logger(cli.verbose, cli.quiet).install();

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        busy_timeout: cli.busy_timeout,
        disable_autoinit: cli.disable_autoinit,
        owner: cli.owner,
    };

    let result = match cli.command {
        cli::Command::Init(cmd) => cmd.execute(&global),
        cli::Command::AddFlight(cmd) => cmd.execute(&global),
        cli::Command::UpdateFlight(cmd) => cmd.execute(&global),
        cli::Command::DeleteFlight(cmd) => cmd.execute(&global),
        cli::Command::ShowFlight(cmd) => cmd.execute(&global),
        cli::Command::Search(cmd) => cmd.execute(&global),
        cli::Command::Book(cmd) => cmd.execute(&global),
        cli::Command::Cancel(cmd) => cmd.execute(&global),
        cli::Command::Bookings(cmd) => cmd.execute(&global),
        cli::Command::Verify(cmd) => cmd.execute(&global),
        cli::Command::ShowDataDir(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
