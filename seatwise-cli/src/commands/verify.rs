//! Verify command implementation.
//!
//! Audits every flight's stored availability against its active bookings.
//! Exits 1 when any flight disagrees.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use seatwise::operations::verify_inventory;

/// Check that every flight's availability matches its bookings.
#[derive(Args)]
pub struct VerifyCommand {
    /// Print discrepancies as JSON
    #[arg(long)]
    pub json: bool,
}

impl VerifyCommand {
    /// Execute the verify command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let discrepancies = verify_inventory(&db)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&discrepancies)?);
        } else {
            for d in &discrepancies {
                println!(
                    "flight {}: capacity {}, available {}, active seats {}, expected available {}",
                    d.flight_id, d.capacity, d.available_seats, d.active_seats, d.expected_available
                );
            }
        }

        if discrepancies.is_empty() {
            if !global.quiet {
                eprintln!("Inventory is consistent");
            }
            Ok(())
        } else {
            Err(CliError::SemanticFailure(format!(
                "{} flight(s) have inconsistent inventory",
                discrepancies.len()
            )))
        }
    }
}
