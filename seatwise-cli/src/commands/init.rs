//! Init command implementation.
//!
//! Creates the data directory, the database and optionally a commented
//! configuration template. `--data-dir` here names the directory to create.

use crate::error::CliError;
use crate::utils::{resolve_data_dir, GlobalOptions};
use clap::Parser;
use seatwise::config::CONFIG_FILE_NAME;
use seatwise::database::DATABASE_FILE_NAME;
use seatwise::operations::{init_database, InitOptions, InitResult};
use std::path::{Path, PathBuf};

/// Initialize the seatwise data directory and database.
#[derive(Parser)]
pub struct InitCommand {
    /// Data directory to initialize
    #[arg(long, value_name = "PATH")]
    data_dir: Option<PathBuf>,

    /// Replace an existing database, discarding its flights and bookings
    #[arg(long)]
    overwrite: bool,

    /// Also write a configuration template
    #[arg(long)]
    with_config: bool,

    /// Print what would happen and change nothing
    #[arg(long)]
    dry_run: bool,
}

impl InitCommand {
    /// Execute the init command. `--disable-autoinit` does not apply.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let data_dir = self
            .data_dir
            .clone()
            .map_or_else(|| resolve_data_dir(global), Ok)?;

        if self.dry_run {
            println!("Dry-run mode: no changes will be made");
            println!();
            println!("Would initialize seatwise in: {}", data_dir.display());
            for step in self.planned_steps(&data_dir) {
                println!("  - {step}");
            }
            return Ok(());
        }

        let options = InitOptions::new(data_dir)
            .with_overwrite(self.overwrite)
            .with_create_config(self.with_config);
        let result = init_database(&options)?;

        println!("Initialized seatwise in: {}", result.data_dir.display());
        for step in self.completed_steps(&result) {
            println!("  - {step}");
        }
        Ok(())
    }

    fn planned_steps(&self, data_dir: &Path) -> Vec<String> {
        let db_path = data_dir.join(DATABASE_FILE_NAME);
        let config_path = data_dir.join(CONFIG_FILE_NAME);
        let mut steps = Vec::new();

        if data_dir.exists() {
            steps.push(format!("Data directory already exists: {}", data_dir.display()));
        } else {
            steps.push(format!("Create data directory: {}", data_dir.display()));
        }

        match (db_path.exists(), self.overwrite) {
            (false, _) => steps.push(format!("Create database: {}", db_path.display())),
            (true, true) => steps.push(format!("Replace database: {}", db_path.display())),
            (true, false) => steps.push(format!(
                "ERROR: Database already exists (use --overwrite to replace): {}",
                db_path.display()
            )),
        }

        if self.with_config {
            if config_path.exists() {
                steps.push(format!(
                    "Keep existing configuration file: {}",
                    config_path.display()
                ));
            } else {
                steps.push(format!(
                    "Create configuration file: {}",
                    config_path.display()
                ));
            }
        }
        steps
    }

    fn completed_steps(&self, result: &InitResult) -> Vec<&'static str> {
        let mut steps = Vec::new();
        if result.data_dir_created {
            steps.push("Created data directory");
        }
        if result.database_created {
            steps.push(if self.overwrite {
                "Recreated database"
            } else {
                "Created database"
            });
        }
        if result.config_created {
            steps.push("Created default configuration file");
        } else if self.with_config {
            steps.push("Configuration file already exists (not overwritten)");
        }
        steps
    }
}
