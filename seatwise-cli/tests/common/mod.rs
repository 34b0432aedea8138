//! Common test utilities for CLI integration tests.
//!
//! Every test gets its own data directory and a command builder with the
//! `SEATWISE_*` environment scrubbed, so the developer's own settings never
//! leak in.

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SEATWISE_ENV_VARS: &[&str] = &[
    "SEATWISE_DATA_DIR",
    "SEATWISE_BUSY_TIMEOUT",
    "SEATWISE_DISABLE_AUTOINIT",
    "SEATWISE_OWNER",
    "SEATWISE_LOG_MODE",
    "SEATWISE_MAXIMUM_LOCK_WAIT_SECONDS",
    "SEATWISE_OUTPUT_FORMAT",
    "SEATWISE_PAGE_SIZE",
    "SEATWISE_MAX_PAGE_SIZE",
    "SEATWISE_TRANSIENT_RETRIES",
];

/// Test environment with isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the seatwise data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment. The data directory is not created.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("seatwise-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// A command with only the binary and a clean environment.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("seatwise").expect("Failed to find seatwise binary");
        for var in SEATWISE_ENV_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// A command with `--data-dir` pointing at this environment.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// A command acting as `owner`.
    pub fn command_as(&self, owner: &str) -> Command {
        let mut cmd = self.command();
        cmd.arg("--as").arg(owner);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write `{data_dir}/config.yaml`, creating the directory.
    pub fn write_config(&self, content: &str) {
        std::fs::create_dir_all(&self.data_dir).expect("Failed to create data dir");
        std::fs::write(self.data_dir.join("config.yaml"), content)
            .expect("Failed to write config");
    }

    /// Add a DEL -> BOM flight departing at `depart` and return its id.
    pub fn add_flight_at(&self, depart: &str, capacity: u32, price: &str) -> i64 {
        let output = self
            .command()
            .args([
                "add-flight",
                "--flight-number",
                "SW101",
                "--origin",
                "DEL",
                "--destination",
                "BOM",
                "--depart",
                depart,
                "--arrive",
                "2026-12-31T23:00:00Z",
                "--capacity",
                &capacity.to_string(),
                "--price",
                price,
            ])
            .output()
            .expect("Failed to run add-flight");

        assert!(
            output.status.success(),
            "add-flight failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        parse_id(&String::from_utf8_lossy(&output.stdout))
    }

    /// Add a flight with default route and times.
    pub fn add_flight(&self, capacity: u32, price: &str) -> i64 {
        self.add_flight_at("2026-03-01T08:00:00Z", capacity, price)
    }

    /// Book seats as `owner` and return the booking id.
    pub fn book(&self, owner: &str, flight_id: i64, seats: u32) -> i64 {
        let output = self
            .command_as(owner)
            .args(["book", &flight_id.to_string(), "--seats", &seats.to_string()])
            .output()
            .expect("Failed to run book");

        assert!(
            output.status.success(),
            "book failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        parse_id(&String::from_utf8_lossy(&output.stdout))
    }

    /// The flight as JSON.
    pub fn show_flight(&self, flight_id: i64) -> serde_json::Value {
        let output = self
            .command()
            .args(["show-flight", &flight_id.to_string(), "--format", "json"])
            .output()
            .expect("Failed to run show-flight");

        assert!(
            output.status.success(),
            "show-flight failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        let rows: serde_json::Value =
            serde_json::from_slice(&output.stdout).expect("show-flight output is not JSON");
        rows[0].clone()
    }

    /// Available seats on a flight.
    pub fn available(&self, flight_id: i64) -> u64 {
        self.show_flight(flight_id)["available_seats"]
            .as_u64()
            .expect("available_seats is not a number")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an id printed on stdout.
#[allow(dead_code)]
pub fn parse_id(output: &str) -> i64 {
    output.trim().parse().expect("Output is not a valid id")
}
