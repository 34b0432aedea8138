//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

/// Default seconds to wait for the database write lock.
pub const DEFAULT_LOCK_WAIT_SECONDS: u64 = 5;

/// Default rows per page for listings.
pub const DEFAULT_PAGE_SIZE: u32 = crate::search::DEFAULT_PAGE_SIZE;

/// Default upper bound on a requested page size.
pub const DEFAULT_MAX_PAGE_SIZE: u32 = 100;

/// Complete configuration structure.
///
/// Every field is optional so that configurations from several sources
/// can be layered; the accessor methods supply the defaults.
///
/// # Examples
///
/// ```
/// use seatwise::config::{Config, OutputFormat};
///
/// let config = Config {
///     page_size: Some(25),
///     output_format: Some(OutputFormat::Json),
///     ..Default::default()
/// };
/// assert_eq!(config.page_size(), 25);
/// assert_eq!(config.max_page_size(), 100);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Maximum time to wait for the database write lock (seconds).
    pub maximum_lock_wait_seconds: Option<u64>,

    /// Disable automatic database initialization.
    pub disable_autoinit: Option<bool>,

    /// Output format for listing commands.
    pub output_format: Option<OutputFormat>,

    /// Rows per page when the caller doesn't ask for a size.
    pub page_size: Option<u32>,

    /// Largest page size a caller may request.
    pub max_page_size: Option<u32>,

    /// Extra attempts after a transient failure such as a lock timeout.
    pub transient_retries: Option<u32>,
}

impl Config {
    /// Lock wait in seconds, defaulting to [`DEFAULT_LOCK_WAIT_SECONDS`].
    #[must_use]
    pub fn lock_wait_seconds(&self) -> u64 {
        self.maximum_lock_wait_seconds
            .unwrap_or(DEFAULT_LOCK_WAIT_SECONDS)
    }

    /// Whether automatic initialization is disabled.
    #[must_use]
    pub fn autoinit_disabled(&self) -> bool {
        self.disable_autoinit.unwrap_or(false)
    }

    /// Output format, defaulting to a table.
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        self.output_format.unwrap_or(OutputFormat::Table)
    }

    /// Default page size.
    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Maximum page size.
    #[must_use]
    pub fn max_page_size(&self) -> u32 {
        self.max_page_size.unwrap_or(DEFAULT_MAX_PAGE_SIZE)
    }

    /// Retries after a transient failure.
    #[must_use]
    pub fn transient_retries(&self) -> u32 {
        self.transient_retries.unwrap_or(0)
    }
}

/// Output format for listing commands.
///
/// # Examples
///
/// ```
/// use seatwise::config::OutputFormat;
///
/// let format = OutputFormat::Json;
/// assert_eq!(format.to_string(), "json");
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON output format.
    Json,
    /// CSV output format.
    Csv,
    /// Human-readable table format.
    Table,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Table => write!(f, "table"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> crate::error::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "table" => Ok(Self::Table),
            _ => Err(crate::error::Error::Validation {
                field: "output_format".into(),
                message: format!("unknown output format '{s}' (expected table, json or csv)"),
            }),
        }
    }
}
