//! Layered settings: lock wait, auto-init, output format and paging.
//!
//! Sources, later ones winning:
//!
//! 1. built-in defaults
//! 2. `{data_dir}/config.yaml` (`~/.seatwise/config.yaml` unless overridden)
//! 3. `SEATWISE_*` environment variables
//! 4. values passed to [`ConfigBuilder::with_config`]
//!
//! The merged result is validated before it is returned, so a page size
//! above the maximum or a malformed variable is reported up front.
//!
//! ```no_run
//! use seatwise::config::ConfigBuilder;
//!
//! let config = ConfigBuilder::new().build().unwrap();
//! println!("page size: {}", config.page_size());
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(test)]
mod proptests;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource, CONFIG_FILE_NAME};
pub use merger::ConfigMerger;
pub use schema::{
    Config, OutputFormat, DEFAULT_LOCK_WAIT_SECONDS, DEFAULT_MAX_PAGE_SIZE, DEFAULT_PAGE_SIZE,
};
pub use validator::ConfigValidator;
