//! Configuration merging and precedence handling.

use crate::config::schema::Config;

/// Merges configuration layers according to precedence rules.
///
/// # Examples
///
/// ```
/// use seatwise::config::{Config, ConfigMerger};
///
/// let low = Config { page_size: Some(5), ..Default::default() };
/// let high = Config { page_size: Some(20), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.page_size, Some(20));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merges layers given from lowest to highest precedence.
    #[must_use]
    pub fn merge<'a>(layers: impl IntoIterator<Item = &'a Config>) -> Config {
        let mut result = Config::default();
        for layer in layers {
            Self::merge_into(&mut result, layer);
        }
        result
    }

    /// Merge source config into target: every field set in `source` wins.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.maximum_lock_wait_seconds.is_some() {
            target.maximum_lock_wait_seconds = source.maximum_lock_wait_seconds;
        }

        if source.disable_autoinit.is_some() {
            target.disable_autoinit = source.disable_autoinit;
        }

        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }

        if source.page_size.is_some() {
            target.page_size = source.page_size;
        }

        if source.max_page_size.is_some() {
            target.max_page_size = source.max_page_size;
        }

        if source.transient_retries.is_some() {
            target.transient_retries = source.transient_retries;
        }
    }
}
