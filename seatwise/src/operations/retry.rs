//! Retrying transient failures.
//!
//! A lock timeout leaves the store untouched, so the whole operation can be
//! rerun unchanged. Domain refusals are never retried.

use std::thread;
use std::time::Duration;

use crate::error::Result;

/// How often and how patiently to retry a transient failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first. Zero behaves like one.
    pub max_attempts: u32,
    /// Pause between attempts.
    pub backoff: Duration,
}

impl RetryPolicy {
    /// A policy that runs the operation exactly once.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            max_attempts: 1,
            backoff: Duration::ZERO,
        }
    }

    /// A policy allowing `retries` reruns after the first attempt.
    #[must_use]
    pub const fn with_retries(retries: u32, backoff: Duration) -> Self {
        Self {
            max_attempts: retries.saturating_add(1),
            backoff,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}

/// Runs `op`, rerunning it while it fails with a transient error.
///
/// Returns the first success, the first non-transient error, or the last
/// transient error once attempts are exhausted.
///
/// # Errors
///
/// Returns the error from the final attempt.
///
/// # Examples
///
/// ```
/// use seatwise::operations::{retry_transient, RetryPolicy};
/// use seatwise::Error;
/// use std::time::Duration;
///
/// let mut calls = 0;
/// let value = retry_transient(RetryPolicy::with_retries(2, Duration::ZERO), || {
///     calls += 1;
///     if calls < 3 {
///         Err(Error::LockTimeout { waited: Duration::ZERO })
///     } else {
///         Ok(calls)
///     }
/// })
/// .unwrap();
/// assert_eq!(value, 3);
/// ```
pub fn retry_transient<T, F>(policy: RetryPolicy, mut op: F) -> Result<T>
where
    F: FnMut() -> Result<T>,
{
    let attempts = policy.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match op() {
            Err(e) if e.is_transient() && attempt < attempts => {
                log::debug!("attempt {attempt}/{attempts} failed transiently: {e}");
                attempt += 1;
                if !policy.backoff.is_zero() {
                    thread::sleep(policy.backoff);
                }
            }
            other => return other,
        }
    }
}
