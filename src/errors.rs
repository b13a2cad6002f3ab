// src/errors.rs

// error handling for the window limiter

// dependencies
use crate::clock::ClockError;

/// Error type for RateLimitStore operations.
///
/// A rejected request is not an error: `check` reports it as an `Ok` result
/// with `allowed == false`.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    /// The configuration has a zero window, zero quota or zero sweep interval.
    #[error("invalid rate limit configuration: {0}")]
    InvalidConfig(&'static str),

    /// The clock could not be read.
    #[error("clock error: {0}")]
    Clock(#[from] ClockError),

    /// A background sweeper was requested outside of a Tokio runtime.
    #[error("no Tokio runtime available to run the sweeper")]
    RuntimeUnavailable,
}
