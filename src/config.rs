// src/config.rs

//! Configuration types for the window limiter

// dependencies
use crate::errors::RateLimitError;
use std::time::Duration;

/// Window length used by `RateLimitConfig::default()`.
pub const DEFAULT_WINDOW_MS: u64 = 60_000;
/// Quota used by `RateLimitConfig::default()`.
pub const DEFAULT_MAX_REQUESTS: u32 = 10;
/// Sweep cadence used by `StoreConfig::default()`.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Fixed-window quota supplied with each check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub(crate) window_ms: u64,
    pub(crate) max_requests: u32,
}

impl RateLimitConfig {
    /// Create a new configuration with a window length and a quota per window
    pub fn new(window_ms: u64, max_requests: u32) -> Self {
        Self {
            window_ms,
            max_requests,
        }
    }

    /// Create a configuration from a `Duration` window, truncated to whole
    /// milliseconds and saturating at `u64::MAX`
    pub fn from_window(window: Duration, max_requests: u32) -> Self {
        let window_ms = u64::try_from(window.as_millis()).unwrap_or(u64::MAX);
        Self::new(window_ms, max_requests)
    }

    /// Builder-style: set window length in milliseconds
    pub fn with_window_ms(mut self, window_ms: u64) -> Self {
        self.window_ms = window_ms;
        self
    }

    /// Builder-style: set quota per window
    pub fn with_max_requests(mut self, max_requests: u32) -> Self {
        self.max_requests = max_requests;
        self
    }

    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }

    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), RateLimitError> {
        if self.window_ms == 0 {
            return Err(RateLimitError::InvalidConfig("window must be positive"));
        }
        if self.max_requests == 0 {
            return Err(RateLimitError::InvalidConfig("max requests must be positive"));
        }
        Ok(())
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_MS, DEFAULT_MAX_REQUESTS)
    }
}

/// Lifecycle settings for a store that runs its own sweeper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    pub(crate) sweep_interval: Duration,
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style: set how often expired windows are swept
    pub fn with_sweep_interval(mut self, sweep_interval: Duration) -> Self {
        self.sweep_interval = sweep_interval;
        self
    }

    pub fn sweep_interval(&self) -> Duration {
        self.sweep_interval
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), RateLimitError> {
        if self.sweep_interval.is_zero() {
            return Err(RateLimitError::InvalidConfig("sweep interval must be positive"));
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
        }
    }
}
