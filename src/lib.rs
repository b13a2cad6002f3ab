// src/lib.rs

//! # Window Limiter
//!
//! A fixed-window rate limiter. Each caller key gets `max_requests` admissions
//! per window; the window opens on the key's first request and a fresh one
//! opens on the first request after it ends. Idle keys are evicted by a
//! background sweeper so memory stays bounded.
//!
//! ## Quick Example
//!
//! ```rust
//! use window_limiter::{RateLimitConfig, RateLimitStore, SystemClock};
//!
//! let store = RateLimitStore::new(SystemClock);
//! let config = RateLimitConfig::new(60_000, 10);
//!
//! let result = store.check("user_123", &config).unwrap();
//! if result.allowed {
//!     println!("Request allowed, {} left", result.remaining_requests);
//! } else {
//!     println!("Rate limited - retry after {}ms", result.reset_in_ms);
//! }
//! ```
//!
//! ## Background sweep
//!
//! ```rust
//! use std::time::Duration;
//! use window_limiter::{RateLimitStore, StoreConfig, SystemClock};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let config = StoreConfig::default().with_sweep_interval(Duration::from_secs(30));
//! let store = RateLimitStore::<String>::start(config, SystemClock).unwrap();
//! assert!(store.is_sweeping());
//!
//! store.stop_sweeper();
//! # }
//! ```

// private modules
mod clock;
mod config;
mod errors;
mod sweeper;
mod window_limiter;

// public API exports
pub use clock::{Clock, ClockError, SystemClock};
pub use config::{
    DEFAULT_MAX_REQUESTS, DEFAULT_SWEEP_INTERVAL, DEFAULT_WINDOW_MS, RateLimitConfig, StoreConfig,
};
pub use errors::RateLimitError;
pub use window_limiter::{RateLimitResult, RateLimitStore, WindowEntry};
