// src/window_limiter.rs

// window-limiter: fixed-window request counting per caller key.

// dependencies
use crate::clock::{Clock, SystemClock};
use crate::config::{RateLimitConfig, StoreConfig};
use crate::errors::RateLimitError;
use crate::sweeper::SweepTask;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::borrow::Borrow;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};

/// Window state tracked for one caller key.
///
/// An entry exists only while its key is active: `count` is at least 1 and
/// the entry is removed, never zeroed, once its window has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowEntry {
    count: u32,
    reset_at_ms: u64,
}

impl WindowEntry {
    fn open(now_ms: u64, window_ms: u64) -> Self {
        Self {
            count: 1,
            reset_at_ms: now_ms.saturating_add(window_ms),
        }
    }

    fn is_expired(&self, now_ms: u64) -> bool {
        self.reset_at_ms <= now_ms
    }

    /// Requests counted in the current window.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// When the current window ends (milliseconds since epoch).
    pub fn reset_at_ms(&self) -> u64 {
        self.reset_at_ms
    }
}

/// Result of a rate limiting check with metadata for HTTP responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitResult {
    /// Whether the request should be allowed
    pub allowed: bool,
    /// Quota left in the current window (0 when rejected)
    pub remaining_requests: u32,
    /// Milliseconds until the current window ends
    pub reset_in_ms: u64,
}

impl RateLimitResult {
    fn opened(config: &RateLimitConfig, window: &WindowEntry, now_ms: u64) -> Self {
        Self {
            allowed: true,
            remaining_requests: config.max_requests - 1,
            reset_in_ms: window.reset_at_ms - now_ms,
        }
    }

    fn rejected(reset_in_ms: u64) -> Self {
        Self {
            allowed: false,
            remaining_requests: 0,
            reset_in_ms,
        }
    }

    pub fn reset_in(&self) -> Duration {
        Duration::from_millis(self.reset_in_ms)
    }

    /// Suggested wait before retrying, present only for rejected requests.
    pub fn retry_after(&self) -> Option<Duration> {
        (!self.allowed).then(|| self.reset_in())
    }
}

/// The main RateLimitStore model.
/// K identifies callers (e.g. String, &str, IpAddr).
/// C is the clock type, defaulting to SystemClock.
/// The table is an `Arc<DashMap>` so the sweeper can share it; callers only
/// ever see copies of entry state.
#[derive(Debug)]
pub struct RateLimitStore<K, C = SystemClock>
where
    K: Hash + Eq,
    C: Clock,
{
    entries: Arc<DashMap<K, WindowEntry>>,
    clock: Arc<C>,
    sweeper: Option<SweepTask>,
}

impl<K, C> RateLimitStore<K, C>
where
    K: Hash + Eq + Debug,
    C: Clock,
{
    /// Create a store without a background sweeper.
    /// Expired entries are still replaced lazily, and `sweep_expired` can be
    /// driven by the host.
    pub fn new(clock: C) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            clock: Arc::new(clock),
            sweeper: None,
        }
    }

    /// Admit or reject one request for `key` under `config`.
    ///
    /// The read-compare-increment happens under the key's shard write guard,
    /// so concurrent checks on the same key never lose an update.
    pub fn check(
        &self,
        key: K,
        config: &RateLimitConfig,
    ) -> Result<RateLimitResult, RateLimitError> {
        config.validate()?;
        let now_ms = self.clock.now_millis()?;

        match self.entries.entry(key) {
            Entry::Vacant(vacant) => {
                debug!(key = ?vacant.key(), window_ms = config.window_ms, "opening rate limit window");
                let window = WindowEntry::open(now_ms, config.window_ms);
                vacant.insert(window);
                Ok(RateLimitResult::opened(config, &window, now_ms))
            }
            Entry::Occupied(mut occupied) => {
                let current = *occupied.get();

                if current.is_expired(now_ms) {
                    debug!(key = ?occupied.key(), window_ms = config.window_ms, "renewing expired rate limit window");
                    let window = WindowEntry::open(now_ms, config.window_ms);
                    occupied.insert(window);
                    return Ok(RateLimitResult::opened(config, &window, now_ms));
                }

                let reset_in_ms = current.reset_at_ms - now_ms;

                // rejected attempts do not consume quota
                if current.count >= config.max_requests {
                    debug!(
                        key = ?occupied.key(),
                        count = current.count,
                        reset_in_ms,
                        "rate limit exceeded"
                    );
                    return Ok(RateLimitResult::rejected(reset_in_ms));
                }

                let count = current.count + 1;
                occupied.get_mut().count = count;
                trace!(key = ?occupied.key(), count, "request admitted");

                Ok(RateLimitResult {
                    allowed: true,
                    remaining_requests: config.max_requests - count,
                    reset_in_ms,
                })
            }
        }
    }

    /// Remove every entry whose window has elapsed, returning how many were removed.
    pub fn sweep_expired(&self) -> Result<usize, RateLimitError> {
        sweep_table(&self.entries, self.clock.as_ref())
    }

    /// Forget `key` immediately. Returns whether it was tracked.
    pub fn reset<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.remove(key).is_some()
    }

    /// Copy of the current window state for `key`, if tracked.
    pub fn snapshot<Q>(&self, key: &Q) -> Option<WindowEntry>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key).map(|entry| *entry.value())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cancel the background sweeper, if one is running. Idempotent.
    pub fn stop_sweeper(&self) {
        if let Some(sweeper) = &self.sweeper {
            sweeper.stop();
        }
    }

    pub fn is_sweeping(&self) -> bool {
        self.sweeper.as_ref().is_some_and(SweepTask::is_running)
    }
}

impl<K, C> RateLimitStore<K, C>
where
    K: Hash + Eq + Debug + Send + Sync + 'static,
    C: Clock + 'static,
{
    /// Create a store and start its sweeper on the current Tokio runtime.
    /// The sweeper stops on `stop_sweeper` or when the store is dropped.
    pub fn start(config: StoreConfig, clock: C) -> Result<Self, RateLimitError> {
        config.validate()?;

        let mut store = Self::new(clock);
        let entries = Arc::clone(&store.entries);
        let clock = Arc::clone(&store.clock);
        store.sweeper = Some(SweepTask::spawn(config.sweep_interval, move || {
            sweep_table(&entries, clock.as_ref())
        })?);

        Ok(store)
    }
}

impl<K> Default for RateLimitStore<K, SystemClock>
where
    K: Hash + Eq + Debug,
{
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

fn sweep_table<K, C>(entries: &DashMap<K, WindowEntry>, clock: &C) -> Result<usize, RateLimitError>
where
    K: Hash + Eq,
    C: Clock + ?Sized,
{
    let now_ms = clock.now_millis()?;
    let mut removed = 0;
    entries.retain(|_, window| {
        let keep = !window.is_expired(now_ms);
        if !keep {
            removed += 1;
        }
        keep
    });
    Ok(removed)
}
