// src/sweeper.rs

// background task that periodically evicts expired windows

// dependencies
use crate::errors::RateLimitError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, info, trace, warn};

/// Handle to a running sweep loop.
///
/// The loop only reclaims memory; admission decisions never depend on it.
/// Stopping is idempotent, and dropping the handle stops the loop, so the task
/// cannot outlive the store that owns it.
#[derive(Debug)]
pub(crate) struct SweepTask {
    handle: JoinHandle<()>,
    stopped: AtomicBool,
}

impl SweepTask {
    /// Spawn `sweep` on the current Tokio runtime, once every `period`.
    /// The first pass runs one full period after spawning.
    pub(crate) fn spawn<F>(period: Duration, mut sweep: F) -> Result<Self, RateLimitError>
    where
        F: FnMut() -> Result<usize, RateLimitError> + Send + 'static,
    {
        let runtime = Handle::try_current().map_err(|_| RateLimitError::RuntimeUnavailable)?;

        let first_pass = Instant::now() + period;
        let handle = runtime.spawn(async move {
            let mut ticker = interval_at(first_pass, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                match sweep() {
                    Ok(0) => trace!("sweep pass found no expired windows"),
                    Ok(removed) => debug!(removed, "swept expired rate limit windows"),
                    Err(error) => warn!(%error, "rate limit sweep pass failed"),
                }
            }
        });

        info!(?period, "rate limit sweeper started");

        Ok(Self {
            handle,
            stopped: AtomicBool::new(false),
        })
    }

    /// Cancel the sweep loop.
    pub(crate) fn stop(&self) {
        if !self.stopped.swap(true, Ordering::AcqRel) {
            self.handle.abort();
            info!("rate limit sweeper stopped");
        }
    }

    pub(crate) fn is_running(&self) -> bool {
        !self.stopped.load(Ordering::Acquire) && !self.handle.is_finished()
    }
}

impl Drop for SweepTask {
    fn drop(&mut self) {
        self.stop();
    }
}
