//! Background preview refresh.
//!
//! A [`PreviewTicker`] calls a tick closure after a short initial delay and then on a
//! fixed period until stopped. Tick errors are logged and swallowed so a bad scene
//! never kills the loop. Start and stop are both idempotent.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::error::Result;

/// Default period between preview refreshes.
pub const DEFAULT_PREVIEW_INTERVAL: Duration = Duration::from_secs(5);

/// Delay before the first refresh after [`PreviewTicker::start`].
pub const FIRST_TICK_DELAY: Duration = Duration::from_secs(1);

struct Running {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

/// Periodic preview refresher. Must be started from within a tokio runtime.
pub struct PreviewTicker {
    period: Duration,
    running: Option<Running>,
}

impl Default for PreviewTicker {
    fn default() -> Self {
        Self::new(DEFAULT_PREVIEW_INTERVAL)
    }
}

impl PreviewTicker {
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            running: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.running
            .as_ref()
            .is_some_and(|r| !r.handle.is_finished())
    }

    /// Start ticking. Does nothing if already running.
    ///
    /// `on_tick` returns whether a preview changed; that only feeds trace logs.
    pub fn start<F>(&mut self, mut on_tick: F)
    where
        F: FnMut() -> Result<bool> + Send + 'static,
    {
        if self.is_running() {
            trace!("preview ticker already running");
            return;
        }

        let token = CancellationToken::new();
        let cancel = token.clone();
        let period = self.period;

        let handle = tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + FIRST_TICK_DELAY, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        trace!("preview ticker cancelled");
                        return;
                    }
                    _ = ticker.tick() => match on_tick() {
                        Ok(changed) => trace!(changed, "preview tick"),
                        Err(e) => debug!(error = %e, "preview tick failed"),
                    },
                }
            }
        });

        debug!(period_ms = period.as_millis() as u64, "preview ticker started");
        self.running = Some(Running { token, handle });
    }

    /// Stop ticking. Does nothing if not running.
    pub fn stop(&mut self) {
        if let Some(running) = self.running.take() {
            running.token.cancel();
            debug!("preview ticker stopped");
        }
    }
}

impl Drop for PreviewTicker {
    fn drop(&mut self) {
        if let Some(running) = self.running.take() {
            running.token.cancel();
        }
    }
}
