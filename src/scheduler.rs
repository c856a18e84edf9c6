use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{self, Interval, MissedTickBehavior};

/// Create the shutdown channel a [`Scheduler`] listens on. Send `true` (or
/// drop the sender) to stop the loop after the current cycle.
pub fn shutdown_channel() -> (watch::Sender<bool>, watch::Receiver<bool>) {
    watch::channel(false)
}

/// Fixed-cadence tick source with cooperative shutdown.
///
/// Keeps the sampling loop free of raw `loop { sleep }` timing so it can be
/// driven under `tokio::time::pause` in tests. Slow cycles delay the next
/// tick rather than bursting to catch up.
pub struct Scheduler {
    interval: Interval,
    shutdown: watch::Receiver<bool>,
}

impl Scheduler {
    pub fn new(period: Duration, shutdown: watch::Receiver<bool>) -> Self {
        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval, shutdown }
    }

    /// Wait for the next tick. Returns `false` once shutdown was signalled,
    /// checking the shutdown side first so a pending tick cannot race past a
    /// stop request.
    pub async fn tick(&mut self) -> bool {
        tokio::select! {
            biased;
            _ = self.shutdown.changed() => false,
            _ = self.interval.tick() => true,
        }
    }
}
