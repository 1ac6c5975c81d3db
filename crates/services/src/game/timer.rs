use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

/// Cancellable one-second ticker for the active question.
///
/// The first tick fires one full period after creation. Dropping the handle
/// cancels it; no background task outlives it.
#[derive(Debug)]
pub struct TickTimer {
    interval: Interval,
}

impl TickTimer {
    #[must_use]
    pub fn start(period: Duration) -> Self {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }

    /// Wait for the next tick. Cancel-safe.
    pub async fn tick(&mut self) {
        self.interval.tick().await;
    }
}
