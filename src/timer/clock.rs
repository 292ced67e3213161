//! One-second clock that drives the timer core.
//!
//! The clock is owned by whoever orchestrates the core; the core itself only
//! sees `on_tick` calls. Missed ticks are skipped rather than burst-delivered,
//! so a suspended process resumes counting from where it left off.

use tokio::time::{interval_at, Duration, Instant, Interval, MissedTickBehavior};

/// Default tick period
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Periodic tick source backed by [`tokio::time::Interval`].
#[derive(Debug)]
pub struct TickClock {
    interval: Interval,
    period: Duration,
}

impl TickClock {
    /// Creates a clock ticking once per second.
    pub fn every_second() -> Self {
        Self::with_period(TICK_PERIOD)
    }

    /// Creates a clock with a custom period.
    ///
    /// The first tick fires one full period after creation.
    pub fn with_period(period: Duration) -> Self {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { interval, period }
    }

    /// Waits for the next tick.
    pub async fn tick(&mut self) {
        self.interval.tick().await;
    }

    /// Restarts the period so the next tick is a full period away.
    pub fn reset(&mut self) {
        self.interval.reset();
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}
