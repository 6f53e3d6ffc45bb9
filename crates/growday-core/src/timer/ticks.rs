//! Tick sources driving the timer engine.
//!
//! The engine never owns a thread or a callback. It arms and disarms a
//! `TickSource`; whoever drives the engine waits on that source and calls
//! `TimerEngine::tick()` each time it fires.

use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior};

/// A cancellable repeating schedule.
pub trait TickSource {
    /// Begin firing once per `period`. Re-arming replaces the previous schedule.
    fn arm(&mut self, period: Duration);
    /// Stop firing. Idempotent.
    fn disarm(&mut self);
    fn is_armed(&self) -> bool;
}

/// Tick source with no clock behind it. Tests drive `tick()` by hand and
/// inspect whether the engine left the source armed.
#[derive(Debug, Default, Clone)]
pub struct ManualTicks {
    period: Option<Duration>,
}

impl ManualTicks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Period the source was last armed with, if armed.
    pub fn period(&self) -> Option<Duration> {
        self.period
    }
}

impl TickSource for ManualTicks {
    fn arm(&mut self, period: Duration) {
        self.period = Some(period);
    }

    fn disarm(&mut self) {
        self.period = None;
    }

    fn is_armed(&self) -> bool {
        self.period.is_some()
    }
}

/// Tick source backed by a tokio interval.
///
/// The first tick fires one full period after arming. Missed ticks are
/// delayed rather than bursted so the countdown never skips seconds.
#[derive(Debug, Default)]
pub struct IntervalTicks {
    interval: Option<Interval>,
}

impl IntervalTicks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves on the next tick. Pends forever while disarmed, so a
    /// `select!` over it simply never takes this branch after a pause.
    pub async fn next_tick(&mut self) -> Instant {
        match self.interval.as_mut() {
            Some(interval) => interval.tick().await,
            None => std::future::pending().await,
        }
    }
}

impl TickSource for IntervalTicks {
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime with the time driver enabled.
    fn arm(&mut self, period: Duration) {
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
    }

    fn disarm(&mut self) {
        self.interval = None;
    }

    fn is_armed(&self) -> bool {
        self.interval.is_some()
    }
}
