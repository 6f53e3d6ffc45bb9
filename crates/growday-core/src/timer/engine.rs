//! Work/break countdown engine.
//!
//! A two-phase state machine advanced one second per `tick()`. The engine
//! has no thread of its own: `start()` arms the injected [`TickSource`] and
//! the caller invokes `tick()` each time that source fires.
//!
//! ## State Transitions
//!
//! ```text
//! Work --(countdown at 0, tick)--> Break   rounds += 1, RoundCompleted
//! Break --(countdown at 0, tick)--> Work
//! Work <--(switch_mode)--> Break
//! ```
//!
//! A countdown rests at `00:00` for one tick; the following tick performs
//! the transition instead of decrementing.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(1500, 300, ManualTicks::new())?;
//! engine.start();
//! // Each time the tick source fires:
//! if let Some(event) = engine.tick() { /* RoundCompleted, BreakFinished */ }
//! ```

use std::fmt;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::ticks::{ManualTicks, TickSource};
use crate::error::ValidationError;
use crate::events::Event;
use crate::storage::TimerConfig;

const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Work,
    Break,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::Work => Mode::Break,
            Mode::Break => Mode::Work,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Work => "Work",
            Mode::Break => "Break",
        }
    }
}

/// Read-only snapshot of the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub mode: Mode,
    pub remaining_seconds: u32,
    pub work_duration_seconds: u32,
    pub break_duration_seconds: u32,
    pub running: bool,
    pub rounds_completed: u32,
}

impl TimerState {
    /// Remaining time as `MM:SS`.
    pub fn clock(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.remaining_seconds / 60,
            self.remaining_seconds % 60
        )
    }
}

/// Callback invoked with every event the engine emits.
pub type EventListener = Box<dyn FnMut(&Event)>;

/// Core timer engine.
pub struct TimerEngine<S: TickSource = ManualTicks> {
    mode: Mode,
    remaining_seconds: u32,
    work_duration_seconds: u32,
    break_duration_seconds: u32,
    running: bool,
    rounds_completed: u32,
    period: Duration,
    ticks: S,
    listeners: Vec<EventListener>,
}

impl<S: TickSource> TimerEngine<S> {
    /// Create an engine in `Work` with a full work countdown, not running.
    ///
    /// # Errors
    /// Returns an error if either duration is zero.
    pub fn new(work_seconds: u32, break_seconds: u32, ticks: S) -> Result<Self, ValidationError> {
        for (field, value) in [("work_duration", work_seconds), ("break_duration", break_seconds)] {
            if value == 0 {
                return Err(ValidationError::InvalidValue {
                    field: field.to_string(),
                    message: "must be at least one second".to_string(),
                });
            }
        }
        Ok(Self {
            mode: Mode::Work,
            remaining_seconds: work_seconds,
            work_duration_seconds: work_seconds,
            break_duration_seconds: break_seconds,
            running: false,
            rounds_completed: 0,
            period: DEFAULT_TICK_PERIOD,
            ticks,
            listeners: Vec::new(),
        })
    }

    /// Build from the `[timer]` config section.
    pub fn from_config(config: &TimerConfig, ticks: S) -> Result<Self, ValidationError> {
        let engine = Self::new(config.work_seconds(), config.break_seconds(), ticks)?;
        Ok(engine.with_period(Duration::from_millis(config.tick_millis.max(1))))
    }

    /// Override the real-time period the tick source is armed with.
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        TimerState {
            mode: self.mode,
            remaining_seconds: self.remaining_seconds,
            work_duration_seconds: self.work_duration_seconds,
            break_duration_seconds: self.break_duration_seconds,
            running: self.running,
            rounds_completed: self.rounds_completed,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn rounds_completed(&self) -> u32 {
        self.rounds_completed
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn ticks(&self) -> &S {
        &self.ticks
    }

    /// Mutable access to the tick source, for awaiting its next fire.
    pub fn ticks_mut(&mut self) -> &mut S {
        &mut self.ticks
    }

    /// Full countdown length of `mode`.
    pub fn duration_for(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Work => self.work_duration_seconds,
            Mode::Break => self.break_duration_seconds,
        }
    }

    // ── Subscriptions ────────────────────────────────────────────────

    /// Register a listener for every emitted event.
    pub fn subscribe(&mut self, listener: impl FnMut(&Event) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        if self.running {
            return None;
        }
        self.running = true;
        self.ticks.arm(self.period);
        tracing::debug!(mode = ?self.mode, remaining = self.remaining_seconds, "timer started");
        Some(self.emit(Event::TimerStarted {
            mode: self.mode,
            remaining_seconds: self.remaining_seconds,
            at: Utc::now(),
        }))
    }

    /// Stop ticking. Returns an event only when the timer was running.
    pub fn pause(&mut self) -> Option<Event> {
        self.ticks.disarm();
        if !self.running {
            return None;
        }
        self.running = false;
        tracing::debug!(mode = ?self.mode, remaining = self.remaining_seconds, "timer paused");
        Some(self.emit(Event::TimerPaused {
            mode: self.mode,
            remaining_seconds: self.remaining_seconds,
            at: Utc::now(),
        }))
    }

    pub fn reset(&mut self) -> Event {
        self.ticks.disarm();
        self.running = false;
        self.mode = Mode::Work;
        self.remaining_seconds = self.work_duration_seconds;
        self.rounds_completed = 0;
        tracing::debug!("timer reset");
        self.emit(Event::TimerReset { at: Utc::now() })
    }

    /// Toggle the phase by hand. Running state and round count are kept.
    pub fn switch_mode(&mut self) -> Event {
        self.enter(self.mode.toggled());
        tracing::debug!(mode = ?self.mode, "mode switched");
        self.emit(Event::ModeSwitched {
            mode: self.mode,
            remaining_seconds: self.remaining_seconds,
            at: Utc::now(),
        })
    }

    /// Advance by one second. Returns an event when a phase transition happens.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        if self.remaining_seconds > 0 {
            self.remaining_seconds -= 1;
            return None;
        }

        let event = match self.mode {
            Mode::Work => {
                self.enter(Mode::Break);
                self.rounds_completed = self.rounds_completed.saturating_add(1);
                tracing::debug!(rounds = self.rounds_completed, "work phase finished");
                Event::RoundCompleted {
                    rounds_completed: self.rounds_completed,
                    at: Utc::now(),
                }
            }
            Mode::Break => {
                self.enter(Mode::Work);
                tracing::debug!("break finished");
                Event::BreakFinished { at: Utc::now() }
            }
        };
        Some(self.emit(event))
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn enter(&mut self, mode: Mode) {
        self.mode = mode;
        self.remaining_seconds = self.duration_for(mode);
    }

    fn emit(&mut self, event: Event) -> Event {
        for listener in &mut self.listeners {
            listener(&event);
        }
        event
    }
}

impl<S: TickSource + fmt::Debug> fmt::Debug for TimerEngine<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerEngine")
            .field("state", &self.state())
            .field("period", &self.period)
            .field("ticks", &self.ticks)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
