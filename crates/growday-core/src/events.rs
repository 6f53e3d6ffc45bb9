use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Mode;

/// Every timer state change produces an Event.
/// The CLI prints them; subscribers receive them as they are emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        mode: Mode,
        remaining_seconds: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        mode: Mode,
        remaining_seconds: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    /// Manual toggle between Work and Break.
    ModeSwitched {
        mode: Mode,
        remaining_seconds: u32,
        at: DateTime<Utc>,
    },
    /// Work ran down and the timer entered Break.
    RoundCompleted {
        rounds_completed: u32,
        at: DateTime<Utc>,
    },
    /// Break ran down and the timer is back in Work.
    BreakFinished {
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn is_round_completed(&self) -> bool {
        matches!(self, Event::RoundCompleted { .. })
    }
}
