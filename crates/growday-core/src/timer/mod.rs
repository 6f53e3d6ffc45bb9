mod engine;
mod ticks;

pub use engine::{EventListener, Mode, TimerEngine, TimerState};
pub use ticks::{IntervalTicks, ManualTicks, TickSource};
