//! # GrowDay Core Library
//!
//! Business logic for GrowDay, a single-user daily productivity tracker:
//! tasks, goals, a work/break countdown, reflections, and an XP/streak
//! counter. All state lives in a local key-value store; the `growday` CLI
//! is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a Work/Break countdown advanced one second per
//!   `tick()`, armed and disarmed through an injected tick source
//! - **Progress Tracker**: XP rewards and the daily streak, reconciled once
//!   per load against today's date
//! - **Storage**: a synchronous JSON key-value store (SQLite on disk,
//!   in-memory for tests) and TOML configuration
//! - **App**: the context object owning all of the above for one session
//!
//! ## Key Components
//!
//! - [`App`]: Session context wiring tasks and timer rounds into XP
//! - [`TimerEngine`]: Work/Break state machine
//! - [`ProgressTracker`]: XP and streak bookkeeping
//! - [`KvStore`]: Persistence seam

pub mod app;
pub mod clock;
pub mod error;
pub mod events;
pub mod goal;
pub mod progress;
pub mod quote;
pub mod reflection;
pub mod storage;
pub mod task;
pub mod timer;

pub use app::{App, Summary};
pub use clock::{Clock, FixedClock, SharedClock, SystemClock};
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use goal::Goal;
pub use progress::{ProgressStats, ProgressTracker, Reconciliation};
pub use reflection::Reflection;
pub use storage::{Config, Database, KvStore, MemoryStore, SharedStore};
pub use task::{Task, TaskSummary};
pub use timer::{IntervalTicks, ManualTicks, Mode, TickSource, TimerEngine, TimerState};
