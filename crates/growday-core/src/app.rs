//! Application context.
//!
//! `App` owns every piece of state for one session and is the only place
//! where the timer, the task list and the progress tracker meet: a task's
//! first completion and each finished work round are routed into XP here.

use rand::Rng;
use serde::Serialize;

use crate::clock::SharedClock;
use crate::error::{Result, ValidationError};
use crate::events::Event;
use crate::goal::{Goal, GoalList};
use crate::progress::{ProgressStats, ProgressTracker, Reconciliation};
use crate::quote::QuoteBook;
use crate::reflection::{Reflection, ReflectionLog};
use crate::storage::{Config, SharedStore};
use crate::task::{Completion, Task, TaskList, TaskSummary};
use crate::timer::{TickSource, TimerEngine, TimerState};

/// Counters shown next to the task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub tasks: TaskSummary,
    pub xp: u64,
    pub streak: u32,
    pub completed_today: u32,
}

pub struct App<S: TickSource> {
    config: Config,
    timer: TimerEngine<S>,
    progress: ProgressTracker,
    tasks: TaskList,
    goals: GoalList,
    reflections: ReflectionLog,
    quotes: QuoteBook,
    reconciliation: Reconciliation,
}

impl<S: TickSource> App<S> {
    /// Load all state from `store`, reconcile the streak against today and
    /// seed the sample goal into an empty goal list.
    ///
    /// # Errors
    /// Returns an error if the configured timer durations are zero.
    pub fn load(store: SharedStore, clock: SharedClock, config: Config, ticks: S) -> Result<Self> {
        let timer = TimerEngine::from_config(&config.timer, ticks)?;
        let mut progress =
            ProgressTracker::load(store.clone(), clock.clone(), config.rewards.clone());
        let reconciliation = progress.reconcile_daily();

        let mut goals = GoalList::load(store.clone(), clock.clone());
        if goals.seed_sample() {
            tracing::debug!("seeded sample goal");
        }

        Ok(Self {
            config,
            timer,
            progress,
            tasks: TaskList::load(store.clone(), clock.clone()),
            goals,
            reflections: ReflectionLog::load(store.clone(), clock),
            quotes: QuoteBook::load(store),
            reconciliation,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// What the start-up reconciliation did.
    pub fn reconciliation(&self) -> Reconciliation {
        self.reconciliation
    }

    pub fn stats(&self) -> &ProgressStats {
        self.progress.stats()
    }

    pub fn timer_state(&self) -> TimerState {
        self.timer.state()
    }

    pub fn timer(&self) -> &TimerEngine<S> {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut TimerEngine<S> {
        &mut self.timer
    }

    pub fn tasks(&self) -> &[Task] {
        self.tasks.tasks()
    }

    pub fn goals(&self) -> &[Goal] {
        self.goals.goals()
    }

    pub fn reflections(&self) -> impl Iterator<Item = &Reflection> {
        self.reflections.newest_first()
    }

    pub fn quote(&self) -> &str {
        self.quotes.current()
    }

    pub fn summary(&self) -> Summary {
        let stats = self.progress.stats();
        Summary {
            tasks: self.tasks.summary(),
            xp: stats.xp,
            streak: stats.streak,
            completed_today: stats.completed_today,
        }
    }

    // ── Tasks and goals ──────────────────────────────────────────────

    /// Add a task, optionally under an existing goal.
    pub fn add_task(&mut self, title: &str, goal: Option<&str>) -> Result<&Task> {
        let goal = goal.map(str::trim).unwrap_or_default();
        if !goal.is_empty() && !self.goals.contains(goal) {
            return Err(ValidationError::InvalidValue {
                field: "goal".to_string(),
                message: format!("no goal named '{goal}'"),
            }
            .into());
        }
        self.tasks.add(title, goal)
    }

    /// Mark a task done or not done. A fresh completion earns XP; returns
    /// the XP awarded, zero otherwise.
    pub fn set_task_done(&mut self, id: &str, done: bool) -> Result<u64> {
        match self.tasks.set_done(id, done)? {
            Completion::Completed { has_goal } => Ok(self.progress.on_task_completed(has_goal)),
            Completion::Reopened | Completion::Unchanged => Ok(0),
        }
    }

    pub fn rename_task(&mut self, id: &str, title: &str) -> Result<&Task> {
        self.tasks.rename(id, title)
    }

    pub fn set_task_note(&mut self, id: &str, note: &str) -> Result<&Task> {
        self.tasks.set_note(id, note)
    }

    pub fn remove_task(&mut self, id: &str) -> Result<Task> {
        self.tasks.remove(id)
    }

    pub fn clear_completed(&mut self) -> usize {
        self.tasks.clear_completed()
    }

    pub fn add_goal(&mut self, name: &str) -> Result<&Goal> {
        self.goals.add(name)
    }

    // ── Reflections and quotes ───────────────────────────────────────

    pub fn add_reflection(&mut self, text: &str) -> Result<&Reflection> {
        self.reflections.add(text)
    }

    pub fn next_quote<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &str {
        self.quotes.next_random(rng)
    }

    // ── Timer ────────────────────────────────────────────────────────

    pub fn start_timer(&mut self) -> Option<Event> {
        self.timer.start()
    }

    pub fn pause_timer(&mut self) -> Option<Event> {
        self.timer.pause()
    }

    pub fn reset_timer(&mut self) -> Event {
        self.timer.reset()
    }

    pub fn switch_mode(&mut self) -> Event {
        self.timer.switch_mode()
    }

    /// Advance the timer one second, crediting XP when a work round ends.
    pub fn tick(&mut self) -> Option<Event> {
        let event = self.timer.tick()?;
        if event.is_round_completed() {
            self.progress.on_timer_round_completed();
        }
        Some(event)
    }

    // ── Reset ────────────────────────────────────────────────────────

    /// Zero XP, streak and today's count. Tasks and goals are kept.
    pub fn reset_stats(&mut self) {
        self.progress.reset_all();
    }

    /// Wipe tasks, goals, reflections and progress. The timer is left as is.
    pub fn reset_all(&mut self) {
        self.tasks.clear();
        self.goals.clear();
        self.reflections.clear();
        self.progress.reset_all();
        tracing::info!("all data reset");
    }
}
