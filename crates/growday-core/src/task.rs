//! To-do list.
//!
//! Tasks are kept in insertion order and stored as one JSON array. Marking a
//! task done reports whether that was a fresh completion so the caller can
//! award XP exactly once per incomplete→complete transition.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::SharedClock;
use crate::error::{CoreError, Result, ValidationError};
use crate::storage::{keys, load_or_default, save_best_effort, SharedStore};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    /// Goal name, empty when the task has no goal.
    #[serde(default)]
    pub goal: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub done: bool,
    pub created: DateTime<Utc>,
}

impl Task {
    pub fn has_goal(&self) -> bool {
        !self.goal.is_empty()
    }
}

/// What a `set_done` call did to the task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Incomplete → complete. The only case that earns XP.
    Completed { has_goal: bool },
    /// Complete → incomplete.
    Reopened,
    /// Already in the requested state.
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaskSummary {
    pub total: usize,
    pub done: usize,
    /// Share of tasks done, rounded to a whole percent.
    pub percent: u32,
}

pub struct TaskList {
    tasks: Vec<Task>,
    store: SharedStore,
    clock: SharedClock,
}

impl TaskList {
    pub fn load(store: SharedStore, clock: SharedClock) -> Self {
        let tasks = load_or_default(&*store, keys::TASKS);
        Self {
            tasks,
            store,
            clock,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.position(id).ok().map(|i| &self.tasks[i])
    }

    /// Append a task. `goal` may be empty.
    pub fn add(&mut self, title: &str, goal: &str) -> Result<&Task> {
        let title = non_empty_title(title)?;
        let task = Task {
            id: format!("t_{}", Uuid::new_v4().simple()),
            title,
            goal: goal.trim().to_string(),
            note: String::new(),
            done: false,
            created: self.clock.now(),
        };
        tracing::debug!(id = %task.id, "task added");
        self.tasks.push(task);
        self.persist();
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    pub fn set_done(&mut self, id: &str, done: bool) -> Result<Completion> {
        let index = self.position(id)?;
        let task = &mut self.tasks[index];
        let completion = match (task.done, done) {
            (false, true) => Completion::Completed {
                has_goal: task.has_goal(),
            },
            (true, false) => Completion::Reopened,
            _ => return Ok(Completion::Unchanged),
        };
        task.done = done;
        self.persist();
        Ok(completion)
    }

    pub fn rename(&mut self, id: &str, title: &str) -> Result<&Task> {
        let title = non_empty_title(title)?;
        let index = self.position(id)?;
        self.tasks[index].title = title;
        self.persist();
        Ok(&self.tasks[index])
    }

    pub fn set_note(&mut self, id: &str, note: &str) -> Result<&Task> {
        let index = self.position(id)?;
        self.tasks[index].note = note.trim().to_string();
        self.persist();
        Ok(&self.tasks[index])
    }

    pub fn remove(&mut self, id: &str) -> Result<Task> {
        let index = self.position(id)?;
        let task = self.tasks.remove(index);
        self.persist();
        Ok(task)
    }

    /// Drop every finished task. Returns how many were removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.done);
        let removed = before - self.tasks.len();
        if removed > 0 {
            self.persist();
        }
        removed
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
        self.persist();
    }

    pub fn summary(&self) -> TaskSummary {
        let total = self.tasks.len();
        let done = self.tasks.iter().filter(|t| t.done).count();
        let percent = (done as f64 / total.max(1) as f64 * 100.0).round() as u32;
        TaskSummary {
            total,
            done,
            percent,
        }
    }

    /// Resolve `id` exactly, or as a prefix matching a single task.
    fn position(&self, id: &str) -> Result<usize> {
        if let Some(i) = self.tasks.iter().position(|t| t.id == id) {
            return Ok(i);
        }
        let mut matches = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| !id.is_empty() && t.id.starts_with(id));
        match (matches.next(), matches.next()) {
            (Some((i, _)), None) => Ok(i),
            _ => Err(CoreError::not_found("task", id)),
        }
    }

    fn persist(&self) {
        save_best_effort(&*self.store, keys::TASKS, &self.tasks);
    }
}

fn non_empty_title(title: &str) -> Result<String, ValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::Empty("task title"));
    }
    Ok(title.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::storage::{KvStore, MemoryStore};
    use chrono::NaiveDate;
    use std::rc::Rc;

    fn list() -> (TaskList, Rc<MemoryStore>) {
        let store = Rc::new(MemoryStore::new());
        let clock = Rc::new(FixedClock::on(NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()));
        (TaskList::load(store.clone(), clock), store)
    }

    #[test]
    fn add_trims_and_persists() {
        let (mut tasks, store) = list();
        let task = tasks.add("  Read chapter 3 ", "").unwrap().clone();
        assert_eq!(task.title, "Read chapter 3");
        assert!(task.id.starts_with("t_"));
        assert!(!task.has_goal());

        let saved: Vec<Task> =
            serde_json::from_value(store.get(keys::TASKS).unwrap().unwrap()).unwrap();
        assert_eq!(saved, vec![task]);
    }

    #[test]
    fn blank_title_is_rejected() {
        let (mut tasks, store) = list();
        let err = tasks.add("   ", "").unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Empty(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn completion_reported_once_per_transition() {
        let (mut tasks, _) = list();
        let id = tasks.add("Essay", "TOEFL").unwrap().id.clone();

        assert_eq!(
            tasks.set_done(&id, true).unwrap(),
            Completion::Completed { has_goal: true }
        );
        assert_eq!(tasks.set_done(&id, true).unwrap(), Completion::Unchanged);
        assert_eq!(tasks.set_done(&id, false).unwrap(), Completion::Reopened);
        assert_eq!(tasks.set_done(&id, false).unwrap(), Completion::Unchanged);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let (mut tasks, _) = list();
        assert!(matches!(
            tasks.set_done("t_missing", true),
            Err(CoreError::NotFound { .. })
        ));
        assert!(tasks.remove("t_missing").is_err());
    }

    #[test]
    fn unique_prefix_resolves() {
        let (mut tasks, _) = list();
        let id = tasks.add("One", "").unwrap().id.clone();
        let prefix = &id[..8];
        assert_eq!(tasks.get(prefix).map(|t| t.id.as_str()), Some(id.as_str()));
        assert!(tasks.get("").is_none());
    }

    #[test]
    fn rename_and_remove() {
        let (mut tasks, _) = list();
        let id = tasks.add("Old", "").unwrap().id.clone();
        assert_eq!(tasks.rename(&id, " New ").unwrap().title, "New");
        assert!(tasks.rename(&id, "").is_err());
        assert_eq!(tasks.remove(&id).unwrap().title, "New");
        assert!(tasks.tasks().is_empty());
    }

    #[test]
    fn clear_completed_counts_removed() {
        let (mut tasks, _) = list();
        let a = tasks.add("a", "").unwrap().id.clone();
        tasks.add("b", "").unwrap();
        let c = tasks.add("c", "").unwrap().id.clone();
        tasks.set_done(&a, true).unwrap();
        tasks.set_done(&c, true).unwrap();

        assert_eq!(tasks.clear_completed(), 2);
        assert_eq!(tasks.tasks().len(), 1);
        assert_eq!(tasks.clear_completed(), 0);
    }

    #[test]
    fn summary_rounds_percentage() {
        let (mut tasks, _) = list();
        assert_eq!(
            tasks.summary(),
            TaskSummary {
                total: 0,
                done: 0,
                percent: 0
            }
        );
        let a = tasks.add("a", "").unwrap().id.clone();
        tasks.add("b", "").unwrap();
        tasks.add("c", "").unwrap();
        tasks.set_done(&a, true).unwrap();
        assert_eq!(tasks.summary().percent, 33);
    }

    #[test]
    fn reload_sees_saved_tasks() {
        let (mut tasks, store) = list();
        tasks.add("persisted", "").unwrap();
        let clock = Rc::new(FixedClock::on(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()));
        let reloaded = TaskList::load(store, clock);
        assert_eq!(reloaded.tasks()[0].title, "persisted");
    }
}
