//! Named goals that tasks can be attached to.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::SharedClock;
use crate::error::{Result, ValidationError};
use crate::storage::{keys, load_or_default, save_best_effort, SharedStore};

pub const SAMPLE_GOAL_ID: &str = "g_sample";
pub const SAMPLE_GOAL_NAME: &str = "Study 1 hour/day";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub name: String,
    pub created: NaiveDate,
}

pub struct GoalList {
    goals: Vec<Goal>,
    store: SharedStore,
    clock: SharedClock,
}

impl GoalList {
    pub fn load(store: SharedStore, clock: SharedClock) -> Self {
        let goals = load_or_default(&*store, keys::GOALS);
        Self {
            goals,
            store,
            clock,
        }
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn contains(&self, name: &str) -> bool {
        self.goals.iter().any(|g| g.name == name)
    }

    pub fn add(&mut self, name: &str) -> Result<&Goal> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::Empty("goal name").into());
        }
        let goal = Goal {
            id: format!("g_{}", Uuid::new_v4().simple()),
            name: name.to_string(),
            created: self.clock.today(),
        };
        self.goals.push(goal);
        self.persist();
        Ok(&self.goals[self.goals.len() - 1])
    }

    /// Give an empty list one example goal. Returns whether it was added.
    pub fn seed_sample(&mut self) -> bool {
        if !self.goals.is_empty() {
            return false;
        }
        self.goals.push(Goal {
            id: SAMPLE_GOAL_ID.to_string(),
            name: SAMPLE_GOAL_NAME.to_string(),
            created: self.clock.today(),
        });
        self.persist();
        true
    }

    pub fn clear(&mut self) {
        self.goals.clear();
        self.persist();
    }

    fn persist(&self) {
        save_best_effort(&*self.store, keys::GOALS, &self.goals);
    }
}
