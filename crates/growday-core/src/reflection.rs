//! Free-text end-of-day reflections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::SharedClock;
use crate::error::{Result, ValidationError};
use crate::storage::{keys, load_or_default, save_best_effort, SharedStore};

/// Longest reflection accepted, in characters.
pub const MAX_REFLECTION_CHARS: usize = 300;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reflection {
    pub id: String,
    pub text: String,
    pub date: DateTime<Utc>,
}

pub struct ReflectionLog {
    entries: Vec<Reflection>,
    store: SharedStore,
    clock: SharedClock,
}

impl ReflectionLog {
    pub fn load(store: SharedStore, clock: SharedClock) -> Self {
        let entries = load_or_default(&*store, keys::REFLECTIONS);
        Self {
            entries,
            store,
            clock,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn newest_first(&self) -> impl Iterator<Item = &Reflection> {
        self.entries.iter().rev()
    }

    pub fn add(&mut self, text: &str) -> Result<&Reflection> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::Empty("reflection").into());
        }
        let len = text.chars().count();
        if len > MAX_REFLECTION_CHARS {
            return Err(ValidationError::TooLong {
                field: "reflection",
                max: MAX_REFLECTION_CHARS,
                len,
            }
            .into());
        }
        self.entries.push(Reflection {
            id: format!("r_{}", Uuid::new_v4().simple()),
            text: text.to_string(),
            date: self.clock.now(),
        });
        self.persist();
        Ok(&self.entries[self.entries.len() - 1])
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.persist();
    }

    fn persist(&self) {
        save_best_effort(&*self.store, keys::REFLECTIONS, &self.entries);
    }
}
