//! Motivational quote of the day.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::storage::{keys, load_or_default, save_best_effort, SharedStore};

pub const QUOTES: [&str; 5] = [
    "Small steps matter.",
    "Consistency beats intensity.",
    "Focus on progress, not perfection.",
    "One task at a time.",
    "Progress compounds daily.",
];

pub struct QuoteBook {
    current: Option<String>,
    store: SharedStore,
}

impl QuoteBook {
    pub fn load(store: SharedStore) -> Self {
        let current = load_or_default(&*store, keys::QUOTE);
        Self { current, store }
    }

    /// The stored quote, or the first quote when none was ever picked.
    pub fn current(&self) -> &str {
        self.current.as_deref().unwrap_or(QUOTES[0])
    }

    /// Pick a quote uniformly at random (repeats allowed) and store it.
    pub fn next_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &str {
        let quote = QUOTES.choose(rng).copied().unwrap_or(QUOTES[0]);
        self.current = Some(quote.to_string());
        save_best_effort(&*self.store, keys::QUOTE, quote);
        self.current()
    }
}
