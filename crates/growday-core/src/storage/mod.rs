mod config;
pub mod database;
mod memory;

pub use config::{Config, RewardsConfig, TimerConfig};
pub use database::Database;
pub use memory::MemoryStore;

use std::path::PathBuf;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{Result, StorageError};

/// Fixed storage keys, one per entity type.
pub mod keys {
    pub const TASKS: &str = "growday_todos";
    pub const GOALS: &str = "growday_goals";
    pub const STATS: &str = "growday_stats";
    pub const REFLECTIONS: &str = "growday_reflections";
    pub const QUOTE: &str = "growday_quote";
}

/// Synchronous string-keyed JSON store.
///
/// No transactions: each `set` replaces the whole value under its key.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;
    fn set(&self, key: &str, value: &Value) -> Result<(), StorageError>;
}

/// Store handle shared by every collection owned by one `App`.
pub type SharedStore = Rc<dyn KvStore>;

/// Load `key` as `T`, falling back to `T::default()` when the key is
/// missing, unreadable, or holds a value of the wrong shape.
pub fn load_or_default<T>(store: &dyn KvStore, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    match store.get(key) {
        Ok(Some(value)) => match serde_json::from_value(value) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(key, error = %e, "stored value has unexpected shape, using default");
                T::default()
            }
        },
        Ok(None) => T::default(),
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read from store, using default");
            T::default()
        }
    }
}

/// Write-through save. Failures are logged and dropped: persistence is
/// best effort and callers never observe it.
pub fn save_best_effort<T: Serialize + ?Sized>(store: &dyn KvStore, key: &str, value: &T) {
    let json = match serde_json::to_value(value) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to serialize value");
            return;
        }
    };
    if let Err(e) = store.set(key, &json) {
        tracing::warn!(key, error = %e, "failed to persist value");
    }
}

/// Returns the data directory.
///
/// `GROWDAY_DATA_DIR` wins when set. Otherwise `~/.config/growday[-dev]/`
/// based on `GROWDAY_ENV`; set `GROWDAY_ENV=dev` for a development copy.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("GROWDAY_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("GROWDAY_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("growday-dev")
            } else {
                base_dir.join("growday")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
