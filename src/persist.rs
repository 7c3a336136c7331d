//! Durable key-value storage and the task persistence adapter.
//!
//! A [`KeyValueStore`] maps string keys to string values. [`FileStore`] keeps
//! one JSON file per key inside a data directory; [`MemoryStore`] keeps the
//! values in a map. [`Persistence`] sits on top of either and exchanges the
//! task collection and theme preference for serialized blobs.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::error::{PersistenceError, StoreError};
use crate::fields::Theme;
use crate::task::Task;

/// Key under which the task collection is stored.
pub const TASKS_KEY: &str = "todos";

/// Key under which the theme preference is stored.
pub const THEME_KEY: &str = "theme";

/// Key holding the last stored task blob that failed to parse.
pub const DAMAGED_TASKS_KEY: &str = "todos-damaged";

/// A synchronous string-keyed store.
pub trait KeyValueStore {
    /// Read the value for `key`, or `None` if it has never been written.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value for `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store, lost when dropped.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Directory-backed store: each key lives in `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;
        // Atomic-ish write via temp + rename.
        let tmp = path.with_extension("json.tmp");
        let written = File::create(&tmp).and_then(|mut f| {
            f.write_all(value.as_bytes())?;
            f.sync_all()?;
            drop(f);
            fs::rename(&tmp, &path)
        });
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }
}

/// Persistence adapter exchanging the task collection and theme for blobs.
#[derive(Debug)]
pub struct Persistence<S> {
    store: S,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Persistence { store }
    }

    /// Serialize the full collection under [`TASKS_KEY`].
    pub fn save(&mut self, tasks: &[Task]) -> Result<(), PersistenceError> {
        let data = serde_json::to_string(tasks)?;
        self.store.set(TASKS_KEY, &data)?;
        debug!(count = tasks.len(), "saved task collection");
        Ok(())
    }

    /// Load the collection. Missing or unreadable content yields an empty one.
    ///
    /// Records that fail to parse are skipped.
    pub fn load(&self) -> Vec<Task> {
        self.read_tasks().0
    }

    /// Load the collection, first copying damaged content to
    /// [`DAMAGED_TASKS_KEY`] so the next save cannot destroy it.
    pub fn load_preserving_damaged(&mut self) -> Vec<Task> {
        let (tasks, damaged) = self.read_tasks();
        if let Some(raw) = damaged {
            match self.store.set(DAMAGED_TASKS_KEY, &raw) {
                Ok(()) => warn!(key = DAMAGED_TASKS_KEY, "stored tasks were damaged, original content kept"),
                Err(e) => warn!(error = %e, "failed to keep damaged task content"),
            }
        }
        tasks
    }

    /// Parsed tasks plus the raw blob when any part of it failed to parse.
    fn read_tasks(&self) -> (Vec<Task>, Option<String>) {
        let raw = match self.store.get(TASKS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return (Vec::new(), None),
            Err(e) => {
                warn!(error = %e, "error reading tasks, starting fresh");
                return (Vec::new(), None);
            }
        };
        let records: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "error parsing tasks, starting fresh");
                return (Vec::new(), Some(raw));
            }
        };

        let total = records.len();
        let tasks: Vec<Task> = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match serde_json::from_value(record) {
                Ok(task) => Some(task),
                Err(e) => {
                    warn!(index, error = %e, "skipping unreadable task record");
                    None
                }
            })
            .collect();

        if tasks.len() == total {
            (tasks, None)
        } else {
            (tasks, Some(raw))
        }
    }

    pub fn save_theme(&mut self, theme: Theme) -> Result<(), PersistenceError> {
        self.store.set(THEME_KEY, theme.as_str())?;
        Ok(())
    }

    /// Load the theme preference, defaulting to light.
    pub fn load_theme(&self) -> Theme {
        match self.store.get(THEME_KEY) {
            Ok(Some(raw)) => Theme::parse(&raw).unwrap_or_default(),
            Ok(None) => Theme::default(),
            Err(e) => {
                warn!(error = %e, "error reading theme preference");
                Theme::default()
            }
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}
