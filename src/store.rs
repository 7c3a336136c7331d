//! The task store: sole owner of the in-memory task collection.
//!
//! Every mutation that changes the collection re-serializes the whole list
//! through the [`Persistence`] adapter before returning. A failed write is
//! logged and the in-memory state stays authoritative for the session.

use chrono::Utc;
use tracing::{debug, warn};

use crate::fields::{normalise_category, Priority, Theme};
use crate::persist::{KeyValueStore, Persistence};
use crate::query::Stats;
use crate::task::Task;

/// Task collection ordered newest first, plus its durable copy.
#[derive(Debug)]
pub struct TaskStore<S> {
    tasks: Vec<Task>,
    persistence: Persistence<S>,
}

impl<S: KeyValueStore> TaskStore<S> {
    /// Open the store, loading whatever the durable copy holds.
    ///
    /// Damaged stored content is copied aside before any write can replace it.
    pub fn open(mut persistence: Persistence<S>) -> Self {
        let tasks = persistence.load_preserving_damaged();
        debug!(count = tasks.len(), "opened task store");
        TaskStore { tasks, persistence }
    }

    /// Build a store around an existing collection without touching storage.
    pub fn with_tasks(persistence: Persistence<S>, tasks: Vec<Task>) -> Self {
        TaskStore { tasks, persistence }
    }

    /// Add a task at the front of the collection.
    ///
    /// Returns `None` and changes nothing when `text` is blank.
    pub fn create(&mut self, text: &str, category: &str, priority: Priority) -> Option<Task> {
        let task = Task::new(text, category, priority, Utc::now())?;
        self.tasks.insert(0, task.clone());
        debug!(id = %task.id, "created task");
        self.persist();
        Some(task)
    }

    /// Remove the task with `id`. Returns whether anything was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return false;
        }
        debug!(id, "deleted task");
        self.persist();
        true
    }

    /// Flip the completion flag of `id`, returning the new value.
    pub fn toggle_complete(&mut self, id: &str) -> Option<bool> {
        let task = self.get_mut(id)?;
        task.completed = !task.completed;
        let completed = task.completed;
        debug!(id, completed, "toggled task");
        self.persist();
        Some(completed)
    }

    /// Replace text, category and priority of `id` in place.
    ///
    /// Returns `false` and changes nothing when `text` is blank or `id` is unknown.
    pub fn edit(&mut self, id: &str, text: &str, category: &str, priority: Priority) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        let Some(task) = self.get_mut(id) else {
            return false;
        };
        task.text = text.to_string();
        task.category = normalise_category(category);
        task.priority = priority;
        debug!(id, "edited task");
        self.persist();
        true
    }

    /// Remove every completed task and return how many were removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.completed);
        let removed = before - self.tasks.len();
        if removed > 0 {
            debug!(removed, "cleared completed tasks");
            self.persist();
        }
        removed
    }

    /// Read-only view of the collection in stored order.
    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Resolve a full id or unique id prefix to a full id.
    pub fn resolve_id(&self, prefix: &str) -> Result<String, String> {
        if self.get(prefix).is_some() {
            return Ok(prefix.to_string());
        }
        let matches: Vec<&Task> = self.tasks.iter().filter(|t| t.id_matches(prefix)).collect();
        match matches.len() {
            0 => Err(format!("No task found with id '{}'", prefix)),
            1 => Ok(matches[0].id.clone()),
            _ => {
                let mut error_msg = format!("Multiple tasks match id prefix '{}':\n", prefix);
                for task in matches {
                    error_msg.push_str(&format!("  {}: {}\n", task.id, task.text));
                }
                error_msg.push_str("Please use a longer prefix.");
                Err(error_msg)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Summary counters over the whole collection.
    pub fn stats(&self) -> Stats {
        Stats::of(&self.tasks)
    }

    pub fn theme(&self) -> Theme {
        self.persistence.load_theme()
    }

    /// Persist a theme preference. Failures are logged, not returned.
    pub fn set_theme(&mut self, theme: Theme) {
        if let Err(e) = self.persistence.save_theme(theme) {
            warn!(error = %e, "failed to save theme preference");
        }
    }

    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }

    fn persist(&mut self) {
        if let Err(e) = self.persistence.save(&self.tasks) {
            warn!(error = %e, "failed to save tasks, keeping in-memory state");
        }
    }
}
