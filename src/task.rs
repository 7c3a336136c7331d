//! Task data structure and related functionality.
//!
//! This module defines the `Task` record: a short piece of text with a
//! category tag, a priority, a completion flag and its creation time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::fields::{normalise_category, Priority};

/// A single user-entered item.
///
/// Serialised with camelCase field names so the stored JSON reads
/// `{id, text, category, priority, completed, createdAt}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub text: String,
    pub category: String,
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Build a new pending task with a fresh id.
    ///
    /// Returns `None` when `text` is empty after trimming.
    pub fn new(text: &str, category: &str, priority: Priority, created_at: DateTime<Utc>) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(Task {
            id: generate_id(),
            text: text.to_string(),
            category: normalise_category(category),
            priority,
            completed: false,
            created_at,
        })
    }

    /// Whether this task's id starts with the given prefix.
    pub fn id_matches(&self, prefix: &str) -> bool {
        !prefix.is_empty() && self.id.starts_with(prefix)
    }
}

/// Generate a collision-resistant task id.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn new_trims_text_and_normalises_category() {
        let now = Utc::now();
        let t = Task::new("  Buy milk  ", "Shopping", Priority::Low, now).unwrap();
        assert_eq!(t.text, "Buy milk");
        assert_eq!(t.category, "shopping");
        assert!(!t.completed);
        assert_eq!(t.created_at, now);
    }

    #[test]
    fn new_rejects_blank_text() {
        assert!(Task::new("   ", "work", Priority::High, Utc::now()).is_none());
        assert!(Task::new("", "work", Priority::High, Utc::now()).is_none());
    }

    #[test]
    fn ids_are_unique() {
        let a = generate_id();
        let b = generate_id();
        assert_ne!(a, b);
    }

    #[test]
    fn json_layout_uses_camel_case() {
        let t = Task {
            id: "abc".into(),
            text: "Finish report".into(),
            category: "work".into(),
            priority: Priority::High,
            completed: true,
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
        };
        let v: serde_json::Value = serde_json::to_value(&t).unwrap();
        assert_eq!(v["id"], "abc");
        assert_eq!(v["priority"], "high");
        assert_eq!(v["completed"], true);
        assert_eq!(v["createdAt"], "2024-03-01T09:30:00Z");
    }

    #[test]
    fn parses_browser_style_timestamps() {
        let raw = r#"{"id":"lq1x2abc","text":"Walk","category":"health","priority":"medium","completed":false,"createdAt":"2024-03-01T09:30:00.123Z"}"#;
        let t: Task = serde_json::from_str(raw).unwrap();
        assert_eq!(t.id, "lq1x2abc");
        assert_eq!(t.priority, Priority::Medium);
    }

    #[test]
    fn id_prefix_matching() {
        let t = Task::new("x", "work", Priority::Low, Utc::now()).unwrap();
        assert!(t.id_matches(&t.id[..8]));
        assert!(!t.id_matches(""));
        assert!(!t.id_matches("not-a-prefix-at-all"));
    }
}
