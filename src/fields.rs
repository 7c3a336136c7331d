//! Enumerations and field types for task management.
//!
//! This module defines the structured values attached to a task (priority,
//! category tags) and the parameters used to filter and sort the task view.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Category tags offered by the UI selectors, in display order.
pub const KNOWN_CATEGORIES: [&str; 5] = ["work", "personal", "shopping", "health", "other"];

/// Category given to new tasks when none is chosen.
pub const DEFAULT_CATEGORY: &str = "work";

/// Category used when a supplied tag is blank.
pub const FALLBACK_CATEGORY: &str = "other";

/// Priority classification for task importance.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// All priorities from lowest to highest.
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Numeric rank used for sorting: low=1, medium=2, high=3.
    pub fn rank(self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Colour scheme preference, persisted independently of the tasks.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The opposite theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parse a stored theme value. Anything unrecognised yields `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

/// Completion status filter for the task view.
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    Pending,
}

impl StatusFilter {
    /// Whether a task with the given completion flag passes this filter.
    pub fn accepts(self, completed: bool) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Completed => completed,
            StatusFilter::Pending => !completed,
        }
    }

    /// Next filter in the cycle All → Completed → Pending → All.
    pub fn next(self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Completed,
            StatusFilter::Completed => StatusFilter::Pending,
            StatusFilter::Pending => StatusFilter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Completed => "Completed",
            StatusFilter::Pending => "Pending",
        }
    }
}

/// Available sorting options for the task view.
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum SortKey {
    /// Keep the collection order (newest first).
    #[default]
    None,
    DateAsc,
    DateDesc,
    PriorityAsc,
    PriorityDesc,
}

impl SortKey {
    pub fn next(self) -> Self {
        match self {
            SortKey::None => SortKey::DateDesc,
            SortKey::DateDesc => SortKey::DateAsc,
            SortKey::DateAsc => SortKey::PriorityDesc,
            SortKey::PriorityDesc => SortKey::PriorityAsc,
            SortKey::PriorityAsc => SortKey::None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::None => "Default",
            SortKey::DateAsc => "Oldest first",
            SortKey::DateDesc => "Newest first",
            SortKey::PriorityAsc => "Priority (low-high)",
            SortKey::PriorityDesc => "Priority (high-low)",
        }
    }
}

/// Normalise a category tag by trimming and lowercasing.
///
/// Blank input falls back to [`FALLBACK_CATEGORY`].
pub fn normalise_category(s: &str) -> String {
    let tag = s.trim().to_lowercase();
    if tag.is_empty() {
        FALLBACK_CATEGORY.to_string()
    } else {
        tag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_rank_orders_low_to_high() {
        assert!(Priority::Low.rank() < Priority::Medium.rank());
        assert!(Priority::Medium.rank() < Priority::High.rank());
    }

    #[test]
    fn priority_serialises_lowercase() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");
        let p: Priority = serde_json::from_str("\"low\"").unwrap();
        assert_eq!(p, Priority::Low);
    }

    #[test]
    fn theme_toggle_and_parse() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
        assert_eq!(Theme::parse("dark"), Some(Theme::Dark));
        assert_eq!(Theme::parse("solarized"), None);
    }

    #[test]
    fn status_filter_accepts() {
        assert!(StatusFilter::All.accepts(true));
        assert!(StatusFilter::All.accepts(false));
        assert!(StatusFilter::Completed.accepts(true));
        assert!(!StatusFilter::Completed.accepts(false));
        assert!(StatusFilter::Pending.accepts(false));
        assert!(!StatusFilter::Pending.accepts(true));
    }

    #[test]
    fn sort_key_cycle_returns_to_start() {
        let mut key = SortKey::None;
        for _ in 0..5 {
            key = key.next();
        }
        assert_eq!(key, SortKey::None);
    }

    #[test]
    fn test_normalise_category() {
        assert_eq!(normalise_category("  Work "), "work");
        assert_eq!(normalise_category("Errands"), "errands");
        assert_eq!(normalise_category("   "), "other");
    }
}
