//! Derivation of the displayed task view from the collection.
//!
//! [`derive`] is a pure function: it filters by search text, status,
//! category and priority, in that order, then applies a stable sort.

use crate::fields::{Priority, SortKey, StatusFilter};
use crate::task::Task;

/// Filter and sort parameters for one derivation of the view.
///
/// The default value is the identity view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterParams {
    /// Case-insensitive substring to look for in the task text. Empty disables.
    pub search: String,
    pub status: StatusFilter,
    /// Exact category tag, or `None` for all categories.
    pub category: Option<String>,
    /// Exact priority, or `None` for all priorities.
    pub priority: Option<Priority>,
    pub sort: SortKey,
}

/// Derive the ordered view of `tasks` described by `params`.
pub fn derive<'a>(tasks: &'a [Task], params: &FilterParams) -> Vec<&'a Task> {
    let search = params.search.to_lowercase();

    let mut view: Vec<&Task> = tasks
        .iter()
        .filter(|t| {
            if !search.is_empty() && !t.text.to_lowercase().contains(&search) {
                return false;
            }
            if !params.status.accepts(t.completed) {
                return false;
            }
            if let Some(ref c) = params.category {
                if &t.category != c {
                    return false;
                }
            }
            if let Some(p) = params.priority {
                if t.priority != p {
                    return false;
                }
            }
            true
        })
        .collect();

    // `sort_by_key` is stable, so ties keep the filtered order.
    match params.sort {
        SortKey::None => {}
        SortKey::DateAsc => view.sort_by_key(|t| t.created_at),
        SortKey::DateDesc => view.sort_by_key(|t| std::cmp::Reverse(t.created_at)),
        SortKey::PriorityAsc => view.sort_by_key(|t| t.priority.rank()),
        SortKey::PriorityDesc => view.sort_by_key(|t| std::cmp::Reverse(t.priority.rank())),
    }

    view
}

/// Summary counters over a collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

impl Stats {
    pub fn of(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|t| t.completed).count();
        Stats {
            total,
            completed,
            pending: total - completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn task(text: &str, category: &str, priority: Priority, completed: bool, age_minutes: i64) -> Task {
        let base = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let mut t = Task::new(text, category, priority, base - Duration::minutes(age_minutes)).unwrap();
        t.completed = completed;
        t
    }

    fn texts(view: &[&Task]) -> Vec<String> {
        view.iter().map(|t| t.text.clone()).collect()
    }

    fn sample_tasks() -> Vec<Task> {
        vec![
            task("Buy milk", "shopping", Priority::Low, false, 0),
            task("Finish report", "work", Priority::High, true, 10),
        ]
    }

    #[test]
    fn default_params_are_identity() {
        let tasks = vec![
            task("c", "work", Priority::High, false, 0),
            task("a", "health", Priority::Low, true, 5),
            task("b", "work", Priority::Medium, false, 1),
        ];
        let view = derive(&tasks, &FilterParams::default());
        assert_eq!(texts(&view), vec!["c", "a", "b"]);
    }

    #[test]
    fn empty_collection_gives_empty_view() {
        assert!(derive(&[], &FilterParams::default()).is_empty());
    }

    #[test]
    fn status_filter() {
        let tasks = sample_tasks();
        let params = FilterParams { status: StatusFilter::Pending, ..Default::default() };
        assert_eq!(texts(&derive(&tasks, &params)), vec!["Buy milk"]);
        let params = FilterParams { status: StatusFilter::Completed, ..Default::default() };
        assert_eq!(texts(&derive(&tasks, &params)), vec!["Finish report"]);
    }

    #[test]
    fn category_filter() {
        let tasks = sample_tasks();
        let params = FilterParams { category: Some("work".into()), ..Default::default() };
        assert_eq!(texts(&derive(&tasks, &params)), vec!["Finish report"]);
    }

    #[test]
    fn priority_filter() {
        let tasks = sample_tasks();
        let params = FilterParams { priority: Some(Priority::Low), ..Default::default() };
        assert_eq!(texts(&derive(&tasks, &params)), vec!["Buy milk"]);
    }

    #[test]
    fn priority_desc_puts_high_first() {
        let tasks = sample_tasks();
        let params = FilterParams { sort: SortKey::PriorityDesc, ..Default::default() };
        assert_eq!(texts(&derive(&tasks, &params)), vec!["Finish report", "Buy milk"]);
        let params = FilterParams { sort: SortKey::PriorityAsc, ..Default::default() };
        assert_eq!(texts(&derive(&tasks, &params)), vec!["Buy milk", "Finish report"]);
    }

    #[test]
    fn search_is_case_insensitive() {
        let tasks = sample_tasks();
        let params = FilterParams { search: "MILK".into(), ..Default::default() };
        assert_eq!(texts(&derive(&tasks, &params)), vec!["Buy milk"]);
    }

    #[test]
    fn all_filters_restrictive_gives_empty_view() {
        let tasks = sample_tasks();
        let params = FilterParams {
            search: "report".into(),
            status: StatusFilter::Pending,
            category: Some("work".into()),
            priority: Some(Priority::High),
            sort: SortKey::DateAsc,
        };
        assert!(derive(&tasks, &params).is_empty());
    }

    #[test]
    fn date_sorts() {
        let tasks = vec![
            task("middle", "work", Priority::Low, false, 5),
            task("newest", "work", Priority::Low, false, 0),
            task("oldest", "work", Priority::Low, false, 30),
        ];
        let params = FilterParams { sort: SortKey::DateAsc, ..Default::default() };
        assert_eq!(texts(&derive(&tasks, &params)), vec!["oldest", "middle", "newest"]);
        let params = FilterParams { sort: SortKey::DateDesc, ..Default::default() };
        assert_eq!(texts(&derive(&tasks, &params)), vec!["newest", "middle", "oldest"]);
    }

    #[test]
    fn priority_sort_is_stable() {
        let tasks = vec![
            task("m1", "work", Priority::Medium, false, 0),
            task("h1", "work", Priority::High, false, 1),
            task("m2", "work", Priority::Medium, false, 2),
            task("h2", "work", Priority::High, false, 3),
            task("l1", "work", Priority::Low, false, 4),
        ];
        let params = FilterParams { sort: SortKey::PriorityDesc, ..Default::default() };
        assert_eq!(texts(&derive(&tasks, &params)), vec!["h1", "h2", "m1", "m2", "l1"]);
        let params = FilterParams { sort: SortKey::PriorityAsc, ..Default::default() };
        assert_eq!(texts(&derive(&tasks, &params)), vec!["l1", "m1", "m2", "h1", "h2"]);
    }

    #[test]
    fn derive_does_not_mutate_input() {
        let tasks = sample_tasks();
        let before = tasks.clone();
        let params = FilterParams { sort: SortKey::PriorityAsc, ..Default::default() };
        let _ = derive(&tasks, &params);
        assert_eq!(tasks, before);
    }

    #[test]
    fn stats_counts() {
        let stats = Stats::of(&sample_tasks());
        assert_eq!(stats, Stats { total: 2, completed: 1, pending: 1 });
        assert_eq!(Stats::of(&[]), Stats::default());
    }
}
