//! Display helpers shared by the command line and the TUI.

use chrono::{DateTime, Utc};

use crate::query::Stats;
use crate::task::Task;

/// Format a creation time relative to `now`.
///
/// "Just now", "5m ago", "3h ago", "Yesterday", "4d ago", and past a week
/// the calendar date, e.g. "Mar 1, 2024".
pub fn format_created_relative(created: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = (now - created).abs();
    let days = diff.num_days();
    if days == 0 {
        let hours = diff.num_hours();
        if hours == 0 {
            let minutes = diff.num_minutes();
            if minutes == 0 {
                "Just now".into()
            } else {
                format!("{}m ago", minutes)
            }
        } else {
            format!("{}h ago", hours)
        }
    } else if days == 1 {
        "Yesterday".into()
    } else if days < 7 {
        format!("{}d ago", days)
    } else {
        created.format("%b %-d, %Y").to_string()
    }
}

/// "1 task" / "N tasks".
pub fn format_task_count(n: usize) -> String {
    format!("{} {}", n, if n == 1 { "task" } else { "tasks" })
}

/// Checkbox marker for a completion flag.
pub fn format_checkbox(completed: bool) -> &'static str {
    if completed {
        "[x]"
    } else {
        "[ ]"
    }
}

/// One-line summary of the counters.
pub fn format_stats(stats: &Stats) -> String {
    format!(
        "Total: {}  Completed: {}  Pending: {}",
        stats.total, stats.completed, stats.pending
    )
}

/// Short id shown in tables; any unique prefix is accepted back.
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

/// Print tasks in a formatted table.
pub fn print_table(tasks: &[&Task]) {
    println!(
        "{:<9} {:<4} {:<10} {:<7} {:<13} {}",
        "ID", "Done", "Category", "Pri", "Created", "Text"
    );
    let now = Utc::now();
    for t in tasks {
        println!(
            "{:<9} {:<4} {:<10} {:<7} {:<13} {}",
            short_id(&t.id),
            format_checkbox(t.completed),
            truncate(&t.category, 10),
            t.priority,
            format_created_relative(t.created_at, now),
            t.text
        );
    }
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}
