//! Command implementations for the CLI interface.
//!
//! Each handler translates one subcommand into calls on the [`TaskStore`]
//! and prints the outcome. Blank text and unknown ids are reported, not
//! treated as failures.

use std::path::Path;

use anyhow::Context;
use clap::{Subcommand, ValueEnum};
use clap_complete::{generate, Shell};

use crate::fields::*;
use crate::format::*;
use crate::persist::KeyValueStore;
use crate::query::{derive, FilterParams};
use crate::store::TaskStore;
use crate::tui::run::run_tui;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive UI interface.
    Ui,

    /// Add a new task.
    Add {
        /// Task text.
        text: String,
        /// Category tag: work | personal | shopping | health | other, or any short tag.
        #[arg(long, default_value = DEFAULT_CATEGORY)]
        category: String,
        /// Priority: low | medium | high.
        #[arg(long, value_enum, default_value_t = Priority::Medium)]
        priority: Priority,
    },

    /// List tasks with optional filters.
    List {
        /// Case-insensitive text search.
        #[arg(long, default_value = "")]
        search: String,
        /// Status filter.
        #[arg(long, value_enum, default_value_t = StatusFilter::All)]
        status: StatusFilter,
        /// Filter by category.
        #[arg(long)]
        category: Option<String>,
        /// Filter by priority.
        #[arg(long, value_enum)]
        priority: Option<Priority>,
        /// Sort key.
        #[arg(long, value_enum, default_value_t = SortKey::None)]
        sort: SortKey,
    },

    /// Edit a task's text, category or priority.
    Edit {
        /// Task id or unique id prefix.
        id: String,
        #[arg(long)]
        text: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long, value_enum)]
        priority: Option<Priority>,
    },

    /// Toggle a task between completed and pending.
    Toggle {
        /// Task id or unique id prefix.
        id: String,
    },

    /// Delete a task.
    Delete {
        /// Task id or unique id prefix.
        id: String,
    },

    /// Delete every completed task.
    ClearCompleted,

    /// Show total, completed and pending counts.
    Stats,

    /// Show or change the theme preference.
    Theme {
        #[arg(value_enum)]
        action: Option<ThemeAction>,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeAction {
    Light,
    Dark,
    Toggle,
}

/// Launch the terminal user interface.
pub fn cmd_ui(data_dir: &Path) -> anyhow::Result<()> {
    run_tui(data_dir).context("UI error")
}

/// Add a new task to the store.
pub fn cmd_add<S: KeyValueStore>(
    store: &mut TaskStore<S>,
    text: String,
    category: String,
    priority: Priority,
) -> anyhow::Result<()> {
    match store.create(&text, &category, priority) {
        Some(task) => println!("Added {} {}", short_id(&task.id), task.text),
        None => eprintln!("Task text cannot be empty."),
    }
    Ok(())
}

/// Print the derived view.
pub fn cmd_list<S: KeyValueStore>(store: &TaskStore<S>, params: FilterParams) -> anyhow::Result<()> {
    let view = derive(store.all(), &params);
    if view.is_empty() {
        if store.is_empty() {
            println!("No tasks yet. Add one with `tl add <text>`.");
        } else {
            println!("No tasks match the current filters.");
        }
        return Ok(());
    }
    print_table(&view);
    println!("{}", format_task_count(view.len()));
    Ok(())
}

/// Edit text, category and priority; unspecified fields keep their value.
pub fn cmd_edit<S: KeyValueStore>(
    store: &mut TaskStore<S>,
    id: String,
    text: Option<String>,
    category: Option<String>,
    priority: Option<Priority>,
) -> anyhow::Result<()> {
    let task_id = match store.resolve_id(&id) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("Error resolving task: {}", e);
            return Ok(());
        }
    };
    let Some(current) = store.get(&task_id) else {
        return Ok(());
    };
    let text = text.unwrap_or_else(|| current.text.clone());
    let category = category.unwrap_or_else(|| current.category.clone());
    let priority = priority.unwrap_or(current.priority);

    if store.edit(&task_id, &text, &category, priority) {
        println!("Updated {}", short_id(&task_id));
    } else {
        eprintln!("Task text cannot be empty.");
    }
    Ok(())
}

pub fn cmd_toggle<S: KeyValueStore>(store: &mut TaskStore<S>, id: String) -> anyhow::Result<()> {
    let task_id = match store.resolve_id(&id) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("Error resolving task: {}", e);
            return Ok(());
        }
    };
    if let Some(completed) = store.toggle_complete(&task_id) {
        let state = if completed { "completed" } else { "pending" };
        println!("Marked {} {}", short_id(&task_id), state);
    }
    Ok(())
}

pub fn cmd_delete<S: KeyValueStore>(store: &mut TaskStore<S>, id: String) -> anyhow::Result<()> {
    let task_id = match store.resolve_id(&id) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("Error resolving task: {}", e);
            return Ok(());
        }
    };
    if store.delete(&task_id) {
        println!("Task deleted successfully!");
    }
    Ok(())
}

pub fn cmd_clear_completed<S: KeyValueStore>(store: &mut TaskStore<S>) -> anyhow::Result<()> {
    match store.clear_completed() {
        0 => println!("No completed tasks to clear!"),
        n => println!("{} completed task(s) deleted!", n),
    }
    Ok(())
}

pub fn cmd_stats<S: KeyValueStore>(store: &TaskStore<S>) -> anyhow::Result<()> {
    println!("{}", format_stats(&store.stats()));
    Ok(())
}

pub fn cmd_theme<S: KeyValueStore>(store: &mut TaskStore<S>, action: Option<ThemeAction>) -> anyhow::Result<()> {
    let theme = match action {
        None => store.theme(),
        Some(ThemeAction::Light) => Theme::Light,
        Some(ThemeAction::Dark) => Theme::Dark,
        Some(ThemeAction::Toggle) => store.theme().toggled(),
    };
    if action.is_some() {
        store.set_theme(theme);
    }
    println!("{}", theme.as_str());
    Ok(())
}

pub fn cmd_completions(shell: Shell) -> anyhow::Result<()> {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::{MemoryStore, Persistence};

    fn store() -> TaskStore<MemoryStore> {
        TaskStore::open(Persistence::new(MemoryStore::new()))
    }

    #[test]
    fn add_then_toggle_by_prefix() {
        let mut s = store();
        cmd_add(&mut s, "Write tests".into(), "Work".into(), Priority::High).unwrap();
        let id = s.all()[0].id.clone();
        cmd_toggle(&mut s, id[..8].to_string()).unwrap();
        assert!(s.all()[0].completed);
        assert_eq!(s.all()[0].category, "work");
    }

    #[test]
    fn add_blank_is_reported_not_stored() {
        let mut s = store();
        cmd_add(&mut s, "  ".into(), "work".into(), Priority::Low).unwrap();
        assert!(s.is_empty());
    }

    #[test]
    fn edit_keeps_unspecified_fields() {
        let mut s = store();
        cmd_add(&mut s, "Old".into(), "health".into(), Priority::Low).unwrap();
        let id = s.all()[0].id.clone();
        cmd_edit(&mut s, id.clone(), Some("New".into()), None, None).unwrap();
        let t = s.get(&id).unwrap();
        assert_eq!(t.text, "New");
        assert_eq!(t.category, "health");
        assert_eq!(t.priority, Priority::Low);
    }

    #[test]
    fn unknown_ids_are_not_errors() {
        let mut s = store();
        assert!(cmd_toggle(&mut s, "missing".into()).is_ok());
        assert!(cmd_delete(&mut s, "missing".into()).is_ok());
        assert!(cmd_edit(&mut s, "missing".into(), None, None, None).is_ok());
    }

    #[test]
    fn clear_completed_and_delete() {
        let mut s = store();
        cmd_add(&mut s, "a".into(), "work".into(), Priority::Low).unwrap();
        cmd_add(&mut s, "b".into(), "work".into(), Priority::Low).unwrap();
        let b = s.all()[0].id.clone();
        let a = s.all()[1].id.clone();
        cmd_toggle(&mut s, a).unwrap();
        cmd_clear_completed(&mut s).unwrap();
        assert_eq!(s.len(), 1);
        cmd_delete(&mut s, b).unwrap();
        assert!(s.is_empty());
    }

    #[test]
    fn theme_toggle_persists() {
        let mut s = store();
        cmd_theme(&mut s, Some(ThemeAction::Toggle)).unwrap();
        assert_eq!(s.theme(), Theme::Dark);
        cmd_theme(&mut s, None).unwrap();
        assert_eq!(s.theme(), Theme::Dark);
        cmd_theme(&mut s, Some(ThemeAction::Light)).unwrap();
        assert_eq!(s.theme(), Theme::Light);
    }
}
