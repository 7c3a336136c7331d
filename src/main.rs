//! # TL - Task List
//!
//! A terminal task list manager: create, edit, complete, delete, filter and
//! sort short text tasks tagged with a category and a priority.
//!
//! ## Key Features
//!
//! - **Task Store**: tasks are kept newest first; every change is written
//!   through to local storage immediately.
//! - **Filtering and Sorting**: case-insensitive search, status, category
//!   and priority filters, sorting by creation time or priority.
//! - **Two Interfaces**: an interactive TUI and a scriptable CLI over the same store.
//! - **Local Storage**: one JSON file per key in `~/.tasklist/`; corrupt or
//!   missing files degrade to an empty list instead of failing.
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the UI
//! tl
//!
//! # Add a task via CLI
//! tl add "Buy milk" --category shopping --priority low
//!
//! # List pending tasks, highest priority first
//! tl list --status pending --sort priority-desc
//! ```
//!
//! Logs are written to `<data-dir>/tasklist.log`; set `RUST_LOG` to change
//! the level.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

pub mod cli;
pub mod cmd;
pub mod error;
pub mod fields;
pub mod format;
pub mod persist;
pub mod query;
pub mod store;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod task_form;
    pub mod utils;
}

use cli::Cli;
use cmd::*;
use persist::{FileStore, Persistence};
use query::FilterParams;
use store::TaskStore;

/// Name of the data directory under the home directory.
const DATA_DIR_NAME: &str = ".tasklist";

/// Log file kept inside the data directory.
const LOG_FILE_NAME: &str = "tasklist.log";

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let command = cli.command.unwrap_or(Commands::Ui);

    // Completions touch neither the data directory nor the log file
    if let Commands::Completions { shell } = command {
        return cmd_completions(shell);
    }

    let data_dir = resolve_data_dir(cli.data_dir);
    fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory {}", data_dir.display()))?;
    init_logging(&data_dir)?;

    if let Commands::Ui = command {
        return cmd_ui(&data_dir);
    }

    let mut store = TaskStore::open(Persistence::new(FileStore::new(&data_dir)));

    match command {
        Commands::Ui | Commands::Completions { .. } => unreachable!("handled above"),
        Commands::Add { text, category, priority } => cmd_add(&mut store, text, category, priority),
        Commands::List { search, status, category, priority, sort } => {
            let params = FilterParams {
                search,
                status,
                category: category.map(|c| fields::normalise_category(&c)),
                priority,
                sort,
            };
            cmd_list(&store, params)
        }
        Commands::Edit { id, text, category, priority } => cmd_edit(&mut store, id, text, category, priority),
        Commands::Toggle { id } => cmd_toggle(&mut store, id),
        Commands::Delete { id } => cmd_delete(&mut store, id),
        Commands::ClearCompleted => cmd_clear_completed(&mut store),
        Commands::Stats => cmd_stats(&store),
        Commands::Theme { action } => cmd_theme(&mut store, action),
    }
}

/// `--data-dir` if given, else `$HOME/.tasklist`, else `./.tasklist`.
fn resolve_data_dir(flag: Option<PathBuf>) -> PathBuf {
    flag.unwrap_or_else(|| {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(DATA_DIR_NAME)
    })
}

/// Send tracing output to the log file so it never lands on the TUI screen.
fn init_logging(data_dir: &Path) -> anyhow::Result<()> {
    let log_path = data_dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
