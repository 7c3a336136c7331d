//! Enumerations for TUI state management.

/// Application state for the terminal user interface.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum AppState {
    TaskList,
    AddTask,
    EditTask,
    Help,
    Confirm,
}

/// A destructive action waiting for y/n confirmation.
#[derive(Clone, PartialEq, Debug)]
pub enum ConfirmAction {
    Delete { id: String, text: String },
    ClearCompleted { count: usize },
}

impl ConfirmAction {
    /// Question shown in the confirmation dialog.
    pub fn prompt(&self) -> String {
        match self {
            ConfirmAction::Delete { text, .. } => format!("Delete \"{}\"?", text),
            ConfirmAction::ClearCompleted { count } => {
                format!("Delete {} completed task(s)?", count)
            }
        }
    }
}
