//! Task form handling for the terminal user interface.
//!
//! The same form backs the add panel and the edit modal: a text field, a
//! category selector and a priority selector.

use crate::{
    fields::{Priority, DEFAULT_CATEGORY, KNOWN_CATEGORIES},
    task::Task,
    tui::input::InputField,
};

/// Field order within the form.
pub const TEXT_FIELD: usize = 0;
pub const CATEGORY_FIELD: usize = 1;
pub const PRIORITY_FIELD: usize = 2;
const FIELD_COUNT: usize = 3;

/// Task form for editing fields
#[derive(Clone, Debug)]
pub struct TaskForm {
    pub text: InputField,
    pub category: usize,
    pub priority: usize,
    pub current_field: usize,
    pub categories: Vec<String>,
    pub priorities: Vec<Priority>,
}

impl TaskForm {
    /// Create an empty form with the default category and priority selected.
    pub fn new() -> Self {
        let categories: Vec<String> = KNOWN_CATEGORIES.iter().map(|c| c.to_string()).collect();
        let category = categories
            .iter()
            .position(|c| c == DEFAULT_CATEGORY)
            .unwrap_or(0);
        let priorities = Priority::ALL.to_vec();
        let priority = priorities
            .iter()
            .position(|p| *p == Priority::default())
            .unwrap_or(0);
        let mut form = Self {
            text: InputField::new(),
            category,
            priority,
            current_field: TEXT_FIELD,
            categories,
            priorities,
        };
        form.update_active_field();
        form
    }

    /// Create a form prefilled from an existing task.
    ///
    /// A category outside the known set is appended so it stays selectable.
    pub fn from_task(task: &Task) -> Self {
        let mut form = Self::new();
        form.text = InputField::with_value(&task.text);
        form.category = match form.categories.iter().position(|c| *c == task.category) {
            Some(i) => i,
            None => {
                form.categories.push(task.category.clone());
                form.categories.len() - 1
            }
        };
        form.priority = form
            .priorities
            .iter()
            .position(|p| *p == task.priority)
            .unwrap_or(0);
        form.update_active_field();
        form
    }

    pub fn selected_category(&self) -> &str {
        self.categories
            .get(self.category)
            .map(String::as_str)
            .unwrap_or(DEFAULT_CATEGORY)
    }

    pub fn selected_priority(&self) -> Priority {
        self.priorities.get(self.priority).copied().unwrap_or_default()
    }

    /// Move to the next field in the form.
    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % FIELD_COUNT;
        self.update_active_field();
    }

    /// Move to the previous field in the form.
    pub fn prev_field(&mut self) {
        self.current_field = if self.current_field == 0 {
            FIELD_COUNT - 1
        } else {
            self.current_field - 1
        };
        self.update_active_field();
    }

    /// Update which field is currently active for editing.
    pub fn update_active_field(&mut self) {
        self.text.active = self.current_field == TEXT_FIELD;
    }

    /// Handle character input for the currently active field.
    pub fn handle_char(&mut self, c: char) {
        if self.current_field == TEXT_FIELD {
            self.text.handle_char(c);
        }
    }

    /// Handle backspace input for the currently active field.
    pub fn handle_backspace(&mut self) {
        if self.current_field == TEXT_FIELD {
            self.text.handle_backspace();
        }
    }

    pub fn handle_delete(&mut self) {
        if self.current_field == TEXT_FIELD {
            self.text.handle_delete();
        }
    }

    /// Handle left/right arrow keys for cursor movement or selector changes.
    pub fn handle_left_right(&mut self, right: bool) {
        match self.current_field {
            TEXT_FIELD => {
                if right {
                    self.text.move_cursor_right()
                } else {
                    self.text.move_cursor_left()
                }
            }
            CATEGORY_FIELD => {
                let n = self.categories.len();
                self.category = if right {
                    (self.category + 1) % n
                } else {
                    (self.category + n - 1) % n
                };
            }
            PRIORITY_FIELD => {
                let n = self.priorities.len();
                self.priority = if right {
                    (self.priority + 1) % n
                } else {
                    (self.priority + n - 1) % n
                };
            }
            _ => {}
        }
    }
}

impl Default for TaskForm {
    fn default() -> Self {
        Self::new()
    }
}
