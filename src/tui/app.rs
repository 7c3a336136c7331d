//! Main application logic for the terminal user interface.
//!
//! This module contains the `App` struct which owns the task store for the
//! session, derives the visible view from the current filters, handles key
//! input, and renders the list, the add/edit modal and transient toasts.

use std::io;
use std::time::{Duration, Instant};

use chrono::Utc;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use tracing::debug;

use crate::fields::{Priority, Theme, KNOWN_CATEGORIES};
use crate::format::{format_checkbox, format_created_relative, format_stats, format_task_count};
use crate::persist::KeyValueStore;
use crate::query::{derive, FilterParams};
use crate::store::TaskStore;
use crate::tui::{
    colors::{category_color, palette, priority_color, Palette},
    enums::{AppState, ConfirmAction},
    input::InputField,
    task_form::{TaskForm, CATEGORY_FIELD, PRIORITY_FIELD, TEXT_FIELD},
    utils::centered_rect,
};

/// How long a toast stays on screen.
pub const TOAST_DURATION: Duration = Duration::from_secs(3);

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// A transient notification.
#[derive(Clone, Debug)]
struct Toast {
    message: String,
    expires_at: Instant,
}

/// Main application state for the terminal user interface.
pub struct App<S> {
    state: AppState,
    store: TaskStore<S>,
    params: FilterParams,
    view: Vec<String>,
    list_state: TableState,
    form: TaskForm,
    editing: Option<String>,
    search: InputField,
    search_active: bool,
    confirm: Option<ConfirmAction>,
    toast: Option<Toast>,
    theme: Theme,
}

impl<S: KeyValueStore> App<S> {
    /// Create the app around an opened store, restoring the theme preference.
    pub fn new(store: TaskStore<S>) -> Self {
        let theme = store.theme();
        let mut app = App {
            state: AppState::TaskList,
            store,
            params: FilterParams::default(),
            view: Vec::new(),
            list_state: TableState::default(),
            form: TaskForm::new(),
            editing: None,
            search: InputField::new(),
            search_active: false,
            confirm: None,
            toast: None,
            theme,
        };
        app.refresh_view();
        app
    }

    /// Re-derive the visible task ids. Attempts to preserve selection.
    fn refresh_view(&mut self) {
        let old_selected_id = self.selected_id().map(str::to_string);

        self.params.search = self.search.value.clone();
        self.view = derive(self.store.all(), &self.params)
            .into_iter()
            .map(|t| t.id.clone())
            .collect();

        let restored = old_selected_id.and_then(|id| self.view.iter().position(|v| *v == id));
        match restored {
            Some(idx) => self.list_state.select(Some(idx)),
            None if self.view.is_empty() => self.list_state.select(None),
            None => {
                let idx = self.list_state.selected().unwrap_or(0).min(self.view.len() - 1);
                self.list_state.select(Some(idx));
            }
        }
    }

    fn select_id(&mut self, id: &str) {
        if let Some(idx) = self.view.iter().position(|v| v == id) {
            self.list_state.select(Some(idx));
        }
    }

    fn selected_id(&self) -> Option<&str> {
        self.list_state
            .selected()
            .and_then(|idx| self.view.get(idx))
            .map(String::as_str)
    }

    fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            expires_at: Instant::now() + TOAST_DURATION,
        });
    }

    /// Drop the toast once it has expired.
    pub fn tick(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|t| now >= t.expires_at) {
            self.toast = None;
        }
    }

    /// Known categories followed by any other tags present in the collection.
    fn category_options(&self) -> Vec<String> {
        let mut options: Vec<String> = KNOWN_CATEGORIES.iter().map(|c| c.to_string()).collect();
        let mut extra: Vec<String> = self
            .store
            .all()
            .iter()
            .map(|t| t.category.clone())
            .filter(|c| !options.contains(c))
            .collect();
        extra.sort();
        extra.dedup();
        options.extend(extra);
        options
    }

    fn cycle_category_filter(&mut self) {
        let options = self.category_options();
        self.params.category = match &self.params.category {
            None => options.first().cloned(),
            Some(current) => options
                .iter()
                .position(|c| c == current)
                .and_then(|i| options.get(i + 1).cloned()),
        };
        self.refresh_view();
    }

    fn cycle_priority_filter(&mut self) {
        self.params.priority = match self.params.priority {
            None => Some(Priority::Low),
            Some(Priority::Low) => Some(Priority::Medium),
            Some(Priority::Medium) => Some(Priority::High),
            Some(Priority::High) => None,
        };
        self.refresh_view();
    }

    fn reset_filters(&mut self) {
        self.search.clear();
        self.params = FilterParams::default();
        self.refresh_view();
    }

    fn move_selection(&mut self, down: bool) {
        if self.view.is_empty() {
            return;
        }
        let last = self.view.len() - 1;
        let idx = match (self.list_state.selected(), down) {
            (None, _) => 0,
            (Some(i), true) => (i + 1).min(last),
            (Some(i), false) => i.saturating_sub(1),
        };
        self.list_state.select(Some(idx));
    }

    fn open_add(&mut self) {
        self.form = TaskForm::new();
        self.editing = None;
        self.state = AppState::AddTask;
    }

    fn open_edit(&mut self) {
        let Some(id) = self.selected_id().map(str::to_string) else {
            return;
        };
        if let Some(task) = self.store.get(&id) {
            self.form = TaskForm::from_task(task);
            self.editing = Some(id);
            self.state = AppState::EditTask;
        }
    }

    fn close_modal(&mut self) {
        self.state = AppState::TaskList;
        self.editing = None;
    }

    /// Submit the add or edit form.
    fn submit_form(&mut self) {
        let text = self.form.text.value.clone();
        if text.trim().is_empty() {
            self.show_toast("Task text is required");
            return;
        }
        let category = self.form.selected_category().to_string();
        let priority = self.form.selected_priority();

        match self.state {
            AppState::AddTask => {
                if let Some(task) = self.store.create(&text, &category, priority) {
                    self.form = TaskForm::new();
                    self.state = AppState::TaskList;
                    self.refresh_view();
                    self.select_id(&task.id);
                    self.show_toast("Task added successfully!");
                }
            }
            AppState::EditTask => {
                if let Some(id) = self.editing.clone() {
                    if self.store.edit(&id, &text, &category, priority) {
                        self.show_toast("Task updated successfully!");
                    }
                }
                self.close_modal();
                self.refresh_view();
            }
            _ => {}
        }
    }

    fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_id().map(str::to_string) {
            self.store.toggle_complete(&id);
            self.refresh_view();
        }
    }

    fn request_delete(&mut self) {
        let Some(id) = self.selected_id().map(str::to_string) else {
            return;
        };
        if let Some(task) = self.store.get(&id) {
            self.confirm = Some(ConfirmAction::Delete { id, text: task.text.clone() });
            self.state = AppState::Confirm;
        }
    }

    fn request_clear_completed(&mut self) {
        let count = self.store.stats().completed;
        if count == 0 {
            self.show_toast("No completed tasks to clear!");
            return;
        }
        self.confirm = Some(ConfirmAction::ClearCompleted { count });
        self.state = AppState::Confirm;
    }

    fn apply_confirm(&mut self) {
        match self.confirm.take() {
            Some(ConfirmAction::Delete { id, .. }) => {
                if self.store.delete(&id) {
                    self.show_toast("Task deleted successfully!");
                }
            }
            Some(ConfirmAction::ClearCompleted { .. }) => {
                let removed = self.store.clear_completed();
                self.show_toast(format!("{} completed task(s) deleted!", removed));
            }
            None => {}
        }
        self.state = AppState::TaskList;
        self.refresh_view();
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.store.set_theme(self.theme);
        debug!(theme = self.theme.as_str(), "theme toggled");
    }

    /// Handle one key press. Returns true if the application should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        match self.state {
            AppState::TaskList => return self.handle_task_list_key(key),
            AppState::AddTask | AppState::EditTask => self.handle_form_key(key),
            AppState::Confirm => self.handle_confirm_key(key),
            AppState::Help => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('?') | KeyCode::Char('q')) {
                    self.state = AppState::TaskList;
                }
            }
        }
        false
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.search.clear();
                self.search_active = false;
            }
            KeyCode::Enter => {
                self.search_active = false;
                return;
            }
            KeyCode::Backspace => self.search.handle_backspace(),
            KeyCode::Delete => self.search.handle_delete(),
            KeyCode::Left => self.search.move_cursor_left(),
            KeyCode::Right => self.search.move_cursor_right(),
            KeyCode::Char(c) => self.search.handle_char(c),
            _ => return,
        }
        self.refresh_view();
    }

    fn handle_task_list_key(&mut self, key: KeyEvent) -> bool {
        if self.search_active {
            self.handle_search_key(key);
            return false;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('k') {
            self.search_active = true;
            return false;
        }

        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(true),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(false),
            KeyCode::Char('a') => self.open_add(),
            KeyCode::Enter | KeyCode::Char('e') => self.open_edit(),
            KeyCode::Char(' ') | KeyCode::Char('x') => self.toggle_selected(),
            KeyCode::Delete | KeyCode::Char('d') => self.request_delete(),
            KeyCode::Char('c') => self.request_clear_completed(),
            KeyCode::Char('/') => self.search_active = true,
            KeyCode::Char('s') => {
                self.params.status = self.params.status.next();
                self.refresh_view();
            }
            KeyCode::Char('g') => self.cycle_category_filter(),
            KeyCode::Char('p') => self.cycle_priority_filter(),
            KeyCode::Char('o') => {
                self.params.sort = self.params.sort.next();
                self.refresh_view();
            }
            KeyCode::Char('r') => self.reset_filters(),
            KeyCode::Char('t') => self.toggle_theme(),
            KeyCode::Char('h') | KeyCode::Char('?') => self.state = AppState::Help,
            _ => {}
        }
        false
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.close_modal(),
            KeyCode::Tab | KeyCode::Down => self.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.form.prev_field(),
            KeyCode::Left => self.form.handle_left_right(false),
            KeyCode::Right => self.form.handle_left_right(true),
            KeyCode::Backspace => self.form.handle_backspace(),
            KeyCode::Delete => self.form.handle_delete(),
            KeyCode::Enter => self.submit_form(),
            KeyCode::Char(c) => self.form.handle_char(c),
            _ => {}
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => self.apply_confirm(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.confirm = None;
                self.state = AppState::TaskList;
            }
            _ => {}
        }
    }

    /// Render the header with summary counters.
    fn render_header(&self, f: &mut Frame, area: Rect, pal: &Palette) {
        let header_text = vec![Line::from(vec![
            Span::styled("TASK LIST", Style::default().fg(pal.accent).add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(format_stats(&self.store.stats()), Style::default().fg(pal.fg)),
            Span::raw("  "),
            Span::styled(
                format!("Theme: {}", self.theme.as_str()),
                Style::default().fg(pal.muted).add_modifier(Modifier::ITALIC),
            ),
        ])];
        let header = Paragraph::new(header_text)
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(pal.muted)))
            .alignment(Alignment::Center);
        f.render_widget(header, area);
    }

    /// Render the search box and the active filter and sort settings.
    fn render_filters(&self, f: &mut Frame, area: Rect, pal: &Palette) {
        let label = Style::default().fg(pal.muted);
        let value = Style::default().fg(pal.fg).add_modifier(Modifier::BOLD);
        let search_style = if self.search_active {
            Style::default().fg(pal.accent).add_modifier(Modifier::BOLD)
        } else {
            value
        };
        let line = Line::from(vec![
            Span::styled("Search: ", label),
            Span::styled(self.search.value.clone(), search_style),
            Span::styled("  Status: ", label),
            Span::styled(self.params.status.label(), value),
            Span::styled("  Category: ", label),
            Span::styled(self.params.category.clone().unwrap_or_else(|| "All".into()), value),
            Span::styled("  Priority: ", label),
            Span::styled(self.params.priority.map_or("All", Priority::as_str), value),
            Span::styled("  Sort: ", label),
            Span::styled(self.params.sort.label(), value),
        ]);
        let border = if self.search_active { pal.accent } else { pal.muted };
        let bar = Paragraph::new(line)
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(border)));
        f.render_widget(bar, area);

        if self.search_active {
            let x = area.x + 1 + "Search: ".len() as u16 + self.search.cursor_column() as u16;
            f.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
        }
    }

    /// Render the derived view as a table, or the empty state.
    fn render_task_list(&mut self, f: &mut Frame, area: Rect, pal: &Palette) {
        let title = format!("{} - Press 'h' for help", format_task_count(self.view.len()));
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(pal.muted))
            .title(title);

        if self.view.is_empty() {
            let message = if self.store.is_empty() {
                "No tasks yet. Press 'a' to add your first task."
            } else {
                "No tasks match the current filters. Press 'r' to reset."
            };
            let empty = Paragraph::new(vec![Line::from(""), Line::from(message)])
                .block(block)
                .style(Style::default().fg(pal.muted))
                .alignment(Alignment::Center);
            f.render_widget(empty, area);
            return;
        }

        let now = Utc::now();
        let header = Row::new(["", "Task", "Category", "Priority", "Created"].map(|h| {
            Cell::from(h).style(Style::default().add_modifier(Modifier::BOLD))
        }))
        .style(Style::default().bg(pal.bar_bg).fg(pal.bar_fg))
        .height(1);

        let rows: Vec<Row> = self
            .view
            .iter()
            .filter_map(|id| self.store.get(id))
            .map(|task| {
                let text_style = if task.completed {
                    Style::default().fg(pal.muted).add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default().fg(pal.fg)
                };
                Row::new(vec![
                    Cell::from(format_checkbox(task.completed)),
                    Cell::from(task.text.clone()).style(text_style),
                    Cell::from(task.category.clone()).style(Style::default().fg(category_color(&task.category))),
                    Cell::from(task.priority.as_str()).style(Style::default().fg(priority_color(task.priority))),
                    Cell::from(format_created_relative(task.created_at, now)).style(Style::default().fg(pal.muted)),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(4),  // Checkbox
            Constraint::Min(20),    // Text
            Constraint::Length(10), // Category
            Constraint::Length(8),  // Priority
            Constraint::Length(13), // Created
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(Style::default().bg(pal.highlight_bg).fg(pal.highlight_fg))
            .highlight_symbol(">> ");

        f.render_stateful_widget(table, area, &mut self.list_state);
    }

    /// Render the add panel or edit modal.
    fn render_form(&self, f: &mut Frame, area: Rect, pal: &Palette) {
        let title = if self.state == AppState::EditTask { "Edit Task" } else { "Add Task" };
        let area = centered_rect(60, 40, area);
        f.render_widget(Clear, area);

        let field_style = |field: usize| {
            if self.form.current_field == field {
                Style::default().fg(pal.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(pal.fg)
            }
        };
        let text = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("Task:     ", field_style(TEXT_FIELD)),
                Span::raw(self.form.text.value.clone()),
            ]),
            Line::from(vec![
                Span::styled("Category: ", field_style(CATEGORY_FIELD)),
                Span::raw(format!("< {} >", self.form.selected_category())),
            ]),
            Line::from(vec![
                Span::styled("Priority: ", field_style(PRIORITY_FIELD)),
                Span::styled(
                    format!("< {} >", self.form.selected_priority()),
                    Style::default().fg(priority_color(self.form.selected_priority())),
                ),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "Tab: next field  ←/→: change  Enter: save  Esc: cancel",
                Style::default().fg(pal.muted),
            )),
        ];
        let popup = Paragraph::new(text)
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(pal.accent)),
            )
            .style(Style::default().bg(pal.bg).fg(pal.fg))
            .wrap(Wrap { trim: false });
        f.render_widget(popup, area);

        if self.form.current_field == TEXT_FIELD {
            let x = area.x + 1 + "Task:     ".len() as u16 + self.form.text.cursor_column() as u16;
            f.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 2));
        }
    }

    fn render_help(&self, f: &mut Frame, area: Rect, pal: &Palette) {
        let area = centered_rect(60, 70, area);
        f.render_widget(Clear, area);
        let lines: Vec<Line> = [
            ("a", "Add task"),
            ("e / Enter", "Edit selected task"),
            ("Space / x", "Toggle complete"),
            ("d / Del", "Delete selected task"),
            ("c", "Clear completed tasks"),
            ("/ or Ctrl+K", "Search"),
            ("s", "Cycle status filter"),
            ("g", "Cycle category filter"),
            ("p", "Cycle priority filter"),
            ("o", "Cycle sort order"),
            ("r", "Reset filters"),
            ("t", "Toggle light/dark theme"),
            ("j/k, ↑/↓", "Move selection"),
            ("q", "Quit"),
        ]
        .iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(format!("{:<14}", key), Style::default().fg(pal.accent).add_modifier(Modifier::BOLD)),
                Span::raw(*desc),
            ])
        })
        .collect();
        let help = Paragraph::new(lines)
            .block(Block::default().title("Help").borders(Borders::ALL))
            .style(Style::default().bg(pal.bg).fg(pal.fg));
        f.render_widget(help, area);
    }

    /// Render a confirmation dialog for destructive actions.
    fn render_confirm(&self, f: &mut Frame, area: Rect, pal: &Palette) {
        let area = centered_rect(50, 25, area);
        f.render_widget(Clear, area);

        let prompt = self.confirm.as_ref().map(ConfirmAction::prompt).unwrap_or_default();
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(prompt, Style::default().add_modifier(Modifier::BOLD))),
            Line::from(""),
            Line::from("This action cannot be undone."),
            Line::from("Press 'y' to confirm, 'n' to cancel"),
        ];
        let paragraph = Paragraph::new(text)
            .block(
                Block::default()
                    .title("Confirm Action")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(priority_color(Priority::High))),
            )
            .style(Style::default().bg(pal.bg).fg(pal.fg))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    /// Render the status bar, showing the toast when one is active.
    fn render_status_bar(&self, f: &mut Frame, area: Rect, pal: &Palette) {
        let status_text = match &self.toast {
            Some(toast) => toast.message.clone(),
            None if self.search_active => "Search: type to filter (Esc to clear, Enter to confirm)".to_string(),
            None => match self.state {
                AppState::TaskList => format!("{} | a: add  /: search  h: help  q: quit", format_task_count(self.view.len())),
                AppState::AddTask => "Add New Task".to_string(),
                AppState::EditTask => "Edit Task".to_string(),
                AppState::Help => "Help".to_string(),
                AppState::Confirm => "Confirm Action".to_string(),
            },
        };
        let status = Paragraph::new(status_text)
            .style(Style::default().bg(pal.bar_bg).fg(pal.bar_fg))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    /// Main render function that dispatches to the view renderers.
    pub fn render(&mut self, f: &mut Frame) {
        let pal = palette(self.theme);
        f.render_widget(Block::default().style(Style::default().bg(pal.bg).fg(pal.fg)), f.area());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(f.area());

        self.render_header(f, chunks[0], &pal);
        self.render_filters(f, chunks[1], &pal);
        self.render_task_list(f, chunks[2], &pal);

        match self.state {
            AppState::TaskList => {}
            AppState::AddTask | AppState::EditTask => self.render_form(f, chunks[2], &pal),
            AppState::Help => self.render_help(f, chunks[2], &pal),
            AppState::Confirm => self.render_confirm(f, chunks[2], &pal),
        }

        self.render_status_bar(f, chunks[3], &pal);
    }

    /// Main event loop for the TUI application.
    ///
    /// Handles rendering, toast expiry and input until the user exits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;
            self.tick(Instant::now());

            if event::poll(POLL_INTERVAL)? {
                if let Event::Key(key) = event::read()? {
                    if self.handle_key(key) {
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::StatusFilter;
    use crate::persist::{MemoryStore, Persistence};
    use ratatui::backend::TestBackend;

    fn app() -> App<MemoryStore> {
        App::new(TaskStore::open(Persistence::new(MemoryStore::new())))
    }

    fn press(app: &mut App<MemoryStore>, code: KeyCode) -> bool {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(app: &mut App<MemoryStore>, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn add(app: &mut App<MemoryStore>, text: &str) {
        press(app, KeyCode::Char('a'));
        type_str(app, text);
        press(app, KeyCode::Enter);
    }

    fn toast(app: &App<MemoryStore>) -> Option<&str> {
        app.toast.as_ref().map(|t| t.message.as_str())
    }

    #[test]
    fn add_task_through_form() {
        let mut app = app();
        add(&mut app, "Buy milk");
        assert_eq!(app.state, AppState::TaskList);
        assert_eq!(app.store.len(), 1);
        assert_eq!(app.store.all()[0].text, "Buy milk");
        assert_eq!(app.store.all()[0].category, "work");
        assert_eq!(app.store.all()[0].priority, Priority::Medium);
        assert_eq!(app.view.len(), 1);
        assert_eq!(toast(&app), Some("Task added successfully!"));
    }

    #[test]
    fn blank_add_keeps_form_open() {
        let mut app = app();
        add(&mut app, "   ");
        assert_eq!(app.state, AppState::AddTask);
        assert!(app.store.is_empty());
        assert_eq!(toast(&app), Some("Task text is required"));
    }

    #[test]
    fn edit_selected_task() {
        let mut app = app();
        add(&mut app, "Buy milk");
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.state, AppState::EditTask);
        assert!(app.editing.is_some());
        type_str(&mut app, " today");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);

        let task = &app.store.all()[0];
        assert_eq!(task.text, "Buy milk today");
        assert_eq!(task.category, "personal");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(app.state, AppState::TaskList);
        assert!(app.editing.is_none());
        assert_eq!(toast(&app), Some("Task updated successfully!"));
    }

    #[test]
    fn escape_closes_modal_without_saving() {
        let mut app = app();
        add(&mut app, "Keep");
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, " changed");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state, AppState::TaskList);
        assert!(app.editing.is_none());
        assert_eq!(app.store.all()[0].text, "Keep");
    }

    #[test]
    fn toggle_and_clear_completed() {
        let mut app = app();
        add(&mut app, "one");
        add(&mut app, "two");
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.store.stats().completed, 1);

        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.state, AppState::Confirm);
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.state, AppState::TaskList);
        assert_eq!(app.store.len(), 1);
        assert_eq!(toast(&app), Some("1 completed task(s) deleted!"));
    }

    #[test]
    fn clear_with_nothing_completed_only_notifies() {
        let mut app = app();
        add(&mut app, "one");
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.state, AppState::TaskList);
        assert_eq!(toast(&app), Some("No completed tasks to clear!"));
        assert_eq!(app.store.len(), 1);
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut app = app();
        add(&mut app, "doomed");
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.store.len(), 1);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert!(app.store.is_empty());
        assert!(app.view.is_empty());
        assert_eq!(app.list_state.selected(), None);
        assert_eq!(toast(&app), Some("Task deleted successfully!"));
    }

    #[test]
    fn search_filters_view() {
        let mut app = app();
        add(&mut app, "Buy milk");
        add(&mut app, "Finish report");
        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "MILK");
        assert_eq!(app.view.len(), 1);
        assert_eq!(app.store.get(&app.view[0]).unwrap().text, "Buy milk");
        press(&mut app, KeyCode::Esc);
        assert!(!app.search_active);
        assert_eq!(app.view.len(), 2);
    }

    #[test]
    fn ctrl_k_focuses_search() {
        let mut app = app();
        app.handle_key(KeyEvent::new(KeyCode::Char('k'), KeyModifiers::CONTROL));
        assert!(app.search_active);
        // 'q' is text while searching.
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert_eq!(app.search.value, "q");
    }

    #[test]
    fn filter_cyclers() {
        let mut app = app();
        add(&mut app, "pending");
        add(&mut app, "done");
        press(&mut app, KeyCode::Char(' '));

        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.params.status, StatusFilter::Completed);
        assert_eq!(app.view.len(), 1);

        press(&mut app, KeyCode::Char('r'));
        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.params.category.as_deref(), Some("work"));
        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.params.category.as_deref(), Some("personal"));
        assert!(app.view.is_empty());

        press(&mut app, KeyCode::Char('r'));
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.params.priority, Some(Priority::Low));
        assert!(app.view.is_empty());
    }

    #[test]
    fn theme_toggle_persists() {
        let mut app = app();
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.theme, Theme::Dark);
        assert_eq!(app.store.theme(), Theme::Dark);
    }

    #[test]
    fn toast_expires_after_duration() {
        let mut app = app();
        app.show_toast("hello");
        app.tick(Instant::now());
        assert!(app.toast.is_some());
        app.tick(Instant::now() + TOAST_DURATION + Duration::from_millis(10));
        assert!(app.toast.is_none());
    }

    #[test]
    fn quit_key() {
        let mut app = app();
        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn renders_every_state() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        add(&mut app, "Render me");
        for code in [KeyCode::Char('a'), KeyCode::Esc, KeyCode::Char('h'), KeyCode::Esc, KeyCode::Char('d')] {
            press(&mut app, code);
            terminal.draw(|f| app.render(f)).unwrap();
        }
        assert_eq!(app.state, AppState::Confirm);
    }

    #[test]
    fn search_cursor_follows_wide_characters() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "日本");
        terminal.draw(|f| app.render(f)).unwrap();
        let pos = terminal.backend_mut().get_cursor_position().unwrap();
        assert_eq!(pos.x, 1 + "Search: ".len() as u16 + 4);
        assert_eq!(pos.y, 4);
    }
}
