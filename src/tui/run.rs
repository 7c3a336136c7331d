//! TUI entry point and terminal setup.

use std::{io, path::Path};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen}
};
use ratatui::{prelude::CrosstermBackend, Terminal};
use tracing::info;

use crate::persist::{FileStore, Persistence};
use crate::store::TaskStore;
use crate::tui::app::App;

/// Initialise and run the terminal user interface over the data directory.
pub fn run_tui(data_dir: &Path) -> io::Result<()> {
    let store = TaskStore::open(Persistence::new(FileStore::new(data_dir)));
    let mut app = App::new(store);
    info!(data_dir = %data_dir.display(), "starting UI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}
