//! TUI module for browsing to a Markdown document.
//!
//! The terminal UI draws on stderr's alternate screen so stdout stays free
//! for printing the picked location to a calling shell.

pub mod app;
pub mod event;
pub mod theme;
pub mod ui;
pub mod widgets;

use std::io::{self, Stderr};
use std::panic;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::error::{MarknavError, Result};
use crate::location::Location;

pub use app::App;
pub use event::{AppEvent, Dispatched, EventResult, PaneMessage, Router};

/// How long to wait for input before redrawing.
const TICK_RATE: Duration = Duration::from_millis(250);

type Backend = CrosstermBackend<Stderr>;

/// Run the TUI until the user quits. Returns the last picked location.
pub fn run(mut app: App) -> Result<Option<Location>> {
    install_panic_hook();
    let mut terminal = setup_terminal().map_err(MarknavError::Terminal)?;

    let result = run_loop(&mut terminal, &mut app);

    // Restore the terminal even when the loop failed
    let restored = restore_terminal(&mut terminal).map_err(MarknavError::Terminal);
    result?;
    restored?;

    Ok(app.location)
}

fn run_loop(terminal: &mut Terminal<Backend>, app: &mut App) -> Result<()> {
    let mut router = Router::new();

    while !app.should_quit {
        terminal
            .draw(|frame| ui::render(app, frame))
            .map_err(MarknavError::Terminal)?;
        event::handle_events(app, &mut router, TICK_RATE).map_err(MarknavError::Terminal)?;
    }

    Ok(())
}

fn setup_terminal() -> io::Result<Terminal<Backend>> {
    enable_raw_mode()?;
    let mut stderr = io::stderr();
    execute!(stderr, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stderr))
}

fn restore_terminal(terminal: &mut Terminal<Backend>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

/// Restore the terminal before printing a panic.
fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}
