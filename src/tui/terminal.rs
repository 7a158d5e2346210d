//! Terminal setup and teardown
//!
//! This module handles initializing and restoring the terminal state,
//! including setting up the panic hook to restore the terminal on crash.

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;

use crate::config::Settings;
use crate::logging;
use crate::storage::Storage;

use super::app::App;
use super::event::EventHandler;
use super::handler::handle_event;

/// Type alias for our terminal
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> Result<Tui> {
    // Restore the terminal before the panic message is printed
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    Ok(terminal)
}

/// Restore the terminal to its original state
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Run the TUI until the user quits
///
/// Logging is switched off while the alternate screen is active.
pub fn run_tui(storage: &Storage, settings: &mut Settings) -> Result<()> {
    let log_level = logging::silence();
    let mut terminal = init_terminal()?;

    let result = event_loop(&mut terminal, storage, settings);

    restore_terminal()?;
    logging::restore(log_level);
    result
}

fn event_loop(terminal: &mut Tui, storage: &Storage, settings: &mut Settings) -> Result<()> {
    let mut app = App::new(storage, settings);
    let events = EventHandler::default();

    while !app.should_quit {
        terminal.draw(|frame| {
            super::views::render(frame, &mut app);
        })?;

        handle_event(&mut app, events.next()?)?;
    }

    Ok(())
}
