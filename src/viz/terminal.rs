use std::{
    io::{self, stdout, Stdout},
    panic,
};

use crossterm::{
    cursor::{Hide, Show},
    event::{Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Take over the screen for the viewer
///
/// The terminal is handed back by [`leave`], or by the panic hook installed here.
pub fn enter() -> io::Result<Tui> {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = leave();
        default_hook(info);
    }));

    execute!(stdout(), EnterAlternateScreen, Hide)?;
    enable_raw_mode()?;
    Terminal::new(CrosstermBackend::new(stdout()))
}

pub fn leave() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen, Show)
}

/// Key of a press event, ignoring releases and repeats
pub fn pressed_key(event: &Event) -> Option<KeyCode> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(key.code),
        _ => None,
    }
}
