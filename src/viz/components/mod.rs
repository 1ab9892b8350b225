mod grid;
mod help;
mod log;
mod plot;

use crossterm::event::Event;
use ratatui::widgets::WidgetRef;

pub use self::log::Logs;
pub use grid::GridView;
pub use help::render_help;
pub use plot::Plots;

/// A tab of the app that can react to input
pub trait Component: WidgetRef {
    /// **Returns** whether the event was consumed
    fn handle_ui_event(&mut self, event: &Event) -> bool;
}
