//! Event handling for the demo application.
//!
//! Terminal input is polled by [`EventHandler`] and converted into [`Event`]s
//! that drive [`App::update`](crate::app::App::update).

mod handler;
mod keys;

use crossterm::event::{KeyEvent, MouseEvent};

pub use handler::{EventHandler, DEFAULT_TICK_RATE_MS};
pub use keys::{get_context_hints, is_force_quit, KeyContext};

/// An application event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// A mouse button, wheel, or movement event.
    Mouse(MouseEvent),
    /// The terminal was resized.
    Resize(u16, u16),
    /// No input within the tick rate.
    Tick,
}
