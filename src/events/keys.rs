//! Key hints for each focus context.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// The component that currently receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyContext {
    /// The data table.
    Table,
    /// A text field.
    Input,
    /// A password field.
    PasswordInput,
}

/// Hint text for a context. Keys are written in brackets.
pub fn get_context_hints(context: KeyContext) -> &'static str {
    match context {
        KeyContext::Table => {
            "[j/k] move  [h/l] column  [s] sort  [Space] select  [Ctrl+L] loading  [Tab] next  [q] quit"
        }
        KeyContext::Input => "[type] edit  [Ctrl+X] clear  [Ctrl+W] delete word  [Tab] next  [Ctrl+C] quit",
        KeyContext::PasswordInput => {
            "[type] edit  [Ctrl+R] show/hide  [Ctrl+X] clear  [Tab] next  [Ctrl+C] quit"
        }
    }
}

/// Whether the key always quits, regardless of focus.
pub fn is_force_quit(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}
