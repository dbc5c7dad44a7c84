//! Theme and styling configuration.
//!
//! Components read their colors from a process-wide theme installed once at
//! startup with [`init_theme`]. Until then [`theme`] returns the dark palette.

use std::sync::OnceLock;

use ratatui::style::Color;
use tracing::{debug, warn};

static THEME: OnceLock<Theme> = OnceLock::new();

/// Color theme shared by the components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Primary foreground color.
    pub fg: Color,
    /// Secondary text (placeholders, helper text, empty states).
    pub muted: Color,
    /// Idle border color.
    pub border: Color,
    /// Border color of the focused component.
    pub focus: Color,
    /// Accent for active sort glyphs and spinners.
    pub accent: Color,
    /// Error text and invalid borders.
    pub error: Color,
    /// Table header text.
    pub header: Color,
    /// Background of selected rows.
    pub selected_bg: Color,
    /// Background of the keyboard cursor row.
    pub cursor_bg: Color,
    /// Background of the filled input variant.
    pub filled_bg: Color,
    /// Text of disabled inputs.
    pub disabled: Color,
}

impl Theme {
    /// Palette for dark terminals.
    pub fn dark() -> Self {
        Self {
            fg: Color::White,
            muted: Color::DarkGray,
            border: Color::Gray,
            focus: Color::Blue,
            accent: Color::Cyan,
            error: Color::Red,
            header: Color::White,
            selected_bg: Color::Indexed(17),
            cursor_bg: Color::DarkGray,
            filled_bg: Color::Indexed(236),
            disabled: Color::DarkGray,
        }
    }

    /// Palette for light terminals.
    pub fn light() -> Self {
        Self {
            fg: Color::Black,
            muted: Color::Gray,
            border: Color::Gray,
            focus: Color::Blue,
            accent: Color::Blue,
            error: Color::Red,
            header: Color::Black,
            selected_bg: Color::Indexed(153),
            cursor_bg: Color::Indexed(252),
            filled_bg: Color::Indexed(254),
            disabled: Color::Gray,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

/// Resolve a theme by its configured name.
///
/// Unknown names fall back to the dark theme.
pub fn load_theme(name: &str) -> Theme {
    match name.to_ascii_lowercase().as_str() {
        "dark" => Theme::dark(),
        "light" => Theme::light(),
        other => {
            warn!(theme = other, "Unknown theme, using dark");
            Theme::dark()
        }
    }
}

/// Install the process-wide theme. Only the first call takes effect.
pub fn init_theme(theme: Theme) {
    if THEME.set(theme).is_err() {
        debug!("Theme already initialized, ignoring");
    }
}

/// The active theme.
pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_theme_by_name() {
        assert_eq!(load_theme("light"), Theme::light());
        assert_eq!(load_theme("DARK"), Theme::dark());
    }

    #[test]
    fn test_load_theme_unknown_falls_back() {
        assert_eq!(load_theme("solarized"), Theme::dark());
    }

    #[test]
    fn test_default_is_dark() {
        assert_eq!(Theme::default(), Theme::dark());
    }
}
