//! Loading indicators.
//!
//! [`LoadingIndicator`] is the placeholder the table shows instead of its
//! rows while loading. [`InlineLoader`] is the single-glyph spinner drawn
//! inside a loading input field. Both advance one frame per tick.

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Padding, Paragraph},
    Frame,
};

use crate::ui::theme::theme;

/// Spinner animation frames.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Default placeholder text.
const DEFAULT_MESSAGE: &str = "Loading...";

/// A loading placeholder with an animated spinner.
#[derive(Debug, Clone)]
pub struct LoadingIndicator {
    /// The message to display.
    message: String,
    /// Current spinner frame index.
    spinner_state: usize,
    /// Whether the indicator is active.
    active: bool,
}

impl Default for LoadingIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingIndicator {
    /// Create an inactive indicator with the default message.
    pub fn new() -> Self {
        Self::with_message(DEFAULT_MESSAGE)
    }

    /// Create an inactive indicator with a custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            spinner_state: 0,
            active: false,
        }
    }

    /// Get the message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Start animating from the first frame.
    pub fn start(&mut self) {
        self.active = true;
        self.spinner_state = 0;
    }

    /// Stop animating.
    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Check if the indicator is active.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Advance the spinner. Does nothing while inactive.
    pub fn tick(&mut self) {
        if self.active {
            self.spinner_state = (self.spinner_state + 1) % SPINNER_FRAMES.len();
        }
    }

    /// The spinner glyph for the current frame.
    pub fn spinner_frame(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_state]
    }

    /// Spinner and message, or an empty string while inactive.
    pub fn text(&self) -> String {
        if self.active {
            format!("{} {}", self.spinner_frame(), self.message)
        } else {
            String::new()
        }
    }

    /// Render the placeholder left-aligned with one cell of padding.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.active {
            return;
        }

        let paragraph = Paragraph::new(self.text())
            .style(Style::default().fg(theme().muted))
            .block(Block::default().padding(Padding::uniform(1)));

        frame.render_widget(paragraph, area);
    }
}

/// A one-glyph spinner for embedding in other widgets.
#[derive(Debug, Clone, Default)]
pub struct InlineLoader {
    /// Current spinner frame index.
    spinner_state: usize,
    /// Whether the loader is active.
    active: bool,
}

impl InlineLoader {
    /// Create an inactive loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the loader.
    pub fn start(&mut self) {
        self.active = true;
    }

    /// Stop the loader.
    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Check if active.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Advance the animation.
    pub fn tick(&mut self) {
        if self.active {
            self.spinner_state = (self.spinner_state + 1) % SPINNER_FRAMES.len();
        }
    }

    /// The current glyph, or a blank while inactive.
    pub fn frame(&self) -> &'static str {
        if self.active {
            SPINNER_FRAMES[self.spinner_state]
        } else {
            " "
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator_defaults() {
        let loader = LoadingIndicator::new();
        assert_eq!(loader.message(), "Loading...");
        assert!(!loader.is_active());
        assert!(loader.text().is_empty());
    }

    #[test]
    fn test_indicator_text_when_active() {
        let mut loader = LoadingIndicator::with_message("Fetching rows...");
        loader.start();
        assert!(loader.text().ends_with("Fetching rows..."));
        assert!(loader.text().starts_with(SPINNER_FRAMES[0]));
    }

    #[test]
    fn test_indicator_tick_wraps() {
        let mut loader = LoadingIndicator::new();
        loader.start();
        for _ in 0..SPINNER_FRAMES.len() {
            loader.tick();
        }
        assert_eq!(loader.spinner_state, 0);
    }

    #[test]
    fn test_indicator_tick_inactive() {
        let mut loader = LoadingIndicator::new();
        loader.tick();
        assert_eq!(loader.spinner_state, 0);
    }

    #[test]
    fn test_inline_loader_frame() {
        let mut loader = InlineLoader::new();
        assert_eq!(loader.frame(), " ");

        loader.start();
        assert_eq!(loader.frame(), SPINNER_FRAMES[0]);
        loader.tick();
        assert_eq!(loader.frame(), SPINNER_FRAMES[1]);

        loader.stop();
        assert!(!loader.is_active());
    }
}
