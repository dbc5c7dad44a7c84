//! Text input field component.
//!
//! [`InputField`] is a controlled component: the caller owns the text value
//! and passes it into every call. Edits come back as
//! [`InputFieldAction::Change`] and only become visible once the caller
//! stores the new value. The field itself keeps only view state: the cursor
//! position and whether a password is currently revealed.
//!
//! The field supports:
//! - A label above and helper or error text below
//! - Password masking with a local reveal toggle
//! - A clear action that reports an empty value
//! - A loading spinner; loading and disabled fields do not accept edits
//! - Three sizes and three visual variants

use std::borrow::Cow;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Padding, Paragraph},
    Frame,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::loading::InlineLoader;
use crate::ui::theme::{theme, Theme};

/// Character drawn for each masked character.
const MASK_CHAR: &str = "•";

/// Glyph of the clear button.
const CLEAR_GLYPH: &str = "✕";

/// Glyph of the reveal toggle while the password is hidden.
const REVEAL_GLYPH: &str = "◉";

/// Glyph of the reveal toggle while the password is shown.
const HIDE_GLYPH: &str = "○";

/// Columns taken by each trailing button or spinner.
const ADORNMENT_WIDTH: u16 = 2;

/// The logical type of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputType {
    /// Plain text.
    #[default]
    Text,
    /// Masked text.
    Password,
}

/// Visual style preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputVariant {
    /// Shaded background, border only visible on focus or error.
    Filled,
    /// Visible border.
    #[default]
    Outlined,
    /// No border, no background.
    Ghost,
}

impl InputVariant {
    fn borders(self) -> Borders {
        match self {
            InputVariant::Filled | InputVariant::Outlined => Borders::ALL,
            InputVariant::Ghost => Borders::NONE,
        }
    }

    fn background(self, theme: &Theme) -> Option<Color> {
        match self {
            InputVariant::Filled => Some(theme.filled_bg),
            InputVariant::Outlined | InputVariant::Ghost => None,
        }
    }

    fn idle_border(self, theme: &Theme) -> Color {
        match self {
            InputVariant::Filled => theme.filled_bg,
            InputVariant::Outlined | InputVariant::Ghost => theme.border,
        }
    }
}

/// Size preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputSize {
    /// Compact, no padding.
    Sm,
    /// Regular.
    #[default]
    Md,
    /// Roomy, with vertical padding.
    Lg,
}

impl InputSize {
    fn padding(self) -> Padding {
        match self {
            InputSize::Sm => Padding::ZERO,
            InputSize::Md => Padding::horizontal(1),
            InputSize::Lg => Padding::new(2, 2, 1, 1),
        }
    }

    fn border_type(self) -> BorderType {
        match self {
            InputSize::Sm => BorderType::Plain,
            InputSize::Md | InputSize::Lg => BorderType::Rounded,
        }
    }
}

/// Action returned from the input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputFieldAction {
    /// The value should change to this text. Edits and clears both use it.
    Change(String),
}

/// The message shown below the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMessage<'a> {
    /// Helper text, shown while valid.
    Helper(&'a str),
    /// Error text, shown while invalid.
    Error(&'a str),
}

/// Geometry of the last render, used for mouse hit testing.
#[derive(Debug, Clone, Copy, Default)]
struct FieldLayout {
    area: Rect,
    text: Rect,
    scroll: usize,
    clear: Option<Rect>,
    reveal: Option<Rect>,
}

/// A labeled single-line text input.
#[derive(Debug, Clone, Default)]
pub struct InputField {
    /// Label above the input.
    label: Option<String>,
    /// Text shown while the value is empty.
    placeholder: String,
    /// Text shown below the input while valid.
    helper_text: Option<String>,
    /// Text shown below the input while invalid.
    error_message: Option<String>,
    /// Whether the input is disabled.
    disabled: bool,
    /// Whether the value is invalid.
    invalid: bool,
    /// Whether the input is loading.
    loading: bool,
    /// Whether the clear button is offered.
    clearable: bool,
    /// Logical input type.
    input_type: InputType,
    /// Visual variant.
    variant: InputVariant,
    /// Size preset.
    size: InputSize,
    /// Whether a password value is currently shown in plain text.
    password_revealed: bool,
    /// Cursor position as a char index into the caller's value.
    cursor: usize,
    /// Spinner shown while loading.
    spinner: InlineLoader,
    /// Geometry of the last render.
    layout: Option<FieldLayout>,
}

impl InputField {
    /// Create a text field with default size and variant.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the placeholder.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set the helper text.
    pub fn with_helper_text(mut self, text: impl Into<String>) -> Self {
        self.helper_text = Some(text.into());
        self
    }

    /// Set the error message.
    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    /// Set the input type.
    pub fn with_type(mut self, input_type: InputType) -> Self {
        self.input_type = input_type;
        self
    }

    /// Set the visual variant.
    pub fn with_variant(mut self, variant: InputVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Set the size preset.
    pub fn with_size(mut self, size: InputSize) -> Self {
        self.size = size;
        self
    }

    /// Offer the clear button.
    pub fn with_clearable(mut self, clearable: bool) -> Self {
        self.clearable = clearable;
        self
    }

    /// Set the disabled flag.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set the invalid flag.
    pub fn with_invalid(mut self, invalid: bool) -> Self {
        self.invalid = invalid;
        self
    }

    /// Set the loading flag.
    pub fn with_loading(mut self, loading: bool) -> Self {
        self.set_loading(loading);
        self
    }

    /// Set the disabled flag.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Set the invalid flag.
    pub fn set_invalid(&mut self, invalid: bool) {
        self.invalid = invalid;
    }

    /// Set the loading flag.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        if loading {
            self.spinner.start();
        } else {
            self.spinner.stop();
        }
    }

    /// Set the error message.
    pub fn set_error_message(&mut self, message: Option<String>) {
        self.error_message = message;
    }

    /// The label, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// The configured input type.
    pub fn input_type(&self) -> InputType {
        self.input_type
    }

    /// The variant.
    pub fn variant(&self) -> InputVariant {
        self.variant
    }

    /// The size preset.
    pub fn size(&self) -> InputSize {
        self.size
    }

    /// Whether the field is disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Whether the field is invalid.
    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    /// Whether the field is loading.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether a password value is currently revealed.
    pub fn is_password_revealed(&self) -> bool {
        self.password_revealed
    }

    /// The cursor position clamped to `value`.
    pub fn cursor(&self, value: &str) -> usize {
        self.cursor.min(char_count(value))
    }

    /// The type the input is rendered as.
    ///
    /// A revealed password renders as plain text while staying a password
    /// field logically.
    pub fn effective_input_type(&self) -> InputType {
        match self.input_type {
            InputType::Password if self.password_revealed => InputType::Text,
            other => other,
        }
    }

    /// Whether the field accepts edits.
    pub fn is_interactive(&self) -> bool {
        !self.disabled && !self.loading
    }

    /// Whether the clear button is shown for `value`.
    pub fn shows_clear_button(&self, value: &str) -> bool {
        self.clearable && !value.is_empty() && !self.disabled && !self.loading
    }

    /// Whether the password reveal toggle is shown.
    ///
    /// The toggle stays available while loading; only disabling hides it.
    pub fn shows_reveal_toggle(&self) -> bool {
        self.input_type == InputType::Password && !self.disabled
    }

    /// The message below the input. Helper and error text never show together.
    pub fn message(&self) -> Option<FieldMessage<'_>> {
        if self.invalid {
            self.error_message.as_deref().map(FieldMessage::Error)
        } else {
            self.helper_text.as_deref().map(FieldMessage::Helper)
        }
    }

    /// The text drawn inside the input for `value`.
    pub fn display_text<'a>(&'a self, value: &'a str) -> Cow<'a, str> {
        if value.is_empty() {
            Cow::Borrowed(&self.placeholder)
        } else if self.effective_input_type() == InputType::Password {
            Cow::Owned(MASK_CHAR.repeat(char_count(value)))
        } else {
            Cow::Borrowed(value)
        }
    }

    /// Rows needed by the input box alone.
    fn box_height(&self) -> u16 {
        let padding = self.size.padding();
        let borders = self.variant.borders();
        let mut height = 1 + padding.top + padding.bottom;
        if borders.contains(Borders::TOP) {
            height += 1;
        }
        if borders.contains(Borders::BOTTOM) {
            height += 1;
        }
        height
    }

    /// Rows needed to render the field, including label and message.
    pub fn height(&self) -> u16 {
        let label = u16::from(self.label.is_some());
        let message = u16::from(self.message().is_some());
        label + self.box_height() + message
    }

    /// Flip the password reveal state. Never reported to the caller.
    pub fn toggle_password_visibility(&mut self) {
        self.password_revealed = !self.password_revealed;
        debug!(revealed = self.password_revealed, "Password visibility toggled");
    }

    /// Trigger the clear button.
    ///
    /// Reports an empty value through the normal change action. Does nothing
    /// unless the clear button is shown for `value`.
    pub fn clear(&mut self, value: &str) -> Option<InputFieldAction> {
        if !self.shows_clear_button(value) {
            return None;
        }
        debug!(label = ?self.label, "Input cleared");
        self.cursor = 0;
        Some(InputFieldAction::Change(String::new()))
    }

    /// Advance the loading spinner.
    pub fn tick(&mut self) {
        self.spinner.tick();
    }

    /// Whether a screen position lies inside the last rendered area.
    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.layout
            .is_some_and(|layout| rect_contains(layout.area, column, row))
    }

    /// Handle keyboard input against the caller's current `value`.
    ///
    /// Returns a change action when the value should change. While disabled
    /// or loading only the reveal toggle responds.
    pub fn handle_input(&mut self, key: KeyEvent, value: &str) -> Option<InputFieldAction> {
        if (key.code, key.modifiers) == (KeyCode::Char('r'), KeyModifiers::CONTROL) {
            if self.shows_reveal_toggle() {
                self.toggle_password_visibility();
            }
            return None;
        }

        if !self.is_interactive() {
            return None;
        }

        let cursor = self.cursor(value);
        let len = char_count(value);

        match (key.code, key.modifiers) {
            // Ctrl+X - clear button
            (KeyCode::Char('x'), KeyModifiers::CONTROL) => self.clear(value),
            // Ctrl+A - move to start
            (KeyCode::Char('a'), KeyModifiers::CONTROL) => {
                self.cursor = 0;
                None
            }
            // Ctrl+E - move to end
            (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
                self.cursor = len;
                None
            }
            // Ctrl+U - clear line
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                if value.is_empty() {
                    None
                } else {
                    self.cursor = 0;
                    Some(InputFieldAction::Change(String::new()))
                }
            }
            // Ctrl+W - delete word before cursor
            (KeyCode::Char('w'), KeyModifiers::CONTROL) => {
                if cursor == 0 {
                    return None;
                }
                let end = byte_index(value, cursor);
                let before = value[..end].trim_end_matches(|c: char| !c.is_alphanumeric());
                let start = before
                    .char_indices()
                    .rev()
                    .find(|(_, c)| !c.is_alphanumeric())
                    .map(|(i, c)| i + c.len_utf8())
                    .unwrap_or(0);

                let mut next = value.to_string();
                next.replace_range(start..end, "");
                self.cursor = char_count(&value[..start]);
                Some(InputFieldAction::Change(next))
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                let mut next = value.to_string();
                next.insert(byte_index(value, cursor), c);
                self.cursor = cursor + 1;
                Some(InputFieldAction::Change(next))
            }
            (KeyCode::Backspace, _) => {
                if cursor == 0 {
                    return None;
                }
                let mut next = value.to_string();
                next.remove(byte_index(value, cursor - 1));
                self.cursor = cursor - 1;
                Some(InputFieldAction::Change(next))
            }
            (KeyCode::Delete, _) => {
                if cursor >= len {
                    return None;
                }
                let mut next = value.to_string();
                next.remove(byte_index(value, cursor));
                self.cursor = cursor;
                Some(InputFieldAction::Change(next))
            }
            (KeyCode::Left, KeyModifiers::NONE) => {
                self.cursor = cursor.saturating_sub(1);
                None
            }
            (KeyCode::Right, KeyModifiers::NONE) => {
                self.cursor = (cursor + 1).min(len);
                None
            }
            (KeyCode::Home, _) => {
                self.cursor = 0;
                None
            }
            (KeyCode::End, _) => {
                self.cursor = len;
                None
            }
            _ => None,
        }
    }

    /// Handle mouse input against the geometry of the last render.
    ///
    /// Clicking the clear glyph clears, clicking the eye glyph toggles the
    /// reveal state, clicking the text moves the cursor.
    pub fn handle_mouse(&mut self, event: MouseEvent, value: &str) -> Option<InputFieldAction> {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return None;
        }
        let layout = self.layout?;
        let (column, row) = (event.column, event.row);

        if layout.clear.is_some_and(|r| rect_contains(r, column, row)) {
            return self.clear(value);
        }
        if layout.reveal.is_some_and(|r| rect_contains(r, column, row)) {
            if self.shows_reveal_toggle() {
                self.toggle_password_visibility();
            }
            return None;
        }
        if self.is_interactive() && rect_contains(layout.text, column, row) {
            let offset = usize::from(column - layout.text.x) + layout.scroll;
            self.cursor = offset.min(char_count(value));
        }
        None
    }

    /// Render the field.
    ///
    /// # Arguments
    ///
    /// * `frame` - The frame to render to
    /// * `area` - The area to render in
    /// * `value` - The caller's current value
    /// * `focused` - Whether this field has keyboard focus
    pub fn render(&mut self, frame: &mut Frame, area: Rect, value: &str, focused: bool) {
        let t = theme();

        let mut constraints = Vec::with_capacity(3);
        if self.label.is_some() {
            constraints.push(Constraint::Length(1));
        }
        constraints.push(Constraint::Length(self.box_height()));
        if self.message().is_some() {
            constraints.push(Constraint::Length(1));
        }
        let chunks = Layout::vertical(constraints).split(area);
        let mut chunk = chunks.iter().copied();

        if let Some(label) = &self.label {
            let label_area = chunk.next().unwrap_or_default();
            let style = Style::default().fg(t.fg).add_modifier(Modifier::BOLD);
            frame.render_widget(Paragraph::new(label.as_str()).style(style), label_area);
        }

        let box_area = chunk.next().unwrap_or_default();
        let message_area = chunk.next();

        let border_color = if self.invalid {
            t.error
        } else if focused && self.is_interactive() {
            t.focus
        } else {
            self.variant.idle_border(t)
        };
        let mut block_style = Style::default();
        if let Some(bg) = self.variant.background(t) {
            block_style = block_style.bg(bg);
        }
        if self.disabled {
            block_style = block_style.fg(t.disabled).add_modifier(Modifier::DIM);
        }
        let block = Block::default()
            .borders(self.variant.borders())
            .border_type(self.size.border_type())
            .border_style(Style::default().fg(border_color))
            .padding(self.size.padding())
            .style(block_style);
        let inner = block.inner(box_area);
        frame.render_widget(block, box_area);

        // Trailing buttons, right to left: spinner, reveal toggle, clear.
        let show_clear = self.shows_clear_button(value);
        let show_reveal = self.shows_reveal_toggle();
        let adornments = u16::from(show_clear) + u16::from(show_reveal) + u16::from(self.loading);
        let [text_area, trailing] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(adornments * ADORNMENT_WIDTH),
        ])
        .areas(inner);

        let mut slots = (0..adornments).map(|i| {
            Rect::new(trailing.x + i * ADORNMENT_WIDTH, trailing.y, ADORNMENT_WIDTH, 1)
                .intersection(trailing)
        });
        let clear_rect = if show_clear { slots.next() } else { None };
        let reveal_rect = if show_reveal { slots.next() } else { None };
        let spinner_rect = if self.loading { slots.next() } else { None };

        if let Some(rect) = clear_rect {
            let glyph = Span::styled(CLEAR_GLYPH, Style::default().fg(t.muted));
            frame.render_widget(Paragraph::new(glyph), rect);
        }
        if let Some(rect) = reveal_rect {
            let glyph = if self.password_revealed {
                HIDE_GLYPH
            } else {
                REVEAL_GLYPH
            };
            frame.render_widget(
                Paragraph::new(Span::styled(glyph, Style::default().fg(t.muted))),
                rect,
            );
        }
        if let Some(rect) = spinner_rect {
            let glyph = Span::styled(self.spinner.frame(), Style::default().fg(t.accent));
            frame.render_widget(Paragraph::new(glyph), rect);
        }

        let cursor = self.cursor(value);
        let width = usize::from(text_area.width);
        let scroll = if value.is_empty() || width == 0 {
            0
        } else {
            cursor.saturating_sub(width - 1)
        };

        let text_style = if self.disabled {
            Style::default().fg(t.disabled)
        } else if value.is_empty() {
            Style::default().fg(t.muted)
        } else {
            Style::default().fg(t.fg)
        };
        let text = Paragraph::new(self.display_text(value).into_owned())
            .style(text_style)
            .scroll((0, u16::try_from(scroll).unwrap_or(u16::MAX)));
        frame.render_widget(text, text_area);

        if focused && self.is_interactive() {
            let cursor_x = text_area.x + u16::try_from(cursor - scroll).unwrap_or(0);
            if cursor_x < text_area.right() {
                frame.set_cursor_position(Position::new(cursor_x, text_area.y));
            }
        }

        if let (Some(message), Some(message_area)) = (self.message(), message_area) {
            let paragraph = match message {
                FieldMessage::Helper(text) => {
                    Paragraph::new(text).style(Style::default().fg(t.muted))
                }
                FieldMessage::Error(text) => Paragraph::new(text).style(
                    Style::default()
                        .fg(t.error)
                        .add_modifier(Modifier::ITALIC),
                ),
            };
            frame.render_widget(paragraph, message_area);
        }

        self.layout = Some(FieldLayout {
            area,
            text: text_area,
            scroll,
            clear: clear_rect,
            reveal: reveal_rect,
        });
    }
}

/// Number of chars in `value`.
fn char_count(value: &str) -> usize {
    value.chars().count()
}

/// Byte offset of the char at `index`, or the end of `value`.
fn byte_index(value: &str, index: usize) -> usize {
    value
        .char_indices()
        .nth(index)
        .map(|(i, _)| i)
        .unwrap_or(value.len())
}

/// Whether `(column, row)` lies inside `rect`.
fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
}
