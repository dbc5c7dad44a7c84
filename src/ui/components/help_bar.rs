//! Contextual help bar.
//!
//! A single line of key hints for whichever component has focus.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::events::{get_context_hints, KeyContext};
use crate::ui::theme::theme;

/// Render the hints for `context` into `area`.
pub fn render_context_help(frame: &mut Frame, area: Rect, context: KeyContext) {
    let line = Line::from(parse_hints_to_spans(get_context_hints(context)));
    frame.render_widget(Paragraph::new(line), area);
}

/// Split hint text into spans, styling bracketed keys apart from their
/// descriptions.
fn parse_hints_to_spans(hints: &str) -> Vec<Span<'static>> {
    let t = theme();
    let key_style = Style::default().fg(t.accent);
    let text_style = Style::default().fg(t.muted);

    let mut spans = Vec::new();
    let mut rest = hints;
    while !rest.is_empty() {
        let open = rest.find('[');
        let close = open.and_then(|start| rest[start..].find(']').map(|end| start + end));
        match (open, close) {
            (Some(start), Some(end)) => {
                if start > 0 {
                    spans.push(Span::styled(rest[..start].to_string(), text_style));
                }
                spans.push(Span::styled(rest[start..=end].to_string(), key_style));
                rest = &rest[end + 1..];
            }
            _ => {
                spans.push(Span::styled(rest.to_string(), text_style));
                rest = "";
            }
        }
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_key() {
        let spans = parse_hints_to_spans("[j/k] move");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].content, "[j/k]");
        assert_eq!(spans[1].content, " move");
    }

    #[test]
    fn test_multiple_keys() {
        let spans = parse_hints_to_spans("[j/k] move  [s] sort  [q] quit");
        assert_eq!(spans.len(), 6);
    }

    #[test]
    fn test_empty() {
        assert!(parse_hints_to_spans("").is_empty());
    }

    #[test]
    fn test_no_brackets() {
        assert_eq!(parse_hints_to_spans("just text").len(), 1);
    }

    #[test]
    fn test_unclosed_bracket_is_text() {
        let spans = parse_hints_to_spans("[open");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].content, "[open");
    }
}
