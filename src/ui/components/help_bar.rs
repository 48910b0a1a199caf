//! Key hint line at the bottom of the screen.

use ratatui::{layout::Rect, text::Line, text::Span, widgets::Paragraph, Frame};

use crate::events::{get_context_hints, KeyContext};
use crate::ui::theme::Theme;

/// Render the key hints for `context`.
pub fn render_context_help(frame: &mut Frame, area: Rect, context: KeyContext, theme: &Theme) {
    let line = Line::from(hint_spans(get_context_hints(context), theme));
    frame.render_widget(Paragraph::new(line), area);
}

/// Split a hint string into spans, styling bracketed keys with the accent.
fn hint_spans(hints: &str, theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut rest = hints;

    while let Some(open) = rest.find('[') {
        let Some(close) = rest[open..].find(']').map(|i| open + i) else {
            break;
        };
        if open > 0 {
            spans.push(Span::styled(rest[..open].to_string(), theme.muted()));
        }
        spans.push(Span::styled(
            rest[open..=close].to_string(),
            ratatui::style::Style::default().fg(theme.accent),
        ));
        rest = &rest[close + 1..];
    }

    if !rest.is_empty() {
        spans.push(Span::styled(rest.to_string(), theme.muted()));
    }
    spans
}
