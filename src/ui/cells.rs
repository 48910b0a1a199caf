//! Drawing rendered values as terminal text.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use super::theme::{status_color, tag_color, Theme};
use crate::schema::{FieldDescriptor, RenderedValue, RowAction};

/// Placeholder shown for empty values.
pub const EMPTY_PLACEHOLDER: &str = "-";

/// Index badges up to this position are highlighted.
const HIGHLIGHTED_INDEXES: usize = 3;

/// Draw a value as a single line.
pub fn value_line(value: &RenderedValue, theme: &Theme) -> Line<'static> {
    if value.is_empty() {
        return Line::from(Span::styled(EMPTY_PLACEHOLDER, theme.muted()));
    }
    match value {
        RenderedValue::Empty => Line::default(),
        RenderedValue::Text(text) => Line::from(text.clone()),
        RenderedValue::Index(position) => {
            let style = if *position <= HIGHLIGHTED_INDEXES {
                Style::default().fg(Color::Black).bg(theme.accent)
            } else {
                Style::default().fg(Color::Black).bg(theme.muted)
            };
            Line::from(Span::styled(format!(" {} ", position), style))
        }
        RenderedValue::Status { text, status } => {
            let color = status_color(*status);
            Line::from(vec![
                Span::styled("● ", Style::default().fg(color)),
                Span::raw(text.clone()),
            ])
        }
        RenderedValue::Tags(tags) => {
            let mut spans = Vec::with_capacity(tags.len() * 2);
            for (i, tag) in tags.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::raw(" "));
                }
                spans.push(Span::styled(
                    format!(" {} ", tag.name),
                    Style::default()
                        .fg(Color::Black)
                        .bg(tag_color(&tag.color)),
                ));
            }
            Line::from(spans)
        }
        RenderedValue::Actions(actions) => {
            let mut spans = Vec::new();
            for action in actions {
                if !spans.is_empty() {
                    spans.push(Span::raw("  "));
                }
                match action {
                    RowAction::Show { .. } => spans.push(Span::styled("show", theme.link())),
                    RowAction::Menu(_) => spans.push(Span::styled(
                        "more ▾",
                        Style::default()
                            .fg(theme.accent)
                            .add_modifier(Modifier::DIM),
                    )),
                }
            }
            Line::from(spans)
        }
    }
}

/// Draw a value for a table cell, truncating text fields that ask for it.
pub fn cell_line(
    field: &FieldDescriptor,
    value: &RenderedValue,
    width: u16,
    theme: &Theme,
) -> Line<'static> {
    match value {
        RenderedValue::Text(text) if field.ellipsis => {
            Line::from(truncate(text, width as usize))
        }
        _ => value_line(value, theme),
    }
}

/// Shorten `text` to `width` characters, ending with an ellipsis if cut.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}

/// Concatenate a line's span contents.
#[cfg(test)]
pub fn line_text(line: &Line) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}
