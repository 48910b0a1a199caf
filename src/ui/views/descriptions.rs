//! Descriptions view: one labeled row per field of a single record.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::api::types::Issue;
use crate::mode::ViewMode;
use crate::schema::{render_value, RenderedValue, Schema};
use crate::ui::cells::value_line;
use crate::ui::components::LoadingIndicator;
use crate::ui::theme::Theme;

/// Build the labeled lines for `record`.
///
/// Without a record every field shows the empty placeholder.
pub fn description_lines(
    schema: &Schema,
    record: Option<&Issue>,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let fields = schema.resolve_fields(ViewMode::Descriptor);
    let label_width = fields
        .iter()
        .map(|field| field.label_for(ViewMode::Descriptor).chars().count())
        .max()
        .unwrap_or(0);

    fields
        .iter()
        .map(|field| {
            let value = record.map_or(RenderedValue::Empty, |issue| render_value(field, issue, 1));
            let mut spans = vec![Span::styled(
                format!(
                    "{:<width$}  ",
                    field.label_for(ViewMode::Descriptor),
                    width = label_width
                ),
                theme.header(),
            )];
            spans.extend(value_line(&value, theme).spans);
            Line::from(spans)
        })
        .collect()
}

/// Render the descriptions panel.
pub fn render_descriptions(
    frame: &mut Frame,
    area: Rect,
    schema: &Schema,
    record: Option<&Issue>,
    loading: &LoadingIndicator,
    theme: &Theme,
) {
    let title = match record {
        Some(issue) => format!(" Issue #{} ", issue.number),
        None => " Issue ".to_string(),
    };
    let block = Block::default()
        .title(Line::from(vec![
            Span::styled(title, theme.header()),
            loading.span(theme),
        ]))
        .borders(Borders::ALL)
        .border_style(theme.muted());

    let paragraph = Paragraph::new(description_lines(schema, record, theme))
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{fixtures, Label};
    use crate::ui::cells::line_text;

    #[test]
    fn test_placeholders_without_record() {
        let lines = description_lines(&Schema::issues(), None, &Theme::default());
        assert_eq!(lines.len(), 7);
        for line in &lines {
            assert!(line_text(line).trim_end().ends_with('-'), "{:?}", line_text(line));
        }
    }

    #[test]
    fn test_record_values() {
        let issue = fixtures::issue(7, "closed", vec![Label::new("bug", "red")]);
        let lines = description_lines(&Schema::issues(), Some(&issue), &Theme::default());
        let text: Vec<String> = lines.iter().map(line_text).collect();

        assert!(text.iter().any(|l| l.starts_with("title") && l.ends_with("Issue 7")));
        assert!(text
            .iter()
            .any(|l| l.starts_with("list status") && l.ends_with("● Success")));
        assert!(text.iter().any(|l| l.starts_with("labels") && l.contains(" bug ")));
        assert!(text
            .iter()
            .any(|l| l.starts_with("created at") && l.ends_with("2020-05-26 09:42:56")));
        assert!(!text.iter().any(|l| l.starts_with("option")));
    }

    #[test]
    fn test_labels_aligned() {
        let lines = description_lines(&Schema::issues(), None, &Theme::default());
        let first = line_text(&lines[0]);
        let widths: Vec<usize> = lines
            .iter()
            .map(|l| line_text(l).chars().count())
            .collect();
        assert!(widths.iter().all(|w| *w == first.chars().count()));
    }
}
