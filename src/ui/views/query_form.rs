//! Query form shown above the results table in form mode.
//!
//! One select input per searchable field. Inputs cycle through the field's
//! filter options; submitting reports the chosen value of every input.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::api::types::STATE_ALL;
use crate::mode::ViewMode;
use crate::schema::{FieldDescriptor, FieldKey, Schema};
use crate::ui::theme::{status_color, Theme};

/// Action returned from the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryFormAction {
    /// Search with these field values.
    Submit(Vec<(FieldKey, String)>),
    /// Inputs went back to their initial values.
    Reset,
}

/// One select input.
#[derive(Debug, Clone)]
struct SelectInput {
    field: &'static FieldDescriptor,
    selected: usize,
}

impl SelectInput {
    fn new(field: &'static FieldDescriptor) -> Self {
        let mut input = Self { field, selected: 0 };
        input.reset();
        input
    }

    fn reset(&mut self) {
        let initial = self.field.initial_value.unwrap_or(STATE_ALL);
        self.set(initial);
    }

    fn set(&mut self, value: &str) {
        self.selected = self
            .field
            .filter_options()
            .iter()
            .position(|entry| entry.value == value)
            .unwrap_or(0);
    }

    fn value(&self) -> &'static str {
        self.field
            .filter_options()
            .get(self.selected)
            .map_or(STATE_ALL, |entry| entry.value)
    }

    fn cycle(&mut self, forward: bool) {
        let len = self.field.filter_options().len();
        if len == 0 {
            return;
        }
        self.selected = if forward {
            (self.selected + 1) % len
        } else {
            (self.selected + len - 1) % len
        };
    }
}

/// The query form.
#[derive(Debug)]
pub struct QueryFormView {
    inputs: Vec<SelectInput>,
    focused: usize,
}

impl QueryFormView {
    /// Build the form from the schema's searchable fields.
    pub fn new(schema: &Schema) -> Self {
        Self {
            inputs: schema.search_fields().into_iter().map(SelectInput::new).collect(),
            focused: 0,
        }
    }

    /// Number of inputs.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    /// The current value of every input.
    pub fn values(&self) -> Vec<(FieldKey, String)> {
        self.inputs
            .iter()
            .map(|input| (input.field.key, input.value().to_string()))
            .collect()
    }

    /// Set the input for `key` to `value`, if both exist.
    pub fn set_value(&mut self, key: FieldKey, value: &str) {
        if let Some(input) = self.inputs.iter_mut().find(|input| input.field.key == key) {
            input.set(value);
        }
    }

    /// Put every input back to its initial value.
    pub fn reset(&mut self) {
        self.inputs.iter_mut().for_each(SelectInput::reset);
    }

    /// Handle a key while the form has focus.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<QueryFormAction> {
        match (key.code, key.modifiers) {
            (KeyCode::Left, _) | (KeyCode::Char('h'), KeyModifiers::NONE) => {
                if let Some(input) = self.inputs.get_mut(self.focused) {
                    input.cycle(false);
                }
                None
            }
            (KeyCode::Right, _) | (KeyCode::Char('l'), KeyModifiers::NONE) => {
                if let Some(input) = self.inputs.get_mut(self.focused) {
                    input.cycle(true);
                }
                None
            }
            (KeyCode::Down, _) | (KeyCode::Char('j'), KeyModifiers::NONE) => {
                if self.focused + 1 < self.inputs.len() {
                    self.focused += 1;
                }
                None
            }
            (KeyCode::Up, _) | (KeyCode::Char('k'), KeyModifiers::NONE) => {
                self.focused = self.focused.saturating_sub(1);
                None
            }
            (KeyCode::Enter, _) => Some(QueryFormAction::Submit(self.values())),
            (KeyCode::Char('x'), KeyModifiers::NONE) => {
                self.reset();
                Some(QueryFormAction::Reset)
            }
            _ => None,
        }
    }

    /// Rows the form needs, borders included.
    pub fn height(&self) -> u16 {
        self.inputs.len() as u16 + 3
    }

    /// Render the form.
    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool, theme: &Theme) {
        let mut lines: Vec<Line> = self
            .inputs
            .iter()
            .enumerate()
            .map(|(i, input)| input_line(input, focused && i == self.focused, theme))
            .collect();

        lines.push(Line::from(vec![
            Span::styled("[Enter] Search", Style::default().fg(theme.accent)),
            Span::raw("  "),
            Span::styled("[x] Reset", theme.muted()),
        ]));

        let border_style = if focused {
            Style::default().fg(theme.accent)
        } else {
            theme.muted()
        };
        let block = Block::default()
            .title(Span::styled(" Query ", theme.header()))
            .borders(Borders::ALL)
            .border_style(border_style);

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

fn input_line(input: &SelectInput, focused: bool, theme: &Theme) -> Line<'static> {
    let label_style = if focused {
        theme.header()
    } else {
        Style::default()
    };
    let (text, color) = match input.field.filter_options().get(input.selected) {
        Some(entry) => (entry.text, status_color(entry.status)),
        None => ("-", theme.muted),
    };
    let arrows = if focused {
        Style::default().fg(theme.accent)
    } else {
        theme.muted()
    };

    Line::from(vec![
        Span::styled(
            format!("{}: ", input.field.label_for(ViewMode::Form)),
            label_style,
        ),
        Span::styled("◀ ", arrows),
        Span::styled("● ", Style::default().fg(color)),
        Span::styled(text.to_string(), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(" ▶", arrows),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::cells::line_text;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_built_from_search_fields() {
        let form = QueryFormView::new(&Schema::issues());
        assert_eq!(form.len(), 1);
        assert_eq!(
            form.values(),
            vec![(FieldKey::State, STATE_ALL.to_string())]
        );
    }

    #[test]
    fn test_cycle_and_submit() {
        let mut form = QueryFormView::new(&Schema::issues());
        assert_eq!(form.handle_input(key(KeyCode::Right)), None);
        assert_eq!(
            form.handle_input(key(KeyCode::Enter)),
            Some(QueryFormAction::Submit(vec![(
                FieldKey::State,
                "open".to_string()
            )]))
        );
    }

    #[test]
    fn test_cycle_wraps_backwards() {
        let mut form = QueryFormView::new(&Schema::issues());
        form.handle_input(key(KeyCode::Left));
        assert_eq!(form.values()[0].1, "closed");
    }

    #[test]
    fn test_reset_restores_initial() {
        let mut form = QueryFormView::new(&Schema::issues());
        form.handle_input(key(KeyCode::Right));
        assert_eq!(
            form.handle_input(key(KeyCode::Char('x'))),
            Some(QueryFormAction::Reset)
        );
        assert_eq!(form.values()[0].1, STATE_ALL);
    }

    #[test]
    fn test_set_value() {
        let mut form = QueryFormView::new(&Schema::issues());
        form.set_value(FieldKey::State, "closed");
        assert_eq!(form.values()[0].1, "closed");
        form.set_value(FieldKey::State, "unknown");
        assert_eq!(form.values()[0].1, STATE_ALL);
        form.set_value(FieldKey::Title, "ignored");
        assert_eq!(form.len(), 1);
    }

    #[test]
    fn test_input_line_shows_mapped_text() {
        let mut form = QueryFormView::new(&Schema::issues());
        form.set_value(FieldKey::State, "open");
        let line = input_line(&form.inputs[0], true, &Theme::default());
        assert_eq!(line_text(&line), "list status: ◀ ● Error ▶");
    }
}
