//! Issue table view.
//!
//! Shared by list mode and form mode. Columns come from the schema for the
//! active mode; the view itself only tracks the selected row.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::api::types::{Issue, IssueQuery, STATE_ALL};
use crate::mode::ViewMode;
use crate::schema::{render_value, FieldDescriptor, MenuItem, Schema};
use crate::ui::cells::cell_line;
use crate::ui::components::LoadingIndicator;
use crate::ui::theme::Theme;

/// Column width for fields without a fixed width.
const FLEX_MIN_WIDTH: u16 = 12;

/// Action returned from the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableAction {
    /// Open a record's URL in the browser.
    Show(String),
    /// Open the row menu for the issue with this number.
    OpenMenu { number: u64, items: Vec<MenuItem> },
}

/// What the table draws for one frame.
pub struct TableContext<'a> {
    pub schema: &'a Schema,
    pub mode: ViewMode,
    pub issues: &'a [&'a Issue],
    pub total: u32,
    pub query: &'a IssueQuery,
    pub loading: &'a LoadingIndicator,
    pub focused: bool,
}

/// Table view state.
#[derive(Debug, Default)]
pub struct TableView {
    state: TableState,
}

impl TableView {
    /// Create a table view with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the selected row.
    #[cfg(test)]
    pub fn selected(&self) -> Option<usize> {
        self.state.selected()
    }

    /// Keep the selection inside `len` rows, selecting the first row when
    /// rows appear.
    pub fn clamp(&mut self, len: usize) {
        let selected = match (len, self.state.selected()) {
            (0, _) => None,
            (_, None) => Some(0),
            (len, Some(i)) => Some(i.min(len - 1)),
        };
        self.state.select(selected);
    }

    fn move_down(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let next = self.state.selected().map_or(0, |i| (i + 1).min(len - 1));
        self.state.select(Some(next));
    }

    fn move_up(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let prev = self.state.selected().map_or(0, |i| i.saturating_sub(1));
        self.state.select(Some(prev));
    }

    /// Handle a navigation or row key.
    ///
    /// Returns an action when a row action is triggered. Keys that do not
    /// belong to the table are ignored.
    pub fn handle_input(&mut self, key: KeyEvent, issues: &[&Issue]) -> Option<TableAction> {
        let len = issues.len();
        match (key.code, key.modifiers) {
            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
                self.move_down(len);
                None
            }
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
                self.move_up(len);
                None
            }
            (KeyCode::Char('g'), KeyModifiers::NONE) | (KeyCode::Home, _) => {
                if len > 0 {
                    self.state.select(Some(0));
                }
                None
            }
            (KeyCode::Char('G'), _) | (KeyCode::End, _) => {
                if len > 0 {
                    self.state.select(Some(len - 1));
                }
                None
            }
            (KeyCode::Enter, _) | (KeyCode::Char('o'), KeyModifiers::NONE) => {
                self.selected_issue(issues)
                    .map(|issue| TableAction::Show(issue.url.clone()))
            }
            (KeyCode::Char('m'), KeyModifiers::NONE) => {
                self.selected_issue(issues).map(|issue| TableAction::OpenMenu {
                    number: issue.number,
                    items: MenuItem::ALL.to_vec(),
                })
            }
            _ => None,
        }
    }

    /// The issue on the selected row.
    pub fn selected_issue<'a>(&self, issues: &[&'a Issue]) -> Option<&'a Issue> {
        self.state.selected().and_then(|i| issues.get(i).copied())
    }

    /// Render the toolbar and the table.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &TableContext, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(3)])
            .split(area);

        render_toolbar(frame, chunks[0], ctx, theme);

        let fields = ctx.schema.resolve_fields(ctx.mode);
        let header = Row::new(
            fields
                .iter()
                .map(|field| Cell::from(field.label_for(ctx.mode)))
                .collect::<Vec<_>>(),
        )
        .style(theme.header())
        .bottom_margin(1);

        let widths: Vec<Constraint> = fields.iter().map(|field| column_width(field)).collect();
        let flex_width = flex_column_width(&fields, chunks[1].width);

        let rows: Vec<Row> = if ctx.issues.is_empty() {
            vec![Row::new(vec![Cell::from(Span::styled(
                "No data",
                theme.muted(),
            ))])]
        } else {
            ctx.issues
                .iter()
                .enumerate()
                .map(|(i, issue)| {
                    Row::new(
                        fields
                            .iter()
                            .map(|field| {
                                let value = render_value(field, issue, i + 1);
                                let width = field.width.unwrap_or(flex_width);
                                Cell::from(cell_line(field, &value, width, theme))
                            })
                            .collect::<Vec<_>>(),
                    )
                })
                .collect()
        };

        let border_style = if ctx.focused {
            Style::default().fg(theme.accent)
        } else {
            theme.muted()
        };

        let table = Table::new(rows, widths)
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style),
            )
            .highlight_style(theme.selected_row())
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(table, chunks[1], &mut self.state);
    }
}

fn column_width(field: &FieldDescriptor) -> Constraint {
    match field.width {
        Some(width) => Constraint::Length(width),
        None => Constraint::Min(FLEX_MIN_WIDTH),
    }
}

/// Width shared by each column without a fixed width.
fn flex_column_width(fields: &[&FieldDescriptor], total: u16) -> u16 {
    let fixed: u16 = fields.iter().filter_map(|field| field.width).sum();
    let flex = fields.iter().filter(|field| field.width.is_none()).count() as u16;
    // Borders, highlight symbol and one space between columns
    let chrome = 4 + fields.len() as u16;
    if flex == 0 {
        return FLEX_MIN_WIDTH;
    }
    (total.saturating_sub(fixed + chrome) / flex).max(FLEX_MIN_WIDTH)
}

/// Toolbar: title, active filter, add button, totals and spinner.
fn render_toolbar(frame: &mut Frame, area: Rect, ctx: &TableContext, theme: &Theme) {
    let mut spans = vec![Span::styled("Issues", theme.header())];

    if ctx.query.state != STATE_ALL {
        let filter = ctx
            .schema
            .filterable_fields(ctx.mode)
            .first()
            .map(|field| {
                let text = field
                    .lookup(&ctx.query.state)
                    .map_or(ctx.query.state.as_str(), |entry| entry.text);
                format!("{}: {}", field.label_for(ctx.mode), text)
            })
            .unwrap_or_else(|| ctx.query.state.clone());
        spans.push(Span::raw("  "));
        spans.push(Span::styled(format!("[{}]", filter), theme.muted()));
    }

    spans.push(Span::raw("  "));
    spans.push(Span::styled("[+ Add]", Style::default().fg(theme.accent)));
    spans.push(Span::styled(
        format!(
            "  total {}  page {}/{}  ",
            ctx.total,
            ctx.query.current,
            ctx.query.page_count(ctx.total)
        ),
        theme.muted(),
    ));
    spans.push(ctx.loading.span(theme));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{fixtures, Label};
    use ratatui::{backend::TestBackend, Terminal};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn sample() -> Vec<Issue> {
        vec![
            fixtures::issue(1, "open", vec![Label::new("bug", "red")]),
            fixtures::issue(2, "closed", vec![]),
            fixtures::issue(3, "open", vec![]),
        ]
    }

    #[test]
    fn test_clamp_selects_first_row() {
        let mut view = TableView::new();
        view.clamp(3);
        assert_eq!(view.selected(), Some(0));
        view.state.select(Some(2));
        view.clamp(1);
        assert_eq!(view.selected(), Some(0));
        view.clamp(0);
        assert_eq!(view.selected(), None);
    }

    #[test]
    fn test_navigation() {
        let issues = sample();
        let rows: Vec<&Issue> = issues.iter().collect();
        let mut view = TableView::new();
        view.clamp(rows.len());

        view.handle_input(key(KeyCode::Char('j')), &rows);
        view.handle_input(key(KeyCode::Down), &rows);
        view.handle_input(key(KeyCode::Down), &rows);
        assert_eq!(view.selected(), Some(2));

        view.handle_input(key(KeyCode::Char('k')), &rows);
        assert_eq!(view.selected(), Some(1));

        view.handle_input(key(KeyCode::Char('g')), &rows);
        assert_eq!(view.selected(), Some(0));
        view.handle_input(key(KeyCode::Char('G')), &rows);
        assert_eq!(view.selected(), Some(2));
    }

    #[test]
    fn test_show_and_menu_actions() {
        let issues = sample();
        let rows: Vec<&Issue> = issues.iter().collect();
        let mut view = TableView::new();
        view.clamp(rows.len());
        view.handle_input(key(KeyCode::Down), &rows);

        assert_eq!(
            view.handle_input(key(KeyCode::Enter), &rows),
            Some(TableAction::Show(
                "https://github.com/ant-design/ant-design/issues/2".to_string()
            ))
        );
        assert_eq!(
            view.handle_input(key(KeyCode::Char('m')), &rows),
            Some(TableAction::OpenMenu {
                number: 1002,
                items: MenuItem::ALL.to_vec()
            })
        );
    }

    #[test]
    fn test_flex_width_shares_remaining_space() {
        let schema = Schema::issues();
        let fields = schema.resolve_fields(ViewMode::List);
        // index 5 + status 12 + labels 24 + option 16 = 57 fixed, 5 columns
        assert_eq!(flex_column_width(&fields, 100), 100 - 57 - 9);
        assert_eq!(flex_column_width(&fields, 40), FLEX_MIN_WIDTH);
    }

    #[test]
    fn test_actions_without_rows() {
        let mut view = TableView::new();
        assert_eq!(view.handle_input(key(KeyCode::Enter), &[]), None);
        assert_eq!(view.handle_input(key(KeyCode::Char('j')), &[]), None);
        assert_eq!(view.selected(), None);
    }

    fn render_to_text(ctx: &TableContext) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 12)).unwrap();
        let mut view = TableView::new();
        view.clamp(ctx.issues.len());
        terminal
            .draw(|frame| view.render(frame, frame.area(), ctx, &Theme::default()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_render_headers_and_rows() {
        let issues = sample();
        let rows: Vec<&Issue> = issues.iter().collect();
        let schema = Schema::issues();
        let query = IssueQuery::new(5);
        let loading = LoadingIndicator::new();
        let text = render_to_text(&TableContext {
            schema: &schema,
            mode: ViewMode::List,
            issues: &rows,
            total: 12,
            query: &query,
            loading: &loading,
            focused: true,
        });

        assert!(text.contains("status"));
        assert!(!text.contains("list status"));
        assert!(text.contains("Issue 1"));
        assert!(text.contains("bug"));
        assert!(text.contains("[+ Add]"));
        assert!(text.contains("total 12"));
        assert!(text.contains("page 1/3"));
        assert!(!text.contains("comments"));
    }

    #[test]
    fn test_render_filter_indicator_and_empty() {
        let schema = Schema::issues();
        let mut query = IssueQuery::new(5);
        query.state = "closed".to_string();
        let loading = LoadingIndicator::new();
        let text = render_to_text(&TableContext {
            schema: &schema,
            mode: ViewMode::List,
            issues: &[],
            total: 0,
            query: &query,
            loading: &loading,
            focused: true,
        });

        assert!(text.contains("[status: Success]"));
        assert!(text.contains("No data"));
    }
}
