//! Tab bar switching between the view modes.

use ratatui::{
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Tabs},
    Frame,
};

use crate::mode::ViewMode;
use crate::ui::theme::Theme;

/// Render one tab per view mode, highlighting `active`.
pub fn render_tabs(frame: &mut Frame, area: Rect, active: ViewMode, theme: &Theme) {
    let titles: Vec<Line> = ViewMode::ALL
        .iter()
        .map(|mode| Line::from(mode.tab_title()))
        .collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(theme.muted()),
        )
        .select(active.index())
        .style(theme.muted())
        .highlight_style(theme.header())
        .divider("│");

    frame.render_widget(tabs, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_all_tab_titles_rendered() {
        let mut terminal = Terminal::new(TestBackend::new(50, 2)).unwrap();
        terminal
            .draw(|frame| render_tabs(frame, frame.area(), ViewMode::Form, &Theme::default()))
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        for title in ["table", "form", "descriptions"] {
            assert!(text.contains(title), "missing tab {}", title);
        }
    }
}
