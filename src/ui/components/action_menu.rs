//! Row action menu.
//!
//! A small popup listing the "more" entries of a table row. Choosing an
//! entry reports its key; the entries do not change any data.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};

use crate::schema::MenuItem;
use crate::ui::theme::Theme;

/// Action returned from the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionMenuAction {
    /// An entry was chosen for the issue with this number.
    Select { item: MenuItem, number: u64 },
    /// The menu was closed without a choice.
    Cancel,
}

/// Popup listing the row menu entries for one issue.
#[derive(Debug, Default)]
pub struct ActionMenu {
    /// Entries on offer.
    items: Vec<MenuItem>,
    /// Number of the issue the menu was opened for.
    target: Option<u64>,
    /// List state for ratatui.
    list_state: ListState,
}

impl ActionMenu {
    /// Create a hidden menu.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the menu for issue `number` with `items`.
    pub fn show(&mut self, number: u64, items: Vec<MenuItem>) {
        self.list_state.select(if items.is_empty() { None } else { Some(0) });
        self.items = items;
        self.target = Some(number);
    }

    /// Close the menu.
    pub fn hide(&mut self) {
        self.target = None;
    }

    /// Check if the menu is open.
    pub fn is_visible(&self) -> bool {
        self.target.is_some()
    }

    /// The highlighted entry.
    pub fn selected(&self) -> Option<MenuItem> {
        self.list_state
            .selected()
            .and_then(|i| self.items.get(i).copied())
    }

    fn move_by(&mut self, delta: isize) {
        let Some(current) = self.list_state.selected() else {
            return;
        };
        let last = self.items.len().saturating_sub(1) as isize;
        let next = (current as isize + delta).clamp(0, last) as usize;
        self.list_state.select(Some(next));
    }

    /// Handle a key while the menu is open.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<ActionMenuAction> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
                self.move_by(1);
                None
            }
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
                self.move_by(-1);
                None
            }
            (KeyCode::Enter, _) => {
                let action = match (self.selected(), self.target) {
                    (Some(item), Some(number)) => ActionMenuAction::Select { item, number },
                    _ => ActionMenuAction::Cancel,
                };
                self.hide();
                Some(action)
            }
            (KeyCode::Esc, _) | (KeyCode::Char('q'), KeyModifiers::NONE) => {
                self.hide();
                Some(ActionMenuAction::Cancel)
            }
            _ => None,
        }
    }

    /// Render the menu centered in `area`.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let Some(number) = self.target else {
            return;
        };

        let width = 24u16.min(area.width);
        let height = (self.items.len() as u16 + 2).min(area.height);
        let popup = centered_rect(area, width, height);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(Span::styled(format!(" #{} ", number), theme.header()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent));

        let items: Vec<ListItem> = self
            .items
            .iter()
            .map(|item| ListItem::new(item.key()))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(theme.selected_row().add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");

        frame.render_stateful_widget(list, popup, &mut self.list_state);
    }
}

/// Calculate a centered rectangle within the given area.
pub(crate) fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn open_menu() -> ActionMenu {
        let mut menu = ActionMenu::new();
        menu.show(1042, MenuItem::ALL.to_vec());
        menu
    }

    #[test]
    fn test_hidden_by_default() {
        let menu = ActionMenu::new();
        assert!(!menu.is_visible());
        assert_eq!(menu.selected(), None);
    }

    #[test]
    fn test_select_first_entry() {
        let mut menu = open_menu();
        assert_eq!(
            menu.handle_input(key(KeyCode::Enter)),
            Some(ActionMenuAction::Select {
                item: MenuItem::Copy,
                number: 1042
            })
        );
        assert!(!menu.is_visible());
    }

    #[test]
    fn test_navigation_clamps() {
        let mut menu = open_menu();
        menu.handle_input(key(KeyCode::Char('j')));
        menu.handle_input(key(KeyCode::Char('j')));
        assert_eq!(menu.selected(), Some(MenuItem::Delete));
        menu.handle_input(key(KeyCode::Up));
        menu.handle_input(key(KeyCode::Up));
        assert_eq!(menu.selected(), Some(MenuItem::Copy));
    }

    #[test]
    fn test_escape_cancels() {
        let mut menu = open_menu();
        assert_eq!(
            menu.handle_input(key(KeyCode::Esc)),
            Some(ActionMenuAction::Cancel)
        );
        assert!(!menu.is_visible());
    }

    #[test]
    fn test_other_keys_ignored() {
        let mut menu = open_menu();
        assert_eq!(menu.handle_input(key(KeyCode::Char('x'))), None);
        assert!(menu.is_visible());
    }

    #[test]
    fn test_centered_rect() {
        let rect = centered_rect(Rect::new(0, 0, 100, 50), 20, 10);
        assert_eq!(rect, Rect::new(40, 20, 20, 10));
    }
}
