//! Transient notices (toasts).
//!
//! Notices report outcomes that must not block the user: fetch failures,
//! row menu choices, links that could not be opened. Each one expires on
//! its own after a few seconds.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// How long info and success notices stay up.
const SHORT_NOTICE: Duration = Duration::from_secs(3);

/// How long warnings and errors stay up.
const LONG_NOTICE: Duration = Duration::from_secs(5);

/// Widest a notice box gets.
const NOTICE_WIDTH: u16 = 48;

/// The kind of notice, which determines its color and lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationType {
    /// Get the icon for this notice type.
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationType::Info => "ℹ",
            NotificationType::Success => "✓",
            NotificationType::Warning => "⚠",
            NotificationType::Error => "✗",
        }
    }

    /// Get the color for this notice type.
    pub fn color(&self) -> Color {
        match self {
            NotificationType::Info => Color::Blue,
            NotificationType::Success => Color::Green,
            NotificationType::Warning => Color::Yellow,
            NotificationType::Error => Color::Red,
        }
    }

    fn lifetime(&self) -> Duration {
        match self {
            NotificationType::Info | NotificationType::Success => SHORT_NOTICE,
            NotificationType::Warning | NotificationType::Error => LONG_NOTICE,
        }
    }
}

/// A single notice.
#[derive(Debug, Clone)]
pub struct Notification {
    /// The message text.
    pub message: String,
    /// The notice type.
    pub notification_type: NotificationType,
    /// When the notice was raised.
    created_at: Instant,
    /// How long it stays visible.
    duration: Duration,
}

impl Notification {
    /// Create a notice with the default lifetime for its type.
    pub fn new(message: impl Into<String>, notification_type: NotificationType) -> Self {
        Self {
            message: message.into(),
            notification_type,
            created_at: Instant::now(),
            duration: notification_type.lifetime(),
        }
    }

    /// Override the lifetime.
    #[cfg(test)]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Get the lifetime.
    #[cfg(test)]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Check whether the notice has expired.
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.duration
    }

    /// Rows needed to show the message at `inner_width` columns.
    fn height(&self, inner_width: u16) -> u16 {
        let text_len = self.message.chars().count() + 2;
        let width = inner_width.max(1) as usize;
        let lines = ((text_len + width - 1) / width) as u16;
        lines + 2
    }
}

/// The stack of visible notices.
#[derive(Debug)]
pub struct NotificationManager {
    notifications: VecDeque<Notification>,
    max_visible: usize,
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationManager {
    /// Create an empty manager showing at most three notices.
    pub fn new() -> Self {
        Self {
            notifications: VecDeque::new(),
            max_visible: 3,
        }
    }

    /// Add a notice, dropping the oldest ones beyond the visible limit.
    pub fn push(&mut self, notification: Notification) {
        self.notifications.push_back(notification);
        while self.notifications.len() > self.max_visible {
            self.notifications.pop_front();
        }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Notification::new(message, NotificationType::Info));
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Notification::new(message, NotificationType::Success));
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(Notification::new(message, NotificationType::Warning));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Notification::new(message, NotificationType::Error));
    }

    /// Drop expired notices. Called on every tick.
    pub fn tick(&mut self) {
        self.notifications.retain(|n| !n.is_expired());
    }

    /// Check if there are no notices.
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    /// Get the number of notices.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    /// Iterate over notices, oldest first.
    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    /// The most recent notice.
    #[cfg(test)]
    pub fn latest(&self) -> Option<&Notification> {
        self.notifications.back()
    }

    /// Render the notices stacked in the bottom-right corner of `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if self.notifications.is_empty() {
            return;
        }

        let width = NOTICE_WIDTH.min(area.width.saturating_sub(2));
        let inner_width = width.saturating_sub(4);
        let x = area.x + area.width.saturating_sub(width + 1);
        let mut bottom = area.y + area.height.saturating_sub(1);

        // Newest notice sits lowest; stop when the stack reaches the top
        for notification in self.notifications.iter().rev() {
            let height = notification.height(inner_width);
            if bottom < area.y + height {
                break;
            }
            bottom -= height;
            render_notification(notification, frame, Rect::new(x, bottom, width, height));
        }
    }
}

fn render_notification(notification: &Notification, frame: &mut Frame, area: Rect) {
    frame.render_widget(Clear, area);

    let kind = notification.notification_type;
    let style = Style::default().fg(kind.color());
    let text = Line::from(vec![
        Span::styled(format!("{} ", kind.icon()), style.add_modifier(Modifier::BOLD)),
        Span::styled(notification.message.clone(), style),
    ]);

    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).border_style(style))
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_lifetimes_by_type() {
        assert_eq!(
            Notification::new("x", NotificationType::Info).duration(),
            Duration::from_secs(3)
        );
        assert_eq!(
            Notification::new("x", NotificationType::Error).duration(),
            Duration::from_secs(5)
        );
    }

    #[test]
    fn test_notification_expires() {
        let n = Notification::new("Test", NotificationType::Info)
            .with_duration(Duration::from_millis(1));
        std::thread::sleep(Duration::from_millis(5));
        assert!(n.is_expired());
        assert!(!Notification::new("Test", NotificationType::Info).is_expired());
    }

    #[test]
    fn test_manager_caps_visible() {
        let mut manager = NotificationManager::new();
        manager.info("1");
        manager.success("2");
        manager.warning("3");
        manager.error("4");
        assert_eq!(manager.len(), 3);
        let messages: Vec<&str> = manager.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["2", "3", "4"]);
        assert_eq!(
            manager.latest().unwrap().notification_type,
            NotificationType::Error
        );
    }

    #[test]
    fn test_manager_tick_drops_expired() {
        let mut manager = NotificationManager::new();
        manager.push(
            Notification::new("Expires", NotificationType::Info)
                .with_duration(Duration::from_millis(1)),
        );
        manager.info("Stays");
        std::thread::sleep(Duration::from_millis(5));
        manager.tick();
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.latest().unwrap().message, "Stays");
    }

    #[test]
    fn test_render_shows_message() {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        let mut manager = NotificationManager::new();
        manager.info("copy");

        terminal
            .draw(|frame| manager.render(frame, frame.area()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("copy"));
    }
}
