//! Event handler implementation.
//!
//! Polls crossterm for terminal events and converts them to application
//! events.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEventKind, KeyModifiers};

use super::Event;

/// Polls the terminal for events, yielding ticks when idle.
pub struct EventHandler {
    /// How long to wait for input before yielding a tick.
    tick_rate: Duration,
}

impl EventHandler {
    /// Create a new event handler with the given tick rate in milliseconds.
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    /// Poll for the next event.
    ///
    /// Blocks until an event is available or the tick rate elapses.
    pub fn next(&self) -> std::io::Result<Event> {
        if !event::poll(self.tick_rate)? {
            return Ok(Event::Tick);
        }
        Ok(Self::convert(event::read()?))
    }

    /// Map a crossterm event to an application event.
    fn convert(event: CrosstermEvent) -> Event {
        match event {
            // Release and repeat events would double every key press on Windows
            // Raw mode swallows SIGINT, so Ctrl+C arrives as a key
            CrosstermEvent::Key(key)
                if key.kind == KeyEventKind::Press
                    && key.code == KeyCode::Char('c')
                    && key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                Event::Quit
            }
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Event::Key(key),
            CrosstermEvent::Resize(width, height) => Event::Resize(width, height),
            _ => Event::Tick,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyEventState};

    #[test]
    fn test_event_handler_tick_rate() {
        let handler = EventHandler::new(50);
        assert_eq!(handler.tick_rate, Duration::from_millis(50));
    }

    #[test]
    fn test_convert_key_press() {
        let key = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        assert_eq!(
            EventHandler::convert(CrosstermEvent::Key(key)),
            Event::Key(key)
        );
    }

    #[test]
    fn test_convert_ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(EventHandler::convert(CrosstermEvent::Key(key)), Event::Quit);
    }

    #[test]
    fn test_convert_ignores_key_release() {
        let key = KeyEvent {
            code: KeyCode::Char('j'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(EventHandler::convert(CrosstermEvent::Key(key)), Event::Tick);
    }

    #[test]
    fn test_convert_resize() {
        assert_eq!(
            EventHandler::convert(CrosstermEvent::Resize(80, 24)),
            Event::Resize(80, 24)
        );
    }
}
