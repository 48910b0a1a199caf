//! Loading spinner shown while a fetch is outstanding.

use ratatui::text::Span;

use crate::ui::theme::Theme;

/// Spinner animation frames.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// An animated loading indicator.
#[derive(Debug, Clone, Default)]
pub struct LoadingIndicator {
    /// Current frame index.
    frame: usize,
    /// Whether the indicator is spinning.
    active: bool,
}

impl LoadingIndicator {
    /// Create an idle indicator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start spinning from the first frame.
    pub fn start(&mut self) {
        if !self.active {
            self.active = true;
            self.frame = 0;
        }
    }

    /// Stop spinning.
    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Check if the indicator is spinning.
    #[cfg(test)]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Advance the animation.
    pub fn tick(&mut self) {
        if self.active {
            self.frame = (self.frame + 1) % SPINNER_FRAMES.len();
        }
    }

    /// The current frame symbol.
    pub fn symbol(&self) -> &'static str {
        SPINNER_FRAMES[self.frame]
    }

    /// A span for the toolbar, empty when idle.
    pub fn span(&self, theme: &Theme) -> Span<'static> {
        if self.active {
            Span::styled(format!("{} loading", self.symbol()), theme.muted())
        } else {
            Span::raw("")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_does_not_animate() {
        let mut loading = LoadingIndicator::new();
        loading.tick();
        assert!(!loading.is_active());
        assert_eq!(loading.symbol(), SPINNER_FRAMES[0]);
        assert!(loading.span(&Theme::default()).content.is_empty());
    }

    #[test]
    fn test_tick_wraps() {
        let mut loading = LoadingIndicator::new();
        loading.start();
        for _ in 0..SPINNER_FRAMES.len() {
            loading.tick();
        }
        assert_eq!(loading.symbol(), SPINNER_FRAMES[0]);
    }

    #[test]
    fn test_start_stop() {
        let mut loading = LoadingIndicator::new();
        loading.start();
        loading.tick();
        assert!(loading.is_active());
        assert!(loading.span(&Theme::default()).content.contains("loading"));
        loading.stop();
        assert!(!loading.is_active());
    }
}
