//! Theme and color mapping.

use std::str::FromStr;

use ratatui::style::{Color, Modifier, Style};

use crate::schema::StatusKind;

/// Color theme for the application.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Accent color for titles and active tabs.
    pub accent: Color,
    /// Color for secondary text.
    pub muted: Color,
    /// Background of the selected row.
    pub highlight_bg: Color,
    /// Color for links.
    pub link: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Cyan,
            muted: Color::DarkGray,
            highlight_bg: Color::Rgb(40, 44, 52),
            link: Color::Blue,
        }
    }
}

impl Theme {
    /// Style for table headers and field labels.
    pub fn header(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    /// Style for the selected table row.
    pub fn selected_row(&self) -> Style {
        Style::default()
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for secondary text.
    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Style for link text.
    pub fn link(&self) -> Style {
        Style::default()
            .fg(self.link)
            .add_modifier(Modifier::UNDERLINED)
    }
}

/// The color of a status badge.
pub fn status_color(status: StatusKind) -> Color {
    match status {
        StatusKind::Default => Color::Gray,
        StatusKind::Success => Color::Green,
        StatusKind::Error => Color::Red,
        StatusKind::Processing => Color::Blue,
        StatusKind::Warning => Color::Yellow,
    }
}

/// Resolve a tag color string.
///
/// Accepts status names (`success`, `error`, ...), tag palette names,
/// terminal color names and hex codes with or without a leading `#`.
/// Anything else is gray.
pub fn tag_color(color: &str) -> Color {
    let color = color.trim();
    if let Some(status) = StatusKind::from_name(color) {
        return status_color(status);
    }
    if let Some(palette) = palette_color(color) {
        return palette;
    }

    // Bare GitHub label colors would otherwise parse as palette indexes
    let bare_hex = color.len() == 6 && color.chars().all(|c| c.is_ascii_hexdigit());
    let parsed = if bare_hex {
        Color::from_str(&format!("#{}", color))
    } else {
        Color::from_str(color)
    };
    match parsed {
        Ok(Color::Indexed(_)) | Err(_) => Color::Gray,
        Ok(parsed) => parsed,
    }
}

/// Tag palette names with no terminal color of the same name.
fn palette_color(name: &str) -> Option<Color> {
    match name.to_ascii_lowercase().as_str() {
        "volcano" | "magenta" => Some(Color::Red),
        "orange" | "gold" => Some(Color::Yellow),
        "lime" => Some(Color::Green),
        "geekblue" => Some(Color::Blue),
        "purple" => Some(Color::Magenta),
        _ => None,
    }
}
