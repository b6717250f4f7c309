// Color palette shared by every component
//
// Two fixed palettes: "auto" uses the terminal's ANSI colors, "mocha" uses
// true color (Catppuccin Mocha, the palette kftui ships with). Unknown names
// fall back to auto.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

/// Color palette for the component kit
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // Text
    pub text: Color,
    pub subtext: Color,
    pub muted: Color,

    // Surfaces
    pub background: Color,
    pub surface: Color,
    pub border: Color,
    pub border_type: BorderType,

    // Accents
    pub accent: Color,
    pub highlight: Color,
    pub success: Color,
    pub warning: Color,
    pub danger: Color,
}

impl Theme {
    /// Load palette by name
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "mocha" | "catppuccin" | "catppuccin-mocha" => Self::mocha(),
            _ => Self::auto(),
        }
    }

    /// Names accepted by [`Theme::by_name`]
    pub fn available() -> &'static [&'static str] {
        &["auto", "mocha"]
    }

    /// Auto palette - uses terminal's ANSI colors
    pub fn auto() -> Self {
        Self {
            name: "auto".to_string(),
            text: Color::White,
            subtext: Color::Gray,
            muted: Color::DarkGray,
            background: Color::Reset,
            surface: Color::Black,
            border: Color::White,
            border_type: BorderType::Plain,
            accent: Color::Cyan,
            highlight: Color::Yellow,
            success: Color::Green,
            warning: Color::Yellow,
            danger: Color::Red,
        }
    }

    /// Catppuccin Mocha - https://catppuccin.com
    pub fn mocha() -> Self {
        Self {
            name: "mocha".to_string(),
            text: Color::Rgb(205, 214, 244),       // text
            subtext: Color::Rgb(166, 173, 200),    // subtext0
            muted: Color::Rgb(88, 91, 112),        // surface2
            background: Color::Rgb(30, 30, 46),    // base
            surface: Color::Rgb(49, 50, 68),       // surface0
            border: Color::Rgb(69, 71, 90),        // surface1
            border_type: BorderType::Rounded,
            accent: Color::Rgb(203, 166, 247),     // mauve
            highlight: Color::Rgb(249, 226, 175),  // yellow
            success: Color::Rgb(166, 227, 161),    // green
            warning: Color::Rgb(250, 179, 135),    // peach
            danger: Color::Rgb(243, 139, 168),     // red
        }
    }

    /// Border color for a component depending on focus
    pub fn focus_border(&self, focused: bool) -> Style {
        if focused {
            Style::default()
                .fg(self.highlight)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.border)
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::auto()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_name_is_case_insensitive() {
        assert_eq!(Theme::by_name("MOCHA").name, "mocha");
        assert_eq!(Theme::by_name("Catppuccin").name, "mocha");
    }

    #[test]
    fn test_unknown_name_falls_back_to_auto() {
        assert_eq!(Theme::by_name("solarized").name, "auto");
    }
}
