//! Toast notification component
//!
//! A non-blocking overlay in the bottom-right corner, drawn on top of all
//! other content. Expiry is owned by the caller: it schedules a timer for
//! [`TOAST_DURATION`] and drops the toast when the timer fires.

use crate::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::Duration;
use unicode_width::UnicodeWidthStr;

/// How long a toast stays on screen
pub const TOAST_DURATION: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastLevel {
    #[default]
    Info,
    Success,
    Error,
}

/// A transient notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: Option<String>,
    pub message: String,
    pub level: ToastLevel,
    /// Glyph before the message
    pub icon: Option<String>,
}

impl Toast {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            title: None,
            message: message.into(),
            level: ToastLevel::Info,
            icon: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Error,
            ..Self::new(message)
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Success,
            ..Self::new(message)
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    fn body(&self) -> String {
        match &self.icon {
            Some(icon) => format!("{icon} {}", self.message),
            None => self.message.clone(),
        }
    }

    /// Area in the bottom-right corner of `area`, offset by 2 cells
    pub fn area(&self, area: Rect) -> Rect {
        let title_width = self.title.as_ref().map_or(0, |t| t.width() + 4);
        let content = self.body().width().max(title_width) as u16;
        // 2 columns of padding on each side (border included)
        let width = (content + 4).min(area.width.saturating_sub(4));
        let height = 3;
        let x = area.right().saturating_sub(width + 2);
        let y = area.bottom().saturating_sub(height + 2);
        Rect::new(x, y, width, height.min(area.height))
    }

    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let toast_area = self.area(area);
        let color = match self.level {
            ToastLevel::Info => theme.highlight,
            ToastLevel::Success => theme.success,
            ToastLevel::Error => theme.danger,
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(color))
            .style(Style::default().bg(theme.background));
        if let Some(title) = &self.title {
            block = block.title(Span::styled(
                format!(" {title} "),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ));
        }

        let text = Paragraph::new(Line::from(self.body()))
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.text))
            .block(block);

        f.render_widget(Clear, toast_area);
        f.render_widget(text, toast_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn test_positioned_bottom_right() {
        let toast = Toast::new("Copied");
        let area = toast.area(Rect::new(0, 0, 80, 24));
        assert_eq!(area, Rect::new(68, 19, 10, 3));
    }

    #[test]
    fn test_title_widens_toast() {
        let toast = Toast::new("ok").with_title("Export finished");
        assert_eq!(toast.area(Rect::new(0, 0, 80, 24)).width, 23);
    }

    #[test]
    fn test_renders_over_content_with_level_color() {
        let theme = Theme::auto();
        let toast = Toast::error("write failed").with_icon("!");
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        terminal
            .draw(|f| {
                f.render_widget(Paragraph::new("x".repeat(400)), f.area());
                toast.render(f, f.area(), &theme);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let area = toast.area(Rect::new(0, 0, 40, 10));
        let row: String = (area.x..area.right())
            .map(|x| buffer[(x, area.y + 1)].symbol().to_string())
            .collect();
        assert!(row.contains("! write failed"));
        assert_eq!(buffer[(area.x, area.y)].fg, theme.danger);
    }
}
