//! Copied / not-copied visual
//!
//! Stateless: every call takes the current `copied` flag and returns spans.
//! With [`LabelVisibility::ScreenReaderOnly`] nothing textual is drawn, but
//! [`IndicatorView::accessible_text`] still reports the state so the host can
//! announce it (the gallery puts it in its status line).

use crate::theme::Theme;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use serde::Deserialize;
use unicode_width::UnicodeWidthStr;

/// How the label is shown next to the icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelVisibility {
    /// Icon and label
    #[default]
    Visible,
    /// Icon only, label kept for announcements
    IconOnly,
    /// Nothing drawn except padding, label kept for announcements
    ScreenReaderOnly,
}

impl LabelVisibility {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Visible => "visible",
            Self::IconOnly => "icon_only",
            Self::ScreenReaderOnly => "screen_reader_only",
        }
    }
}

/// Icons and labels for the two states
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorProps {
    /// Icon while idle
    pub idle_icon: String,
    /// Icon after a successful copy
    pub copied_icon: String,
    /// Label while idle
    pub idle_label: String,
    /// Label after a successful copy
    pub copied_label: String,
    pub visibility: LabelVisibility,
}

impl Default for IndicatorProps {
    fn default() -> Self {
        Self {
            idle_icon: "⧉".to_string(),
            copied_icon: "✓".to_string(),
            idle_label: "Copy".to_string(),
            copied_label: "Copied".to_string(),
            visibility: LabelVisibility::Visible,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct IndicatorView {
    props: IndicatorProps,
}

impl IndicatorView {
    pub fn new(props: IndicatorProps) -> Self {
        Self { props }
    }

    pub fn props(&self) -> &IndicatorProps {
        &self.props
    }

    pub fn icon(&self, copied: bool) -> &str {
        if copied {
            &self.props.copied_icon
        } else {
            &self.props.idle_icon
        }
    }

    pub fn label(&self, copied: bool) -> &str {
        if copied {
            &self.props.copied_label
        } else {
            &self.props.idle_label
        }
    }

    /// Text conveying the state regardless of what is drawn
    pub fn accessible_text(&self, copied: bool) -> &str {
        self.label(copied)
    }

    /// Spans for the current state
    pub fn line(&self, copied: bool, theme: &Theme) -> Line<'static> {
        let style = if copied {
            Style::default()
                .fg(theme.success)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text)
        };

        let spans = match self.props.visibility {
            LabelVisibility::Visible => vec![
                Span::styled(self.icon(copied).to_string(), style),
                Span::raw(" "),
                Span::styled(self.label(copied).to_string(), style),
            ],
            LabelVisibility::IconOnly => {
                vec![Span::styled(self.icon(copied).to_string(), style)]
            }
            // Reserve the icon's width so layout does not jump between states
            LabelVisibility::ScreenReaderOnly => {
                vec![Span::raw(" ".repeat(self.icon(copied).width()))]
            }
        };
        Line::from(spans)
    }

    /// Widest rendering across both states, so triggers keep a stable size
    pub fn max_width(&self) -> u16 {
        let width = |copied: bool| match self.props.visibility {
            LabelVisibility::Visible => self.icon(copied).width() + 1 + self.label(copied).width(),
            LabelVisibility::IconOnly | LabelVisibility::ScreenReaderOnly => {
                self.icon(copied).width()
            }
        };
        width(false).max(width(true)) as u16
    }
}
