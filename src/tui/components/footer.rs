// Footer component
//
// Bottom line: key hints on the left, app name and version on the right.
// The version arrives asynchronously from the shell bridge, so it may be
// missing for the first frames.

use crate::tui::traits::{Component, RenderContext};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterProps {
    pub app_name: String,
    /// Key hints as `(key, description)` pairs
    pub hints: Vec<(String, String)>,
}

impl Default for FooterProps {
    fn default() -> Self {
        Self {
            app_name: "kftray-ui".to_string(),
            hints: vec![
                ("Tab".to_string(), "focus".to_string()),
                ("q".to_string(), "quit".to_string()),
            ],
        }
    }
}

pub struct Footer {
    props: FooterProps,
    version: Option<String>,
    /// Hint for the focused component, shown before the global hints
    context_hint: Option<&'static str>,
}

impl Footer {
    pub fn new(props: FooterProps) -> Self {
        Self {
            props,
            version: None,
            context_hint: None,
        }
    }

    pub fn set_version(&mut self, version: impl Into<String>) {
        self.version = Some(version.into());
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn set_context_hint(&mut self, hint: Option<&'static str>) {
        self.context_hint = hint;
    }

    fn version_text(&self) -> String {
        match &self.version {
            Some(v) => format!("{} v{} ", self.props.app_name, v.trim_start_matches('v')),
            None => format!("{} v… ", self.props.app_name),
        }
    }
}

impl Component for Footer {
    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let version = self.version_text();
        let [hints_area, version_area] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(version.width() as u16),
        ])
        .areas(area);

        let key_style = Style::default().fg(theme.accent).add_modifier(Modifier::BOLD);
        let desc_style = Style::default().fg(theme.subtext);
        let mut spans = vec![Span::raw(" ")];
        if let Some(hint) = self.context_hint {
            spans.push(Span::styled(hint, desc_style));
            spans.push(Span::styled(" │ ", Style::default().fg(theme.muted)));
        }
        for (key, desc) in &self.props.hints {
            spans.push(Span::styled(key.clone(), key_style));
            spans.push(Span::styled(format!(":{desc}  "), desc_style));
        }

        f.render_widget(Paragraph::new(Line::from(spans)), hints_area);
        f.render_widget(
            Paragraph::new(version)
                .style(Style::default().fg(theme.muted))
                .alignment(Alignment::Right),
            version_area,
        );
    }
}
