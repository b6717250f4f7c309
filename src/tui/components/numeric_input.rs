// Numeric input component
//
// A number field with step controls. Typing edits a text buffer; Enter (or
// stepping, or losing focus) commits it. Committed values are clamped to
// [min, max]; unparseable text reverts to the last good value.

use crate::tui::traits::{Component, Handled, Interactive, RenderContext};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

#[derive(Debug, Clone, PartialEq)]
pub struct NumericInputProps {
    /// Text before the field
    pub label: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Amount added/removed per Up/Down
    pub step: f64,
    /// Decimal places shown and kept
    pub precision: usize,
    /// Value on mount
    pub default_value: f64,
}

impl Default for NumericInputProps {
    fn default() -> Self {
        Self {
            label: String::new(),
            min: None,
            max: None,
            step: 1.0,
            precision: 0,
            default_value: 0.0,
        }
    }
}

pub struct NumericInput {
    props: NumericInputProps,
    value: f64,
    /// Uncommitted text while the user is typing
    editing: Option<String>,
}

impl NumericInput {
    pub fn new(props: NumericInputProps) -> Self {
        let mut input = Self {
            value: 0.0,
            editing: None,
            props,
        };
        input.value = input.normalize(input.props.default_value);
        input
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn set_value(&mut self, value: f64) {
        self.value = self.normalize(value);
        self.editing = None;
    }

    /// Clamp to bounds and round to the configured precision
    fn normalize(&self, value: f64) -> f64 {
        let mut v = value;
        if let Some(min) = self.props.min {
            v = v.max(min);
        }
        if let Some(max) = self.props.max {
            v = v.min(max);
        }
        let factor = 10f64.powi(self.props.precision as i32);
        (v * factor).round() / factor
    }

    pub fn display_value(&self) -> String {
        match &self.editing {
            Some(buffer) => buffer.clone(),
            None => format!("{:.*}", self.props.precision, self.value),
        }
    }

    /// Parse and apply the edit buffer
    pub fn commit(&mut self) {
        if let Some(buffer) = self.editing.take() {
            match buffer.trim().parse::<f64>() {
                Ok(parsed) if parsed.is_finite() => self.value = self.normalize(parsed),
                _ => tracing::debug!("Discarding invalid numeric input {:?}", buffer),
            }
        }
    }

    pub fn increment(&mut self) {
        self.commit();
        self.value = self.normalize(self.value + self.props.step);
    }

    pub fn decrement(&mut self) {
        self.commit();
        self.value = self.normalize(self.value - self.props.step);
    }

    fn accepts(&self, c: char, buffer: &str) -> bool {
        match c {
            '0'..='9' => true,
            '-' => buffer.is_empty() && self.props.min.map_or(true, |min| min < 0.0),
            '.' => self.props.precision > 0 && !buffer.contains('.'),
            _ => false,
        }
    }
}

impl Component for NumericInput {
    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let mut value_style = Style::default().fg(theme.text).bg(theme.surface);
        if ctx.focused {
            value_style = value_style.add_modifier(Modifier::BOLD);
        }
        if self.editing.is_some() {
            value_style = value_style.fg(theme.highlight);
        }
        let control = Style::default().fg(theme.accent);

        let mut spans = Vec::new();
        if !self.props.label.is_empty() {
            spans.push(Span::styled(
                format!("{}: ", self.props.label),
                Style::default().fg(theme.subtext),
            ));
        }
        spans.push(Span::styled("[-] ", control));
        spans.push(Span::styled(format!(" {} ", self.display_value()), value_style));
        spans.push(Span::styled(" [+]", control));

        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

impl Interactive for NumericInput {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        if key.kind != KeyEventKind::Press {
            return Handled::No;
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('+') => {
                self.increment();
                Handled::Yes
            }
            KeyCode::Down => {
                self.decrement();
                Handled::Yes
            }
            KeyCode::Enter => {
                self.commit();
                Handled::Yes
            }
            KeyCode::Esc if self.editing.is_some() => {
                self.editing = None;
                Handled::Yes
            }
            KeyCode::Backspace => {
                let mut buffer = self.editing.take().unwrap_or_else(|| self.display_value());
                buffer.pop();
                self.editing = Some(buffer);
                Handled::Yes
            }
            KeyCode::Char(c) => {
                let buffer = self.editing.clone().unwrap_or_default();
                if self.accepts(c, &buffer) {
                    self.editing = Some(format!("{buffer}{c}"));
                }
                // Rejected characters are still consumed so they never reach hotkeys
                Handled::Yes
            }
            _ => Handled::No,
        }
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("↑↓:step  0-9:type  Enter:commit")
    }
}
