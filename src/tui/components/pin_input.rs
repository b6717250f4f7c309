// Pin input component
//
// Fixed-length code entry (one-time codes, short tokens). Cells are drawn in
// groups, e.g. `[1][2][3] - [4][5][6]`, and can hide what was typed.

use crate::tui::traits::{Component, Handled, Interactive, RenderContext};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinInputProps {
    /// Number of cells
    pub length: usize,
    /// Cell counts per visual group; a single group when empty
    pub groups: Vec<usize>,
    /// Drawn between groups
    pub separator: String,
    /// Reject anything but ASCII digits
    pub numeric_only: bool,
    /// Show `•` instead of the typed character
    pub mask: bool,
}

impl Default for PinInputProps {
    fn default() -> Self {
        Self {
            length: 6,
            groups: vec![3, 3],
            separator: "-".to_string(),
            numeric_only: true,
            mask: false,
        }
    }
}

pub struct PinInput {
    props: PinInputProps,
    chars: Vec<char>,
}

impl PinInput {
    pub fn new(props: PinInputProps) -> Self {
        Self {
            chars: Vec::with_capacity(props.length),
            props,
        }
    }

    /// Append a character; returns false when full or rejected
    pub fn push(&mut self, c: char) -> bool {
        if self.is_complete() || c.is_control() || c.is_whitespace() {
            return false;
        }
        if self.props.numeric_only && !c.is_ascii_digit() {
            return false;
        }
        self.chars.push(c);
        true
    }

    pub fn backspace(&mut self) -> bool {
        self.chars.pop().is_some()
    }

    pub fn clear(&mut self) {
        self.chars.clear();
    }

    pub fn is_complete(&self) -> bool {
        self.chars.len() >= self.props.length
    }

    /// Entered characters without separators
    pub fn value(&self) -> String {
        self.chars.iter().collect()
    }

    /// Group sizes covering exactly `length` cells
    fn layout(&self) -> Vec<usize> {
        let mut groups = Vec::new();
        let mut remaining = self.props.length;
        for &size in &self.props.groups {
            if remaining == 0 {
                break;
            }
            let take = size.min(remaining);
            if take > 0 {
                groups.push(take);
                remaining -= take;
            }
        }
        if remaining > 0 {
            groups.push(remaining);
        }
        groups
    }

    fn cell_text(&self, index: usize) -> String {
        match self.chars.get(index) {
            Some(_) if self.props.mask => "•".to_string(),
            Some(c) => c.to_string(),
            None => "_".to_string(),
        }
    }
}

impl Component for PinInput {
    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let cursor = self.chars.len();
        let mut spans = Vec::new();
        let mut index = 0;

        for (g, size) in self.layout().into_iter().enumerate() {
            if g > 0 {
                spans.push(Span::styled(
                    format!(" {} ", self.props.separator),
                    Style::default().fg(theme.muted),
                ));
            }
            for _ in 0..size {
                let mut style = if index < cursor {
                    Style::default().fg(theme.text).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.muted)
                };
                if ctx.focused && index == cursor {
                    style = style.fg(theme.highlight).add_modifier(Modifier::REVERSED);
                }
                spans.push(Span::styled(format!("[{}]", self.cell_text(index)), style));
                index += 1;
            }
        }

        if self.is_complete() {
            spans.push(Span::styled(" ✓", Style::default().fg(theme.success)));
        }
        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

impl Interactive for PinInput {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        if key.kind != KeyEventKind::Press {
            return Handled::No;
        }
        match key.code {
            // Rejected characters are still consumed so they never reach hotkeys
            KeyCode::Char(c) => {
                self.push(c);
                Handled::Yes
            }
            KeyCode::Backspace => self.backspace().into(),
            KeyCode::Delete => {
                self.clear();
                Handled::Yes
            }
            _ => Handled::No,
        }
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("type code  Bksp:erase  Del:clear")
    }
}
