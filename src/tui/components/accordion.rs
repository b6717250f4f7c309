// Accordion component
//
// Stack of titled sections; each section's body is shown only when expanded.
// In single mode opening one section closes the others.

use crate::tui::traits::{Component, Handled, Interactive, RenderContext};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// One collapsible section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccordionItem {
    pub title: String,
    pub body: String,
}

impl AccordionItem {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccordionProps {
    /// Allow more than one section open at a time
    pub multiple: bool,
    /// Sections open on mount
    pub default_open: Vec<usize>,
    /// Draw a bordered block around the accordion
    pub bordered: bool,
}

impl Default for AccordionProps {
    fn default() -> Self {
        Self {
            multiple: false,
            default_open: Vec::new(),
            bordered: true,
        }
    }
}

pub struct Accordion {
    items: Vec<AccordionItem>,
    open: Vec<bool>,
    cursor: usize,
    props: AccordionProps,
}

impl Accordion {
    pub fn new(items: Vec<AccordionItem>, props: AccordionProps) -> Self {
        let mut accordion = Self {
            open: vec![false; items.len()],
            items,
            cursor: 0,
            props,
        };
        let initial = accordion.props.default_open.clone();
        for index in initial {
            accordion.set_open(index, true);
        }
        accordion
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open.get(index).copied().unwrap_or(false)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn open_indices(&self) -> Vec<usize> {
        self.open
            .iter()
            .enumerate()
            .filter_map(|(i, open)| open.then_some(i))
            .collect()
    }

    fn set_open(&mut self, index: usize, open: bool) {
        if index >= self.items.len() {
            return;
        }
        if open && !self.props.multiple {
            self.open.iter_mut().for_each(|o| *o = false);
        }
        self.open[index] = open;
    }

    /// Flip a section open/closed
    pub fn toggle(&mut self, index: usize) {
        let open = !self.is_open(index);
        self.set_open(index, open);
    }

    fn lines(&self, ctx: &RenderContext) -> Vec<Line<'static>> {
        let theme = ctx.theme;
        let mut lines = Vec::new();
        for (i, item) in self.items.iter().enumerate() {
            let open = self.is_open(i);
            let marker = if open { "▾" } else { "▸" };
            let mut title_style = Style::default()
                .fg(theme.text)
                .add_modifier(Modifier::BOLD);
            if ctx.focused && i == self.cursor {
                title_style = title_style.fg(theme.highlight);
            }
            lines.push(Line::from(vec![
                Span::styled(format!("{marker} "), Style::default().fg(theme.accent)),
                Span::styled(item.title.clone(), title_style),
            ]));
            if open {
                for body_line in item.body.lines() {
                    lines.push(Line::from(Span::styled(
                        format!("  {body_line}"),
                        Style::default().fg(theme.subtext),
                    )));
                }
            }
        }
        lines
    }
}

impl Component for Accordion {
    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut paragraph = Paragraph::new(self.lines(ctx)).wrap(Wrap { trim: false });
        if self.props.bordered {
            paragraph = paragraph.block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(ctx.theme.border_type)
                    .border_style(ctx.theme.focus_border(ctx.focused))
                    .title(" Accordion "),
            );
        }
        f.render_widget(paragraph, area);
    }

    fn desired_height(&self, _width: u16) -> u16 {
        let body: usize = self
            .items
            .iter()
            .enumerate()
            .filter(|(i, _)| self.is_open(*i))
            .map(|(_, item)| item.body.lines().count())
            .sum();
        let chrome = if self.props.bordered { 2 } else { 0 };
        (self.items.len() + body + chrome) as u16
    }
}

impl Interactive for Accordion {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        if key.kind != KeyEventKind::Press || self.items.is_empty() {
            return Handled::No;
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
                Handled::Yes
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.cursor = (self.cursor + 1).min(self.items.len() - 1);
                Handled::Yes
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.toggle(self.cursor);
                Handled::Yes
            }
            _ => Handled::No,
        }
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("↑↓:move  Enter:toggle")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn items() -> Vec<AccordionItem> {
        vec![
            AccordionItem::new("Context", "kind-local"),
            AccordionItem::new("Namespace", "default\nmonitoring"),
            AccordionItem::new("Ports", "8080 → 80"),
        ]
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_single_mode_closes_others() {
        let mut accordion = Accordion::new(items(), AccordionProps::default());
        accordion.toggle(0);
        accordion.toggle(2);
        assert_eq!(accordion.open_indices(), vec![2]);
    }

    #[test]
    fn test_multiple_mode_keeps_others_open() {
        let mut accordion = Accordion::new(
            items(),
            AccordionProps {
                multiple: true,
                ..Default::default()
            },
        );
        accordion.toggle(0);
        accordion.toggle(2);
        assert_eq!(accordion.open_indices(), vec![0, 2]);
        accordion.toggle(0);
        assert_eq!(accordion.open_indices(), vec![2]);
    }

    #[test]
    fn test_default_open_and_out_of_range() {
        let accordion = Accordion::new(
            items(),
            AccordionProps {
                default_open: vec![1, 9],
                ..Default::default()
            },
        );
        assert_eq!(accordion.open_indices(), vec![1]);
        // 3 titles + 2 body lines + 2 border rows
        assert_eq!(accordion.desired_height(40), 7);
    }

    #[test]
    fn test_keyboard_moves_and_toggles() {
        let mut accordion = Accordion::new(items(), AccordionProps::default());
        assert_eq!(accordion.handle_key(key(KeyCode::Down)), Handled::Yes);
        assert_eq!(accordion.handle_key(key(KeyCode::Down)), Handled::Yes);
        assert_eq!(accordion.handle_key(key(KeyCode::Down)), Handled::Yes);
        assert_eq!(accordion.cursor(), 2);

        accordion.handle_key(key(KeyCode::Enter));
        assert!(accordion.is_open(2));
        assert_eq!(accordion.handle_key(key(KeyCode::Char('x'))), Handled::No);
    }
}
