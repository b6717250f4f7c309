// Hover card component
//
// A target label that reveals a floating card while the mouse rests on it
// or while it is focused and toggled with Enter. The card is drawn on top
// of whatever sits below the target.

use crate::tui::traits::{Component, Handled, Interactive, RenderContext};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverCardProps {
    /// Label the user points at
    pub target: String,
    /// Card title
    pub title: Option<String>,
    /// Card body, one entry per line
    pub lines: Vec<String>,
    /// Card width in columns (clamped to the available frame)
    pub width: u16,
}

impl Default for HoverCardProps {
    fn default() -> Self {
        Self {
            target: String::new(),
            title: None,
            lines: Vec::new(),
            width: 32,
        }
    }
}

pub struct HoverCard {
    props: HoverCardProps,
    hovered: bool,
    pinned: bool,
    target_area: Option<Rect>,
}

impl HoverCard {
    pub fn new(props: HoverCardProps) -> Self {
        Self {
            props,
            hovered: false,
            pinned: false,
            target_area: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.hovered || self.pinned
    }

    /// Track pointer position; returns true when the open state changed
    pub fn handle_mouse(&mut self, mouse: &MouseEvent) -> bool {
        if !matches!(
            mouse.kind,
            MouseEventKind::Moved | MouseEventKind::Down(_) | MouseEventKind::Drag(_)
        ) {
            return false;
        }
        let inside = self
            .target_area
            .is_some_and(|area| area.contains(Position::new(mouse.column, mouse.row)));
        let changed = inside != self.hovered;
        self.hovered = inside;
        changed
    }

    /// Close a keyboard-pinned card (e.g. when focus moves away)
    pub fn dismiss(&mut self) {
        self.pinned = false;
    }

    fn card_area(&self, target: Rect, frame: Rect) -> Rect {
        let height = self.props.lines.len() as u16 + 2;
        let width = self.props.width.min(frame.width);
        let x = target.x.min(frame.right().saturating_sub(width));
        // Prefer below the target, flip above when there is no room
        let y = if target.bottom() + height <= frame.bottom() {
            target.bottom()
        } else {
            target.y.saturating_sub(height)
        };
        Rect::new(x, y, width, height.min(frame.height))
    }
}

impl Component for HoverCard {
    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let label_width = (self.props.target.width() as u16).min(area.width);
        let target = Rect::new(area.x, area.y, label_width, area.height.min(1));
        self.target_area = Some(target);

        let mut style = Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::UNDERLINED);
        if ctx.focused {
            style = style.add_modifier(Modifier::BOLD).fg(theme.highlight);
        }
        f.render_widget(
            Paragraph::new(Span::styled(self.props.target.clone(), style)),
            target,
        );

        if !self.is_open() {
            return;
        }

        let card = self.card_area(target, f.area());
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.surface));
        if let Some(title) = &self.props.title {
            block = block.title(format!(" {title} "));
        }
        let body: Vec<Line> = self
            .props
            .lines
            .iter()
            .map(|l| Line::from(Span::styled(l.clone(), Style::default().fg(theme.text))))
            .collect();

        f.render_widget(Clear, card);
        f.render_widget(
            Paragraph::new(body).block(block).wrap(Wrap { trim: true }),
            card,
        );
    }
}

impl Interactive for HoverCard {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        if key.kind != KeyEventKind::Press {
            return Handled::No;
        }
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.pinned = !self.pinned;
                Handled::Yes
            }
            KeyCode::Esc if self.pinned => {
                self.pinned = false;
                Handled::Yes
            }
            _ => Handled::No,
        }
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("Enter:show card  Esc:hide")
    }
}
