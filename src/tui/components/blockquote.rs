// Blockquote component
//
// Quoted text behind a colored left rule, with an optional icon on the first
// line and an optional citation underneath.

use crate::tui::traits::{Component, RenderContext};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlockquoteProps {
    pub text: String,
    /// Rendered as "— cite" below the text
    pub cite: Option<String>,
    /// Glyph before the first line
    pub icon: Option<String>,
    /// Rule color; the palette accent when unset
    pub color: Option<Color>,
}

pub struct Blockquote {
    props: BlockquoteProps,
}

impl Blockquote {
    pub fn new(props: BlockquoteProps) -> Self {
        Self { props }
    }

    fn lines(&self, ctx: &RenderContext) -> Vec<Line<'static>> {
        let text_style = Style::default()
            .fg(ctx.theme.text)
            .add_modifier(Modifier::ITALIC);
        let mut lines: Vec<Line<'static>> = self
            .props
            .text
            .lines()
            .enumerate()
            .map(|(i, line)| match (&self.props.icon, i) {
                (Some(icon), 0) => Line::from(vec![
                    Span::styled(format!("{icon} "), Style::default().fg(self.rule_color(ctx))),
                    Span::styled(line.to_string(), text_style),
                ]),
                _ => Line::from(Span::styled(line.to_string(), text_style)),
            })
            .collect();

        if let Some(cite) = &self.props.cite {
            lines.push(Line::from(Span::styled(
                format!("— {cite}"),
                Style::default().fg(ctx.theme.subtext),
            )));
        }
        lines
    }

    fn rule_color(&self, ctx: &RenderContext) -> Color {
        self.props.color.unwrap_or(ctx.theme.accent)
    }
}

impl Component for Blockquote {
    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let block = Block::default()
            .borders(Borders::LEFT)
            .border_set(ratatui::symbols::border::THICK)
            .border_style(Style::default().fg(self.rule_color(ctx)));
        let paragraph = Paragraph::new(self.lines(ctx))
            .block(block)
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }

    fn desired_height(&self, _width: u16) -> u16 {
        let cite = usize::from(self.props.cite.is_some());
        (self.props.text.lines().count() + cite) as u16
    }
}
