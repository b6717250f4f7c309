// Skeleton loader
//
// Placeholder rows drawn while content is loading. A lighter band sweeps
// across the rows on each animation frame. Once loaded, the real content is
// drawn instead.

use crate::tui::traits::{Component, RenderContext};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Width of the shimmer band in columns
const SHIMMER_WIDTH: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkeletonProps {
    /// Placeholder rows
    pub rows: u16,
    /// Width of each row as a percentage of the area, cycled
    pub row_widths: Vec<u16>,
    /// Animate the shimmer band
    pub shimmer: bool,
}

impl Default for SkeletonProps {
    fn default() -> Self {
        Self {
            rows: 3,
            row_widths: vec![100, 80, 60],
            shimmer: true,
        }
    }
}

pub struct Skeleton {
    props: SkeletonProps,
    loaded: bool,
    content: Vec<String>,
}

impl Skeleton {
    pub fn new(props: SkeletonProps) -> Self {
        Self {
            props,
            loaded: false,
            content: Vec::new(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Swap the placeholder for real content
    pub fn set_content(&mut self, content: Vec<String>) {
        self.content = content;
        self.loaded = true;
    }

    pub fn set_loading(&mut self) {
        self.loaded = false;
    }

    fn row_width(&self, row: usize, area_width: u16) -> usize {
        let percent = if self.props.row_widths.is_empty() {
            100
        } else {
            self.props.row_widths[row % self.props.row_widths.len()].min(100)
        };
        usize::from(area_width) * usize::from(percent) / 100
    }

    fn placeholder_line(&self, row: usize, area_width: u16, ctx: &RenderContext) -> Line<'static> {
        let width = self.row_width(row, area_width);
        let base = Style::default().fg(ctx.theme.muted);
        if !self.props.shimmer || width == 0 {
            return Line::from(Span::styled("░".repeat(width), base));
        }

        // Band position wraps past the widest row so it re-enters from the left
        let span = usize::from(area_width) + SHIMMER_WIDTH;
        let start = ctx.animation_frame % span.max(1);
        let spans: Vec<Span> = (0..width)
            .map(|x| {
                if x + SHIMMER_WIDTH > start && x <= start {
                    Span::styled("▒", Style::default().fg(ctx.theme.subtext))
                } else {
                    Span::styled("░", base)
                }
            })
            .collect();
        Line::from(spans)
    }
}

impl Component for Skeleton {
    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let lines: Vec<Line> = if self.loaded {
            self.content
                .iter()
                .map(|l| Line::from(Span::styled(l.clone(), Style::default().fg(ctx.theme.text))))
                .collect()
        } else {
            (0..usize::from(self.props.rows))
                .map(|row| self.placeholder_line(row, area.width, ctx))
                .collect()
        };
        f.render_widget(Paragraph::new(lines), area);
    }

    fn desired_height(&self, _width: u16) -> u16 {
        if self.loaded {
            self.content.len() as u16
        } else {
            self.props.rows
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn draw(skeleton: &mut Skeleton, frame: usize) -> Vec<String> {
        let theme = Theme::auto();
        let mut terminal = Terminal::new(TestBackend::new(10, 3)).unwrap();
        terminal
            .draw(|f| skeleton.render(f, f.area(), &RenderContext::new(&theme, frame)))
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..3)
            .map(|y| (0..10).map(|x| buffer[(x, y)].symbol().to_string()).collect())
            .collect()
    }

    #[test]
    fn test_placeholder_rows_follow_widths() {
        let mut skeleton = Skeleton::new(SkeletonProps {
            shimmer: false,
            ..Default::default()
        });
        let rows = draw(&mut skeleton, 0);
        assert_eq!(rows[0], "░░░░░░░░░░");
        assert_eq!(rows[1], "░░░░░░░░  ");
        assert_eq!(rows[2], "░░░░░░    ");
        assert_eq!(skeleton.desired_height(10), 3);
    }

    #[test]
    fn test_shimmer_band_moves() {
        let mut skeleton = Skeleton::new(SkeletonProps {
            rows: 1,
            row_widths: vec![100],
            shimmer: true,
        });
        assert_eq!(draw(&mut skeleton, 0)[0], "▒░░░░░░░░░");
        assert_eq!(draw(&mut skeleton, 5)[0], "░░▒▒▒▒░░░░");
    }

    #[test]
    fn test_loaded_shows_content() {
        let mut skeleton = Skeleton::new(SkeletonProps::default());
        skeleton.set_content(vec!["ready".to_string()]);
        assert!(skeleton.is_loaded());
        assert_eq!(draw(&mut skeleton, 0)[0], "ready     ");
        assert_eq!(skeleton.desired_height(10), 1);

        skeleton.set_loading();
        assert_eq!(skeleton.desired_height(10), 3);
    }
}
