// Progress indicators
//
// A horizontal bar and a one-glyph "circle". Both take a percentage and clamp
// it to 0..=100 before drawing.

use crate::tui::traits::{Component, RenderContext};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Bar
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProgressBarProps {
    /// Percentage, clamped to 0..=100
    pub value: f64,
    /// Shown after the bar; the percentage when unset
    pub label: Option<String>,
    /// Alternate fill glyphs, shifted each animation frame
    pub striped: bool,
    /// Fill color; the palette accent when unset
    pub color: Option<Color>,
}

pub struct ProgressBar {
    props: ProgressBarProps,
}

impl ProgressBar {
    pub fn new(props: ProgressBarProps) -> Self {
        let mut bar = Self { props };
        bar.set_value(bar.props.value);
        bar
    }

    pub fn value(&self) -> f64 {
        self.props.value
    }

    pub fn set_value(&mut self, value: f64) {
        self.props.value = clamp_percent(value);
    }

    fn label(&self) -> String {
        self.props
            .label
            .clone()
            .unwrap_or_else(|| format!("{:>3.0}%", self.props.value))
    }

    /// Filled cells out of `width`
    fn filled(&self, width: u16) -> u16 {
        ((self.props.value / 100.0) * f64::from(width)).round() as u16
    }

    fn bar_text(&self, width: u16, frame: usize) -> (String, String) {
        let filled = self.filled(width);
        let fill: String = (0..filled)
            .map(|i| {
                if self.props.striped && (usize::from(i) + frame) % 2 == 1 {
                    '▓'
                } else {
                    '█'
                }
            })
            .collect();
        let empty = "░".repeat(usize::from(width - filled));
        (fill, empty)
    }
}

impl Component for ProgressBar {
    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let label = format!(" {}", self.label());
        let bar_width = area.width.saturating_sub(label.chars().count() as u16);
        let (fill, empty) = self.bar_text(bar_width, ctx.animation_frame);
        let color = self.props.color.unwrap_or(ctx.theme.accent);

        let line = Line::from(vec![
            Span::styled(fill, Style::default().fg(color)),
            Span::styled(empty, Style::default().fg(ctx.theme.muted)),
            Span::styled(label, Style::default().fg(ctx.theme.text)),
        ]);
        f.render_widget(Paragraph::new(line), area);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Circle
// ─────────────────────────────────────────────────────────────────────────────

const CIRCLE_GLYPHS: [&str; 5] = ["○", "◔", "◑", "◕", "●"];

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProgressCircleProps {
    /// Percentage, clamped to 0..=100
    pub value: f64,
    /// Text after the percentage
    pub label: Option<String>,
    pub color: Option<Color>,
}

pub struct ProgressCircle {
    props: ProgressCircleProps,
}

impl ProgressCircle {
    pub fn new(props: ProgressCircleProps) -> Self {
        let mut circle = Self { props };
        circle.set_value(circle.props.value);
        circle
    }

    pub fn value(&self) -> f64 {
        self.props.value
    }

    pub fn set_value(&mut self, value: f64) {
        self.props.value = clamp_percent(value);
    }

    /// Quarter-filled ring for the current value; full only at 100
    pub fn glyph(&self) -> &'static str {
        let quadrant = (self.props.value / 25.0).floor() as usize;
        CIRCLE_GLYPHS[quadrant.min(CIRCLE_GLYPHS.len() - 1)]
    }
}

impl Component for ProgressCircle {
    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let color = self.props.color.unwrap_or(ctx.theme.accent);
        let mut spans = vec![
            Span::styled(self.glyph(), Style::default().fg(color)),
            Span::styled(
                format!(" {:.0}%", self.props.value),
                Style::default()
                    .fg(ctx.theme.text)
                    .add_modifier(Modifier::BOLD),
            ),
        ];
        if let Some(label) = &self.props.label {
            spans.push(Span::styled(
                format!(" {label}"),
                Style::default().fg(ctx.theme.subtext),
            ));
        }
        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render_row(component: &mut dyn Component, width: u16, frame: usize) -> String {
        let theme = Theme::auto();
        let mut terminal = Terminal::new(TestBackend::new(width, 1)).unwrap();
        terminal
            .draw(|f| component.render(f, f.area(), &RenderContext::new(&theme, frame)))
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..width).map(|x| buffer[(x, 0)].symbol().to_string()).collect()
    }

    #[test]
    fn test_values_are_clamped() {
        let mut bar = ProgressBar::new(ProgressBarProps {
            value: 140.0,
            ..Default::default()
        });
        assert_eq!(bar.value(), 100.0);
        bar.set_value(-3.0);
        assert_eq!(bar.value(), 0.0);
        bar.set_value(f64::NAN);
        assert_eq!(bar.value(), 0.0);

        let circle = ProgressCircle::new(ProgressCircleProps {
            value: 250.0,
            ..Default::default()
        });
        assert_eq!(circle.value(), 100.0);
    }

    #[test]
    fn test_bar_fills_proportionally() {
        let mut bar = ProgressBar::new(ProgressBarProps {
            value: 50.0,
            ..Default::default()
        });
        // 15 columns: 10 for the bar, 5 for " 50%"
        assert_eq!(render_row(&mut bar, 15, 0), "█████░░░░░  50%");
    }

    #[test]
    fn test_striped_bar_alternates_with_frame() {
        let mut bar = ProgressBar::new(ProgressBarProps {
            value: 100.0,
            label: Some("done".to_string()),
            striped: true,
            color: None,
        });
        assert_eq!(render_row(&mut bar, 9, 0), "█▓█▓ done");
        assert_eq!(render_row(&mut bar, 9, 1), "▓█▓█ done");
    }

    #[test]
    fn test_circle_glyph_by_quadrant() {
        let mut circle = ProgressCircle::new(ProgressCircleProps::default());
        let cases = [
            (0.0, "○"),
            (24.9, "○"),
            (25.0, "◔"),
            (50.0, "◑"),
            (99.0, "◕"),
            (100.0, "●"),
        ];
        for (value, glyph) in cases {
            circle.set_value(value);
            assert_eq!(circle.glyph(), glyph, "value {value}");
        }
    }

    #[test]
    fn test_circle_renders_percentage_and_label() {
        let mut circle = ProgressCircle::new(ProgressCircleProps {
            value: 75.0,
            label: Some("synced".to_string()),
            color: None,
        });
        assert_eq!(render_row(&mut circle, 13, 0), "◕ 75% synced ");
    }
}
