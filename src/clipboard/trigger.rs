//! Binding from user activation to the copy action
//!
//! A trigger knows how it looks (shape, size, variant) and which inputs
//! activate it. It does not copy anything itself; the owning
//! [`CopyControl`](super::CopyControl) turns an activation into a copy request.

use super::indicator::IndicatorView;
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use serde::Deserialize;

/// Interactive shape of the trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerShape {
    /// Bracketed button with icon and label
    #[default]
    Button,
    /// Underlined text, no chrome
    Link,
    /// Icon glyph only
    Icon,
}

/// Horizontal padding inside a button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerSize {
    Xs,
    #[default]
    Sm,
    Md,
    Lg,
}

impl TriggerSize {
    pub fn padding(self) -> usize {
        match self {
            Self::Xs => 0,
            Self::Sm => 1,
            Self::Md => 2,
            Self::Lg => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Xs => "xs",
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
        }
    }
}

/// Fill / decoration style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerVariant {
    /// Accent background
    Solid,
    /// Brackets, no fill
    #[default]
    Outline,
    /// No decoration at all
    Ghost,
    /// Surface background
    Subtle,
}

impl TriggerVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Outline => "outline",
            Self::Ghost => "ghost",
            Self::Subtle => "subtle",
        }
    }
}

/// Presentational props passed through to the interactive element
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TriggerProps {
    /// Button, link or icon
    pub shape: TriggerShape,
    /// Padding around the content (buttons only)
    pub size: TriggerSize,
    /// Fill style (buttons only)
    pub variant: TriggerVariant,
    /// Disabled triggers render dimmed and ignore input
    pub disabled: bool,
    /// Global shortcut that activates the trigger without focus
    pub hotkey: Option<char>,
}

#[derive(Debug, Clone, Default)]
pub struct CopyTrigger {
    props: TriggerProps,
    /// Where the trigger was last drawn, for mouse hit-testing
    last_area: Option<Rect>,
}

impl CopyTrigger {
    pub fn new(props: TriggerProps) -> Self {
        Self {
            props,
            last_area: None,
        }
    }

    pub fn props(&self) -> &TriggerProps {
        &self.props
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.props.disabled = disabled;
    }

    /// Whether a key press should fire the copy action
    pub fn activates_on_key(&self, key: &KeyEvent, focused: bool) -> bool {
        if self.props.disabled || key.kind != KeyEventKind::Press {
            return false;
        }
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => focused,
            KeyCode::Char(c) => self.props.hotkey == Some(c),
            _ => false,
        }
    }

    /// Whether a left click landed on the trigger
    pub fn activates_on_mouse(&self, mouse: &MouseEvent) -> bool {
        if self.props.disabled {
            return false;
        }
        let MouseEventKind::Down(MouseButton::Left) = mouse.kind else {
            return false;
        };
        self.last_area
            .is_some_and(|area| area.contains(Position::new(mouse.column, mouse.row)))
    }

    /// Columns the trigger occupies
    pub fn width(&self, indicator: &IndicatorView) -> u16 {
        match self.props.shape {
            TriggerShape::Button => {
                let chrome = match self.props.variant {
                    TriggerVariant::Outline => 2,
                    _ => 0,
                };
                indicator.max_width() + (self.props.size.padding() * 2) as u16 + chrome
            }
            TriggerShape::Link => indicator.max_width(),
            TriggerShape::Icon => {
                let copied = indicator.icon(true).chars().count();
                let idle = indicator.icon(false).chars().count();
                copied.max(idle) as u16
            }
        }
    }

    /// Styled content for the current state
    pub fn line(
        &self,
        copied: bool,
        focused: bool,
        indicator: &IndicatorView,
        theme: &Theme,
    ) -> Line<'static> {
        let mut base = match (self.props.shape, self.props.variant) {
            (TriggerShape::Button, TriggerVariant::Solid) => {
                Style::default().bg(theme.accent).fg(theme.background)
            }
            (TriggerShape::Button, TriggerVariant::Subtle) => Style::default().bg(theme.surface),
            _ => Style::default(),
        };
        if self.props.disabled {
            base = base.fg(theme.muted).add_modifier(Modifier::DIM);
        }
        if focused {
            base = base.add_modifier(Modifier::REVERSED);
        }

        let mut content = indicator.line(copied, theme);
        if self.props.disabled {
            for span in content.spans.iter_mut() {
                span.style = span.style.fg(theme.muted);
            }
        }

        match self.props.shape {
            TriggerShape::Button => {
                let pad = " ".repeat(self.props.size.padding());
                let (open, close) = match self.props.variant {
                    TriggerVariant::Outline => ("[", "]"),
                    _ => ("", ""),
                };
                let mut spans = vec![Span::raw(format!("{open}{pad}"))];
                spans.extend(content.spans);
                spans.push(Span::raw(format!("{pad}{close}")));
                Line::from(spans).style(base)
            }
            TriggerShape::Link => {
                let spans: Vec<Span<'static>> = content
                    .spans
                    .into_iter()
                    .map(|s| {
                        let style = s.style.add_modifier(Modifier::UNDERLINED);
                        Span::styled(s.content, style)
                    })
                    .collect();
                Line::from(spans).style(base)
            }
            TriggerShape::Icon => {
                let style = content.spans.first().map(|s| s.style).unwrap_or_default();
                let glyph = if indicator.props().visibility
                    == super::indicator::LabelVisibility::ScreenReaderOnly
                {
                    " ".to_string()
                } else {
                    indicator.icon(copied).to_string()
                };
                Line::from(Span::styled(glyph, style)).style(base)
            }
        }
    }

    pub fn render(
        &mut self,
        f: &mut Frame,
        area: Rect,
        copied: bool,
        focused: bool,
        indicator: &IndicatorView,
        theme: &Theme,
    ) {
        let width = self.width(indicator).min(area.width);
        let target = Rect::new(area.x, area.y, width, area.height.min(1));
        self.last_area = Some(target);

        let line = self.line(copied, focused, indicator, theme);
        f.render_widget(Paragraph::new(line), target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, KeyModifiers};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn text_of(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_enter_and_space_need_focus() {
        let trigger = CopyTrigger::default();
        assert!(trigger.activates_on_key(&press(KeyCode::Enter), true));
        assert!(trigger.activates_on_key(&press(KeyCode::Char(' ')), true));
        assert!(!trigger.activates_on_key(&press(KeyCode::Enter), false));
    }

    #[test]
    fn test_hotkey_works_without_focus() {
        let trigger = CopyTrigger::new(TriggerProps {
            hotkey: Some('c'),
            ..Default::default()
        });
        assert!(trigger.activates_on_key(&press(KeyCode::Char('c')), false));
        assert!(!trigger.activates_on_key(&press(KeyCode::Char('x')), false));
    }

    #[test]
    fn test_release_events_are_ignored() {
        let trigger = CopyTrigger::default();
        let release = KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert!(!trigger.activates_on_key(&release, true));
    }

    #[test]
    fn test_disabled_ignores_everything() {
        let mut trigger = CopyTrigger::new(TriggerProps {
            hotkey: Some('c'),
            ..Default::default()
        });
        trigger.set_disabled(true);
        assert!(!trigger.activates_on_key(&press(KeyCode::Enter), true));
        assert!(!trigger.activates_on_key(&press(KeyCode::Char('c')), false));
        assert!(!trigger.activates_on_mouse(&click(0, 0)));
    }

    #[test]
    fn test_shapes_share_indicator_content() {
        let indicator = IndicatorView::default();
        let theme = Theme::auto();

        let button = CopyTrigger::new(TriggerProps::default());
        assert_eq!(
            text_of(&button.line(false, false, &indicator, &theme)),
            "[ ⧉ Copy ]"
        );

        let link = CopyTrigger::new(TriggerProps {
            shape: TriggerShape::Link,
            ..Default::default()
        });
        let line = link.line(true, false, &indicator, &theme);
        assert_eq!(text_of(&line), "✓ Copied");
        assert!(line.spans[0]
            .style
            .add_modifier
            .contains(Modifier::UNDERLINED));

        let icon = CopyTrigger::new(TriggerProps {
            shape: TriggerShape::Icon,
            ..Default::default()
        });
        assert_eq!(text_of(&icon.line(true, false, &indicator, &theme)), "✓");
    }

    #[test]
    fn test_size_changes_button_width() {
        let indicator = IndicatorView::default();
        let small = CopyTrigger::new(TriggerProps {
            size: TriggerSize::Xs,
            variant: TriggerVariant::Ghost,
            ..Default::default()
        });
        let large = CopyTrigger::new(TriggerProps {
            size: TriggerSize::Lg,
            variant: TriggerVariant::Ghost,
            ..Default::default()
        });
        assert_eq!(small.width(&indicator), 8);
        assert_eq!(large.width(&indicator), 14);
    }

    #[test]
    fn test_click_hits_rendered_area_only() {
        let mut trigger = CopyTrigger::default();
        let indicator = IndicatorView::default();
        let theme = Theme::auto();
        // Not rendered yet: nothing to hit
        assert!(!trigger.activates_on_mouse(&click(3, 1)));

        let mut terminal = Terminal::new(TestBackend::new(30, 3)).unwrap();
        terminal
            .draw(|f| {
                trigger.render(f, Rect::new(2, 1, 20, 1), false, false, &indicator, &theme);
            })
            .unwrap();

        assert!(trigger.activates_on_mouse(&click(3, 1)));
        assert!(!trigger.activates_on_mouse(&click(3, 2)));
        assert!(!trigger.activates_on_mouse(&click(25, 1)));
    }
}
