//! Controller + trigger + indicator as one focusable widget

use super::controller::{ClipboardController, ControllerId};
use super::indicator::IndicatorView;
use super::trigger::CopyTrigger;
use super::ClipboardWriter;
use crate::theme::Theme;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::layout::Rect;
use ratatui::Frame;

/// A copy the host should perform on behalf of a control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyRequest {
    pub target: ControllerId,
    pub value: String,
}

pub struct CopyControl<W: ClipboardWriter> {
    controller: ClipboardController<W>,
    trigger: CopyTrigger,
    indicator: IndicatorView,
}

impl<W: ClipboardWriter> CopyControl<W> {
    pub fn new(
        controller: ClipboardController<W>,
        trigger: CopyTrigger,
        indicator: IndicatorView,
    ) -> Self {
        Self {
            controller,
            trigger,
            indicator,
        }
    }

    pub fn id(&self) -> ControllerId {
        self.controller.id()
    }

    pub fn controller(&self) -> &ClipboardController<W> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut ClipboardController<W> {
        &mut self.controller
    }

    pub fn indicator(&self) -> &IndicatorView {
        &self.indicator
    }

    pub fn trigger(&self) -> &CopyTrigger {
        &self.trigger
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.trigger.set_disabled(disabled);
    }

    /// Accessible description of the current state
    pub fn announcement(&self) -> &str {
        self.indicator.accessible_text(self.controller.copied())
    }

    pub fn width(&self) -> u16 {
        self.trigger.width(&self.indicator)
    }

    fn request(&self) -> CopyRequest {
        CopyRequest {
            target: self.controller.id(),
            value: self.controller.value().to_string(),
        }
    }

    pub fn handle_key(&self, key: &KeyEvent, focused: bool) -> Option<CopyRequest> {
        self.trigger
            .activates_on_key(key, focused)
            .then(|| self.request())
    }

    pub fn handle_mouse(&self, mouse: &MouseEvent) -> Option<CopyRequest> {
        self.trigger
            .activates_on_mouse(mouse)
            .then(|| self.request())
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, focused: bool, theme: &Theme) {
        let copied = self.controller.copied();
        self.trigger
            .render(f, area, copied, focused, &self.indicator, theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::scheduler::{ManualClock, Scheduler};
    use crate::clipboard::testing::FakeClipboard;
    use crate::clipboard::{ResetCopied, TriggerProps, TriggerShape};
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::time::Duration;

    fn control(shape: TriggerShape) -> CopyControl<FakeClipboard> {
        CopyControl::new(
            ClipboardController::with_reset_after(
                FakeClipboard::default(),
                "127.0.0.1:8080",
                Duration::from_millis(1000),
            ),
            CopyTrigger::new(TriggerProps {
                shape,
                hotkey: Some('y'),
                ..Default::default()
            }),
            IndicatorView::default(),
        )
    }

    #[test]
    fn test_all_shapes_produce_the_same_request() {
        for shape in [TriggerShape::Button, TriggerShape::Link, TriggerShape::Icon] {
            let control = control(shape);
            let request = control
                .handle_key(&KeyEvent::new(KeyCode::Char('y'), KeyModifiers::NONE), false)
                .expect("hotkey should activate");
            assert_eq!(request.target, control.id());
            assert_eq!(request.value, "127.0.0.1:8080");
        }
    }

    #[tokio::test]
    async fn test_render_reflects_copied_state() {
        let mut control = control(TriggerShape::Button);
        let clock = ManualClock::new();
        let mut timers: Scheduler<ResetCopied, ManualClock> = Scheduler::with_clock(clock.clone());
        let theme = Theme::auto();
        let mut terminal = Terminal::new(TestBackend::new(20, 1)).unwrap();

        let row = |terminal: &Terminal<TestBackend>| -> String {
            let buffer = terminal.backend().buffer();
            (0..buffer.area.width)
                .map(|x| buffer[(x, 0)].symbol().to_string())
                .collect()
        };

        terminal
            .draw(|f| control.render(f, f.area(), false, &theme))
            .unwrap();
        assert!(row(&terminal).starts_with("[ ⧉ Copy ]"));
        assert_eq!(control.announcement(), "Copy");

        control
            .controller_mut()
            .copy_current(&mut timers)
            .await
            .unwrap();
        terminal
            .draw(|f| control.render(f, f.area(), false, &theme))
            .unwrap();
        assert!(row(&terminal).starts_with("[ ✓ Copied ]"));
        assert_eq!(control.announcement(), "Copied");

        clock.advance(Duration::from_millis(1000));
        for _ in timers.fire_due() {
            control.controller_mut().on_reset();
        }
        assert_eq!(control.announcement(), "Copy");
    }
}
