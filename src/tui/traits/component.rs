//! Core component trait

use crate::theme::Theme;
use ratatui::{layout::Rect, Frame};

/// Immutable context passed to components during rendering
///
/// Components only see what they need: the palette, whether they hold focus,
/// and the animation frame for anything that pulses.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Color palette
    pub theme: &'a Theme,

    /// Whether the component being rendered has focus
    pub focused: bool,

    /// Animation frame counter (skeleton shimmer, spinners)
    pub animation_frame: usize,
}

impl<'a> RenderContext<'a> {
    pub fn new(theme: &'a Theme, animation_frame: usize) -> Self {
        Self {
            theme,
            focused: false,
            animation_frame,
        }
    }

    /// Same context with the focus flag set
    pub fn with_focus(self, focused: bool) -> Self {
        Self { focused, ..self }
    }

    /// Spinner glyph for the current frame
    pub fn spinner_char(&self) -> char {
        const SPINNER: [char; 4] = ['◐', '◓', '◑', '◒'];
        SPINNER[self.animation_frame % SPINNER.len()]
    }
}

/// Anything that can draw itself into a rectangle
///
/// `render` takes `&mut self` so widgets can remember where they were drawn
/// (mouse hit-testing, table scroll offsets).
pub trait Component {
    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext);

    /// Rows the component wants at the given width (layout hint)
    fn desired_height(&self, _width: u16) -> u16 {
        1
    }
}
