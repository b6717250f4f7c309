//! Component contracts
//!
//! Every widget in the kit renders through [`Component`]. Widgets that take
//! keyboard input also implement [`Interactive`]; the gallery routes keys to
//! the focused one and falls back to global handling when it answers
//! [`Handled::No`].
//!
//! ```text
//! KeyEvent ──▶ Gallery (global: q, Tab, hotkeys)
//!                 │ not handled
//!                 ▼
//!            focused Interactive ──▶ Handled::Yes / Handled::No
//! ```

mod component;
mod interactive;

pub use component::{Component, RenderContext};
pub use interactive::{Handled, Interactive};
