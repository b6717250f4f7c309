//! Interactive trait for components that handle keyboard input

use super::Component;
use crossterm::event::KeyEvent;

/// Result of handling a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// Event was consumed by the component
    Yes,
    /// Event was not handled, should bubble up
    No,
}

impl Handled {
    pub fn was_handled(self) -> bool {
        self == Self::Yes
    }
}

impl From<bool> for Handled {
    fn from(handled: bool) -> Self {
        if handled {
            Self::Yes
        } else {
            Self::No
        }
    }
}

/// Components that react to keys while focused
pub trait Interactive: Component {
    /// Returns `Handled::Yes` if the component consumed the event
    fn handle_key(&mut self, key: KeyEvent) -> Handled;

    /// Key hints shown in the footer while this component has focus
    fn focus_hint(&self) -> Option<&'static str> {
        None
    }
}
