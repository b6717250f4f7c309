//! Clipboard copy with self-expiring "copied" feedback
//!
//! - [`ClipboardWriter`]: the platform write primitive (`arboard` in production)
//! - [`ClipboardController`]: copy action plus the `copied` flag and its reset timer
//! - [`IndicatorView`]: renders idle vs copied state
//! - [`CopyTrigger`]: binds a key or click to the copy action
//! - [`CopyControl`]: the three composed into a focusable widget

mod control;
mod controller;
mod indicator;
pub mod scheduler;
mod trigger;

pub use control::{CopyControl, CopyRequest};
pub use controller::{ClipboardController, ControllerId, ResetCopied, DEFAULT_RESET_AFTER};
pub use indicator::{IndicatorProps, IndicatorView, LabelVisibility};
pub use scheduler::{Clock, ManualClock, Scheduler, SystemClock, TimerHandle};
pub use trigger::{CopyTrigger, TriggerProps, TriggerShape, TriggerSize, TriggerVariant};

use std::future::Future;
use thiserror::Error;

/// Reasons a clipboard write can fail
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClipboardError {
    /// No clipboard in this environment (headless Linux, no display server)
    #[error("clipboard not supported in this environment")]
    Unsupported,
    /// Clipboard exists but is held by someone else or refused access
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    /// The platform accepted the request but the write failed
    #[error("failed to set clipboard text: {0}")]
    Write(String),
    /// The background write task died before reporting back
    #[error("clipboard task failed: {0}")]
    Task(String),
}

/// Write primitive for the system clipboard
///
/// Implementations must be cheap to clone so a write can be moved onto a
/// background task while the controller stays on the UI loop.
pub trait ClipboardWriter: Clone + Send + Sync + 'static {
    fn write_text(&self, text: &str)
        -> impl Future<Output = Result<(), ClipboardError>> + Send;
}

/// System clipboard via `arboard`
///
/// The clipboard is created fresh for each write to avoid holding resources.
/// `arboard` is synchronous, so the write runs on the blocking pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    fn write_blocking(text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = arboard::Clipboard::new().map_err(map_arboard_error)?;
        clipboard.set_text(text).map_err(map_arboard_error)
    }
}

impl ClipboardWriter for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let text = text.to_owned();
        tokio::task::spawn_blocking(move || Self::write_blocking(&text))
            .await
            .map_err(|e| ClipboardError::Task(e.to_string()))?
    }
}

fn map_arboard_error(err: arboard::Error) -> ClipboardError {
    match err {
        arboard::Error::ClipboardNotSupported => ClipboardError::Unsupported,
        arboard::Error::ClipboardOccupied => {
            ClipboardError::Unavailable("clipboard is occupied".to_string())
        }
        other => ClipboardError::Write(other.to_string()),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// In-memory writer that records writes and can be told to fail
    #[derive(Clone, Default)]
    pub struct FakeClipboard {
        pub written: Arc<Mutex<Vec<String>>>,
        pub fail_with: Arc<Mutex<Option<ClipboardError>>>,
    }

    impl FakeClipboard {
        pub fn failing(err: ClipboardError) -> Self {
            let fake = Self::default();
            *fake.fail_with.lock().unwrap() = Some(err);
            fake
        }

        pub fn set_failure(&self, err: Option<ClipboardError>) {
            *self.fail_with.lock().unwrap() = err;
        }

        pub fn last(&self) -> Option<String> {
            self.written.lock().unwrap().last().cloned()
        }
    }

    impl ClipboardWriter for FakeClipboard {
        async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
            if let Some(err) = self.fail_with.lock().unwrap().clone() {
                return Err(err);
            }
            self.written.lock().unwrap().push(text.to_owned());
            Ok(())
        }
    }
}
