//! Copy action and the transient `copied` flag
//!
//! State transitions:
//!
//! ```text
//!              copy ok                     reset fires
//!   idle ───────────────▶ copied ─────────────────────▶ idle
//!                          │  ▲
//!                          └──┘ copy ok: cancel pending reset, schedule a new one
//! ```
//!
//! A failed write changes nothing. At most one reset is pending per controller.
//! `teardown` cancels it, and results that arrive afterwards are dropped.

use super::scheduler::{Clock, Scheduler, TimerHandle};
use super::{ClipboardError, ClipboardWriter};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Feedback window used when no per-instance duration is configured
pub const DEFAULT_RESET_AFTER: Duration = Duration::from_millis(1500);

static NEXT_CONTROLLER_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a controller, carried by its reset timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControllerId(u64);

impl ControllerId {
    fn next() -> Self {
        Self(NEXT_CONTROLLER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Timer payload asking controller `0` to drop its copied state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetCopied(pub ControllerId);

/// Owns the text to copy, the `copied` flag and the pending reset
pub struct ClipboardController<W: ClipboardWriter> {
    id: ControllerId,
    writer: W,
    value: String,
    copied: bool,
    pending_reset: Option<TimerHandle>,
    reset_after: Duration,
    torn_down: bool,
}

impl<W: ClipboardWriter> ClipboardController<W> {
    pub fn new(writer: W, value: impl Into<String>) -> Self {
        Self::with_reset_after(writer, value, DEFAULT_RESET_AFTER)
    }

    pub fn with_reset_after(writer: W, value: impl Into<String>, reset_after: Duration) -> Self {
        Self {
            id: ControllerId::next(),
            writer,
            value: value.into(),
            copied: false,
            pending_reset: None,
            reset_after,
            torn_down: false,
        }
    }

    pub fn id(&self) -> ControllerId {
        self.id
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the text future copies will write
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn copied(&self) -> bool {
        self.copied
    }

    pub fn reset_after(&self) -> Duration {
        self.reset_after
    }

    pub fn pending_reset(&self) -> Option<TimerHandle> {
        self.pending_reset
    }

    /// Writer handle for callers that run the write on their own task
    pub fn writer(&self) -> W {
        self.writer.clone()
    }

    /// Write `value` to the clipboard and start the feedback window
    pub async fn copy<T, C>(
        &mut self,
        value: impl Into<String>,
        timers: &mut Scheduler<T, C>,
    ) -> Result<(), ClipboardError>
    where
        T: From<ResetCopied>,
        C: Clock,
    {
        let value = value.into();
        let result = self.writer.write_text(&value).await;
        if result.is_ok() {
            self.value = value;
        }
        self.complete(result, timers)
    }

    /// Write the current value
    pub async fn copy_current<T, C>(
        &mut self,
        timers: &mut Scheduler<T, C>,
    ) -> Result<(), ClipboardError>
    where
        T: From<ResetCopied>,
        C: Clock,
    {
        let value = self.value.clone();
        self.copy(value, timers).await
    }

    /// Apply the outcome of a clipboard write
    ///
    /// On success the pending reset (if any) is cancelled before the new one
    /// is scheduled. On failure state is left untouched and the error is
    /// handed back. After `teardown` the result is returned without touching
    /// state or scheduling anything.
    pub fn complete<T, C>(
        &mut self,
        result: Result<(), ClipboardError>,
        timers: &mut Scheduler<T, C>,
    ) -> Result<(), ClipboardError>
    where
        T: From<ResetCopied>,
        C: Clock,
    {
        if self.torn_down {
            tracing::debug!("Ignoring clipboard result for torn down controller {:?}", self.id);
            return result;
        }
        if let Err(err) = result {
            tracing::warn!("Clipboard write failed: {}", err);
            return Err(err);
        }

        if let Some(previous) = self.pending_reset.take() {
            timers.cancel(previous);
        }
        self.copied = true;
        self.pending_reset =
            Some(timers.schedule_in(self.reset_after, ResetCopied(self.id).into()));
        tracing::debug!(
            "Copied {} chars, feedback for {}ms",
            self.value.chars().count(),
            self.reset_after.as_millis()
        );
        Ok(())
    }

    /// Called by the owner when this controller's reset timer fires
    pub fn on_reset(&mut self) {
        self.copied = false;
        self.pending_reset = None;
    }

    /// Cancel the pending reset; call when the owning view goes away
    pub fn teardown<T, C: Clock>(&mut self, timers: &mut Scheduler<T, C>) {
        if let Some(handle) = self.pending_reset.take() {
            timers.cancel(handle);
        }
        self.copied = false;
        self.torn_down = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::scheduler::ManualClock;
    use crate::clipboard::testing::FakeClipboard;

    type Timers = Scheduler<ResetCopied, ManualClock>;

    fn setup(reset_ms: u64) -> (ClipboardController<FakeClipboard>, FakeClipboard, Timers, ManualClock) {
        let fake = FakeClipboard::default();
        let clock = ManualClock::new();
        let timers = Scheduler::with_clock(clock.clone());
        let controller = ClipboardController::with_reset_after(
            fake.clone(),
            "",
            Duration::from_millis(reset_ms),
        );
        (controller, fake, timers, clock)
    }

    /// Deliver due resets the way the gallery loop does
    fn pump(controller: &mut ClipboardController<FakeClipboard>, timers: &mut Timers) -> usize {
        let fired = timers.fire_due();
        for (_, ResetCopied(id)) in &fired {
            if *id == controller.id() {
                controller.on_reset();
            }
        }
        fired.len()
    }

    #[tokio::test]
    async fn test_copy_sets_copied_then_expires() {
        let (mut controller, fake, mut timers, clock) = setup(1500);

        controller.copy("hello", &mut timers).await.unwrap();
        assert!(controller.copied());
        assert_eq!(fake.last().as_deref(), Some("hello"));
        assert_eq!(controller.value(), "hello");

        clock.advance(Duration::from_millis(1499));
        pump(&mut controller, &mut timers);
        assert!(controller.copied());

        clock.advance(Duration::from_millis(1));
        assert_eq!(pump(&mut controller, &mut timers), 1);
        assert!(!controller.copied());
    }

    #[tokio::test]
    async fn test_second_copy_extends_window_from_last_call() {
        let (mut controller, _fake, mut timers, clock) = setup(1000);

        controller.copy("a", &mut timers).await.unwrap();
        clock.advance(Duration::from_millis(200));
        controller.copy("b", &mut timers).await.unwrap();

        // 1000ms after the first call: still copied
        clock.advance(Duration::from_millis(800));
        assert_eq!(pump(&mut controller, &mut timers), 0);
        assert!(controller.copied());

        clock.advance(Duration::from_millis(199));
        pump(&mut controller, &mut timers);
        assert!(controller.copied());

        clock.advance(Duration::from_millis(1));
        assert_eq!(pump(&mut controller, &mut timers), 1);
        assert!(!controller.copied());
    }

    #[tokio::test]
    async fn test_burst_resets_exactly_once() {
        let (mut controller, _fake, mut timers, clock) = setup(1000);

        let mut fired = 0;
        for i in 0..10 {
            controller.copy(format!("v{i}"), &mut timers).await.unwrap();
            assert_eq!(timers.pending_count(), 1);
            clock.advance(Duration::from_millis(90));
            fired += pump(&mut controller, &mut timers);
        }
        assert!(controller.copied());

        // 90ms already elapsed since the last call
        clock.advance(Duration::from_millis(909));
        fired += pump(&mut controller, &mut timers);
        assert!(controller.copied());

        clock.advance(Duration::from_millis(1));
        fired += pump(&mut controller, &mut timers);
        clock.advance(Duration::from_secs(5));
        fired += pump(&mut controller, &mut timers);

        assert_eq!(fired, 1);
        assert!(!controller.copied());
    }

    #[tokio::test]
    async fn test_empty_string_still_copies() {
        let (mut controller, fake, mut timers, _clock) = setup(1000);

        controller.copy("", &mut timers).await.unwrap();
        assert!(controller.copied());
        assert_eq!(fake.last().as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_failed_write_keeps_prior_state() {
        let (mut controller, fake, mut timers, clock) = setup(1000);

        fake.set_failure(Some(ClipboardError::Unsupported));
        let err = controller.copy("nope", &mut timers).await.unwrap_err();
        assert_eq!(err, ClipboardError::Unsupported);
        assert!(!controller.copied());
        assert_eq!(timers.pending_count(), 0);

        // Now succeed, then fail while copied: flag and timer stay as they were
        fake.set_failure(None);
        controller.copy("ok", &mut timers).await.unwrap();
        let pending = controller.pending_reset();

        clock.advance(Duration::from_millis(400));
        fake.set_failure(Some(ClipboardError::Write("denied".into())));
        assert!(controller.copy("later", &mut timers).await.is_err());
        assert!(controller.copied());
        assert_eq!(controller.pending_reset(), pending);
        assert_eq!(controller.value(), "ok");

        clock.advance(Duration::from_millis(600));
        assert_eq!(pump(&mut controller, &mut timers), 1);
        assert!(!controller.copied());
    }

    #[tokio::test]
    async fn test_teardown_cancels_pending_reset() {
        let (mut controller, _fake, mut timers, clock) = setup(1000);

        controller.copy("bye", &mut timers).await.unwrap();
        assert!(controller.copied());
        controller.teardown(&mut timers);

        clock.advance(Duration::from_secs(10));
        assert!(timers.fire_due().is_empty());
        assert!(controller.pending_reset().is_none());
    }

    #[test]
    fn test_write_finishing_after_teardown_schedules_nothing() {
        let (mut controller, _fake, mut timers, clock) = setup(1000);

        // Write was spawned before teardown and lands afterwards
        controller.teardown(&mut timers);
        assert!(controller.complete(Ok(()), &mut timers).is_ok());
        assert!(!controller.copied());
        assert_eq!(timers.pending_count(), 0);

        clock.advance(Duration::from_millis(1000));
        assert!(timers.fire_due().is_empty());
        assert!(!controller.copied());
    }

    #[tokio::test]
    async fn test_copy_current_uses_stored_value() {
        let (mut controller, fake, mut timers, _clock) = setup(1000);
        controller.set_value("kubectl port-forward svc/api 8080:80");

        controller.copy_current(&mut timers).await.unwrap();
        assert_eq!(
            fake.last().as_deref(),
            Some("kubectl port-forward svc/api 8080:80")
        );
    }

    #[test]
    fn test_complete_applies_spawned_write_result() {
        let (mut controller, _fake, mut timers, _clock) = setup(1000);

        let err = controller.complete(Err(ClipboardError::Task("gone".into())), &mut timers);
        assert!(err.is_err());
        assert!(!controller.copied());

        controller.complete(Ok(()), &mut timers).unwrap();
        assert!(controller.copied());
        assert!(controller.pending_reset().is_some());
    }

    #[test]
    fn test_controller_ids_are_unique() {
        let a = ClipboardController::new(FakeClipboard::default(), "a");
        let b = ClipboardController::new(FakeClipboard::default(), "b");
        assert_ne!(a.id(), b.id());
        assert_eq!(a.reset_after(), DEFAULT_RESET_AFTER);
    }
}
