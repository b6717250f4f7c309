//! Cancellable timer arena
//!
//! Deferred UI work (copy feedback resets, toast expiry, simulated port-forward
//! transitions) is registered here instead of being captured in spawned
//! sleeps. The event loop owns one `Scheduler`, asks it for the next deadline,
//! and drains due entries with [`Scheduler::fire_due`].
//!
//! A cancelled entry is removed from the arena, so it can never be returned
//! by a later `fire_due` call.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of "now" for the scheduler
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock backed by `Instant::now()`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Hand-driven clock for deterministic tests and demos
///
/// Clones share the same underlying instant.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    /// Move time forward
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// Opaque handle to a scheduled entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct Entry<T> {
    deadline: Instant,
    payload: T,
}

/// Arena of pending timers carrying a payload of type `T`
pub struct Scheduler<T, C: Clock = SystemClock> {
    clock: C,
    entries: HashMap<TimerHandle, Entry<T>>,
    next_id: u64,
}

impl<T> Scheduler<T, SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<T> Default for Scheduler<T, SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: Clock> Scheduler<T, C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            entries: HashMap::new(),
            next_id: 0,
        }
    }

    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// Register `payload` to fire once `delay` has elapsed from now
    pub fn schedule_in(&mut self, delay: Duration, payload: T) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        let deadline = self.clock.now() + delay;
        self.entries.insert(handle, Entry { deadline, payload });
        handle
    }

    /// Remove a pending entry. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.entries.remove(&handle).is_some()
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.entries.contains_key(&handle)
    }

    pub fn pending_count(&self) -> usize {
        self.entries.len()
    }

    /// Earliest deadline among pending entries
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.values().map(|e| e.deadline).min()
    }

    /// Time until the earliest deadline (zero if already due)
    pub fn time_until_next(&self) -> Option<Duration> {
        let now = self.clock.now();
        self.next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Remove and return every entry whose deadline has passed, oldest first
    pub fn fire_due(&mut self) -> Vec<(TimerHandle, T)> {
        let now = self.clock.now();
        let due: Vec<TimerHandle> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.deadline <= now)
            .map(|(handle, _)| *handle)
            .collect();

        let mut fired: Vec<(Instant, TimerHandle, T)> = due
            .into_iter()
            .filter_map(|handle| {
                self.entries
                    .remove(&handle)
                    .map(|entry| (entry.deadline, handle, entry.payload))
            })
            .collect();
        // Ties broken by registration order
        fired.sort_by_key(|(deadline, handle, _)| (*deadline, handle.0));

        fired
            .into_iter()
            .map(|(_, handle, payload)| (handle, payload))
            .collect()
    }

    /// Drop every pending entry (used on shutdown)
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
