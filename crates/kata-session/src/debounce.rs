//! Single-slot debounce timer driven by explicit polling.
//!
//! The frontend owns the real timer; it calls `poll` when the delay reported
//! by the session elapses. Keeping the timer here as plain state means there
//! is exactly one pending callback and it always fires on the polling thread.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    elapsed_nanos: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed_nanos: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn advance(&self, by: Duration) {
        let nanos = u64::try_from(by.as_nanos()).unwrap_or(u64::MAX);
        self.elapsed_nanos.fetch_add(nanos, Ordering::SeqCst);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + Duration::from_nanos(self.elapsed_nanos.load(Ordering::SeqCst))
    }
}

/// Opaque identity of one scheduled callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

struct PendingTimer<F> {
    handle: TimerHandle,
    due: Instant,
    callback: F,
}

/// Holds at most one pending callback. Every `schedule` replaces the
/// previous one.
pub struct Debouncer<F, K = SystemClock> {
    clock: K,
    pending: Option<PendingTimer<F>>,
    next_id: u64,
}

impl<F> Debouncer<F, SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<F> Default for Debouncer<F, SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F, K: Clock> Debouncer<F, K> {
    pub fn with_clock(clock: K) -> Self {
        Self {
            clock,
            pending: None,
            next_id: 0,
        }
    }

    pub fn clock(&self) -> &K {
        &self.clock
    }

    /// Cancel any pending callback and arm `callback` to run after `delay`.
    pub fn schedule(&mut self, delay: Duration, callback: F) -> TimerHandle {
        self.cancel();
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.pending = Some(PendingTimer {
            handle,
            due: self.clock.now() + delay,
            callback,
        });
        handle
    }

    /// Drop the pending callback, if any. Returns whether one was dropped.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn handle(&self) -> Option<TimerHandle> {
        self.pending.as_ref().map(|p| p.handle)
    }

    /// Time left before the pending callback is due (zero if overdue).
    pub fn time_until_due(&self) -> Option<Duration> {
        let now = self.clock.now();
        self.pending
            .as_ref()
            .map(|p| p.due.saturating_duration_since(now))
    }

    /// Remove and return the pending callback if its delay has elapsed.
    pub fn take_due(&mut self) -> Option<F> {
        let due = self.pending.as_ref()?.due;
        if self.clock.now() < due {
            return None;
        }
        self.pending.take().map(|p| p.callback)
    }
}

impl<F: FnOnce(), K: Clock> Debouncer<F, K> {
    /// Run the pending callback if due. Returns whether it ran.
    pub fn fire_due(&mut self) -> bool {
        match self.take_due() {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }
}
