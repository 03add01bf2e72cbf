// File: crates/chart-core/src/debounce.rs
// Summary: Trailing-edge debouncer driven by caller-supplied instants (no timers, no threads).

use std::time::{Duration, Instant};

/// Collapses a burst of values into the last one, released once `window` has passed
/// since the most recent push.
#[derive(Debug)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self { window, pending: None }
    }

    /// Queue `value`, replacing anything pending and restarting the window.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((now + self.window, value));
    }

    /// Release the pending value if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = matches!(&self.pending, Some((deadline, _)) if now >= *deadline);
        if due { self.pending.take().map(|(_, v)| v) } else { None }
    }

    /// When the pending value becomes due; hosts use this to schedule their next wakeup.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(d, _)| *d)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
