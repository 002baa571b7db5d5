//! Cancellable single-slot timer for collapsing bursts of input.
//!
//! The debouncer never spawns anything. The owner asks for the current
//! [`Debouncer::deadline`], waits for it however it likes, then calls
//! [`Debouncer::take_due`]. Scheduling a new value drops the previous one
//! on the spot, so a superseded value can never be handed out.

use std::time::Duration;

use tokio::time::Instant;

pub const DEFAULT_QUIESCENCE: Duration = Duration::from_millis(500);

#[derive(Debug)]
struct Pending<T> {
    deadline: Instant,
    value: T,
}

#[derive(Debug)]
pub struct Debouncer<T> {
    quiescence: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(quiescence: Duration) -> Self {
        Self {
            quiescence,
            pending: None,
        }
    }

    /// Replaces whatever is pending with `value`, due one quiescence
    /// interval after `now`.
    pub fn schedule(&mut self, value: T, now: Instant) -> Instant {
        let deadline = now + self.quiescence;
        self.pending = Some(Pending { deadline, value });
        deadline
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Hands out the pending value once its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> Option<T> {
        let due = self.pending.as_ref().map_or(false, |p| p.deadline <= now);
        if due {
            self.cancel()
        } else {
            None
        }
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_QUIESCENCE)
    }
}
