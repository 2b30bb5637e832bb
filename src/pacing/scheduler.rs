//! Deterministic scheduler driven by an external clock.
//!
//! The UI loop (or a test) advances a virtual clock; due steps come out
//! in due order, ties in scheduling order.

use std::collections::BTreeMap;
use std::time::Duration;

use super::{PacedStep, Scheduler, TimerHandle};

/// A scheduled step waiting for its due time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct TimerEntry {
    handle: TimerHandle,
    step: PacedStep,
}

/// Virtual-clock scheduler.
#[derive(Clone, Debug, Default)]
pub struct TickScheduler {
    now: Duration,
    /// Keyed by (due time, handle); handles grow monotonically.
    queue: BTreeMap<(Duration, TimerHandle), TimerEntry>,
    next_handle: u64,
}

impl TickScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.queue.values().any(|entry| entry.handle == handle)
    }

    /// Due time of the earliest pending step.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.queue.keys().next().map(|&(due, _)| due)
    }

    /// Pop the earliest step due at or before `until`, moving the clock to
    /// its due time.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TimerHandle, PacedStep)> {
        let (&(due, _), _) = self.queue.first_key_value()?;
        if due > until {
            return None;
        }
        let (_, entry) = self.queue.pop_first()?;
        self.now = self.now.max(due);
        Some((entry.handle, entry.step))
    }

    /// Move the clock forward to `time` without firing anything.
    pub fn wind_to(&mut self, time: Duration) {
        self.now = self.now.max(time);
    }

    /// Advance the clock by `elapsed` and return every step that fell due.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<(TimerHandle, PacedStep)> {
        let until = self.now + elapsed;
        let mut fired = Vec::new();
        while let Some(due) = self.pop_due(until) {
            fired.push(due);
        }
        self.wind_to(until);
        fired
    }
}

impl Scheduler for TickScheduler {
    fn schedule(&mut self, delay: Duration, step: PacedStep) -> TimerHandle {
        let handle = TimerHandle::new(self.next_handle);
        self.next_handle += 1;
        self.queue
            .insert((self.now + delay, handle), TimerEntry { handle, step });
        log::trace!("Scheduled {:?} as {} in {:?}", step, handle, delay);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        let key = self
            .queue
            .iter()
            .find(|(_, entry)| entry.handle == handle)
            .map(|(&key, _)| key);
        match key {
            Some(key) => {
                self.queue.remove(&key);
                log::trace!("Cancelled {}", handle);
                true
            }
            None => false,
        }
    }
}
