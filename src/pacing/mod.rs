//! Pacing: delayed steps between a reveal and the board changing.
//!
//! The turn engine never waits. A `MatchSession` decides *what* happens
//! next and asks a `Scheduler` to call back *later*; the scheduler can be
//! a UI event loop, a thread timer or the deterministic `TickScheduler`.
//!
//! ## Contract
//!
//! - A scheduled step fires at most once, after its delay.
//! - A cancelled step never fires.
//! - The session is never called concurrently: the driver delivers fired
//!   handles one at a time through `MatchSession::on_timer`.

mod scheduler;
mod session;

pub use scheduler::TickScheduler;
pub use session::MatchSession;

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Identifier of one scheduled step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerHandle(pub u64);

impl TimerHandle {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Timer({})", self.0)
    }
}

/// A deferred session step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PacedStep {
    /// Resolve the human's full selection.
    ResolveGroup,
    /// Let the opponent pick and reveal its cards.
    OpponentReveal,
    /// Resolve the opponent's selection.
    OpponentResolve,
    /// The cooperative time budget ran out.
    TimeOver,
}

/// Cancellable one-shot callbacks.
pub trait Scheduler {
    /// Arrange for `step` to fire once after `delay`.
    fn schedule(&mut self, delay: Duration, step: PacedStep) -> TimerHandle;

    /// Cancel a pending step. Returns `false` if it already fired or was
    /// never scheduled.
    fn cancel(&mut self, handle: TimerHandle) -> bool;
}
