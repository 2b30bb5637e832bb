//! A paced match: the turn engine plus the timers around it.
//!
//! ```text
//! select ──(group full)──▶ lock, ResolveGroup after reveal_delay
//! ResolveGroup ──▶ resolve ──▶ finished?      ──▶ cancel countdown, unlock
//!                          └─▶ opponent acts? ──▶ OpponentReveal after opponent_delay
//!                          └─▶ otherwise      ──▶ unlock
//! OpponentReveal ──▶ play_opponent_turn ──▶ OpponentResolve after reveal_delay
//! OpponentResolve ──▶ same as ResolveGroup
//! TimeOver ──▶ expire_time, drop any pending step, unlock
//! ```
//!
//! At most one pacing step is pending at a time. The cooperative countdown
//! runs beside it on its own handle.

use std::time::Duration;

use super::{PacedStep, Scheduler, TickScheduler, TimerHandle};
use crate::cards::CardId;
use crate::core::{GameMode, PlayerId};
use crate::hints::HintOutcome;
use crate::rules::TurnEngine;

/// A match driven by a scheduler.
#[derive(Debug)]
pub struct MatchSession<S: Scheduler> {
    engine: TurnEngine,
    scheduler: S,
    /// The single in-flight pacing step.
    pending: Option<(TimerHandle, PacedStep)>,
    /// Cooperative time budget.
    countdown: Option<TimerHandle>,
    abandoned: bool,
}

impl<S: Scheduler> MatchSession<S> {
    /// Start a session. Cooperative matches start their countdown here.
    pub fn new(engine: TurnEngine, mut scheduler: S) -> Self {
        let countdown = (engine.mode() == GameMode::Cooperative).then(|| {
            let limit = engine.config().pacing.cooperative_time_limit;
            log::debug!("Cooperative countdown started: {:?}", limit);
            scheduler.schedule(limit, PacedStep::TimeOver)
        });

        Self {
            engine,
            scheduler,
            pending: None,
            countdown,
            abandoned: false,
        }
    }

    #[must_use]
    pub fn engine(&self) -> &TurnEngine {
        &self.engine
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// The step currently waiting on a timer, if any.
    #[must_use]
    pub fn pending_step(&self) -> Option<PacedStep> {
        self.pending.map(|(_, step)| step)
    }

    #[must_use]
    pub fn countdown_running(&self) -> bool {
        self.countdown.is_some()
    }

    #[must_use]
    pub fn is_abandoned(&self) -> bool {
        self.abandoned
    }

    /// Human click on `card`.
    ///
    /// Rejected while a step is pending, outside the human's turn, after
    /// the match ended or was abandoned.
    pub fn select(&mut self, card: CardId) -> bool {
        if self.abandoned || self.engine.current_player() != PlayerId::Human {
            return false;
        }
        if !self.engine.reveal(card) {
            return false;
        }

        if self.engine.is_group_ready() {
            self.engine.lock_input();
            let delay = self.engine.config().pacing.reveal_delay;
            self.schedule_step(delay, PacedStep::ResolveGroup);
        }
        true
    }

    /// Spend a hint on the human's behalf.
    ///
    /// Refused while a step is pending, outside the human's turn, and once
    /// the match has ended or been abandoned.
    pub fn use_hint(&mut self) -> HintOutcome {
        if self.abandoned
            || self.engine.is_finished()
            || self.engine.is_input_locked()
            || self.engine.current_player() != PlayerId::Human
        {
            return HintOutcome::Unavailable;
        }
        self.engine.use_hint()
    }

    /// Deliver a fired timer. Returns the step that ran, or `None` for a
    /// stale or unknown handle.
    pub fn on_timer(&mut self, handle: TimerHandle) -> Option<PacedStep> {
        if self.abandoned {
            return None;
        }

        if self.countdown == Some(handle) {
            self.countdown = None;
            self.time_over();
            return Some(PacedStep::TimeOver);
        }

        match self.pending {
            Some((pending, step)) if pending == handle => {
                self.pending = None;
                self.run(step);
                Some(step)
            }
            _ => {
                log::trace!("Ignoring stale {}", handle);
                None
            }
        }
    }

    /// Stop the match: cancel every timer and reject further input.
    pub fn abandon(&mut self) {
        if self.abandoned {
            return;
        }
        self.cancel_pending();
        if let Some(countdown) = self.countdown.take() {
            self.scheduler.cancel(countdown);
        }
        self.engine.lock_input();
        self.abandoned = true;
        log::info!("Match abandoned");
    }

    /// Hand the engine back, e.g. to build the match record.
    #[must_use]
    pub fn into_engine(self) -> TurnEngine {
        self.engine
    }

    fn run(&mut self, step: PacedStep) {
        match step {
            PacedStep::ResolveGroup | PacedStep::OpponentResolve => {
                self.engine.resolve();
                self.after_resolution();
            }
            PacedStep::OpponentReveal => {
                let revealed = self.engine.play_opponent_turn();
                if self.engine.is_group_ready() {
                    let delay = self.engine.config().pacing.reveal_delay;
                    self.schedule_step(delay, PacedStep::OpponentResolve);
                } else {
                    log::warn!("Opponent revealed {} cards, not a full group", revealed.len());
                    self.engine.unlock_input();
                }
            }
            // Only scheduled through the countdown handle
            PacedStep::TimeOver => self.time_over(),
        }
    }

    fn after_resolution(&mut self) {
        if self.engine.is_finished() {
            if let Some(countdown) = self.countdown.take() {
                self.scheduler.cancel(countdown);
                log::debug!("Countdown cancelled, board finished");
            }
            self.engine.unlock_input();
        } else if self.engine.opponent_should_act() {
            let delay = self.engine.config().pacing.opponent_delay;
            self.schedule_step(delay, PacedStep::OpponentReveal);
        } else {
            self.engine.unlock_input();
        }
    }

    fn time_over(&mut self) {
        self.cancel_pending();
        self.engine.expire_time();
        self.engine.unlock_input();
    }

    fn schedule_step(&mut self, delay: Duration, step: PacedStep) {
        self.engine.lock_input();
        self.cancel_pending();
        let handle = self.scheduler.schedule(delay, step);
        self.pending = Some((handle, step));
    }

    fn cancel_pending(&mut self) {
        if let Some((handle, _)) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
    }
}

impl MatchSession<TickScheduler> {
    /// Advance the virtual clock, running every step that falls due,
    /// including steps scheduled by earlier steps within the same window.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<PacedStep> {
        let until = self.scheduler.now() + elapsed;
        let mut ran = Vec::new();
        while let Some((handle, _)) = self.scheduler.pop_due(until) {
            ran.extend(self.on_timer(handle));
        }
        self.scheduler.wind_to(until);
        ran
    }

    /// Run pending steps until the session waits for human input.
    pub fn settle(&mut self) -> Vec<PacedStep> {
        let mut ran = Vec::new();
        while let Some(due) = self.pending.and_then(|_| self.scheduler.next_due()) {
            let elapsed = due.saturating_sub(self.scheduler.now());
            ran.extend(self.advance(elapsed));
        }
        ran
    }
}
