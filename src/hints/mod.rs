//! Hint subsystem: a limited per-match resource the human may spend to
//! peek at one face-down card.

mod manager;

pub use manager::{HintManager, HintOutcome, ENCOURAGEMENTS, ENCOURAGEMENT_PROBABILITY};
