//! Match rules: the turn state machine and scoring.
//!
//! `TurnEngine` owns everything a single match needs (board, opponent
//! memory, hints, RNG) and is the only place card state changes after the
//! board is built. `ScoringRule` derives scores from the board on demand.

mod engine;
mod scoring;

pub use engine::{Resolution, TurnEngine, TurnPhase};
pub use scoring::{MatchOutcome, ScoringRule};
