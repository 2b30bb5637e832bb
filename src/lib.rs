//! # memory-match
//!
//! Game core of a memory-matching card game: a shuffled board of face-down
//! cards grouped by symbol, a human player and a computer opponent with an
//! imperfect, bounded memory.
//!
//! ## Design Principles
//!
//! 1. **One owner of card state**: the board is a single owned card
//!    sequence. The opponent's memory, the scorer and the renderer only
//!    hold card ids and read the board back.
//!
//! 2. **Derived scores**: scores are recomputed from card state on demand,
//!    never accumulated.
//!
//! 3. **No waiting in the engine**: pacing delays and the cooperative
//!    countdown are scheduled callbacks owned by `MatchSession`, while
//!    `TurnEngine` is a plain synchronous state machine.
//!
//! 4. **Injectable randomness**: every random decision (shuffle, special
//!    cards, opponent picks, hints) draws from the match's `GameRng`, so a
//!    seed reproduces a whole match.
//!
//! ## Modules
//!
//! - `core`: Players, RNG, configuration, errors
//! - `cards`: Cards, symbols, board layout and generation
//! - `effects`: Special-card placement and the consequence table
//! - `opponent`: The opponent's bounded memory and move choice
//! - `rules`: Turn engine, scoring and outcomes
//! - `hints`: The human's hint budget
//! - `pacing`: Schedulers and the paced match session
//! - `record`: End-of-match payload for persistence
//!
//! ## Example
//!
//! ```
//! use memory_match::{Difficulty, GameMode, MatchConfig, PlayerId, TurnEngine};
//!
//! let config = MatchConfig::new(GameMode::Zen, Difficulty::Easy).with_seed(42);
//! let mut engine = TurnEngine::from_config(config);
//!
//! let first = engine.cards()[0].clone();
//! let partner = engine
//!     .cards()
//!     .iter()
//!     .find(|c| c.symbol() == first.symbol() && c.id() != first.id())
//!     .map(|c| c.id())
//!     .unwrap();
//!
//! assert!(engine.reveal(first.id()));
//! assert!(engine.reveal(partner));
//! assert!(engine.resolve().unwrap().is_match());
//! assert_eq!(engine.score(PlayerId::Human), 1);
//! ```

pub mod core;
pub mod cards;
pub mod effects;
pub mod opponent;
pub mod rules;
pub mod hints;
pub mod pacing;
pub mod record;

// Re-export commonly used types
pub use crate::core::{
    PlayerId, PlayerMap,
    GameRng,
    GameMode, Difficulty, MatchConfig, PacingConfig,
    MatchError,
};

pub use crate::cards::{Board, BoardLayout, Card, CardId, Selection, SpecialEffect, Symbol};

pub use crate::effects::{assign_special_effects, EffectTrigger};

pub use crate::opponent::MemoryModel;

pub use crate::rules::{MatchOutcome, Resolution, ScoringRule, TurnEngine, TurnPhase};

pub use crate::hints::{HintManager, HintOutcome};

pub use crate::pacing::{MatchSession, PacedStep, Scheduler, TickScheduler, TimerHandle};

pub use crate::record::MatchRecord;
