//! Core match types: players, RNG, configuration, errors.
//!
//! These are the building blocks shared by every other module.

pub mod player;
pub mod rng;
pub mod config;
pub mod error;

pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
pub use config::{Difficulty, GameMode, MatchConfig, PacingConfig};
pub use error::{MatchError, Result};
