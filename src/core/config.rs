//! Match configuration types.
//!
//! A match is configured at construction by:
//! - `GameMode`: who plays and how turns flow
//! - `Difficulty`: board composition, opponent memory, hints and scoring
//! - `PacingConfig`: delays the driver waits before the board changes
//! - `MatchConfig`: combines all of the above plus an optional RNG seed
//!
//! The per-difficulty tables live on the enums so there is one place to
//! read every balancing constant.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cards::BoardLayout;
use crate::rules::ScoringRule;

/// Game mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// Human and opponent alternate turns and compete for groups.
    #[default]
    Competitive,
    /// Human and opponent share the outcome against a time budget.
    Cooperative,
    /// Solitaire: no opponent, no turn switching.
    Zen,
}

impl GameMode {
    /// Whether an opponent takes part in this mode.
    #[must_use]
    pub const fn has_opponent(self) -> bool {
        !matches!(self, GameMode::Zen)
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameMode::Competitive => write!(f, "COMPETITIVE"),
            GameMode::Cooperative => write!(f, "COOPERATIVE"),
            GameMode::Zen => write!(f, "ZEN"),
        }
    }
}

/// Difficulty level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
    /// Mixed group sizes on one board.
    Extreme,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Extreme,
    ];

    /// Nominal number of cards forming a match.
    ///
    /// Extreme boards mix group sizes, so this is only the largest one there;
    /// the turn engine sizes each selection from its first card.
    #[must_use]
    pub const fn group_size(self) -> usize {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 3,
            Difficulty::Hard | Difficulty::Extreme => 4,
        }
    }

    /// Board composition for this difficulty. Every layout has 24 cards.
    #[must_use]
    pub fn layout(self) -> BoardLayout {
        match self {
            Difficulty::Easy => BoardLayout::uniform(12, 2),
            Difficulty::Medium => BoardLayout::uniform(8, 3),
            Difficulty::Hard => BoardLayout::uniform(6, 4),
            Difficulty::Extreme => BoardLayout::new(vec![2, 2, 3, 3, 4, 4, 3, 3]),
        }
    }

    /// Opponent memory window in cards. `None` means perfect recall.
    #[must_use]
    pub const fn memory_capacity(self, mode: GameMode) -> Option<usize> {
        let cooperative = matches!(mode, GameMode::Cooperative);
        match self {
            Difficulty::Easy if cooperative => Some(6),
            Difficulty::Easy => Some(3),
            Difficulty::Medium if cooperative => Some(12),
            Difficulty::Medium => Some(6),
            Difficulty::Hard | Difficulty::Extreme => None,
        }
    }

    /// Hints available to the human per match.
    #[must_use]
    pub const fn hint_budget(self) -> u32 {
        match self {
            Difficulty::Easy => 3,
            Difficulty::Medium => 2,
            Difficulty::Hard => 1,
            Difficulty::Extreme => 0,
        }
    }

    /// Points awarded per completed group.
    #[must_use]
    pub const fn scoring_rule(self) -> ScoringRule {
        match self {
            Difficulty::Easy => ScoringRule::new(1, 1),
            Difficulty::Medium => ScoringRule::new(2, 3),
            Difficulty::Hard => ScoringRule::new(3, 4),
            Difficulty::Extreme => ScoringRule::new(4, 2),
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "EASY"),
            Difficulty::Medium => write!(f, "MEDIUM"),
            Difficulty::Hard => write!(f, "HARD"),
            Difficulty::Extreme => write!(f, "EXTREME"),
        }
    }
}

/// Delays used by the paced match session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacingConfig {
    /// Pause between a group completing and its resolution.
    pub reveal_delay: Duration,

    /// Pause before the opponent starts revealing.
    pub opponent_delay: Duration,

    /// Total time budget of a cooperative match.
    pub cooperative_time_limit: Duration,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            reveal_delay: Duration::from_millis(1000),
            opponent_delay: Duration::from_millis(1000),
            cooperative_time_limit: Duration::from_secs(150),
        }
    }
}

impl PacingConfig {
    #[must_use]
    pub fn with_reveal_delay(mut self, delay: Duration) -> Self {
        self.reveal_delay = delay;
        self
    }

    #[must_use]
    pub fn with_opponent_delay(mut self, delay: Duration) -> Self {
        self.opponent_delay = delay;
        self
    }

    #[must_use]
    pub fn with_cooperative_time_limit(mut self, limit: Duration) -> Self {
        self.cooperative_time_limit = limit;
        self
    }
}

/// Complete match configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub mode: GameMode,

    pub difficulty: Difficulty,

    /// RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,

    pub pacing: PacingConfig,
}

impl MatchConfig {
    /// Create a new match configuration with default pacing.
    pub fn new(mode: GameMode, difficulty: Difficulty) -> Self {
        Self {
            mode,
            difficulty,
            seed: None,
            pacing: PacingConfig::default(),
        }
    }

    /// Fix the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replace the pacing delays.
    #[must_use]
    pub fn with_pacing(mut self, pacing: PacingConfig) -> Self {
        self.pacing = pacing;
        self
    }
}
