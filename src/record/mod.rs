//! End-of-match payload.
//!
//! The core only produces records; storing them and aggregating a
//! leaderboard is up to the persistence collaborator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{Difficulty, GameMode};
use crate::rules::MatchOutcome;

/// Longest player name kept in a record, in characters.
pub const MAX_PLAYER_NAME_LEN: usize = 20;

/// One finished match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub player_name: String,
    pub score: u32,
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub timestamp: DateTime<Utc>,
    pub outcome: MatchOutcome,
}

impl MatchRecord {
    /// Create a record. Surrounding whitespace is trimmed and the name is
    /// cut to `MAX_PLAYER_NAME_LEN` characters.
    #[must_use]
    pub fn new(
        player_name: &str,
        score: u32,
        mode: GameMode,
        difficulty: Difficulty,
        timestamp: DateTime<Utc>,
        outcome: MatchOutcome,
    ) -> Self {
        Self {
            player_name: player_name.trim().chars().take(MAX_PLAYER_NAME_LEN).collect(),
            score,
            mode,
            difficulty,
            timestamp,
            outcome,
        }
    }

    /// Serialize for the persistence log.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl std::fmt::Display for MatchRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {}/{} score {} at {}",
            self.player_name,
            self.outcome,
            self.mode,
            self.difficulty,
            self.score,
            self.timestamp.to_rfc3339()
        )
    }
}
