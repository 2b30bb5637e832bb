//! What a special card does, by mode and actor.
//!
//! Every special-effect consequence is decided here in one lookup keyed by
//! `(effect, mode, actor)`, so the turn engine only asks "does this card
//! trigger anything now?" instead of branching on modes itself.

use serde::{Deserialize, Serialize};

use crate::cards::SpecialEffect;
use crate::core::{GameMode, PlayerId};

/// Consequence of a special card for the player handling it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectTrigger {
    /// No consequence.
    Inert,
    /// On reveal: expose every unmatched card of the same symbol.
    ExposeGroup,
    /// On a successful match: the opponent loses its next turn.
    FreezeOpponentOnMatch,
    /// On a failed match: the opponent sits out the rest of the match.
    DisableOpponentOnMiss,
}

impl EffectTrigger {
    /// Look up the consequence of `effect` revealed by `actor` in `mode`.
    #[must_use]
    pub const fn lookup(effect: SpecialEffect, mode: GameMode, actor: PlayerId) -> Self {
        use GameMode::*;
        use SpecialEffect::*;

        match (effect, mode, actor) {
            (RevealAll, Competitive, PlayerId::Human) => EffectTrigger::ExposeGroup,
            (FreezeOpponent, Competitive, PlayerId::Human) => EffectTrigger::FreezeOpponentOnMatch,
            (Trap, Cooperative, PlayerId::Human) => EffectTrigger::DisableOpponentOnMiss,
            _ => EffectTrigger::Inert,
        }
    }
}
