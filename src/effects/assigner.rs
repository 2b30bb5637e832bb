//! Special-effect placement.
//!
//! Runs once after board generation and before the first reveal. Each
//! mode asks for a fixed set of effects; every target is a distinct,
//! not-yet-special card and no two targets share a symbol. When the board
//! runs out of candidates the remaining effects are dropped.

use rustc_hash::FxHashSet;

use crate::cards::{Board, CardId, SpecialEffect};
use crate::core::{Difficulty, GameMode, GameRng};

/// Effects requested for a match, in placement order.
#[must_use]
pub fn requested_effects(mode: GameMode, difficulty: Difficulty) -> Vec<SpecialEffect> {
    match mode {
        GameMode::Competitive => vec![
            SpecialEffect::RevealAll,
            SpecialEffect::FreezeOpponent,
            SpecialEffect::FreezeOpponent,
        ],
        GameMode::Cooperative => {
            let traps = match difficulty {
                Difficulty::Easy | Difficulty::Medium => 1,
                Difficulty::Hard | Difficulty::Extreme => 2,
            };
            vec![SpecialEffect::Trap; traps]
        }
        GameMode::Zen => Vec::new(),
    }
}

/// Tag cards of `board` with the effects of `(mode, difficulty)`.
///
/// Returns the ids of the tagged cards in placement order.
pub fn assign_special_effects(
    board: &mut Board,
    mode: GameMode,
    difficulty: Difficulty,
    rng: &mut GameRng,
) -> Vec<CardId> {
    let requested = requested_effects(mode, difficulty);
    let mut used_symbols: FxHashSet<_> = board
        .cards()
        .iter()
        .filter(|card| card.special_effect().is_special())
        .map(|card| card.symbol())
        .collect();
    let mut tagged = Vec::with_capacity(requested.len());

    for effect in requested {
        let candidates: Vec<CardId> = board
            .cards()
            .iter()
            .filter(|card| !card.special_effect().is_special())
            .filter(|card| !used_symbols.contains(&card.symbol()))
            .map(|card| card.id())
            .collect();

        let Some(&target) = rng.choose(&candidates) else {
            log::warn!(
                "No candidate card left for {:?}, placed {} of the requested effects",
                effect,
                tagged.len()
            );
            break;
        };

        if board.set_special_effect(target, effect) {
            if let Some(card) = board.get(target) {
                used_symbols.insert(card.symbol());
                log::debug!("Placed {:?} on {} ({})", effect, target, card.symbol());
            }
            tagged.push(target);
        }
    }

    tagged
}
