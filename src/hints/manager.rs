//! Per-match hint budget and the hinted-card overlay.
//!
//! A hint never changes card state. Hinted cards only get listed in an
//! append-only map the renderer can draw from.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::{Board, CardId, Symbol};
use crate::core::{Difficulty, GameRng};

/// Chance that a hint only offers encouragement.
pub const ENCOURAGEMENT_PROBABILITY: f64 = 0.25;

/// Messages shown instead of a revealed card.
pub const ENCOURAGEMENTS: [&str; 4] = [
    "Keep trying, you're doing well!",
    "Memory gets better with practice!",
    "You can do it!",
    "Take a deep breath and look carefully!",
];

/// What a hint request produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum HintOutcome {
    /// No hints left; nothing was consumed.
    Unavailable,
    /// A hint was spent on a message.
    Encouragement(&'static str),
    /// A hint was spent and this card's symbol is now shown as a hint.
    Revealed(CardId, Symbol),
    /// A hint was spent but every candidate card was already handled.
    NothingToReveal,
}

impl HintOutcome {
    /// Whether the request was accepted (a hint was consumed).
    #[must_use]
    pub const fn accepted(self) -> bool {
        !matches!(self, HintOutcome::Unavailable)
    }
}

/// Hint state of one match.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintManager {
    remaining: u32,
    hinted: FxHashMap<CardId, Symbol>,
}

impl HintManager {
    /// Create a manager with `budget` hints.
    #[must_use]
    pub fn new(budget: u32) -> Self {
        Self {
            remaining: budget,
            hinted: FxHashMap::default(),
        }
    }

    /// Hint budget for `difficulty`.
    #[must_use]
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        Self::new(difficulty.hint_budget())
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Symbol shown as a hint on `card`, if any.
    #[must_use]
    pub fn hinted_symbol(&self, card: CardId) -> Option<Symbol> {
        self.hinted.get(&card).copied()
    }

    /// All hinted cards, in board order.
    #[must_use]
    pub fn hinted_cards(&self) -> Vec<(CardId, Symbol)> {
        let mut hinted: Vec<_> = self.hinted.iter().map(|(&id, &symbol)| (id, symbol)).collect();
        hinted.sort_unstable();
        hinted
    }

    /// Spend a hint.
    pub fn use_hint(&mut self, board: &Board, rng: &mut GameRng) -> HintOutcome {
        if self.remaining == 0 {
            return HintOutcome::Unavailable;
        }
        self.remaining -= 1;

        if rng.gen_bool(ENCOURAGEMENT_PROBABILITY) {
            let message = rng.choose(&ENCOURAGEMENTS).copied().unwrap_or(ENCOURAGEMENTS[0]);
            log::debug!("Hint spent on encouragement, {} left", self.remaining);
            return HintOutcome::Encouragement(message);
        }

        let candidates: Vec<CardId> = board
            .selectable()
            .map(|card| card.id())
            .filter(|id| !self.hinted.contains_key(id))
            .collect();

        let Some(&chosen) = rng.choose(&candidates) else {
            log::debug!("Hint spent with no candidate card, {} left", self.remaining);
            return HintOutcome::NothingToReveal;
        };

        let Some(symbol) = board.get(chosen).map(|card| card.symbol()) else {
            return HintOutcome::NothingToReveal;
        };
        self.hinted.insert(chosen, symbol);
        log::debug!("Hint revealed {} ({}), {} left", chosen, symbol, self.remaining);
        HintOutcome::Revealed(chosen, symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::BoardLayout;
    use crate::core::PlayerId;

    fn board(s: &str) -> Board {
        let layout = BoardLayout::uniform(s.len() / 2, 2);
        Board::from_symbols(&layout, s.chars().map(Symbol).collect()).unwrap()
    }

    #[test]
    fn test_budget_by_difficulty() {
        assert_eq!(HintManager::for_difficulty(Difficulty::Easy).remaining(), 3);
        assert_eq!(HintManager::for_difficulty(Difficulty::Extreme).remaining(), 0);
    }

    #[test]
    fn test_no_hints_left_is_rejected_without_change() {
        let board = board("ABAB");
        let mut hints = HintManager::new(0);

        let outcome = hints.use_hint(&board, &mut GameRng::new(1));

        assert_eq!(outcome, HintOutcome::Unavailable);
        assert!(!outcome.accepted());
        assert!(hints.hinted_cards().is_empty());
        assert_eq!(hints.remaining(), 0);
    }

    #[test]
    fn test_every_accepted_hint_consumes_budget() {
        let board = board("ABCABC");
        let mut hints = HintManager::new(3);
        let mut rng = GameRng::new(4);

        for expected_left in [2, 1, 0] {
            assert!(hints.use_hint(&board, &mut rng).accepted());
            assert_eq!(hints.remaining(), expected_left);
        }
        assert!(!hints.use_hint(&board, &mut rng).accepted());
    }

    #[test]
    fn test_revealed_cards_are_distinct_and_face_down() {
        let mut board = board("ABCDABCD");
        board.get_mut(CardId::new(0)).unwrap().mark_matched(PlayerId::Human);
        board.get_mut(CardId::new(4)).unwrap().mark_matched(PlayerId::Human);
        board.get_mut(CardId::new(1)).unwrap().reveal();

        let mut hints = HintManager::new(50);
        let mut rng = GameRng::new(12);
        for _ in 0..50 {
            hints.use_hint(&board, &mut rng);
        }

        let hinted = hints.hinted_cards();
        // Only cards 2, 3, 5, 6, 7 were ever candidates
        assert_eq!(hinted.len(), 5);
        for (id, symbol) in hinted {
            let card = board.get(id).unwrap();
            assert!(card.is_selectable());
            assert_eq!(card.symbol(), symbol);
            assert!(!card.is_revealed(), "hints never flip cards");
        }
    }

    #[test]
    fn test_outcomes_cover_encouragement_and_reveal() {
        let board = board("ABCDEFABCDEF");
        let mut hints = HintManager::new(40);
        let mut rng = GameRng::new(99);

        let outcomes: Vec<_> = (0..40).map(|_| hints.use_hint(&board, &mut rng)).collect();

        assert!(outcomes.iter().any(|o| matches!(o, HintOutcome::Encouragement(_))));
        assert!(outcomes.iter().any(|o| matches!(o, HintOutcome::Revealed(..))));
        assert!(outcomes.iter().any(|o| matches!(o, HintOutcome::NothingToReveal)));
    }
}
