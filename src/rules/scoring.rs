//! Scores and match outcomes.
//!
//! Scores are never stored. They are recomputed from card state on every
//! query, so a partially applied update can never leave them out of sync.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::{Board, Symbol};
use crate::core::PlayerId;

/// Points per completed group and the group size needed to earn them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoringRule {
    pub points_per_group: u32,
    pub min_group_size: usize,
}

impl ScoringRule {
    #[must_use]
    pub const fn new(points_per_group: u32, min_group_size: usize) -> Self {
        Self {
            points_per_group,
            min_group_size,
        }
    }

    /// Score of `player` on `board`.
    ///
    /// A symbol counts once the player has matched every card of it and its
    /// group is at least `min_group_size` cards large.
    #[must_use]
    pub fn score(&self, board: &Board, player: PlayerId) -> u32 {
        let mut matched: FxHashMap<Symbol, usize> = FxHashMap::default();
        for card in board.cards() {
            if card.matched_by() == Some(player) {
                *matched.entry(card.symbol()).or_insert(0) += 1;
            }
        }

        let completed = matched
            .into_iter()
            .filter(|&(symbol, count)| {
                let size = board.group_size_of(symbol);
                count == size && size >= self.min_group_size
            })
            .count() as u32;

        completed * self.points_per_group
    }
}

/// Result of a finished match, from the human's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchOutcome {
    Win,
    Loss,
    Draw,
    /// Zen matches have no winner.
    Complete,
}

impl MatchOutcome {
    /// Competitive outcome from the two final scores.
    #[must_use]
    pub fn from_scores(human: u32, opponent: u32) -> Self {
        match human.cmp(&opponent) {
            std::cmp::Ordering::Greater => MatchOutcome::Win,
            std::cmp::Ordering::Less => MatchOutcome::Loss,
            std::cmp::Ordering::Equal => MatchOutcome::Draw,
        }
    }
}

impl std::fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchOutcome::Win => write!(f, "WIN"),
            MatchOutcome::Loss => write!(f, "LOSS"),
            MatchOutcome::Draw => write!(f, "DRAW"),
            MatchOutcome::Complete => write!(f, "COMPLETE"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{BoardLayout, CardId};
    use crate::core::Difficulty;

    fn board(layout: BoardLayout, s: &str) -> Board {
        Board::from_symbols(&layout, s.chars().map(Symbol).collect()).unwrap()
    }

    fn match_cards(board: &mut Board, ids: &[u32], by: PlayerId) {
        for &id in ids {
            board.get_mut(CardId::new(id)).unwrap().mark_matched(by);
        }
    }

    #[test]
    fn test_easy_one_point_per_pair() {
        let mut board = board(BoardLayout::uniform(3, 2), "AABBCC");
        let rule = Difficulty::Easy.scoring_rule();

        match_cards(&mut board, &[0, 1, 2, 3], PlayerId::Human);
        match_cards(&mut board, &[4, 5], PlayerId::Opponent);

        assert_eq!(rule.score(&board, PlayerId::Human), 2);
        assert_eq!(rule.score(&board, PlayerId::Opponent), 1);
    }

    #[test]
    fn test_medium_and_hard_weights() {
        let mut medium = board(BoardLayout::uniform(2, 3), "AAABBB");
        match_cards(&mut medium, &[0, 1, 2], PlayerId::Human);
        assert_eq!(Difficulty::Medium.scoring_rule().score(&medium, PlayerId::Human), 2);

        let mut hard = board(BoardLayout::uniform(2, 4), "AAAABBBB");
        match_cards(&mut hard, &[4, 5, 6, 7], PlayerId::Opponent);
        assert_eq!(Difficulty::Hard.scoring_rule().score(&hard, PlayerId::Opponent), 3);
    }

    #[test]
    fn test_extreme_counts_any_completed_group() {
        let mut board = board(BoardLayout::new(vec![2, 3, 4]), "AABBBCCCC");
        match_cards(&mut board, &[0, 1, 2, 3, 4], PlayerId::Human);

        assert_eq!(Difficulty::Extreme.scoring_rule().score(&board, PlayerId::Human), 8);
    }

    #[test]
    fn test_groups_below_threshold_score_nothing() {
        let mut board = board(BoardLayout::uniform(2, 2), "AABB");
        match_cards(&mut board, &[0, 1], PlayerId::Human);

        assert_eq!(Difficulty::Hard.scoring_rule().score(&board, PlayerId::Human), 0);
    }

    #[test]
    fn test_outcome_from_scores() {
        assert_eq!(MatchOutcome::from_scores(3, 1), MatchOutcome::Win);
        assert_eq!(MatchOutcome::from_scores(1, 3), MatchOutcome::Loss);
        assert_eq!(MatchOutcome::from_scores(2, 2), MatchOutcome::Draw);
        assert_eq!(format!("{}", MatchOutcome::Complete), "COMPLETE");
    }
}
