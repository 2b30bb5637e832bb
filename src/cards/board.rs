//! Board layout and generation.
//!
//! ## BoardLayout
//!
//! The list of group sizes making up a board. Group `i` is labelled with
//! `Symbol::nth(i)`, so a layout fully determines the multiset of symbols.
//!
//! ## Board
//!
//! The ordered card sequence of one match. It is shuffled once when
//! generated and never reordered: card `i` always sits at index `i`.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::card::{Card, CardId, SpecialEffect, Symbol};
use crate::core::{GameRng, MatchError, Result};

/// Largest group a board may contain.
pub const MAX_GROUP_SIZE: usize = 4;

/// Cards picked for one turn. Never longer than `MAX_GROUP_SIZE`.
pub type Selection = SmallVec<[CardId; MAX_GROUP_SIZE]>;

/// Group sizes of a board, one entry per symbol.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardLayout {
    group_sizes: Vec<usize>,
}

impl BoardLayout {
    /// Create a layout from explicit group sizes.
    ///
    /// Panics on an empty layout, a group size outside `1..=4` or more
    /// groups than there are symbol labels.
    pub fn new(group_sizes: Vec<usize>) -> Self {
        assert!(!group_sizes.is_empty(), "Layout needs at least one group");
        assert!(
            group_sizes.len() <= Symbol::ALPHABET_LEN,
            "At most {} groups supported",
            Symbol::ALPHABET_LEN
        );
        assert!(
            group_sizes.iter().all(|&size| (1..=MAX_GROUP_SIZE).contains(&size)),
            "Group sizes must be 1..={MAX_GROUP_SIZE}"
        );

        Self { group_sizes }
    }

    /// `groups` groups of `size` cards each.
    pub fn uniform(groups: usize, size: usize) -> Self {
        Self::new(vec![size; groups])
    }

    #[must_use]
    pub fn group_sizes(&self) -> &[usize] {
        &self.group_sizes
    }

    #[must_use]
    pub fn group_count(&self) -> usize {
        self.group_sizes.len()
    }

    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.group_sizes.iter().sum()
    }

    /// Unshuffled symbol sequence: each group's label repeated by its size.
    #[must_use]
    pub fn symbols(&self) -> Vec<Symbol> {
        self.group_sizes
            .iter()
            .enumerate()
            .flat_map(|(i, &size)| {
                // `new` caps the group count at the alphabet length
                let symbol = Symbol::nth(i).unwrap_or(Symbol('?'));
                std::iter::repeat(symbol).take(size)
            })
            .collect()
    }
}

/// The cards of one match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cards: Vec<Card>,
    group_sizes: FxHashMap<Symbol, usize>,
}

impl Board {
    /// Generate a shuffled board for `layout`.
    ///
    /// Ids are assigned sequentially in shuffled order.
    pub fn generate(layout: &BoardLayout, rng: &mut GameRng) -> Self {
        let mut symbols = layout.symbols();
        rng.shuffle(&mut symbols);
        log::debug!(
            "Generated board: {} cards in {} groups",
            symbols.len(),
            layout.group_count()
        );
        Self::from_validated(symbols)
    }

    /// Build a board from symbols in the given order, without shuffling.
    ///
    /// The symbols must form exactly the groups of `layout`.
    pub fn from_symbols(layout: &BoardLayout, symbols: Vec<Symbol>) -> Result<Self> {
        if symbols.len() != layout.total_cards() {
            return Err(MatchError::BoardLengthMismatch {
                expected: layout.total_cards(),
                actual: symbols.len(),
            });
        }

        let mut counts: Vec<(Symbol, usize)> = count_symbols(&symbols).into_iter().collect();
        counts.sort_by_key(|&(symbol, count)| (count, symbol));

        let mut expected = layout.group_sizes().to_vec();
        expected.sort_unstable();

        for (i, &(symbol, count)) in counts.iter().enumerate() {
            if expected.get(i) != Some(&count) {
                return Err(MatchError::GroupSizeMismatch { symbol, count });
            }
        }

        Ok(Self::from_validated(symbols))
    }

    fn from_validated(symbols: Vec<Symbol>) -> Self {
        let group_sizes = count_symbols(&symbols);
        let cards = symbols
            .into_iter()
            .enumerate()
            .map(|(i, symbol)| Card::new(CardId::new(i as u32), symbol))
            .collect();
        Self { cards, group_sizes }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// All cards in board order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.index())
    }

    pub(crate) fn get_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.get_mut(id.index())
    }

    /// Tag a card with a special effect before play starts.
    ///
    /// Returns `false` (leaving the board unchanged) for an unknown card or
    /// one that already carries an effect.
    pub fn set_special_effect(&mut self, id: CardId, effect: SpecialEffect) -> bool {
        match self.cards.get_mut(id.index()) {
            Some(card) if !card.special_effect().is_special() => {
                card.set_special_effect(effect);
                true
            }
            _ => false,
        }
    }

    /// Number of cards carrying `symbol` (its group size).
    #[must_use]
    pub fn group_size_of(&self, symbol: Symbol) -> usize {
        self.group_sizes.get(&symbol).copied().unwrap_or(0)
    }

    /// Face-down, unmatched cards in board order.
    pub fn selectable(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|card| card.is_selectable())
    }

    /// Unmatched cards carrying `symbol`.
    pub fn unmatched_with_symbol(&self, symbol: Symbol) -> impl Iterator<Item = &Card> {
        self.cards
            .iter()
            .filter(move |card| card.symbol() == symbol && !card.is_matched())
    }

    #[must_use]
    pub fn all_matched(&self) -> bool {
        self.cards.iter().all(Card::is_matched)
    }
}

fn count_symbols(symbols: &[Symbol]) -> FxHashMap<Symbol, usize> {
    let mut counts = FxHashMap::default();
    for &symbol in symbols {
        *counts.entry(symbol).or_insert(0) += 1;
    }
    counts
}
