//! Cards on the table.
//!
//! A `Card` has an immutable identity (`CardId` + `Symbol`) and a small
//! amount of mutable state: revealed, matched, who matched it and the
//! special effect tagged on it at board-build time. Only the turn engine
//! and the effect assigner mutate cards; everyone else reads them.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Position-stable identifier of a card within one match.
///
/// Ids are assigned `0..N` in shuffled board order, so an id doubles as
/// the card's board index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Board index of this card.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Group key of a card. Cards sharing a symbol form one group.
///
/// Symbols are labelled `A`, `B`, `C`, ... in group order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Symbol(pub char);

impl Symbol {
    /// Number of distinct labels available.
    pub const ALPHABET_LEN: usize = 26;

    /// The `n`-th label (`0 => 'A'`). `None` past `'Z'`.
    #[must_use]
    pub fn nth(n: usize) -> Option<Self> {
        if n < Self::ALPHABET_LEN {
            Some(Self((b'A' + n as u8) as char))
        } else {
            None
        }
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Board-assigned modifier altering turn flow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialEffect {
    #[default]
    None,
    /// Highlights every unmatched card of the same symbol ("reveladora").
    RevealAll,
    /// Matching it skips the opponent's next turn ("congelante").
    FreezeOpponent,
    /// Missing with it benches the cooperative opponent ("armadilha").
    Trap,
}

impl SpecialEffect {
    #[must_use]
    pub const fn is_special(self) -> bool {
        !matches!(self, SpecialEffect::None)
    }
}

/// A card on the board.
///
/// Invariant: `is_matched() => is_revealed()`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    symbol: Symbol,
    revealed: bool,
    matched: bool,
    matched_by: Option<PlayerId>,
    #[serde(default)]
    special: SpecialEffect,
}

impl Card {
    /// Create a face-down card.
    #[must_use]
    pub const fn new(id: CardId, symbol: Symbol) -> Self {
        Self {
            id,
            symbol,
            revealed: false,
            matched: false,
            matched_by: None,
            special: SpecialEffect::None,
        }
    }

    #[must_use]
    pub const fn id(&self) -> CardId {
        self.id
    }

    #[must_use]
    pub const fn symbol(&self) -> Symbol {
        self.symbol
    }

    #[must_use]
    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    #[must_use]
    pub const fn is_matched(&self) -> bool {
        self.matched
    }

    /// Face-down and not yet part of a match.
    #[must_use]
    pub const fn is_selectable(&self) -> bool {
        !self.revealed && !self.matched
    }

    #[must_use]
    pub const fn matched_by(&self) -> Option<PlayerId> {
        self.matched_by
    }

    #[must_use]
    pub const fn special_effect(&self) -> SpecialEffect {
        self.special
    }

    pub(crate) fn reveal(&mut self) {
        self.revealed = true;
    }

    /// Turn a pending, unmatched card face-down again.
    pub(crate) fn hide(&mut self) {
        debug_assert!(!self.matched, "matched cards never hide");
        self.revealed = false;
    }

    pub(crate) fn mark_matched(&mut self, by: PlayerId) {
        self.revealed = true;
        self.matched = true;
        self.matched_by = Some(by);
    }

    pub(crate) fn set_special_effect(&mut self, effect: SpecialEffect) {
        self.special = effect;
    }
}
