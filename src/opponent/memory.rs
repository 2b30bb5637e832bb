//! Bounded observation log and move selection for the computer opponent.
//!
//! The opponent remembers cards it has seen face-up, in the order it saw
//! them, up to a difficulty-dependent capacity. Once full, each new
//! observation pushes out the oldest one. Hard and Extreme opponents
//! never forget.
//!
//! Entries hold card ids only. Current card state (matched, revealed) is
//! always read back from the board, so the log never goes stale.
//!
//! ## Selection policy
//!
//! 1. **Cash in**: the first remembered symbol whose whole group is known
//!    and still face-down is played.
//! 2. **Explore**: otherwise pick among face-down cards never observed.
//! 3. **Fallback**: otherwise pick among all face-down cards.
//!
//! In both random steps the first card is only drawn from cards whose
//! group size fits in the pool, so a large group never blocks a smaller
//! one on a mixed board.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::cards::{Board, Card, CardId, Selection, Symbol};
use crate::core::{Difficulty, GameMode, GameRng};

/// One remembered card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryEntry {
    pub card: CardId,
    /// Ordinal of the observation that created this entry.
    pub observed_at: u64,
}

/// The opponent's memory of revealed cards.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MemoryModel {
    /// `None` = unbounded.
    capacity: Option<usize>,
    log: VecDeque<MemoryEntry>,
    tracked: FxHashSet<CardId>,
    observations: u64,
}

impl MemoryModel {
    /// Create an empty memory holding at most `capacity` cards.
    #[must_use]
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            capacity,
            log: VecDeque::new(),
            tracked: FxHashSet::default(),
            observations: 0,
        }
    }

    /// Memory sized for an opponent at `difficulty` in `mode`.
    #[must_use]
    pub fn for_match(difficulty: Difficulty, mode: GameMode) -> Self {
        Self::new(difficulty.memory_capacity(mode))
    }

    /// An opponent that never forgets.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::new(None)
    }

    #[must_use]
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.log.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    /// Remembered entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &MemoryEntry> {
        self.log.iter()
    }

    #[must_use]
    pub fn remembers(&self, card: CardId) -> bool {
        self.tracked.contains(&card)
    }

    /// Record that `card` was seen face-up.
    ///
    /// Already tracked cards are ignored. Overflow evicts the oldest entry.
    pub fn observe(&mut self, card: &Card) {
        let id = card.id();
        if !self.tracked.insert(id) {
            return;
        }

        self.log.push_back(MemoryEntry {
            card: id,
            observed_at: self.observations,
        });
        self.observations += 1;
        log::trace!("Opponent observed {} ({})", id, card.symbol());

        if let Some(capacity) = self.capacity {
            while self.log.len() > capacity {
                if let Some(evicted) = self.log.pop_front() {
                    self.tracked.remove(&evicted.card);
                    log::trace!("Opponent forgot {}", evicted.card);
                }
            }
        }
    }

    /// Pick the cards for the opponent's next turn.
    ///
    /// Every returned card is face-down and unmatched. The selection is as
    /// long as the group size of its first card; it is empty only when the
    /// board has no face-down cards left.
    pub fn choose_cards(&self, board: &Board, rng: &mut GameRng) -> Selection {
        if let Some(known) = self.known_group(board) {
            log::debug!("Opponent cashes in a remembered group: {:?}", known);
            return known;
        }

        let unobserved: Vec<&Card> = board
            .selectable()
            .filter(|card| !self.remembers(card.id()))
            .collect();
        if let Some(explore) = random_group(&unobserved, board, rng) {
            return explore;
        }

        let selectable: Vec<&Card> = board.selectable().collect();
        random_group(&selectable, board, rng).unwrap_or_else(|| {
            log::warn!("Opponent found no complete selection among {} cards", selectable.len());
            selectable.iter().map(|card| card.id()).collect()
        })
    }

    /// First remembered symbol, in observation order, with its full group
    /// remembered and still face-down.
    fn known_group(&self, board: &Board) -> Option<Selection> {
        let mut groups: Vec<(Symbol, Selection)> = Vec::new();
        for entry in &self.log {
            let Some(card) = board.get(entry.card) else {
                continue;
            };
            match groups.iter_mut().find(|(symbol, _)| *symbol == card.symbol()) {
                Some((_, members)) => members.push(entry.card),
                None => groups.push((card.symbol(), Selection::from_slice(&[entry.card]))),
            }
        }

        groups.into_iter().find_map(|(symbol, members)| {
            let needed = board.group_size_of(symbol);
            let ready = needed > 0
                && members.len() >= needed
                && members
                    .iter()
                    .all(|&id| board.get(id).is_some_and(Card::is_selectable));
            ready.then(|| members.into_iter().take(needed).collect())
        })
    }
}

/// A uniformly random selection from `pool`: the first card is drawn at
/// random among cards whose group fits in the pool, the rest are drawn to
/// fill that card's group size.
fn random_group(pool: &[&Card], board: &Board, rng: &mut GameRng) -> Option<Selection> {
    let fitting: Vec<&Card> = pool
        .iter()
        .copied()
        .filter(|card| board.group_size_of(card.symbol()) <= pool.len())
        .collect();
    let first = *rng.choose(&fitting)?;
    let needed = board.group_size_of(first.symbol());

    let rest: Vec<CardId> = pool
        .iter()
        .map(|card| card.id())
        .filter(|&id| id != first.id())
        .collect();

    let mut selection = Selection::new();
    selection.push(first.id());
    selection.extend(rng.sample(&rest, needed.saturating_sub(1)));
    Some(selection)
}
