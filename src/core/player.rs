//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! A match always has exactly two seats: the human at the keyboard and the
//! computer opponent. Zen matches only ever use the human seat.
//!
//! ## PlayerMap
//!
//! Fixed two-slot storage indexed by `PlayerId`, used for per-player
//! scores in outcomes and records.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// The two seats of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlayerId {
    /// The person driving the UI.
    Human,
    /// The computer-controlled player.
    Opponent,
}

impl PlayerId {
    /// Both seats in turn order (the human always starts).
    pub const ALL: [PlayerId; 2] = [PlayerId::Human, PlayerId::Opponent];

    /// Get the raw seat index (human = 0).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            PlayerId::Human => 0,
            PlayerId::Opponent => 1,
        }
    }

    /// The other seat.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            PlayerId::Human => PlayerId::Opponent,
            PlayerId::Opponent => PlayerId::Human,
        }
    }

    /// Iterate over both seats.
    pub fn all() -> impl Iterator<Item = PlayerId> {
        Self::ALL.into_iter()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerId::Human => write!(f, "Human"),
            PlayerId::Opponent => write!(f, "Opponent"),
        }
    }
}

/// Per-player data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use memory_match::core::{PlayerId, PlayerMap};
///
/// let mut scores: PlayerMap<u32> = PlayerMap::with_default();
/// scores[PlayerId::Opponent] += 3;
///
/// assert_eq!(scores[PlayerId::Human], 0);
/// assert_eq!(scores[PlayerId::Opponent], 3);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; 2],
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: [factory(PlayerId::Human), factory(PlayerId::Opponent)],
        }
    }

    /// Create a new PlayerMap with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::all().zip(self.data.iter())
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_other() {
        assert_eq!(PlayerId::Human.other(), PlayerId::Opponent);
        assert_eq!(PlayerId::Opponent.other(), PlayerId::Human);
        assert_eq!(PlayerId::Human.other().other(), PlayerId::Human);
    }

    #[test]
    fn test_player_id_display() {
        assert_eq!(format!("{}", PlayerId::Human), "Human");
        assert_eq!(format!("{}", PlayerId::Opponent), "Opponent");
    }

    #[test]
    fn test_player_map_new() {
        let map: PlayerMap<usize> = PlayerMap::new(|p| p.index() * 10);

        assert_eq!(map[PlayerId::Human], 0);
        assert_eq!(map[PlayerId::Opponent], 10);
    }

    #[test]
    fn test_player_map_iter() {
        let map: PlayerMap<u32> = PlayerMap::new(|p| p.index() as u32 + 1);

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(PlayerId::Human, &1), (PlayerId::Opponent, &2)]);
    }

    #[test]
    fn test_player_map_serialization() {
        let map: PlayerMap<u32> = PlayerMap::new(|p| p.index() as u32 + 1);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: PlayerMap<u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }
}
