//! Card system: cards, symbols, board layout and generation.
//!
//! ## Key Types
//!
//! - `CardId`: Position-stable card identifier (doubles as board index)
//! - `Symbol`: Group key; cards sharing a symbol form one group
//! - `SpecialEffect`: Modifier tagged on a few cards at board-build time
//! - `Card`: Identity plus revealed/matched state
//! - `BoardLayout`: Group sizes of a board
//! - `Board`: The shuffled card sequence of one match
//! - `Selection`: Cards picked during one turn

pub mod card;
pub mod board;

pub use card::{Card, CardId, SpecialEffect, Symbol};
pub use board::{Board, BoardLayout, Selection, MAX_GROUP_SIZE};
