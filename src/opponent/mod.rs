//! The computer opponent's decision engine.
//!
//! `MemoryModel` is an explicit state object owned by the turn engine (one
//! per match), so concurrent matches never share what an opponent has seen.

mod memory;

pub use memory::{MemoryEntry, MemoryModel};
