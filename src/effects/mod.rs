//! Special cards: placement and consequences.
//!
//! - `assign_special_effects`: tags a few cards after board generation
//! - `EffectTrigger`: the single `(effect, mode, actor)` consequence table
//!   the turn engine consults on reveal and resolve

mod assigner;
mod table;

pub use assigner::{assign_special_effects, requested_effects};
pub use table::EffectTrigger;
