//! Construction errors.
//!
//! Player actions never fail with an error: an invalid reveal, resolve or
//! hint is rejected and leaves the match untouched. `MatchError` is only
//! produced while building a board, where it signals a programming error in
//! the caller's layout or symbol list.

use thiserror::Error;

use crate::cards::Symbol;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("board has {actual} cards but its layout needs {expected}")]
    BoardLengthMismatch { expected: usize, actual: usize },
    #[error("symbol {symbol} appears {count} times, matching no remaining group of the layout")]
    GroupSizeMismatch { symbol: Symbol, count: usize },
}

pub type Result<T> = std::result::Result<T, MatchError>;
