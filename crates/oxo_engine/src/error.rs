//! Engine error types.

use crate::board::Player;

/// Error raised when the engine is handed a board it cannot act on.
///
/// Every variant is a caller bug or malformed input; the engine fails
/// fast rather than guessing at intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum EngineError {
    /// A board-shaped input did not contain exactly nine cells.
    #[display("Invalid board: expected 9 cells, got {}", len)]
    InvalidBoard {
        /// Number of cells actually supplied.
        len: usize,
    },

    /// Move selection was requested but no empty cell remains.
    #[display("No available move: the board is full")]
    BoardFull,

    /// Move selection was requested on a board that already has a winner.
    #[display("Game is already decided: {} has won", _0)]
    AlreadyDecided(Player),
}

impl std::error::Error for EngineError {}
