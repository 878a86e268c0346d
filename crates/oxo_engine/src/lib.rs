//! Perfect-play tic-tac-toe decision engine.
//!
//! The engine never loses from a legal position: it scores moves with
//! depth-tracking minimax under alpha-beta pruning and picks among
//! equally strong candidates at random, with a shortcut for the two
//! standard opening replies (center, then corner).
//!
//! # Architecture
//!
//! - **Board**: marks, squares, the 3x3 grid, and the eight win lines
//! - **Rules**: winner detection, outcome classification, utility
//! - **Search**: deterministic minimax with backtracking on a scratch
//!   board
//! - **Select**: the entry point callers use to pick a move
//!
//! # Example
//!
//! ```
//! use oxo_engine::{Board, Player, select_move};
//!
//! let board = Board::new();
//! let opening = select_move(&board, Player::X)?;
//! assert_eq!(opening, 4); // always the center on an empty board
//! # Ok::<(), oxo_engine::EngineError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod board;
mod error;
mod rules;
mod search;
mod select;

// Crate-level exports - Board types
pub use board::{Board, Player, Square, WIN_LINES};

// Crate-level exports - Errors
pub use error::EngineError;

// Crate-level exports - Terminal evaluation
pub use rules::{Outcome, WIN_SCORE, outcome, utility, winner};

// Crate-level exports - Adversarial search and move selection
pub use search::search;
pub use select::{select_move, select_move_with};
