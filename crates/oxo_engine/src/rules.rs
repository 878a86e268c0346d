//! Terminal evaluation: winner detection, outcome classification, and
//! utility scoring.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Player, Square, WIN_LINES};

/// Utility magnitude of a decided game, before depth adjustment.
pub const WIN_SCORE: i32 = 10;

/// Classification of a board position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The game is still being played.
    InProgress,
    /// The given player holds a completed line.
    Win(Player),
    /// Every cell is filled and nobody won.
    Draw,
}

impl Outcome {
    /// Checks whether the game is over.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// Returns the winning player, if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Win(player) => Some(*player),
            _ => None,
        }
    }
}

/// Returns the player holding a completed line, if any.
///
/// Lines are scanned in the fixed order of [`WIN_LINES`]; the scan is
/// read-only, so repeated calls on the same board always agree.
pub fn winner(board: &Board) -> Option<Player> {
    for line in WIN_LINES {
        match board.line(line) {
            [Square::Occupied(a), Square::Occupied(b), Square::Occupied(c)]
                if a == b && b == c =>
            {
                return Some(a);
            }
            _ => {}
        }
    }
    None
}

/// Classifies a position.
///
/// The winner check runs before the fullness check, so a win on the
/// ninth mark classifies as a win, not a draw.
pub fn outcome(board: &Board) -> Outcome {
    if let Some(player) = winner(board) {
        Outcome::Win(player)
    } else if board.is_full() {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}

/// Scores a position from `engine`'s perspective: [`WIN_SCORE`] when the
/// engine has won, its negation when the opponent has, zero otherwise
/// (draw or undecided).
pub fn utility(board: &Board, engine: Player) -> i32 {
    match winner(board) {
        Some(player) if player == engine => WIN_SCORE,
        Some(_) => -WIN_SCORE,
        None => 0,
    }
}
