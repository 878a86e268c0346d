//! Core board types: players, squares, and the 3x3 grid.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A player's mark.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum Player {
    /// Player X (moves first).
    X,
    /// Player O (moves second).
    O,
}

impl Player {
    /// Returns the opposing player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// A single cell on the board.
///
/// On the wire a square is an `Option<Player>`: `"X"`, `"O"`, or `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Option<Player>", from = "Option<Player>")]
pub enum Square {
    /// Empty cell.
    Empty,
    /// Cell holding a player's mark.
    Occupied(Player),
}

impl From<Option<Player>> for Square {
    fn from(mark: Option<Player>) -> Self {
        match mark {
            Some(player) => Square::Occupied(player),
            None => Square::Empty,
        }
    }
}

impl From<Square> for Option<Player> {
    fn from(square: Square) -> Self {
        match square {
            Square::Occupied(player) => Some(player),
            Square::Empty => None,
        }
    }
}

/// The eight winning lines in scan order: rows, columns, diagonals.
pub const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// 3x3 tic-tac-toe board.
///
/// Serializes transparently as a nine-element array of cells in
/// row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Gets the square at the given position (0-8).
    pub fn get(&self, pos: usize) -> Option<Square> {
        self.squares.get(pos).copied()
    }

    /// Sets the square at the given position.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is out of bounds; callers validate positions
    /// before writing.
    pub fn set(&mut self, pos: usize, square: Square) {
        self.squares[pos] = square;
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: usize) -> bool {
        matches!(self.get(pos), Some(Square::Empty))
    }

    /// Checks if every square is occupied.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|square| *square != Square::Empty)
    }

    /// Returns the indices of empty squares in ascending order.
    pub fn available_moves(&self) -> Vec<usize> {
        (0..9).filter(|&pos| self.is_empty(pos)).collect()
    }

    /// Counts the occupied squares.
    pub fn occupied_count(&self) -> usize {
        self.squares
            .iter()
            .filter(|square| **square != Square::Empty)
            .count()
    }

    /// Returns the three squares addressed by a win line.
    pub fn line(&self, line: [usize; 3]) -> [Square; 3] {
        line.map(|pos| self.squares[pos])
    }

    /// Formats the board as a human-readable grid.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let symbol = match self.squares[row * 3 + col] {
                    Square::Empty => '.',
                    Square::Occupied(Player::X) => 'X',
                    Square::Occupied(Player::O) => 'O',
                };
                result.push(symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl From<[Option<Player>; 9]> for Board {
    fn from(cells: [Option<Player>; 9]) -> Self {
        Self {
            squares: cells.map(Square::from),
        }
    }
}

impl TryFrom<Vec<Square>> for Board {
    type Error = EngineError;

    /// Validates an untrusted cell list: exactly nine squares or
    /// [`EngineError::InvalidBoard`].
    fn try_from(squares: Vec<Square>) -> Result<Self, Self::Error> {
        let len = squares.len();
        let squares: [Square; 9] = squares
            .try_into()
            .map_err(|_| EngineError::InvalidBoard { len })?;
        Ok(Self { squares })
    }
}
