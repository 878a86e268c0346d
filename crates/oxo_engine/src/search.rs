//! Adversarial search: depth-tracking minimax with alpha-beta pruning.

use crate::board::{Board, Player, Square};
use crate::rules::{WIN_SCORE, utility};

/// Scores `board` from `engine`'s perspective assuming perfect play by
/// both sides.
///
/// `depth` counts plies below the caller's trial move. Wins reached
/// sooner score higher (`WIN_SCORE - depth`) and losses reached later
/// score higher (`-WIN_SCORE + depth`), so the engine hurries wins and
/// drags out unavoidable losses. `maximizing` is true when it is the
/// engine's turn to place a mark.
///
/// Candidate cells are visited in ascending index order and every trial
/// placement is undone before the function returns, pruned branches
/// included: the search is fully deterministic and leaves `board` in
/// exactly the state it was given.
pub fn search(
    board: &mut Board,
    engine: Player,
    depth: u8,
    maximizing: bool,
    mut alpha: i32,
    mut beta: i32,
) -> i32 {
    let score = utility(board, engine);
    if score == WIN_SCORE {
        return score - i32::from(depth);
    }
    if score == -WIN_SCORE {
        return score + i32::from(depth);
    }
    if board.is_full() {
        return 0;
    }

    let mover = if maximizing {
        engine
    } else {
        engine.opponent()
    };
    let mut best = if maximizing { i32::MIN } else { i32::MAX };

    for pos in 0..9 {
        if !board.is_empty(pos) {
            continue;
        }
        board.set(pos, Square::Occupied(mover));
        let value = search(board, engine, depth + 1, !maximizing, alpha, beta);
        board.set(pos, Square::Empty);

        if maximizing {
            best = best.max(value);
            alpha = alpha.max(best);
        } else {
            best = best.min(value);
            beta = beta.min(best);
        }
        if beta <= alpha {
            break;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Player::{O, X};

    const E: Option<Player> = None;

    fn board_of(cells: [Option<Player>; 9]) -> Board {
        Board::from(cells)
    }

    fn full_window(board: &mut Board, engine: Player, maximizing: bool) -> i32 {
        search(board, engine, 0, maximizing, i32::MIN, i32::MAX)
    }

    /// Plain minimax without pruning, as a reference implementation.
    fn minimax_plain(board: &mut Board, engine: Player, depth: u8, maximizing: bool) -> i32 {
        let score = utility(board, engine);
        if score == WIN_SCORE {
            return score - i32::from(depth);
        }
        if score == -WIN_SCORE {
            return score + i32::from(depth);
        }
        if board.is_full() {
            return 0;
        }

        let mover = if maximizing {
            engine
        } else {
            engine.opponent()
        };
        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for pos in 0..9 {
            if !board.is_empty(pos) {
                continue;
            }
            board.set(pos, Square::Occupied(mover));
            let value = minimax_plain(board, engine, depth + 1, !maximizing);
            board.set(pos, Square::Empty);
            best = if maximizing {
                best.max(value)
            } else {
                best.min(value)
            };
        }
        best
    }

    #[test]
    fn test_empty_board_is_drawn() {
        let mut board = Board::new();
        assert_eq!(full_window(&mut board, X, true), 0);
    }

    #[test]
    fn test_immediate_win_scores_nine() {
        // X completes the top row on the next ply: utility 10 at depth 1.
        let mut board = board_of([Some(X), Some(X), E, Some(O), Some(O), E, E, E, E]);
        assert_eq!(full_window(&mut board, X, true), 9);
    }

    #[test]
    fn test_unavoidable_loss_scores_negative() {
        // O to move cannot stop both of X's open lines (0-1-2 and 0-3-6).
        let mut board = board_of([
            Some(X),
            Some(X),
            E,
            Some(X),
            Some(O),
            E,
            E,
            E,
            Some(O),
        ]);
        let value = full_window(&mut board, O, true);
        assert!(value < 0, "forked position should be losing, got {value}");
    }

    #[test]
    fn test_search_restores_board() {
        let mut board = board_of([Some(X), E, E, E, Some(O), E, E, E, Some(X)]);
        let snapshot = board.clone();
        full_window(&mut board, O, true);
        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_search_is_deterministic() {
        let mut board = board_of([Some(X), E, E, E, Some(O), E, E, Some(X), E]);
        let first = full_window(&mut board, O, true);
        let second = full_window(&mut board, O, true);
        assert_eq!(first, second);
    }

    #[test]
    fn test_pruning_preserves_minimax_value() {
        let positions = [
            [E, E, E, E, E, E, E, E, E],
            [Some(X), E, E, E, E, E, E, E, E],
            [Some(X), E, E, E, Some(O), E, E, E, E],
            [Some(X), Some(O), Some(X), E, Some(O), E, E, E, E],
            [Some(O), Some(O), E, E, Some(X), E, E, E, Some(X)],
        ];
        for cells in positions {
            let mut board = board_of(cells);
            for engine in [X, O] {
                for maximizing in [true, false] {
                    let pruned = search(&mut board, engine, 0, maximizing, i32::MIN, i32::MAX);
                    let plain = minimax_plain(&mut board, engine, 0, maximizing);
                    assert_eq!(pruned, plain, "cells {cells:?} engine {engine} max {maximizing}");
                }
            }
        }
    }

    #[test]
    fn test_depth_adjustment_orders_moves() {
        // X at 0,1 against O at 3,4: taking the win at 2 scores 10 - 1,
        // blocking O at 5 salvages a draw, and 6 hands O the 3-4-5 line
        // (a loss at depth 2, scored -10 + 2).
        let mut board = board_of([Some(X), Some(X), E, Some(O), Some(O), E, E, E, E]);

        let mut value_after = |pos: usize| {
            board.set(pos, Square::Occupied(X));
            let value = search(&mut board, X, 1, false, i32::MIN, i32::MAX);
            board.set(pos, Square::Empty);
            value
        };

        assert_eq!(value_after(2), 9);
        assert_eq!(value_after(5), 0);
        assert_eq!(value_after(6), -8);
    }
}
