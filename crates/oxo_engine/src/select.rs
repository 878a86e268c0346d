//! Move selection: validity guards, the opening shortcut, and
//! randomized tie-breaking between equally strong candidates.

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use tracing::{debug, instrument};

use crate::board::{Board, Player, Square};
use crate::error::EngineError;
use crate::rules::winner;
use crate::search::search;

/// Index of the center cell.
const CENTER: usize = 4;

/// The four corner cells, preferred replies when the center is taken.
const CORNERS: [usize; 4] = [0, 2, 6, 8];

/// Picks the engine's move for `board`, breaking ties with the
/// thread-local rng.
///
/// The returned index is empty on `board`. The caller's board is
/// borrowed immutably; all trial placements happen on an internal
/// scratch copy.
///
/// # Errors
///
/// Returns [`EngineError::AlreadyDecided`] when the board already has a
/// winner and [`EngineError::BoardFull`] when no empty cell remains.
/// The engine must only be consulted on live positions.
pub fn select_move(board: &Board, engine: Player) -> Result<usize, EngineError> {
    select_move_with(board, engine, &mut rand::rng())
}

/// [`select_move`] with a caller-supplied rng, for reproducible play.
///
/// The underlying search is deterministic; the rng only shuffles the
/// order in which equally scored candidates are considered (and picks
/// the opening corner), so a fixed seed fixes the whole game.
///
/// # Errors
///
/// Same conditions as [`select_move`].
#[instrument(level = "debug", skip(board, rng), fields(engine = %engine))]
pub fn select_move_with<R: Rng + ?Sized>(
    board: &Board,
    engine: Player,
    rng: &mut R,
) -> Result<usize, EngineError> {
    if let Some(winner) = winner(board) {
        return Err(EngineError::AlreadyDecided(winner));
    }

    let mut candidates = board.available_moves();
    if candidates.is_empty() {
        return Err(EngineError::BoardFull);
    }

    // Opening shortcut: take the center, or answer a center opening
    // with a random corner. Search values these as highly as any
    // alternative, so skipping it only saves work.
    if board.occupied_count() <= 1 {
        if board.is_empty(CENTER) {
            debug!(chosen = CENTER, "opening move: center");
            return Ok(CENTER);
        }
        let open: Vec<usize> = CORNERS
            .iter()
            .copied()
            .filter(|&corner| board.is_empty(corner))
            .collect();
        if let Some(&corner) = open.choose(rng) {
            debug!(chosen = corner, "opening move: corner");
            return Ok(corner);
        }
    }

    // Shuffling the candidate order is the sole source of variety:
    // among equally scored moves the first one evaluated wins.
    candidates.shuffle(rng);

    let mut scratch = board.clone();
    let mut best_move = candidates[0];
    let mut best_value = i32::MIN;
    for &pos in &candidates {
        scratch.set(pos, Square::Occupied(engine));
        let value = search(&mut scratch, engine, 0, false, i32::MIN, i32::MAX);
        scratch.set(pos, Square::Empty);

        if value > best_value {
            best_value = value;
            best_move = pos;
        }
    }

    debug!(chosen = best_move, value = best_value, "selected move");
    Ok(best_move)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Player::{O, X};
    use crate::rules::{Outcome, outcome};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    const E: Option<Player> = None;

    fn board_of(cells: [Option<Player>; 9]) -> Board {
        Board::from(cells)
    }

    fn seeded(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn test_empty_board_takes_center() {
        let board = Board::new();
        for seed in 0..8 {
            let chosen = select_move_with(&board, X, &mut seeded(seed)).unwrap();
            assert_eq!(chosen, CENTER);
        }
    }

    #[test]
    fn test_center_opening_answered_with_corner() {
        let board = board_of([E, E, E, E, Some(X), E, E, E, E]);
        let mut seen = HashSet::new();
        for seed in 0..32 {
            let chosen = select_move_with(&board, O, &mut seeded(seed)).unwrap();
            assert!(CORNERS.contains(&chosen), "non-corner reply {chosen}");
            seen.insert(chosen);
        }
        // The corner pick is uniform over seeds; a run of 32 seeds
        // landing on a single corner would mean the rng is ignored.
        assert!(seen.len() > 1);
    }

    #[test]
    fn test_corner_opening_answered_with_center() {
        let board = board_of([Some(X), E, E, E, E, E, E, E, E]);
        let chosen = select_move_with(&board, O, &mut seeded(3)).unwrap();
        assert_eq!(chosen, CENTER);
    }

    #[test]
    fn test_takes_immediate_win() {
        // X completes the top row at 2.
        let board = board_of([Some(X), Some(X), E, E, Some(O), E, E, E, Some(O)]);
        for seed in 0..8 {
            let chosen = select_move_with(&board, X, &mut seeded(seed)).unwrap();
            assert_eq!(chosen, 2);
        }
    }

    #[test]
    fn test_blocks_forced_loss() {
        // O holds 0 and 1; X must deny the top row.
        let board = board_of([Some(O), Some(O), E, E, Some(X), E, E, E, E]);
        for seed in 0..8 {
            let chosen = select_move_with(&board, X, &mut seeded(seed)).unwrap();
            assert_eq!(chosen, 2);
        }
    }

    #[test]
    fn test_prefers_win_over_block() {
        // X can finish the top row at 2 even though O threatens 3-4-5.
        let board = board_of([Some(X), Some(X), E, Some(O), Some(O), E, E, E, E]);
        for seed in 0..8 {
            let chosen = select_move_with(&board, X, &mut seeded(seed)).unwrap();
            assert_eq!(chosen, 2);
        }
    }

    #[test]
    fn test_single_remaining_cell_is_returned() {
        // X X O / O O X / X O _ : only 8 is open and filling it draws.
        let board = board_of([
            Some(X),
            Some(X),
            Some(O),
            Some(O),
            Some(O),
            Some(X),
            Some(X),
            Some(O),
            E,
        ]);
        let chosen = select_move(&board, X).unwrap();
        assert_eq!(chosen, 8);

        let mut finished = board.clone();
        finished.set(8, Square::Occupied(X));
        assert_eq!(outcome(&finished), Outcome::Draw);
    }

    #[test]
    fn test_full_board_is_rejected() {
        // A completed game that ended level: full board, no winner.
        let board = board_of([
            Some(X),
            Some(X),
            Some(O),
            Some(O),
            Some(O),
            Some(X),
            Some(X),
            Some(O),
            Some(X),
        ]);
        assert_eq!(select_move(&board, X), Err(EngineError::BoardFull));
    }

    #[test]
    fn test_decided_board_is_rejected() {
        let board = board_of([Some(X), Some(X), Some(X), Some(O), Some(O), E, E, E, E]);
        assert_eq!(
            select_move(&board, O),
            Err(EngineError::AlreadyDecided(X))
        );
    }

    #[test]
    fn test_caller_board_is_untouched() {
        let board = board_of([Some(X), E, E, E, Some(O), E, E, E, Some(X)]);
        let snapshot = board.clone();
        select_move_with(&board, O, &mut seeded(7)).unwrap();
        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_returned_cell_is_empty_on_input() {
        let board = board_of([Some(X), E, Some(O), E, Some(X), E, E, Some(O), E]);
        for seed in 0..16 {
            let chosen = select_move_with(&board, O, &mut seeded(seed)).unwrap();
            assert!(board.is_empty(chosen));
        }
    }
}
