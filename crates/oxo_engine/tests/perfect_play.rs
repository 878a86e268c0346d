//! Whole-game properties of the selector: perfect play never loses,
//! threats get answered, and the opening shortcut agrees with search.

use oxo_engine::{
    Board, EngineError, Outcome, Player, Square, outcome, search, select_move_with,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

/// Plays a full game with the engine driving both sides.
fn play_self_game(rng: &mut StdRng) -> Outcome {
    let mut board = Board::new();
    let mut to_move = Player::X;
    loop {
        match outcome(&board) {
            Outcome::InProgress => {}
            terminal => return terminal,
        }
        let chosen = select_move_with(&board, to_move, rng).unwrap();
        assert!(board.is_empty(chosen), "selector chose occupied cell {chosen}");
        board.set(chosen, Square::Occupied(to_move));
        to_move = to_move.opponent();
    }
}

/// Plays the engine against a uniformly random opponent and returns the
/// terminal outcome.
fn play_vs_random(engine: Player, rng: &mut StdRng) -> Outcome {
    let mut board = Board::new();
    let mut to_move = Player::X;
    loop {
        match outcome(&board) {
            Outcome::InProgress => {}
            terminal => return terminal,
        }
        let chosen = if to_move == engine {
            select_move_with(&board, engine, rng).unwrap()
        } else {
            *board.available_moves().choose(rng).unwrap()
        };
        board.set(chosen, Square::Occupied(to_move));
        to_move = to_move.opponent();
    }
}

#[test]
fn perfect_play_from_start_is_draw() {
    for seed in 0..25 {
        let mut rng = StdRng::seed_from_u64(seed);
        let terminal = play_self_game(&mut rng);
        assert_eq!(terminal, Outcome::Draw, "seed {seed} did not draw");
    }
}

#[test]
fn engine_never_loses_vs_random_opponent() {
    for engine in [Player::X, Player::O] {
        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let terminal = play_vs_random(engine, &mut rng);
            assert_ne!(
                terminal,
                Outcome::Win(engine.opponent()),
                "engine as {engine} lost with seed {seed}"
            );
        }
    }
}

#[test]
fn must_block_vertical_threat() {
    // X threatens the left column at 0 and 3; O holds the center and
    // has to answer at 6.
    let mut board = Board::new();
    board.set(0, Square::Occupied(Player::X));
    board.set(3, Square::Occupied(Player::X));
    board.set(4, Square::Occupied(Player::O));
    let mut rng = StdRng::seed_from_u64(11);
    let chosen = select_move_with(&board, Player::O, &mut rng).unwrap();
    assert_eq!(chosen, 6, "O must block at 6");
}

#[test]
fn prefer_winning_move_over_block() {
    // X can finish the top row; the win beats any defensive move.
    let mut board = Board::new();
    board.set(0, Square::Occupied(Player::X));
    board.set(1, Square::Occupied(Player::X));
    board.set(3, Square::Occupied(Player::O));
    board.set(4, Square::Occupied(Player::O));
    let mut rng = StdRng::seed_from_u64(11);
    let chosen = select_move_with(&board, Player::X, &mut rng).unwrap();
    assert_eq!(chosen, 2, "X should complete the row");
}

#[test]
fn distinct_seeds_vary_tie_broken_games() {
    // Fixed seed fixes the game; across seeds the corner replies and
    // shuffled candidate orders produce different move sequences.
    let mut transcripts = std::collections::HashSet::new();
    for seed in 0..16 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut board = Board::new();
        let mut to_move = Player::X;
        let mut transcript = Vec::new();
        while outcome(&board) == Outcome::InProgress {
            let chosen = select_move_with(&board, to_move, &mut rng).unwrap();
            transcript.push(chosen);
            board.set(chosen, Square::Occupied(to_move));
            to_move = to_move.opponent();
        }
        transcripts.insert(transcript);
    }
    assert!(transcripts.len() > 1, "all seeds produced identical games");
}

#[test]
fn opening_fast_path_is_optimal() {
    // The shortcut must never give up value: on the empty board and on
    // every one-mark board, the moves it can return score exactly as
    // well under search as the best available move.
    fn move_value(board: &Board, engine: Player, pos: usize) -> i32 {
        let mut scratch = board.clone();
        scratch.set(pos, Square::Occupied(engine));
        search(&mut scratch, engine, 0, false, i32::MIN, i32::MAX)
    }

    fn best_value(board: &Board, engine: Player) -> i32 {
        board
            .available_moves()
            .into_iter()
            .map(|pos| move_value(board, engine, pos))
            .max()
            .unwrap()
    }

    // Empty board: the shortcut answers 4.
    let empty = Board::new();
    assert_eq!(move_value(&empty, Player::X, 4), best_value(&empty, Player::X));

    // One opponent mark: center if free, otherwise any empty corner.
    for occupied in 0..9 {
        let mut board = Board::new();
        board.set(occupied, Square::Occupied(Player::X));
        let best = best_value(&board, Player::O);
        if board.is_empty(4) {
            assert_eq!(move_value(&board, Player::O, 4), best, "center reply to {occupied}");
        } else {
            for corner in [0, 2, 6, 8] {
                assert_eq!(
                    move_value(&board, Player::O, corner),
                    best,
                    "corner {corner} reply to center opening"
                );
            }
        }
    }
}

#[test]
fn terminal_boards_are_rejected_not_searched() {
    let mut board = Board::new();
    for pos in [0, 4, 8] {
        board.set(pos, Square::Occupied(Player::O));
    }
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(
        select_move_with(&board, Player::X, &mut rng),
        Err(EngineError::AlreadyDecided(Player::O))
    );
}
