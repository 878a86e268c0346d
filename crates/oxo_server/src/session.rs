//! In-memory game sessions.
//!
//! A session pairs one registered player against the engine. X always
//! moves first; which side plays X is decided by a coin flip at
//! creation, and if the engine draws X it makes its opening move
//! before the session is first returned. When a game reaches a
//! terminal position the session records a [`GameResult`] from the
//! player's perspective and rejects further moves.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use oxo_engine::{Board, EngineError, Outcome, Player, Square, outcome, select_move_with};
use rand::Rng;
use rand::distr::{Alphanumeric, SampleString};
use tracing::{debug, info, instrument};

use crate::db::GameResult;

const SESSION_ID_LEN: usize = 12;

/// Errors from session lookup and play.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SessionError {
    /// No session exists with the given id.
    #[display("Session not found: {}", _0)]
    NotFound(String),
    /// The game has already finished.
    #[display("Game is already finished")]
    Finished,
    /// The player moved while it was the engine's turn.
    #[display("It is not your turn")]
    NotYourTurn,
    /// The cell index is outside the board.
    #[display("Cell {} is out of range (expected 0 to 8)", _0)]
    OutOfRange(usize),
    /// The cell is already occupied.
    #[display("Cell {} is already taken", _0)]
    CellTaken(usize),
    /// The engine failed to produce a move.
    #[display("{}", _0)]
    Engine(EngineError),
}

impl std::error::Error for SessionError {}

impl From<EngineError> for SessionError {
    fn from(error: EngineError) -> Self {
        Self::Engine(error)
    }
}

/// A single game between one player and the engine.
#[derive(Debug, Clone, derive_getters::Getters)]
pub struct GameSession {
    /// Opaque session id handed to the client.
    id: String,
    /// The registered player this game belongs to.
    user_id: i32,
    /// Current position.
    board: Board,
    /// Mark the human plays.
    human: Player,
    /// Mark the engine plays.
    engine: Player,
    /// Set once the game reaches a terminal position.
    result: Option<GameResult>,
}

impl GameSession {
    fn new(id: String, user_id: i32, human: Player) -> Self {
        Self {
            id,
            user_id,
            board: Board::default(),
            human,
            engine: human.opponent(),
            result: None,
        }
    }

    /// The side whose turn it is. X moves first, so parity of the
    /// occupied count decides.
    pub fn to_move(&self) -> Player {
        if self.board.occupied_count() % 2 == 0 {
            Player::X
        } else {
            Player::O
        }
    }

    /// Current outcome of the board.
    pub fn status(&self) -> Outcome {
        outcome(&self.board)
    }

    fn play_human(&mut self, cell: usize) -> Result<(), SessionError> {
        if self.result.is_some() {
            return Err(SessionError::Finished);
        }
        if self.to_move() != self.human {
            return Err(SessionError::NotYourTurn);
        }
        if cell > 8 {
            return Err(SessionError::OutOfRange(cell));
        }
        if self.board.get(cell) != Some(Square::Empty) {
            return Err(SessionError::CellTaken(cell));
        }

        self.board.set(cell, Square::Occupied(self.human));
        self.settle();
        Ok(())
    }

    fn advance_engine<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Option<usize>, SessionError> {
        if self.result.is_some() || self.to_move() != self.engine {
            return Ok(None);
        }

        let cell = select_move_with(&self.board, self.engine, rng)?;
        self.board.set(cell, Square::Occupied(self.engine));
        self.settle();
        Ok(Some(cell))
    }

    /// Records the result once the position turns terminal.
    fn settle(&mut self) {
        if self.result.is_some() {
            return;
        }
        self.result = match self.status() {
            Outcome::InProgress => None,
            Outcome::Win(winner) if winner == self.human => Some(GameResult::Win),
            Outcome::Win(_) => Some(GameResult::Loss),
            Outcome::Draw => Some(GameResult::Draw),
        };
    }
}

/// Thread-safe store of active sessions, shared across handlers.
#[derive(Debug, Clone, Default)]
pub struct SessionManager {
    sessions: Arc<Mutex<HashMap<String, GameSession>>>,
}

impl SessionManager {
    /// Creates an empty session manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new game for a player.
    ///
    /// The player takes the requested mark; without a request a coin
    /// flip decides. If the engine ends up with X it makes its opening
    /// move before the session is returned, and that move is the
    /// second element of the returned pair.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the engine fails its opening move.
    pub fn create(
        &self,
        user_id: i32,
        mark: Option<Player>,
    ) -> Result<(GameSession, Option<usize>), SessionError> {
        self.create_with(user_id, mark, &mut rand::rng())
    }

    /// [`SessionManager::create`] with a caller-supplied rng, for
    /// reproducible games.
    #[instrument(skip(self, rng))]
    pub fn create_with<R: Rng + ?Sized>(
        &self,
        user_id: i32,
        mark: Option<Player>,
        rng: &mut R,
    ) -> Result<(GameSession, Option<usize>), SessionError> {
        let id = Alphanumeric.sample_string(rng, SESSION_ID_LEN);
        let human =
            mark.unwrap_or_else(|| if rng.random_bool(0.5) { Player::X } else { Player::O });

        let mut session = GameSession::new(id, user_id, human);
        let opening = session.advance_engine(rng)?;

        info!(
            session_id = %session.id,
            user_id = user_id,
            human = %session.human,
            "Session created"
        );

        let snapshot = session.clone();
        self.sessions.lock().unwrap().insert(session.id.clone(), session);
        Ok((snapshot, opening))
    }

    /// Fetches a snapshot of a session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotFound`] for an unknown id.
    pub fn get(&self, id: &str) -> Result<GameSession, SessionError> {
        self.sessions
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    /// Plays the human's move, then the engine's reply if the game is
    /// still open.
    ///
    /// Returns the updated session, the engine's reply cell if it
    /// moved, and the result when this move finished the game. The
    /// result is reported exactly once: on the call that ends the
    /// game.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] for unknown sessions and illegal
    /// moves.
    pub fn play(
        &self,
        id: &str,
        cell: usize,
    ) -> Result<(GameSession, Option<usize>, Option<GameResult>), SessionError> {
        self.play_with(id, cell, &mut rand::rng())
    }

    /// [`SessionManager::play`] with a caller-supplied rng.
    #[instrument(skip(self, rng))]
    pub fn play_with<R: Rng + ?Sized>(
        &self,
        id: &str,
        cell: usize,
        rng: &mut R,
    ) -> Result<(GameSession, Option<usize>, Option<GameResult>), SessionError> {
        let mut sessions = self.sessions.lock().unwrap();
        let session = sessions
            .get_mut(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;

        session.play_human(cell)?;
        debug!(session_id = %id, cell = cell, "Player moved");

        let engine_move = session.advance_engine(rng)?;
        if let Some(reply) = engine_move {
            debug!(session_id = %id, cell = reply, "Engine replied");
        }

        // The finished guard rejected any already-settled game, so a
        // result here is fresh and reported exactly once.
        let just_finished = session.result;
        if let Some(result) = just_finished {
            info!(session_id = %id, result = %result.to_db_string(), "Game finished");
        }

        Ok((session.clone(), engine_move, just_finished))
    }
}
