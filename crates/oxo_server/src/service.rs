//! Player service, the seam between game flow and persistence.
//!
//! Registration is get-or-create by email: registering an address that
//! already exists returns the existing player, refreshing the display
//! name if it changed. Game results are recorded one row per finished
//! game, always from the player's perspective.

use tracing::{debug, info, instrument};

use crate::db::{
    DbError, GameRecord, GameRepository, GameResult, LeaderboardEntry, NewGameRecord, User,
};

/// Service for registering players and recording their game results.
#[derive(Debug, Clone)]
pub struct PlayerService {
    repository: GameRepository,
}

impl PlayerService {
    /// Creates a new player service backed by the given repository.
    pub fn new(repository: GameRepository) -> Self {
        Self { repository }
    }

    /// Returns a reference to the underlying repository.
    pub fn repository(&self) -> &GameRepository {
        &self.repository
    }

    /// Registers a player, or fetches them if the email is already
    /// known.
    ///
    /// The name is trimmed and the email is trimmed and lowercased
    /// before lookup, so `Al@Example.com` and `al@example.com` are the
    /// same player. Registering an existing email with a new name
    /// updates the stored name.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn register(&self, name: &str, email: &str) -> Result<User, DbError> {
        let name = name.trim();
        let email = email.trim().to_lowercase();
        debug!(name = %name, email = %email, "Registering player");

        match self.repository.get_user_by_email(&email)? {
            Some(user) if user.name() == name => {
                debug!(user_id = user.id(), "Player already registered");
                Ok(user)
            }
            Some(user) => {
                info!(user_id = user.id(), name = %name, "Refreshing player name");
                self.repository.update_user_name(*user.id(), name.to_string())
            }
            None => {
                info!(name = %name, email = %email, "Creating new player");
                self.repository.create_user(name.to_string(), email)
            }
        }
    }

    /// Records a finished game for a player.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn record_result(&self, user_id: i32, result: GameResult) -> Result<GameRecord, DbError> {
        debug!(user_id = user_id, result = %result.to_db_string(), "Recording result");
        let record = NewGameRecord::new(user_id, result.to_db_string().to_string());
        self.repository.record_game(record)
    }

    /// Looks up a player by id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    pub fn find_user(&self, id: i32) -> Result<Option<User>, DbError> {
        self.repository.get_user(id)
    }

    /// Lists all players with their recorded-game counts, newest
    /// first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    pub fn list_players(&self) -> Result<Vec<(User, i64)>, DbError> {
        self.repository.list_users_with_counts()
    }

    /// Returns a player's recorded games, most recent first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    pub fn history(&self, user_id: i32) -> Result<Vec<GameRecord>, DbError> {
        self.repository.games_for_user(user_id)
    }

    /// Returns every recorded game joined with its player, most
    /// recent first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    pub fn list_games(&self) -> Result<Vec<(GameRecord, User)>, DbError> {
        self.repository.list_games_with_users()
    }

    /// Builds the leaderboard, sorted by wins descending then win
    /// rate descending.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    pub fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, DbError> {
        self.repository.leaderboard()
    }
}
