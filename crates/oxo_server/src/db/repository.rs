//! Database repository for players and recorded games.

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument, warn};

use crate::db::{DbError, GameRecord, LeaderboardEntry, NewGameRecord, NewUser, User, schema};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Database repository for user and game operations.
#[derive(Debug, Clone)]
pub struct GameRepository {
    db_path: String,
}

impl GameRepository {
    /// Creates a new repository connected to the database at the given path.
    ///
    /// Use `":memory:"` for an in-memory database (useful for tests).
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the path is invalid.
    pub fn new(db_path: String) -> Result<Self, DbError> {
        info!(path = %db_path, "Creating GameRepository");
        Ok(Self { db_path })
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| DbError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))
    }

    /// Applies any pending embedded migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a migration fails to apply.
    #[instrument(skip(self))]
    pub fn run_migrations(&self) -> Result<(), DbError> {
        let mut conn = self.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(format!("Migration error: {}", e)))?;
        info!(count = applied.len(), "Migrations applied");
        Ok(())
    }

    /// Creates a new user.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the email is already registered or a
    /// database error occurs.
    #[instrument(skip(self))]
    pub fn create_user(&self, name: String, email: String) -> Result<User, DbError> {
        debug!(name = %name, email = %email, "Creating user");
        let mut conn = self.connection()?;

        let new_user = NewUser::new(name, email);

        let user = diesel::insert_into(schema::users::table)
            .values(&new_user)
            .returning(User::as_returning())
            .get_result(&mut conn)?;

        info!(user_id = user.id(), name = %user.name(), "User created");
        Ok(user)
    }

    /// Gets a user by email. Returns `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_user_by_email(&self, email: &str) -> Result<Option<User>, DbError> {
        debug!(email = %email, "Looking up user by email");
        let mut conn = self.connection()?;

        let user = schema::users::table
            .filter(schema::users::email.eq(email))
            .first::<User>(&mut conn)
            .optional()?;

        if let Some(ref u) = user {
            debug!(user_id = u.id(), "User found");
        } else {
            debug!("User not found");
        }

        Ok(user)
    }

    /// Gets a user by id. Returns `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_user(&self, id: i32) -> Result<Option<User>, DbError> {
        debug!(user_id = id, "Looking up user by id");
        let mut conn = self.connection()?;

        let user = schema::users::table
            .find(id)
            .first::<User>(&mut conn)
            .optional()?;

        Ok(user)
    }

    /// Updates a user's display name, bumping `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the user does not exist or a database
    /// error occurs.
    #[instrument(skip(self))]
    pub fn update_user_name(&self, id: i32, name: String) -> Result<User, DbError> {
        debug!(user_id = id, name = %name, "Updating user name");
        let mut conn = self.connection()?;

        let user = diesel::update(schema::users::table.find(id))
            .set((
                schema::users::name.eq(name),
                schema::users::updated_at.eq(chrono::Utc::now().naive_utc()),
            ))
            .returning(User::as_returning())
            .get_result(&mut conn)?;

        info!(user_id = user.id(), name = %user.name(), "User name updated");
        Ok(user)
    }

    /// Lists all users with their recorded-game counts, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn list_users_with_counts(&self) -> Result<Vec<(User, i64)>, DbError> {
        debug!("Listing users with game counts");
        let mut conn = self.connection()?;

        let users = schema::users::table
            .order(schema::users::created_at.desc())
            .load::<User>(&mut conn)?;

        let games = GameRecord::belonging_to(&users)
            .load::<GameRecord>(&mut conn)?
            .grouped_by(&users);

        let combined = users
            .into_iter()
            .zip(games)
            .map(|(user, records)| (user, records.len() as i64))
            .collect::<Vec<_>>();

        info!(count = combined.len(), "Users loaded");
        Ok(combined)
    }

    /// Records a finished game.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, record), fields(user_id = record.user_id(), result = %record.result()))]
    pub fn record_game(&self, record: NewGameRecord) -> Result<GameRecord, DbError> {
        debug!("Recording game result");
        let mut conn = self.connection()?;

        let game = diesel::insert_into(schema::games::table)
            .values(&record)
            .returning(GameRecord::as_returning())
            .get_result(&mut conn)?;

        info!(
            game_id = game.id(),
            user_id = game.user_id(),
            result = %game.result(),
            "Game result recorded"
        );
        Ok(game)
    }

    /// Gets all recorded games for a user, most recent first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn games_for_user(&self, user_id: i32) -> Result<Vec<GameRecord>, DbError> {
        debug!(user_id = user_id, "Loading games for user");
        let mut conn = self.connection()?;

        let games = schema::games::table
            .filter(schema::games::user_id.eq(user_id))
            .order(schema::games::created_at.desc())
            .load::<GameRecord>(&mut conn)?;

        info!(user_id = user_id, count = games.len(), "Games loaded");
        Ok(games)
    }

    /// Gets every recorded game joined with its player, most recent
    /// first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn list_games_with_users(&self) -> Result<Vec<(GameRecord, User)>, DbError> {
        debug!("Listing all games");
        let mut conn = self.connection()?;

        let games = schema::games::table
            .inner_join(schema::users::table)
            .order(schema::games::created_at.desc())
            .select((GameRecord::as_select(), User::as_select()))
            .load::<(GameRecord, User)>(&mut conn)?;

        info!(count = games.len(), "Games loaded");
        Ok(games)
    }

    /// Builds the leaderboard: every user's tallies, sorted by wins
    /// descending, then win rate descending.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, DbError> {
        debug!("Computing leaderboard");
        let mut conn = self.connection()?;

        let users = schema::users::table.load::<User>(&mut conn)?;
        let grouped = GameRecord::belonging_to(&users)
            .load::<GameRecord>(&mut conn)?
            .grouped_by(&users);

        let mut entries = users
            .into_iter()
            .zip(grouped)
            .map(|(user, records)| {
                let mut wins = 0;
                let mut losses = 0;
                let mut draws = 0;
                for record in &records {
                    match record.result().as_str() {
                        "WIN" => wins += 1,
                        "LOSS" => losses += 1,
                        "DRAW" => draws += 1,
                        other => {
                            warn!(result = %other, game_id = record.id(), "Unknown result value")
                        }
                    }
                }
                LeaderboardEntry::new(*user.id(), user.name().clone(), wins, losses, draws)
            })
            .collect::<Vec<_>>();

        entries.sort_by(|a, b| {
            b.wins()
                .cmp(a.wins())
                .then_with(|| b.win_rate().total_cmp(a.win_rate()))
        });

        info!(count = entries.len(), "Leaderboard computed");
        Ok(entries)
    }
}
