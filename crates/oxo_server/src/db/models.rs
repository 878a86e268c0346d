//! Database models and domain types.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::db::{DbError, schema};

/// Registered player database model.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters, Serialize)]
#[diesel(table_name = schema::users)]
pub struct User {
    id: i32,
    name: String,
    email: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

/// Insertable user model for registering new players.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::users)]
pub struct NewUser {
    name: String,
    email: String,
}

/// Recorded game database model.
#[derive(
    Debug, Clone, Queryable, Identifiable, Associations, Selectable, Getters, Serialize,
)]
#[diesel(table_name = schema::games)]
#[diesel(belongs_to(User))]
pub struct GameRecord {
    id: i32,
    user_id: i32,
    result: String,
    created_at: NaiveDateTime,
}

impl GameRecord {
    /// Parses the stored result string into a [`GameResult`].
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the stored string is not a valid result.
    pub fn parse_result(&self) -> Result<GameResult, DbError> {
        GameResult::from_db_string(self.result())
    }
}

/// Insertable game model for recording a finished game.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::games)]
pub struct NewGameRecord {
    user_id: i32,
    result: String,
}

/// Result of a finished game, always from the human player's
/// perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GameResult {
    /// The player beat the engine.
    Win,
    /// The engine beat the player.
    Loss,
    /// The game ended level.
    Draw,
}

impl GameResult {
    /// Converts the result to the string stored in the database.
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Win => "WIN",
            Self::Loss => "LOSS",
            Self::Draw => "DRAW",
        }
    }

    /// Parses a result from the string stored in the database.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the string is not a valid result value.
    pub fn from_db_string(s: &str) -> Result<Self, DbError> {
        match s {
            "WIN" => Ok(Self::Win),
            "LOSS" => Ok(Self::Loss),
            "DRAW" => Ok(Self::Draw),
            _ => Err(DbError::new(format!("Invalid result: '{}'", s))),
        }
    }
}

/// One row of the leaderboard: a player and their aggregated record.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    user_id: i32,
    name: String,
    wins: i32,
    losses: i32,
    draws: i32,
    total_games: i32,
    win_rate: f64,
}

impl LeaderboardEntry {
    /// Creates an entry from per-player tallies, computing the win rate
    /// as a percentage (0.0-100.0); players with no games rate 0.0.
    pub fn new(user_id: i32, name: String, wins: i32, losses: i32, draws: i32) -> Self {
        let total_games = wins + losses + draws;
        let win_rate = if total_games == 0 {
            0.0
        } else {
            (wins as f64 / total_games as f64) * 100.0
        };
        Self {
            user_id,
            name,
            wins,
            losses,
            draws,
            total_games,
            win_rate,
        }
    }
}
