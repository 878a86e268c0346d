//! Database layer: SQLite persistence for players and game results.
//!
//! The schema has two tables. `users` holds registered players keyed
//! by a unique email; `games` holds one row per finished game with the
//! result from the player's perspective (`WIN`, `LOSS` or `DRAW`).

mod error;
mod models;
mod repository;
mod schema;

pub use error::DbError;
pub use models::{GameRecord, GameResult, LeaderboardEntry, NewGameRecord, NewUser, User};
pub use repository::GameRepository;
