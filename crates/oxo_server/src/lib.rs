//! Tic-tac-toe arcade service around the [`oxo_engine`] selector.
//!
//! The crate is organized in layers:
//!
//! - [`db`](crate::GameRepository): SQLite persistence for players and
//!   recorded games, via diesel with embedded migrations.
//! - [`PlayerService`]: registration (get-or-create by email) and
//!   result recording on top of the repository.
//! - [`SessionManager`]: in-memory games against the engine, one
//!   session per active game.
//! - [`create_app`]: the axum router exposing players, games, the
//!   leaderboard, sessions and a stateless engine endpoint.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod api;
mod cli;
mod db;
mod service;
mod session;

// Crate-level exports - HTTP API
pub use api::{ApiError, AppState, create_app};

// Crate-level exports - CLI
pub use cli::Cli;

// Crate-level exports - Persistence
pub use db::{
    DbError, GameRecord, GameRepository, GameResult, LeaderboardEntry, NewGameRecord, NewUser,
    User,
};

// Crate-level exports - Player service
pub use service::PlayerService;

// Crate-level exports - Session management
pub use session::{GameSession, SessionError, SessionManager};
