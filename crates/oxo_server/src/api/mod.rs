//! HTTP API over the engine, sessions and persistence.
//!
//! Routes:
//! - `GET  /health` health check
//! - `POST /api/users` register a player (get-or-create by email)
//! - `GET  /api/users` list players with game counts
//! - `POST /api/games` record a finished game
//! - `GET  /api/games` list recorded games, `?user_id=` to filter
//! - `GET  /api/leaderboard` standings
//! - `POST /api/sessions` start a game against the engine
//! - `GET  /api/sessions/{id}` fetch a session
//! - `POST /api/sessions/{id}/moves` play a move, engine replies
//! - `POST /api/engine/move` best move for an arbitrary board

use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;

use crate::service::PlayerService;
use crate::session::SessionManager;

mod engine;
mod error;
mod games;
mod leaderboard;
mod sessions;
mod users;

pub use error::ApiError;

/// Shared application state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub(crate) service: PlayerService,
    pub(crate) sessions: SessionManager,
}

impl AppState {
    /// Creates state around a player service, with an empty session
    /// store.
    pub fn new(service: PlayerService) -> Self {
        Self {
            service,
            sessions: SessionManager::new(),
        }
    }
}

/// Health check payload.
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Health check handler.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Builds the application router around the given state.
///
/// Separated from serving so tests can drive the router directly.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/users",
            get(users::list_users).post(users::register_user),
        )
        .route(
            "/api/games",
            get(games::list_games).post(games::record_game),
        )
        .route("/api/leaderboard", get(leaderboard::get_leaderboard))
        .route("/api/sessions", post(sessions::create_session))
        .route("/api/sessions/{id}", get(sessions::get_session))
        .route("/api/sessions/{id}/moves", post(sessions::play_move))
        .route("/api/engine/move", post(engine::suggest_move))
        .with_state(state)
}
