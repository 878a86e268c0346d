//! Player registration and listing handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::api::{ApiError, AppState};
use crate::db::User;

/// Body for `POST /api/users`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    name: String,
    email: String,
}

/// One entry of `GET /api/users`: the player plus how many games they
/// have on record.
#[derive(Debug, Serialize)]
pub struct PlayerSummary {
    #[serde(flatten)]
    user: User,
    games: i64,
}

/// Register a player, or fetch them if the email is already known.
pub async fn register_user(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = state.service.register(&req.name, &req.email)?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// List all players with their game counts, newest first.
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<PlayerSummary>>, ApiError> {
    let players = state
        .service
        .list_players()?
        .into_iter()
        .map(|(user, games)| PlayerSummary { user, games })
        .collect();
    Ok(Json(players))
}
