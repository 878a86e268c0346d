//! Leaderboard handler.

use axum::Json;
use axum::extract::State;

use crate::api::{ApiError, AppState};
use crate::db::LeaderboardEntry;

/// Standings sorted by wins, win rate breaking ties.
pub async fn get_leaderboard(
    State(state): State<AppState>,
) -> Result<Json<Vec<LeaderboardEntry>>, ApiError> {
    Ok(Json(state.service.leaderboard()?))
}
