//! Recorded-game handlers.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::api::{ApiError, AppState};
use crate::db::{GameRecord, GameResult, User};

/// Body for `POST /api/games`.
#[derive(Debug, Deserialize)]
pub struct RecordGameRequest {
    user_id: i32,
    result: String,
}

/// Query string for `GET /api/games`.
#[derive(Debug, Deserialize)]
pub struct GamesQuery {
    user_id: Option<i32>,
}

/// One entry of `GET /api/games`.
#[derive(Debug, Serialize)]
pub struct GameView {
    id: i32,
    user_id: i32,
    player: String,
    result: String,
    created_at: NaiveDateTime,
}

impl GameView {
    fn new(record: &GameRecord, player: &User) -> Self {
        Self {
            id: *record.id(),
            user_id: *record.user_id(),
            player: player.name().clone(),
            result: record.result().clone(),
            created_at: *record.created_at(),
        }
    }
}

/// Record a finished game for a player.
///
/// Rejects results outside `WIN`/`LOSS`/`DRAW` and unknown players.
pub async fn record_game(
    State(state): State<AppState>,
    Json(req): Json<RecordGameRequest>,
) -> Result<(StatusCode, Json<GameRecord>), ApiError> {
    let result = GameResult::from_db_string(&req.result)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let user = state
        .service
        .find_user(req.user_id)?
        .ok_or_else(|| ApiError::NotFound(format!("User not found: {}", req.user_id)))?;

    let record = state.service.record_result(*user.id(), result)?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// List recorded games, newest first, optionally for one player.
pub async fn list_games(
    State(state): State<AppState>,
    Query(query): Query<GamesQuery>,
) -> Result<Json<Vec<GameView>>, ApiError> {
    let games = match query.user_id {
        Some(user_id) => {
            let user = state
                .service
                .find_user(user_id)?
                .ok_or_else(|| ApiError::NotFound(format!("User not found: {}", user_id)))?;
            state
                .service
                .history(user_id)?
                .iter()
                .map(|record| GameView::new(record, &user))
                .collect()
        }
        None => state
            .service
            .list_games()?
            .iter()
            .map(|(record, user)| GameView::new(record, user))
            .collect(),
    };
    Ok(Json(games))
}
