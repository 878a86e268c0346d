//! Interactive game session handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use oxo_engine::{Board, Player};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::api::{ApiError, AppState};
use crate::db::GameResult;
use crate::session::GameSession;

/// Body for `POST /api/sessions`. Without a requested mark a coin
/// flip decides who plays X.
#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    user_id: i32,
    #[serde(default)]
    mark: Option<Player>,
}

/// Body for `POST /api/sessions/{id}/moves`.
#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    position: usize,
}

/// Snapshot of a session as exposed over the API.
#[derive(Debug, Serialize)]
pub struct SessionView {
    id: String,
    user_id: i32,
    board: Board,
    human: Player,
    engine: Player,
    to_move: Option<Player>,
    result: Option<GameResult>,
}

impl SessionView {
    fn new(session: &GameSession) -> Self {
        Self {
            id: session.id().clone(),
            user_id: *session.user_id(),
            board: session.board().clone(),
            human: *session.human(),
            engine: *session.engine(),
            to_move: session.result().is_none().then(|| session.to_move()),
            result: *session.result(),
        }
    }
}

/// Response for session creation and moves: the session plus what the
/// engine just did.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    session: SessionView,
    engine_move: Option<usize>,
    result: Option<GameResult>,
}

/// Start a new game session for a registered player.
pub async fn create_session(
    State(state): State<AppState>,
    Json(req): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    state
        .service
        .find_user(req.user_id)?
        .ok_or_else(|| ApiError::NotFound(format!("User not found: {}", req.user_id)))?;

    let (session, engine_move) = state.sessions.create(req.user_id, req.mark)?;
    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            session: SessionView::new(&session),
            engine_move,
            result: None,
        }),
    ))
}

/// Fetch a session by id.
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>, ApiError> {
    let session = state.sessions.get(&id)?;
    Ok(Json(SessionView::new(&session)))
}

/// Play the player's move; the engine replies if the game stays open.
///
/// When the move ends the game the result lands in the player's
/// record. A failed write is logged and does not fail the move.
pub async fn play_move(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let (session, engine_move, just_finished) = state.sessions.play(&id, req.position)?;

    if let Some(result) = just_finished {
        if let Err(e) = state.service.record_result(*session.user_id(), result) {
            warn!(
                error = %e,
                user_id = session.user_id(),
                session_id = %id,
                "Failed to record game result"
            );
        }
    }

    Ok(Json(SessionResponse {
        session: SessionView::new(&session),
        engine_move,
        result: just_finished,
    }))
}
