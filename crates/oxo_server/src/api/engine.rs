//! Stateless engine endpoint: best move for an arbitrary board.

use axum::Json;
use oxo_engine::{Board, Player, Square, select_move};
use serde::{Deserialize, Serialize};

use crate::api::ApiError;

/// Body for `POST /api/engine/move`: the position as nine cells in
/// row-major order and the mark to move for.
#[derive(Debug, Deserialize)]
pub struct EngineMoveRequest {
    board: Vec<Option<Player>>,
    mark: Player,
}

/// The selector's chosen cell.
#[derive(Debug, Serialize)]
pub struct EngineMoveResponse {
    cell: usize,
}

/// Pick the best move for the given board and mark.
///
/// The board comes from the client, so it is validated rather than
/// trusted: a wrong cell count is a 400, a board that is already
/// decided or full is a 409.
pub async fn suggest_move(
    Json(req): Json<EngineMoveRequest>,
) -> Result<Json<EngineMoveResponse>, ApiError> {
    let squares: Vec<Square> = req.board.into_iter().map(Square::from).collect();
    let board = Board::try_from(squares)?;
    let cell = select_move(&board, req.mark)?;
    Ok(Json(EngineMoveResponse { cell }))
}
