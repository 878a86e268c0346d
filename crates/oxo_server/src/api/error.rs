//! API error type and its HTTP mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use oxo_engine::EngineError;

use crate::db::DbError;
use crate::session::SessionError;

/// Error returned by API handlers, carrying the status it maps to.
///
/// Serializes as `{ "error": "<message>" }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request was malformed (400).
    BadRequest(String),
    /// The addressed resource does not exist (404).
    NotFound(String),
    /// The request conflicts with current state (409).
    Conflict(String),
    /// Something went wrong on our side (500).
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::BadRequest(message)
            | Self::NotFound(message)
            | Self::Conflict(message)
            | Self::Internal(message) => message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(message = %self.message(), "Internal error");
        }
        (status, Json(json!({ "error": self.message() }))).into_response()
    }
}

impl From<DbError> for ApiError {
    fn from(error: DbError) -> Self {
        Self::Internal(error.to_string())
    }
}

impl From<SessionError> for ApiError {
    fn from(error: SessionError) -> Self {
        match error {
            SessionError::NotFound(_) => Self::NotFound(error.to_string()),
            SessionError::Finished | SessionError::NotYourTurn | SessionError::CellTaken(_) => {
                Self::Conflict(error.to_string())
            }
            SessionError::OutOfRange(_) => Self::BadRequest(error.to_string()),
            SessionError::Engine(inner) => inner.into(),
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::InvalidBoard { .. } => Self::BadRequest(error.to_string()),
            EngineError::BoardFull | EngineError::AlreadyDecided(_) => {
                Self::Conflict(error.to_string())
            }
        }
    }
}
