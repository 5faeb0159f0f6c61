//! RPC error types and their HTTP mapping.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use feedback_board::BoardError;
use feedback_types::TypeError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("store error: {0}")]
    Store(String),

    #[error("server error: {0}")]
    Server(String),
}

impl RpcError {
    pub fn status(&self) -> StatusCode {
        match self {
            RpcError::NotFound(_) => StatusCode::NOT_FOUND,
            RpcError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            RpcError::Store(_) | RpcError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<BoardError> for RpcError {
    fn from(e: BoardError) -> Self {
        match e {
            BoardError::NotFound(what) => RpcError::NotFound(what),
            BoardError::Validation(msg) => RpcError::InvalidRequest(msg),
            BoardError::Vote(e) => RpcError::Store(e.to_string()),
            BoardError::Store(e) => RpcError::Store(e.to_string()),
        }
    }
}

impl From<TypeError> for RpcError {
    fn from(e: TypeError) -> Self {
        RpcError::InvalidRequest(e.to_string())
    }
}

impl From<JsonRejection> for RpcError {
    fn from(e: JsonRejection) -> Self {
        RpcError::InvalidRequest(e.body_text())
    }
}

impl From<QueryRejection> for RpcError {
    fn from(e: QueryRejection) -> Self {
        RpcError::InvalidRequest(e.body_text())
    }
}

impl From<PathRejection> for RpcError {
    fn from(e: PathRejection) -> Self {
        RpcError::InvalidRequest(e.body_text())
    }
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
