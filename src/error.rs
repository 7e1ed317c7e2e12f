use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("agent already running")]
    AlreadyRunning,

    #[error("agent not running")]
    NotRunning,

    #[error("invalid request: {0}")]
    Validation(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    detail: String,
}

impl IntoResponse for AgentError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AgentError::Validation(_) => (StatusCode::BAD_REQUEST, "Bad Request"),
            AgentError::AlreadyRunning | AgentError::NotRunning => {
                (StatusCode::CONFLICT, "Conflict")
            }
            AgentError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Config Error"),
            AgentError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO Error"),
            AgentError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Error"),
        };

        let body = Json(ErrorResponse {
            error: error_message.to_string(),
            detail: self.to_string(),
        });

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AgentError>;
