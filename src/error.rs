//! Application error types and HTTP response mapping

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Global application error enum
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Engine '{0}' not found")]
    EngineNotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Failure raised inside a sanitization library. The demo contract
    /// returns the raw failure text as an HTML body with status 500.
    #[error("Sanitization failed: {0}")]
    Sanitize(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Engine failures keep the original demo contract: the failure
            // message itself is the text/html body.
            AppError::Sanitize(msg) => {
                tracing::error!(error = %msg, "Sanitization engine failed");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
                    msg,
                )
                    .into_response();
            }
            AppError::Config(e) => {
                tracing::error!(error = %e, "Configuration error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::EngineNotFound(name) => (
                StatusCode::NOT_FOUND,
                format!("Engine '{}' not found", name),
            ),
            AppError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
