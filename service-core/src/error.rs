use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced to HTTP callers.
///
/// Every variant renders as `{"error": "<message>"}`; the status code is the
/// only thing that distinguishes one failure class from another on the wire.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Stored data breaks an invariant the caller cannot fix themselves.
    #[error("Data integrity violation: {0}")]
    DataIntegrity(String),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),

    /// Non-success answer from an upstream collaborator.
    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::DataIntegrity(_) => StatusCode::BAD_REQUEST,
            AppError::ConfigError(_) | AppError::Upstream(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match self {
            AppError::MethodNotAllowed => "Method not allowed".to_string(),
            AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::DataIntegrity(msg)
            | AppError::Upstream(msg) => msg,
            AppError::ConfigError(err) => {
                tracing::error!(error = %err, "Rejecting request: server is misconfigured");
                "Server configuration error".to_string()
            }
            AppError::InternalError(err) => {
                tracing::error!(error = ?err, "Unhandled internal error");
                "Internal server error".to_string()
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
