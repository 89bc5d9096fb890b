use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application error type.
///
/// The detail string is for logs only; HTTP responses carry a fixed message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("token acquisition failed: {0}")]
    TokenAcquisitionFailed(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("upstream failure: {0}")]
    UpstreamFailure(String),
}

impl AppError {
    /// Maps a token failure to an upstream failure, leaving other kinds alone.
    pub fn into_upstream(self) -> Self {
        match self {
            AppError::TokenAcquisitionFailed(msg) => AppError::UpstreamFailure(msg),
            other => other,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::InvalidRequest(msg) => {
                tracing::warn!("rejected request: {}", msg);
                (StatusCode::BAD_REQUEST, "Invalid request")
            }
            AppError::TokenAcquisitionFailed(msg) => {
                tracing::error!("token acquisition failed: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to get access token")
            }
            AppError::UpstreamFailure(msg) => {
                tracing::error!("upstream failure: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch data")
            }
            AppError::Configuration(msg) => {
                tracing::error!("configuration error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch data")
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
