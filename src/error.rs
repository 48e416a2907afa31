use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, warn};

use crate::models::core::ErrorResponse;
use crate::utils::http_client::{error_chain, ForwardError};

/// Failures raised by the bridge itself. Upstream error statuses are not
/// represented here; they are relayed unchanged.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("calendarId is required (no default set).")]
    MissingCalendar,
    #[error("Request to GoHighLevel failed: {}", error_chain(.0))]
    Upstream(#[from] ForwardError),
    #[error("{field} must be a non-empty id other than '.' or '..'")]
    InvalidId { field: &'static str },
    /// Only reachable if a request model stops serializing to a JSON object.
    #[error("failed to encode upstream payload: {0}")]
    Payload(#[from] serde_json::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingCalendar | ApiError::InvalidId { .. } => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) | ApiError::Payload(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::MissingCalendar | ApiError::InvalidId { .. } => "Bad Request",
            ApiError::Upstream(_) | ApiError::Payload(_) => "Internal Server Error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("💥 {}", self);
        } else {
            warn!("⚠️ {}", self);
        }

        let message = self.to_string();
        (
            status,
            Json(ErrorResponse {
                error: self.kind().to_string(),
                detail: message.clone(),
                message,
            }),
        )
            .into_response()
    }
}
