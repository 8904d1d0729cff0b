use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Faults surfaced by the pull binding. The push binding never returns
/// these to a client; relay-side problems are logged and the frame dropped.
#[derive(Debug, Error)]
pub enum SignalingError {
    /// A required request field is absent or empty.
    #[error("missing or empty field: {0}")]
    MissingField(&'static str),

    #[error("serialization failure: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl IntoResponse for SignalingError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            SignalingError::MissingField(field) => {
                (StatusCode::BAD_REQUEST, format!("Missing {field}"))
            }
            SignalingError::Serialization(_) => {
                error!("internal signaling fault: {self}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
