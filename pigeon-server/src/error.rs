use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Failures a signaling or poll call can report to its caller.
///
/// Validation failures mean the registry was not touched; the caller fixes
/// the request and resubmits. Internal failures leave the registry in its
/// last consistent state.
#[derive(Error, Debug)]
pub enum SignalingError {
    /// Required body fields were missing (or empty) from a submit call.
    #[error("Missing required fields: {0}")]
    MissingFields(&'static str),

    /// Required query parameter was missing from a poll call.
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    /// Anything unexpected. Surfaced as a 500; never crashes the process.
    #[error("{0}")]
    Internal(String),
}

impl SignalingError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingFields(_) | Self::MissingParameter(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SignalingError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (self.status_code(), body).into_response()
    }
}
