//! HTTP error handling and response types.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use overlap_engine::ScheduleError;
use serde::Serialize;

/// API error response body.
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    /// Stable snake_case error kind for programmatic handling
    pub kind: String,
    /// Human-readable message, shown to users verbatim
    pub detail: String,
}

impl ApiError {
    pub fn new(kind: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            detail: detail.into(),
        }
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// The request parsed but failed validation
    Schedule(ScheduleError),
    /// The body never reached validation; carries the extractor's status
    Rejected { status: StatusCode, detail: String },
}

/// Wire kind for a body rejection. Bodies that are not a JSON array of
/// members all answer 400, whatever status the extractor picked.
fn rejection_kind(status: StatusCode) -> (StatusCode, &'static str) {
    match status {
        StatusCode::PAYLOAD_TOO_LARGE => (status, "payload_too_large"),
        StatusCode::UNSUPPORTED_MEDIA_TYPE => (status, "unsupported_media_type"),
        _ => (StatusCode::BAD_REQUEST, "malformed_request"),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::Schedule(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::new(e.kind().as_str(), e.to_string()),
            ),
            AppError::Rejected { status, detail } => {
                let (status, kind) = rejection_kind(status);
                (status, ApiError::new(kind, detail))
            }
        };

        (status, Json(error)).into_response()
    }
}

impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        AppError::Schedule(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}
