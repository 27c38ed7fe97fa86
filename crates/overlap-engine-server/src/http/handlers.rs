//! HTTP handlers for the REST API.

use axum::{extract::rejection::JsonRejection, Json};
use overlap_engine::{find_overlap, MemberEntry, OverlapResult, TZDB_VERSION};
use tracing::{info, warn};

use super::dto::HealthResponse;
use super::error::AppError;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        tzdb_version: TZDB_VERSION.to_string(),
    })
}

/// POST /calculate-overlap
///
/// Body: `[{"timezone", "start_local", "end_local"}, ...]`. A request with no
/// common window still succeeds, with `is_overlap: false`.
pub async fn calculate_overlap(
    payload: Result<Json<Vec<MemberEntry>>, JsonRejection>,
) -> HandlerResult<OverlapResult> {
    let Json(members) = payload.map_err(|rejection| {
        warn!(%rejection, "rejected request body");
        AppError::from(rejection)
    })?;

    let result = find_overlap(&members).inspect_err(|err| {
        info!(kind = %err.kind(), %err, "invalid scheduling request");
    })?;

    info!(
        members = members.len(),
        is_overlap = result.is_overlap(),
        "calculated overlap"
    );
    Ok(Json(result))
}
