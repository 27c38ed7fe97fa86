//! Response bodies that are not engine types.

use serde::Serialize;

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// IANA time zone database release compiled into the server.
    pub tzdb_version: String,
}
