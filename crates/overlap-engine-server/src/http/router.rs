//! Router configuration for the HTTP API.
//!
//! Sets up the routes and middleware (CORS, tracing, body limit) and returns
//! an axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use crate::config::ServerConfig;

/// Create the application router with all routes and middleware.
pub fn create_router(config: &ServerConfig) -> Router {
    // The browser form is served from a different origin than the API
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/calculate-overlap", post(handlers::calculate_overlap))
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
