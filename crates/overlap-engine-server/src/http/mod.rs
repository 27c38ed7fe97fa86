//! HTTP API for the overlap engine.
//!
//! - `POST /calculate-overlap` — intersect the submitted member windows
//! - `GET /health` — liveness plus the zone database version in use

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;

pub use error::{ApiError, AppError};
pub use router::create_router;
