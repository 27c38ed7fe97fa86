//! # overlap-engine-server
//!
//! HTTP front end for [`overlap_engine`]: accepts the team's availability as
//! JSON and answers with the shared window, if any.
//!
//! - [`config`] — bind address and limits, from flags or `OVERLAP_*` variables
//! - [`http`] — axum router, handlers and error mapping

pub mod config;
pub mod http;

pub use config::ServerConfig;
pub use http::create_router;
