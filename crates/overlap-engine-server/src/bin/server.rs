//! Overlap HTTP Server Binary
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin overlap-server -- --port 8000
//! ```
//!
//! # Environment Variables
//!
//! - `OVERLAP_HOST`: Bind address (default: 127.0.0.1)
//! - `OVERLAP_PORT`: Port (default: 8000)
//! - `OVERLAP_MAX_BODY_BYTES`: Request body limit (default: 65536)
//! - `RUST_LOG`: Log filter (default: info)

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use overlap_engine::TZDB_VERSION;
use overlap_server::{create_router, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config = ServerConfig::parse();
    let app = create_router(&config);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("overlap-server listening on http://{addr}");
    info!("  tzdb: {TZDB_VERSION}");
    info!("  max_body_bytes: {}", config.max_body_bytes);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("overlap-server stopped");
    Ok(())
}

/// Resolve on ctrl-c, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to listen for ctrl-c: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(e) => {
                warn!("failed to register SIGTERM handler: {e}");
                ctrl_c.await;
            }
        }
    }
    #[cfg(not(unix))]
    ctrl_c.await;

    info!("shutdown signal received, draining connections");
}
