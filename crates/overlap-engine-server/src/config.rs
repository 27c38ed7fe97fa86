//! Server configuration from flags, with environment fallbacks.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::Parser;

/// Default port of the scheduling endpoint, the one the web client calls.
pub const DEFAULT_PORT: u16 = 8000;

/// Requests are a handful of short strings per member.
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "overlap-server",
    version,
    about = "Serve POST /calculate-overlap for the time zone team scheduler"
)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "OVERLAP_HOST", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub host: IpAddr,

    /// Port to bind
    #[arg(long, env = "OVERLAP_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Largest accepted request body, in bytes
    #[arg(long, env = "OVERLAP_MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,
}

impl ServerConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}
