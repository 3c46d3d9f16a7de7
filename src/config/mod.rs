//! Runtime configuration for both halves of the crate.
//!
//! Plain structs with sensible defaults; `main` fills them from CLI flags.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::consts::{DEFAULT_BASE_URL, DEFAULT_STATIC_DIR, DEFAULT_WAIT_DELAY, DEFAULT_WAIT_TIMEOUT};

/// How the click handlers reach the service.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    /// Timeout applied to the wait request only.
    pub wait_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            wait_timeout: DEFAULT_WAIT_TIMEOUT,
        }
    }
}

/// How the manage service listens and behaves.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    /// Directory served for every path outside `/service`.
    pub static_dir: PathBuf,
    /// How long the wait endpoint holds a request before answering.
    pub wait_delay: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            wait_delay: DEFAULT_WAIT_DELAY,
        }
    }
}
