pub mod http;
pub mod mock;

use async_trait::async_trait;
use std::time::Duration;

use crate::binder::handle::{Progress, ReadyState};

/// A successful (2xx) response.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

/// Why a request produced no usable reply.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransportError {
    #[error("timed out")]
    Timeout,
    #[error("server answered {0}")]
    Status(u16),
    #[error("network error: {0}")]
    Network(String),
}

impl TransportError {
    /// Readiness a request ends in after failing this way.
    ///
    /// A status error means the server answered, so the request is `Done`.
    /// Timeouts and network errors never got an answer and fall back to
    /// `Unsent`.
    pub fn final_state(&self) -> ReadyState {
        match self {
            TransportError::Status(_) => ReadyState::Done,
            TransportError::Timeout | TransportError::Network(_) => ReadyState::Unsent,
        }
    }
}

/// Issues HTTP GETs. The real one talks to a server, the mock follows a script.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `path`, giving up after `timeout` if one is set.
    ///
    /// Implementations report intermediate readiness on `progress` but never
    /// settle it; the caller does that once it has handled the result.
    async fn get(
        &self,
        path: &str,
        timeout: Option<Duration>,
        progress: &Progress,
    ) -> Result<Reply, TransportError>;
}
