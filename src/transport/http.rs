use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Url;
use std::time::Duration;

use super::{Reply, Transport, TransportError};
use crate::binder::handle::{Progress, ReadyState};

/// Talks to a real server over HTTP.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    /// `base_url` is the scheme and authority requests are resolved against,
    /// e.g. `http://127.0.0.1:8080`.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("invalid base URL: {base_url}"))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("invalid base URL: {base_url}");
        }
        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn resolve(&self, path: &str) -> Result<Url, TransportError> {
        self.base_url
            .join(path)
            .map_err(|e| TransportError::Network(format!("bad path {path}: {e}")))
    }
}

fn classify(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Network(err.to_string())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(
        &self,
        path: &str,
        timeout: Option<Duration>,
        progress: &Progress,
    ) -> Result<Reply, TransportError> {
        let url = self.resolve(path)?;
        tracing::debug!(%url, ?timeout, "GET");

        let mut req = self.client.get(url);
        if let Some(timeout) = timeout {
            req = req.timeout(timeout);
        }

        let resp = req.send().await.map_err(classify)?;
        progress.advance(ReadyState::HeadersReceived);

        let status = resp.status();
        if !status.is_success() {
            tracing::debug!(%status, path, "non-success status");
            return Err(TransportError::Status(status.as_u16()));
        }

        let mut body = Vec::new();
        let mut stream = resp.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(classify)?;
            progress.advance(ReadyState::Loading);
            body.extend_from_slice(&chunk);
        }

        Ok(Reply {
            status: status.as_u16(),
            body: String::from_utf8_lossy(&body).into_owned(),
        })
    }
}
