use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::Notify;

use super::{Reply, Transport, TransportError};
use crate::binder::handle::{Progress, ReadyState};

/// One scripted answer.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// 200 with this body.
    Body(String),
    /// Answer with a non-success status.
    Status(u16),
    /// Fail without an answer.
    Network(String),
    /// 200 with `body`, but only after `gate` is notified.
    Gated { gate: Arc<Notify>, body: String },
    /// Never answer. Only a timeout ends this one.
    Hang,
}

/// A request the mock received.
#[derive(Debug, Clone, PartialEq)]
pub struct MockCall {
    pub path: String,
    pub timeout: Option<Duration>,
}

/// A scripted transport for tests. Hands out replies in order and records
/// every call.
#[derive(Default)]
pub struct MockTransport {
    script: Mutex<VecDeque<MockReply>>,
    calls: Mutex<Vec<MockCall>>,
}

impl MockTransport {
    pub fn new(script: Vec<MockReply>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Append another reply to the script.
    pub fn push(&self, reply: MockReply) {
        self.script.lock().unwrap().push_back(reply);
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls made to `path`.
    pub fn calls_to(&self, path: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.path == path)
            .count()
    }

    async fn answer(reply: MockReply, progress: &Progress) -> Result<Reply, TransportError> {
        match reply {
            MockReply::Body(body) => {
                progress.advance(ReadyState::HeadersReceived);
                progress.advance(ReadyState::Loading);
                Ok(Reply { status: 200, body })
            }
            MockReply::Status(code) => {
                progress.advance(ReadyState::HeadersReceived);
                Err(TransportError::Status(code))
            }
            MockReply::Network(message) => Err(TransportError::Network(message)),
            MockReply::Gated { gate, body } => {
                gate.notified().await;
                progress.advance(ReadyState::HeadersReceived);
                progress.advance(ReadyState::Loading);
                Ok(Reply { status: 200, body })
            }
            MockReply::Hang => std::future::pending().await,
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(
        &self,
        path: &str,
        timeout: Option<Duration>,
        progress: &Progress,
    ) -> Result<Reply, TransportError> {
        self.calls.lock().unwrap().push(MockCall {
            path: path.to_string(),
            timeout,
        });

        let reply = self.script.lock().unwrap().pop_front().ok_or_else(|| {
            TransportError::Network(format!("MockTransport: no reply scripted for {path}"))
        })?;

        match timeout {
            Some(limit) => tokio::time::timeout(limit, Self::answer(reply, progress))
                .await
                .unwrap_or(Err(TransportError::Timeout)),
            None => Self::answer(reply, progress).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binder::handle::RequestHandle;

    #[tokio::test]
    async fn replies_in_order_and_records_calls() {
        let mock = MockTransport::new(vec![
            MockReply::Body("one".to_string()),
            MockReply::Status(503),
        ]);
        let (_h, progress) = RequestHandle::open();

        let first = mock.get("/a", None, &progress).await;
        let second = mock.get("/b", Some(Duration::from_secs(1)), &progress).await;

        assert_eq!(first.unwrap().body, "one");
        assert_eq!(second, Err(TransportError::Status(503)));
        assert_eq!(
            mock.calls(),
            vec![
                MockCall {
                    path: "/a".to_string(),
                    timeout: None
                },
                MockCall {
                    path: "/b".to_string(),
                    timeout: Some(Duration::from_secs(1))
                },
            ]
        );
    }

    #[tokio::test]
    async fn empty_script_is_a_network_error() {
        let mock = MockTransport::default();
        let (_h, progress) = RequestHandle::open();
        let result = mock.get("/x", None, &progress).await;
        assert!(matches!(result, Err(TransportError::Network(ref m)) if m.contains("/x")));
        assert_eq!(mock.calls_to("/x"), 1);
    }

    #[tokio::test]
    async fn hang_times_out() {
        let mock = MockTransport::new(vec![MockReply::Hang]);
        let (_h, progress) = RequestHandle::open();
        let result = mock
            .get("/slow", Some(Duration::from_millis(20)), &progress)
            .await;
        assert_eq!(result, Err(TransportError::Timeout));
    }

    #[tokio::test]
    async fn gate_releases_reply() {
        let gate = Arc::new(Notify::new());
        let mock = Arc::new(MockTransport::new(vec![MockReply::Gated {
            gate: Arc::clone(&gate),
            body: "late".to_string(),
        }]));
        let (handle, progress) = RequestHandle::open();

        let task = {
            let mock = Arc::clone(&mock);
            tokio::spawn(async move { mock.get("/gated", None, &progress).await })
        };
        tokio::task::yield_now().await;
        assert_eq!(handle.ready_state(), ReadyState::Opened);

        gate.notify_one();
        assert_eq!(task.await.unwrap().unwrap().body, "late");
        assert_eq!(handle.ready_state(), ReadyState::Loading);
    }
}
