//! In-flight request handles.
//!
//! A [`RequestHandle`] is the read side of a `watch` channel. The matching
//! [`Progress`] is handed to the transport and the continuation, which
//! advance it through [`ReadyState`] and finally settle it.

use std::fmt;

use tokio::sync::watch;

/// XHR-style readiness of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ReadyState {
    Unsent = 0,
    Opened = 1,
    HeadersReceived = 2,
    Loading = 3,
    Done = 4,
}

impl ReadyState {
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for ReadyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Clone, Copy)]
struct Status {
    ready: ReadyState,
    settled: bool,
}

/// Opaque reference to an outstanding (or finished) request.
#[derive(Debug, Clone)]
pub struct RequestHandle {
    rx: watch::Receiver<Status>,
}

/// Write side of a [`RequestHandle`].
#[derive(Debug)]
pub struct Progress {
    tx: watch::Sender<Status>,
}

impl RequestHandle {
    /// Create a handle in the `Opened` state along with its progress writer.
    pub fn open() -> (Self, Progress) {
        let (tx, rx) = watch::channel(Status {
            ready: ReadyState::Opened,
            settled: false,
        });
        (Self { rx }, Progress { tx })
    }

    pub fn ready_state(&self) -> ReadyState {
        self.rx.borrow().ready
    }

    pub fn is_settled(&self) -> bool {
        self.rx.borrow().settled
    }

    /// Wait until the request has settled and return its final state.
    ///
    /// If the progress writer is dropped without settling (the continuation
    /// panicked or was aborted), returns whatever state was last reported.
    pub async fn settled(&self) -> ReadyState {
        let mut rx = self.rx.clone();
        match rx.wait_for(|s| s.settled).await {
            Ok(status) => status.ready,
            Err(_) => self.rx.borrow().ready,
        }
    }
}

impl Progress {
    /// Move to an intermediate state. Ignored once settled.
    pub fn advance(&self, ready: ReadyState) {
        self.tx.send_if_modified(|s| {
            if s.settled || s.ready == ready {
                return false;
            }
            s.ready = ready;
            true
        });
    }

    /// Record the final state. Only the first call has any effect.
    pub fn settle(&self, ready: ReadyState) {
        self.tx.send_if_modified(|s| {
            if s.settled {
                return false;
            }
            s.ready = ready;
            s.settled = true;
            true
        });
    }
}
