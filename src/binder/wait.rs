use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{Click, Handler, ReadyState, RequestHandle};
use crate::console::Console;
use crate::consts::{DONE_MARKER, FAIL_MARKER, WAIT_PATH, WAIT_SELECTOR};
use crate::transport::Transport;

/// `#wait`: one GET with a timeout, guarded by the stored request handle.
///
/// The handle is kept after the request settles, so once the first click has
/// gone out every later click only logs its readiness. Nothing on the click
/// path clears it; [`WaitHandler::reset`] is the only way back.
pub struct WaitHandler {
    transport: Arc<dyn Transport>,
    console: Arc<dyn Console>,
    timeout: Duration,
    in_flight: Mutex<Option<RequestHandle>>,
}

impl WaitHandler {
    pub fn new(
        transport: Arc<dyn Transport>,
        console: Arc<dyn Console>,
        timeout: Duration,
    ) -> Self {
        Self {
            transport,
            console,
            timeout,
            in_flight: Mutex::new(None),
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The stored request, if a click has issued one.
    pub fn in_flight(&self) -> Option<RequestHandle> {
        self.in_flight.lock().unwrap().clone()
    }

    /// Forget the stored request so the next click issues a new one.
    /// Does not abort a request that is still outstanding.
    pub fn reset(&self) -> Option<RequestHandle> {
        self.in_flight.lock().unwrap().take()
    }
}

impl Handler for WaitHandler {
    fn selector(&self) -> &str {
        WAIT_SELECTOR
    }

    fn description(&self) -> &str {
        "start a slow request (once)"
    }

    fn on_click(&self) -> Click {
        let mut slot = self.in_flight.lock().unwrap();

        if let Some(existing) = slot.as_ref() {
            let ready = existing.ready_state();
            self.console.log(&ready.to_string());
            return Click::Suppressed(ready);
        }

        let (handle, progress) = RequestHandle::open();
        *slot = Some(handle.clone());
        drop(slot);

        let transport = Arc::clone(&self.transport);
        let console = Arc::clone(&self.console);
        let timeout = self.timeout;

        tokio::spawn(async move {
            match transport.get(WAIT_PATH, Some(timeout), &progress).await {
                Ok(reply) => {
                    console.log_all(&[DONE_MARKER, reply.body.as_str()]);
                    progress.settle(ReadyState::Done);
                }
                Err(err) => {
                    tracing::debug!(error = %err, "wait request failed");
                    console.log(FAIL_MARKER);
                    progress.settle(err.final_state());
                }
            }
        });

        Click::Issued(handle)
    }
}
