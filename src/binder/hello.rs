use std::sync::Arc;

use super::{Click, Handler, ReadyState, RequestHandle};
use crate::console::Console;
use crate::consts::{DONE_MARKER, HELLO_PATH, HELLO_SELECTOR};
use crate::transport::Transport;

/// `#hello`: fire a GET on every click and log the payload if it succeeds.
pub struct HelloHandler {
    transport: Arc<dyn Transport>,
    console: Arc<dyn Console>,
}

impl HelloHandler {
    pub fn new(transport: Arc<dyn Transport>, console: Arc<dyn Console>) -> Self {
        Self { transport, console }
    }
}

impl Handler for HelloHandler {
    fn selector(&self) -> &str {
        HELLO_SELECTOR
    }

    fn description(&self) -> &str {
        "say hello to the service"
    }

    fn on_click(&self) -> Click {
        let (handle, progress) = RequestHandle::open();
        let transport = Arc::clone(&self.transport);
        let console = Arc::clone(&self.console);

        tokio::spawn(async move {
            match transport.get(HELLO_PATH, None, &progress).await {
                Ok(reply) => {
                    console.log_all(&[DONE_MARKER, reply.body.as_str()]);
                    progress.settle(ReadyState::Done);
                }
                Err(err) => {
                    // Nobody listens for hello failures.
                    tracing::debug!(error = %err, "hello request dropped");
                    progress.settle(err.final_state());
                }
            }
        });

        Click::Issued(handle)
    }
}
