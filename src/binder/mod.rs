//! Click-to-request binding.
//!
//! A [`Page`] maps selectors to [`Handler`]s. Clicking a selector runs the
//! handler body synchronously up to the point where it issues a request;
//! the success/failure continuation runs as a spawned task that writes to
//! the [`Console`].

pub mod handle;
mod hello;
mod wait;

pub use handle::{ReadyState, RequestHandle};
pub use hello::HelloHandler;
pub use wait::WaitHandler;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::config::ClientConfig;
use crate::console::Console;
use crate::transport::Transport;

/// What a click did.
#[derive(Debug, Clone)]
pub enum Click {
    /// A request went out. The handle tracks it.
    Issued(RequestHandle),
    /// A request was already outstanding (or finished), nothing was sent.
    /// Carries the readiness that was logged.
    Suppressed(ReadyState),
    /// No handler is bound to the selector.
    Unbound,
}

/// Running count of click outcomes for the session summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickTally {
    pub issued: u64,
    pub suppressed: u64,
    pub unbound: u64,
}

impl ClickTally {
    pub fn record(&mut self, click: &Click) {
        match click {
            Click::Issued(_) => self.issued += 1,
            Click::Suppressed(_) => self.suppressed += 1,
            Click::Unbound => self.unbound += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.issued + self.suppressed + self.unbound
    }
}

/// Something that reacts to clicks on a selector.
pub trait Handler: Send + Sync {
    /// Selector this handler binds to, e.g. `"#wait"`.
    fn selector(&self) -> &str;

    /// One-line description for `/controls`.
    fn description(&self) -> &str;

    /// Handle a click. Must be called from within a tokio runtime, since the
    /// continuation is spawned.
    fn on_click(&self) -> Click;
}

/// The set of bound controls. Stands in for the document.
#[derive(Default)]
pub struct Page {
    handlers: HashMap<String, Arc<dyn Handler>>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a handler. Rebinding a selector replaces the previous handler.
    pub fn on(&mut self, handler: Arc<dyn Handler>) {
        let selector = handler.selector().to_string();
        if self.handlers.insert(selector.clone(), handler).is_some() {
            tracing::debug!(%selector, "handler replaced");
        }
    }

    /// Dispatch a click to whatever is bound at `selector`.
    pub fn click(&self, selector: &str) -> Click {
        match self.handlers.get(selector) {
            Some(handler) => handler.on_click(),
            None => {
                tracing::debug!(%selector, "click on unbound selector");
                Click::Unbound
            }
        }
    }

    pub fn is_bound(&self, selector: &str) -> bool {
        self.handlers.contains_key(selector)
    }

    /// `(selector, description)` for every bound control, sorted by selector.
    pub fn controls(&self) -> Vec<(String, String)> {
        let mut controls: Vec<_> = self
            .handlers
            .values()
            .map(|h| (h.selector().to_string(), h.description().to_string()))
            .collect();
        controls.sort();
        controls
    }
}

/// Bind `#hello`: one GET per click, no timeout, failures dropped.
pub fn bind_hello_handler(
    page: &mut Page,
    transport: Arc<dyn Transport>,
    console: Arc<dyn Console>,
) -> Arc<HelloHandler> {
    let handler = Arc::new(HelloHandler::new(transport, console));
    page.on(handler.clone());
    handler
}

/// Bind `#wait`: the first click issues a GET with `timeout`, every later
/// click only logs the stored request's readiness.
pub fn bind_wait_handler(
    page: &mut Page,
    transport: Arc<dyn Transport>,
    console: Arc<dyn Console>,
    timeout: Duration,
) -> Arc<WaitHandler> {
    let handler = Arc::new(WaitHandler::new(transport, console, timeout));
    page.on(handler.clone());
    handler
}

/// The page is ready: bind both controls.
///
/// Returns the wait handler so its stored request can be inspected.
pub fn on_ready(
    page: &mut Page,
    transport: Arc<dyn Transport>,
    console: Arc<dyn Console>,
    config: &ClientConfig,
) -> Arc<WaitHandler> {
    bind_hello_handler(page, Arc::clone(&transport), Arc::clone(&console));
    bind_wait_handler(page, transport, console, config.wait_timeout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::recording::RecordingConsole;
    use crate::consts::{HELLO_SELECTOR, WAIT_SELECTOR};
    use crate::transport::mock::MockTransport;

    fn ready_page() -> Page {
        let mut page = Page::new();
        on_ready(
            &mut page,
            Arc::new(MockTransport::default()),
            Arc::new(RecordingConsole::new()),
            &ClientConfig::default(),
        );
        page
    }

    #[test]
    fn empty_page_has_no_controls() {
        let page = Page::new();
        assert!(page.controls().is_empty());
        assert!(!page.is_bound(HELLO_SELECTOR));
    }

    #[test]
    fn on_ready_binds_both_controls() {
        let page = ready_page();
        assert!(page.is_bound(HELLO_SELECTOR));
        assert!(page.is_bound(WAIT_SELECTOR));
        let selectors: Vec<_> = page.controls().into_iter().map(|(s, _)| s).collect();
        assert_eq!(selectors, vec!["#hello", "#wait"]);
    }

    #[test]
    fn unbound_click_does_nothing() {
        let page = ready_page();
        assert!(matches!(page.click("#nope"), Click::Unbound));
    }

    #[test]
    fn tally_counts_each_outcome() {
        let (handle, _progress) = RequestHandle::open();
        let mut tally = ClickTally::default();
        tally.record(&Click::Issued(handle));
        tally.record(&Click::Suppressed(ReadyState::Opened));
        tally.record(&Click::Suppressed(ReadyState::Done));
        tally.record(&Click::Unbound);
        assert_eq!(
            tally,
            ClickTally {
                issued: 1,
                suppressed: 2,
                unbound: 1
            }
        );
        assert_eq!(tally.total(), 4);
    }

    #[test]
    fn rebinding_replaces() {
        struct Stub;
        impl Handler for Stub {
            fn selector(&self) -> &str {
                "#hello"
            }
            fn description(&self) -> &str {
                "stub"
            }
            fn on_click(&self) -> Click {
                Click::Suppressed(ReadyState::Unsent)
            }
        }

        let mut page = ready_page();
        page.on(Arc::new(Stub));
        assert!(matches!(
            page.click(HELLO_SELECTOR),
            Click::Suppressed(ReadyState::Unsent)
        ));
        assert_eq!(page.controls().len(), 2);
    }
}
