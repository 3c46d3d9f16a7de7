use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo};
use crate::binder::WaitHandler;

pub struct StateCommand;

/// One-line summary of the wait control's stored request.
pub(super) fn describe(wait: Option<&WaitHandler>) -> String {
    let Some(wait) = wait else {
        return "#wait not bound".to_string();
    };
    match wait.in_flight() {
        None => "#wait idle (next click sends a request)".to_string(),
        Some(handle) if handle.is_settled() => format!(
            "#wait latched, settled with readyState {}",
            handle.ready_state()
        ),
        Some(handle) => format!("#wait in flight, readyState {}", handle.ready_state()),
    }
}

#[async_trait]
impl Command for StateCommand {
    fn name(&self) -> &str {
        "/state"
    }

    fn description(&self) -> &str {
        "show endpoint, click counts, and the #wait request"
    }

    async fn execute(&self, info: &SessionInfo<'_>) -> CommandResult {
        println!("  endpoint  {}", info.base_url);
        println!(
            "  clicks    {} issued, {} suppressed, {} unbound",
            info.tally.issued, info.tally.suppressed, info.tally.unbound
        );
        println!("  {}", describe(info.wait));
        CommandResult::Handled
    }
}
