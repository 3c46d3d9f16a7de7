use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo};

/// Clears the `#wait` latch. Clicking never does this on its own.
pub struct ResetCommand;

#[async_trait]
impl Command for ResetCommand {
    fn name(&self) -> &str {
        "/reset"
    }

    fn description(&self) -> &str {
        "forget the stored #wait request so it can be clicked again"
    }

    async fn execute(&self, info: &SessionInfo<'_>) -> CommandResult {
        match info.wait.and_then(|w| w.reset()) {
            Some(handle) if !handle.is_settled() => {
                println!("  cleared (previous request still running, not aborted)");
            }
            Some(_) => println!("  cleared"),
            None => println!("  nothing to clear"),
        }
        CommandResult::Handled
    }
}
