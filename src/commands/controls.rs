use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo};

pub struct ControlsCommand;

#[async_trait]
impl Command for ControlsCommand {
    fn name(&self) -> &str {
        "/controls"
    }

    fn description(&self) -> &str {
        "list clickable controls"
    }

    async fn execute(&self, info: &SessionInfo<'_>) -> CommandResult {
        if info.controls.is_empty() {
            println!("  (no controls bound)");
        } else {
            for (selector, description) in info.controls {
                println!("  {selector:<8}  {description}");
            }
        }
        CommandResult::Handled
    }
}
