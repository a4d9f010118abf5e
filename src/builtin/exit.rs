use crate::command::{ShellCommand, ShellStatus};
use crate::env::{Environment, ShellIoError};

/// `exit`: ends the session.
pub struct ExitCommand;

impl ShellCommand for ExitCommand {
    fn name(&self) -> &'static str {
        "exit"
    }

    fn description(&self) -> &'static [&'static str] {
        &["Usage: exit", "", "Exits (quits) the shell."]
    }

    fn execute(
        &self,
        _env: &mut dyn Environment,
        _arguments: &str,
    ) -> Result<ShellStatus, ShellIoError> {
        Ok(ShellStatus::Terminate)
    }
}
