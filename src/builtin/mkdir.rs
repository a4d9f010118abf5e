use super::{finish, report, single_path};
use crate::command::{ShellCommand, ShellStatus};
use crate::env::{Environment, ShellIoError};
use anyhow::Context;
use std::fs;

/// `mkdir <dir>`: creates a directory together with missing parents.
pub struct MkdirCommand;

const NAME: &str = "mkdir";

impl ShellCommand for MkdirCommand {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static [&'static str] {
        &[
            "Usage: mkdir <directory_path>",
            "",
            "Creates the appropriate directory structure if it doesn't exist.",
        ]
    }

    fn execute(
        &self,
        env: &mut dyn Environment,
        arguments: &str,
    ) -> Result<ShellStatus, ShellIoError> {
        let dir = match single_path(arguments, None) {
            Ok(dir) => dir,
            Err(err) => return report(env, NAME, err),
        };
        if dir.exists() {
            return report(env, NAME, format_args!("path {} already exists.", dir.display()));
        }
        let result = fs::create_dir_all(&dir)
            .with_context(|| format!("cannot create {}", dir.display()));
        finish(env, NAME, result)
    }
}
