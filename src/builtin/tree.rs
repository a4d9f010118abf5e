use super::{PathKind, finish, report, single_path};
use crate::command::{ShellCommand, ShellStatus};
use crate::env::{Environment, ShellIoError};
use anyhow::Context;
use std::path::Path;
use walkdir::WalkDir;

/// `tree <dir>`: prints the directory tree, two spaces of indent per level.
pub struct TreeCommand;

const NAME: &str = "tree";

fn tree(env: &mut dyn Environment, dir: &Path) -> anyhow::Result<()> {
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("cannot walk {}", dir.display()))?;
        let name = entry.file_name().to_string_lossy();
        env.write_line(&format!("{}{}", "  ".repeat(entry.depth()), name))?;
    }
    Ok(())
}

impl ShellCommand for TreeCommand {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static [&'static str] {
        &[
            "Usage: tree <directory_path>",
            "",
            "Prints the directory tree rooted at the given directory.",
            "Each level is indented by two spaces.",
        ]
    }

    fn execute(
        &self,
        env: &mut dyn Environment,
        arguments: &str,
    ) -> Result<ShellStatus, ShellIoError> {
        let dir = match single_path(arguments, Some(PathKind::Directory)) {
            Ok(dir) => dir,
            Err(err) => return report(env, NAME, err),
        };
        let result = tree(env, &dir);
        finish(env, NAME, result)
    }
}
