use super::{PathKind, UsageError, check_path, finish, report};
use crate::command::{ShellCommand, ShellStatus};
use crate::env::{Environment, ShellIoError};
use crate::lexer::{split_whitespace, unquote};
use anyhow::Context;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

/// `copy <src> <dest>`: copies a file, asking before overwriting.
pub struct CopyCommand;

const NAME: &str = "copy";

/// Resolves the arguments to the source file and the target file path.
fn parse(arguments: &str) -> Result<(PathBuf, PathBuf), UsageError> {
    let tokens = split_whitespace(arguments);
    let [src, dest] = tokens.as_slice() else {
        return Err(UsageError::ExactlyTwo);
    };
    let src = PathBuf::from(unquote(src)?.as_ref());
    let dest = PathBuf::from(unquote(dest)?.as_ref());
    check_path(&src, PathKind::File)?;

    let target = match (dest.is_dir(), src.file_name()) {
        (true, Some(file_name)) => dest.join(file_name),
        _ => dest,
    };
    if target.exists() && same_file(&src, &target) {
        return Err(UsageError::Other("source and destination are the same file."));
    }
    Ok((src, target))
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn copy(src: &Path, target: &Path) -> anyhow::Result<u64> {
    let mut input = File::open(src).with_context(|| format!("cannot open {}", src.display()))?;
    let mut output =
        File::create(target).with_context(|| format!("cannot create {}", target.display()))?;
    io::copy(&mut input, &mut output)
        .with_context(|| format!("cannot copy {} to {}", src.display(), target.display()))
}

fn confirm_overwrite(env: &mut dyn Environment, target: &Path) -> Result<bool, ShellIoError> {
    env.write(&format!(
        "{} file already exists. Overwrite it? [y/n] ",
        target.display()
    ))?;
    let answer = env.read_line()?;
    Ok(answer.starts_with(['y', 'Y']))
}

impl ShellCommand for CopyCommand {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static [&'static str] {
        &[
            "Usage: copy <source_file_path> <destination_path>",
            "",
            "Copies the source file to the destination.",
            "If the destination is a directory, the file is copied into it under its own name.",
            "If the destination file exists, the user is asked whether to overwrite it.",
        ]
    }

    fn execute(
        &self,
        env: &mut dyn Environment,
        arguments: &str,
    ) -> Result<ShellStatus, ShellIoError> {
        let (src, target) = match parse(arguments) {
            Ok(paths) => paths,
            Err(err) => return report(env, NAME, err),
        };
        if target.exists() && !confirm_overwrite(env, &target)? {
            log::debug!("copy to {} declined", target.display());
            return Ok(ShellStatus::Continue);
        }

        env.write_line(&format!(
            "Copying file {} to {} ...",
            src.display(),
            target.display()
        ))?;
        let result = copy(&src, &target).map(|bytes| {
            log::debug!("copied {} bytes", bytes);
        });
        if result.is_ok() {
            env.write_line("Done.")?;
        }
        finish(env, NAME, result)
    }
}
