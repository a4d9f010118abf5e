use super::{PathKind, finish, report, single_path};
use crate::command::{ShellCommand, ShellStatus};
use crate::env::{Environment, ShellIoError};
use anyhow::Context;
use chrono::{DateTime, Local};
use faccess::PathExt;
use std::fmt;
use std::fs::{self, DirEntry};
use std::io;
use std::path::Path;

/// `ls <dir>`: lists a directory, one entry per line.
pub struct LsCommand;

const NAME: &str = "ls";

/// One line of `ls` output.
///
/// The access flags are those of the running process, not the owner's mode bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LsRecord {
    pub is_dir: bool,
    pub readable: bool,
    pub writable: bool,
    pub executable: bool,
    pub size: u64,
    pub time: DateTime<Local>,
    pub name: String,
}

impl LsRecord {
    fn from_entry(entry: DirEntry) -> io::Result<Self> {
        let path = entry.path();
        let meta = fs::symlink_metadata(&path)?;
        let time = meta.created().or_else(|_| meta.modified())?;
        Ok(Self {
            is_dir: meta.is_dir(),
            readable: path.readable(),
            writable: path.writable(),
            executable: path.executable(),
            size: meta.len(),
            time: DateTime::<Local>::from(time),
            name: entry.file_name().to_string_lossy().into_owned(),
        })
    }
}

fn flag(set: bool, c: char) -> char {
    if set { c } else { '-' }
}

impl fmt::Display for LsRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{} {:>10} {} {}",
            flag(self.is_dir, 'd'),
            flag(self.readable, 'r'),
            flag(self.writable, 'w'),
            flag(self.executable, 'x'),
            self.size,
            self.time.format("%Y-%m-%d %H:%M:%S"),
            self.name
        )
    }
}

/// Lazily reads the records of `dir`.
pub fn list(dir: &Path) -> io::Result<impl Iterator<Item = io::Result<LsRecord>>> {
    Ok(fs::read_dir(dir)?.map(|entry| entry.and_then(LsRecord::from_entry)))
}

fn ls(env: &mut dyn Environment, dir: &Path) -> anyhow::Result<()> {
    let records = list(dir).with_context(|| format!("cannot list {}", dir.display()))?;
    for record in records {
        let record = record.with_context(|| format!("cannot read entry of {}", dir.display()))?;
        env.write_line(&record.to_string())?;
    }
    Ok(())
}

impl ShellCommand for LsCommand {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static [&'static str] {
        &[
            "Usage: ls <directory_path>",
            "",
            "Writes a directory listing (not recursive).",
            "Each line shows the flags (drwx), the size in bytes, the creation time",
            "and the name of one entry.",
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
        let result = ls(env, &dir);
        finish(env, NAME, result)
    }
}
