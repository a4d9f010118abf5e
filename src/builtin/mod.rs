//! Commands shipped with the shell.
//!
//! Every command follows the same conventions: arguments are split with
//! [`split_whitespace`](crate::lexer::split_whitespace), paths go through
//! [`unquote`](crate::lexer::unquote), and any problem with the input is reported
//! as a single `<name>: <message>` line while the shell keeps running.

mod cat;
mod charsets;
mod copy;
mod exit;
mod help;
mod hexdump;
mod ls;
mod mkdir;
mod symbol;
mod tree;

pub use cat::CatCommand;
pub use charsets::{Charset, CharsetError, CharsetsCommand};
pub use copy::CopyCommand;
pub use exit::ExitCommand;
pub use help::HelpCommand;
pub use hexdump::HexDumpCommand;
pub use ls::{LsCommand, LsRecord};
pub use mkdir::MkdirCommand;
pub use symbol::SymbolCommand;
pub use tree::TreeCommand;

use crate::command::{CommandRegistry, ShellStatus};
use crate::env::{Environment, ShellIoError};
use crate::lexer::LexingError;
use std::fmt;
use std::path::{Path, PathBuf};

/// Registry with every builtin command.
pub fn default_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    registry.register(Box::new(ExitCommand));
    registry.register(Box::new(SymbolCommand));
    registry.register(Box::new(CharsetsCommand));
    registry.register(Box::new(CatCommand));
    registry.register(Box::new(LsCommand));
    registry.register(Box::new(TreeCommand));
    registry.register(Box::new(HexDumpCommand));
    registry.register(Box::new(CopyCommand));
    registry.register(Box::new(MkdirCommand));
    registry.register(Box::new(HelpCommand));
    registry
}

/// Kind of filesystem object a command expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    File,
    Directory,
}

impl fmt::Display for PathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PathKind::File => "file",
            PathKind::Directory => "directory",
        })
    }
}

/// A path argument that doesn't point at what the command needs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("{kind} path {} does not exist.", .absolute.display())]
    Missing { kind: PathKind, absolute: PathBuf },
    #[error("path {} is not a {kind}.", .path.display())]
    WrongKind { kind: PathKind, path: PathBuf },
}

/// Checks that `path` exists and is a `kind`.
pub fn check_path(path: &Path, kind: PathKind) -> Result<(), PathError> {
    if !path.exists() {
        let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        return Err(PathError::Missing { kind, absolute });
    }
    let matches = match kind {
        PathKind::File => path.is_file(),
        PathKind::Directory => path.is_dir(),
    };
    if !matches {
        return Err(PathError::WrongKind {
            kind,
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Invalid command input. Displayed after the `<name>: ` prefix.
#[derive(Debug, thiserror::Error)]
pub(crate) enum UsageError {
    #[error("there must be exactly one argument.")]
    ExactlyOne,
    #[error("there must be exactly two arguments.")]
    ExactlyTwo,
    #[error("there has to be at least one argument.")]
    Missing,
    #[error("too many arguments.")]
    TooMany,
    #[error("there must not be any additional arguments.")]
    Unexpected,
    #[error("invalid input: {0}")]
    Lexing(#[from] LexingError),
    #[error("invalid path: {0}")]
    Path(#[from] PathError),
    #[error(transparent)]
    Charset(#[from] CharsetError),
    #[error("{0}")]
    Other(&'static str),
}

/// Writes `<name>: <message>` and lets the shell continue.
pub(crate) fn report(
    env: &mut dyn Environment,
    name: &str,
    message: impl fmt::Display,
) -> Result<ShellStatus, ShellIoError> {
    env.write_line(&format!("{}: {}", name, message))?;
    Ok(ShellStatus::Continue)
}

/// Turns the outcome of a command's filesystem work into a shell status.
///
/// Environment faults are passed through to the interpreter; any other failure
/// is reported to the user.
pub(crate) fn finish(
    env: &mut dyn Environment,
    name: &str,
    result: anyhow::Result<()>,
) -> Result<ShellStatus, ShellIoError> {
    match result {
        Ok(()) => Ok(ShellStatus::Continue),
        Err(err) => match err.downcast::<ShellIoError>() {
            Ok(fault) => Err(fault),
            Err(err) => {
                log::debug!("{} failed: {:?}", name, err);
                report(env, name, format_args!("IO error occurred: {:#}", err))
            }
        },
    }
}

/// Parses the single path argument used by most commands.
pub(crate) fn single_path(arguments: &str, kind: Option<PathKind>) -> Result<PathBuf, UsageError> {
    let tokens = crate::lexer::split_whitespace(arguments);
    let [token] = tokens.as_slice() else {
        return Err(UsageError::ExactlyOne);
    };
    let path = PathBuf::from(crate::lexer::unquote(token)?.as_ref());
    if let Some(kind) = kind {
        check_path(&path, kind)?;
    }
    Ok(path)
}
