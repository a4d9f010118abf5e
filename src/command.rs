use crate::env::{Environment, ShellIoError};
use std::collections::BTreeMap;
use std::fmt;

/// What the interpreter should do after a command returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellStatus {
    /// Keep reading commands.
    Continue,
    /// Stop the interpreter loop.
    Terminate,
}

/// A command the shell can dispatch to.
///
/// `execute` receives the live environment and the argument text that followed the
/// command name, already trimmed. Invalid arguments are reported through the
/// environment's output together with [`ShellStatus::Continue`]; the only error a
/// command returns is a [`ShellIoError`] from the environment itself.
pub trait ShellCommand {
    /// Name the user types, matched case-sensitively.
    fn name(&self) -> &'static str;

    /// Help text, one entry per line.
    fn description(&self) -> &'static [&'static str];

    /// Runs the command.
    fn execute(
        &self,
        env: &mut dyn Environment,
        arguments: &str,
    ) -> Result<ShellStatus, ShellIoError>;
}

/// Commands available to the shell, keyed and iterated by name.
///
/// The registry is filled before the shell starts and then shared read-only
/// through [`Environment::commands`].
#[derive(Default)]
pub struct CommandRegistry {
    commands: BTreeMap<&'static str, Box<dyn ShellCommand>>,
}

impl CommandRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a command, replacing any previous command with the same name.
    pub fn register(&mut self, command: Box<dyn ShellCommand>) {
        if self.commands.insert(command.name(), command).is_some() {
            log::warn!("a command was registered twice, keeping the latest one");
        }
    }

    /// Command registered under exactly `name`.
    pub fn get(&self, name: &str) -> Option<&dyn ShellCommand> {
        self.commands.get(name).map(|cmd| cmd.as_ref())
    }

    /// Whether a command named `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Commands in lexicographic order of their names.
    pub fn iter(&self) -> impl Iterator<Item = &dyn ShellCommand> {
        self.commands.values().map(|cmd| cmd.as_ref())
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.keys().copied()
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether no command is registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}
