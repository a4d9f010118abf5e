use super::{UsageError, report};
use crate::command::{ShellCommand, ShellStatus};
use crate::env::{Environment, ShellIoError};

/// `help [command]`: lists all commands or prints one command's description.
pub struct HelpCommand;

const NAME: &str = "help";

impl ShellCommand for HelpCommand {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static [&'static str] {
        &[
            "Usage: help <command>",
            "",
            "Prints the description for specified command.",
            "Without arguments, lists all supported commands.",
        ]
    }

    fn execute(
        &self,
        env: &mut dyn Environment,
        arguments: &str,
    ) -> Result<ShellStatus, ShellIoError> {
        let commands = env.commands();
        let args: Vec<&str> = arguments.split_whitespace().collect();
        match args.as_slice() {
            [] => {
                env.write_line("All supported commands:")?;
                for name in commands.names() {
                    env.write_line(&format!("\t{}", name))?;
                }
            }
            [name] => match commands.get(name) {
                Some(command) => {
                    for line in command.description() {
                        env.write_line(line)?;
                    }
                }
                None => return report(env, NAME, "command not found."),
            },
            _ => return report(env, NAME, UsageError::TooMany),
        }
        Ok(ShellStatus::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::test_support::run;

    #[test]
    fn test_lists_all_commands_sorted() {
        let (status, out) = run(&HelpCommand, "");
        assert_eq!(status, ShellStatus::Continue);
        assert_eq!(
            out,
            "All supported commands:\n\tcat\n\tcharsets\n\tcopy\n\texit\n\thelp\n\
             \thexdump\n\tls\n\tmkdir\n\tsymbol\n\ttree\n"
        );
    }

    #[test]
    fn test_prints_description() {
        let (_, out) = run(&HelpCommand, "exit");
        assert_eq!(out, "Usage: exit\n\nExits (quits) the shell.\n");
    }

    #[test]
    fn test_unknown_and_too_many() {
        assert_eq!(run(&HelpCommand, "nope").1, "help: command not found.\n");
        assert_eq!(run(&HelpCommand, "ls cat").1, "help: too many arguments.\n");
    }
}
