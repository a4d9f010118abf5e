use super::{UsageError, report};
use crate::command::{ShellCommand, ShellStatus};
use crate::env::{Environment, ShellIoError, Symbol};

/// `symbol <ALIAS> [char]`: shows or changes one of the shell symbols.
pub struct SymbolCommand;

const NAME: &str = "symbol";

impl ShellCommand for SymbolCommand {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static [&'static str] {
        &[
            "Usage: symbol <symbol_alias> <new_symbol>",
            "",
            "Prints current symbol with specified alias, or changes it if argument",
            "<new_symbol> is specified.",
            "",
            "All possible symbol aliases are:",
            "PROMPT",
            "MORELINES",
            "MULTILINE.",
        ]
    }

    fn execute(
        &self,
        env: &mut dyn Environment,
        arguments: &str,
    ) -> Result<ShellStatus, ShellIoError> {
        let args: Vec<&str> = arguments.split_whitespace().collect();
        let (alias, new_symbol) = match args.as_slice() {
            [] => return report(env, NAME, UsageError::Missing),
            [alias] => (*alias, None),
            [alias, new_symbol] => (*alias, Some(*new_symbol)),
            _ => return report(env, NAME, UsageError::TooMany),
        };
        let role: Symbol = match alias.parse() {
            Ok(role) => role,
            Err(err) => return report(env, NAME, err),
        };

        let current = env.symbol(role);
        let Some(new_symbol) = new_symbol else {
            env.write_line(&format!("Symbol for {} is '{}'", role, current))?;
            return Ok(ShellStatus::Continue);
        };

        let mut chars = new_symbol.chars();
        let (Some(value), None) = (chars.next(), chars.next()) else {
            return report(
                env,
                NAME,
                UsageError::Other("second argument should be a single character symbol."),
            );
        };
        env.set_symbol(role, value);
        log::debug!("symbol {} changed from {:?} to {:?}", role, current, value);
        env.write_line(&format!(
            "Symbol for {} changed from '{}' to '{}'",
            role, current, value
        ))?;
        Ok(ShellStatus::Continue)
    }
}
