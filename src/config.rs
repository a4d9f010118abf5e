use crate::env::{Symbol, Symbols};

/// Greeting printed when the shell starts, unless disabled.
pub const DEFAULT_GREETING: &str = "Welcome to MyShell v 1.0";

/// Startup configuration of a shell session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// Initial symbol values; the `symbol` command can change them later.
    pub symbols: Symbols,
    /// `None` disables the greeting.
    pub greeting: Option<String>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            symbols: Symbols::default(),
            greeting: Some(DEFAULT_GREETING.to_string()),
        }
    }
}

/// Invalid startup configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("symbol {0} must not be whitespace")]
    WhitespaceSymbol(Symbol),
    #[error("symbols PROMPT and MORELINES must differ, both are '{0}'")]
    PromptClashesWithMoreLines(char),
}

impl ShellConfig {
    /// Checks that the symbols can be told apart from ordinary input.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for role in Symbol::ALL {
            if self.symbols.get(role).is_whitespace() {
                return Err(ConfigError::WhitespaceSymbol(role));
            }
        }
        if self.symbols.prompt == self.symbols.morelines {
            return Err(ConfigError::PromptClashesWithMoreLines(self.symbols.prompt));
        }
        Ok(())
    }
}
