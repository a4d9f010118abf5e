use crate::command::CommandRegistry;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

/// Fatal failure of the environment's input or output.
///
/// Unlike validation errors, which commands report as text, a `ShellIoError`
/// ends the interactive session.
#[derive(Debug, thiserror::Error)]
pub enum ShellIoError {
    /// The input source has no more lines.
    #[error("input stream closed")]
    InputClosed,
    /// Reading from or writing to the underlying stream failed.
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),
    /// The line editor failed.
    #[error("line editor failure: {0}")]
    Editor(String),
}

/// Role of a configurable shell symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// Printed before each new command.
    Prompt,
    /// When a line ends with it, the command continues on the next line.
    MoreLines,
    /// Printed before each continuation line.
    MultiLine,
}

impl Symbol {
    /// All roles, in the order the `symbol` command documents them.
    pub const ALL: [Symbol; 3] = [Symbol::Prompt, Symbol::MoreLines, Symbol::MultiLine];

    /// The alias users type to refer to the symbol.
    pub fn alias(self) -> &'static str {
        match self {
            Symbol::Prompt => "PROMPT",
            Symbol::MoreLines => "MORELINES",
            Symbol::MultiLine => "MULTILINE",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.alias())
    }
}

/// An alias that doesn't name any [`Symbol`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown symbol alias: {0}")]
pub struct UnknownSymbol(pub String);

impl FromStr for Symbol {
    type Err = UnknownSymbol;

    /// Aliases are case-sensitive, e.g. `PROMPT`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Symbol::ALL
            .into_iter()
            .find(|sym| sym.alias() == s)
            .ok_or_else(|| UnknownSymbol(s.to_string()))
    }
}

/// Current values of the three shell symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbols {
    pub prompt: char,
    pub morelines: char,
    pub multiline: char,
}

impl Default for Symbols {
    fn default() -> Self {
        Self {
            prompt: '>',
            morelines: '\\',
            multiline: '|',
        }
    }
}

impl Symbols {
    /// Current symbol for `role`.
    pub fn get(&self, role: Symbol) -> char {
        match role {
            Symbol::Prompt => self.prompt,
            Symbol::MoreLines => self.morelines,
            Symbol::MultiLine => self.multiline,
        }
    }

    /// Replaces the symbol for `role`.
    pub fn set(&mut self, role: Symbol, value: char) {
        match role {
            Symbol::Prompt => self.prompt = value,
            Symbol::MoreLines => self.morelines = value,
            Symbol::MultiLine => self.multiline = value,
        }
    }
}

/// Everything the interpreter and commands may use to talk to the outside world.
///
/// Implementations own the I/O streams, the [`Symbols`] and a shared handle to the
/// command registry. Commands receive the environment by mutable reference for
/// the duration of a single call.
pub trait Environment {
    /// Reads one line of input without its line terminator.
    fn read_line(&mut self) -> Result<String, ShellIoError>;

    /// Writes `text` as-is.
    fn write(&mut self, text: &str) -> Result<(), ShellIoError>;

    /// Writes `text` followed by a line terminator.
    fn write_line(&mut self, text: &str) -> Result<(), ShellIoError>;

    /// Read-only view of the registered commands, sorted by name.
    fn commands(&self) -> Rc<CommandRegistry>;

    fn symbol(&self, role: Symbol) -> char;

    fn set_symbol(&mut self, role: Symbol, value: char);

    fn prompt_symbol(&self) -> char {
        self.symbol(Symbol::Prompt)
    }

    fn set_prompt_symbol(&mut self, value: char) {
        self.set_symbol(Symbol::Prompt, value)
    }

    fn morelines_symbol(&self) -> char {
        self.symbol(Symbol::MoreLines)
    }

    fn set_morelines_symbol(&mut self, value: char) {
        self.set_symbol(Symbol::MoreLines, value)
    }

    fn multiline_symbol(&self) -> char {
        self.symbol(Symbol::MultiLine)
    }

    fn set_multiline_symbol(&mut self, value: char) {
        self.set_symbol(Symbol::MultiLine, value)
    }
}
