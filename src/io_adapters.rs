use crate::command::CommandRegistry;
use crate::env::{Environment, ShellIoError, Symbol, Symbols};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::collections::VecDeque;
use std::io::{self, Write};
use std::rc::Rc;

/// Interactive environment on top of the terminal, using rustyline for input.
///
/// Text written without a trailing newline (the prompt, the multi-line marker,
/// a question from `copy`) is held back and handed to the editor as the prompt of
/// the next [`read_line`](Environment::read_line), so the editor redraws it
/// together with the input.
pub struct ConsoleEnvironment {
    editor: DefaultEditor,
    pending_prompt: String,
    symbols: Symbols,
    commands: Rc<CommandRegistry>,
}

impl ConsoleEnvironment {
    /// Opens the line editor on the current terminal.
    pub fn new(commands: Rc<CommandRegistry>, symbols: Symbols) -> Result<Self, ShellIoError> {
        Ok(Self {
            editor: DefaultEditor::new().map_err(|err| ShellIoError::Editor(err.to_string()))?,
            pending_prompt: String::new(),
            symbols,
            commands,
        })
    }

    fn flush_pending(&mut self) -> Result<(), ShellIoError> {
        let mut stdout = io::stdout().lock();
        flush_held_back(&mut stdout, &mut self.pending_prompt)?;
        Ok(())
    }
}

/// Writes everything in `pending` and clears it.
fn flush_held_back(out: &mut dyn Write, pending: &mut String) -> io::Result<()> {
    if !pending.is_empty() {
        out.write_all(pending.as_bytes())?;
        out.flush()?;
        pending.clear();
    }
    Ok(())
}

/// Writes `text` up to and including its last newline, preceded by whatever was
/// held back before. Text after the last newline is appended to `pending`.
fn write_holding_back(out: &mut dyn Write, pending: &mut String, text: &str) -> io::Result<()> {
    match text.rfind('\n') {
        Some(idx) => {
            flush_held_back(out, pending)?;
            out.write_all(text[..=idx].as_bytes())?;
            out.flush()?;
            pending.push_str(&text[idx + 1..]);
        }
        None => pending.push_str(text),
    }
    Ok(())
}

impl Environment for ConsoleEnvironment {
    fn read_line(&mut self) -> Result<String, ShellIoError> {
        let prompt = std::mem::take(&mut self.pending_prompt);
        match self.editor.readline(&prompt) {
            Ok(line) => Ok(line),
            // Ctrl-C drops the entry being typed, like a blank line would.
            Err(ReadlineError::Interrupted) => Ok(String::new()),
            Err(ReadlineError::Eof) => Err(ShellIoError::InputClosed),
            Err(err) => Err(ShellIoError::Editor(err.to_string())),
        }
    }

    fn write(&mut self, text: &str) -> Result<(), ShellIoError> {
        let mut stdout = io::stdout().lock();
        write_holding_back(&mut stdout, &mut self.pending_prompt, text)?;
        Ok(())
    }

    fn write_line(&mut self, text: &str) -> Result<(), ShellIoError> {
        self.write(text)?;
        self.write("\n")
    }

    fn commands(&self) -> Rc<CommandRegistry> {
        Rc::clone(&self.commands)
    }

    fn symbol(&self, role: Symbol) -> char {
        self.symbols.get(role)
    }

    fn set_symbol(&mut self, role: Symbol, value: char) {
        self.symbols.set(role, value)
    }
}

impl Drop for ConsoleEnvironment {
    fn drop(&mut self) {
        let _ = self.flush_pending();
    }
}

/// Memory-backed environment: input comes from a fixed list of lines and all
/// output is captured.
///
/// Reading past the last line fails with [`ShellIoError::InputClosed`], which
/// ends an interpreter session the same way closing the terminal does.
pub struct MemEnvironment {
    input: VecDeque<String>,
    output: String,
    fail_writes: bool,
    symbols: Symbols,
    commands: Rc<CommandRegistry>,
}

impl MemEnvironment {
    /// Environment that reads `lines` in order.
    pub fn new<I, S>(commands: Rc<CommandRegistry>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            output: String::new(),
            fail_writes: false,
            symbols: Symbols::default(),
            commands,
        }
    }

    /// Uses `symbols` instead of the defaults.
    pub fn with_symbols(mut self, symbols: Symbols) -> Self {
        self.symbols = symbols;
        self
    }

    /// Makes every subsequent write fail, to simulate a broken output stream.
    pub fn fail_writes(&mut self) {
        self.fail_writes = true;
    }

    /// Everything written so far.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Returns the captured output and clears it.
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }

    /// Lines not consumed yet.
    pub fn remaining_input(&self) -> usize {
        self.input.len()
    }

    /// Current symbol values.
    pub fn symbols(&self) -> Symbols {
        self.symbols
    }

    fn check_writable(&self) -> Result<(), ShellIoError> {
        if self.fail_writes {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "output closed").into());
        }
        Ok(())
    }
}

impl Environment for MemEnvironment {
    fn read_line(&mut self) -> Result<String, ShellIoError> {
        self.input.pop_front().ok_or(ShellIoError::InputClosed)
    }

    fn write(&mut self, text: &str) -> Result<(), ShellIoError> {
        self.check_writable()?;
        self.output.push_str(text);
        Ok(())
    }

    fn write_line(&mut self, text: &str) -> Result<(), ShellIoError> {
        self.check_writable()?;
        self.output.push_str(text);
        self.output.push('\n');
        Ok(())
    }

    fn commands(&self) -> Rc<CommandRegistry> {
        Rc::clone(&self.commands)
    }

    fn symbol(&self, role: Symbol) -> char {
        self.symbols.get(role)
    }

    fn set_symbol(&mut self, role: Symbol, value: char) {
        self.symbols.set(role, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mem_environment_reads_then_closes() {
        let mut env = MemEnvironment::new(Rc::new(CommandRegistry::new()), ["one", "two"]);
        assert_eq!(env.read_line().unwrap(), "one");
        assert_eq!(env.read_line().unwrap(), "two");
        assert!(matches!(env.read_line(), Err(ShellIoError::InputClosed)));
    }

    #[test]
    fn test_mem_environment_captures_output() {
        let mut env = MemEnvironment::new(Rc::new(CommandRegistry::new()), Vec::<String>::new());
        env.write("> ").unwrap();
        env.write_line("hello").unwrap();
        assert_eq!(env.take_output(), "> hello\n");
        assert_eq!(env.output(), "");
    }

    #[test]
    fn test_mem_environment_write_failure() {
        let mut env = MemEnvironment::new(Rc::new(CommandRegistry::new()), ["x"]);
        env.fail_writes();
        assert!(matches!(env.write_line("lost"), Err(ShellIoError::Io(_))));
        assert_eq!(env.output(), "");
    }

    #[test]
    fn test_text_without_newline_is_held_back() {
        let mut out = Vec::new();
        let mut pending = String::new();
        write_holding_back(&mut out, &mut pending, "> ").unwrap();
        write_holding_back(&mut out, &mut pending, "| ").unwrap();

        assert!(out.is_empty());
        assert_eq!(pending, "> | ");
    }

    #[test]
    fn test_split_at_last_newline() {
        let mut out = Vec::new();
        let mut pending = String::from("> ");
        write_holding_back(&mut out, &mut pending, "one\ntwo\nf.txt exists? ").unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "> one\ntwo\n");
        assert_eq!(pending, "f.txt exists? ");
    }

    #[test]
    fn test_newline_after_partial_write_flushes_it() {
        let mut out = Vec::new();
        let mut pending = String::new();
        write_holding_back(&mut out, &mut pending, "Copying").unwrap();
        write_holding_back(&mut out, &mut pending, "").unwrap();
        assert!(out.is_empty());

        write_holding_back(&mut out, &mut pending, "\n").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Copying\n");
        assert_eq!(pending, "");
    }

    #[test]
    fn test_flush_held_back() {
        let mut out = Vec::new();
        let mut pending = String::from("bye ");
        flush_held_back(&mut out, &mut pending).unwrap();
        flush_held_back(&mut out, &mut pending).unwrap();

        assert_eq!(out, b"bye ");
        assert!(pending.is_empty());
    }

    #[test]
    fn test_symbol_accessors() {
        let mut env = MemEnvironment::new(Rc::new(CommandRegistry::new()), ["x"]);
        env.set_morelines_symbol('&');
        assert_eq!(env.morelines_symbol(), '&');
        assert_eq!(env.symbol(Symbol::MoreLines), '&');
        assert_eq!(env.prompt_symbol(), '>');
    }
}
