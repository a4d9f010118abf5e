use crate::command::ShellStatus;
use crate::config::DEFAULT_GREETING;
use crate::env::{Environment, ShellIoError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Running,
    Stopped,
}

/// The read-eval loop of the shell.
///
/// The interpreter owns an [`Environment`] and repeatedly reads a (possibly
/// multi-line) command from it, looks the command up in the environment's
/// registry and runs it. The loop ends when a command returns
/// [`ShellStatus::Terminate`] or the environment fails with a [`ShellIoError`].
///
/// Example
/// ```
/// use myshell::io_adapters::MemEnvironment;
/// use myshell::{Interpreter, default_registry};
/// use std::rc::Rc;
///
/// let env = MemEnvironment::new(Rc::new(default_registry()), ["symbol PROMPT", "exit"]);
/// let mut sh = Interpreter::new(env).with_greeting(None);
/// sh.repl();
/// assert_eq!(sh.env().output(), "> Symbol for PROMPT is '>'\n> ");
/// ```
pub struct Interpreter<E: Environment> {
    env: E,
    greeting: Option<String>,
    state: State,
}

impl<E: Environment> Interpreter<E> {
    /// Creates an interpreter with the default greeting.
    pub fn new(env: E) -> Self {
        Self {
            env,
            greeting: Some(DEFAULT_GREETING.to_string()),
            state: State::Running,
        }
    }

    /// Replaces the greeting; `None` disables it.
    pub fn with_greeting(mut self, greeting: Option<String>) -> Self {
        self.greeting = greeting;
        self
    }

    /// The environment the shell runs in.
    pub fn env(&self) -> &E {
        &self.env
    }

    /// Mutable access to the environment, e.g. to adjust symbols between runs.
    pub fn env_mut(&mut self) -> &mut E {
        &mut self.env
    }

    /// Consumes the interpreter and returns its environment.
    pub fn into_env(self) -> E {
        self.env
    }

    /// `false` once the loop has stopped.
    pub fn is_running(&self) -> bool {
        self.state == State::Running
    }

    /// Runs the read-eval loop until a command terminates it or I/O fails.
    pub fn repl(&mut self) {
        self.state = State::Running;
        if let Some(greeting) = &self.greeting {
            if let Err(err) = self.env.write_line(greeting) {
                self.stop_on_fault(&err);
                return;
            }
        }

        while self.state == State::Running {
            match self.step() {
                Ok(ShellStatus::Continue) => {}
                Ok(ShellStatus::Terminate) => {
                    log::info!("shell terminated by command");
                    self.state = State::Stopped;
                }
                Err(err) => self.stop_on_fault(&err),
            }
        }
    }

    fn stop_on_fault(&mut self, err: &ShellIoError) {
        match err {
            ShellIoError::InputClosed => log::info!("input closed, stopping shell"),
            _ => log::warn!("stopping shell after I/O fault: {}", err),
        }
        self.state = State::Stopped;
    }

    /// One prompt: read a command and run it.
    fn step(&mut self) -> Result<ShellStatus, ShellIoError> {
        let prompt = self.env.prompt_symbol();
        self.env.write(&format!("{} ", prompt))?;
        let input = self.read_input()?;
        self.execute_line(&input)
    }

    /// Reads one logical command, joining lines that end with the MORELINES symbol.
    ///
    /// A blank line ends the command immediately, even in the middle of a
    /// continuation, and whatever was collected so far is returned.
    pub fn read_input(&mut self) -> Result<String, ShellIoError> {
        let morelines = self.env.morelines_symbol();
        let multiline = self.env.multiline_symbol();
        let mut whole = String::new();

        loop {
            let line = self.env.read_line()?;
            if line.trim().is_empty() {
                break;
            }
            match line.strip_suffix(morelines) {
                Some(head) => {
                    whole.push_str(head);
                    self.env.write(&format!("{} ", multiline))?;
                }
                None => {
                    whole.push_str(&line);
                    break;
                }
            }
        }
        Ok(whole)
    }

    /// Splits `input` into a command name and its arguments and runs it.
    ///
    /// Blank input does nothing.
    pub fn execute_line(&mut self, input: &str) -> Result<ShellStatus, ShellIoError> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(ShellStatus::Continue);
        }
        let (name, arguments) = match input.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (input, ""),
        };
        self.run(name, arguments)
    }

    /// Runs a single command by name.
    ///
    /// An unknown name is reported to the user and is not an error.
    pub fn run(&mut self, name: &str, arguments: &str) -> Result<ShellStatus, ShellIoError> {
        let commands = self.env.commands();
        match commands.get(name) {
            Some(command) => {
                log::debug!("dispatching `{}` with arguments {:?}", name, arguments);
                command.execute(&mut self.env, arguments)
            }
            None => {
                log::debug!("unknown command `{}`", name);
                self.env.write_line(&format!("{}: command not found.", name))?;
                Ok(ShellStatus::Continue)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::default_registry;
    use crate::command::{CommandRegistry, ShellCommand};
    use crate::io_adapters::MemEnvironment;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records the arguments it was called with.
    struct Probe {
        calls: Rc<RefCell<Vec<String>>>,
    }

    impl ShellCommand for Probe {
        fn name(&self) -> &'static str {
            "probe"
        }

        fn description(&self) -> &'static [&'static str] {
            &["Usage: probe <anything>"]
        }

        fn execute(
            &self,
            _env: &mut dyn Environment,
            arguments: &str,
        ) -> Result<ShellStatus, ShellIoError> {
            self.calls.borrow_mut().push(arguments.to_string());
            Ok(ShellStatus::Continue)
        }
    }

    fn probe_shell<const N: usize>(
        lines: [&str; N],
    ) -> (Interpreter<MemEnvironment>, Rc<RefCell<Vec<String>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut registry = default_registry();
        registry.register(Box::new(Probe {
            calls: Rc::clone(&calls),
        }));
        let env = MemEnvironment::new(Rc::new(registry), lines);
        (Interpreter::new(env).with_greeting(None), calls)
    }

    #[test]
    fn test_greeting_and_exit() {
        let env = MemEnvironment::new(Rc::new(default_registry()), ["exit"]);
        let mut sh = Interpreter::new(env);
        sh.repl();

        assert!(!sh.is_running());
        assert_eq!(sh.env().output(), "Welcome to MyShell v 1.0\n> ");
        assert_eq!(sh.env().remaining_input(), 0);
    }

    #[test]
    fn test_exit_stops_before_reading_more() {
        let (mut sh, calls) = probe_shell(["exit", "probe never"]);
        sh.repl();

        assert!(calls.borrow().is_empty());
        assert_eq!(sh.env().remaining_input(), 1);
    }

    #[test]
    fn test_arguments_are_trimmed() {
        let (mut sh, calls) = probe_shell(["   probe    a  \"b c\"   ", "probe", "exit"]);
        sh.repl();

        assert_eq!(*calls.borrow(), ["a  \"b c\"", ""]);
    }

    #[test]
    fn test_multiline_continuation() {
        let (mut sh, calls) = probe_shell(["probe ls \\", "foo \\", "bar", "exit"]);
        sh.repl();

        assert_eq!(*calls.borrow(), ["ls foo bar"]);
        assert_eq!(sh.env().output(), "> | | > ");
    }

    #[test]
    fn test_blank_line_aborts_continuation() {
        let (mut sh, calls) = probe_shell(["probe a \\", "   ", "probe b", "exit"]);
        sh.repl();

        assert_eq!(*calls.borrow(), ["a", "b"]);
    }

    #[test]
    fn test_blank_first_line_is_ignored() {
        let (mut sh, calls) = probe_shell(["", "\\", "", "exit"]);
        sh.repl();

        assert!(calls.borrow().is_empty());
        assert_eq!(sh.env().output(), "> > | > ");
    }

    #[test]
    fn test_changed_symbols_apply_on_next_prompt() {
        let (mut sh, calls) = probe_shell([
            "symbol MORELINES &",
            "symbol PROMPT $",
            "probe x &",
            "y",
            "exit",
        ]);
        sh.repl();

        assert_eq!(*calls.borrow(), ["x y"]);
        assert_eq!(
            sh.env().output(),
            "> Symbol for MORELINES changed from '\\' to '&'\n\
             > Symbol for PROMPT changed from '>' to '$'\n\
             $ | $ "
        );
    }

    #[test]
    fn test_unknown_command() {
        let (mut sh, _) = probe_shell([]);
        let status = sh.execute_line("frobnicate now").unwrap();

        assert_eq!(status, ShellStatus::Continue);
        assert_eq!(sh.env().output(), "frobnicate: command not found.\n");
        assert_eq!(sh.env().output().lines().count(), 1);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let (mut sh, _) = probe_shell([]);
        sh.execute_line("EXIT").unwrap();
        assert!(sh.env().output().contains("command not found"));
    }

    #[test]
    fn test_input_closed_stops_loop() {
        let (mut sh, calls) = probe_shell(["probe once"]);
        sh.repl();

        assert!(!sh.is_running());
        assert_eq!(*calls.borrow(), ["once"]);
    }

    #[test]
    fn test_write_fault_on_greeting_stops_immediately() {
        let mut env = MemEnvironment::new(Rc::new(CommandRegistry::new()), ["exit"]);
        env.fail_writes();
        let mut sh = Interpreter::new(env);
        sh.repl();

        assert!(!sh.is_running());
        assert_eq!(sh.env().remaining_input(), 1);
    }

    #[test]
    fn test_write_fault_on_prompt_stops_loop() {
        let (mut sh, _) = probe_shell(["help", "exit"]);
        sh.env_mut().fail_writes();
        sh.repl();

        assert!(!sh.is_running());
        assert_eq!(sh.env().remaining_input(), 2);
    }

    #[test]
    fn test_write_fault_inside_command_propagates() {
        let (mut sh, _) = probe_shell([]);
        sh.env_mut().fail_writes();

        assert!(matches!(sh.execute_line("help"), Err(ShellIoError::Io(_))));
    }
}
