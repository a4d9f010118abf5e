use anyhow::Context;
use argh::FromArgs;
use myshell::config::ShellConfig;
use myshell::env::Symbols;
use myshell::io_adapters::ConsoleEnvironment;
use myshell::{Interpreter, default_registry};
use std::rc::Rc;

#[derive(FromArgs)]
/// Interactive shell with filesystem commands. Type `help` for the list.
struct Args {
    /// symbol printed before each command
    #[argh(option, default = "'>'")]
    prompt: char,

    /// symbol that continues a command on the next line when it ends a line
    #[argh(option, default = "'\\\\'")]
    morelines: char,

    /// symbol printed before each continuation line
    #[argh(option, default = "'|'")]
    multiline: char,

    /// do not print the greeting
    #[argh(switch, short = 'q')]
    quiet: bool,
}

impl Args {
    fn into_config(self) -> ShellConfig {
        let mut config = ShellConfig {
            symbols: Symbols {
                prompt: self.prompt,
                morelines: self.morelines,
                multiline: self.multiline,
            },
            ..ShellConfig::default()
        };
        if self.quiet {
            config.greeting = None;
        }
        config
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Args = argh::from_env();
    let config = args.into_config();
    config.validate().context("invalid shell configuration")?;

    let env = ConsoleEnvironment::new(Rc::new(default_registry()), config.symbols)
        .context("cannot start the console")?;
    log::info!("starting shell with {:?}", config.symbols);

    let mut shell = Interpreter::new(env).with_greeting(config.greeting);
    shell.repl();
    Ok(())
}
