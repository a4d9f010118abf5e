//! An interactive, line-oriented command shell.
//!
//! The crate provides the engine of a small shell: a quote-aware tokenizer, an
//! [`Environment`](env::Environment) trait that decouples commands from the
//! terminal, a registry of [`ShellCommand`](command::ShellCommand)s and the
//! [`Interpreter`] that drives the read-eval loop with multi-line continuation.
//! A set of filesystem commands (`cat`, `ls`, `tree`, `copy`, `mkdir`,
//! `hexdump`, ...) ships in [`builtin`].
//!
//! The console binary wires these together with a rustyline-backed
//! [`ConsoleEnvironment`](io_adapters::ConsoleEnvironment); tests and embedders
//! use [`MemEnvironment`](io_adapters::MemEnvironment) instead.

pub mod builtin;
pub mod command;
pub mod config;
pub mod env;
pub mod hex;
pub mod hexdump;
mod interpreter;
pub mod io_adapters;
pub mod lexer;

/// The read-eval loop. See [`Interpreter`] for an example.
pub use interpreter::Interpreter;

pub use builtin::default_registry;
