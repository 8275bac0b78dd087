//! Command registry and execution.
//!
//! Commands are registered by name when the console is built; nothing is
//! discovered at runtime. A handler receives the host and the parsed
//! arguments and returns the reply text or an error.

use std::collections::BTreeMap;
use std::fmt;

use muster_foundation::{Error, ErrorContext, Result};
use muster_format::{Column, Table};
use tracing::{info, warn};

use crate::args::{Args, tokenize};

/// A command handler.
pub type Handler<H> = Box<dyn Fn(&mut H, &Args) -> Result<String>>;

/// A registered command.
pub struct Command<H> {
    name: String,
    usage: String,
    summary: String,
    min_args: usize,
    handler: Handler<H>,
}

impl<H> Command<H> {
    /// Creates a command with no argument synopsis.
    pub fn new(
        name: impl Into<String>,
        handler: impl Fn(&mut H, &Args) -> Result<String> + 'static,
    ) -> Self {
        Self {
            name: name.into().to_lowercase(),
            usage: String::new(),
            summary: String::new(),
            min_args: 0,
            handler: Box::new(handler),
        }
    }

    /// Sets the argument synopsis shown in usage errors and help.
    #[must_use]
    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    /// Sets the one-line description.
    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Sets the minimum number of positional arguments.
    #[must_use]
    pub fn with_min_args(mut self, min_args: usize) -> Self {
        self.min_args = min_args;
        self
    }

    /// The command name (lowercase).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The argument synopsis.
    #[must_use]
    pub fn usage(&self) -> &str {
        &self.usage
    }

    /// The one-line description.
    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Runs the handler after checking arity.
    ///
    /// # Errors
    ///
    /// Returns a usage error when too few positional arguments are given,
    /// otherwise whatever the handler returns.
    pub fn invoke(&self, host: &mut H, args: &Args) -> Result<String> {
        if args.len() < self.min_args {
            return Err(Error::usage(&self.name, &self.usage));
        }
        (self.handler)(host, args)
    }
}

impl<H> fmt::Debug for Command<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("usage", &self.usage)
            .field("min_args", &self.min_args)
            .finish_non_exhaustive()
    }
}

/// Whether a reply reports success.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplyStatus {
    /// The command succeeded.
    Ok,
    /// The command failed.
    Error,
}

/// The text a command produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    /// Success or failure.
    pub status: ReplyStatus,
    /// Reply text without the `Error: ` prefix.
    pub text: String,
}

impl Reply {
    /// A successful reply.
    #[must_use]
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            status: ReplyStatus::Ok,
            text: text.into(),
        }
    }

    /// A failed reply.
    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            status: ReplyStatus::Error,
            text: text.into(),
        }
    }

    /// Returns true for a successful reply.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == ReplyStatus::Ok
    }

    /// Returns true for a failed reply.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.status == ReplyStatus::Error
    }
}

impl From<Result<String>> for Reply {
    fn from(result: Result<String>) -> Self {
        match result {
            Ok(text) => Self::ok(text),
            Err(e) => Self::error(e.to_string()),
        }
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            ReplyStatus::Ok => f.write_str(&self.text),
            ReplyStatus::Error => write!(f, "Error: {}", self.text),
        }
    }
}

/// Registry of named commands for a host type `H`.
pub struct CommandRegistry<H> {
    commands: BTreeMap<String, Command<H>>,
}

impl<H> Default for CommandRegistry<H> {
    fn default() -> Self {
        Self {
            commands: BTreeMap::new(),
        }
    }
}

impl<H> CommandRegistry<H> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a command, returning any command it replaced.
    pub fn register(&mut self, command: Command<H>) -> Option<Command<H>> {
        self.commands.insert(command.name.clone(), command)
    }

    /// Looks up a command by name, ignoring case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Command<H>> {
        self.commands.get(&name.to_lowercase())
    }

    /// Returns true if a command is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Registered command names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    /// Registered commands in name order.
    pub fn commands(&self) -> impl Iterator<Item = &Command<H>> {
        self.commands.values()
    }

    /// Returns the number of registered commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns true if no commands are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Runs a command by name with already-parsed arguments.
    ///
    /// # Errors
    ///
    /// Returns an unknown-command error, a usage error, or the handler's error,
    /// with the command name attached as context.
    pub fn dispatch(&self, host: &mut H, name: &str, args: &Args) -> Result<String> {
        let command = self
            .get(name)
            .ok_or_else(|| Error::unknown_command(name))?;
        command
            .invoke(host, args)
            .map_err(|e| e.with_context(ErrorContext::new().with_command(command.name())))
    }

    /// Describes one command, or lists them all when `name` is `None`.
    ///
    /// # Errors
    ///
    /// Returns an unknown-command error if `name` is not registered.
    pub fn help(&self, name: Option<&str>) -> Result<String> {
        if let Some(name) = name {
            let command = self
                .get(name)
                .ok_or_else(|| Error::unknown_command(name))?;
            let synopsis = format!("usage: {} {}", command.name(), command.usage());
            return Ok(if command.summary().is_empty() {
                synopsis.trim_end().to_string()
            } else {
                format!("{}\n{}", synopsis.trim_end(), command.summary())
            });
        }

        let table = Table::new()
            .with_column(Column::new(|c: &Command<H>| {
                format!("{} {}", c.name(), c.usage()).trim_end().to_string()
            }))
            .with_column(Column::new(|c: &Command<H>| c.summary().to_string()));
        Ok(format!("Commands:\n{}", table.render(self.commands())))
    }

    /// Tokenizes and runs one command line.
    ///
    /// `help [command]` is answered from the registry unless a command
    /// named `help` has been registered.
    pub fn execute(&self, host: &mut H, line: &str) -> Reply {
        let tokens = tokenize(line);
        let Some((head, rest)) = tokens.split_first() else {
            return Reply::error("empty command");
        };

        let args = Args::from_tokens(rest);
        let result = if head.text.eq_ignore_ascii_case("help") && !self.contains("help") {
            self.help(args.get(0))
        } else {
            self.dispatch(host, &head.text, &args)
        };
        let reply = Reply::from(result);
        if reply.is_ok() {
            info!(command = %head.text, "command succeeded");
        } else {
            warn!(command = %head.text, error = %reply.text, "command failed");
        }
        reply
    }
}
