//! Command registry, test harness, catalog host, and REPL for Muster.
//!
//! This crate provides:
//! - [`CommandRegistry`] - Explicit name → handler table built at startup
//! - [`TestRegistry`] - Caller-owned test cases with a cached last report
//! - [`Catalog`] - In-memory record collections acting as the host
//! - [`Console`] - Host + commands + tests behind one `execute` entry point
//! - [`ConsoleConfig`] - Prompt, table layout, and test-run settings
//! - [`Repl`] - Interactive read-eval-print loop over a console
//! - [`run_batch`] - Line-by-line execution of scripts and piped input
//! - Catalog snapshots in `MessagePack`

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod args;
pub mod catalog;
pub mod command;
pub mod commands;
pub mod config;
pub mod console;
pub mod editor;
pub mod harness;
pub mod repl;
pub mod snapshot;
pub mod suite;

pub use args::{Args, Token, tokenize};
pub use catalog::{Catalog, Collection};
pub use command::{Command, CommandRegistry, Reply, ReplyStatus};
pub use commands::{register_standard_commands, standard_console};
pub use config::ConsoleConfig;
pub use console::Console;
pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use harness::{Expectation, TestCase, TestRegistry, TestReport, TestResult};
pub use repl::{Repl, run_batch};
pub use suite::standard_suite;
