//! The interactive REPL and the batch runner.

use std::io::{BufRead, Write};

use muster_foundation::{Error, Result};
use tracing::debug;

use crate::console::Console;
use crate::editor::{LineEditor, ReadResult, RustylineEditor};

/// The interactive REPL.
pub struct Repl<H, E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// Host, commands and tests.
    console: Console<H>,
}

impl<H> Repl<H, RustylineEditor> {
    /// Creates a REPL on a terminal editor sized from the console config.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new(console: Console<H>) -> Result<Self> {
        let editor = RustylineEditor::new(console.config().history_size)?;
        Ok(Self::with_editor(console, editor))
    }
}

impl<H, E: LineEditor> Repl<H, E> {
    /// Creates a REPL with the given editor.
    pub fn with_editor(console: Console<H>, mut editor: E) -> Self {
        editor.set_keywords(console.completions());
        Self { editor, console }
    }

    /// Returns a reference to the console.
    #[must_use]
    pub fn console(&self) -> &Console<H> {
        &self.console
    }

    /// Returns a mutable reference to the console.
    pub fn console_mut(&mut self) -> &mut Console<H> {
        &mut self.console
    }

    /// Consumes the REPL, returning the console.
    pub fn into_console(self) -> Console<H> {
        self.console
    }

    /// Runs the loop on stdout and stderr until EOF, `exit` or `quit`.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails.
    pub fn run(&mut self) -> Result<()> {
        self.run_with(&mut std::io::stdout(), &mut std::io::stderr())
    }

    /// Runs the loop writing replies to `out` and errors to `err`.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails or output cannot be written.
    pub fn run_with(&mut self, out: &mut impl Write, err: &mut impl Write) -> Result<()> {
        if self.console.config().show_banner {
            self.print_banner(out)?;
        }

        loop {
            let prompt = self.console.config().prompt.clone();
            let line = match self.editor.read_line(&prompt)? {
                ReadResult::Line(line) => line,
                ReadResult::Interrupted => continue,
                ReadResult::Eof => break,
            };

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
                break;
            }

            self.editor.add_history(trimmed);
            let reply = self.console.execute(trimmed);
            if reply.is_ok() {
                if !reply.text.is_empty() {
                    writeln!(out, "{}", reply.text).map_err(write_error)?;
                }
            } else {
                writeln!(err, "\x1b[31m{reply}\x1b[0m").map_err(write_error)?;
            }
        }

        debug!("repl finished");
        Ok(())
    }

    fn print_banner(&self, out: &mut impl Write) -> Result<()> {
        writeln!(
            out,
            "Muster console v{}\nType 'help' for commands, 'tests run' to self-check, Ctrl+D to exit.\n",
            env!("CARGO_PKG_VERSION")
        )
        .and_then(|()| out.flush())
        .map_err(write_error)
    }
}

/// Runs every line of `input` through `console`, returning the number of
/// failed commands.
///
/// Blank lines and lines starting with `#` are skipped. Successful replies go
/// to `out`, failures to `err` prefixed with the line number.
///
/// # Errors
///
/// Returns an error if input cannot be read or output cannot be written.
pub fn run_batch<H>(
    console: &mut Console<H>,
    input: impl BufRead,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<usize> {
    let mut failures = 0;
    for (number, line) in input.lines().enumerate() {
        let line = line.map_err(|e| Error::io(format!("failed to read input: {e}")))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let reply = console.execute(trimmed);
        if reply.is_ok() {
            if !reply.text.is_empty() {
                writeln!(out, "{}", reply.text).map_err(write_error)?;
            }
        } else {
            failures += 1;
            writeln!(err, "line {}: {reply}", number + 1).map_err(write_error)?;
        }
    }
    Ok(failures)
}

fn write_error(e: std::io::Error) -> Error {
    Error::io(format!("failed to write output: {e}"))
}
