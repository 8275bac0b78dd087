//! Error types for the Muster system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//!
//! Lookup itself never fails: "no match" and "too many matches" are ordinary
//! outcomes. These errors appear where a command has to give up, for example
//! when an outcome other than a single match reaches a mutating command.

use std::fmt;

use thiserror::Error;

/// Result type alias for Muster operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Muster operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an unknown command error.
    #[must_use]
    pub fn unknown_command(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownCommand(name.into()))
    }

    /// Creates a usage error for a command invoked with bad arguments.
    #[must_use]
    pub fn usage(command: impl Into<String>, usage: impl Into<String>) -> Self {
        Self::new(ErrorKind::Usage {
            command: command.into(),
            usage: usage.into(),
        })
    }

    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument(message.into()))
    }

    /// Creates an unknown record kind error.
    #[must_use]
    pub fn unknown_kind(kind: impl Into<String>, known: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownKind {
            kind: kind.into(),
            known: known.into(),
        })
    }

    /// Creates a record not found error.
    #[must_use]
    pub fn not_found(kind: impl Into<String>, query: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound {
            kind: kind.into(),
            query: query.into(),
        })
    }

    /// Creates an ambiguous lookup error carrying the pre-rendered message.
    #[must_use]
    pub fn ambiguous(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Ambiguous(message.into()))
    }

    /// Creates a duplicate ID error.
    #[must_use]
    pub fn duplicate_id(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateId {
            kind: kind.into(),
            id: id.into(),
        })
    }

    /// Creates an unknown test error.
    #[must_use]
    pub fn unknown_test(id: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownTest(id.into()))
    }

    /// Creates an I/O error.
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::IoError(message.into()))
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SerializationError(message.into()))
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// No command is registered under this name.
    #[error("unknown command '{0}'. Type 'help' for a list of commands")]
    UnknownCommand(String),

    /// A command was invoked with the wrong arguments.
    #[error("usage: {command} {usage}")]
    Usage {
        /// The command name.
        command: String,
        /// The argument synopsis.
        usage: String,
    },

    /// An argument could not be interpreted.
    #[error("{0}")]
    InvalidArgument(String),

    /// No record collection with this name exists.
    #[error("unknown record kind '{kind}' (known kinds: {known})")]
    UnknownKind {
        /// The name that was asked for.
        kind: String,
        /// Comma-separated names of the kinds that do exist.
        known: String,
    },

    /// No record matched a query.
    #[error("No {kind} matching query '{query}' found")]
    NotFound {
        /// The singular kind name.
        kind: String,
        /// The query as typed.
        query: String,
    },

    /// More than one record survived lookup.
    #[error("{0}")]
    Ambiguous(String),

    /// A record with the same ID already exists in the collection.
    #[error("{kind} with id '{id}' already exists")]
    DuplicateId {
        /// The singular kind name.
        kind: String,
        /// The conflicting ID.
        id: String,
    },

    /// No test case is registered under this ID.
    #[error("unknown test '{0}'")]
    UnknownTest(String),

    /// File system failure.
    #[error("I/O error: {0}")]
    IoError(String),

    /// Snapshot encoding or decoding failure.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The command being executed, if any.
    pub command: Option<String>,
    /// The test case being run, if any.
    pub test: Option<String>,
    /// Additional notes, outermost last.
    pub notes: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the command name.
    #[must_use]
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Sets the test case ID.
    #[must_use]
    pub fn with_test(mut self, test: impl Into<String>) -> Self {
        self.test = Some(test.into());
        self
    }

    /// Adds a note.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(command) = &self.command {
            write!(f, "in command '{command}'")?;
        }
        if let Some(test) = &self.test {
            if self.command.is_some() {
                write!(f, " ")?;
            }
            write!(f, "(test {test})")?;
        }
        for note in &self.notes {
            write!(f, "\n  note: {note}")?;
        }
        Ok(())
    }
}
