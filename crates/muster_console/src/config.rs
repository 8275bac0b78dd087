//! Configuration for the console and its binary.

use muster_format::table::DEFAULT_GAP;

/// Default log filter when neither `MUSTER_LOG` nor `--log` is given.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Configuration for a console session.
///
/// Controls prompt and banner, history retention, list layout and how test
/// runs behave.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Prompt shown by the REPL.
    pub prompt: String,

    /// Print the banner when the REPL starts.
    pub show_banner: bool,

    /// Maximum number of history entries kept by the line editor.
    pub history_size: usize,

    /// Separator between table columns in listings.
    pub table_gap: String,

    /// Stop a test run at the first failing case.
    pub stop_on_failure: bool,

    /// `tracing` filter directive installed by the binary.
    pub log_filter: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            prompt: "muster> ".to_string(),
            show_banner: true,
            history_size: 1000,
            table_gap: DEFAULT_GAP.to_string(),
            stop_on_failure: false,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ConsoleConfig {
    /// Creates the default interactive configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration for piped input: no banner, no prompt.
    #[must_use]
    pub fn batch() -> Self {
        Self {
            prompt: String::new(),
            show_banner: false,
            ..Self::default()
        }
    }

    /// Configuration for chasing failures: debug logging, stop on first failure.
    #[must_use]
    pub fn debug() -> Self {
        Self {
            stop_on_failure: true,
            log_filter: "debug".to_string(),
            ..Self::default()
        }
    }

    /// Builder method to set the prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Builder method to show or hide the banner.
    #[must_use]
    pub fn with_banner(mut self, show: bool) -> Self {
        self.show_banner = show;
        self
    }

    /// Builder method to set history size.
    #[must_use]
    pub fn with_history_size(mut self, size: usize) -> Self {
        self.history_size = size;
        self
    }

    /// Builder method to set the column separator for listings.
    #[must_use]
    pub fn with_table_gap(mut self, gap: impl Into<String>) -> Self {
        self.table_gap = gap.into();
        self
    }

    /// Builder method to stop test runs at the first failure.
    #[must_use]
    pub fn with_stop_on_failure(mut self, stop: bool) -> Self {
        self.stop_on_failure = stop;
        self
    }

    /// Builder method to set the log filter.
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }
}
