//! The console: a host, its commands and its tests behind one entry point.

use muster_foundation::{Error, Result};
use tracing::debug;

use crate::args::{Args, tokenize};
use crate::command::{CommandRegistry, Reply};
use crate::config::ConsoleConfig;
use crate::harness::{TestCase, TestRegistry, TestReport, same_name};
use muster_format::{Column, Table};

const TESTS_USAGE: &str = "list [category] | run [category] | run-one <id> | last | clear";

/// A host with its command and test registries.
///
/// Every line goes through [`Console::execute`]. Lines starting with
/// `tests` drive the test registry; everything else is a command.
pub struct Console<H> {
    host: H,
    commands: CommandRegistry<H>,
    tests: TestRegistry<H>,
    config: ConsoleConfig,
}

impl<H> Console<H> {
    /// Creates a console with empty registries and the default config.
    #[must_use]
    pub fn new(host: H) -> Self {
        Self {
            host,
            commands: CommandRegistry::new(),
            tests: TestRegistry::new(),
            config: ConsoleConfig::default(),
        }
    }

    /// Replaces the command registry.
    #[must_use]
    pub fn with_commands(mut self, commands: CommandRegistry<H>) -> Self {
        self.commands = commands;
        self
    }

    /// Replaces the test registry.
    #[must_use]
    pub fn with_tests(mut self, mut tests: TestRegistry<H>) -> Self {
        tests.set_stop_on_failure(self.config.stop_on_failure);
        self.tests = tests;
        self
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: ConsoleConfig) -> Self {
        self.tests.set_stop_on_failure(config.stop_on_failure);
        self.config = config;
        self
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host for mutation.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Consumes the console, returning the host.
    pub fn into_host(self) -> H {
        self.host
    }

    /// The command registry.
    pub fn commands(&self) -> &CommandRegistry<H> {
        &self.commands
    }

    /// The command registry for registration.
    pub fn commands_mut(&mut self) -> &mut CommandRegistry<H> {
        &mut self.commands
    }

    /// The test registry.
    pub fn tests(&self) -> &TestRegistry<H> {
        &self.tests
    }

    /// The test registry for registration.
    pub fn tests_mut(&mut self) -> &mut TestRegistry<H> {
        &mut self.tests
    }

    /// The configuration.
    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// Names the REPL offers for completion.
    pub fn completions(&self) -> Vec<String> {
        self.commands
            .names()
            .chain(["help", "tests"])
            .map(str::to_string)
            .collect()
    }

    /// Runs one line.
    pub fn execute(&mut self, line: &str) -> Reply {
        let tokens = tokenize(line);
        match tokens.split_first() {
            Some((head, rest)) if head.text.eq_ignore_ascii_case("tests") => {
                let args = Args::from_tokens(rest);
                Reply::from(self.run_tests_command(&args))
            }
            Some((head, rest))
                if head.text.eq_ignore_ascii_case("help")
                    && rest.is_empty()
                    && !self.commands.contains("help") =>
            {
                Reply::from(
                    self.commands
                        .help(None)
                        .map(|listing| format!("{listing}\ntests {TESTS_USAGE}")),
                )
            }
            _ => self.commands.execute(&mut self.host, line),
        }
    }

    /// Runs every registered test against the host.
    pub fn run_all_tests(&mut self) -> &TestReport {
        self.tests.run_all(&mut self.host, &self.commands)
    }

    fn run_tests_command(&mut self, args: &Args) -> Result<String> {
        let sub = args.get(0).unwrap_or("run").to_lowercase();
        debug!(subcommand = %sub, "tests command");
        match sub.as_str() {
            "list" => self.list_tests(args.get(1)),
            "run" => {
                let report = match args.get(1) {
                    Some(category) => {
                        self.tests
                            .run_category(category, &mut self.host, &self.commands)?
                    }
                    None => self.tests.run_all(&mut self.host, &self.commands),
                };
                report_reply(report)
            }
            "run-one" => {
                let id = args
                    .get(1)
                    .ok_or_else(|| Error::usage("tests", TESTS_USAGE))?;
                report_reply(self.tests.run_one(id, &mut self.host, &self.commands)?)
            }
            "last" => self
                .tests
                .last_report()
                .map(TestReport::summary)
                .ok_or_else(|| Error::invalid_argument("no test results yet")),
            "clear" => {
                self.tests.clear_results();
                Ok("Cleared test results".to_string())
            }
            _ => Err(Error::usage("tests", TESTS_USAGE)),
        }
    }

    fn list_tests(&self, category: Option<&str>) -> Result<String> {
        let cases: Vec<_> = self
            .tests
            .cases()
            .filter(|c| category.is_none_or(|wanted| same_name(c.category(), wanted)))
            .collect();
        if cases.is_empty() {
            return Err(match category {
                Some(category) => {
                    Error::invalid_argument(format!("no tests in category '{category}'"))
                }
                None => Error::invalid_argument("no tests registered"),
            });
        }

        let table = Table::new()
            .with_gap(self.config.table_gap.clone())
            .with_column(Column::titled("ID", |c: &TestCase<H>| c.id().to_string()))
            .with_column(Column::titled("Category", |c: &TestCase<H>| {
                c.category().to_string()
            }))
            .with_column(Column::titled("Description", |c: &TestCase<H>| {
                c.description().to_string()
            }))
            .with_titles();
        Ok(format!(
            "{} tests:\n{}",
            cases.len(),
            table.render(cases.iter().copied())
        ))
    }
}

/// Turns a finished run into a reply: success only when nothing failed.
fn report_reply(report: &TestReport) -> Result<String> {
    if report.is_success() {
        Ok(report.summary())
    } else {
        Err(Error::invalid_argument(report.summary()))
    }
}
