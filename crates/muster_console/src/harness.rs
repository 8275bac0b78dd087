//! Caller-owned test registry.
//!
//! Test cases run commands against a live host and check the replies. The
//! registry is an ordinary value: the caller creates it, registers cases,
//! runs them against a host and command registry passed in by reference,
//! and reads back the last report.
//!
//! Cases run in registration order against the same host, so a case that
//! mutates the host is expected to undo its changes.

use std::any::Any;
use std::collections::BTreeSet;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::{Duration, Instant};

use muster_foundation::record::fold_case;
use muster_foundation::{Error, Result};
use muster_format::{Column, Table};
use tracing::{debug, info, warn};

use crate::command::{CommandRegistry, Reply};

/// Compares test IDs and categories, ignoring case.
pub(crate) fn same_name(a: &str, b: &str) -> bool {
    fold_case(a) == fold_case(b)
}

/// What a command test expects from the reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expectation {
    /// The command succeeds.
    Success,
    /// The command fails.
    Failure,
    /// The reply text contains the string, whatever the status.
    Contains(String),
    /// The reply text does not contain the string, whatever the status.
    NotContains(String),
    /// The command succeeds and the reply contains the string.
    SuccessContaining(String),
    /// The command fails and the reply contains the string.
    FailureContaining(String),
}

impl Expectation {
    /// Checks a reply, describing the mismatch on failure.
    ///
    /// # Errors
    ///
    /// Returns a human-readable explanation when the reply does not meet the
    /// expectation.
    pub fn check(&self, reply: &Reply) -> std::result::Result<(), String> {
        let ok = match self {
            Self::Success => reply.is_ok(),
            Self::Failure => reply.is_error(),
            Self::Contains(text) => reply.text.contains(text.as_str()),
            Self::NotContains(text) => !reply.text.contains(text.as_str()),
            Self::SuccessContaining(text) => reply.is_ok() && reply.text.contains(text.as_str()),
            Self::FailureContaining(text) => {
                reply.is_error() && reply.text.contains(text.as_str())
            }
        };
        if ok {
            Ok(())
        } else {
            Err(format!("expected {self}, got: {reply}"))
        }
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("success"),
            Self::Failure => f.write_str("failure"),
            Self::Contains(text) => write!(f, "reply containing '{text}'"),
            Self::NotContains(text) => write!(f, "reply not containing '{text}'"),
            Self::SuccessContaining(text) => write!(f, "success containing '{text}'"),
            Self::FailureContaining(text) => write!(f, "failure containing '{text}'"),
        }
    }
}

/// A custom check with access to the host and the command registry.
pub type CheckFn<H> = Box<dyn Fn(&mut H, &CommandRegistry<H>) -> std::result::Result<(), String>>;

enum TestBody<H> {
    Command { line: String, expect: Expectation },
    Custom(CheckFn<H>),
}

/// One registered test.
pub struct TestCase<H> {
    id: String,
    category: String,
    description: String,
    body: TestBody<H>,
}

impl<H> TestCase<H> {
    /// A test that runs one command line and checks the reply.
    pub fn command(
        id: impl Into<String>,
        category: impl Into<String>,
        line: impl Into<String>,
        expect: Expectation,
    ) -> Self {
        let line = line.into();
        Self {
            id: id.into(),
            category: category.into(),
            description: line.clone(),
            body: TestBody::Command { line, expect },
        }
    }

    /// A test driven by a closure.
    pub fn custom(
        id: impl Into<String>,
        category: impl Into<String>,
        check: impl Fn(&mut H, &CommandRegistry<H>) -> std::result::Result<(), String> + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            description: String::new(),
            body: TestBody::Custom(Box::new(check)),
        }
    }

    /// Sets the description shown by listings.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// The unique test ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The category used to select groups of tests.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// A one-line description. Defaults to the command line.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    fn run(&self, host: &mut H, commands: &CommandRegistry<H>) -> TestResult {
        let start = Instant::now();
        let outcome = catch_unwind(AssertUnwindSafe(|| match &self.body {
            TestBody::Command { line, expect } => expect.check(&commands.execute(host, line)),
            TestBody::Custom(check) => check(host, commands),
        }))
        .unwrap_or_else(|payload| Err(format!("panicked: {}", panic_message(&*payload))));

        let (passed, detail) = match outcome {
            Ok(()) => (true, String::new()),
            Err(detail) => (false, detail),
        };
        TestResult {
            id: self.id.clone(),
            category: self.category.clone(),
            passed,
            detail,
            elapsed: start.elapsed(),
        }
    }
}

impl<H> fmt::Debug for TestCase<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("id", &self.id)
            .field("category", &self.category)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// The result of one test.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestResult {
    /// Test ID.
    pub id: String,
    /// Test category.
    pub category: String,
    /// Whether the test passed.
    pub passed: bool,
    /// Why it failed; empty on success.
    pub detail: String,
    /// Wall-clock time spent.
    pub elapsed: Duration,
}

/// Results of one test run, in execution order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TestReport {
    results: Vec<TestResult>,
}

impl TestReport {
    /// All results.
    #[must_use]
    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    /// Failed results.
    pub fn failures(&self) -> impl Iterator<Item = &TestResult> {
        self.results.iter().filter(|r| !r.passed)
    }

    /// Number of passed tests.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    /// Number of failed tests.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.total() - self.passed()
    }

    /// Number of tests run.
    #[must_use]
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Returns true if every test that ran passed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// Returns the result for a test ID.
    #[must_use]
    pub fn result(&self, id: &str) -> Option<&TestResult> {
        self.results.iter().find(|r| r.id == id)
    }

    /// `Passed: P, Failed: F, Total: T`, followed by a table of failures.
    #[must_use]
    pub fn summary(&self) -> String {
        let head = format!(
            "Passed: {}, Failed: {}, Total: {}",
            self.passed(),
            self.failed(),
            self.total()
        );
        if self.is_success() {
            return head;
        }

        let failures = Table::new()
            .with_column(Column::titled("Test", |r: &TestResult| r.id.clone()))
            .with_column(Column::titled("Category", |r: &TestResult| r.category.clone()))
            .with_column(Column::titled("Detail", |r: &TestResult| r.detail.clone()))
            .with_titles()
            .render(self.failures());
        format!("{head}\n\nFailures:\n{failures}")
    }
}

impl fmt::Display for TestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

/// Registry of test cases for a host type `H`.
pub struct TestRegistry<H> {
    cases: Vec<TestCase<H>>,
    last: Option<TestReport>,
    stop_on_failure: bool,
}

impl<H> Default for TestRegistry<H> {
    fn default() -> Self {
        Self {
            cases: Vec::new(),
            last: None,
            stop_on_failure: false,
        }
    }
}

impl<H> TestRegistry<H> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops runs at the first failing case.
    pub fn set_stop_on_failure(&mut self, stop: bool) {
        self.stop_on_failure = stop;
    }

    /// Adds a test case.
    ///
    /// # Errors
    ///
    /// Returns an invalid-argument error if the ID is already registered.
    pub fn register(&mut self, case: TestCase<H>) -> Result<()> {
        if self.get(&case.id).is_some() {
            return Err(Error::invalid_argument(format!(
                "test '{}' is already registered",
                case.id
            )));
        }
        debug!(test = %case.id, category = %case.category, "registered test");
        self.cases.push(case);
        Ok(())
    }

    /// Adds every case, stopping at the first duplicate.
    ///
    /// # Errors
    ///
    /// Returns an invalid-argument error on a duplicate ID.
    pub fn register_all(&mut self, cases: impl IntoIterator<Item = TestCase<H>>) -> Result<()> {
        cases.into_iter().try_for_each(|case| self.register(case))
    }

    /// Looks up a case by ID, ignoring case.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&TestCase<H>> {
        self.cases.iter().find(|c| same_name(&c.id, id))
    }

    /// Registered cases in registration order.
    pub fn cases(&self) -> impl Iterator<Item = &TestCase<H>> {
        self.cases.iter()
    }

    /// Returns the number of registered cases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Returns true if no cases are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Distinct categories in sorted order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        self.cases
            .iter()
            .map(|c| c.category.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Runs every case.
    pub fn run_all(&mut self, host: &mut H, commands: &CommandRegistry<H>) -> &TestReport {
        let selected: Vec<usize> = (0..self.cases.len()).collect();
        self.run_selected(&selected, host, commands)
    }

    /// Runs the cases in one category, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns an invalid-argument error if no case has that category.
    pub fn run_category(
        &mut self,
        category: &str,
        host: &mut H,
        commands: &CommandRegistry<H>,
    ) -> Result<&TestReport> {
        let selected: Vec<usize> = self
            .cases
            .iter()
            .enumerate()
            .filter(|(_, c)| same_name(&c.category, category))
            .map(|(i, _)| i)
            .collect();
        if selected.is_empty() {
            return Err(Error::invalid_argument(format!(
                "no tests in category '{category}' (categories: {})",
                self.categories().join(", ")
            )));
        }
        Ok(self.run_selected(&selected, host, commands))
    }

    /// Runs a single case by ID.
    ///
    /// # Errors
    ///
    /// Returns an unknown-test error if no case has that ID.
    pub fn run_one(
        &mut self,
        id: &str,
        host: &mut H,
        commands: &CommandRegistry<H>,
    ) -> Result<&TestReport> {
        let index = self
            .cases
            .iter()
            .position(|c| same_name(&c.id, id))
            .ok_or_else(|| Error::unknown_test(id))?;
        Ok(self.run_selected(&[index], host, commands))
    }

    /// The report of the most recent run.
    #[must_use]
    pub fn last_report(&self) -> Option<&TestReport> {
        self.last.as_ref()
    }

    /// Forgets the last report, keeping the cases.
    pub fn clear_results(&mut self) {
        self.last = None;
    }

    /// Removes every case and the last report.
    pub fn clear(&mut self) {
        self.cases.clear();
        self.last = None;
    }

    fn run_selected(
        &mut self,
        selected: &[usize],
        host: &mut H,
        commands: &CommandRegistry<H>,
    ) -> &TestReport {
        info!(tests = selected.len(), "running tests");
        let mut report = TestReport::default();
        for &index in selected {
            let case = &self.cases[index];
            let result = case.run(host, commands);
            if result.passed {
                debug!(test = %result.id, elapsed = ?result.elapsed, "test passed");
            } else {
                warn!(test = %result.id, detail = %result.detail, "test failed");
            }
            let stop = !result.passed && self.stop_on_failure;
            report.results.push(result);
            if stop {
                break;
            }
        }
        info!(
            passed = report.passed(),
            failed = report.failed(),
            total = report.total(),
            "test run finished"
        );
        self.last.insert(report)
    }
}

impl<H> fmt::Debug for TestRegistry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestRegistry")
            .field("cases", &self.cases)
            .field("last", &self.last)
            .field("stop_on_failure", &self.stop_on_failure)
            .finish()
    }
}
