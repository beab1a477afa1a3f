//! Test utilities and mocks for cmrun unit tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use cmrun::test_support::{MockOutcome, MockRunner};
//!
//! #[test]
//! fn test_example() {
//!     let mut runner = MockRunner::new();
//!     runner.expect_contains("--build", MockOutcome::Exit(2));
//!
//!     // Hand `&runner` to the pipeline, then inspect `runner.calls()`.
//! }
//! ```

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;

use crate::util::process::{ProcessBuilder, ProcessRunner, ProcessStatus};

/// What a mocked command does when it is run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockOutcome {
    /// The process runs and exits with this code.
    Exit(i32),
    /// The process cannot be spawned (program not found).
    SpawnError,
}

impl MockOutcome {
    fn into_result(self, cmd: &str) -> io::Result<ProcessStatus> {
        match self {
            MockOutcome::Exit(code) => Ok(ProcessStatus::from_code(code)),
            MockOutcome::SpawnError => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("mock: cannot spawn `{}`", cmd),
            )),
        }
    }
}

/// Pattern for matching commands in MockRunner.
#[derive(Debug, Clone)]
pub enum CommandPattern {
    /// Exact match on full command string.
    Exact(String),
    /// Match if command starts with prefix.
    StartsWith(String),
    /// Match if command contains substring.
    Contains(String),
}

impl CommandPattern {
    /// Check if this pattern matches the given command.
    pub fn matches(&self, cmd: &str) -> bool {
        match self {
            CommandPattern::Exact(s) => cmd == s,
            CommandPattern::StartsWith(s) => cmd.starts_with(s),
            CommandPattern::Contains(s) => cmd.contains(s),
        }
    }
}

/// How a recorded command was run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    /// Output discarded.
    Probe,
    /// Output forwarded.
    Run,
}

/// A command the mock was asked to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub kind: CallKind,
    pub command: String,
    pub cwd: Option<PathBuf>,
}

/// Mock process runner.
///
/// Records every command and answers with the outcome of the first matching
/// expectation, or the default (exit 0) when nothing matches.
#[derive(Debug)]
pub struct MockRunner {
    expectations: Vec<(CommandPattern, MockOutcome)>,
    default_outcome: MockOutcome,
    calls: RefCell<Vec<RecordedCall>>,
}

impl MockRunner {
    /// Create a runner where every command succeeds.
    pub fn new() -> Self {
        MockRunner {
            expectations: Vec::new(),
            default_outcome: MockOutcome::Exit(0),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Add an expectation for an exact command match.
    pub fn expect(&mut self, cmd: &str, outcome: MockOutcome) -> &mut Self {
        self.expectations
            .push((CommandPattern::Exact(cmd.to_string()), outcome));
        self
    }

    /// Add an expectation for a command starting with a prefix.
    pub fn expect_prefix(&mut self, prefix: &str, outcome: MockOutcome) -> &mut Self {
        self.expectations
            .push((CommandPattern::StartsWith(prefix.to_string()), outcome));
        self
    }

    /// Add an expectation for a command containing a substring.
    pub fn expect_contains(&mut self, substring: &str, outcome: MockOutcome) -> &mut Self {
        self.expectations
            .push((CommandPattern::Contains(substring.to_string()), outcome));
        self
    }

    /// Set the outcome for commands that don't match any expectation.
    pub fn set_default(&mut self, outcome: MockOutcome) -> &mut Self {
        self.default_outcome = outcome;
        self
    }

    /// Get all commands that were called, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    /// Count calls whose command contains `substring`.
    pub fn count_containing(&self, substring: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.command.contains(substring))
            .count()
    }

    fn record(&self, kind: CallKind, cmd: &ProcessBuilder) -> io::Result<ProcessStatus> {
        let command = cmd.display_command();
        self.calls.borrow_mut().push(RecordedCall {
            kind,
            command: command.clone(),
            cwd: cmd.get_cwd().map(PathBuf::from),
        });

        let outcome = self
            .expectations
            .iter()
            .find(|(pattern, _)| pattern.matches(&command))
            .map(|(_, outcome)| *outcome)
            .unwrap_or(self.default_outcome);

        outcome.into_result(&command)
    }
}

impl Default for MockRunner {
    fn default() -> Self {
        MockRunner::new()
    }
}

impl ProcessRunner for MockRunner {
    fn probe(&self, cmd: &ProcessBuilder) -> io::Result<ProcessStatus> {
        self.record(CallKind::Probe, cmd)
    }

    fn run(&self, cmd: &ProcessBuilder) -> io::Result<ProcessStatus> {
        self.record(CallKind::Run, cmd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_matching_expectation_wins() {
        let mut runner = MockRunner::new();
        runner
            .expect_contains("--build", MockOutcome::Exit(2))
            .expect_prefix("cmake", MockOutcome::Exit(1));

        let build = ProcessBuilder::new("cmake").args(["--build", "dir"]);
        assert_eq!(runner.run(&build).unwrap().code, Some(2));

        let other = ProcessBuilder::new("cmake").arg("--version");
        assert_eq!(runner.probe(&other).unwrap().code, Some(1));

        let unmatched = ProcessBuilder::new("app");
        assert!(runner.run(&unmatched).unwrap().success());

        assert_eq!(runner.calls().len(), 3);
        assert_eq!(runner.calls()[1].kind, CallKind::Probe);
    }

    #[test]
    fn test_spawn_error() {
        let mut runner = MockRunner::new();
        runner.expect("cmake --version", MockOutcome::SpawnError);

        let err = runner
            .probe(&ProcessBuilder::new("cmake").arg("--version"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
