//! Command implementations for the testgate CLI.
//!
//! - [`run`] - build the dependency set, diff against the baseline and decide

pub mod run;

use std::fmt;
use std::process::ExitCode;
use std::time::Duration;

use testgate_graph::Verdict;

pub use run::execute as run_execute;

/// Exit code when no dependency changed and the tests can be skipped.
pub const EXIT_SKIP: u8 = 0;

/// Exit code when the tests must run.
pub const EXIT_RUN: u8 = 1;

/// Exit code when the analysis failed.
pub const EXIT_ERROR: u8 = 2;

/// Result of a completed analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The decision engine reached a verdict.
    Decided(Verdict),

    /// `git diff` did not finish in time; the tests run to be safe.
    DiffTimedOut { timeout: Duration },
}

impl Outcome {
    pub fn should_run(&self) -> bool {
        match self {
            Outcome::Decided(verdict) => verdict.should_run(),
            Outcome::DiffTimedOut { .. } => true,
        }
    }

    /// Process exit code for this outcome.
    pub fn code(&self) -> u8 {
        if self.should_run() { EXIT_RUN } else { EXIT_SKIP }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code())
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Decided(verdict) => fmt::Display::fmt(verdict, f),
            Outcome::DiffTimedOut { timeout } => write!(
                f,
                "RUN: change detection timed out after {}s",
                timeout.as_secs()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_is_a_run() {
        let outcome = Outcome::DiffTimedOut {
            timeout: Duration::from_secs(30),
        };
        assert!(outcome.should_run());
        assert_eq!(outcome.code(), EXIT_RUN);
        assert_eq!(outcome.to_string(), "RUN: change detection timed out after 30s");
    }

    #[test]
    fn test_skip_exit_code() {
        let outcome = Outcome::Decided(Verdict::Skip);
        assert!(!outcome.should_run());
        assert_eq!(outcome.code(), EXIT_SKIP);
    }

    #[test]
    fn test_exit_codes_are_distinct() {
        assert_ne!(EXIT_SKIP, EXIT_RUN);
        assert_ne!(EXIT_RUN, EXIT_ERROR);
        assert_ne!(EXIT_SKIP, EXIT_ERROR);
    }
}
