//! testgate CLI - decide whether a Go test suite needs to run.
//!
//! The binary wires the `testgate-graph` analysis to the command line:
//!
//! - [`cli`] - argument definitions
//! - [`config`] - defaults, `TESTGATE_*` environment variables and flags
//! - [`commands`] - the run command and its exit codes
//! - [`error`] - error types rendered through miette
//! - [`logger`] - tracing setup (stderr only)
//! - [`ui`] - status lines and verdict formatting
//!
//! Exit codes: `0` SKIP, `1` RUN, `2` ERROR.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

pub use commands::{EXIT_ERROR, EXIT_RUN, EXIT_SKIP, Outcome};
pub use error::{CliError, ConfigError, Result};
