//! Error handling for the testgate CLI.
//!
//! Library errors from `testgate-graph` convert into [`CliError`] through
//! `#[from]`; configuration problems are reported as [`ConfigError`] with a
//! hint telling the user which flag or variable to set. Every `CliError`
//! ends the process with the error exit code.

mod miette;

pub use self::miette::cli_error_to_miette;

use testgate_graph::{DiffError, GraphError, InvalidProjectRoot, PatternError};
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Dependency graph construction failed
    #[error("Dependency analysis failed: {0}")]
    Graph(#[from] GraphError),

    /// `git diff` could not produce a change set
    #[error("Change detection failed: {0}")]
    Diff(#[from] DiffError),

    /// I/O errors outside the analysis itself
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required option was given neither as a flag nor as an env var
    #[error("Missing required option: {field}\n\nHint: {hint}")]
    MissingField {
        /// Name of the missing option
        field: String,
        /// How to provide it
        hint: String,
    },

    /// An option has a value that cannot be used
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        /// Name of the option
        field: String,
        /// The rejected value or the reason it was rejected
        value: String,
        /// Helpful hint for correct values
        hint: String,
    },

    /// The base folder name cannot anchor a project
    #[error("Invalid base folder name: {0}")]
    InvalidRoot(#[from] InvalidProjectRoot),

    /// A file-name pattern is not a valid regex
    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] PatternError),
}

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
