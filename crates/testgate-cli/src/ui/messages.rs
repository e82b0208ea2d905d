//! Status message functions for terminal output.

use owo_colors::{OwoColorize, Stream, Style};

/// Print an info message to stderr.
///
/// # Examples
///
/// ```no_run
/// use testgate_cli::ui::info;
///
/// info("12 dependencies, 3 changed files");
/// ```
pub fn info(message: &str) {
    eprintln!(
        "{} {}",
        "ℹ".if_supports_color(Stream::Stderr, |t| t.style(Style::new().blue().bold())),
        message
    );
}

/// Print a warning message to stderr.
///
/// # Examples
///
/// ```no_run
/// use testgate_cli::ui::warning;
///
/// warning("git diff timed out, assuming tests must run");
/// ```
pub fn warning(message: &str) {
    eprintln!(
        "{} {}",
        "⚠".if_supports_color(Stream::Stderr, |t| t.style(Style::new().yellow().bold())),
        message.if_supports_color(Stream::Stderr, |t| t.yellow())
    );
}
