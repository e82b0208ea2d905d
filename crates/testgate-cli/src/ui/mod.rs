//! Terminal output: status lines on stderr and the verdict on stdout.
//!
//! # Examples
//!
//! ```no_run
//! use testgate_cli::ui;
//!
//! ui::init_colors(false);
//! ui::info("Analyzing tests/integration");
//! ```

mod messages;

pub use messages::{info, warning};

use owo_colors::{OwoColorize, Stream, Style};

use crate::commands::Outcome;

/// Initialize color support.
///
/// `--no-color` always wins; otherwise owo-colors follows `NO_COLOR`,
/// `FORCE_COLOR` and terminal detection per stream.
pub fn init_colors(no_color: bool) {
    if no_color {
        owo_colors::set_override(false);
    }
}

/// Render the verdict line printed on stdout.
///
/// The `RUN`/`SKIP` label is colored when stdout supports it.
pub fn format_verdict(outcome: &Outcome) -> String {
    let text = outcome.to_string();
    let (label, rest) = text.split_once(':').unwrap_or((text.as_str(), ""));

    let style = if outcome.should_run() {
        Style::new().yellow().bold()
    } else {
        Style::new().green().bold()
    };
    format!(
        "{}:{}",
        label.if_supports_color(Stream::Stdout, |t| t.style(style)),
        rest
    )
}
