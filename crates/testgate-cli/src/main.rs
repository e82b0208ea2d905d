//! testgate - skip Go test suites whose dependencies did not change.
//!
//! Parses arguments, initializes logging and runs the analysis. The process
//! exits with 0 (SKIP), 1 (RUN) or 2 (ERROR).

use std::process::ExitCode;

use clap::Parser;
use testgate_cli::{EXIT_ERROR, cli, commands, error, logger, ui};

fn main() -> ExitCode {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);
    if args.no_color {
        let _ = miette::set_hook(Box::new(|_| {
            Box::new(miette::MietteHandlerOpts::new().color(false).build())
        }));
    }

    match commands::run_execute(&args) {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            eprintln!("{:?}", error::cli_error_to_miette(err));
            ExitCode::from(EXIT_ERROR)
        }
    }
}
