//! `loopcart` CLI entry point

use std::{io, process::ExitCode};

use clap::Parser;
use loopcart::cli::{Cli, logging};

/// Parse configuration, initialise logging and run one subcommand.
pub fn main() -> ExitCode {
    // Load .env file if present (ignore if missing)
    _ = dotenvy::dotenv();

    let cli = Cli::parse();

    logging::init(&cli.config.log_level);

    let stdout = io::stdout();

    match cli.run(stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            #[expect(
                clippy::print_stderr,
                reason = "command errors are reported to the user, not logged"
            )]
            {
                eprintln!("{error}");
            }

            ExitCode::FAILURE
        }
    }
}
