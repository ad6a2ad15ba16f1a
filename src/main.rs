//! Entry point for the locale-sync command-line tool.

use std::process::ExitCode;

use clap::Parser;
use locale_sync::cli::Cli;
use locale_sync::logging;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    let _guard = logging::init(verbose, cli.log_file.as_deref());

    match cli.run() {
        Ok(summary) => {
            summary.report(verbose);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
