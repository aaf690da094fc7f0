mod cli;
mod commands;
mod error;
mod report;

use clap::Parser;
use std::process::ExitCode;

use cli::Cli;

fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();
    log::debug!("calibrator v{}", env!("CARGO_PKG_VERSION"));

    match commands::run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
