//! Dispatch operator CLI.
//!
//! Main entry point for the `dispatch` binary.

use std::process::ExitCode;

use clap::Parser;
use dispatch_common_log::{LogConfig, LogLevel};
use tracing::error;

mod cli;
mod commands;
mod error;
mod output;

use cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut log_config = LogConfig::from_env();
    log_config.level = match cli.verbose {
        0 => LogLevel::Warn,
        1 => LogLevel::Info,
        2 => LogLevel::Debug,
        _ => LogLevel::Trace,
    };
    if let Err(e) = dispatch_common_log::init(log_config) {
        eprintln!("{e}");
    }

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(cli.execute()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            e.exit_code()
        }
    }
}
