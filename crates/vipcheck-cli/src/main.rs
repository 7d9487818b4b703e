//! vipcheck CLI
//!
//! Reports BIG-IP virtual servers whose iRule order differs from the
//! Terraform declarations.

mod cli;
mod commands;
mod error;
mod logging;

use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use commands::Outcome;
use error::{CliError, Result};

/// Divergences were found
const EXIT_DIVERGED: u8 = 1;
/// The run could not complete
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    match run() {
        Ok(Outcome::Clean) => ExitCode::SUCCESS,
        Ok(Outcome::Diverged) => ExitCode::from(EXIT_DIVERGED),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{}: {}", "hint".cyan(), hint);
            }
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run() -> Result<Outcome> {
    let cli = Cli::parse();

    logging::init(cli.verbose)
        .map_err(|e| CliError::user(format!("Failed to initialise logging: {e}")))?;
    tracing::debug!("Verbose mode enabled");

    execute_command(cli.command)
}

fn execute_command(cmd: Commands) -> Result<Outcome> {
    match cmd {
        Commands::Check {
            device,
            source,
            json,
        } => commands::run_check(&device, &source, json),
        Commands::Declared { source } => commands::run_declared(&source),
    }
}
