//! `jay` command-line entry point.
//!
//! # Responsibility
//! - Parse arguments, resolve configuration and start logging.
//! - Hand the parsed command to `commands::run`.

mod cli;
mod commands;
mod config;

use clap::Parser;
use cli::Cli;
use config::Config;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::resolve(&cli.global) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(2);
        }
    };

    // A broken log directory must not block the command.
    if let Err(err) = jay_core::init_logging(&config.log_level, &config.log_dir.to_string_lossy())
    {
        eprintln!("warning: logging disabled: {err}");
    }

    commands::run(&config, cli.command)
}
