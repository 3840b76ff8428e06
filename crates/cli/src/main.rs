//! envrelay - Command-line interface for dotenv files.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Load, filter, and validate environment files via the shared config library.
//! - Print variables in various output formats or run commands with them.
//!
//! Does NOT handle:
//! - Parsing or propagation logic (see `crates/config`).
//!
//! Invariants:
//! - Logs go to stderr so `show` output on stdout stays machine-readable.
//! - Failures map to structured exit codes (see `error`).

mod args;
mod commands;
mod dispatch;
mod error;
mod formatters;

use args::Cli;
use clap::Parser;
use dispatch::run_command;
use error::ExitCodeExt;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let exit_code = match run_command(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{:#}", e);
            e.exit_code().as_i32()
        }
    };

    std::process::exit(exit_code);
}
