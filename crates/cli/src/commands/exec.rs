//! Exec command implementation.
//!
//! Responsibilities:
//! - Merge the loaded variables into a copy of the current environment.
//! - Run the requested command with that environment and report its exit code.
//!
//! Does NOT handle:
//! - Mutating envrelay's own process environment.

use anyhow::{Context, Result};
use envrelay_config::{Loader, MemoryStore, TargetKind, Value};
use std::process::Command;
use tracing::debug;

use crate::error::ExitCode;

/// Write the loaded variables into `env` and run `argv` with it.
///
/// `env` must be the store attached to the loader's `toEnv` target.
/// Returns the child's exit code.
pub fn run(
    loader: &mut Loader,
    env: &MemoryStore,
    argv: &[String],
    overwrite: bool,
    skip_existing: bool,
) -> Result<i32> {
    if skip_existing {
        loader.skip_existing([TargetKind::ToEnv]);
    }
    loader.to_env(overwrite)?;

    let (program, args) = argv.split_first().context("No command given")?;
    let vars = env.snapshot();
    debug!(program = %program, vars = vars.len(), "Running command");

    let status = Command::new(program)
        .args(args)
        .env_clear()
        .envs(vars.iter().map(|(k, v)| (k, v.to_env_string().into_owned())))
        .status()
        .with_context(|| format!("Failed to run '{program}'"))?;

    Ok(status.code().unwrap_or(ExitCode::GeneralError.as_i32()))
}

/// Seed a store with the current process environment.
///
/// Variables whose name or value is not valid Unicode are skipped.
pub fn current_environment() -> MemoryStore {
    MemoryStore::with_vars(std::env::vars_os().filter_map(|(key, value)| {
        Some((key.into_string().ok()?, Value::from(value.into_string().ok()?)))
    }))
}
