//! Shared test utilities for envrelay integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory running inside a scratch directory.
//! - Write environment files into that directory.
//!
//! Invariants / Assumptions:
//! - No test reads the developer's `./.env` or per-user config directory.
//! - `ENVRELAY_*` variables from the host never leak into a test run.

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Returns a hermetic `envrelay` command whose working directory is `dir`.
///
/// It ensures:
/// - `ENVRELAY_FILE` and `ENVRELAY_PREFIX` are cleared.
/// - `ENVRELAY_CONFIG_DIR` points inside `dir`, so the per-user fallback
///   file is only found when a test writes it.
pub fn envrelay_cmd(dir: &Path) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("envrelay");

    cmd.current_dir(dir)
        .env("ENVRELAY_CONFIG_DIR", dir.join("user-config"))
        .env_remove("ENVRELAY_FILE")
        .env_remove("ENVRELAY_PREFIX")
        .env_remove("RUST_LOG");

    cmd
}

/// Creates a scratch directory containing `.env` with `contents`.
pub fn dir_with_env(contents: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), ".env", contents);
    dir
}

/// Writes `contents` to `dir/name`, creating parent directories.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, contents).unwrap();
    path
}
