//! Tests for the environment file loader.
//!
//! Responsibilities:
//! - Test file resolution and parsing through the `Loader`.
//! - Test the parsed-state requirement and error suppression.
//! - Test propagation into every target, including the process environment.
//! - Test option-driven loading.
//!
//! Invariants:
//! - Tests touching the process environment use `serial_test` and
//!   `temp_env` so variables are restored afterwards.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::fs;
use std::path::{Path, PathBuf};


/// The four-variable fixture most tests start from.
pub const BASIC_ENV: &str = "FOO=bar\nBAR=baz\nSPACED=\"with spaces\"\n\nEQUALS=\"pgsql:host=localhost;dbname=test\"\n";

/// Write `contents` to `dir/name` and return the path.
pub fn write_env(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("Failed to write env fixture");
    path
}
