//! Resolution of the environment file among candidate paths.
//!
//! Invariants:
//! - Candidates are tried strictly in order; the first one that exists, is
//!   not a directory, and can be read wins.
//! - Problems with earlier candidates are not reported when a later one wins.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::LoaderError;

/// Read the first usable candidate.
///
/// # Errors
///
/// With a single candidate, the specific problem (`FileNotFound`,
/// `IsDirectory`, `Unreadable`). With zero or several candidates,
/// `NoReadableFile` listing them all.
pub(crate) fn read_first_readable(candidates: &[PathBuf]) -> Result<(PathBuf, String), LoaderError> {
    let mut last_error = None;

    for path in candidates {
        match read_candidate(path) {
            Ok(contents) => return Ok((path.clone(), contents)),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Skipping environment file candidate");
                last_error = Some(e);
            }
        }
    }

    match (candidates.len(), last_error) {
        (1, Some(e)) => Err(e),
        _ => Err(LoaderError::NoReadableFile {
            candidates: candidates.to_vec(),
        }),
    }
}

fn read_candidate(path: &Path) -> Result<String, LoaderError> {
    let metadata = match fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(LoaderError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(_) => {
            return Err(LoaderError::Unreadable {
                path: path.to_path_buf(),
            });
        }
    };

    if metadata.is_dir() {
        return Err(LoaderError::IsDirectory {
            path: path.to_path_buf(),
        });
    }

    let bytes = fs::read(path).map_err(|_| LoaderError::Unreadable {
        path: path.to_path_buf(),
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
