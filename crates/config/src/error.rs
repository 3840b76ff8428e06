//! Error types for loading and propagating environment files.
//!
//! Responsibilities:
//! - Define one error enum for every failure of the loader and its pipeline.
//! - Classify each variant into an `ErrorKind` for callers that branch on it.
//!
//! Does NOT handle:
//! - Deciding whether an error is raised or suppressed (see `loader::Loader`).
//!
//! Invariants:
//! - Messages name the offending key, path, target, or filter.
//! - Messages never include raw values read from an environment file.

use std::path::PathBuf;

use thiserror::Error;

use crate::parser::ParseError;
use crate::store::TargetKind;

/// Broad classification of a `LoaderError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Configuration,
    NotFound,
    State,
    Validation,
    Collision,
    Parse,
}

/// Errors that can occur while loading, filtering, validating, or
/// propagating an environment file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoaderError {
    #[error("Unknown filter '{0}'")]
    UnknownFilter(String),

    #[error("Invalid configuration for filter {filter}: {message}")]
    InvalidFilterConfig {
        filter: &'static str,
        message: String,
    },

    #[error("Target {0} is not available in this runtime")]
    TargetUnavailable(TargetKind),

    #[error("Environment file '{}' is not found", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Environment file '{}' is a directory. Should be a file", path.display())]
    IsDirectory { path: PathBuf },

    #[error("Environment file '{}' is not readable", path.display())]
    Unreadable { path: PathBuf },

    #[error("No readable environment file among: {}", format_paths(candidates))]
    NoReadableFile { candidates: Vec<PathBuf> },

    #[error("Environment must be parsed before calling {method}()")]
    NotParsed { method: &'static str },

    #[error("No arguments were passed to expect()")]
    NoExpectedKeys,

    #[error("Required ENV vars missing: ['{}']", missing.join("', '"))]
    MissingKeys { missing: Vec<String> },

    #[error("Key \"{key}\" has already been defined in {target}")]
    Collision { target: TargetKind, key: String },

    #[error("Key \"{}\" cannot be written to {target}: {reason}", key.escape_debug())]
    InvalidTargetEntry {
        target: TargetKind,
        key: String,
        reason: &'static str,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl LoaderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LoaderError::UnknownFilter(_)
            | LoaderError::InvalidFilterConfig { .. }
            | LoaderError::TargetUnavailable(_)
            | LoaderError::InvalidTargetEntry { .. } => ErrorKind::Configuration,
            LoaderError::FileNotFound { .. }
            | LoaderError::IsDirectory { .. }
            | LoaderError::Unreadable { .. }
            | LoaderError::NoReadableFile { .. } => ErrorKind::NotFound,
            LoaderError::NotParsed { .. } => ErrorKind::State,
            LoaderError::NoExpectedKeys | LoaderError::MissingKeys { .. } => {
                ErrorKind::Validation
            }
            LoaderError::Collision { .. } => ErrorKind::Collision,
            LoaderError::Parse(_) => ErrorKind::Parse,
        }
    }
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("'{}'", p.display()))
        .collect::<Vec<_>>()
        .join(", ")
}
