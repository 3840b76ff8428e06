//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map `LoaderError` kinds to appropriate exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Exit codes 1-7 are reserved for specific error categories.
//! - `exec` passes the child's own exit code through unchanged.

use envrelay_config::{ErrorKind, LoaderError};

/// Structured exit codes for envrelay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// Configuration error - unknown filter, bad filter config, missing target.
    ///
    /// Scripts should fix the invocation.
    ConfigurationError = 2,

    /// Collision - a key already exists in the target and may not be replaced.
    ///
    /// Scripts may retry with `--overwrite` or `--skip-existing`.
    Collision = 3,

    /// No usable environment file among the candidates.
    NotFound = 4,

    /// Validation error - required keys are missing.
    ValidationError = 5,

    /// Parse error - the environment file was rejected (strict keys).
    ParseError = 6,

    /// State error - an operation ran before the file was parsed.
    StateError = 7,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<ErrorKind> for ExitCode {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Configuration => ExitCode::ConfigurationError,
            ErrorKind::Collision => ExitCode::Collision,
            ErrorKind::NotFound => ExitCode::NotFound,
            ErrorKind::Validation => ExitCode::ValidationError,
            ErrorKind::Parse => ExitCode::ParseError,
            ErrorKind::State => ExitCode::StateError,
        }
    }
}

impl From<&LoaderError> for ExitCode {
    fn from(err: &LoaderError) -> Self {
        ExitCode::from(err.kind())
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Extract the appropriate exit code from this error.
    ///
    /// Returns ExitCode::GeneralError if no `LoaderError` is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        self.chain()
            .find_map(|cause| cause.downcast_ref::<LoaderError>())
            .map_or(ExitCode::GeneralError, ExitCode::from)
    }
}
