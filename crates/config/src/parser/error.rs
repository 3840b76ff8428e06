//! Error types for dotenv parsing.
//!
//! Invariants:
//! - Errors identify the offending key and line, never the raw value, so
//!   secrets from the file cannot leak into logs or terminal output.

use thiserror::Error;

/// Errors produced while parsing dotenv text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A key starts with a digit and the parser runs with `KeyPolicy::Strict`.
    #[error("Invalid key '{key}' on line {line}: keys must not start with a digit")]
    InvalidKey { key: String, line: usize },
}
