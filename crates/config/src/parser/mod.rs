//! Dotenv text parser.
//!
//! Responsibilities:
//! - Split text into lines (LF, CR, and CRLF, mixed freely).
//! - Skip blank lines, comment lines, and lines that are not assignments.
//! - Validate keys according to the configured `KeyPolicy`.
//! - Process values (quoting, escapes, coercion) and interpolate `${KEY}`.
//!
//! Does NOT handle:
//! - Reading files or choosing between candidate paths (see `loader`).
//! - Writing variables anywhere (see `store` and `loader`).
//!
//! Invariants:
//! - Later assignments of a key overwrite earlier ones in place.
//! - Interpolation only sees keys assigned on earlier lines.
//! - Log output never includes raw values.

mod error;
mod interpolate;
mod scalar;

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use tracing::debug;

pub use error::ParseError;
pub use interpolate::interpolate;

use crate::value::{EnvMap, Value};
use scalar::Processed;

static ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:export\s+)?([A-Za-z0-9_]+)\s*=\s*(.*)$").expect("assignment pattern is valid")
});

/// How keys starting with a digit are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyPolicy {
    /// Silently drop the line.
    #[default]
    Lenient,
    /// Fail the whole parse with `ParseError::InvalidKey`.
    Strict,
}

/// Dotenv parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser {
    key_policy: KeyPolicy,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key_policy(mut self, policy: KeyPolicy) -> Self {
        self.key_policy = policy;
        self
    }

    pub fn key_policy(&self) -> KeyPolicy {
        self.key_policy
    }

    /// Parse dotenv text into an ordered mapping.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidKey` for a digit-leading key when the key
    /// policy is `Strict`. Nothing else fails; malformed lines are skipped.
    pub fn parse(&self, contents: &str) -> Result<EnvMap, ParseError> {
        let mut env = EnvMap::new();
        let mut skipped = 0usize;

        for (idx, line) in split_lines(contents).enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some(caps) = ASSIGNMENT.captures(line) else {
                debug!(line = idx + 1, "Skipping line that is not an assignment");
                skipped += 1;
                continue;
            };

            let key = &caps[1];
            if key.starts_with(|c: char| c.is_ascii_digit()) {
                match self.key_policy {
                    KeyPolicy::Strict => {
                        return Err(ParseError::InvalidKey {
                            key: key.to_string(),
                            line: idx + 1,
                        });
                    }
                    KeyPolicy::Lenient => {
                        debug!(line = idx + 1, key, "Dropping key that starts with a digit");
                        skipped += 1;
                        continue;
                    }
                }
            }

            let value = match scalar::process(caps[2].trim()) {
                Processed::Scalar(v) => v,
                Processed::Text(s) => Value::String(interpolate(&s, &env)),
            };
            env.insert(key, value);
        }

        debug!(keys = env.len(), skipped, "Parsed dotenv contents");
        Ok(env)
    }
}

/// Parse `contents` with the default (lenient) parser.
pub fn parse(contents: &str) -> Result<EnvMap, ParseError> {
    Parser::new().parse(contents)
}

/// Split on `\r\n`, `\r`, or `\n`, yielding one item per logical line.
fn split_lines(contents: &str) -> impl Iterator<Item = &str> {
    let mut rest = contents;
    let mut done = contents.is_empty();
    std::iter::from_fn(move || {
        if done {
            return None;
        }
        match rest.find(['\r', '\n']) {
            Some(pos) => {
                let line = &rest[..pos];
                let sep_len = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[pos + sep_len..];
                Some(line)
            }
            None => {
                done = true;
                Some(rest)
            }
        }
    })
}
