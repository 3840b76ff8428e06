//! Required-key validation.
//!
//! Responsibilities:
//! - Report which requested keys are absent from a mapping.
//! - Offer a standalone checker with raising and non-raising modes.
//!
//! Invariants:
//! - Missing keys are reported in the order they were requested.
//! - A key whose value is `Null` counts as missing.

use tracing::warn;

use crate::error::LoaderError;
use crate::value::EnvMap;

/// Check that every key in `keys` is present (and not `Null`) in `env`.
///
/// # Errors
///
/// - `LoaderError::NoExpectedKeys` when `keys` is empty.
/// - `LoaderError::MissingKeys` listing the absent keys in input order.
pub fn require_keys<I, K>(env: &EnvMap, keys: I) -> Result<(), LoaderError>
where
    I: IntoIterator<Item = K>,
    K: AsRef<str>,
{
    let mut requested = 0usize;
    let mut missing = Vec::new();

    for key in keys {
        requested += 1;
        let key = key.as_ref();
        if env.get(key).is_none_or(|v| v.is_null()) {
            missing.push(key.to_string());
        }
    }

    if requested == 0 {
        return Err(LoaderError::NoExpectedKeys);
    }
    if !missing.is_empty() {
        return Err(LoaderError::MissingKeys { missing });
    }
    Ok(())
}

/// Standalone expectation checker over a borrowed mapping.
#[derive(Debug, Clone, Copy)]
pub struct Expect<'a> {
    env: &'a EnvMap,
    raise: bool,
}

impl<'a> Expect<'a> {
    pub fn new(env: &'a EnvMap, raise: bool) -> Self {
        Self { env, raise }
    }

    /// Check that every key is present.
    ///
    /// Returns `Ok(true)` on success. In non-raising mode failures are logged
    /// and reported as `Ok(false)`; in raising mode they are returned as `Err`.
    pub fn check<I, K>(&self, keys: I) -> Result<bool, LoaderError>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        match require_keys(self.env, keys) {
            Ok(()) => Ok(true),
            Err(e) if self.raise => Err(e),
            Err(e) => {
                warn!(error = %e, "Expectation failed");
                Ok(false)
            }
        }
    }
}
