//! `${KEY}` substitution against the variables defined earlier in a file.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::constants::UNDEFINED_PLACEHOLDER;
use crate::value::EnvMap;

static REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([A-Za-z0-9_]+)\}").expect("reference pattern is valid"));

/// Replace every `${KEY}` in `value` with the current value of `KEY` in `env`.
///
/// Single pass: substituted text is not scanned again. Unknown keys become
/// [`UNDEFINED_PLACEHOLDER`].
pub fn interpolate(value: &str, env: &EnvMap) -> String {
    if !value.contains("${") {
        return value.to_string();
    }

    REFERENCE
        .replace_all(value, |caps: &Captures<'_>| match env.get(&caps[1]) {
            Some(v) => v.to_env_string().into_owned(),
            None => UNDEFINED_PLACEHOLDER.to_string(),
        })
        .into_owned()
}
