//! The real process environment as a variable store.

use tracing::warn;

use crate::value::Value;

use super::VariableStore;

/// Reads and writes the process environment via `std::env`.
///
/// Values are written in their string rendering (see
/// [`Value::to_env_string`]) and always read back as strings. Keys must be
/// non-empty and free of `=` and NUL; values must be free of NUL.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl ProcessEnv {
    pub fn new() -> Self {
        Self
    }
}

fn invalid_key(key: &str) -> Option<&'static str> {
    if key.is_empty() {
        Some("key is empty")
    } else if key.contains('=') {
        Some("key contains '='")
    } else if key.contains('\0') {
        Some("key contains a NUL byte")
    } else {
        None
    }
}

impl VariableStore for ProcessEnv {
    fn get(&self, key: &str) -> Option<Value> {
        if invalid_key(key).is_some() {
            return None;
        }
        std::env::var(key).ok().map(Value::String)
    }

    fn set(&mut self, key: &str, value: &Value) {
        if let Some(reason) = self.rejects(key, value) {
            warn!(key = %key.escape_debug(), reason, "Refusing to write process environment entry");
            return;
        }
        // SAFETY: the loader is single-threaded and callers that attach a
        // ProcessEnv must not read or write the environment concurrently.
        unsafe {
            std::env::set_var(key, value.to_env_string().as_ref());
        }
    }

    fn exists(&self, key: &str) -> bool {
        invalid_key(key).is_none() && std::env::var_os(key).is_some()
    }

    fn rejects(&self, key: &str, value: &Value) -> Option<&'static str> {
        invalid_key(key).or_else(|| {
            value
                .to_env_string()
                .contains('\0')
                .then_some("value contains a NUL byte")
        })
    }
}
