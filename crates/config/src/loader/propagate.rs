//! Writing a mapping into propagation targets.
//!
//! Responsibilities:
//! - Hold the store attached to each `TargetKind`.
//! - Write every entry of a mapping into one store, honoring the prefix, the
//!   overwrite flag, and the skip policy.
//!
//! Invariants:
//! - Entries are written in mapping order.
//! - A collision or rejected entry stops the write; entries written before it
//!   remain.

use tracing::debug;

use crate::error::LoaderError;
use crate::store::{MemoryStore, ProcessEnv, SkipPolicy, TargetKind, VariableStore};
use crate::value::EnvMap;

/// The store attached to each target.
///
/// `define` is a write-once table, `putenv` the real process environment,
/// `toEnv` and `toServer` are in-memory tables. No web-server store exists
/// unless one is attached.
#[derive(Debug)]
pub(crate) struct Stores {
    define: Box<dyn VariableStore>,
    putenv: Box<dyn VariableStore>,
    env: Box<dyn VariableStore>,
    server: Box<dyn VariableStore>,
    apache: Option<Box<dyn VariableStore>>,
}

impl Default for Stores {
    fn default() -> Self {
        Self {
            define: Box::new(MemoryStore::write_once()),
            putenv: Box::new(ProcessEnv::new()),
            env: Box::new(MemoryStore::new()),
            server: Box::new(MemoryStore::new()),
            apache: None,
        }
    }
}

impl Stores {
    pub(crate) fn attach(&mut self, kind: TargetKind, store: Box<dyn VariableStore>) {
        match kind {
            TargetKind::Define => self.define = store,
            TargetKind::Putenv => self.putenv = store,
            TargetKind::ToEnv => self.env = store,
            TargetKind::ToServer => self.server = store,
            TargetKind::ApacheSetenv => self.apache = Some(store),
        }
    }

    pub(crate) fn get(&self, kind: TargetKind) -> Option<&dyn VariableStore> {
        match kind {
            TargetKind::Define => Some(self.define.as_ref()),
            TargetKind::Putenv => Some(self.putenv.as_ref()),
            TargetKind::ToEnv => Some(self.env.as_ref()),
            TargetKind::ToServer => Some(self.server.as_ref()),
            TargetKind::ApacheSetenv => self.apache.as_deref(),
        }
    }

    pub(crate) fn get_mut(
        &mut self,
        kind: TargetKind,
    ) -> Option<&mut (dyn VariableStore + 'static)> {
        match kind {
            TargetKind::Define => Some(self.define.as_mut()),
            TargetKind::Putenv => Some(self.putenv.as_mut()),
            TargetKind::ToEnv => Some(self.env.as_mut()),
            TargetKind::ToServer => Some(self.server.as_mut()),
            TargetKind::ApacheSetenv => self.apache.as_deref_mut(),
        }
    }
}

/// Prepend `prefix` to `key`. An empty or absent prefix leaves `key` as is.
pub(crate) fn prefixed_key(prefix: Option<&str>, key: &str) -> String {
    match prefix {
        Some(p) if !p.is_empty() => format!("{p}{key}"),
        _ => key.to_string(),
    }
}

/// Write every entry of `env` into `store`.
///
/// Returns the number of entries written.
///
/// # Errors
///
/// - `LoaderError::InvalidTargetEntry` when the store cannot represent an
///   entry (for example an empty key in the process environment).
/// - `LoaderError::Collision` when the store already holds a key, `overwrite`
///   is false, and `skip` does not cover `kind`.
pub(crate) fn propagate(
    env: &EnvMap,
    store: &mut dyn VariableStore,
    kind: TargetKind,
    prefix: Option<&str>,
    overwrite: bool,
    skip: SkipPolicy,
) -> Result<usize, LoaderError> {
    let mut written = 0usize;

    for (key, value) in env.iter() {
        let key = prefixed_key(prefix, key);
        if let Some(reason) = store.rejects(&key, value) {
            return Err(LoaderError::InvalidTargetEntry {
                target: kind,
                key,
                reason,
            });
        }
        if !overwrite && store.exists(&key) {
            if skip.skips(kind) {
                debug!(store = %kind, key = %key, "Keeping existing value");
                continue;
            }
            return Err(LoaderError::Collision { target: kind, key });
        }
        store.set(&key, value);
        written += 1;
    }

    debug!(store = %kind, written, "Propagated variables");
    Ok(written)
}
