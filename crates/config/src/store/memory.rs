//! Shared in-memory variable table.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::value::Value;

use super::VariableStore;

/// An in-memory key/value table.
///
/// Clones share the same table, so a caller can keep a handle to a store it
/// hands to a `Loader` and inspect what was written. A write-once store keeps
/// the first value written for a key, which models named constants.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    table: Arc<Mutex<BTreeMap<String, Value>>>,
    write_once: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose keys cannot be rebound once written.
    pub fn write_once() -> Self {
        Self {
            table: Arc::default(),
            write_once: true,
        }
    }

    /// Seed a store from existing pairs.
    pub fn with_vars<K, I>(vars: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let store = Self::new();
        {
            let mut table = store.lock();
            for (k, v) in vars {
                table.insert(k.into(), v);
            }
        }
        store
    }

    /// Snapshot of the table contents.
    pub fn snapshot(&self) -> BTreeMap<String, Value> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, Value>> {
        // A panic while holding the lock cannot leave the map half-written.
        self.table.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl VariableStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.lock().get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &Value) {
        let mut table = self.lock();
        if self.write_once && table.contains_key(key) {
            return;
        }
        table.insert(key.to_string(), value.clone());
    }

    fn exists(&self, key: &str) -> bool {
        self.lock().contains_key(key)
    }
}
