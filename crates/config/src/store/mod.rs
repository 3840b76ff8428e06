//! Propagation targets and the stores backing them.
//!
//! Responsibilities:
//! - Define the `VariableStore` capability (`get`, `set`, `exists`) every
//!   propagation target is written through.
//! - Name the targets (`TargetKind`) and the per-target skip policy.
//! - Provide the process environment and shared in-memory stores.
//!
//! Does NOT handle:
//! - Collision and overwrite decisions (see `loader::propagate`).
//!
//! Invariants:
//! - Stores never validate keys; the loader only writes parsed or filtered keys.

mod memory;
mod process;

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

pub use memory::MemoryStore;
pub use process::ProcessEnv;

use crate::value::Value;

/// A key/value table the loader can write variables into.
pub trait VariableStore: fmt::Debug + Send {
    /// Current value for `key`, if any.
    fn get(&self, key: &str) -> Option<Value>;

    /// Write `value` under `key`, replacing any existing value.
    fn set(&mut self, key: &str, value: &Value);

    fn exists(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Why this store cannot hold `key` with `value`, if it cannot.
    ///
    /// The loader checks every entry before writing it, so `set` is only
    /// called with entries this returns `None` for.
    fn rejects(&self, _key: &str, _value: &Value) -> Option<&'static str> {
        None
    }
}

/// The named propagation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum TargetKind {
    /// Write-once named constants.
    #[serde(rename = "define")]
    Define,
    /// The real process environment.
    #[serde(rename = "putenv")]
    Putenv,
    /// In-memory environment table.
    #[serde(rename = "toEnv")]
    ToEnv,
    /// In-memory server/request context table.
    #[serde(rename = "toServer")]
    ToServer,
    /// Host web server variable store.
    #[serde(rename = "apacheSetenv")]
    ApacheSetenv,
}

impl TargetKind {
    pub const ALL: [TargetKind; 5] = [
        TargetKind::Define,
        TargetKind::Putenv,
        TargetKind::ToEnv,
        TargetKind::ToServer,
        TargetKind::ApacheSetenv,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetKind::Define => "define",
            TargetKind::Putenv => "putenv",
            TargetKind::ToEnv => "toEnv",
            TargetKind::ToServer => "toServer",
            TargetKind::ApacheSetenv => "apacheSetenv",
        }
    }

    fn flag(self) -> SkipPolicy {
        match self {
            TargetKind::Define => SkipPolicy::DEFINE,
            TargetKind::Putenv => SkipPolicy::PUTENV,
            TargetKind::ToEnv => SkipPolicy::TO_ENV,
            TargetKind::ToServer => SkipPolicy::TO_SERVER,
            TargetKind::ApacheSetenv => SkipPolicy::APACHE_SETENV,
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TargetKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "Invalid target: {}. Valid options: define, putenv, toEnv, toServer, apacheSetenv",
                    s
                )
            })
    }
}

bitflags::bitflags! {
    /// Targets that silently keep existing values instead of failing on a
    /// collision.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct SkipPolicy: u8 {
        const DEFINE = 1 << 0;
        const PUTENV = 1 << 1;
        const TO_ENV = 1 << 2;
        const TO_SERVER = 1 << 3;
        const APACHE_SETENV = 1 << 4;
    }
}

impl SkipPolicy {
    /// Build a policy from target kinds. An empty list marks every target.
    pub fn from_targets<I: IntoIterator<Item = TargetKind>>(targets: I) -> Self {
        let policy = targets
            .into_iter()
            .fold(SkipPolicy::empty(), |acc, kind| acc | kind.flag());
        if policy.is_empty() {
            SkipPolicy::all()
        } else {
            policy
        }
    }

    pub fn skips(&self, kind: TargetKind) -> bool {
        self.contains(kind.flag())
    }

    /// Targets currently marked as skip-on-collision, in declaration order.
    pub fn targets(&self) -> Vec<TargetKind> {
        TargetKind::ALL
            .into_iter()
            .filter(|kind| self.skips(*kind))
            .collect()
    }
}
