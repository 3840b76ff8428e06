//! Underscore-delimited keys into nested tables.

use crate::value::{EnvMap, Value};

/// Reinterpret every key as an `_`-separated path and merge all paths into
/// one nested table.
///
/// `A_B_C=v` becomes `A → B → C → v`. Table/table conflicts merge
/// recursively; any other conflict takes the newest value.
pub(crate) fn nest_underscored(env: EnvMap) -> EnvMap {
    let mut result = EnvMap::new();
    for (flat, value) in env {
        let path: Vec<&str> = flat.split('_').collect();
        let child = path
            .iter()
            .rev()
            .fold(value, |acc, segment| {
                Value::Table([(*segment, acc)].into_iter().collect())
            });
        if let Value::Table(child) = child {
            merge(&mut result, child);
        }
    }
    result
}

/// Recursively merge `incoming` into `target`.
fn merge(target: &mut EnvMap, incoming: EnvMap) {
    for (key, value) in incoming {
        match value {
            Value::Table(nested) => match target.get_mut(&key) {
                Some(Value::Table(existing)) => merge(existing, nested),
                _ => {
                    target.insert(key, Value::Table(nested));
                }
            },
            leaf => {
                target.insert(key, leaf);
            }
        }
    }
}
