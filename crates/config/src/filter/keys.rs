//! Key-renaming filters.

use crate::error::LoaderError;
use crate::value::{EnvMap, Value};

/// Lowercase every key. Later entries win when two keys collapse together.
pub(crate) fn lowercase_keys(env: EnvMap) -> EnvMap {
    env.into_iter()
        .map(|(k, v)| (k.to_lowercase(), v))
        .collect()
}

/// Uppercase the first character of every key.
pub(crate) fn uppercase_first_keys(env: EnvMap) -> EnvMap {
    env.into_iter().map(|(k, v)| (ucfirst(&k), v)).collect()
}

fn ucfirst(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Check that a remap configuration is a table of string targets.
pub(crate) fn validate_remap_config(config: Option<&Value>) -> Result<(), LoaderError> {
    let invalid = |message: String| LoaderError::InvalidFilterConfig {
        filter: "RemapKeysFilter",
        message,
    };

    let table = match config {
        Some(Value::Table(table)) => table,
        Some(_) => return Err(invalid("expected a table of old key to new key".to_string())),
        None => return Err(invalid("missing key mapping".to_string())),
    };

    match table.iter().find(|(_, new)| new.as_str().is_none()) {
        Some((old, _)) => Err(invalid(format!("new name for '{old}' must be a string"))),
        None => Ok(()),
    }
}

/// Rename keys per the `old → new` pairs in `config`, in config order.
pub(crate) fn remap_keys(mut env: EnvMap, config: Option<&Value>) -> EnvMap {
    let Some(table) = config.and_then(Value::as_table) else {
        return env;
    };

    for (old, new) in table.iter() {
        let Some(new) = new.as_str() else {
            continue;
        };
        if old == new {
            continue;
        }
        if let Some(value) = env.get(old).cloned() {
            env.insert(new, value);
            env.remove(old);
        }
    }
    env
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> EnvMap {
        pairs.iter().map(|(k, v)| (*k, Value::from(*v))).collect()
    }

    #[test]
    fn test_lowercase_keys() {
        let out = lowercase_keys(env(&[("FOO", "bar"), ("Mixed_Case", "x")]));
        assert_eq!(out, env(&[("foo", "bar"), ("mixed_case", "x")]));
    }

    #[test]
    fn test_lowercase_collision_last_wins() {
        let out = lowercase_keys(env(&[("FOO", "upper"), ("foo", "lower")]));
        assert_eq!(out, env(&[("foo", "lower")]));
    }

    #[test]
    fn test_uppercase_first_keys() {
        let out = uppercase_first_keys(env(&[("foo", "bar"), ("fOO_bar", "x"), ("", "e")]));
        assert_eq!(out, env(&[("Foo", "bar"), ("FOO_bar", "x"), ("", "e")]));
    }

    #[test]
    fn test_remap_keys_renames_present_keys() {
        let config = Value::Table(env(&[("FOO", "QUX"), ("MISSING", "NEVER")]));
        let out = remap_keys(env(&[("FOO", "bar"), ("BAZ", "1")]), Some(&config));
        assert_eq!(out, env(&[("BAZ", "1"), ("QUX", "bar")]));
    }

    #[test]
    fn test_remap_keys_applies_pairs_in_order() {
        let config = Value::Table(env(&[("A", "B"), ("B", "C")]));
        let out = remap_keys(env(&[("A", "a"), ("B", "b")]), Some(&config));
        // A's value lands on B, then B (now holding "a") moves to C.
        assert_eq!(out, env(&[("C", "a")]));
    }

    #[test]
    fn test_remap_to_same_name_keeps_key() {
        let config = Value::Table(env(&[("A", "A")]));
        let out = remap_keys(env(&[("A", "a")]), Some(&config));
        assert_eq!(out, env(&[("A", "a")]));
    }

    #[test]
    fn test_validate_remap_config() {
        assert!(validate_remap_config(Some(&Value::Table(env(&[("A", "B")])))).is_ok());
        assert!(validate_remap_config(None).is_err());
        assert!(validate_remap_config(Some(&Value::from("A=B"))).is_err());

        let bad: EnvMap = [("A", Value::Integer(1))].into_iter().collect();
        let err = validate_remap_config(Some(&Value::Table(bad))).unwrap_err();
        assert!(err.to_string().contains("'A'"));
    }
}
