//! Property-based tests for the dotenv parser.
//!
//! These tests verify parsing invariants over randomly generated keys and
//! values, catching edge cases that hand-written fixtures miss.
//!
//! Test coverage:
//! - Plain values: unquoted tokens round-trip exactly
//! - Integers: digit-only tokens become `Integer`
//! - Comments: any whitespace run before `#` strips the comment
//! - Quoted values: content between quotes is preserved, spaces included
//! - Duplicate keys: last assignment wins, first position kept
//! - Loader: `to_array` is stable across calls

use proptest::prelude::*;

use envrelay_config::{Loader, Value, parse};

/// Strategy for generating valid keys.
fn key_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z_][A-Za-z0-9_]{0,15}".prop_map(String::from)
}

/// Strategy for plain values that need no quoting and are not keywords.
fn plain_value_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9_./:@-]{0,24}"
        .prop_filter("keywords are coerced", |v| {
            !matches!(v.as_str(), "true" | "false" | "null")
        })
        .prop_map(String::from)
}

/// Strategy for quoted content: letters, digits, and inner spaces.
fn quoted_content_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 ,;:=]{0,30}".prop_map(String::from)
}

proptest! {
    #[test]
    fn prop_plain_value_round_trips(key in key_strategy(), value in plain_value_strategy()) {
        let env = parse(&format!("{key}={value}")).unwrap();
        prop_assert_eq!(env.get(&key).cloned(), Some(Value::String(value)));
    }

    #[test]
    fn prop_digit_tokens_become_integers(key in key_strategy(), n in any::<u32>()) {
        let env = parse(&format!("{key}={n}")).unwrap();
        prop_assert_eq!(env.get(&key).cloned(), Some(Value::Integer(i64::from(n))));
    }

    #[test]
    fn prop_comment_after_whitespace_is_stripped(
        key in key_strategy(),
        value in plain_value_strategy(),
        gap in "[ \t]{1,6}",
        comment in "[ -~]{0,20}",
    ) {
        let env = parse(&format!("{key}={value}{gap}#{comment}")).unwrap();
        prop_assert_eq!(env.get(&key).cloned(), Some(Value::String(value)));
    }

    #[test]
    fn prop_double_quoted_content_is_preserved(
        key in key_strategy(),
        content in quoted_content_strategy(),
    ) {
        let env = parse(&format!("{key}=\"{content}\"")).unwrap();
        prop_assert_eq!(env.get(&key).cloned(), Some(Value::String(content.clone())));

        let env = parse(&format!("{key}='{content}' # note")).unwrap();
        prop_assert_eq!(env.get(&key).cloned(), Some(Value::String(content)));
    }

    #[test]
    fn prop_last_assignment_wins(
        key in key_strategy(),
        first in plain_value_strategy(),
        second in plain_value_strategy(),
    ) {
        let env = parse(&format!("{key}={first}\nOTHER_KEY=x\n{key}={second}")).unwrap();
        prop_assert_eq!(env.get(&key).cloned(), Some(Value::String(second)));
        if key != "OTHER_KEY" {
            prop_assert_eq!(env.keys().next(), Some(key.as_str()));
        }
    }

    #[test]
    fn prop_to_array_is_stable(
        pairs in proptest::collection::vec((key_strategy(), plain_value_strategy()), 0..8),
    ) {
        let contents: String = pairs
            .iter()
            .map(|(k, v)| format!("{k}={v}\n"))
            .collect();

        let mut loader = Loader::default();
        loader.parse_str(&contents).unwrap();
        let first = loader.to_array().unwrap();
        let second = loader.to_array().unwrap();
        prop_assert_eq!(first, second);
    }
}
