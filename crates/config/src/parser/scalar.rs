//! Processing of the raw right-hand side of an assignment.
//!
//! Responsibilities:
//! - Strip and un-escape quoted values.
//! - Truncate unquoted values at the first whitespace and coerce scalars.
//! - Expand literal `\n` sequences.
//!
//! Invariants:
//! - Quoted values are always strings; only unquoted tokens are coerced.
//! - Un-escaping replaces the escaped quote first, then collapses `\\`.

use std::sync::LazyLock;

use regex::Regex;

use crate::value::Value;

static DOUBLE_QUOTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^"((?:[^"\\]|\\.)*)""#).expect("double-quoted pattern is valid")
});

static SINGLE_QUOTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^'((?:[^'\\]|\\.)*)'").expect("single-quoted pattern is valid")
});

/// Marker that starts a trailing comment inside a value.
const INLINE_COMMENT: &str = " #";

/// Result of processing a raw value, before interpolation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Processed {
    /// A string that is still subject to `${KEY}` interpolation.
    Text(String),
    /// A coerced scalar (`Integer`, `Bool`, `Null`).
    Scalar(Value),
}

/// Process a trimmed raw value.
pub(crate) fn process(raw: &str) -> Processed {
    match raw.chars().next() {
        None => Processed::Text(String::new()),
        Some(quote @ ('"' | '\'')) => Processed::Text(unquote(raw, quote)),
        Some(_) => unquoted(raw),
    }
}

fn unquote(raw: &str, quote: char) -> String {
    let pattern = if quote == '"' {
        &DOUBLE_QUOTED
    } else {
        &SINGLE_QUOTED
    };

    // Unterminated quotes are kept verbatim.
    let Some(caps) = pattern.captures(raw) else {
        return raw.to_string();
    };

    let escaped_quote = format!("\\{quote}");
    let body = caps[1]
        .replace(&escaped_quote, &quote.to_string())
        .replace("\\\\", "\\");

    expand_newlines(&body, true)
}

fn unquoted(raw: &str) -> Processed {
    let token = raw.split_whitespace().next().unwrap_or_default();
    match coerce(token) {
        Some(scalar) => Processed::Scalar(scalar),
        None => Processed::Text(expand_newlines(token, false)),
    }
}

/// Coerce an unquoted token into a typed scalar, if it is one.
///
/// Digit-only tokens that overflow `i64` stay strings.
pub(crate) fn coerce(token: &str) -> Option<Value> {
    match token {
        "true" => Some(Value::Bool(true)),
        "false" => Some(Value::Bool(false)),
        "null" => Some(Value::Null),
        t if !t.is_empty() && t.bytes().all(|b| b.is_ascii_digit()) => {
            t.parse::<i64>().ok().map(Value::Integer)
        }
        _ => None,
    }
}

/// Turn literal `\n` sequences into newlines.
///
/// With `strip_comment`, a ` #` on the last resulting line ends the value
/// whenever an expansion took place.
fn expand_newlines(value: &str, strip_comment: bool) -> String {
    if !value.contains("\\n") {
        return value.to_string();
    }

    let mut expanded = value.replace("\\n", "\n");
    if strip_comment {
        let last_line_start = expanded.rfind('\n').map_or(0, |i| i + 1);
        if let Some(pos) = expanded[last_line_start..].find(INLINE_COMMENT) {
            expanded.truncate(last_line_start + pos);
            let trimmed_len = expanded.trim_end().len();
            expanded.truncate(trimmed_len);
        }
    }
    expanded
}
