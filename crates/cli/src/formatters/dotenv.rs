//! Dotenv formatter implementation.
//!
//! Strings are double-quoted with `\`, `"`, and newlines escaped; scalars are
//! written bare so they parse back to the same type. Nested tables are
//! written as quoted JSON.
//!
//! A literal backslash followed by `n` cannot be represented: the parser
//! collapses `\\` before it expands `\n`, so such a value reads back with a
//! newline in its place.

use anyhow::Result;
use envrelay_config::{EnvMap, Value};

use super::Formatter;

/// `KEY=value` lines.
pub struct DotenvFormatter;

impl Formatter for DotenvFormatter {
    fn format_env(&self, env: &EnvMap) -> Result<String> {
        let mut out = String::new();
        for (key, value) in env.iter() {
            let rendered = match value {
                Value::String(s) => quote(s),
                Value::Integer(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null => "null".to_string(),
                Value::Table(table) => quote(&serde_json::to_string(table)?),
            };
            out.push_str(key);
            out.push('=');
            out.push_str(&rendered);
            out.push('\n');
        }
        Ok(out)
    }
}

fn quote(s: &str) -> String {
    let escaped = s
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n");
    format!("\"{escaped}\"")
}
