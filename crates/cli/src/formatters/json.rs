//! JSON formatter implementation.

use anyhow::Result;
use envrelay_config::EnvMap;

use super::Formatter;

/// Pretty-printed JSON object, keys in file order.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_env(&self, env: &EnvMap) -> Result<String> {
        let mut out = serde_json::to_string_pretty(env)?;
        out.push('\n');
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatters::tests::sample;

    #[test]
    fn test_json_keeps_types_and_order() {
        let out = JsonFormatter.format_env(&sample()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(
            parsed,
            serde_json::json!({"NAME": "demo app", "PORT": 8080, "DEBUG": true, "UNSET": null})
        );
        assert!(out.find("NAME").unwrap() < out.find("UNSET").unwrap());
    }

    #[test]
    fn test_json_empty() {
        assert_eq!(JsonFormatter.format_env(&EnvMap::new()).unwrap(), "{}\n");
    }
}
