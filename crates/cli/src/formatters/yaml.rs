//! YAML formatter implementation.

use anyhow::Result;
use envrelay_config::EnvMap;

use super::Formatter;

/// YAML mapping, keys in file order.
pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn format_env(&self, env: &EnvMap) -> Result<String> {
        Ok(serde_yaml::to_string(env)?)
    }
}
