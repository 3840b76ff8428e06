//! CSV formatter implementation.
//!
//! One `key,value` row per variable. Values use their process-environment
//! rendering (`true` → `1`, `false` and `null` → empty).

use anyhow::{Context, Result};
use envrelay_config::EnvMap;

use super::Formatter;

/// Two-column CSV with a header row.
pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format_env(&self, env: &EnvMap) -> Result<String> {
        let mut buffer = Vec::new();
        {
            let mut w = ::csv::Writer::from_writer(&mut buffer);
            w.write_record(["key", "value"])
                .context("Failed to write CSV headers")?;
            for (key, value) in env.iter() {
                w.write_record([key, &*value.to_env_string()])
                    .context("Failed to write CSV record")?;
            }
            w.flush().context("Failed to flush CSV writer")?;
        }
        String::from_utf8(buffer).context("CSV output is not valid UTF-8")
    }
}
