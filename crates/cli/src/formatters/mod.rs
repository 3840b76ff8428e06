//! Output formatters for the `show` command.
//!
//! Responsibilities:
//! - Provide multiple output formats: JSON, YAML, CSV, and dotenv.
//! - Render an `EnvMap` into a string in the chosen format.
//!
//! Does NOT handle:
//! - Direct printing to stdout (returns formatted strings).
//!
//! ## Empty-State Handling
//!
//! | Format | Empty State Behavior |
//! |--------|---------------------|
//! | JSON | `{}` |
//! | YAML | `{}` |
//! | CSV | Headers only (`key,value`) |
//! | env | Empty output |
//!
//! ## Typed Values
//!
//! JSON and YAML keep value types (integers, booleans, null, nested tables).
//! CSV renders every value the way it would be written to a process
//! environment. The env format writes values that parse back to the same type.

use anyhow::Result;
use envrelay_config::EnvMap;
use std::str::FromStr;

mod csv;
mod dotenv;
mod json;
mod yaml;

pub use csv::CsvFormatter;
pub use dotenv::DotenvFormatter;
pub use json::JsonFormatter;
pub use yaml::YamlFormatter;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Csv,
    Env,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "csv" => Ok(OutputFormat::Csv),
            "env" | "dotenv" => Ok(OutputFormat::Env),
            _ => anyhow::bail!(
                "Invalid output format: {}. Valid options: json, yaml, csv, env",
                s
            ),
        }
    }
}

/// Renders a variable mapping.
pub trait Formatter {
    fn format_env(&self, env: &EnvMap) -> Result<String>;
}

/// Get a formatter for the specified output format.
pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Yaml => Box::new(YamlFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
        OutputFormat::Env => Box::new(DotenvFormatter),
    }
}
