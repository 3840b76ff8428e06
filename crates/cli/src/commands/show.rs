//! Show command implementation.

use anyhow::Result;
use envrelay_config::Loader;

use crate::formatters::{OutputFormat, get_formatter};

/// Print the loaded variables (prefix applied) in `format`.
///
/// When errors are suppressed and nothing was parsed, an empty mapping is
/// printed.
pub fn run(loader: &mut Loader, format: OutputFormat) -> Result<()> {
    let env = loader.to_array()?.unwrap_or_default();
    let output = get_formatter(format).format_env(&env)?;
    print!("{output}");
    Ok(())
}
