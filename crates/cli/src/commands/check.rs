//! Check command implementation.

use anyhow::Result;
use envrelay_config::{EnvMap, Expect, Loader};

/// Fail unless every key in `keys` is defined and not null.
///
/// Keys are checked before the prefix is applied. The check always raises,
/// even with `--no-raise`, since reporting is the command's purpose.
pub fn run(loader: &Loader, keys: &[String]) -> Result<()> {
    let empty = EnvMap::new();
    let env = loader.environment().unwrap_or(&empty);

    Expect::new(env, true).check(keys)?;
    println!("All {} required keys are present", keys.len());
    Ok(())
}
