//! Command dispatch logic.
//!
//! Responsibilities:
//! - Build the `Loader` from global arguments (files, key policy, filters, prefix).
//! - Route parsed CLI arguments to the appropriate command handlers.
//! - Surface errors that were suppressed by `--no-raise` as warnings.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//!
//! Invariants:
//! - Filters run in the order given, `--filter` stages before `--remap` stages.
//! - The process environment of envrelay itself is never modified.

use anyhow::Result;
use envrelay_config::{FilterSpec, KeyPolicy, Loader, TargetKind};

use crate::args::{Cli, Commands, resolve_candidates};
use crate::commands;
use crate::error::ExitCode;
use crate::formatters::OutputFormat;

/// Dispatch CLI commands to their respective handlers.
///
/// Returns the process exit code on success.
pub(crate) fn run_command(cli: Cli) -> Result<i32> {
    let code = match &cli.command {
        Commands::Show { format } => {
            let format: OutputFormat = format.parse()?;
            let mut loader = prepare(&cli, new_loader(&cli))?;
            commands::show::run(&mut loader, format)?;
            report_suppressed(&loader);
            ExitCode::Success.as_i32()
        }
        Commands::Check { keys } => {
            let loader = prepare(&cli, new_loader(&cli))?;
            report_suppressed(&loader);
            commands::check::run(&loader, keys)?;
            ExitCode::Success.as_i32()
        }
        Commands::Exec {
            overwrite,
            skip_existing,
            argv,
        } => {
            let env = commands::exec::current_environment();
            let loader = new_loader(&cli).with_store(TargetKind::ToEnv, env.clone());
            let mut loader = prepare(&cli, loader)?;
            let code = commands::exec::run(&mut loader, &env, argv, *overwrite, *skip_existing)?;
            report_suppressed(&loader);
            code
        }
    };
    Ok(code)
}

fn new_loader(cli: &Cli) -> Loader {
    let policy = if cli.strict_keys {
        KeyPolicy::Strict
    } else {
        KeyPolicy::Lenient
    };
    Loader::new(resolve_candidates(&cli.files))
        .raise_exceptions(!cli.no_raise)
        .with_key_policy(policy)
}

/// Parse, filter, and set the prefix.
fn prepare(cli: &Cli, mut loader: Loader) -> Result<Loader> {
    loader.parse()?;

    let specs = filter_specs(cli);
    if !specs.is_empty() {
        loader.set_filter_specs(&specs)?.filter()?;
    }
    loader.prefix(cli.prefix.clone());
    Ok(loader)
}

fn filter_specs(cli: &Cli) -> Vec<FilterSpec> {
    let named = cli.filters.iter().map(|name| FilterSpec::Name(name.clone()));
    let remaps = cli.remaps.iter().map(|(old, new)| FilterSpec::Configured {
        name: "RemapKeysFilter".to_string(),
        config: Some(serde_json::json!({ old.as_str(): new })),
    });
    named.chain(remaps).collect()
}

fn report_suppressed(loader: &Loader) {
    for error in loader.errors() {
        eprintln!("warning: {error}");
    }
}
