//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse command-line arguments and environment variables.
//! - Resolve the candidate environment file list.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).

use clap::{Parser, Subcommand};
use envrelay_config::constants::{APP_DIR_NAME, DEFAULT_ENV_FILE};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "envrelay")]
#[command(about = "envrelay - Load dotenv files into commands and scripts", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  envrelay show --format yaml\n  envrelay --file .env.local --file .env check DATABASE_URL SECRET_KEY\n  envrelay --filter UrlParseFilter show\n  envrelay --prefix APP_ exec -- ./server --port 8080\n"
)]
pub struct Cli {
    /// Environment file to load; repeat to list fallbacks in priority order
    #[arg(short, long = "file", global = true, env = "ENVRELAY_FILE", value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Reject keys that start with a digit instead of skipping them
    #[arg(long, global = true)]
    pub strict_keys: bool,

    /// Prefix prepended to every key on output
    #[arg(long, global = true, env = "ENVRELAY_PREFIX")]
    pub prefix: Option<String>,

    /// Filter to apply after parsing (e.g., UrlParseFilter, lowercase_key); repeatable
    #[arg(long = "filter", global = true, value_name = "NAME")]
    pub filters: Vec<String>,

    /// Rename a key after filtering (OLD=NEW); repeatable
    #[arg(long = "remap", global = true, value_name = "OLD=NEW", value_parser = parse_remap)]
    pub remaps: Vec<(String, String)>,

    /// Report loader errors as warnings instead of failing
    #[arg(long, global = true)]
    pub no_raise: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the loaded variables
    Show {
        /// Output format (json, yaml, csv, env)
        #[arg(long, default_value = "json")]
        format: String,
    },

    /// Verify that required keys are present
    Check {
        /// Keys that must be defined
        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// Run a command with the loaded variables added to its environment
    Exec {
        /// Replace variables already set in the current environment
        #[arg(long, conflicts_with = "skip_existing")]
        overwrite: bool,

        /// Keep variables already set in the current environment
        #[arg(long)]
        skip_existing: bool,

        /// Command and arguments to run
        #[arg(
            required = true,
            trailing_var_arg = true,
            allow_hyphen_values = true,
            value_name = "COMMAND"
        )]
        argv: Vec<String>,
    },
}

fn parse_remap(s: &str) -> Result<(String, String), String> {
    let (old, new) = s
        .split_once('=')
        .ok_or_else(|| format!("Invalid remap '{s}': expected OLD=NEW"))?;
    let (old, new) = (old.trim(), new.trim());
    if old.is_empty() || new.is_empty() {
        return Err(format!("Invalid remap '{s}': keys must not be empty"));
    }
    Ok((old.to_string(), new.to_string()))
}

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Returns true if the path is empty or contains only whitespace.
pub(crate) fn path_is_blank(path: &Path) -> bool {
    path.to_string_lossy().trim().is_empty()
}

/// Directory holding the per-user fallback environment file.
///
/// `ENVRELAY_CONFIG_DIR` overrides the platform location:
/// - Linux: `~/.config/envrelay`
/// - macOS: `~/Library/Application Support/envrelay`
/// - Windows: `%AppData%\envrelay\config`
pub(crate) fn user_config_dir() -> Option<PathBuf> {
    env_var_or_none("ENVRELAY_CONFIG_DIR")
        .map(PathBuf::from)
        .or_else(|| {
            directories::ProjectDirs::from("", "", APP_DIR_NAME)
                .map(|dirs| dirs.config_dir().to_path_buf())
        })
}

/// Candidate files in priority order.
///
/// Blank entries are ignored. With no explicit files, `./.env` is tried
/// first, then `.env` in the user config directory.
pub fn resolve_candidates(files: &[PathBuf]) -> Vec<PathBuf> {
    let explicit: Vec<PathBuf> = files
        .iter()
        .filter(|p| !path_is_blank(p))
        .cloned()
        .collect();
    if !explicit.is_empty() {
        return explicit;
    }

    let mut candidates = vec![PathBuf::from(DEFAULT_ENV_FILE)];
    if let Some(dir) = user_config_dir() {
        candidates.push(dir.join(DEFAULT_ENV_FILE));
    }
    candidates
}
