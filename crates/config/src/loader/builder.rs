//! The `Loader`: parse, filter, validate, and propagate an environment file.
//!
//! Responsibilities:
//! - Track the candidate file list, the parsed mapping, the filter pipeline,
//!   the key prefix, and the skip policy.
//! - Expose chainable operations for every lifecycle step.
//! - Decide, in one place (`settle`), whether a failure is returned or
//!   recorded and suppressed.
//!
//! Does NOT handle:
//! - Grammar and value semantics (see `parser`).
//! - Candidate file resolution details (see `source.rs`).
//! - Per-entry write rules (see `propagate.rs`).
//!
//! Invariants:
//! - Every operation except `parse` requires a parsed mapping.
//! - A failed `parse` leaves the previous mapping untouched.
//! - Parsing and filtering see unprefixed keys; the prefix applies only when
//!   writing to targets and in `to_array`.

use std::fmt;
use std::path::PathBuf;

use tracing::{debug, warn};

use super::propagate::{self, Stores, prefixed_key};
use super::source::read_first_readable;
use crate::constants::DEFAULT_ENV_FILE;
use crate::error::LoaderError;
use crate::expect::require_keys;
use crate::filter::{FilterPipeline, FilterSpec, FilterStage};
use crate::parser::{KeyPolicy, Parser};
use crate::store::{SkipPolicy, TargetKind, VariableStore};
use crate::value::EnvMap;

/// Loads an environment file and propagates it into target stores.
///
/// By default errors are returned. With `raise_exceptions(false)` they are
/// logged, kept in [`Loader::errors`], and the operation returns `Ok`;
/// [`Loader::succeeded`] then reports whether the last operation worked.
#[derive(Debug)]
pub struct Loader {
    filepaths: Vec<PathBuf>,
    parser: Parser,
    environment: Option<EnvMap>,
    filters: FilterPipeline,
    prefix: Option<String>,
    raise: bool,
    skip: SkipPolicy,
    stores: Stores,
    errors: Vec<LoaderError>,
    last_ok: bool,
}

impl Default for Loader {
    fn default() -> Self {
        Self::new([DEFAULT_ENV_FILE])
    }
}

impl Loader {
    /// Create a loader over an ordered list of candidate files.
    pub fn new<I, P>(candidates: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            filepaths: candidates.into_iter().map(Into::into).collect(),
            parser: Parser::new(),
            environment: None,
            filters: FilterPipeline::default(),
            prefix: None,
            raise: true,
            skip: SkipPolicy::empty(),
            stores: Stores::default(),
            errors: Vec::new(),
            last_ok: true,
        }
    }

    /// Create a loader over a single file.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new([path.into()])
    }

    /// Choose between returning errors (`true`, the default) and recording
    /// them.
    pub fn raise_exceptions(mut self, raise: bool) -> Self {
        self.raise = raise;
        self
    }

    pub fn with_key_policy(mut self, policy: KeyPolicy) -> Self {
        self.parser = self.parser.with_key_policy(policy);
        self
    }

    /// Attach the store written by `kind`.
    ///
    /// Attaching a store for `ApacheSetenv` makes that target available.
    pub fn with_store<S>(mut self, kind: TargetKind, store: S) -> Self
    where
        S: VariableStore + 'static,
    {
        self.stores.attach(kind, Box::new(store));
        self
    }

    pub fn filepaths(&self) -> &[PathBuf] {
        &self.filepaths
    }

    pub fn set_filepaths<I, P>(&mut self, candidates: I) -> &mut Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.filepaths = candidates.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_raising(&self) -> bool {
        self.raise
    }

    /// Read the first usable candidate file and replace the mapping.
    ///
    /// # Errors
    ///
    /// File resolution errors (`FileNotFound`, `IsDirectory`, `Unreadable`,
    /// `NoReadableFile`) and `Parse` errors.
    pub fn parse(&mut self) -> Result<&mut Self, LoaderError> {
        let outcome = read_first_readable(&self.filepaths).and_then(|(path, contents)| {
            debug!(path = %path.display(), "Parsing environment file");
            Ok(self.parser.parse(&contents)?)
        });
        self.replace_environment(outcome)
    }

    /// Parse in-memory `contents` and replace the mapping.
    pub fn parse_str(&mut self, contents: &str) -> Result<&mut Self, LoaderError> {
        let outcome = self.parser.parse(contents).map_err(LoaderError::from);
        self.replace_environment(outcome)
    }

    fn replace_environment(
        &mut self,
        outcome: Result<EnvMap, LoaderError>,
    ) -> Result<&mut Self, LoaderError> {
        if let Some(env) = self.settle(outcome)? {
            debug!(keys = env.len(), "Parsed environment");
            self.environment = Some(env);
        }
        Ok(self)
    }

    /// Replace the filter pipeline. Stages are validated immediately.
    pub fn set_filters<I, S>(&mut self, stages: I) -> Result<&mut Self, LoaderError>
    where
        I: IntoIterator<Item = S>,
        S: Into<FilterStage>,
    {
        let outcome = FilterPipeline::new(stages);
        if let Some(pipeline) = self.settle(outcome)? {
            self.filters = pipeline;
        }
        Ok(self)
    }

    /// Replace the filter pipeline from serializable stage descriptions.
    pub fn set_filter_specs(&mut self, specs: &[FilterSpec]) -> Result<&mut Self, LoaderError> {
        let outcome = FilterPipeline::from_specs(specs);
        if let Some(pipeline) = self.settle(outcome)? {
            self.filters = pipeline;
        }
        Ok(self)
    }

    pub fn filters(&self) -> &FilterPipeline {
        &self.filters
    }

    /// Run the filter pipeline over the mapping and keep the result.
    pub fn filter(&mut self) -> Result<&mut Self, LoaderError> {
        let outcome = match self.environment.take() {
            Some(env) => {
                self.environment = Some(self.filters.apply(env));
                Ok(())
            }
            None => Err(LoaderError::NotParsed { method: "filter" }),
        };
        self.settle(outcome)?;
        Ok(self)
    }

    /// Require every key in `keys` to be present in the mapping.
    ///
    /// # Errors
    ///
    /// `NotParsed`, `NoExpectedKeys` for an empty list, or `MissingKeys`.
    pub fn expect<I, K>(&mut self, keys: I) -> Result<&mut Self, LoaderError>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let outcome = match &self.environment {
            Some(env) => require_keys(env, keys),
            None => Err(LoaderError::NotParsed { method: "expect" }),
        };
        self.settle(outcome)?;
        Ok(self)
    }

    /// Write every variable into the write-once constant table.
    pub fn define(&mut self) -> Result<&mut Self, LoaderError> {
        self.write_target(TargetKind::Define, false)
    }

    /// Write every variable into the process environment.
    pub fn putenv(&mut self, overwrite: bool) -> Result<&mut Self, LoaderError> {
        self.write_target(TargetKind::Putenv, overwrite)
    }

    pub fn to_env(&mut self, overwrite: bool) -> Result<&mut Self, LoaderError> {
        self.write_target(TargetKind::ToEnv, overwrite)
    }

    pub fn to_server(&mut self, overwrite: bool) -> Result<&mut Self, LoaderError> {
        self.write_target(TargetKind::ToServer, overwrite)
    }

    /// Write every variable into the attached web-server store.
    ///
    /// # Errors
    ///
    /// `TargetUnavailable` when no such store was attached.
    pub fn apache_setenv(&mut self, overwrite: bool) -> Result<&mut Self, LoaderError> {
        self.write_target(TargetKind::ApacheSetenv, overwrite)
    }

    /// Write to the target named by `kind`.
    pub fn write_target(
        &mut self,
        kind: TargetKind,
        overwrite: bool,
    ) -> Result<&mut Self, LoaderError> {
        let outcome = self.propagate_to(kind, overwrite);
        self.settle(outcome)?;
        Ok(self)
    }

    fn propagate_to(&mut self, kind: TargetKind, overwrite: bool) -> Result<usize, LoaderError> {
        let env = self
            .environment
            .as_ref()
            .ok_or(LoaderError::NotParsed {
                method: kind.as_str(),
            })?;
        let store = self
            .stores
            .get_mut(kind)
            .ok_or(LoaderError::TargetUnavailable(kind))?;
        propagate::propagate(
            env,
            store,
            kind,
            self.prefix.as_deref(),
            overwrite,
            self.skip,
        )
    }

    /// Keep existing values in the given targets instead of failing on a
    /// collision. An empty list marks every target.
    pub fn skip_existing<I>(&mut self, kinds: I) -> &mut Self
    where
        I: IntoIterator<Item = TargetKind>,
    {
        self.skip |= SkipPolicy::from_targets(kinds);
        self
    }

    /// Targets currently marked as skip-on-collision.
    pub fn skipped(&self) -> Vec<TargetKind> {
        self.skip.targets()
    }

    /// Set or clear the key prefix. An empty prefix clears it.
    pub fn prefix(&mut self, prefix: Option<String>) -> &mut Self {
        self.prefix = prefix.filter(|p| !p.is_empty());
        self
    }

    pub fn current_prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// `key` with the current prefix applied.
    pub fn prefixed(&self, key: &str) -> String {
        prefixed_key(self.prefix.as_deref(), key)
    }

    /// A copy of the mapping with prefixed keys.
    ///
    /// Returns `Ok(None)` when no mapping exists and errors are suppressed.
    pub fn to_array(&mut self) -> Result<Option<EnvMap>, LoaderError> {
        let outcome = self
            .prefixed_environment()
            .ok_or(LoaderError::NotParsed { method: "toArray" });
        self.settle(outcome)
    }

    /// The parsed mapping with unprefixed keys, if any.
    pub fn environment(&self) -> Option<&EnvMap> {
        self.environment.as_ref()
    }

    /// The store written by `kind`, if one is attached.
    pub fn store(&self, kind: TargetKind) -> Option<&dyn VariableStore> {
        self.stores.get(kind)
    }

    /// Errors recorded while errors were suppressed, oldest first.
    pub fn errors(&self) -> &[LoaderError] {
        &self.errors
    }

    /// Whether the most recent operation completed without error.
    pub fn succeeded(&self) -> bool {
        self.last_ok
    }

    fn prefixed_environment(&self) -> Option<EnvMap> {
        let env = self.environment.as_ref()?;
        Some(match self.prefix.as_deref() {
            Some(prefix) => env.with_key_prefix(prefix),
            None => env.clone(),
        })
    }

    /// Single decision point for failures: return them in raising mode,
    /// otherwise log and record them and report `Ok(None)`.
    fn settle<T>(&mut self, outcome: Result<T, LoaderError>) -> Result<Option<T>, LoaderError> {
        match outcome {
            Ok(value) => {
                self.last_ok = true;
                Ok(Some(value))
            }
            Err(e) => {
                self.last_ok = false;
                if self.raise {
                    return Err(e);
                }
                warn!(error = %e, kind = ?e.kind(), "Suppressed environment loader error");
                self.errors.push(e);
                Ok(None)
            }
        }
    }
}

impl fmt::Display for Loader {
    /// Renders the prefixed mapping as JSON, or `{}` when nothing is parsed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .prefixed_environment()
            .and_then(|env| serde_json::to_string(&env).ok());
        f.write_str(rendered.as_deref().unwrap_or("{}"))
    }
}

