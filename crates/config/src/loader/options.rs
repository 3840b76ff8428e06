//! One-call loading driven by a deserializable options struct.
//!
//! Responsibilities:
//! - Describe a whole load (files, error mode, filters, targets) as data.
//! - Run the steps in a fixed order.
//!
//! Invariants:
//! - Step order: raise mode, parse, skip policy, filters, prefix, expect,
//!   define, toEnv, toServer, putenv, apacheSetenv.
//! - Steps whose option is absent are not run.

use std::path::PathBuf;

use serde::{Deserialize, Deserializer};

use super::builder::Loader;
use crate::constants::DEFAULT_ENV_FILE;
use crate::error::LoaderError;
use crate::filter::FilterSpec;
use crate::parser::KeyPolicy;
use crate::store::TargetKind;

/// Options for [`Loader::load`].
///
/// Target fields hold the `overwrite` flag; `None` skips the target.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoadOptions {
    /// Candidate files, tried in order. Accepts a single path or a list.
    #[serde(alias = "filepath", deserialize_with = "one_or_many")]
    pub filepaths: Vec<PathBuf>,
    pub raise_exceptions: bool,
    pub key_policy: KeyPolicy,
    /// Targets that keep existing values. An empty list marks every target.
    pub skip_existing: Option<Vec<TargetKind>>,
    pub filters: Vec<FilterSpec>,
    pub prefix: Option<String>,
    pub expect: Option<Vec<String>>,
    pub define: bool,
    pub to_env: Option<bool>,
    pub to_server: Option<bool>,
    pub putenv: Option<bool>,
    pub apache_setenv: Option<bool>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            filepaths: vec![PathBuf::from(DEFAULT_ENV_FILE)],
            raise_exceptions: true,
            key_policy: KeyPolicy::default(),
            skip_existing: None,
            filters: Vec::new(),
            prefix: None,
            expect: None,
            define: false,
            to_env: None,
            to_server: None,
            putenv: None,
            apache_setenv: None,
        }
    }
}

impl LoadOptions {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            filepaths: vec![path.into()],
            ..Self::default()
        }
    }
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(PathBuf),
        Many(Vec<PathBuf>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(path) => vec![path],
        OneOrMany::Many(paths) => paths,
    })
}

impl Loader {
    /// Build a loader from `options` and run every requested step.
    ///
    /// # Errors
    ///
    /// In raising mode, the first failing step's error.
    pub fn load(options: LoadOptions) -> Result<Loader, LoaderError> {
        Loader::new(options.filepaths.iter().cloned())
            .raise_exceptions(options.raise_exceptions)
            .with_key_policy(options.key_policy)
            .run_options(&options)
    }

    /// Run the post-construction steps of `options` on this loader.
    ///
    /// The candidate files, raise mode, and key policy of `options` are not
    /// applied; configure those on the loader itself.
    pub fn run_options(mut self, options: &LoadOptions) -> Result<Self, LoaderError> {
        self.parse()?;

        if let Some(kinds) = &options.skip_existing {
            self.skip_existing(kinds.iter().copied());
        }
        if !options.filters.is_empty() {
            self.set_filter_specs(&options.filters)?.filter()?;
        }
        if options.prefix.is_some() {
            self.prefix(options.prefix.clone());
        }
        if let Some(keys) = &options.expect {
            self.expect(keys)?;
        }
        if options.define {
            self.define()?;
        }

        let targets = [
            (TargetKind::ToEnv, options.to_env),
            (TargetKind::ToServer, options.to_server),
            (TargetKind::Putenv, options.putenv),
            (TargetKind::ApacheSetenv, options.apache_setenv),
        ];
        for (kind, overwrite) in targets {
            if let Some(overwrite) = overwrite {
                self.write_target(kind, overwrite)?;
            }
        }

        Ok(self)
    }
}
