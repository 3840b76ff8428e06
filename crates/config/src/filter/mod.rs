//! Composable transformations applied to a parsed mapping.
//!
//! Responsibilities:
//! - Define the closed set of built-in filters plus a callable wrapper.
//! - Resolve filters from their names and validate stage configuration.
//! - Apply stages left to right, each consuming the previous output.
//!
//! Does NOT handle:
//! - Key prefixing (applied by the loader at write/read time).
//!
//! Invariants:
//! - Every configuration problem is reported by `FilterPipeline::new`;
//!   `apply` cannot fail.
//! - Filters are pure: they receive a mapping by value and return a new one.

mod keys;
mod nested;
mod url_parse;

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::error::LoaderError;
use crate::value::{EnvMap, Value};

/// Signature of a user-supplied filter.
pub type FilterFn = dyn Fn(EnvMap, Option<&Value>) -> EnvMap + Send + Sync;

/// A single transformation.
#[derive(Clone)]
pub enum Filter {
    /// Returns the mapping unchanged.
    Identity,
    /// Lowercases every key.
    LowercaseKey,
    /// Uppercases the first character of every key.
    UppercaseFirstKey,
    /// Renames keys per an `old → new` table supplied as stage config.
    RemapKeys,
    /// Adds component keys for every `*_URL` key.
    UrlParse,
    /// Nests `A_B_C` keys into tables.
    UnderscoreArray,
    /// Arbitrary user function.
    Callable(Arc<FilterFn>),
}

impl Filter {
    /// Wrap a closure as a filter.
    pub fn callable<F>(f: F) -> Self
    where
        F: Fn(EnvMap, Option<&Value>) -> EnvMap + Send + Sync + 'static,
    {
        Filter::Callable(Arc::new(f))
    }

    /// Resolve a built-in filter from its name.
    ///
    /// Accepts the class-style names (`LowercaseKeyFilter`) and snake_case
    /// aliases (`lowercase_key`). Callables cannot be resolved by name.
    pub fn from_name(name: &str) -> Result<Self, LoaderError> {
        let filter = match name.trim() {
            "Filter" | "NullFilter" | "identity" | "null" => Filter::Identity,
            "LowercaseKeyFilter" | "lowercase_key" => Filter::LowercaseKey,
            "UppercaseFirstKeyFilter" | "uppercase_first_key" => Filter::UppercaseFirstKey,
            "RemapKeysFilter" | "remap_keys" => Filter::RemapKeys,
            "UrlParseFilter" | "url_parse" => Filter::UrlParse,
            "UnderscoreArrayFilter" | "underscore_array" => Filter::UnderscoreArray,
            other => return Err(LoaderError::UnknownFilter(other.to_string())),
        };
        Ok(filter)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Filter::Identity => "NullFilter",
            Filter::LowercaseKey => "LowercaseKeyFilter",
            Filter::UppercaseFirstKey => "UppercaseFirstKeyFilter",
            Filter::RemapKeys => "RemapKeysFilter",
            Filter::UrlParse => "UrlParseFilter",
            Filter::UnderscoreArray => "UnderscoreArrayFilter",
            Filter::Callable(_) => "CallableFilter",
        }
    }

    fn validate(&self, config: Option<&Value>) -> Result<(), LoaderError> {
        match self {
            Filter::RemapKeys => keys::validate_remap_config(config),
            _ => Ok(()),
        }
    }

    /// Apply this filter to `env`.
    pub fn apply(&self, env: EnvMap, config: Option<&Value>) -> EnvMap {
        match self {
            Filter::Identity => env,
            Filter::LowercaseKey => keys::lowercase_keys(env),
            Filter::UppercaseFirstKey => keys::uppercase_first_keys(env),
            Filter::RemapKeys => keys::remap_keys(env, config),
            Filter::UrlParse => url_parse::expand_urls(env),
            Filter::UnderscoreArray => nested::nest_underscored(env),
            Filter::Callable(f) => f(env, config),
        }
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A filter paired with its optional configuration.
#[derive(Debug, Clone)]
pub struct FilterStage {
    pub filter: Filter,
    pub config: Option<Value>,
}

impl FilterStage {
    pub fn new(filter: Filter) -> Self {
        Self {
            filter,
            config: None,
        }
    }

    pub fn with_config(mut self, config: impl Into<Value>) -> Self {
        self.config = Some(config.into());
        self
    }

    /// Resolve a stage from a filter name.
    pub fn named(name: &str, config: Option<Value>) -> Result<Self, LoaderError> {
        Ok(Self {
            filter: Filter::from_name(name)?,
            config,
        })
    }
}

impl From<Filter> for FilterStage {
    fn from(filter: Filter) -> Self {
        FilterStage::new(filter)
    }
}

/// Serializable description of a stage, as found in load options.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FilterSpec {
    /// Just a filter name.
    Name(String),
    /// A filter name with configuration.
    Configured {
        name: String,
        #[serde(default)]
        config: Option<serde_json::Value>,
    },
}

impl FilterSpec {
    pub fn resolve(&self) -> Result<FilterStage, LoaderError> {
        match self {
            FilterSpec::Name(name) => FilterStage::named(name, None),
            FilterSpec::Configured { name, config } => {
                FilterStage::named(name, config.clone().map(Value::from))
            }
        }
    }
}

/// An ordered, validated list of filter stages.
#[derive(Debug, Clone, Default)]
pub struct FilterPipeline {
    stages: Vec<FilterStage>,
}

impl FilterPipeline {
    /// Validate every stage.
    ///
    /// # Errors
    ///
    /// Returns `LoaderError::InvalidFilterConfig` when a stage's configuration
    /// does not fit its filter.
    pub fn new<I, S>(stages: I) -> Result<Self, LoaderError>
    where
        I: IntoIterator<Item = S>,
        S: Into<FilterStage>,
    {
        let stages: Vec<FilterStage> = stages.into_iter().map(Into::into).collect();
        for stage in &stages {
            stage.filter.validate(stage.config.as_ref())?;
        }
        Ok(Self { stages })
    }

    /// Resolve and validate stages from their serializable descriptions.
    pub fn from_specs(specs: &[FilterSpec]) -> Result<Self, LoaderError> {
        let stages = specs
            .iter()
            .map(FilterSpec::resolve)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(stages)
    }

    pub fn stages(&self) -> &[FilterStage] {
        &self.stages
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run every stage in order.
    pub fn apply(&self, env: EnvMap) -> EnvMap {
        self.stages.iter().fold(env, |env, stage| {
            debug!(filter = stage.filter.name(), keys = env.len(), "Applying filter");
            stage.filter.apply(env, stage.config.as_ref())
        })
    }
}
