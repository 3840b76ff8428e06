//! Dotenv parsing and propagation for envrelay.
//!
//! This crate parses dotenv-style files into an ordered, typed mapping,
//! transforms it through a filter pipeline, validates required keys, and
//! writes the result into one or more variable stores.

pub mod constants;
mod error;
pub mod expect;
pub mod filter;
mod loader;
pub mod parser;
pub mod store;
pub mod value;

pub use error::{ErrorKind, LoaderError};
pub use expect::{Expect, require_keys};
pub use filter::{Filter, FilterPipeline, FilterSpec, FilterStage};
pub use loader::{LoadOptions, Loader};
pub use parser::{KeyPolicy, ParseError, Parser, parse};
pub use store::{MemoryStore, ProcessEnv, SkipPolicy, TargetKind, VariableStore};
pub use value::{EnvMap, Value};

