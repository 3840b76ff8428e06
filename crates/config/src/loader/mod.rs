//! Environment file loader.
//!
//! Responsibilities:
//! - Resolve the first usable file among ordered candidates.
//! - Drive the parse → filter → expect → propagate lifecycle through the
//!   chainable `Loader`.
//! - Run a whole load from a deserializable `LoadOptions`.
//!
//! Does NOT handle:
//! - Grammar details (see `parser`).
//! - The transformations themselves (see `filter`).
//!
//! Invariants / Assumptions:
//! - Operations other than `parse` fail with `NotParsed` until a mapping exists.
//! - Writes to the process environment happen only through `putenv`.

mod builder;
mod options;
mod propagate;
mod source;

pub use builder::Loader;
pub use options::LoadOptions;

#[cfg(test)]
mod tests;
