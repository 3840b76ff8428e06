//! Command implementations.

pub mod check;
pub mod exec;
pub mod show;
