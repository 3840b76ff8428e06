//! Centralized constants for the envrelay workspace.
//!
//! This module contains default names shared by the library and the CLI.

// =============================================================================
// Environment File Defaults
// =============================================================================

/// File name tried when no candidate list is given.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Directory name under the user configuration directory that holds the
/// fallback environment file.
pub const APP_DIR_NAME: &str = "envrelay";

// =============================================================================
// Interpolation
// =============================================================================

/// Replacement for a `${KEY}` reference to an undefined key.
pub const UNDEFINED_PLACEHOLDER: &str = "{}";
