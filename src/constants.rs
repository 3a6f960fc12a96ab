//! Centralized constants for kairo.
//!
//! All magic numbers and default strings live here so they can be changed
//! in one place.

/// Application name used in directory paths.
pub const APP_NAME: &str = "kairo";

/// Configuration filename.
pub const CONFIG_FILENAME: &str = "config.toml";

/// Default LLM model identifier.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-6";

/// Default maximum number of tool-calling round-trips after the first
/// completion. Bounds worst-case cost against a model that never stops
/// requesting tools.
pub const DEFAULT_MAX_ITERATIONS: usize = 10;
