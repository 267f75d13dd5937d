//! Configuration module for Zitify
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (ZITIFY_*)
//! 3. Project config (`<base>/zitify.toml`)
//! 4. User config (`~/.config/zitify/config.toml`)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::ConfigWarning;
pub use types::{Config, LayoutConfig, ScopeConfig, PROJECT_CONFIG_FILE};
