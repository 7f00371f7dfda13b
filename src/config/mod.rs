//! Tool settings
//!
//! Settings are resolved in this order:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (TOKENPAD_*)
//! 3. Project settings (tokenpad.toml in the project root)
//! 4. User settings (~/.config/tokenpad/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
#[cfg(test)]
mod tests;
mod types;

pub use loader::{load_or_default, load_with_warnings, with_env_overrides, ConfigWarning};
pub use types::{OutputConfig, ProjectConfig, Settings, Verbosity, WatchConfig};

/// Name of the project settings file
pub const SETTINGS_FILE: &str = "tokenpad.toml";
