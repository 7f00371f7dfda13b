//! Settings type definitions

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::application::RebuildStrategy;
use crate::domain::entities::DEFAULT_CONFIG_FILE;
use crate::error::PadResult;

use super::loader::{self, ConfigWarning};

/// Project layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Pipeline config, relative to the project root
    #[serde(default = "default_config_file")]
    pub config_file: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            config_file: default_config_file(),
        }
    }
}

fn default_config_file() -> String {
    DEFAULT_CONFIG_FILE.to_string()
}

/// Watch mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    #[serde(default)]
    pub strategy: RebuildStrategy,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            strategy: RebuildStrategy::default(),
        }
    }
}

impl WatchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

fn default_debounce_ms() -> u64 {
    crate::watcher::DEBOUNCE_MS
}

/// Output configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub verbosity: Verbosity,
}

/// Verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Debug,
}

impl Verbosity {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "quiet" => Some(Verbosity::Quiet),
            "normal" => Some(Verbosity::Normal),
            "verbose" => Some(Verbosity::Verbose),
            "debug" => Some(Verbosity::Debug),
            _ => None,
        }
    }

    /// Level selected by repeated `-v` flags, never below `self`
    pub fn raised_by(self, count: u8) -> Self {
        match count {
            0 => self,
            1 => self.max(Verbosity::Verbose),
            _ => Verbosity::Debug,
        }
    }
}

/// Full settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub project: ProjectConfig,

    #[serde(default)]
    pub watch: WatchConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Settings {
    /// Load settings and collect warnings for unknown keys
    pub fn load_with_warnings(path: &Path) -> PadResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from project settings, user settings, or defaults
    pub fn load_or_default(project_root: Option<&Path>) -> PadResult<(Self, Vec<ConfigWarning>)> {
        loader::load_or_default(project_root)
    }
}
