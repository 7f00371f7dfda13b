//! BuildConfig entity - the pipeline configuration (`sd.config.json`)
//!
//! A config names the token sources and, per output platform, the directory
//! its generated files are written to. The realized config of the last
//! successful run is what classifies files as generated outputs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::FilePath;
use crate::error::{PadError, PadResult};

/// Default name of the pipeline config file
pub const DEFAULT_CONFIG_FILE: &str = "sd.config.json";

/// Pipeline configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfig {
    /// Glob patterns selecting token source files
    #[serde(default)]
    pub source: Vec<String>,

    /// Output platforms keyed by platform id (`css`, `js`, ...)
    #[serde(default)]
    pub platforms: BTreeMap<String, PlatformConfig>,
}

/// One output platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform_group: Option<String>,

    /// Prepended to every token name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    /// Directory prefix all files of this platform are written under
    pub build_path: String,

    #[serde(default)]
    pub files: Vec<PlatformFile>,
}

/// One generated file of a platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformFile {
    /// File name relative to the platform's build path
    pub destination: String,
    /// Format id (`css/variables`, `javascript/es6`, ...)
    pub format: String,
}

impl PlatformConfig {
    /// Create a platform writing under `build_path`
    pub fn new(build_path: impl Into<String>) -> Self {
        Self {
            transform_group: None,
            prefix: None,
            build_path: build_path.into(),
            files: Vec::new(),
        }
    }

    /// Add a generated file
    pub fn with_file(mut self, destination: impl Into<String>, format: impl Into<String>) -> Self {
        self.files.push(PlatformFile {
            destination: destination.into(),
            format: format.into(),
        });
        self
    }

    /// Set the token name prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Set the transform group
    pub fn with_transform_group(mut self, group: impl Into<String>) -> Self {
        self.transform_group = Some(group.into());
        self
    }

    /// The normalized build directory, `None` if `build_path` is unusable
    pub fn build_dir(&self) -> Option<FilePath> {
        FilePath::dir(&self.build_path).ok()
    }
}

impl BuildConfig {
    /// Parse and validate a config file's content
    pub fn parse(file: &str, content: &str) -> PadResult<Self> {
        let config: BuildConfig =
            serde_json::from_str(content).map_err(|e| PadError::InvalidConfig {
                file: file.to_string(),
                message: e.to_string(),
            })?;
        config.validate(file)?;
        Ok(config)
    }

    fn validate(&self, file: &str) -> PadResult<()> {
        for (name, platform) in &self.platforms {
            if platform.build_dir().is_none() {
                return Err(PadError::InvalidConfig {
                    file: file.to_string(),
                    message: format!(
                        "platform '{}' has an unusable buildPath '{}'",
                        name, platform.build_path
                    ),
                });
            }
        }
        Ok(())
    }

    /// Add a platform
    pub fn with_platform(mut self, name: impl Into<String>, platform: PlatformConfig) -> Self {
        self.platforms.insert(name.into(), platform);
        self
    }

    /// Add a source pattern
    pub fn with_source(mut self, pattern: impl Into<String>) -> Self {
        self.source.push(pattern.into());
        self
    }

    /// Build directories of every platform, in platform order
    pub fn build_dirs(&self) -> Vec<FilePath> {
        self.platforms
            .values()
            .filter_map(PlatformConfig::build_dir)
            .collect()
    }

    /// Pretty JSON, as written to disk
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// The configuration a fresh project starts with
    pub fn default_project() -> Self {
        BuildConfig::default()
            .with_source("tokens/**/*.json")
            .with_platform(
                "css",
                PlatformConfig::new("build/css/")
                    .with_transform_group("css")
                    .with_prefix("sd")
                    .with_file("_variables.css", "css/variables"),
            )
            .with_platform(
                "js",
                PlatformConfig::new("build/js/")
                    .with_transform_group("js")
                    .with_file("variables.js", "javascript/es6"),
            )
    }
}
