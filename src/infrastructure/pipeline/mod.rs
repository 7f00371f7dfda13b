//! Token Pipeline Implementations
//!
//! `BasicPipeline` is a small reference transformer: it merges the token
//! sources, resolves references and renders each platform's files with one of
//! the built-in formats.

mod formats;

pub use formats::TokenFormat;

use serde_json::{Map, Value};

use crate::domain::entities::BuildConfig;
use crate::domain::ports::{BuildReport, TokenPipeline, VirtualFs};
use crate::domain::services::{flatten_tokens, merge_documents, BuildSetTracker};
use crate::domain::value_objects::{FilePath, SourceGlobs};
use crate::error::{PadError, PadResult};

/// Built-in token pipeline
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicPipeline;

impl BasicPipeline {
    /// Create a new BasicPipeline
    pub fn new() -> Self {
        Self
    }
}

impl TokenPipeline for BasicPipeline {
    fn run(&self, fs: &dyn VirtualFs, config_path: &FilePath) -> PadResult<BuildReport> {
        let text = fs.read(config_path)?;
        let config = BuildConfig::parse(config_path.as_str(), &text)?;

        // Resolve every output before touching the filesystem
        let mut planned = Vec::new();
        for (name, platform) in &config.platforms {
            let dir = platform
                .build_dir()
                .ok_or_else(|| PadError::InvalidConfig {
                    file: config_path.to_string(),
                    message: format!("platform '{}' has no usable buildPath", name),
                })?;
            for file in &platform.files {
                let format =
                    TokenFormat::from_id(&file.format).ok_or_else(|| PadError::UnknownFormat {
                        format: file.format.clone(),
                        platform: name.clone(),
                    })?;
                planned.push((dir.join(&file.destination)?, format, platform.prefix.clone()));
            }
        }

        // Generated files of this config are never sources
        let tracker = BuildSetTracker::new(Some(&config));
        let listing = fs.list()?;
        let globs = SourceGlobs::new(&config.source)?;
        let sources = globs.resolve(listing.iter().filter(|path| !tracker.is_output(path)));

        let mut merged = Value::Object(Map::new());
        for source in &sources {
            let content = fs.read(source)?;
            let doc: Value =
                serde_json::from_str(&content).map_err(|e| PadError::InvalidTokens {
                    file: source.to_string(),
                    message: e.to_string(),
                })?;
            merge_documents(&mut merged, doc);
        }
        let tokens = flatten_tokens(&merged)?;

        let mut written = Vec::with_capacity(planned.len());
        for (path, format, prefix) in planned {
            fs.write(&path, &format.render(&tokens, prefix.as_deref()))?;
            written.push(path);
        }

        Ok(BuildReport { config, written })
    }
}
