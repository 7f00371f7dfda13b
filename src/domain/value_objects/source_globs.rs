//! Source glob value object
//!
//! Compiles the pipeline's `source` patterns (e.g. `tokens/**/*.json`) with the
//! `ignore` crate's override matcher, which speaks gitignore glob syntax.

use ignore::overrides::{Override, OverrideBuilder};
use std::path::Path;

use super::file_path::FilePath;
use crate::error::{PadError, PadResult};

/// A compiled set of source patterns
#[derive(Debug)]
pub struct SourceGlobs {
    matcher: Override,
    patterns: Vec<String>,
}

impl SourceGlobs {
    /// Compile a list of patterns. An empty list matches nothing.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> PadResult<Self> {
        let mut builder = OverrideBuilder::new("");
        let mut kept = Vec::new();

        for pattern in patterns {
            let raw = pattern.as_ref();
            let trimmed = raw.trim().trim_start_matches("./");
            if trimmed.is_empty() {
                continue;
            }
            builder
                .add(trimmed)
                .map_err(|e| PadError::InvalidPattern {
                    pattern: raw.to_string(),
                    message: e.to_string(),
                })?;
            kept.push(trimmed.to_string());
        }

        let matcher = builder.build().map_err(|e| PadError::InvalidPattern {
            pattern: kept.join(", "),
            message: e.to_string(),
        })?;

        Ok(Self {
            matcher,
            patterns: kept,
        })
    }

    /// Whether a file matches any pattern. Directories never match.
    pub fn matches(&self, path: &FilePath) -> bool {
        if path.is_dir() || self.patterns.is_empty() {
            return false;
        }
        self.matcher
            .matched(Path::new(path.as_str()), false)
            .is_whitelist()
    }

    /// All matching files of a listing, sorted
    pub fn resolve<'a>(&self, files: impl IntoIterator<Item = &'a FilePath>) -> Vec<FilePath> {
        let mut matched: Vec<FilePath> = files
            .into_iter()
            .filter(|path| self.matches(path))
            .cloned()
            .collect();
        matched.sort();
        matched.dedup();
        matched
    }

    /// The patterns as compiled
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}
