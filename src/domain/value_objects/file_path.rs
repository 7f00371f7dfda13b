//! FilePath Value Object
//!
//! A normalized location in a virtual filesystem:
//! - Forward slashes only, no leading slash
//! - A trailing slash marks a directory
//! - No traversal components (..)

use std::fmt;

/// Error when path validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// Path contains traversal components (..)
    Traversal(String),
    /// Path has no segments after normalization
    Empty,
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::Traversal(raw) => {
                write!(f, "path '{}' contains traversal components (..)", raw)
            }
            PathError::Empty => write!(f, "path is empty"),
        }
    }
}

impl std::error::Error for PathError {}

/// A normalized virtual filesystem path
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FilePath(String);

impl FilePath {
    /// Normalize a raw path.
    ///
    /// Backslashes become `/`, leading `/` and `./` segments are dropped and
    /// repeated slashes collapse. A trailing slash is preserved.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, PathError> {
        let raw = raw.as_ref();
        let unified = raw.replace('\\', "/");
        let is_dir = unified.ends_with('/');

        let mut segments = Vec::new();
        for segment in unified.split('/') {
            match segment {
                "" | "." => continue,
                ".." => return Err(PathError::Traversal(raw.to_string())),
                other => segments.push(other),
            }
        }

        if segments.is_empty() {
            return Err(PathError::Empty);
        }

        let mut normalized = segments.join("/");
        if is_dir {
            normalized.push('/');
        }
        Ok(Self(normalized))
    }

    /// Normalize a raw path and mark it as a directory
    pub fn dir(raw: impl AsRef<str>) -> Result<Self, PathError> {
        let mut path = Self::new(raw)?;
        if !path.is_dir() {
            path.0.push('/');
        }
        Ok(path)
    }

    /// The normalized string form
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this path denotes a directory
    pub fn is_dir(&self) -> bool {
        self.0.ends_with('/')
    }

    /// The path without its directory marker
    pub fn trimmed(&self) -> &str {
        self.0.trim_end_matches('/')
    }

    /// The top-level segment (`build` for `build/css/vars.css`)
    pub fn first_segment(&self) -> &str {
        let trimmed = self.trimmed();
        trimmed.split('/').next().unwrap_or(trimmed)
    }

    /// The last segment, without a directory marker
    pub fn file_name(&self) -> &str {
        let trimmed = self.trimmed();
        trimmed.rsplit('/').next().unwrap_or(trimmed)
    }

    /// Extension of the last segment, if any
    pub fn extension(&self) -> Option<&str> {
        if self.is_dir() {
            return None;
        }
        let name = self.file_name();
        match name.rfind('.') {
            Some(0) | None => None,
            Some(idx) => Some(&name[idx + 1..]),
        }
    }

    /// Parent directory (with trailing slash), `None` at the top level
    pub fn parent(&self) -> Option<FilePath> {
        let trimmed = self.trimmed();
        trimmed
            .rfind('/')
            .map(|idx| FilePath(format!("{}/", &trimmed[..idx])))
    }

    /// Every ancestor directory, outermost first
    pub fn ancestors(&self) -> Vec<FilePath> {
        let mut out = Vec::new();
        let mut current = self.parent();
        while let Some(dir) = current {
            current = dir.parent();
            out.push(dir);
        }
        out.reverse();
        out
    }

    /// Append a relative path below this one
    pub fn join(&self, rest: impl AsRef<str>) -> Result<FilePath, PathError> {
        FilePath::new(format!("{}/{}", self.trimmed(), rest.as_ref()))
    }

    /// Whether this path lives below the directory `prefix`
    ///
    /// `prefix` is compared as `prefix + "/"`, so `build` covers `build/a.css`
    /// but not `buildings/a.css` or `build` itself.
    pub fn starts_with_dir(&self, prefix: &str) -> bool {
        let prefix = prefix.trim_end_matches('/');
        self.0.len() > prefix.len()
            && self.0.starts_with(prefix)
            && self.0.as_bytes()[prefix.len()] == b'/'
    }
}

impl fmt::Display for FilePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for FilePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for FilePath {
    type Error = PathError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        FilePath::new(value)
    }
}
