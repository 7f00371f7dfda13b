//! Local File System Implementation
//!
//! Implements the VirtualFs port over a project directory on disk.

use std::io::Write;
use std::path::{Component, Path, PathBuf};

use ignore::WalkBuilder;

use crate::config::SETTINGS_FILE;
use crate::domain::ports::virtual_fs::{FsError, FsResult, VirtualFs};
use crate::domain::value_objects::FilePath;

/// Directory names never listed
const SKIPPED_DIRS: &[&str] = &[".git"];

/// A project directory on disk
///
/// Paths are resolved relative to `root`. Writes are atomic (tempfile + rename).
#[derive(Debug, Clone)]
pub struct LocalFs {
    root: PathBuf,
}

impl LocalFs {
    /// Create a LocalFs rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The project directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute location of a virtual path
    pub fn absolute(&self, path: &FilePath) -> PathBuf {
        self.root.join(path.trimmed())
    }

    /// Virtual path of a location below the root, `None` outside of it
    pub fn relative(&self, path: &Path, is_dir: bool) -> Option<FilePath> {
        let rel = path.strip_prefix(&self.root).ok()?;
        let mut segments = Vec::new();
        for component in rel.components() {
            match component {
                Component::Normal(part) => segments.push(part.to_string_lossy().into_owned()),
                _ => return None,
            }
        }
        let joined = segments.join("/");
        if is_dir {
            FilePath::dir(joined).ok()
        } else {
            FilePath::new(joined).ok()
        }
    }

    fn is_settings_file(&self, path: &FilePath) -> bool {
        path.as_str() == SETTINGS_FILE
    }
}

impl VirtualFs for LocalFs {
    fn list(&self) -> FsResult<Vec<FilePath>> {
        let walker = WalkBuilder::new(&self.root)
            .standard_filters(false)
            .hidden(false)
            .follow_links(false)
            .filter_entry(|entry| {
                !SKIPPED_DIRS
                    .iter()
                    .any(|skipped| entry.file_name() == std::ffi::OsStr::new(skipped))
            })
            .build();

        let mut paths = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| FsError::Other(e.to_string()))?;
            if entry.depth() == 0 {
                continue;
            }
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            if let Some(path) = self.relative(entry.path(), is_dir) {
                if !self.is_settings_file(&path) {
                    paths.push(path);
                }
            }
        }
        paths.sort();
        Ok(paths)
    }

    fn read(&self, path: &FilePath) -> FsResult<String> {
        std::fs::read_to_string(self.absolute(path)).map_err(|e| FsError::from_io(e, path))
    }

    fn write(&self, path: &FilePath, content: &str) -> FsResult<()> {
        let target = self.absolute(path);
        let parent = target
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.root.clone());
        std::fs::create_dir_all(&parent).map_err(|e| FsError::from_io(e, path))?;

        let mut tmp = tempfile::NamedTempFile::new_in(&parent)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&target).map_err(|e| FsError::Io(e.error))?;
        Ok(())
    }

    fn create_dir(&self, path: &FilePath) -> FsResult<()> {
        std::fs::create_dir_all(self.absolute(path)).map_err(|e| FsError::from_io(e, path))
    }

    fn remove(&self, path: &FilePath) -> FsResult<()> {
        let target = self.absolute(path);
        let metadata = std::fs::metadata(&target).map_err(|e| FsError::from_io(e, path))?;
        if metadata.is_dir() {
            std::fs::remove_dir_all(&target)
        } else {
            std::fs::remove_file(&target)
        }
        .map_err(|e| FsError::from_io(e, path))
    }

    fn rename(&self, from: &FilePath, to: &FilePath) -> FsResult<()> {
        let source = self.absolute(from);
        let target = self.absolute(to);
        if !source.exists() {
            return Err(FsError::NotFound(from.to_string()));
        }
        if target.exists() {
            return Err(FsError::AlreadyExists(to.to_string()));
        }
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(|e| FsError::from_io(e, to))?;
        }
        std::fs::rename(&source, &target).map_err(|e| FsError::from_io(e, from))
    }

    fn exists(&self, path: &FilePath) -> bool {
        self.absolute(path).exists()
    }
}
