//! VirtualFs port - abstraction over the project's file tree
//!
//! The playground works on a virtual filesystem of normalized paths so the
//! domain layer runs the same against memory or a directory on disk.

use crate::domain::value_objects::FilePath;

/// Result type for virtual filesystem operations
pub type FsResult<T> = Result<T, FsError>;

/// Virtual filesystem operation errors
#[derive(Debug)]
pub enum FsError {
    /// Path does not exist
    NotFound(String),
    /// Target of a create or rename already exists
    AlreadyExists(String),
    /// A file sits where a directory is required
    NotADirectory(String),
    /// I/O error
    Io(std::io::Error),
    /// Other error
    Other(String),
}

impl FsError {
    /// Map an I/O error for `path` onto the port's variants
    pub fn from_io(err: std::io::Error, path: &FilePath) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(path.to_string()),
            std::io::ErrorKind::AlreadyExists => FsError::AlreadyExists(path.to_string()),
            _ => FsError::Io(err),
        }
    }
}

impl From<std::io::Error> for FsError {
    fn from(err: std::io::Error) -> Self {
        FsError::Io(err)
    }
}

impl std::fmt::Display for FsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FsError::NotFound(path) => write!(f, "file not found: {}", path),
            FsError::AlreadyExists(path) => write!(f, "already exists: {}", path),
            FsError::NotADirectory(path) => write!(f, "not a directory: {}", path),
            FsError::Io(err) => write!(f, "I/O error: {}", err),
            FsError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for FsError {}

/// Abstract virtual filesystem
///
/// Implementations:
/// - `MemoryFs` - in-memory store
/// - `LocalFs` - a directory on disk
pub trait VirtualFs {
    /// Full recursive listing, sorted, directories marked with a trailing slash
    fn list(&self) -> FsResult<Vec<FilePath>>;

    /// Read file content as string
    fn read(&self, path: &FilePath) -> FsResult<String>;

    /// Write content to a file, creating missing parent directories
    fn write(&self, path: &FilePath, content: &str) -> FsResult<()>;

    /// Create a directory and its parents
    fn create_dir(&self, path: &FilePath) -> FsResult<()>;

    /// Remove a file, or a directory with everything below it
    fn remove(&self, path: &FilePath) -> FsResult<()>;

    /// Move a file or a whole directory subtree
    fn rename(&self, from: &FilePath, to: &FilePath) -> FsResult<()>;

    /// Check if a file or directory exists
    fn exists(&self, path: &FilePath) -> bool;
}

impl<T: VirtualFs + ?Sized> VirtualFs for &T {
    fn list(&self) -> FsResult<Vec<FilePath>> {
        (**self).list()
    }

    fn read(&self, path: &FilePath) -> FsResult<String> {
        (**self).read(path)
    }

    fn write(&self, path: &FilePath, content: &str) -> FsResult<()> {
        (**self).write(path, content)
    }

    fn create_dir(&self, path: &FilePath) -> FsResult<()> {
        (**self).create_dir(path)
    }

    fn remove(&self, path: &FilePath) -> FsResult<()> {
        (**self).remove(path)
    }

    fn rename(&self, from: &FilePath, to: &FilePath) -> FsResult<()> {
        (**self).rename(from, to)
    }

    fn exists(&self, path: &FilePath) -> bool {
        (**self).exists(path)
    }
}
