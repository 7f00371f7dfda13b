//! In-memory virtual filesystem
//!
//! Backs playground sessions that never touch disk. Clones share one store, so
//! a handle can be given to a session while the caller keeps another.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::ports::virtual_fs::{FsError, FsResult, VirtualFs};
use crate::domain::value_objects::FilePath;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry {
    Dir,
    File(String),
}

/// In-memory filesystem keyed by path without directory marker
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    entries: Arc<Mutex<BTreeMap<String, Entry>>>,
}

impl MemoryFs {
    /// Create an empty filesystem
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a filesystem holding the given files
    pub fn from_files<'a>(files: impl IntoIterator<Item = (&'a str, &'a str)>) -> FsResult<Self> {
        let fs = Self::new();
        for (path, content) in files {
            let path = FilePath::new(path).map_err(|e| FsError::Other(e.to_string()))?;
            fs.write(&path, content)?;
        }
        Ok(fs)
    }

    fn store(&self) -> MutexGuard<'_, BTreeMap<String, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn ensure_dirs(store: &mut BTreeMap<String, Entry>, dirs: &[FilePath]) -> FsResult<()> {
        for dir in dirs {
            match store.get(dir.trimmed()) {
                Some(Entry::File(_)) => return Err(FsError::NotADirectory(dir.to_string())),
                Some(Entry::Dir) => {}
                None => {
                    store.insert(dir.trimmed().to_string(), Entry::Dir);
                }
            }
        }
        Ok(())
    }

    fn is_below(key: &str, dir: &str) -> bool {
        key.len() > dir.len() && key.starts_with(dir) && key.as_bytes()[dir.len()] == b'/'
    }
}

impl VirtualFs for MemoryFs {
    fn list(&self) -> FsResult<Vec<FilePath>> {
        let store = self.store();
        let mut paths = Vec::with_capacity(store.len());
        for (key, entry) in store.iter() {
            let path = match entry {
                Entry::Dir => FilePath::dir(key),
                Entry::File(_) => FilePath::new(key),
            }
            .map_err(|e| FsError::Other(e.to_string()))?;
            paths.push(path);
        }
        paths.sort();
        Ok(paths)
    }

    fn read(&self, path: &FilePath) -> FsResult<String> {
        match self.store().get(path.trimmed()) {
            Some(Entry::File(content)) => Ok(content.clone()),
            Some(Entry::Dir) => Err(FsError::Other(format!("is a directory: {}", path))),
            None => Err(FsError::NotFound(path.to_string())),
        }
    }

    fn write(&self, path: &FilePath, content: &str) -> FsResult<()> {
        let mut store = self.store();
        Self::ensure_dirs(&mut store, &path.ancestors())?;
        if let Some(Entry::Dir) = store.get(path.trimmed()) {
            return Err(FsError::Other(format!("is a directory: {}", path)));
        }
        store.insert(path.trimmed().to_string(), Entry::File(content.to_string()));
        Ok(())
    }

    fn create_dir(&self, path: &FilePath) -> FsResult<()> {
        let mut store = self.store();
        let mut dirs = path.ancestors();
        dirs.push(FilePath::dir(path.trimmed()).map_err(|e| FsError::Other(e.to_string()))?);
        Self::ensure_dirs(&mut store, &dirs)
    }

    fn remove(&self, path: &FilePath) -> FsResult<()> {
        let mut store = self.store();
        let key = path.trimmed();
        match store.remove(key) {
            None => Err(FsError::NotFound(path.to_string())),
            Some(Entry::File(_)) => Ok(()),
            Some(Entry::Dir) => {
                store.retain(|existing, _| !Self::is_below(existing, key));
                Ok(())
            }
        }
    }

    fn rename(&self, from: &FilePath, to: &FilePath) -> FsResult<()> {
        let mut store = self.store();
        let from_key = from.trimmed();
        let to_key = to.trimmed();

        let Some(entry) = store.get(from_key).cloned() else {
            return Err(FsError::NotFound(from.to_string()));
        };
        if store.contains_key(to_key) {
            return Err(FsError::AlreadyExists(to.to_string()));
        }
        if Self::is_below(to_key, from_key) {
            return Err(FsError::Other(format!(
                "cannot move {} into itself ({})",
                from, to
            )));
        }
        Self::ensure_dirs(&mut store, &to.ancestors())?;

        let moved: Vec<(String, Entry)> = store
            .iter()
            .filter(|(key, _)| Self::is_below(key, from_key))
            .map(|(key, entry)| (key.clone(), entry.clone()))
            .collect();

        store.remove(from_key);
        store.insert(to_key.to_string(), entry);
        for (key, entry) in moved {
            store.remove(&key);
            let rest = &key[from_key.len() + 1..];
            store.insert(format!("{}/{}", to_key, rest), entry);
        }
        Ok(())
    }

    fn exists(&self, path: &FilePath) -> bool {
        self.store().contains_key(path.trimmed())
    }
}
