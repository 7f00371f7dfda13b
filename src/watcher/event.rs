//! Watch options and debounce state

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::application::{ObservedChange, RebuildStrategy};
use crate::domain::value_objects::FilePath;

/// Debounce duration in milliseconds
pub const DEBOUNCE_MS: u64 = 100;

/// Watch options
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Project directory
    pub root: PathBuf,
    /// Pipeline config, relative to the root
    pub config_file: FilePath,
    /// How changes are judged
    pub strategy: RebuildStrategy,
    /// Quiet period before a batch is processed
    pub debounce: Duration,
}

impl WatchOptions {
    pub fn new(root: impl Into<PathBuf>, config_file: FilePath) -> Self {
        Self {
            root: root.into(),
            config_file,
            strategy: RebuildStrategy::default(),
            debounce: Duration::from_millis(DEBOUNCE_MS),
        }
    }
}

/// Watcher state for debouncing
pub(crate) struct WatcherState {
    pub(crate) pending_changes: BTreeMap<FilePath, ObservedChange>,
    pub(crate) last_change: Option<Instant>,
    debounce: Duration,
}

impl WatcherState {
    pub(crate) fn new(debounce: Duration) -> Self {
        Self {
            pending_changes: BTreeMap::new(),
            last_change: None,
            debounce,
        }
    }

    /// Queue a change. A later change to the same path replaces the earlier one.
    pub(crate) fn add_change(&mut self, change: ObservedChange) {
        self.pending_changes.insert(change.path.clone(), change);
        self.last_change = Some(Instant::now());
    }

    pub(crate) fn should_sync(&self) -> bool {
        if let Some(last) = self.last_change {
            !self.pending_changes.is_empty() && last.elapsed() >= self.debounce
        } else {
            false
        }
    }

    pub(crate) fn take_changes(&mut self) -> Vec<ObservedChange> {
        let changes = std::mem::take(&mut self.pending_changes)
            .into_values()
            .collect();
        self.last_change = None;
        changes
    }
}
