//! Watch loop

use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::time::{Duration, Instant};

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use sha2::{Digest, Sha256};

use crate::application::{
    ObservedChange, PlaygroundSession, RebuildDecision, RebuildReason, SessionEvent,
};
use crate::config::SETTINGS_FILE;
use crate::domain::ports::VirtualFs;
use crate::domain::services::{BuildSetTracker, Partition};
use crate::domain::value_objects::FilePath;
use crate::error::{PadError, PadResult};
use crate::infrastructure::{BasicPipeline, LocalFs};

use super::event::{WatchOptions, WatcherState};

/// Build once, then rebuild on relevant changes until `running` is cleared
pub fn watch(
    options: WatchOptions,
    running: Arc<AtomicBool>,
    event_callback: impl Fn(SessionEvent),
) -> PadResult<()> {
    let root = options
        .root
        .canonicalize()
        .unwrap_or_else(|_| options.root.clone());

    event_callback(SessionEvent::SessionStarted {
        root: root.display().to_string(),
    });

    let mut session = PlaygroundSession::new(
        LocalFs::new(root.clone()),
        BasicPipeline::new(),
        options.config_file.clone(),
    )
    .with_strategy(options.strategy);

    // A failed first build was already reported; keep watching so it can be fixed
    let _ = session.rebuild(RebuildReason::Requested, &event_callback);

    let mut known = KnownFiles::default();
    known.seed(session.fs(), &session.file_tree()?);

    let (tx, rx) = channel();

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<Event, notify::Error>| {
            if let Ok(event) = res {
                for path in event.paths {
                    let _ = tx.send(path);
                }
            }
        },
        Config::default(),
    )
    .map_err(|e| PadError::Watch(e.to_string()))?;

    watcher
        .watch(&root, RecursiveMode::Recursive)
        .map_err(|e| PadError::Watch(e.to_string()))?;

    let mut state = WatcherState::new(options.debounce);

    // Startup cooldown: notify sometimes reports existing files right after
    // the watcher is registered
    let cooldown_end = Instant::now() + Duration::from_millis(500);
    while Instant::now() < cooldown_end {
        let _ = rx.recv_timeout(Duration::from_millis(50));
    }

    while running.load(Ordering::SeqCst) {
        if let Ok(path) = rx.recv_timeout(Duration::from_millis(50)) {
            let tracker = session.tracker();
            if let Some(change) = known.observe(session.fs(), &tracker, &path) {
                state.add_change(change);
            }
        }

        if state.should_sync() {
            let changes = state.take_changes();
            match session.judge_batch(&changes, &event_callback) {
                Ok(RebuildDecision::Rebuild(reason)) => {
                    // Failures are reported through BuildFailed
                    let _ = session.rebuild(reason, &event_callback);
                }
                Ok(RebuildDecision::Skip) => {}
                Err(e) => event_callback(SessionEvent::Error {
                    message: e.to_string(),
                }),
            }
        }
    }

    event_callback(SessionEvent::Shutdown);
    Ok(())
}

/// Content hashes of input files and the set of input folders, used to turn
/// raw notify paths into changes worth judging
#[derive(Debug, Default)]
pub(crate) struct KnownFiles {
    hashes: HashMap<FilePath, String>,
    dirs: BTreeSet<FilePath>,
}

impl KnownFiles {
    pub(crate) fn seed(&mut self, fs: &LocalFs, tree: &Partition) {
        for path in &tree.input_files {
            if path.is_dir() {
                self.dirs.insert(path.clone());
            } else if let Ok(content) = fs.read(path) {
                self.hashes.insert(path.clone(), content_hash(&content));
            }
        }
    }

    /// Classify one notify path. `None` means the event is noise.
    pub(crate) fn observe(
        &mut self,
        fs: &LocalFs,
        tracker: &BuildSetTracker,
        path: &Path,
    ) -> Option<ObservedChange> {
        let is_dir = path.is_dir();
        let rel = fs.relative(path, is_dir)?;
        if is_ignored(&rel) || tracker.is_output(&rel) {
            return None;
        }

        if is_dir {
            if !self.dirs.insert(rel.clone()) {
                return None;
            }
            return Some(ObservedChange {
                path: rel,
                is_folder: true,
                removed: false,
            });
        }

        if path.exists() {
            let content = fs.read(&rel).ok()?;
            let hash = content_hash(&content);
            if self.hashes.get(&rel) == Some(&hash) {
                return None;
            }
            self.hashes.insert(rel.clone(), hash);
            return Some(ObservedChange {
                path: rel,
                is_folder: false,
                removed: false,
            });
        }

        if self.hashes.remove(&rel).is_some() {
            return Some(ObservedChange {
                path: rel,
                is_folder: false,
                removed: true,
            });
        }

        let dir = FilePath::dir(rel.trimmed()).ok()?;
        if self.dirs.remove(&dir) {
            self.hashes.retain(|known, _| !known.starts_with_dir(dir.trimmed()));
            self.dirs.retain(|known| !known.starts_with_dir(dir.trimmed()));
            return Some(ObservedChange {
                path: dir,
                is_folder: true,
                removed: true,
            });
        }
        None
    }
}

/// Settings, VCS metadata and atomic-write temp files
fn is_ignored(path: &FilePath) -> bool {
    if path.as_str() == SETTINGS_FILE || path.first_segment() == ".git" {
        return true;
    }
    path.file_name().starts_with(".tmp")
}

pub(crate) fn content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("sha256:{:x}", hasher.finalize())
}
