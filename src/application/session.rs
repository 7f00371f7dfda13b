//! Playground session
//!
//! Owns the virtual filesystem, the pipeline and the build state, and turns
//! file edits into rebuild decisions. The session is single-threaded: every
//! rebuild runs to completion before the next change is judged, so callers
//! serialize triggers simply by driving one session from one loop.

use std::collections::BTreeSet;

use crate::domain::entities::{BuildConfig, BuildState};
use crate::domain::ports::{BuildReport, TokenPipeline, VirtualFs};
use crate::domain::services::{BuildSetTracker, Partition};
use crate::domain::value_objects::FilePath;
use crate::error::PadResult;

use super::decision::{
    decide, input_baseline, Change, ObservedChange, RebuildDecision, RebuildReason,
    RebuildStrategy,
};
use super::event::SessionEvent;
use super::project;

/// A playground over one virtual filesystem
pub struct PlaygroundSession<F: VirtualFs, P: TokenPipeline> {
    fs: F,
    pipeline: P,
    config_path: FilePath,
    strategy: RebuildStrategy,
    state: BuildState,
    baseline: Option<BTreeSet<String>>,
}

impl<F: VirtualFs, P: TokenPipeline> PlaygroundSession<F, P> {
    /// Create a session with no build yet
    pub fn new(fs: F, pipeline: P, config_path: FilePath) -> Self {
        Self {
            fs,
            pipeline,
            config_path,
            strategy: RebuildStrategy::default(),
            state: BuildState::default(),
            baseline: None,
        }
    }

    /// Use a different rebuild strategy
    pub fn with_strategy(mut self, strategy: RebuildStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    pub fn state(&self) -> &BuildState {
        &self.state
    }

    pub fn config_path(&self) -> &FilePath {
        &self.config_path
    }

    pub fn strategy(&self) -> RebuildStrategy {
        self.strategy
    }

    /// Output classification of the last successful build
    pub fn tracker(&self) -> BuildSetTracker {
        BuildSetTracker::new(self.state.config())
    }

    /// Partition a fresh listing with the current output roots
    pub fn file_tree(&self) -> PadResult<Partition> {
        let listing = self.fs.list()?;
        Ok(self.tracker().partition(&listing))
    }

    /// Write the starter project if no pipeline config exists yet
    pub fn seed_default_project(&self, on_event: &impl Fn(SessionEvent)) -> PadResult<bool> {
        if self.fs.exists(&self.config_path) {
            return Ok(false);
        }
        project::write_default_project(&self.fs, &self.config_path)?;
        on_event(SessionEvent::ProjectSeeded {
            config: self.config_path.to_string(),
        });
        Ok(true)
    }

    /// Clean the previous outputs and run the pipeline.
    ///
    /// On success the realized config replaces the build state. On failure the
    /// previous state stays in effect and the error is returned.
    pub fn rebuild(
        &mut self,
        reason: RebuildReason,
        on_event: &impl Fn(SessionEvent),
    ) -> PadResult<BuildReport> {
        on_event(SessionEvent::BuildStarted {
            reason: reason.to_string(),
        });

        let removed = match self.clean_outputs() {
            Ok(removed) => removed,
            Err(e) => {
                on_event(SessionEvent::BuildFailed {
                    message: e.to_string(),
                });
                return Err(e);
            }
        };
        on_event(SessionEvent::OutputsCleaned { removed });

        let report = match self.pipeline.run(&self.fs, &self.config_path) {
            Ok(report) => report,
            Err(e) => {
                on_event(SessionEvent::BuildFailed {
                    message: e.to_string(),
                });
                return Err(e);
            }
        };

        self.state.record_success(report.config.clone());
        self.baseline = Some(input_baseline(&self.file_tree()?));

        on_event(SessionEvent::BuildComplete {
            platforms: report.config.platforms.len(),
            written: report.written.len(),
        });
        Ok(report)
    }

    /// Remove every file under the build paths of the previous run
    fn clean_outputs(&self) -> PadResult<usize> {
        let Some(previous) = self.state.config() else {
            return Ok(0);
        };
        let dirs = previous.build_dirs();
        let mut removed = 0;
        for path in self.fs.list()? {
            if path.is_dir() {
                continue;
            }
            if dirs.iter().any(|dir| path.starts_with_dir(dir.trimmed())) {
                self.fs.remove(&path)?;
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// A file was saved (or a folder changed). Rebuilds when the change
    /// warrants it.
    pub fn on_did_save(
        &mut self,
        path: &str,
        is_folder: bool,
        on_event: &impl Fn(SessionEvent),
    ) -> PadResult<RebuildDecision> {
        let tree = self.file_tree()?;
        self.judge(path, is_folder, &tree, tree.clone(), on_event)
    }

    /// Several changes observed together. Each is judged against the same
    /// listing and the pipeline runs at most once. Removed paths are looked up
    /// as they were before the removal.
    pub fn on_batch(
        &mut self,
        changes: &[ObservedChange],
        on_event: &impl Fn(SessionEvent),
    ) -> PadResult<RebuildDecision> {
        let decision = self.judge_batch(changes, on_event)?;
        if let RebuildDecision::Rebuild(reason) = decision {
            self.rebuild(reason, on_event)?;
        }
        Ok(decision)
    }

    /// Judge a batch without running the pipeline
    pub fn judge_batch(
        &mut self,
        changes: &[ObservedChange],
        on_event: &impl Fn(SessionEvent),
    ) -> PadResult<RebuildDecision> {
        let after = self.file_tree()?;
        let mut before = after.clone();
        let tracker = self.tracker();
        for change in changes.iter().filter(|c| c.removed) {
            if !tracker.is_output(&change.path) {
                before.input_files.push(change.path.clone());
            }
        }

        let baseline = self.baseline.take();
        let mut decision = RebuildDecision::Skip;
        for observed in changes {
            on_event(SessionEvent::FileChanged {
                path: observed.path.to_string(),
                is_folder: observed.is_folder,
            });
            let change = Change {
                path: observed.path.as_str(),
                is_folder: observed.is_folder,
                is_config: observed.path == self.config_path,
            };
            let judged = decide(self.strategy, change, &before, &after, baseline.as_ref());
            if judged.is_rebuild() && !decision.is_rebuild() {
                decision = judged;
            }
        }
        self.baseline = Some(input_baseline(&after));

        if !decision.is_rebuild() {
            for observed in changes {
                on_event(SessionEvent::RebuildSkipped {
                    path: observed.path.to_string(),
                });
            }
        }
        Ok(decision)
    }

    fn judge(
        &mut self,
        path: &str,
        is_folder: bool,
        before: &Partition,
        after: Partition,
        on_event: &impl Fn(SessionEvent),
    ) -> PadResult<RebuildDecision> {
        on_event(SessionEvent::FileChanged {
            path: path.to_string(),
            is_folder,
        });

        let change = Change {
            path,
            is_folder,
            is_config: self.is_config(path),
        };
        let decision = decide(
            self.strategy,
            change,
            before,
            &after,
            self.baseline.as_ref(),
        );
        self.baseline = Some(input_baseline(&after));

        match decision {
            RebuildDecision::Rebuild(reason) => {
                self.rebuild(reason, on_event)?;
            }
            RebuildDecision::Skip => on_event(SessionEvent::RebuildSkipped {
                path: path.to_string(),
            }),
        }
        Ok(decision)
    }

    fn is_config(&self, path: &str) -> bool {
        FilePath::new(path)
            .map(|p| p == self.config_path)
            .unwrap_or(false)
    }

    /// Create an empty file. Empty files are not judged until saved.
    pub fn create_file(&self, path: &FilePath) -> PadResult<()> {
        self.fs.write(path, "")?;
        Ok(())
    }

    /// Create a folder
    pub fn create_folder(&self, path: &FilePath) -> PadResult<()> {
        self.fs.create_dir(path)?;
        Ok(())
    }

    /// Save new content to a file and judge the change
    pub fn save(
        &mut self,
        path: &FilePath,
        content: &str,
        on_event: &impl Fn(SessionEvent),
    ) -> PadResult<RebuildDecision> {
        self.fs.write(path, content)?;
        self.on_did_save(path.as_str(), false, on_event)
    }

    /// Remove a file or folder and judge the change against the listing from
    /// before the removal
    pub fn remove(
        &mut self,
        path: &FilePath,
        on_event: &impl Fn(SessionEvent),
    ) -> PadResult<RebuildDecision> {
        let before = self.file_tree()?;
        self.fs.remove(path)?;
        let after = self.file_tree()?;
        self.judge(path.as_str(), path.is_dir(), &before, after, on_event)
    }

    /// Rename a file or folder. Folders are judged with the folder override.
    pub fn rename(
        &mut self,
        from: &FilePath,
        to: &FilePath,
        on_event: &impl Fn(SessionEvent),
    ) -> PadResult<RebuildDecision> {
        let mut before = self.file_tree()?;
        let is_folder = from.is_dir()
            || before
                .input_files
                .iter()
                .chain(&before.output_files)
                .any(|p| p.is_dir() && p.trimmed() == from.trimmed());
        self.fs.rename(from, to)?;
        let after = self.file_tree()?;

        let changed = if before.is_input(from.as_str()) {
            from.as_str().to_string()
        } else {
            to.as_str().to_string()
        };
        if !is_folder && after.is_input(to.as_str()) {
            // Moving a file into the inputs counts as an input change
            before.input_files.push(to.clone());
        }
        self.judge(&changed, is_folder, &before, after, on_event)
    }

    /// Remove everything except the pipeline config and the folders holding
    /// it. Returns the number of removed entries, a removed folder counting once.
    pub fn clear_all(&self) -> PadResult<usize> {
        let mut removed: Vec<FilePath> = Vec::new();
        for path in self.fs.list()? {
            if path == self.config_path || self.config_path.starts_with_dir(path.trimmed()) {
                continue;
            }
            if removed
                .iter()
                .any(|dir| dir.is_dir() && path.starts_with_dir(dir.trimmed()))
            {
                continue;
            }
            self.fs.remove(&path)?;
            removed.push(path);
        }
        Ok(removed.len())
    }

    /// The config in effect, if a build has succeeded
    pub fn build_config(&self) -> Option<&BuildConfig> {
        self.state.config()
    }
}
