//! Rebuild decisions
//!
//! Two strategies decide whether a filesystem change warrants a rebuild:
//!
//! - `ChangedPath` compares the single changed path against the input files,
//!   with folder changes always rebuilding.
//! - `Repartition` re-partitions the whole listing and rebuilds whenever the
//!   input set moved, which also covers partial multi-file folder operations.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::services::{should_rebuild, Partition};
use crate::domain::value_objects::FilePath;

/// How changes are judged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RebuildStrategy {
    /// Membership of the changed path, folder changes always rebuild
    #[default]
    ChangedPath,
    /// Full re-partition after every change
    Repartition,
}

impl RebuildStrategy {
    /// Parse a strategy name as used in config and env
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "changed-path" | "changed_path" | "path" => Some(RebuildStrategy::ChangedPath),
            "repartition" | "full" => Some(RebuildStrategy::Repartition),
            _ => None,
        }
    }
}

impl fmt::Display for RebuildStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RebuildStrategy::ChangedPath => write!(f, "changed-path"),
            RebuildStrategy::Repartition => write!(f, "repartition"),
        }
    }
}

/// Why a rebuild was triggered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebuildReason {
    /// The pipeline config itself changed
    ConfigChanged,
    /// A token input changed
    InputChanged,
    /// A folder was renamed or removed
    FolderChanged,
    /// The set of input files is different from last time
    InputSetChanged,
    /// Explicit request
    Requested,
}

impl fmt::Display for RebuildReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RebuildReason::ConfigChanged => "config changed",
            RebuildReason::InputChanged => "input changed",
            RebuildReason::FolderChanged => "folder changed",
            RebuildReason::InputSetChanged => "input set changed",
            RebuildReason::Requested => "requested",
        };
        write!(f, "{}", label)
    }
}

/// Outcome of judging a change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebuildDecision {
    Rebuild(RebuildReason),
    Skip,
}

impl RebuildDecision {
    pub fn is_rebuild(&self) -> bool {
        matches!(self, RebuildDecision::Rebuild(_))
    }
}

/// A change to judge
#[derive(Debug, Clone, Copy)]
pub struct Change<'a> {
    /// Changed path as reported (leading slashes allowed)
    pub path: &'a str,
    /// The change concerns a directory
    pub is_folder: bool,
    /// The change concerns the pipeline config
    pub is_config: bool,
}

/// A change reported by a filesystem watcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservedChange {
    pub path: FilePath,
    pub is_folder: bool,
    /// The path no longer exists
    pub removed: bool,
}

/// Judge a change.
///
/// `before` is the partition the changed path is looked up in; for removals
/// this is the listing from before the removal. `after` and `baseline` are
/// only consulted by `Repartition`.
pub fn decide(
    strategy: RebuildStrategy,
    change: Change<'_>,
    before: &Partition,
    after: &Partition,
    baseline: Option<&BTreeSet<String>>,
) -> RebuildDecision {
    if change.is_config {
        return RebuildDecision::Rebuild(RebuildReason::ConfigChanged);
    }

    match strategy {
        RebuildStrategy::ChangedPath => {
            if should_rebuild(change.path, &before.input_files, false) {
                RebuildDecision::Rebuild(RebuildReason::InputChanged)
            } else if should_rebuild(change.path, &before.input_files, change.is_folder) {
                RebuildDecision::Rebuild(RebuildReason::FolderChanged)
            } else {
                RebuildDecision::Skip
            }
        }
        RebuildStrategy::Repartition => {
            let moved = baseline.is_some_and(|previous| {
                let current: BTreeSet<&str> = after.input_set();
                previous.len() != current.len()
                    || previous.iter().any(|path| !current.contains(path.as_str()))
            });
            if moved {
                RebuildDecision::Rebuild(RebuildReason::InputSetChanged)
            } else if before.is_input(change.path) || after.is_input(change.path) {
                RebuildDecision::Rebuild(RebuildReason::InputChanged)
            } else {
                RebuildDecision::Skip
            }
        }
    }
}

/// Owned copy of a partition's input set
pub fn input_baseline(partition: &Partition) -> BTreeSet<String> {
    partition
        .input_files
        .iter()
        .map(|path| path.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(inputs: &[&str], outputs: &[&str]) -> Partition {
        Partition {
            input_files: inputs.iter().map(|p| FilePath::new(p).unwrap()).collect(),
            output_files: outputs.iter().map(|p| FilePath::new(p).unwrap()).collect(),
        }
    }

    fn change(path: &str) -> Change<'_> {
        Change {
            path,
            is_folder: false,
            is_config: false,
        }
    }

    #[test]
    fn strategy_parse() {
        assert_eq!(RebuildStrategy::parse("changed-path"), Some(RebuildStrategy::ChangedPath));
        assert_eq!(RebuildStrategy::parse(" Repartition "), Some(RebuildStrategy::Repartition));
        assert_eq!(RebuildStrategy::parse("sometimes"), None);
        for strategy in [RebuildStrategy::ChangedPath, RebuildStrategy::Repartition] {
            assert_eq!(RebuildStrategy::parse(&strategy.to_string()), Some(strategy));
        }
    }

    #[test]
    fn config_change_always_rebuilds() {
        let empty = Partition::default();
        let decision = decide(
            RebuildStrategy::ChangedPath,
            Change {
                path: "sd.config.json",
                is_folder: false,
                is_config: true,
            },
            &empty,
            &empty,
            None,
        );
        assert_eq!(decision, RebuildDecision::Rebuild(RebuildReason::ConfigChanged));
    }

    #[test]
    fn changed_path_uses_membership() {
        let tree = split(&["tokens/color.json"], &["build/css/vars.css"]);
        let strategy = RebuildStrategy::ChangedPath;

        assert_eq!(
            decide(strategy, change("/tokens/color.json"), &tree, &tree, None),
            RebuildDecision::Rebuild(RebuildReason::InputChanged)
        );
        assert_eq!(
            decide(strategy, change("build/css/vars.css"), &tree, &tree, None),
            RebuildDecision::Skip
        );
    }

    #[test]
    fn changed_path_folder_override() {
        let tree = split(&["tokens/"], &["build/"]);
        let folder = Change {
            path: "build/css",
            is_folder: true,
            is_config: false,
        };
        assert_eq!(
            decide(RebuildStrategy::ChangedPath, folder, &tree, &tree, None),
            RebuildDecision::Rebuild(RebuildReason::FolderChanged)
        );
    }

    #[test]
    fn repartition_detects_moved_inputs() {
        let before = split(&["tokens/", "tokens/a.json", "tokens/b.json"], &[]);
        let after = split(&["tokens/", "tokens/a.json", "tokens/c.json"], &[]);
        let baseline = input_baseline(&before);

        let folder = Change {
            path: "somewhere/else",
            is_folder: true,
            is_config: false,
        };
        assert_eq!(
            decide(RebuildStrategy::Repartition, folder, &before, &after, Some(&baseline)),
            RebuildDecision::Rebuild(RebuildReason::InputSetChanged)
        );
    }

    #[test]
    fn repartition_ignores_folder_flag() {
        let tree = split(&["tokens/a.json"], &["build/", "build/css/"]);
        let baseline = input_baseline(&tree);
        let folder = Change {
            path: "build/css/",
            is_folder: true,
            is_config: false,
        };
        assert_eq!(
            decide(RebuildStrategy::Repartition, folder, &tree, &tree, Some(&baseline)),
            RebuildDecision::Skip
        );
    }

    #[test]
    fn repartition_content_edit_of_input_rebuilds() {
        let tree = split(&["tokens/a.json"], &[]);
        let baseline = input_baseline(&tree);
        assert_eq!(
            decide(
                RebuildStrategy::Repartition,
                change("tokens/a.json"),
                &tree,
                &tree,
                Some(&baseline)
            ),
            RebuildDecision::Rebuild(RebuildReason::InputChanged)
        );
    }
}
