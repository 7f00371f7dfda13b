//! Build set tracking
//!
//! Pure domain logic that splits a filesystem listing into token inputs and
//! generated outputs, and decides whether a changed path warrants a rebuild.
//!
//! Only the top-level segment of each platform's build path is used as an
//! output root, so output trees must never share a root with input trees.
//! Without a successful build every path is an input.

use std::collections::BTreeSet;

use crate::domain::entities::BuildConfig;
use crate::domain::value_objects::FilePath;

/// A listing split into inputs and generated outputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    /// Paths not under any output root
    pub input_files: Vec<FilePath>,
    /// Paths under an output root
    pub output_files: Vec<FilePath>,
}

impl Partition {
    /// Whether `path` (leading slashes ignored) is an input
    pub fn is_input(&self, path: &str) -> bool {
        contains_path(&self.input_files, path)
    }

    /// Input paths as a set, for comparing listings
    pub fn input_set(&self) -> BTreeSet<&str> {
        self.input_files.iter().map(FilePath::as_str).collect()
    }

    /// Total number of classified paths
    pub fn len(&self) -> usize {
        self.input_files.len() + self.output_files.len()
    }

    /// Whether the listing was empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Top-level output directories of a build config.
///
/// An absent config yields the empty set.
pub fn compute_output_prefixes(config: Option<&BuildConfig>) -> BTreeSet<String> {
    let Some(config) = config else {
        return BTreeSet::new();
    };
    config
        .build_dirs()
        .iter()
        .map(|dir| dir.first_segment().to_string())
        .collect()
}

/// Split a listing into inputs and outputs.
///
/// A path is an output iff it starts with `prefix + "/"` for some prefix.
/// Listing order is preserved within each half.
pub fn partition<'a>(
    files: impl IntoIterator<Item = &'a FilePath>,
    prefixes: &BTreeSet<String>,
) -> Partition {
    let mut result = Partition::default();
    for file in files {
        if prefixes.iter().any(|prefix| file.starts_with_dir(prefix)) {
            result.output_files.push(file.clone());
        } else {
            result.input_files.push(file.clone());
        }
    }
    result
}

/// Whether a change to `changed_path` should trigger a rebuild.
///
/// True iff `is_folder` is set, or the path with leading slashes stripped is
/// one of `input_files`. A folder change can move several inputs at once, so it
/// always rebuilds.
pub fn should_rebuild(changed_path: &str, input_files: &[FilePath], is_folder: bool) -> bool {
    is_folder || contains_path(input_files, changed_path)
}

fn contains_path(files: &[FilePath], path: &str) -> bool {
    let stripped = path.trim_start_matches('/');
    files.iter().any(|file| file.as_str() == stripped)
}

/// Output classification for one realized build config
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSetTracker {
    prefixes: BTreeSet<String>,
}

impl BuildSetTracker {
    /// Tracker for the given config (or none)
    pub fn new(config: Option<&BuildConfig>) -> Self {
        Self {
            prefixes: compute_output_prefixes(config),
        }
    }

    /// Output roots in effect
    pub fn prefixes(&self) -> &BTreeSet<String> {
        &self.prefixes
    }

    /// Whether `path` falls under an output root
    pub fn is_output(&self, path: &FilePath) -> bool {
        self.prefixes.iter().any(|prefix| path.starts_with_dir(prefix))
    }

    /// Partition a listing
    pub fn partition<'a>(&self, files: impl IntoIterator<Item = &'a FilePath>) -> Partition {
        partition(files, &self.prefixes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::PlatformConfig;

    fn paths(raw: &[&str]) -> Vec<FilePath> {
        raw.iter().map(|p| FilePath::new(p).unwrap()).collect()
    }

    fn css_js_config() -> BuildConfig {
        BuildConfig::default()
            .with_platform("css", PlatformConfig::new("build/css/"))
            .with_platform("js", PlatformConfig::new("build/js/"))
    }

    #[test]
    fn prefixes_use_first_segment() {
        let prefixes = compute_output_prefixes(Some(&css_js_config()));
        assert_eq!(prefixes, BTreeSet::from(["build".to_string()]));
    }

    #[test]
    fn prefixes_are_empty_without_config() {
        assert!(compute_output_prefixes(None).is_empty());
    }

    #[test]
    fn prefixes_from_several_roots() {
        let config = BuildConfig::default()
            .with_platform("css", PlatformConfig::new("dist/css/"))
            .with_platform("ios", PlatformConfig::new("/ios/Generated/"));
        let prefixes = compute_output_prefixes(Some(&config));
        assert_eq!(
            prefixes,
            BTreeSet::from(["dist".to_string(), "ios".to_string()])
        );
    }

    #[test]
    fn partition_splits_outputs_from_inputs() {
        let files = paths(&[
            "tokens/color.json",
            "build/css/vars.css",
            "build/js/vars.js",
        ]);
        let prefixes = compute_output_prefixes(Some(&css_js_config()));
        let split = partition(&files, &prefixes);

        assert_eq!(split.output_files, paths(&["build/css/vars.css", "build/js/vars.js"]));
        assert_eq!(split.input_files, paths(&["tokens/color.json"]));
    }

    #[test]
    fn partition_classifies_marked_directories() {
        let files = paths(&["build/", "build/css/", "tokens/", "buildings/a.json"]);
        let split = partition(&files, &BTreeSet::from(["build".to_string()]));

        assert_eq!(split.output_files, paths(&["build/", "build/css/"]));
        assert_eq!(split.input_files, paths(&["tokens/", "buildings/a.json"]));
    }

    #[test]
    fn partition_without_prefixes_is_all_inputs() {
        let files = paths(&["tokens/color.json", "build/css/vars.css"]);
        let split = partition(&files, &BTreeSet::new());
        assert!(split.output_files.is_empty());
        assert_eq!(split.input_files, files);
    }

    #[test]
    fn should_rebuild_for_inputs_only() {
        let files = paths(&[
            "tokens/color.json",
            "build/css/vars.css",
            "build/js/vars.js",
        ]);
        let split = BuildSetTracker::new(Some(&css_js_config())).partition(&files);

        assert!(should_rebuild("tokens/color.json", &split.input_files, false));
        assert!(should_rebuild("/tokens/color.json", &split.input_files, false));
        assert!(!should_rebuild("build/css/vars.css", &split.input_files, false));
        assert!(!should_rebuild("tokens/missing.json", &split.input_files, false));
    }

    #[test]
    fn folder_changes_always_rebuild() {
        assert!(should_rebuild("build/css", &[], true));
        assert!(should_rebuild("tokens/color/", &[], true));
    }

    #[test]
    fn tracker_reports_outputs() {
        let tracker = BuildSetTracker::new(Some(&css_js_config()));
        assert!(tracker.is_output(&FilePath::new("build/js/vars.js").unwrap()));
        assert!(!tracker.is_output(&FilePath::new("tokens/a.json").unwrap()));
        assert!(!BuildSetTracker::default().is_output(&FilePath::new("build/js/vars.js").unwrap()));
    }

    #[test]
    fn partition_helpers() {
        let files = paths(&["tokens/a.json", "build/css/vars.css"]);
        let split = BuildSetTracker::new(Some(&css_js_config())).partition(&files);
        assert_eq!(split.len(), 2);
        assert!(!split.is_empty());
        assert!(split.is_input("/tokens/a.json"));
        assert_eq!(split.input_set(), BTreeSet::from(["tokens/a.json"]));
    }
}
