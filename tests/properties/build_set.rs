//! Property tests for partitioning and rebuild decisions.

use std::collections::BTreeSet;

use proptest::prelude::*;

use tokenpad::domain::entities::{BuildConfig, PlatformConfig};
use tokenpad::{compute_output_prefixes, partition, should_rebuild, FilePath};

fn segment() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("build".to_string()),
        Just("dist".to_string()),
        Just("tokens".to_string()),
        proptest::string::string_regex("[a-z][a-z0-9_.-]{0,7}").unwrap(),
    ]
}

fn file_path() -> impl Strategy<Value = FilePath> {
    (proptest::collection::vec(segment(), 1..=4), any::<bool>()).prop_map(|(segments, dir)| {
        let joined = segments.join("/");
        if dir {
            FilePath::dir(joined).unwrap()
        } else {
            FilePath::new(joined).unwrap()
        }
    })
}

fn listing() -> impl Strategy<Value = Vec<FilePath>> {
    proptest::collection::vec(file_path(), 0..24)
}

fn prefixes() -> impl Strategy<Value = BTreeSet<String>> {
    proptest::collection::btree_set(segment(), 0..3)
}

fn config_with_build_paths(paths: &[String]) -> BuildConfig {
    paths
        .iter()
        .enumerate()
        .fold(BuildConfig::default(), |config, (i, path)| {
            config.with_platform(format!("p{}", i), PlatformConfig::new(path.clone()))
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Every listed path lands in exactly one half.
    #[test]
    fn property_partition_is_disjoint_and_exhaustive(
        files in listing(),
        roots in prefixes()
    ) {
        let split = partition(&files, &roots);

        prop_assert_eq!(split.len(), files.len());
        let mut merged: Vec<&FilePath> = split.input_files.iter().chain(&split.output_files).collect();
        let mut expected: Vec<&FilePath> = files.iter().collect();
        merged.sort();
        expected.sort();
        prop_assert_eq!(merged, expected);

        for output in &split.output_files {
            prop_assert!(roots.iter().any(|root| output.starts_with_dir(root)));
        }
        for input in &split.input_files {
            prop_assert!(!roots.iter().any(|root| input.starts_with_dir(root)));
        }
    }

    /// PROPERTY: Without a build config everything is an input.
    #[test]
    fn property_no_config_means_all_inputs(files in listing()) {
        let roots = compute_output_prefixes(None);
        let split = partition(&files, &roots);

        prop_assert!(split.output_files.is_empty());
        prop_assert_eq!(split.input_files, files);
    }

    /// PROPERTY: The same listing and roots always give the same partition.
    #[test]
    fn property_partition_is_idempotent(
        files in listing(),
        roots in prefixes()
    ) {
        prop_assert_eq!(partition(&files, &roots), partition(&files, &roots));
    }

    /// PROPERTY: Partitioning the inputs again changes nothing.
    #[test]
    fn property_inputs_partition_to_themselves(
        files in listing(),
        roots in prefixes()
    ) {
        let split = partition(&files, &roots);
        let again = partition(&split.input_files, &roots);

        prop_assert!(again.output_files.is_empty());
        prop_assert_eq!(again.input_files, split.input_files);
    }

    /// PROPERTY: A real build config splits the listing without loss or overlap.
    #[test]
    fn property_config_partition_is_disjoint_and_exhaustive(
        files in listing(),
        paths in proptest::collection::vec(
            proptest::collection::vec(segment(), 1..=3).prop_map(|s| format!("{}/", s.join("/"))),
            0..4
        )
    ) {
        let config = config_with_build_paths(&paths);
        let roots = compute_output_prefixes(Some(&config));
        let split = partition(&files, &roots);

        prop_assert_eq!(split.len(), files.len());
        for path in &files {
            let is_output = split.output_files.contains(path);
            prop_assert_ne!(is_output, split.input_files.contains(path));
            let under_build_root = paths
                .iter()
                .any(|build| path.starts_with_dir(build.split('/').next().unwrap_or_default()));
            prop_assert_eq!(is_output, under_build_root);
        }
        if paths.is_empty() {
            prop_assert!(split.output_files.is_empty());
        }
    }

    /// PROPERTY: Output roots are the first segments of the build paths.
    #[test]
    fn property_prefixes_are_first_segments(
        paths in proptest::collection::vec(
            proptest::collection::vec(segment(), 1..=3).prop_map(|s| format!("{}/", s.join("/"))),
            1..4
        )
    ) {
        let config = config_with_build_paths(&paths);
        let roots = compute_output_prefixes(Some(&config));

        let expected: BTreeSet<String> = paths
            .iter()
            .map(|p| p.split('/').next().unwrap_or_default().to_string())
            .collect();
        prop_assert_eq!(roots, expected);
    }

    /// PROPERTY: A rebuild happens iff the change is a folder or the path is an input.
    #[test]
    fn property_should_rebuild_iff_folder_or_member(
        files in listing(),
        changed in file_path(),
        slashes in 0usize..3,
        is_folder in any::<bool>()
    ) {
        let reported = format!("{}{}", "/".repeat(slashes), changed.as_str());
        let member = files.contains(&changed);

        prop_assert_eq!(should_rebuild(&reported, &files, is_folder), is_folder || member);
    }
}
