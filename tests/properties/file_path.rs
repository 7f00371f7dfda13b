//! Property tests for path normalization.

use proptest::prelude::*;

use tokenpad::FilePath;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Normalization never panics on arbitrary input.
    #[test]
    fn property_new_never_panics(s in "(?s).{0,128}") {
        let _ = FilePath::new(&s);
        let _ = FilePath::dir(&s);
    }

    /// PROPERTY: Normalizing a normalized path is a no-op.
    #[test]
    fn property_new_is_idempotent(s in "[a-z./\\\\]{0,48}") {
        if let Ok(path) = FilePath::new(&s) {
            prop_assert_eq!(FilePath::new(path.as_str()).unwrap(), path.clone());
            prop_assert!(!path.as_str().starts_with('/'));
            prop_assert!(!path.as_str().contains("//"));
        }
    }

    /// PROPERTY: A path never lies under itself, and always lies under its ancestors.
    #[test]
    fn property_starts_with_dir_matches_ancestors(
        segments in proptest::collection::vec("[a-z]{1,6}", 1..5)
    ) {
        let path = FilePath::new(segments.join("/")).unwrap();

        prop_assert!(!path.starts_with_dir(path.as_str()));
        for depth in 1..segments.len() {
            let ancestor = segments[..depth].join("/");
            prop_assert!(path.starts_with_dir(&ancestor));
        }
    }
}
