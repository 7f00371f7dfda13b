//! Tests for the config module

use std::collections::HashMap;
use std::fs;

use tempfile::tempdir;

use super::loader::apply_overrides;
use super::types::*;
use super::*;
use crate::application::RebuildStrategy;
use crate::error::PadError;

fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_settings_default() {
    let settings = Settings::default();

    assert_eq!(settings.project.config_file, "sd.config.json");
    assert_eq!(settings.watch.debounce_ms, 100);
    assert_eq!(settings.watch.strategy, RebuildStrategy::ChangedPath);
    assert_eq!(settings.output.verbosity, Verbosity::Normal);
}

#[test]
fn test_settings_parse_toml() {
    let toml = r#"
[project]
config_file = "config/tokens.json"

[watch]
debounce_ms = 250
strategy = "repartition"

[output]
verbosity = "quiet"
"#;

    let settings: Settings = toml::from_str(toml).unwrap();

    assert_eq!(settings.project.config_file, "config/tokens.json");
    assert_eq!(settings.watch.debounce().as_millis(), 250);
    assert_eq!(settings.watch.strategy, RebuildStrategy::Repartition);
    assert_eq!(settings.output.verbosity, Verbosity::Quiet);
}

#[test]
fn test_partial_sections_keep_defaults() {
    let settings: Settings = toml::from_str("[watch]\nstrategy = \"repartition\"\n").unwrap();

    assert_eq!(settings.watch.debounce_ms, 100);
    assert_eq!(settings.project.config_file, "sd.config.json");
}

#[test]
fn test_unknown_keys_produce_warnings_with_suggestion() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(SETTINGS_FILE);
    fs::write(&path, "[watch]\ndebounce_ms = 50\nstrategi = \"repartition\"\n").unwrap();

    let (settings, warnings) = load_with_warnings(&path).unwrap();

    assert_eq!(settings.watch.debounce_ms, 50);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].key, "strategi");
    assert_eq!(warnings[0].line, Some(3));
    assert_eq!(warnings[0].suggestion.as_deref(), Some("strategy"));
}

#[test]
fn test_unknown_key_line_skips_comments_and_other_tables() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(SETTINGS_FILE);
    fs::write(
        &path,
        "# verbositi is misspelled below\n[watch]\nverbositi = \"debug\"\n\n[output]\nverbositi = \"quiet\"\n",
    )
    .unwrap();

    let (_, mut warnings) = load_with_warnings(&path).unwrap();
    warnings.sort_by_key(|w| w.line);

    assert_eq!(warnings.len(), 2);
    assert_eq!(warnings[0].line, Some(3));
    assert_eq!(warnings[0].suggestion, None);
    assert_eq!(warnings[1].line, Some(6));
    assert_eq!(warnings[1].suggestion.as_deref(), Some("verbosity"));
}

#[test]
fn test_unknown_table_points_at_its_header() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(SETTINGS_FILE);
    fs::write(&path, "[project]\nconfig_file = \"a.json\"\n\n[wach]\nstrategy = \"repartition\"\n").unwrap();

    let (settings, warnings) = load_with_warnings(&path).unwrap();

    assert_eq!(settings.project.config_file, "a.json");
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].key, "wach");
    assert_eq!(warnings[0].line, Some(4));
    assert_eq!(warnings[0].suggestion.as_deref(), Some("watch"));
}

#[test]
fn test_invalid_settings_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(SETTINGS_FILE);
    fs::write(&path, "[watch]\nstrategy = \"sometimes\"\n").unwrap();

    let err = load_with_warnings(&path).unwrap_err();

    assert!(matches!(err, PadError::InvalidSettings { .. }));
}

#[test]
fn test_project_settings_are_loaded_from_root() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join(SETTINGS_FILE),
        "[project]\nconfig_file = \"tokens.config.json\"\n",
    )
    .unwrap();

    let (settings, warnings) = load_or_default(Some(dir.path())).unwrap();

    assert_eq!(settings.project.config_file, "tokens.config.json");
    assert!(warnings.is_empty());
}

#[test]
fn test_env_overrides() {
    let settings = apply_overrides(
        Settings::default(),
        vars(&[
            ("TOKENPAD_CONFIG_FILE", "other.json"),
            ("TOKENPAD_DEBOUNCE_MS", "20"),
            ("TOKENPAD_STRATEGY", "repartition"),
            ("TOKENPAD_VERBOSITY", "debug"),
        ]),
    );

    assert_eq!(settings.project.config_file, "other.json");
    assert_eq!(settings.watch.debounce_ms, 20);
    assert_eq!(settings.watch.strategy, RebuildStrategy::Repartition);
    assert_eq!(settings.output.verbosity, Verbosity::Debug);
}

#[test]
fn test_invalid_env_values_are_ignored() {
    let settings = apply_overrides(
        Settings::default(),
        vars(&[
            ("TOKENPAD_DEBOUNCE_MS", "soon"),
            ("TOKENPAD_STRATEGY", "sometimes"),
            ("TOKENPAD_CONFIG_FILE", "  "),
        ]),
    );

    assert_eq!(settings, Settings::default());
}

#[test]
fn test_verbosity_raised_by_flags() {
    assert_eq!(Verbosity::Normal.raised_by(0), Verbosity::Normal);
    assert_eq!(Verbosity::Quiet.raised_by(0), Verbosity::Quiet);
    assert_eq!(Verbosity::Normal.raised_by(1), Verbosity::Verbose);
    assert_eq!(Verbosity::Quiet.raised_by(3), Verbosity::Debug);
    assert_eq!(Verbosity::Debug.raised_by(0), Verbosity::Debug);
}
