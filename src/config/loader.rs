//! Settings loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::application::RebuildStrategy;
use crate::error::{PadError, PadResult};

use super::types::{Settings, Verbosity};
use super::SETTINGS_FILE;

/// Non-fatal settings warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load settings and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> PadResult<(Settings, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let settings: Settings =
        serde_ignored::deserialize(toml::de::Deserializer::new(&content), |ignored| {
            unknown_paths.push(ignored.to_string());
        })
    .map_err(|e| PadError::InvalidSettings {
        file: path.display().to_string(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .iter()
        .map(|ignored| unknown_key_warning(path, &content, ignored))
        .collect();

    Ok((settings, warnings))
}

/// Load from project settings, user settings, or defaults, then apply
/// environment overrides. A missing file falls through to the next layer; a
/// malformed one is an error.
pub fn load_or_default(project_root: Option<&Path>) -> PadResult<(Settings, Vec<ConfigWarning>)> {
    if let Some(root) = project_root {
        let project_settings = root.join(SETTINGS_FILE);
        if project_settings.exists() {
            let (settings, warnings) = load_with_warnings(&project_settings)?;
            return Ok((with_env_overrides(settings), warnings));
        }
    }

    if let Some(user_config_dir) = user_config_dir() {
        let user_settings = user_config_dir.join("tokenpad/config.toml");
        if user_settings.exists() {
            let (settings, warnings) = load_with_warnings(&user_settings)?;
            return Ok((with_env_overrides(settings), warnings));
        }
    }

    Ok((with_env_overrides(Settings::default()), Vec::new()))
}

/// Apply environment variable overrides (TOKENPAD_* prefix)
pub fn with_env_overrides(settings: Settings) -> Settings {
    apply_overrides(settings, |key| std::env::var(key).ok())
}

pub(super) fn apply_overrides(
    mut settings: Settings,
    var: impl Fn(&str) -> Option<String>,
) -> Settings {
    // TOKENPAD_CONFIG_FILE
    if let Some(file) = var("TOKENPAD_CONFIG_FILE") {
        if !file.trim().is_empty() {
            settings.project.config_file = file.trim().to_string();
        }
    }

    // TOKENPAD_DEBOUNCE_MS
    if let Some(ms) = var("TOKENPAD_DEBOUNCE_MS").and_then(|v| v.trim().parse().ok()) {
        settings.watch.debounce_ms = ms;
    }

    // TOKENPAD_STRATEGY
    if let Some(strategy) = var("TOKENPAD_STRATEGY").and_then(|v| RebuildStrategy::parse(&v)) {
        settings.watch.strategy = strategy;
    }

    // TOKENPAD_VERBOSITY
    if let Some(verbosity) = var("TOKENPAD_VERBOSITY").and_then(|v| Verbosity::parse(&v)) {
        settings.output.verbosity = verbosity;
    }

    settings
}

/// User config directory, honoring XDG_CONFIG_HOME first
fn user_config_dir() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
}

/// Keys known in each settings table, `""` being the top level
const KNOWN_KEYS: &[(&str, &[&str])] = &[
    ("", &["project", "watch", "output"]),
    ("project", &["config_file"]),
    ("watch", &["debounce_ms", "strategy"]),
    ("output", &["verbosity"]),
];

fn unknown_key_warning(file: &Path, content: &str, ignored: &str) -> ConfigWarning {
    let (table, key) = ignored.rsplit_once('.').unwrap_or(("", ignored));
    ConfigWarning {
        key: key.to_string(),
        file: file.to_path_buf(),
        line: key_line(content, table, key),
        suggestion: suggest_key(table, key),
    }
}

/// 1-based line where `key` is assigned inside `[table]`, or where an unknown
/// table is opened
fn key_line(content: &str, table: &str, key: &str) -> Option<usize> {
    let mut current = "";
    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            current = header.trim();
            if table.is_empty() && current == key {
                return Some(index + 1);
            }
            continue;
        }
        let Some((name, _)) = line.split_once('=') else {
            continue;
        };
        if current == table && name.trim().trim_matches('"') == key {
            return Some(index + 1);
        }
    }
    None
}

/// Closest known key of the same table, within two edits
fn suggest_key(table: &str, key: &str) -> Option<String> {
    let (_, candidates) = KNOWN_KEYS.iter().find(|(name, _)| *name == table)?;
    candidates
        .iter()
        .map(|candidate| (edit_distance(key, candidate), *candidate))
        .min()
        .filter(|(distance, _)| *distance <= 2)
        .map(|(_, candidate)| candidate.to_string())
}

fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = (above + 1)
                .min(row[j] + 1)
                .min(diagonal + usize::from(ca != cb));
            diagonal = above;
        }
    }
    row[b.len()]
}
