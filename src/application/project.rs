//! Project seeding and snapshots
//!
//! A snapshot is a JSON object mapping the config and every token source to
//! its minified JSON content. It is the share payload of a project: importing
//! it into an empty filesystem recreates the inputs, and one build recreates
//! the outputs.

use std::collections::BTreeMap;

use serde_json::{json, Value};

use crate::domain::entities::BuildConfig;
use crate::domain::ports::VirtualFs;
use crate::domain::value_objects::{FilePath, SourceGlobs};
use crate::error::{PadError, PadResult};

/// Token files of the starter project
fn default_tokens() -> Vec<(&'static str, Value)> {
    vec![
        (
            "tokens/color/base.json",
            json!({
                "color": {
                    "base": {
                        "gray": {
                            "light": { "value": "#CCCCCC" },
                            "medium": { "value": "#999999" },
                            "dark": { "value": "#111111" }
                        },
                        "red": { "value": "#FF0000" },
                        "green": { "value": "#00FF00" }
                    }
                }
            }),
        ),
        (
            "tokens/color/font.json",
            json!({
                "color": {
                    "font": {
                        "base": { "value": "{color.base.red.value}" },
                        "secondary": { "value": "{color.base.green.value}" },
                        "tertiary": { "value": "{color.base.gray.light.value}" }
                    }
                }
            }),
        ),
    ]
}

/// Write the starter config and token files
pub fn write_default_project(fs: &dyn VirtualFs, config_path: &FilePath) -> PadResult<()> {
    fs.write(config_path, &BuildConfig::default_project().to_pretty_json())?;
    for (path, doc) in default_tokens() {
        fs.write(&FilePath::new(path)?, &pretty(&doc))?;
    }
    Ok(())
}

/// Collect the config and every source file into a snapshot
pub fn export_snapshot(fs: &dyn VirtualFs, config_path: &FilePath) -> PadResult<String> {
    let config_text = fs.read(config_path)?;
    let config = BuildConfig::parse(config_path.as_str(), &config_text)?;
    let globs = SourceGlobs::new(&config.source)?;

    let mut entries = BTreeMap::new();
    entries.insert(config_path.to_string(), minify(config_path, &config_text)?);
    for source in globs.resolve(&fs.list()?) {
        let content = fs.read(&source)?;
        entries.insert(source.to_string(), minify(&source, &content)?);
    }

    serde_json::to_string(&entries).map_err(|e| PadError::InvalidTokens {
        file: config_path.to_string(),
        message: e.to_string(),
    })
}

/// Write every entry of a snapshot, pretty-printed. Returns the written paths.
pub fn import_snapshot(fs: &dyn VirtualFs, snapshot: &str) -> PadResult<Vec<FilePath>> {
    let entries: BTreeMap<String, String> =
        serde_json::from_str(snapshot).map_err(|e| PadError::InvalidTokens {
            file: "<snapshot>".to_string(),
            message: e.to_string(),
        })?;

    // Validate everything before writing anything
    let mut parsed = Vec::with_capacity(entries.len());
    for (raw_path, content) in &entries {
        let path = FilePath::new(raw_path)?;
        let doc: Value = serde_json::from_str(content).map_err(|e| PadError::InvalidTokens {
            file: path.to_string(),
            message: e.to_string(),
        })?;
        parsed.push((path, doc));
    }

    let mut written = Vec::with_capacity(parsed.len());
    for (path, doc) in parsed {
        fs.write(&path, &pretty(&doc))?;
        written.push(path);
    }
    Ok(written)
}

fn minify(path: &FilePath, content: &str) -> PadResult<String> {
    let doc: Value = serde_json::from_str(content).map_err(|e| PadError::InvalidTokens {
        file: path.to_string(),
        message: e.to_string(),
    })?;
    Ok(doc.to_string())
}

fn pretty(doc: &Value) -> String {
    let mut out = serde_json::to_string_pretty(doc).unwrap_or_else(|_| doc.to_string());
    out.push('\n');
    out
}
