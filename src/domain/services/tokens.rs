//! Token tree handling
//!
//! Merges token documents and flattens them into named tokens. Any object with
//! a `value` key is a token; its name is the key path leading to it. String
//! values of the form `{color.base.red}` (optionally ending in `.value`) refer
//! to another token and are resolved.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{PadError, PadResult};

/// Maximum reference chain length before a cycle is assumed
const MAX_REFERENCE_DEPTH: usize = 32;

/// A flattened design token
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Key path from the document root
    pub path: Vec<String>,
    /// Resolved value
    pub value: Value,
}

impl Token {
    /// Value rendered for output formats
    pub fn value_string(&self) -> String {
        match &self.value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Deep-merge `doc` into `target`. Objects merge key by key; anything else in
/// `doc` replaces what `target` had.
pub fn merge_documents(target: &mut Value, doc: Value) {
    match (target, doc) {
        (Value::Object(existing), Value::Object(incoming)) => {
            for (key, value) in incoming {
                match existing.get_mut(&key) {
                    Some(slot) => merge_documents(slot, value),
                    None => {
                        existing.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

/// Flatten a merged token tree, resolving references. Tokens come back sorted
/// by path.
pub fn flatten_tokens(root: &Value) -> PadResult<Vec<Token>> {
    let mut raw = BTreeMap::new();
    collect(root, &mut Vec::new(), &mut raw);

    let mut tokens = Vec::with_capacity(raw.len());
    for (path, value) in &raw {
        let resolved = resolve(path, value, &raw, 0)?;
        tokens.push(Token {
            path: path.clone(),
            value: resolved,
        });
    }
    Ok(tokens)
}

fn collect(node: &Value, path: &mut Vec<String>, out: &mut BTreeMap<Vec<String>, Value>) {
    let Value::Object(map) = node else {
        return;
    };
    if let Some(value) = map.get("value") {
        out.insert(path.clone(), value.clone());
        return;
    }
    for (key, child) in map {
        path.push(key.clone());
        collect(child, path, out);
        path.pop();
    }
}

fn resolve(
    name: &[String],
    value: &Value,
    tokens: &BTreeMap<Vec<String>, Value>,
    depth: usize,
) -> PadResult<Value> {
    let Some(reference) = reference_path(value) else {
        return Ok(value.clone());
    };
    if depth >= MAX_REFERENCE_DEPTH {
        return Err(PadError::UnresolvedReference {
            token: name.join("."),
            reference: reference.join("."),
            reason: "reference cycle".to_string(),
        });
    }
    match tokens.get(&reference) {
        Some(target) => resolve(name, target, tokens, depth + 1),
        None => Err(PadError::UnresolvedReference {
            token: name.join("."),
            reference: reference.join("."),
            reason: "no such token".to_string(),
        }),
    }
}

fn reference_path(value: &Value) -> Option<Vec<String>> {
    let text = value.as_str()?.trim();
    let inner = text.strip_prefix('{')?.strip_suffix('}')?;
    let mut segments: Vec<String> = inner.split('.').map(str::to_string).collect();
    if segments.len() > 1 && segments.last().map(String::as_str) == Some("value") {
        segments.pop();
    }
    if segments.iter().any(String::is_empty) {
        return None;
    }
    Some(segments)
}
