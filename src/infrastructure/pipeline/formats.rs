//! Output formats of the basic pipeline

use serde_json::{Map, Value};

use crate::domain::services::Token;

/// A supported output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenFormat {
    /// `:root { --name: value; }`
    CssVariables,
    /// `$name: value;`
    ScssVariables,
    /// `export const Name = "value";`
    JavascriptEs6,
    /// `{ "name": value }`
    JsonFlat,
}

impl TokenFormat {
    /// All formats, in id order
    pub const ALL: [TokenFormat; 4] = [
        TokenFormat::CssVariables,
        TokenFormat::JavascriptEs6,
        TokenFormat::JsonFlat,
        TokenFormat::ScssVariables,
    ];

    /// Look up a format by its config id
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|format| format.id() == id)
    }

    /// The config id
    pub fn id(&self) -> &'static str {
        match self {
            TokenFormat::CssVariables => "css/variables",
            TokenFormat::ScssVariables => "scss/variables",
            TokenFormat::JavascriptEs6 => "javascript/es6",
            TokenFormat::JsonFlat => "json/flat",
        }
    }

    /// Render tokens, names prefixed with `prefix` when given
    pub fn render(&self, tokens: &[Token], prefix: Option<&str>) -> String {
        match self {
            TokenFormat::CssVariables => {
                let mut out = String::from(":root {\n");
                for token in tokens {
                    out.push_str(&format!(
                        "  --{}: {};\n",
                        kebab_name(token, prefix),
                        token.value_string()
                    ));
                }
                out.push_str("}\n");
                out
            }
            TokenFormat::ScssVariables => tokens
                .iter()
                .map(|token| format!("${}: {};\n", kebab_name(token, prefix), token.value_string()))
                .collect(),
            TokenFormat::JavascriptEs6 => tokens
                .iter()
                .map(|token| {
                    let quoted = serde_json::to_string(&token.value_string())
                        .unwrap_or_else(|_| "\"\"".to_string());
                    format!("export const {} = {};\n", pascal_name(token, prefix), quoted)
                })
                .collect(),
            TokenFormat::JsonFlat => {
                let map: Map<String, Value> = tokens
                    .iter()
                    .map(|token| (kebab_name(token, prefix), token.value.clone()))
                    .collect();
                let mut out = serde_json::to_string_pretty(&Value::Object(map))
                    .unwrap_or_else(|_| "{}".to_string());
                out.push('\n');
                out
            }
        }
    }
}

fn name_words(token: &Token, prefix: Option<&str>) -> Vec<String> {
    prefix
        .into_iter()
        .chain(token.path.iter().map(String::as_str))
        .flat_map(split_words)
        .collect()
}

/// Split `fontSize`, `font_size` or `font size` into lowercase words
fn split_words(segment: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;
    for ch in segment.chars() {
        if !ch.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        current.extend(ch.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn kebab_name(token: &Token, prefix: Option<&str>) -> String {
    name_words(token, prefix).join("-")
}

fn pascal_name(token: &Token, prefix: Option<&str>) -> String {
    name_words(token, prefix)
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}
