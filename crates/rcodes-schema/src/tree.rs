//! # Document Trees
//!
//! Parses YAML text into the generic tree the validator walks. Parse
//! failures keep their 1-based line and column so diagnostics can point at
//! the offending character.

use serde_json::{Map, Value};
use thiserror::Error;

/// Malformed YAML input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("[{line}:{column}]: {message}")]
pub struct TreeParseError {
    /// 1-based line, 0 when the parser gave no position.
    pub line: usize,
    /// 1-based column, 0 when the parser gave no position.
    pub column: usize,
    /// Parser diagnostic.
    pub message: String,
}

/// Parse YAML text into a document tree.
///
/// # Errors
///
/// Returns [`TreeParseError`] for malformed YAML or for YAML that cannot be
/// represented as a tree of string-keyed mappings, sequences and scalars.
pub fn parse_tree(text: &str) -> Result<Value, TreeParseError> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(text).map_err(|e| {
        let (line, column) = e
            .location()
            .map(|loc| (loc.line(), loc.column()))
            .unwrap_or((0, 0));
        TreeParseError {
            line,
            column,
            message: e.to_string(),
        }
    })?;

    to_tree(&yaml).map_err(|message| TreeParseError {
        line: 0,
        column: 0,
        message,
    })
}

/// Mapping keys become strings; `numbers: {0: ...}` is keyed `"0"`.
fn tree_key(key: &serde_yaml::Value) -> Result<String, String> {
    match key {
        serde_yaml::Value::String(s) => Ok(s.clone()),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Tagged(tagged) => tree_key(&tagged.value),
        other => Err(format!("mapping keys must be scalars, got {other:?}")),
    }
}

fn to_tree(node: &serde_yaml::Value) -> Result<Value, String> {
    use serde_yaml::Value as Yaml;

    Ok(match node {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(*b),
        Yaml::String(s) => Value::String(s.clone()),
        Yaml::Number(n) => {
            if n.as_f64().is_some_and(|f| !f.is_finite()) {
                return Err(format!("non-finite number {n} is not allowed"));
            }
            serde_json::to_value(n).map_err(|e| e.to_string())?
        }
        Yaml::Sequence(items) => Value::Array(items.iter().map(to_tree).collect::<Result<_, _>>()?),
        Yaml::Mapping(entries) => {
            let mut map = Map::with_capacity(entries.len());
            for (key, value) in entries {
                let key = tree_key(key)?;
                if map.contains_key(&key) {
                    return Err(format!("duplicate key '{key}'"));
                }
                map.insert(key, to_tree(value)?);
            }
            Value::Object(map)
        }
        Yaml::Tagged(tagged) => to_tree(&tagged.value)?,
    })
}
