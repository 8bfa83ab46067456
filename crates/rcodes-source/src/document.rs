//! # Normalized Documents
//!
//! The result of a successful load: the normalized tree plus typed access to
//! the `info` section. Domain sections stay as trees so new domains need no
//! new types here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use rcodes_core::Category;
use rcodes_schema::INFO_SECTION;

/// Typed view of the `info` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Info {
    /// Brand as written in the document.
    pub brand: String,
    /// Device category.
    pub category: Category,
    /// Model numbers covered by the file.
    pub models: Vec<String>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// A validated, normalized codes document.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedDocument {
    path: PathBuf,
    info: Info,
    tree: Value,
}

impl NormalizedDocument {
    /// Wrap a normalized tree. Returns `None` if `info` does not have the
    /// normalized shape, which the schema guarantees it does.
    pub fn from_tree(path: impl Into<PathBuf>, tree: Value) -> Option<Self> {
        let info = serde_json::from_value(tree.get(INFO_SECTION)?.clone()).ok()?;
        Some(Self {
            path: path.into(),
            info,
            tree,
        })
    }

    /// File the document was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The `info` section.
    pub fn info(&self) -> &Info {
        &self.info
    }

    /// Returns `true` if the top-level section exists.
    pub fn has_section(&self, name: &str) -> bool {
        self.tree.get(name).is_some()
    }

    /// Normalized command list at a dotted path, e.g. `media_player.power.power_on`.
    pub fn commands(&self, dotted: &str) -> Option<Vec<&str>> {
        let node = dotted
            .split('.')
            .try_fold(&self.tree, |node, key| node.get(key))?;
        node.as_array()?.iter().map(Value::as_str).collect()
    }

    /// The full normalized tree.
    pub fn tree(&self) -> &Value {
        &self.tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_typed_info_and_commands() {
        let tree = json!({
            "info": {"brand": "Sony", "category": "tv", "models": ["X1"], "notes": null},
            "media_player": {"power": {"power_toggle": ["nec:1:2", "nec:1:3"]}},
        });
        let doc = NormalizedDocument::from_tree("/x/sony/tv/sony.tv.1.yaml", tree).unwrap();
        assert_eq!(doc.info().category, Category::Tv);
        assert_eq!(doc.info().notes, None);
        assert!(doc.has_section("media_player"));
        assert!(!doc.has_section("custom"));
        assert_eq!(
            doc.commands("media_player.power.power_toggle"),
            Some(vec!["nec:1:2", "nec:1:3"])
        );
        assert_eq!(doc.commands("media_player.volume.up"), None);
    }

    #[test]
    fn test_from_tree_requires_info() {
        assert!(NormalizedDocument::from_tree("x.yaml", json!({"custom": {}})).is_none());
    }
}
