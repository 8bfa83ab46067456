//! # Shared Sub-Schemas
//!
//! Building blocks reused across sections: the `info` section, the free-form
//! `custom` section, and the name-to-command maps used by `sources`,
//! `sound_modes`, and `custom`.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use rcodes_core::Category;

use crate::constraint::{MapSchema, MinLength, NamePattern, OpenMapSchema, Schema};

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9_\- ]*$").unwrap());

/// Pattern for user-chosen names (sources, sound modes, custom commands).
pub fn name_pattern() -> NamePattern {
    NamePattern::new(NAME_RE.clone())
}

/// Open map from user-chosen names to CommandSpecs.
pub fn named_commands(min_len: MinLength) -> Schema {
    OpenMapSchema::new(name_pattern(), Schema::Command)
        .min_len(min_len)
        .build()
}

/// `info` section: brand, category, models, optional notes.
pub fn info_schema() -> Schema {
    MapSchema::new()
        .required("brand", Schema::String)
        .required("category", Schema::one_of(Category::names()))
        .required("models", Schema::list(Schema::String, 1))
        .with_default("notes", Schema::String, Value::Null)
        .build()
}

/// `custom` section: commands not covered by any domain schema.
pub fn custom_schema() -> Schema {
    named_commands(MinLength::new(1))
}
