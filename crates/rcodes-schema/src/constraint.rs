//! # Constraint Primitives
//!
//! Schemas are plain data: a tree of [`Schema`] variants interpreted by the
//! single walker in [`crate::validate`]. New domain sections are written by
//! composing these primitives; the walker never changes.
//!
//! | primitive | meaning |
//! |---|---|
//! | [`Presence::Required`] | key must be present |
//! | [`Presence::Default`] | absent key is filled with a default |
//! | [`Schema::Enum`] | string scalar from a fixed set |
//! | [`MinLength`] | container has at least N entries |
//! | [`InclusiveGroup`] | sibling keys all present or all absent |
//! | [`Schema::OpenMap`] | pattern-checked names mapping to one value schema |
//! | [`Schema::Command`] | comma-separated command tokens, parsed and normalized |

use regex::Regex;
use serde_json::Value;

/// One node of a schema tree.
#[derive(Debug)]
pub enum Schema {
    /// Strict string: no coercion from numbers or booleans.
    String,
    /// String scalar restricted to a fixed set of values.
    Enum(Vec<String>),
    /// Sequence whose elements all satisfy `item`.
    List {
        /// Element schema.
        item: Box<Schema>,
        /// Minimum element count.
        min_len: Option<MinLength>,
    },
    /// Mapping with a fixed set of keys.
    Map(MapSchema),
    /// Mapping with user-chosen names.
    OpenMap(OpenMapSchema),
    /// CommandSpec: one or more command tokens.
    Command,
}

impl Schema {
    /// Sequence of `item` with at least `min` entries.
    pub fn list(item: Schema, min: usize) -> Self {
        Self::List {
            item: Box::new(item),
            min_len: Some(MinLength::new(min)),
        }
    }

    /// Enumeration over the given values.
    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Enum(values.into_iter().map(Into::into).collect())
    }

    /// Short name of the node kind this schema expects, for diagnostics.
    pub fn expected_kind(&self) -> &'static str {
        match self {
            Self::String | Self::Enum(_) => "string",
            Self::List { .. } => "sequence",
            Self::Map(_) | Self::OpenMap(_) => "mapping",
            Self::Command => "command string or sequence",
        }
    }
}

/// Minimum entry count with optional custom wording.
#[derive(Debug, Clone)]
pub struct MinLength {
    /// Required minimum.
    pub min: usize,
    /// Message reported instead of the generic one.
    pub message: Option<String>,
}

impl MinLength {
    /// Generic minimum.
    pub fn new(min: usize) -> Self {
        Self { min, message: None }
    }

    /// Minimum with a custom message.
    pub fn with_message(min: usize, message: impl Into<String>) -> Self {
        Self {
            min,
            message: Some(message.into()),
        }
    }
}

/// How a fixed key treats its absence.
#[derive(Debug, Clone)]
pub enum Presence {
    /// Absence is a violation.
    Required,
    /// Absence is fine and nothing is inserted.
    Optional,
    /// Absence inserts the value.
    Default(Value),
}

/// A fixed key of a [`MapSchema`].
#[derive(Debug)]
pub struct Field {
    /// Key name.
    pub key: String,
    /// Absence rule.
    pub presence: Presence,
    /// Value schema.
    pub schema: Schema,
}

/// Sibling keys that must be all present or all absent.
#[derive(Debug, Clone)]
pub struct InclusiveGroup {
    /// Group name, for diagnostics.
    pub name: String,
    /// Member keys in declaration order.
    pub keys: Vec<String>,
}

impl InclusiveGroup {
    /// Members absent from `present_keys`, each paired with the first present member.
    ///
    /// Returns nothing when the group is fully present or fully absent.
    pub fn partial<'a>(&'a self, has_key: impl Fn(&str) -> bool) -> Vec<(&'a str, &'a str)> {
        let present: Vec<&str> = self
            .keys
            .iter()
            .map(String::as_str)
            .filter(|k| has_key(k))
            .collect();
        let Some(companion) = present.first().copied() else {
            return Vec::new();
        };
        if present.len() == self.keys.len() {
            return Vec::new();
        }
        self.keys
            .iter()
            .map(String::as_str)
            .filter(|k| !has_key(k))
            .map(|missing| (missing, companion))
            .collect()
    }
}

/// Mapping with declared keys. Undeclared keys are rejected.
#[derive(Debug, Default)]
pub struct MapSchema {
    /// Declared keys in order.
    pub fields: Vec<Field>,
    /// Inclusive groups over declared keys.
    pub groups: Vec<InclusiveGroup>,
    /// Minimum number of keys present in the input.
    pub min_len: Option<MinLength>,
}

impl MapSchema {
    /// Empty mapping schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a required key.
    pub fn required(mut self, key: &str, schema: Schema) -> Self {
        self.fields.push(Field {
            key: key.to_string(),
            presence: Presence::Required,
            schema,
        });
        self
    }

    /// Add an optional key.
    pub fn optional(mut self, key: &str, schema: Schema) -> Self {
        self.fields.push(Field {
            key: key.to_string(),
            presence: Presence::Optional,
            schema,
        });
        self
    }

    /// Add an optional key that defaults to `default` when absent.
    pub fn with_default(mut self, key: &str, schema: Schema, default: Value) -> Self {
        self.fields.push(Field {
            key: key.to_string(),
            presence: Presence::Default(default),
            schema,
        });
        self
    }

    /// Add optional keys that must appear together, all sharing one schema factory.
    pub fn inclusive(mut self, name: &str, keys: &[&str], schema: fn() -> Schema) -> Self {
        for key in keys {
            self = self.optional(key, schema());
        }
        self.groups.push(InclusiveGroup {
            name: name.to_string(),
            keys: keys.iter().map(|k| (*k).to_string()).collect(),
        });
        self
    }

    /// Require at least `min` keys.
    pub fn min_len(mut self, min: usize) -> Self {
        self.min_len = Some(MinLength::new(min));
        self
    }

    /// Require at least `min` keys, reporting `message` otherwise.
    pub fn min_len_msg(mut self, min: usize, message: &str) -> Self {
        self.min_len = Some(MinLength::with_message(min, message));
        self
    }

    /// Look up a declared field.
    pub fn field(&self, key: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Wrap into a [`Schema`].
    pub fn build(self) -> Schema {
        Schema::Map(self)
    }
}

/// Pattern that open-map keys must match.
#[derive(Debug, Clone)]
pub struct NamePattern(Regex);

impl NamePattern {
    /// Wrap a compiled regex.
    pub fn new(regex: Regex) -> Self {
        Self(regex)
    }

    /// Returns `true` if `name` is acceptable.
    pub fn matches(&self, name: &str) -> bool {
        self.0.is_match(name)
    }
}

/// Mapping from user-chosen names to values of one schema.
#[derive(Debug)]
pub struct OpenMapSchema {
    /// Key pattern.
    pub names: NamePattern,
    /// Value schema.
    pub value: Box<Schema>,
    /// Minimum number of entries.
    pub min_len: Option<MinLength>,
}

impl OpenMapSchema {
    /// Open map with no minimum.
    pub fn new(names: NamePattern, value: Schema) -> Self {
        Self {
            names,
            value: Box::new(value),
            min_len: None,
        }
    }

    /// Set the minimum entry count.
    pub fn min_len(mut self, min_len: MinLength) -> Self {
        self.min_len = Some(min_len);
        self
    }

    /// Wrap into a [`Schema`].
    pub fn build(self) -> Schema {
        Schema::OpenMap(self)
    }
}
