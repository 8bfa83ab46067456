//! # Schema Validation
//!
//! One generic walker interprets any [`Schema`] tree against a document tree
//! (`serde_json::Value`, converted from YAML by [`crate::tree`]) and produces
//! either the normalized tree or every violation found.
//!
//! ## Exhaustiveness
//!
//! The walker never returns early on a violation. Each node pushes what is
//! wrong with it into the shared list and the walk continues into siblings
//! and children, so a caller sees every problem in a file in one pass.
//!
//! ## Normalization
//!
//! - Fields with [`Presence::Default`] are filled in when absent.
//! - CommandSpec values become a sequence of canonical command strings.
//!
//! Normalized trees re-validate to themselves.

use std::sync::Arc;

use serde_json::{Map, Value};

use rcodes_core::{CommandParser, SegmentName};

use crate::codes::codes_schema;
use crate::constraint::{MapSchema, MinLength, OpenMapSchema, Presence, Schema};
use crate::violation::{KeyPath, Violation, ViolationKind, Violations};

/// Short name of a node kind, for diagnostics.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

/// Recursive interpreter for [`Schema`] trees.
///
/// Holds the violation list threaded through the walk and the command
/// parser used for [`Schema::Command`] nodes.
pub struct Walker<'p> {
    parser: &'p dyn CommandParser,
    violations: Vec<Violation>,
}

impl<'p> Walker<'p> {
    /// New walker with an empty violation list.
    pub fn new(parser: &'p dyn CommandParser) -> Self {
        Self {
            parser,
            violations: Vec::new(),
        }
    }

    /// Consume the walker, returning the collected violations.
    pub fn finish(self) -> Violations {
        Violations::new(self.violations)
    }

    fn push(&mut self, path: &KeyPath, kind: ViolationKind) {
        self.violations.push(Violation::new(path.clone(), kind));
    }

    fn check_min_len(&mut self, path: &KeyPath, min_len: Option<&MinLength>, actual: usize) {
        if let Some(min_len) = min_len {
            if actual < min_len.min {
                self.push(
                    path,
                    ViolationKind::TooShort {
                        min: min_len.min,
                        actual,
                        message: min_len.message.clone(),
                    },
                );
            }
        }
    }

    /// Validate `value` against `schema` at `path`.
    ///
    /// Returns the normalized node, or `None` when the node itself has the
    /// wrong shape. A `Some` result does not mean the subtree is clean;
    /// check the collected violations.
    pub fn walk(&mut self, schema: &Schema, value: &Value, path: &KeyPath) -> Option<Value> {
        match schema {
            Schema::String => self.walk_string(value, path),
            Schema::Enum(allowed) => self.walk_enum(allowed, value, path),
            Schema::List { item, min_len } => self.walk_list(item, min_len.as_ref(), value, path),
            Schema::Map(map) => self.walk_map(map, value, path),
            Schema::OpenMap(open) => self.walk_open_map(open, value, path),
            Schema::Command => self.walk_command(value, path),
        }
    }

    fn walk_string(&mut self, value: &Value, path: &KeyPath) -> Option<Value> {
        match value {
            Value::String(_) => Some(value.clone()),
            other => {
                self.push(
                    path,
                    ViolationKind::WrongType {
                        expected: "string",
                        found: kind_of(other),
                    },
                );
                None
            }
        }
    }

    fn walk_enum(&mut self, allowed: &[String], value: &Value, path: &KeyPath) -> Option<Value> {
        if let Value::String(s) = value {
            if allowed.iter().any(|a| a == s) {
                return Some(value.clone());
            }
        }
        self.push(
            path,
            ViolationKind::InvalidEnum {
                value: value.to_string(),
                allowed: allowed.to_vec(),
            },
        );
        None
    }

    fn walk_list(
        &mut self,
        item: &Schema,
        min_len: Option<&MinLength>,
        value: &Value,
        path: &KeyPath,
    ) -> Option<Value> {
        let Value::Array(items) = value else {
            self.push(
                path,
                ViolationKind::WrongType {
                    expected: "sequence",
                    found: kind_of(value),
                },
            );
            return None;
        };

        let out: Vec<Value> = items
            .iter()
            .enumerate()
            .filter_map(|(i, v)| self.walk(item, v, &path.index(i)))
            .collect();
        self.check_min_len(path, min_len, items.len());
        Some(Value::Array(out))
    }

    fn walk_map(&mut self, schema: &MapSchema, value: &Value, path: &KeyPath) -> Option<Value> {
        let Value::Object(input) = value else {
            self.push(
                path,
                ViolationKind::WrongType {
                    expected: "mapping",
                    found: kind_of(value),
                },
            );
            return None;
        };

        for key in input.keys() {
            if schema.field(key).is_none() {
                self.push(path, ViolationKind::UnexpectedKey { key: key.clone() });
            }
        }

        let mut out = Map::new();
        for field in &schema.fields {
            match (input.get(&field.key), &field.presence) {
                // An already-normalized document carries its defaults explicitly.
                (Some(child), Presence::Default(default)) if child == default => {
                    out.insert(field.key.clone(), child.clone());
                }
                (Some(child), _) => {
                    if let Some(normalized) = self.walk(&field.schema, child, &path.key(&field.key)) {
                        out.insert(field.key.clone(), normalized);
                    }
                }
                (None, Presence::Required) => {
                    self.push(
                        path,
                        ViolationKind::MissingKey {
                            key: field.key.clone(),
                        },
                    );
                }
                (None, Presence::Default(default)) => {
                    out.insert(field.key.clone(), default.clone());
                }
                (None, Presence::Optional) => {}
            }
        }

        for group in &schema.groups {
            for (missing, companion) in group.partial(|k| input.contains_key(k)) {
                self.push(
                    path,
                    ViolationKind::InclusiveGroup {
                        group: group.name.clone(),
                        missing: missing.to_string(),
                        companion: companion.to_string(),
                    },
                );
            }
        }

        self.check_min_len(path, schema.min_len.as_ref(), input.len());
        Some(Value::Object(out))
    }

    fn walk_open_map(
        &mut self,
        schema: &OpenMapSchema,
        value: &Value,
        path: &KeyPath,
    ) -> Option<Value> {
        let Value::Object(input) = value else {
            self.push(
                path,
                ViolationKind::WrongType {
                    expected: "mapping",
                    found: kind_of(value),
                },
            );
            return None;
        };

        let mut out = Map::new();
        for (name, child) in input {
            if !schema.names.matches(name) {
                self.push(path, ViolationKind::InvalidName { name: name.clone() });
                continue;
            }
            if let Some(normalized) = self.walk(&schema.value, child, &path.key(name)) {
                out.insert(name.clone(), normalized);
            }
        }

        self.check_min_len(path, schema.min_len.as_ref(), input.len());
        Some(Value::Object(out))
    }

    fn walk_command(&mut self, value: &Value, path: &KeyPath) -> Option<Value> {
        let tokens: Vec<String> = match value {
            Value::String(s) => split_command_list(s),
            Value::Array(items) => {
                let mut tokens = Vec::new();
                for (i, item) in items.iter().enumerate() {
                    match item {
                        Value::String(s) => tokens.extend(split_command_list(s)),
                        other => self.push(
                            &path.index(i),
                            ViolationKind::WrongType {
                                expected: "string",
                                found: kind_of(other),
                            },
                        ),
                    }
                }
                tokens
            }
            other => {
                self.push(
                    path,
                    ViolationKind::WrongType {
                        expected: Schema::Command.expected_kind(),
                        found: kind_of(other),
                    },
                );
                return None;
            }
        };

        if tokens.is_empty() {
            self.push(
                path,
                ViolationKind::MalformedCommand {
                    token: value_as_token(value),
                    reason: "no command given".to_string(),
                },
            );
            return None;
        }

        let mut out = Vec::with_capacity(tokens.len());
        for token in tokens {
            match self.parser.parse_command(&token) {
                Ok(cmd) => out.push(Value::String(cmd.to_string())),
                Err(e) => self.push(
                    path,
                    ViolationKind::MalformedCommand {
                        token,
                        reason: e.to_string(),
                    },
                ),
            }
        }
        Some(Value::Array(out))
    }
}

/// Split a CommandSpec string on `,`, trimming each token and dropping blanks.
pub fn split_command_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn value_as_token(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Validate `value` against any schema, returning the normalized tree or all violations.
pub fn validate_with(
    schema: &Schema,
    value: &Value,
    parser: &dyn CommandParser,
) -> Result<Value, Violations> {
    let mut walker = Walker::new(parser);
    let normalized = walker.walk(schema, value, &KeyPath::root());
    let violations = walker.finish();
    match normalized {
        Some(tree) if violations.is_empty() => Ok(tree),
        _ => Err(violations),
    }
}

/// Validator for whole codes documents.
///
/// Owns the injected command parser. Cheap to clone and `Send + Sync`, so one
/// instance can be shared by a pool of batch workers.
#[derive(Debug, Clone)]
pub struct CodesValidator {
    parser: Arc<dyn CommandParser>,
}

impl CodesValidator {
    /// Create a validator around a command parser.
    pub fn new(parser: Arc<dyn CommandParser>) -> Self {
        Self { parser }
    }

    /// Generic structural validation of a codes document, without path context.
    ///
    /// An empty document (YAML `null`) is checked as an empty mapping, so it
    /// reports the missing sections rather than a type error.
    pub fn validate_structure(&self, tree: &Value) -> Result<Value, Violations> {
        let empty = Value::Object(Map::new());
        let tree = if tree.is_null() { &empty } else { tree };
        validate_with(codes_schema(), tree, self.parser.as_ref())
    }

    /// Full validation: structure first, then brand/category against the file path.
    ///
    /// The cross-field checks run only once the structure is clean; their
    /// violations are flagged by [`Violation::is_contextual`].
    ///
    /// # Errors
    ///
    /// Returns every violation found.
    pub fn validate(
        &self,
        tree: &Value,
        expected_brand: &SegmentName,
        expected_category: &SegmentName,
    ) -> Result<Value, Violations> {
        let normalized = self.validate_structure(tree)?;

        let mut violations = Vec::new();
        let info = &normalized["info"];
        let info_path = KeyPath::root().key("info");

        if let Some(brand) = info["brand"].as_str() {
            if !expected_brand.matches_declared(brand) {
                violations.push(Violation::new(
                    info_path.key("brand"),
                    ViolationKind::BrandMismatch {
                        declared: brand.to_string(),
                        expected: expected_brand.to_string(),
                    },
                ));
            }
        }
        if let Some(category) = info["category"].as_str() {
            if !expected_category.matches_declared(category) {
                violations.push(Violation::new(
                    info_path.key("category"),
                    ViolationKind::CategoryMismatch {
                        declared: category.to_string(),
                        expected: expected_category.to_string(),
                    },
                ));
            }
        }

        if violations.is_empty() {
            Ok(normalized)
        } else {
            Err(Violations::new(violations))
        }
    }
}
