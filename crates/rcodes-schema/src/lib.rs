//! # rcodes-schema: Structural Validation of Codes Documents
//!
//! Validates the tree of a remote codes document and returns either a
//! normalized tree or the complete list of violations.
//!
//! ## Layers
//!
//! - [`constraint`]: schema primitives as data: required/optional/default
//!   keys, enumerations, minimum lengths, inclusive groups, open maps,
//!   command specs.
//! - [`validate`]: the one generic walker that interprets them, plus
//!   [`CodesValidator`] which adds the brand/category cross-check.
//! - [`common`], [`domains`], [`codes`]: the codes schema itself, written
//!   purely in terms of the primitives.
//! - [`tree`]: YAML text to tree, with positioned parse errors.
//!
//! ## Crate Policy
//!
//! - Depends only on `rcodes-core` internally.
//! - Validation is exhaustive: never stop at the first violation.
//! - Adding a domain section must not require changes to the walker.

pub mod codes;
pub mod common;
pub mod constraint;
pub mod domains;
pub mod tree;
pub mod validate;
pub mod violation;

pub use codes::{codes_schema, CUSTOM_SECTION, INFO_SECTION};
pub use constraint::{
    Field, InclusiveGroup, MapSchema, MinLength, NamePattern, OpenMapSchema, Presence, Schema,
};
pub use domains::{DomainSpec, DOMAINS};
pub use tree::{parse_tree, TreeParseError};
pub use validate::{split_command_list, validate_with, CodesValidator, Walker};
pub use violation::{KeyPath, PathSegment, Violation, ViolationKind, Violations};
