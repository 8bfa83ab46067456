//! # rcodes-source: Locating and Loading Codes Files
//!
//! Turns an identifier such as `sony.tv.1` into a validated
//! [`NormalizedDocument`], and validates whole directory trees of codes
//! files.
//!
//! ## Pipeline
//!
//! identifier → [`SourceResolver::locate`] → [`check_path`] → YAML tree →
//! [`rcodes_schema::CodesValidator`] → [`NormalizedDocument`].
//!
//! ## Error Policy
//!
//! - Resolution errors (bad identifier, bad root, not found, bad placement)
//!   end a lookup immediately.
//! - Schema violations are collected exhaustively per file.
//! - Batch validation isolates failures per file and keeps going.

pub mod batch;
pub mod document;
pub mod error;
pub mod loader;
pub mod path;
pub mod resolver;

pub use batch::{
    find_codes_files, validate_files, validate_tree, validate_tree_with_jobs, FileFailure,
    ValidationReport,
};
pub use document::{Info, NormalizedDocument};
pub use error::{CodesError, PathError, ResolveError};
pub use loader::{load_codes_file, CODES_EXTENSION};
pub use path::{check_path, PathOrigin};
pub use resolver::{
    discover_builtin_root, get_codes, SearchPath, SourceResolver, BUILTIN_DIR_NAME, BUILTIN_ROOT,
    BUILTIN_ROOT_ENV,
};
