//! # Loading One Codes File
//!
//! path check → read → YAML tree → schema + cross-check → [`NormalizedDocument`].

use std::path::Path;

use rcodes_schema::{parse_tree, CodesValidator, KeyPath, Violation, ViolationKind, Violations};

use crate::document::NormalizedDocument;
use crate::error::CodesError;
use crate::path::check_path;

/// Extension of codes definition files.
pub const CODES_EXTENSION: &str = "yaml";

/// Load and fully validate the codes file at `path`.
///
/// # Errors
///
/// Returns the first failing stage as a [`CodesError`]; schema violations
/// within that stage are all collected.
pub fn load_codes_file(
    path: &Path,
    validator: &CodesValidator,
) -> Result<NormalizedDocument, CodesError> {
    let origin = check_path(path)?;

    let text = std::fs::read_to_string(path).map_err(|source| CodesError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let tree = parse_tree(&text).map_err(|e| CodesError::Parse {
        path: path.to_path_buf(),
        line: e.line,
        column: e.column,
        message: e.message,
    })?;

    let invalid = |violations| CodesError::Invalid {
        path: path.to_path_buf(),
        violations,
    };

    let normalized = validator
        .validate(&tree, &origin.brand, &origin.category)
        .map_err(invalid)?;

    NormalizedDocument::from_tree(path, normalized).ok_or_else(|| {
        invalid(Violations::new(vec![Violation::new(
            KeyPath::root(),
            ViolationKind::MissingKey {
                key: rcodes_schema::INFO_SECTION.to_string(),
            },
        )]))
    })
}
