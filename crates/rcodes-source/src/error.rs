//! # Error Types: Resolution and Loading
//!
//! Two layers:
//!
//! - [`CodesError`]: loading one file failed: bad placement, unreadable,
//!   malformed YAML, or schema violations (all collected).
//! - [`ResolveError`]: looking up an identifier failed. Resolution-phase
//!   variants abort the lookup immediately; a located file that fails to load
//!   surfaces as [`ResolveError::Codes`].

use std::path::PathBuf;

use thiserror::Error;

use rcodes_schema::Violations;

/// Path or file name does not encode a valid, consistent brand/category.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// Path has no file name or fewer than two parent directories.
    #[error("path '{path}' must be <brand>/<category>/<brand>.<category>.<number>.<ext>")]
    Malformed {
        /// The offending path.
        path: PathBuf,
    },

    /// Directory segments differ from the file name components.
    #[error("File name ({file_name}) doesn't match folder structure ({brand}/{category})")]
    StructureMismatch {
        /// File name of the codes file.
        file_name: String,
        /// Brand directory.
        brand: String,
        /// Category directory.
        category: String,
    },

    /// A directory segment has illegal characters.
    #[error("Folder names must be only lowercases, digits or _ - but got '{brand}/{category}'")]
    InvalidSegmentName {
        /// Brand directory.
        brand: String,
        /// Category directory.
        category: String,
    },
}

/// Loading a single codes file failed.
#[derive(Error, Debug)]
pub enum CodesError {
    /// File placement is invalid.
    #[error("{0}")]
    Path(#[from] PathError),

    /// File could not be read.
    #[error("cannot read {path}: {source}")]
    Read {
        /// File path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// File is not well-formed YAML.
    #[error("Error parsing yaml file {path}[{line}:{column}]: {message}")]
    Parse {
        /// File path.
        path: PathBuf,
        /// 1-based line.
        line: usize,
        /// 1-based column.
        column: usize,
        /// Parser diagnostic.
        message: String,
    },

    /// Document violates the codes schema.
    #[error("invalid format in file {path}:\n{violations}")]
    Invalid {
        /// File path.
        path: PathBuf,
        /// Every violation found.
        violations: Violations,
    },
}

impl CodesError {
    /// One line per problem, for reports that list every error of a file.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Invalid { violations, .. } => violations
                .violations()
                .iter()
                .map(|v| format!("{}: {}", v.path, v.message()))
                .collect(),
            other => vec![other.to_string()],
        }
    }

    /// Schema violations, if this is a schema failure.
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            Self::Invalid { violations, .. } => Some(violations),
            _ => None,
        }
    }
}

/// Resolving an identifier failed.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// Identifier is not `<brand>.<category>.<number>`.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(#[from] rcodes_core::CoreError),

    /// A configured search root is missing or not a directory.
    #[error("search root is not a directory: {}", root.display())]
    InvalidRoot {
        /// The offending root.
        root: PathBuf,
    },

    /// No root holds a file for the identifier.
    #[error("no codes file for '{identifier}' in {} search root(s)", searched.len())]
    NotFound {
        /// The identifier looked up.
        identifier: String,
        /// Roots searched, in order.
        searched: Vec<PathBuf>,
    },

    /// The file lacks the requested domain section.
    #[error("No codes definition for domain '{domain}' in file {}", path.display())]
    DomainNotPresent {
        /// Requested domain.
        domain: String,
        /// The resolved file.
        path: PathBuf,
    },

    /// The located file failed to load.
    #[error(transparent)]
    Codes(#[from] CodesError),
}
