//! # Error Types
//!
//! Errors raised while parsing identifiers, categories, and command tokens.
//! Resolution and schema errors live in their own crates.

use thiserror::Error;

/// Error for malformed identifiers and enumerated names.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The identifier is not of the form `<brand>.<category>.<number>`.
    #[error("source must be in the form <brand>.<category>.<number>, got '{value}'")]
    InvalidIdentifier {
        /// The rejected identifier string.
        value: String,
    },

    /// A brand or category path segment contains illegal characters.
    #[error("names must be only lowercase letters, digits, '_' or '-', got '{value}'")]
    InvalidSegment {
        /// The rejected segment.
        value: String,
    },

    /// The category is not one of the known device categories.
    #[error("unknown device category: {value:?}")]
    UnknownCategory {
        /// The rejected category string.
        value: String,
    },
}

/// Error returned by a [`crate::CommandParser`] for a single raw token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandParseError {
    /// Token was empty after trimming.
    #[error("empty command")]
    Empty,

    /// Token contains whitespace.
    #[error("command '{token}' contains whitespace")]
    Whitespace {
        /// The rejected token.
        token: String,
    },

    /// Protocol name has characters outside `[A-Za-z0-9_]`.
    #[error("invalid protocol name '{protocol}'")]
    InvalidProtocol {
        /// The rejected protocol name.
        protocol: String,
    },

    /// Protocol is not registered.
    #[error("unknown protocol '{protocol}'")]
    UnknownProtocol {
        /// The rejected protocol name.
        protocol: String,
    },

    /// One of the `:`-separated arguments is empty.
    #[error("command '{token}' has an empty argument at position {position}")]
    EmptyArgument {
        /// The rejected token.
        token: String,
        /// 1-based argument position.
        position: usize,
    },

    /// Argument count does not match the registered protocol.
    #[error("protocol '{protocol}' expects {expected} argument(s), got {actual}")]
    Arity {
        /// Protocol name.
        protocol: String,
        /// Registered argument count.
        expected: usize,
        /// Argument count found in the token.
        actual: usize,
    },
}
