//! # Command Parser Seam
//!
//! A codes file maps names to raw command tokens such as `nec:0x04:0x08`.
//! Turning a token into a [`Command`] is delegated to a [`CommandParser`]
//! handed to the validator at construction; nothing here is global.
//!
//! [`ProtocolRegistry`] is the default parser. A token is
//! `<protocol>[:<arg>...]`. With no registered protocols every well-formed
//! protocol name is accepted; once protocols are registered, unknown names
//! and wrong argument counts are rejected.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CommandParseError;

static PROTOCOL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").unwrap());

/// A parsed remote command.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Command {
    /// Protocol name, e.g. `nec`.
    pub protocol: String,
    /// Protocol arguments in order.
    #[serde(default)]
    pub args: Vec<String>,
}

impl fmt::Display for Command {
    /// Canonical token form, used as the normalized value in documents.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.protocol)?;
        for arg in &self.args {
            write!(f, ":{arg}")?;
        }
        Ok(())
    }
}

/// Turns one raw command token into a [`Command`].
pub trait CommandParser: Send + Sync + fmt::Debug {
    /// Parse a single token. The token is already split from its list and trimmed.
    fn parse_command(&self, raw: &str) -> Result<Command, CommandParseError>;
}

/// Default command parser with an optional table of known protocols.
#[derive(Debug, Clone, Default)]
pub struct ProtocolRegistry {
    /// Protocol name to required argument count.
    protocols: BTreeMap<String, usize>,
}

impl ProtocolRegistry {
    /// A permissive registry that accepts any well-formed protocol name.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a protocol with a fixed argument count.
    pub fn with_protocol(mut self, name: impl Into<String>, arity: usize) -> Self {
        self.protocols.insert(name.into().to_lowercase(), arity);
        self
    }

    /// Returns `true` if no protocols are registered.
    pub fn is_permissive(&self) -> bool {
        self.protocols.is_empty()
    }
}

impl CommandParser for ProtocolRegistry {
    fn parse_command(&self, raw: &str) -> Result<Command, CommandParseError> {
        let token = raw.trim();
        if token.is_empty() {
            return Err(CommandParseError::Empty);
        }
        if token.chars().any(char::is_whitespace) {
            return Err(CommandParseError::Whitespace {
                token: token.to_string(),
            });
        }

        let mut parts = token.split(':');
        let protocol = parts.next().unwrap_or_default().to_string();
        if !PROTOCOL_RE.is_match(&protocol) {
            return Err(CommandParseError::InvalidProtocol { protocol });
        }

        let mut args = Vec::new();
        for (i, arg) in parts.enumerate() {
            if arg.is_empty() {
                return Err(CommandParseError::EmptyArgument {
                    token: token.to_string(),
                    position: i + 1,
                });
            }
            args.push(arg.to_string());
        }

        if !self.is_permissive() {
            let expected = *self
                .protocols
                .get(&protocol.to_lowercase())
                .ok_or_else(|| CommandParseError::UnknownProtocol {
                    protocol: protocol.clone(),
                })?;
            if expected != args.len() {
                return Err(CommandParseError::Arity {
                    protocol,
                    expected,
                    actual: args.len(),
                });
            }
        }

        Ok(Command { protocol, args })
    }
}
