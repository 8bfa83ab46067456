//! # Domain Sections
//!
//! Each domain contributes one optional top-level section to a codes
//! document. Adding a domain means adding a module here and an entry in
//! [`DOMAINS`]; the walker and the top-level schema pick it up unchanged.

pub mod media_player;

use crate::constraint::Schema;

/// A top-level domain section.
#[derive(Debug, Clone, Copy)]
pub struct DomainSpec {
    /// Section key in the document.
    pub name: &'static str,
    /// Builds the section schema.
    pub schema: fn() -> Schema,
}

/// All known domain sections in document order.
pub const DOMAINS: &[DomainSpec] = &[DomainSpec {
    name: "media_player",
    schema: media_player::media_player_schema,
}];
