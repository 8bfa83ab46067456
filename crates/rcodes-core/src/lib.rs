//! # rcodes-core: Foundational Types for Remote Codes
//!
//! Defines the primitives shared by every other crate in the workspace:
//!
//! 1. **Validated identifiers.** [`Identifier`] (`brand.category.number`) and
//!    [`SegmentName`] are newtypes with checked constructors. No bare strings
//!    flow into path construction.
//!
//! 2. **Single `Category` enum.** One definition of the device categories a
//!    codes file may declare, used by the schema enumeration.
//!
//! 3. **Command parser seam.** Raw command tokens are turned into [`Command`]
//!    values by a [`CommandParser`] passed in explicitly. There is no global
//!    registry; [`ProtocolRegistry`] is the default implementation.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `rcodes-*` crates (leaf of the DAG).
//! - No `unsafe` code.
//! - No `.unwrap()` outside tests, except on literal regex patterns.

pub mod category;
pub mod command;
pub mod error;
pub mod identity;

pub use category::{Category, CATEGORY_COUNT};
pub use command::{Command, CommandParser, ProtocolRegistry};
pub use error::{CommandParseError, CoreError};
pub use identity::{Identifier, SegmentName};
