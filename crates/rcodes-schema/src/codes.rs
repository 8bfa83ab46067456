//! # Codes Document Schema
//!
//! The top-level schema: required `info`, one optional section per known
//! domain, optional `custom`, and at least two sections overall.

use std::sync::LazyLock;

use crate::common::{custom_schema, info_schema};
use crate::constraint::{MapSchema, Schema};
use crate::domains::DOMAINS;

/// Key of the mandatory metadata section.
pub const INFO_SECTION: &str = "info";

/// Key of the free-form section.
pub const CUSTOM_SECTION: &str = "custom";

static CODES_SCHEMA: LazyLock<Schema> = LazyLock::new(build_codes_schema);

fn build_codes_schema() -> Schema {
    let schema = MapSchema::new().required(INFO_SECTION, info_schema());
    DOMAINS
        .iter()
        .fold(schema, |schema, domain| schema.optional(domain.name, (domain.schema)()))
        .optional(CUSTOM_SECTION, custom_schema())
        .min_len(2)
        .build()
}

/// The compiled top-level schema, built once per process.
pub fn codes_schema() -> &'static Schema {
    &CODES_SCHEMA
}
