//! # rcodes-cli: remotecodes Command-Line Interface
//!
//! ## Subcommands
//!
//! - `remotecodes validate <FOLDER>`: validate every `*.yaml` codes file
//!   under a folder; exit 0 when all pass, 1 otherwise.
//! - `remotecodes resolve <IDENTIFIER>`: locate, validate and print one
//!   normalized document.
//!
//! ```bash
//! remotecodes validate ./codes --jobs 4
//! remotecodes resolve sony.tv.1 --domain media_player --format yaml
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from business logic.
//! - Handlers delegate to `rcodes-source`; they only format output and pick
//!   the exit code.

pub mod resolve;
pub mod validate;

use std::sync::Arc;

use rcodes_core::{CommandParser, ProtocolRegistry};

/// Command parser used by every subcommand.
pub fn default_parser() -> Arc<dyn CommandParser> {
    Arc::new(ProtocolRegistry::new())
}

/// Log level directive for a `-v` count.
pub fn verbosity_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
