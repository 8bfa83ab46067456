//! # Resolve Subcommand
//!
//! Looks up one identifier across the search roots and prints the
//! normalized document.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use rcodes_source::{NormalizedDocument, SearchPath, SourceResolver};

use crate::default_parser;

/// Output encoding for a resolved document.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// YAML.
    Yaml,
}

/// Arguments for the `remotecodes resolve` subcommand.
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Identifier of the form `<brand>.<category>.<number>`.
    #[arg(value_name = "IDENTIFIER")]
    pub identifier: String,

    /// Fail unless the document defines this domain section.
    #[arg(long)]
    pub domain: Option<String>,

    /// Extra search root, searched before the built-in one. Repeatable.
    #[arg(long = "root", value_name = "DIR")]
    pub roots: Vec<PathBuf>,

    /// Override the built-in codes root (default: $REMOTECODES_BUILTIN, then
    /// `codes/` next to the binary).
    #[arg(long, value_name = "DIR")]
    pub builtin: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

/// Execute the resolve subcommand.
///
/// Returns exit code 0 after printing the document. Resolution failures are
/// returned as errors.
pub fn run_resolve(args: &ResolveArgs) -> Result<u8> {
    let resolver = build_resolver(args);
    let document = resolver
        .resolve(&args.identifier, args.domain.as_deref())
        .with_context(|| format!("cannot resolve '{}'", args.identifier))?;

    tracing::info!(path = %document.path().display(), "resolved");
    println!("{}", render_document(&document, args.format)?);
    Ok(0)
}

fn build_resolver(args: &ResolveArgs) -> SourceResolver {
    let mut search_path = SearchPath::new(&args.roots);
    if let Some(builtin) = &args.builtin {
        search_path = search_path.with_builtin(builtin);
    }
    SourceResolver::new(search_path, default_parser())
}

/// Encode a normalized document.
pub fn render_document(document: &NormalizedDocument, format: OutputFormat) -> Result<String> {
    let text = match format {
        OutputFormat::Json => serde_json::to_string_pretty(document.tree())
            .context("failed to encode document as JSON")?,
        OutputFormat::Yaml => {
            serde_yaml::to_string(document.tree()).context("failed to encode document as YAML")?
        }
    };
    Ok(text.trim_end().to_string())
}
