//! # Validate Subcommand
//!
//! Batch validation of a folder of codes files. Each failing file is printed
//! with every error found in it; a clean tree prints
//! `Codes definitions are OK`.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use rcodes_schema::CodesValidator;
use rcodes_source::{validate_tree_with_jobs, ValidationReport};

use crate::default_parser;

/// Arguments for the `remotecodes validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Root folder holding `<brand>/<category>/<brand>.<category>.<n>.yaml` files.
    #[arg(value_name = "FOLDER")]
    pub folder: PathBuf,

    /// Number of worker threads. Defaults to the available parallelism.
    #[arg(short, long)]
    pub jobs: Option<NonZeroUsize>,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when every file is valid, 1 otherwise.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let jobs = args
        .jobs
        .or_else(|| std::thread::available_parallelism().ok())
        .map_or(1, NonZeroUsize::get);
    let validator = CodesValidator::new(default_parser());

    tracing::info!(folder = %args.folder.display(), jobs, "validating codes tree");

    let report = validate_tree_with_jobs(&args.folder, &validator, jobs)
        .with_context(|| format!("cannot validate {}", args.folder.display()))?;

    print!("{}", render_report(&report, &args.folder));
    Ok(if report.is_ok() { 0 } else { 1 })
}

/// Render a report the way the subcommand prints it.
pub fn render_report(report: &ValidationReport, root: &Path) -> String {
    if report.is_ok() {
        return "Codes definitions are OK\n".to_string();
    }

    let mut out = String::new();
    for (path, messages) in report.errors() {
        let rel = path.strip_prefix(root).unwrap_or(path);
        out.push_str(&format!("FAIL: {}\n", rel.display()));
        for message in messages {
            for line in message.lines() {
                out.push_str(&format!("  {line}\n"));
            }
        }
    }
    out.push_str(&format!(
        "\n{} file(s) failed validation out of {} total.\n",
        report.failed, report.total
    ));
    out
}
