//! # Batch Validation
//!
//! Validates every `*.yaml` file under a root directory. A failing file is
//! recorded and the walk continues; only a bad root aborts.
//!
//! Files are validated by a fixed pool of scoped worker threads pulling
//! indexes from a shared counter. Results are stored by file index, so the
//! report is identical for any worker count or scheduling.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use rcodes_schema::CodesValidator;

use crate::error::{CodesError, ResolveError};
use crate::loader::{load_codes_file, CODES_EXTENSION};

/// A file that failed validation.
#[derive(Debug)]
pub struct FileFailure {
    /// The failing file.
    pub path: PathBuf,
    /// Why it failed.
    pub error: CodesError,
}

/// Outcome of validating a tree.
#[derive(Debug, Default)]
pub struct ValidationReport {
    /// Files examined.
    pub total: usize,
    /// Files that passed.
    pub passed: usize,
    /// Files that failed.
    pub failed: usize,
    /// Failures in path order.
    pub failures: Vec<FileFailure>,
}

impl ValidationReport {
    /// Returns `true` if every file passed.
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }

    /// `(file, messages)` for every failing file; empty means success.
    pub fn errors(&self) -> Vec<(&Path, Vec<String>)> {
        self.failures
            .iter()
            .map(|f| (f.path.as_path(), f.error.messages()))
            .collect()
    }
}

/// Recursively collect `*.yaml` files under `dir`, sorted.
pub fn find_codes_files(dir: &Path) -> Vec<PathBuf> {
    let mut results = Vec::new();
    walk_for_codes(dir, &mut results);
    results.sort();
    results
}

fn walk_for_codes(dir: &Path, acc: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "failed to read directory during file walk");
            return;
        }
    };
    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "failed to read directory entry");
                continue;
            }
        };
        let file_type = match entry.file_type() {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!(path = %entry.path().display(), error = %e, "failed to stat directory entry");
                continue;
            }
        };
        let path = entry.path();
        // Symlinked directories are never descended into.
        if file_type.is_dir() {
            walk_for_codes(&path, acc);
        } else if file_type.is_symlink() && path.is_dir() {
            tracing::debug!(path = %path.display(), "skipping symlinked directory");
        } else if path.extension().and_then(|e| e.to_str()) == Some(CODES_EXTENSION) {
            acc.push(path);
        }
    }
}

/// Validate every codes file under `root` on the calling thread.
pub fn validate_tree(root: &Path, validator: &CodesValidator) -> Result<ValidationReport, ResolveError> {
    validate_tree_with_jobs(root, validator, 1)
}

/// Validate every codes file under `root` using `jobs` worker threads.
///
/// # Errors
///
/// [`ResolveError::InvalidRoot`] if `root` is not a directory. Per-file
/// failures are reported in the [`ValidationReport`], never as errors.
pub fn validate_tree_with_jobs(
    root: &Path,
    validator: &CodesValidator,
    jobs: usize,
) -> Result<ValidationReport, ResolveError> {
    if !root.is_dir() {
        return Err(ResolveError::InvalidRoot {
            root: root.to_path_buf(),
        });
    }

    let files = find_codes_files(root);
    let outcomes = validate_files(&files, validator, jobs);

    let mut report = ValidationReport {
        total: files.len(),
        ..ValidationReport::default()
    };
    for (path, outcome) in files.into_iter().zip(outcomes) {
        match outcome {
            Ok(()) => report.passed += 1,
            Err(error) => report.failures.push(FileFailure { path, error }),
        }
    }
    report.failed = report.failures.len();
    Ok(report)
}

/// Validate `files`, returning one outcome per file in input order.
pub fn validate_files(
    files: &[PathBuf],
    validator: &CodesValidator,
    jobs: usize,
) -> Vec<Result<(), CodesError>> {
    let jobs = jobs.clamp(1, files.len().max(1));
    let next = AtomicUsize::new(0);

    let worker = || {
        let mut done = Vec::new();
        loop {
            let i = next.fetch_add(1, Ordering::Relaxed);
            let Some(path) = files.get(i) else {
                break;
            };
            tracing::debug!(file = %path.display(), "validating");
            done.push((i, load_codes_file(path, validator).map(|_| ())));
        }
        done
    };

    let mut slots: Vec<Option<Result<(), CodesError>>> = files.iter().map(|_| None).collect();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..jobs).map(|_| scope.spawn(worker)).collect();
        for handle in handles {
            match handle.join() {
                Ok(done) => {
                    for (i, outcome) in done {
                        slots[i] = Some(outcome);
                    }
                }
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
    });

    slots.into_iter().flatten().collect()
}
