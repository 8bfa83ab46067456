//! Integration tests: validating whole trees of codes files.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use rcodes_core::ProtocolRegistry;
use rcodes_schema::CodesValidator;
use rcodes_source::{validate_tree, validate_tree_with_jobs, CodesError, BUILTIN_ROOT};

fn validator() -> CodesValidator {
    CodesValidator::new(Arc::new(ProtocolRegistry::new()))
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

const VALID: &str = "info:\n  brand: Acme\n  category: fan\n  models: [F1]\ncustom:\n  Speed: nec:1:2\n";

fn populate(root: &Path) {
    write(root, "acme/fan/acme.fan.1.yaml", VALID);
    write(root, "acme/fan/acme.fan.2.yaml", "info:\n  brand: Acme\n");
    write(root, "acme/light/acme.fan.3.yaml", VALID);
    write(root, "acme/fan/acme.fan.4.yaml", "info: [unclosed\n");
    write(root, "acme/fan/acme.fan.5.yaml", VALID);
}

#[test]
fn test_builtin_codes_are_valid() {
    let report = validate_tree(Path::new(BUILTIN_ROOT), &validator()).unwrap();
    assert!(report.total >= 2, "Expected shipped codes, found {}", report.total);
    let errors = report.errors();
    assert!(errors.is_empty(), "Built-in codes failed validation: {errors:#?}");
}

#[test]
fn test_failures_are_isolated_per_file() {
    let dir = tempfile::tempdir().unwrap();
    populate(dir.path());

    let report = validate_tree(dir.path(), &validator()).unwrap();
    assert_eq!(report.total, 5);
    assert_eq!(report.passed, 2);
    assert_eq!(report.failed, 3);

    let kinds: Vec<&str> = report
        .failures
        .iter()
        .map(|f| match f.error {
            CodesError::Invalid { .. } => "invalid",
            CodesError::Parse { .. } => "parse",
            CodesError::Path(_) => "path",
            CodesError::Read { .. } => "read",
        })
        .collect();
    // Sorted by path: acme/fan/acme.fan.2, acme/fan/acme.fan.4, acme/light/acme.fan.3.
    assert_eq!(kinds, vec!["invalid", "parse", "path"]);
}

#[test]
fn test_invalid_file_lists_every_error() {
    let dir = tempfile::tempdir().unwrap();
    populate(dir.path());

    let report = validate_tree(dir.path(), &validator()).unwrap();
    let (_, messages) = &report.errors()[0];
    // category missing, models missing, fewer than two sections.
    assert_eq!(messages.len(), 3, "got {messages:#?}");
}

#[test]
fn test_outcome_independent_of_worker_count() {
    let dir = tempfile::tempdir().unwrap();
    populate(dir.path());
    let v = validator();

    let serial = validate_tree_with_jobs(dir.path(), &v, 1).unwrap();
    for jobs in [2, 3, 8] {
        let parallel = validate_tree_with_jobs(dir.path(), &v, jobs).unwrap();
        assert_eq!(parallel.total, serial.total);
        assert_eq!(parallel.passed, serial.passed);
        let a: Vec<_> = serial.errors().into_iter().map(|(p, m)| (p.to_path_buf(), m)).collect();
        let b: Vec<_> = parallel.errors().into_iter().map(|(p, m)| (p.to_path_buf(), m)).collect();
        assert_eq!(a, b, "report differs with {jobs} workers");
    }
}

#[cfg(unix)]
#[test]
fn test_symlink_loop_does_not_inflate_report() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "acme/fan/acme.fan.1.yaml", VALID);
    std::os::unix::fs::symlink(dir.path(), dir.path().join("acme/fan/loop")).unwrap();

    let report = validate_tree(dir.path(), &validator()).unwrap();
    assert_eq!(report.total, 1, "report: {report:?}");
    assert_eq!(report.passed, 1);
}
