//! Integration tests: identifier resolution over temporary search roots.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rcodes_core::ProtocolRegistry;
use rcodes_source::{CodesError, PathError, ResolveError, SearchPath, SourceResolver};
use tempfile::TempDir;

const SONY_TV: &str = "\
info:
  brand: Sony
  category: tv
  models: [X100]
media_player:
  power:
    power_on: CMD1
    power_off: CMD2
";

fn write(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

/// Resolver over `extra` roots with an empty built-in root.
fn resolver(extra: &[&Path], builtin: &Path) -> SourceResolver {
    SourceResolver::new(
        SearchPath::new(extra.iter().copied()).with_builtin(builtin),
        Arc::new(ProtocolRegistry::new()),
    )
}

fn empty_builtin() -> TempDir {
    tempfile::tempdir().unwrap()
}

#[test]
fn test_resolve_scenario_sony_tv() {
    let defs = tempfile::tempdir().unwrap();
    let builtin = empty_builtin();
    write(defs.path(), "sony/tv/sony.tv.100.yaml", SONY_TV);

    let doc = resolver(&[defs.path()], builtin.path())
        .resolve("sony.tv.100", None)
        .unwrap();
    assert!(doc.info().brand.eq_ignore_ascii_case("sony"));
    assert_eq!(doc.info().category.as_str(), "tv");
    assert_eq!(doc.info().models, vec!["X100".to_string()]);
    assert_eq!(doc.commands("media_player.power.power_on"), Some(vec!["CMD1"]));
}

#[test]
fn test_renamed_category_directory_is_structure_mismatch() {
    let defs = tempfile::tempdir().unwrap();
    let builtin = empty_builtin();
    let path = write(defs.path(), "sony/av_receiver/sony.tv.100.yaml", SONY_TV);

    let err = rcodes_source::load_codes_file(
        &path,
        resolver(&[], builtin.path()).validator(),
    )
    .unwrap_err();
    assert!(
        matches!(err, CodesError::Path(PathError::StructureMismatch { .. })),
        "got {err}"
    );
}

#[test]
fn test_first_root_wins() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    let builtin = empty_builtin();
    write(first.path(), "sony/tv/sony.tv.100.yaml", &SONY_TV.replace("X100", "FIRST"));
    write(second.path(), "sony/tv/sony.tv.100.yaml", &SONY_TV.replace("X100", "SECOND"));

    let doc = resolver(&[first.path(), second.path()], builtin.path())
        .resolve("sony.tv.100", None)
        .unwrap();
    assert_eq!(doc.info().models, vec!["FIRST".to_string()]);
    assert!(doc.path().starts_with(first.path()));
}

#[test]
fn test_builtin_root_is_searched_last() {
    let extra = tempfile::tempdir().unwrap();
    let builtin = tempfile::tempdir().unwrap();
    write(builtin.path(), "sony/tv/sony.tv.100.yaml", SONY_TV);

    let doc = resolver(&[extra.path()], builtin.path())
        .resolve("sony.tv.100", None)
        .unwrap();
    assert!(doc.path().starts_with(builtin.path()));
}

#[test]
fn test_invalid_root_aborts_even_if_later_root_matches() {
    let good = tempfile::tempdir().unwrap();
    let builtin = empty_builtin();
    write(good.path(), "sony/tv/sony.tv.100.yaml", SONY_TV);
    let missing = good.path().join("does-not-exist");

    let err = resolver(&[missing.as_path(), good.path()], builtin.path())
        .resolve("sony.tv.100", None)
        .unwrap_err();
    match err {
        ResolveError::InvalidRoot { root } => assert_eq!(root, missing),
        other => panic!("Expected InvalidRoot, got {other}"),
    }
}

#[test]
fn test_file_as_root_is_invalid() {
    let dir = tempfile::tempdir().unwrap();
    let builtin = empty_builtin();
    let file = write(dir.path(), "not-a-dir", "x");

    let err = resolver(&[file.as_path()], builtin.path())
        .resolve("sony.tv.100", None)
        .unwrap_err();
    assert!(matches!(err, ResolveError::InvalidRoot { .. }), "got {err}");
}

#[test]
fn test_not_found_lists_all_roots() {
    let a = tempfile::tempdir().unwrap();
    let builtin = empty_builtin();

    let err = resolver(&[a.path()], builtin.path())
        .resolve("sony.tv.100", None)
        .unwrap_err();
    match err {
        ResolveError::NotFound { identifier, searched } => {
            assert_eq!(identifier, "sony.tv.100");
            assert_eq!(searched.len(), 2);
        }
        other => panic!("Expected NotFound, got {other}"),
    }
}

#[test]
fn test_invalid_identifier() {
    let builtin = empty_builtin();
    let err = resolver(&[], builtin.path())
        .resolve("Sony/tv/100", None)
        .unwrap_err();
    assert!(matches!(err, ResolveError::InvalidIdentifier(_)), "got {err}");
}

#[test]
fn test_domain_gate() {
    let defs = tempfile::tempdir().unwrap();
    let builtin = empty_builtin();
    write(defs.path(), "sony/tv/sony.tv.100.yaml", SONY_TV);
    let r = resolver(&[defs.path()], builtin.path());

    assert!(r.resolve("sony.tv.100", Some("media_player")).is_ok());
    let err = r.resolve("sony.tv.100", Some("climate")).unwrap_err();
    assert!(matches!(err, ResolveError::DomainNotPresent { ref domain, .. } if domain == "climate"));
}

#[test]
fn test_schema_failure_carries_all_violations() {
    let defs = tempfile::tempdir().unwrap();
    let builtin = empty_builtin();
    write(
        defs.path(),
        "sony/tv/sony.tv.100.yaml",
        "info:\n  brand: Sony\n  category: tv\n  models: []\nmedia_player:\n  power:\n    power_on: CMD1\n",
    );

    let err = resolver(&[defs.path()], builtin.path())
        .resolve("sony.tv.100", None)
        .unwrap_err();
    let ResolveError::Codes(codes) = err else {
        panic!("Expected Codes error, got {err}");
    };
    let violations = codes.violations().expect("schema violations");
    assert_eq!(violations.len(), 2, "got:\n{violations}");
}

#[test]
fn test_brand_mismatch_with_file_path() {
    let defs = tempfile::tempdir().unwrap();
    let builtin = empty_builtin();
    write(defs.path(), "lg/tv/lg.tv.1.yaml", SONY_TV);

    let err = resolver(&[defs.path()], builtin.path())
        .resolve("lg.tv.1", None)
        .unwrap_err();
    assert!(
        err.to_string().contains("Brand 'Sony' doesn't match filename (lg)"),
        "got {err}"
    );
}

#[test]
fn test_parse_error_has_position() {
    let defs = tempfile::tempdir().unwrap();
    let builtin = empty_builtin();
    write(defs.path(), "sony/tv/sony.tv.100.yaml", "info:\n  brand: [Sony\n");

    let err = resolver(&[defs.path()], builtin.path())
        .resolve("sony.tv.100", None)
        .unwrap_err();
    match err {
        ResolveError::Codes(CodesError::Parse { line, column, .. }) => {
            assert!(line > 0 && column > 0, "position missing: {line}:{column}");
        }
        other => panic!("Expected Parse error, got {other}"),
    }
}

#[test]
fn test_builtin_codes_resolve() {
    let doc = rcodes_source::get_codes("sony.tv.1", Some("media_player"), Vec::<PathBuf>::new()).unwrap();
    assert_eq!(doc.info().brand, "Sony");
    assert_eq!(
        doc.commands("media_player.numbers.0"),
        Some(vec!["sony12:1:9"])
    );
}

#[test]
fn test_trailing_identifier_content_is_ignored() {
    let defs = tempfile::tempdir().unwrap();
    let builtin = empty_builtin();
    let file = write(defs.path(), "sony/tv/sony.tv.100.yaml", SONY_TV);
    let r = resolver(&[defs.path()], builtin.path());

    for raw in ["sony.tv.100.old", "sony.tv.100abc"] {
        let doc = r.resolve(raw, None).unwrap();
        assert_eq!(doc.path(), file, "{raw} should locate the base file");
    }
}
