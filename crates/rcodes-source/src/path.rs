//! # Path Conformance
//!
//! A codes file must live at `<brand>/<category>/<brand>.<category>.<n>.<ext>`.
//! The two directory segments are the authoritative brand and category; the
//! schema cross-check compares the document's `info` against them.

use std::path::Path;

use rcodes_core::SegmentName;

use crate::error::PathError;

/// Brand and category taken from a file's directory placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathOrigin {
    /// Brand directory.
    pub brand: SegmentName,
    /// Category directory.
    pub category: SegmentName,
}

fn segment(path: &Path) -> Option<&str> {
    path.file_name().and_then(|s| s.to_str())
}

/// Check that `path` is placed and named consistently.
///
/// Order matters for diagnostics: a directory/file-name mismatch is reported
/// before illegal characters.
///
/// # Errors
///
/// - [`PathError::Malformed`] if the path lacks a file name or two parents.
/// - [`PathError::StructureMismatch`] if the directories differ from the
///   first two file name components (case-sensitive).
/// - [`PathError::InvalidSegmentName`] if a directory name is not
///   `^[a-z0-9][a-z0-9_-]*$`.
pub fn check_path(path: &Path) -> Result<PathOrigin, PathError> {
    let malformed = || PathError::Malformed {
        path: path.to_path_buf(),
    };

    let file_name = segment(path).ok_or_else(malformed)?;
    let category_dir = path.parent().ok_or_else(malformed)?;
    let brand_dir = category_dir.parent().ok_or_else(malformed)?;
    let category = segment(category_dir).ok_or_else(malformed)?;
    let brand = segment(brand_dir).ok_or_else(malformed)?;

    let mut components = file_name.split('.');
    let name_brand = components.next().unwrap_or_default();
    let name_category = components.next().unwrap_or_default();

    if brand != name_brand || category != name_category {
        return Err(PathError::StructureMismatch {
            file_name: file_name.to_string(),
            brand: brand.to_string(),
            category: category.to_string(),
        });
    }

    let invalid = || PathError::InvalidSegmentName {
        brand: brand.to_string(),
        category: category.to_string(),
    };
    Ok(PathOrigin {
        brand: SegmentName::new(brand).map_err(|_| invalid())?,
        category: SegmentName::new(category).map_err(|_| invalid())?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conforming_path() {
        let origin = check_path(Path::new("/defs/sony/tv/sony.tv.100.yaml")).unwrap();
        assert_eq!(origin.brand.as_str(), "sony");
        assert_eq!(origin.category.as_str(), "tv");
    }

    #[test]
    fn test_relative_path() {
        let origin = check_path(Path::new("lg/projector/lg.projector.3.yaml")).unwrap();
        assert_eq!(origin.brand.as_str(), "lg");
    }

    #[test]
    fn test_category_directory_mismatch() {
        let err = check_path(Path::new("/defs/sony/av_receiver/sony.tv.100.yaml")).unwrap_err();
        assert!(matches!(err, PathError::StructureMismatch { .. }), "got {err:?}");
        assert!(err.to_string().contains("sony/av_receiver"));
    }

    #[test]
    fn test_mismatch_is_case_sensitive() {
        let err = check_path(Path::new("/defs/sony/tv/Sony.tv.1.yaml")).unwrap_err();
        assert!(matches!(err, PathError::StructureMismatch { .. }));
    }

    #[test]
    fn test_matching_but_illegal_segments() {
        let err = check_path(Path::new("/defs/Sony/tv/Sony.tv.1.yaml")).unwrap_err();
        assert_eq!(
            err,
            PathError::InvalidSegmentName {
                brand: "Sony".to_string(),
                category: "tv".to_string(),
            }
        );
    }

    #[test]
    fn test_too_shallow_path() {
        assert!(matches!(
            check_path(Path::new("sony.tv.1.yaml")),
            Err(PathError::Malformed { .. }) | Err(PathError::StructureMismatch { .. })
        ));
    }
}
