//! # Codes Identifiers
//!
//! Newtype wrappers for the names that locate a codes file on disk.
//!
//! An [`Identifier`] has the form `<brand>.<category>.<number>` and maps to
//! exactly one candidate file per search root:
//! `<root>/<brand>/<category>/<brand>.<category>.<number>.yaml`.
//!
//! Brand and category are [`SegmentName`]s: lowercase-start, then lowercase
//! letters, digits, `_` or `-`. They are matched case-sensitively against
//! directory names and case-insensitively against declared file content.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

static SEGMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9][a-z0-9_\-]*$").unwrap());

// Anchored at the start only: trailing content after the number is tolerated.
static IDENTIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-z0-9][a-z0-9_\-]*)\.([a-z0-9][a-z0-9_\-]*)\.([0-9]+)").unwrap()
});

/// A validated brand or category directory name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SegmentName(String);

impl SegmentName {
    /// Validate a directory segment against `^[a-z0-9][a-z0-9_-]*$`.
    pub fn new(value: impl Into<String>) -> Result<Self, CoreError> {
        let value = value.into();
        if SEGMENT_RE.is_match(&value) {
            Ok(Self(value))
        } else {
            Err(CoreError::InvalidSegment { value })
        }
    }

    /// Returns `true` if `value` would be accepted by [`SegmentName::new`].
    pub fn is_valid(value: &str) -> bool {
        SEGMENT_RE.is_match(value)
    }

    /// Access the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison against declared document content.
    pub fn matches_declared(&self, declared: &str) -> bool {
        self.0.to_lowercase() == declared.to_lowercase()
    }
}

impl TryFrom<String> for SegmentName {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SegmentName> for String {
    fn from(value: SegmentName) -> Self {
        value.0
    }
}

impl fmt::Display for SegmentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A `brand.category.number` reference to a single codes file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    brand: SegmentName,
    category: SegmentName,
    number: String,
}

impl Identifier {
    /// Parse an identifier string.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidIdentifier`] if the string does not start
    /// with `<brand>.<category>.<digits>`. Anything after the digits is
    /// ignored and never reaches the file path.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        let caps = IDENTIFIER_RE
            .captures(value)
            .ok_or_else(|| CoreError::InvalidIdentifier {
                value: value.to_string(),
            })?;

        Ok(Self {
            brand: SegmentName(caps[1].to_string()),
            category: SegmentName(caps[2].to_string()),
            number: caps[3].to_string(),
        })
    }

    /// Brand segment.
    pub fn brand(&self) -> &SegmentName {
        &self.brand
    }

    /// Category segment.
    pub fn category(&self) -> &SegmentName {
        &self.category
    }

    /// Numeric suffix, kept as its digit string (leading zeros are significant).
    pub fn number(&self) -> &str {
        &self.number
    }

    /// File name for this identifier with the given extension.
    pub fn file_name(&self, extension: &str) -> String {
        format!("{self}.{extension}")
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.brand, self.category, self.number)
    }
}

impl FromStr for Identifier {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_identifier() {
        let id = Identifier::parse("sony.tv.100").unwrap();
        assert_eq!(id.brand().as_str(), "sony");
        assert_eq!(id.category().as_str(), "tv");
        assert_eq!(id.number(), "100");
        assert_eq!(id.to_string(), "sony.tv.100");
        assert_eq!(id.file_name("yaml"), "sony.tv.100.yaml");
    }

    #[test]
    fn test_parse_allows_dash_and_underscore() {
        let id = Identifier::parse("bang-olufsen.av_receiver.7").unwrap();
        assert_eq!(id.brand().as_str(), "bang-olufsen");
        assert_eq!(id.category().as_str(), "av_receiver");
    }

    #[test]
    fn test_parse_ignores_trailing_content() {
        let id = Identifier::parse("sony.tv.12abc").unwrap();
        assert_eq!(id.number(), "12");
        assert_eq!(id.to_string(), "sony.tv.12");
        assert_eq!(id.file_name("yaml"), "sony.tv.12.yaml");
    }

    #[test]
    fn test_trailing_path_text_never_reaches_file_name() {
        let id = Identifier::parse("sony.tv.1/../../etc/passwd").unwrap();
        assert_eq!(id.file_name("yaml"), "sony.tv.1.yaml");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in [
            "",
            "sony",
            "sony.tv",
            "sony.tv.",
            "Sony.tv.1",
            "sony.TV.1",
            "_sony.tv.1",
            "sony.tv.x1",
            "sony..1",
        ] {
            let err = Identifier::parse(bad).unwrap_err();
            assert!(
                matches!(err, CoreError::InvalidIdentifier { .. }),
                "Expected InvalidIdentifier for {bad:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_segment_name_validation() {
        assert!(SegmentName::new("lg").is_ok());
        assert!(SegmentName::new("0day").is_ok());
        assert!(SegmentName::new("a_b-c").is_ok());
        assert!(SegmentName::new("").is_err());
        assert!(SegmentName::new("-lg").is_err());
        assert!(SegmentName::new("LG").is_err());
        assert!(SegmentName::new("l g").is_err());
    }

    #[test]
    fn test_segment_matches_declared_case_insensitively() {
        let brand = SegmentName::new("sony").unwrap();
        assert!(brand.matches_declared("Sony"));
        assert!(brand.matches_declared("SONY"));
        assert!(!brand.matches_declared("Sonyy"));
    }

    #[test]
    fn test_segment_serde_rejects_invalid() {
        let ok: SegmentName = serde_json::from_str("\"denon\"").unwrap();
        assert_eq!(ok.as_str(), "denon");
        assert!(serde_json::from_str::<SegmentName>("\"Denon\"").is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Every well-formed identifier parses and renders back unchanged.
        #[test]
        fn identifier_display_roundtrip(
            brand in "[a-z0-9][a-z0-9_-]{0,12}",
            category in "[a-z0-9][a-z0-9_-]{0,12}",
            number in "[0-9]{1,6}",
        ) {
            let raw = format!("{brand}.{category}.{number}");
            let id = Identifier::parse(&raw).unwrap();
            prop_assert_eq!(id.to_string(), raw);
            prop_assert!(SegmentName::is_valid(id.brand().as_str()));
            prop_assert!(SegmentName::is_valid(id.category().as_str()));
        }

        /// Uppercase letters anywhere in the brand are rejected.
        #[test]
        fn identifier_rejects_uppercase_brand(
            brand in "[A-Z][a-zA-Z]{0,8}",
            number in "[0-9]{1,4}",
        ) {
            let raw = format!("{brand}.tv.{number}");
            prop_assert!(Identifier::parse(&raw).is_err());
        }
    }
}
