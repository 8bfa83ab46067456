//! # Violations
//!
//! Every schema failure is recorded as a [`Violation`]: a key path into the
//! document plus a [`ViolationKind`]. Validation never stops at the first
//! failure; the walker pushes violations into a list and keeps going.

use std::fmt;

/// One step in a [`KeyPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Mapping key.
    Key(String),
    /// Sequence index.
    Index(usize),
}

/// Location of a node inside the document tree, e.g. `info.models[0]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeyPath(Vec<PathSegment>);

impl KeyPath {
    /// The document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a dotted path such as `media_player.power`. Indexes are not supported.
    pub fn from_dotted(dotted: &str) -> Self {
        Self(
            dotted
                .split('.')
                .filter(|s| !s.is_empty())
                .map(|s| PathSegment::Key(s.to_string()))
                .collect(),
        )
    }

    /// Path to a mapping child.
    pub fn key(&self, key: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Key(key.to_string()));
        Self(segments)
    }

    /// Path to a sequence element.
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(index));
        Self(segments)
    }

    /// Returns `true` for the document root.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("(root)");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i == 0 => write!(f, "{key}")?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(idx) => write!(f, "[{idx}]")?,
            }
        }
        Ok(())
    }
}

/// What went wrong at a [`KeyPath`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// A required key is absent from the mapping at the violation path.
    MissingKey {
        /// The absent key.
        key: String,
    },
    /// A closed mapping contains a key it does not declare.
    UnexpectedKey {
        /// The undeclared key.
        key: String,
    },
    /// The node has the wrong kind (e.g. a number where a string is expected).
    WrongType {
        /// Expected node kind.
        expected: &'static str,
        /// Node kind found.
        found: &'static str,
    },
    /// Scalar is not one of the allowed values.
    InvalidEnum {
        /// Rendered offending value.
        value: String,
        /// Allowed values.
        allowed: Vec<String>,
    },
    /// Container has fewer entries than required.
    TooShort {
        /// Required minimum.
        min: usize,
        /// Entries found.
        actual: usize,
        /// Optional domain-specific wording.
        message: Option<String>,
    },
    /// Some members of an inclusive group are present, this one is not.
    InclusiveGroup {
        /// Group name.
        group: String,
        /// The absent member.
        missing: String,
        /// A present member that created the requirement.
        companion: String,
    },
    /// Open-map key does not match the name pattern.
    InvalidName {
        /// The rejected key.
        name: String,
    },
    /// A command token was rejected by the command parser.
    MalformedCommand {
        /// The raw token (or the whole value when the list is empty).
        token: String,
        /// Parser diagnostic.
        reason: String,
    },
    /// `info.brand` disagrees with the brand encoded in the file path.
    BrandMismatch {
        /// Value declared in the document.
        declared: String,
        /// Value derived from the file path.
        expected: String,
    },
    /// `info.category` disagrees with the category encoded in the file path.
    CategoryMismatch {
        /// Value declared in the document.
        declared: String,
        /// Value derived from the file path.
        expected: String,
    },
}

/// A single validation violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Path to the container or node the violation is attached to.
    pub path: KeyPath,
    /// The failure.
    pub kind: ViolationKind,
}

impl Violation {
    /// Construct a violation.
    pub fn new(path: KeyPath, kind: ViolationKind) -> Self {
        Self { path, kind }
    }

    /// Returns `true` for violations that depend on the file path rather
    /// than on the document alone.
    pub fn is_contextual(&self) -> bool {
        matches!(
            self.kind,
            ViolationKind::BrandMismatch { .. } | ViolationKind::CategoryMismatch { .. }
        )
    }

    /// Human-readable description without the path prefix.
    pub fn message(&self) -> String {
        match &self.kind {
            ViolationKind::MissingKey { key } => format!("required key '{key}' not provided"),
            ViolationKind::UnexpectedKey { key } => format!("extra key '{key}' not allowed"),
            ViolationKind::WrongType { expected, found } => {
                format!("expected {expected}, got {found}")
            }
            ViolationKind::InvalidEnum { value, allowed } => format!(
                "value {value} is not allowed, must be one of: {}",
                allowed.join(", ")
            ),
            ViolationKind::TooShort {
                message: Some(message),
                ..
            } => message.clone(),
            ViolationKind::TooShort { min, actual, .. } => {
                format!("length of value must be at least {min}, got {actual}")
            }
            ViolationKind::InclusiveGroup {
                missing, companion, ..
            } => format!("must also define '{missing}' (required by '{companion}')"),
            ViolationKind::InvalidName { name } => {
                format!("invalid characters for name '{name}'")
            }
            ViolationKind::MalformedCommand { token, reason } => {
                format!("invalid command '{token}': {reason}")
            }
            ViolationKind::BrandMismatch { declared, expected } => {
                format!("Brand '{declared}' doesn't match filename ({expected})")
            }
            ViolationKind::CategoryMismatch { declared, expected } => {
                format!("Category '{declared}' doesn't match filename ({expected})")
            }
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  {}: {}", self.path, self.message())
    }
}

/// Collection of validation violations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations {
    violations: Vec<Violation>,
}

impl Violations {
    /// Wrap a list of violations.
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_path_display() {
        let path = KeyPath::root().key("info").key("models").index(0);
        assert_eq!(path.to_string(), "info.models[0]");
        assert_eq!(KeyPath::root().to_string(), "(root)");
        assert_eq!(
            KeyPath::from_dotted("media_player.power").to_string(),
            "media_player.power"
        );
    }

    #[test]
    fn test_violation_display_names_companion() {
        let v = Violation::new(
            KeyPath::from_dotted("media_player.power"),
            ViolationKind::InclusiveGroup {
                group: "power".to_string(),
                missing: "power_off".to_string(),
                companion: "power_on".to_string(),
            },
        );
        let display = v.to_string();
        assert!(display.contains("media_player.power"));
        assert!(display.contains("must also define 'power_off'"));
        assert!(display.contains("'power_on'"));
    }

    #[test]
    fn test_too_short_custom_message() {
        let v = Violation::new(
            KeyPath::from_dotted("media_player.sources"),
            ViolationKind::TooShort {
                min: 1,
                actual: 0,
                message: Some("must have at least one source".to_string()),
            },
        );
        assert_eq!(v.message(), "must have at least one source");
    }

    #[test]
    fn test_contextual_violations() {
        let brand = Violation::new(
            KeyPath::from_dotted("info.brand"),
            ViolationKind::BrandMismatch {
                declared: "Sony".to_string(),
                expected: "lg".to_string(),
            },
        );
        let missing = Violation::new(
            KeyPath::root(),
            ViolationKind::MissingKey {
                key: "info".to_string(),
            },
        );
        assert!(brand.is_contextual());
        assert!(!missing.is_contextual());
        assert_eq!(brand.message(), "Brand 'Sony' doesn't match filename (lg)");
    }

    #[test]
    fn test_violations_display_multiline() {
        let list = Violations::new(vec![
            Violation::new(
                KeyPath::root(),
                ViolationKind::MissingKey {
                    key: "info".to_string(),
                },
            ),
            Violation::new(
                KeyPath::root(),
                ViolationKind::UnexpectedKey {
                    key: "extra".to_string(),
                },
            ),
        ]);
        assert_eq!(list.len(), 2);
        assert_eq!(list.to_string().lines().count(), 2);
    }
}
