//! # Source Resolution
//!
//! Finds the codes file for an identifier across an ordered list of roots.
//!
//! ## Rules
//!
//! - Caller roots come first, the built-in root last.
//! - The built-in root is found at run time (see [`discover_builtin_root`]),
//!   so an installed binary does not depend on the build machine's paths.
//! - Each root has exactly one candidate:
//!   `<root>/<brand>/<category>/<brand>.<category>.<number>.yaml`.
//! - First existing candidate wins.
//! - A root that is missing or not a directory aborts the search with
//!   [`ResolveError::InvalidRoot`]; misconfiguration is never skipped.
//! - The requested domain is checked after full validation.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rcodes_core::{CommandParser, Identifier, ProtocolRegistry};
use rcodes_schema::CodesValidator;

use crate::document::NormalizedDocument;
use crate::error::ResolveError;
use crate::loader::{load_codes_file, CODES_EXTENSION};

/// Built-in codes in the source tree of this crate.
pub const BUILTIN_ROOT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/codes");

/// Environment variable naming the built-in codes directory.
pub const BUILTIN_ROOT_ENV: &str = "REMOTECODES_BUILTIN";

/// Directory name of the built-in codes when installed next to the binary.
pub const BUILTIN_DIR_NAME: &str = "codes";

/// Locate the built-in codes directory for this process.
///
/// Order:
/// 1. `$REMOTECODES_BUILTIN`, taken as given.
/// 2. `<exe dir>/codes`, then `<exe dir>/../share/remotecodes/codes`, if present.
/// 3. [`BUILTIN_ROOT`].
///
/// The result is not checked; a missing built-in root fails resolution with
/// [`ResolveError::InvalidRoot`] like any other root.
pub fn discover_builtin_root() -> PathBuf {
    let exe = std::env::current_exe().ok();
    builtin_root_from(std::env::var_os(BUILTIN_ROOT_ENV), exe.as_deref())
}

fn builtin_root_from(env: Option<OsString>, exe: Option<&Path>) -> PathBuf {
    if let Some(dir) = env.filter(|v| !v.is_empty()) {
        return absolutize(Path::new(&dir));
    }

    let mut installed = exe.and_then(Path::parent).into_iter().flat_map(|dir| {
        [
            dir.join(BUILTIN_DIR_NAME),
            dir.join("..")
                .join("share")
                .join("remotecodes")
                .join(BUILTIN_DIR_NAME),
        ]
    });

    installed
        .find(|candidate| candidate.is_dir())
        .unwrap_or_else(|| PathBuf::from(BUILTIN_ROOT))
}

/// Make `path` absolute against the current directory, without touching the filesystem.
fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Ordered search roots: caller roots, then the built-in root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPath {
    extra: Vec<PathBuf>,
    builtin: PathBuf,
}

impl SearchPath {
    /// Caller roots (made absolute) followed by the discovered built-in root.
    pub fn new<I, P>(extra_roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let builtin = discover_builtin_root();
        tracing::debug!(builtin = %builtin.display(), "built-in codes root");
        Self {
            extra: extra_roots
                .into_iter()
                .map(|p| absolutize(p.as_ref()))
                .collect(),
            builtin,
        }
    }

    /// Replace the built-in root.
    pub fn with_builtin(mut self, builtin: impl AsRef<Path>) -> Self {
        self.builtin = absolutize(builtin.as_ref());
        self
    }

    /// All roots in search order.
    pub fn roots(&self) -> impl Iterator<Item = &Path> {
        self.extra
            .iter()
            .chain(std::iter::once(&self.builtin))
            .map(PathBuf::as_path)
    }

    /// The built-in root.
    pub fn builtin(&self) -> &Path {
        &self.builtin
    }
}

impl Default for SearchPath {
    fn default() -> Self {
        Self::new(std::iter::empty::<PathBuf>())
    }
}

/// Resolves identifiers to validated documents.
#[derive(Debug, Clone)]
pub struct SourceResolver {
    search_path: SearchPath,
    validator: CodesValidator,
}

impl SourceResolver {
    /// Resolver over `search_path` using `parser` for command tokens.
    pub fn new(search_path: SearchPath, parser: Arc<dyn CommandParser>) -> Self {
        Self {
            search_path,
            validator: CodesValidator::new(parser),
        }
    }

    /// Resolver with the permissive default [`ProtocolRegistry`].
    pub fn with_default_parser(search_path: SearchPath) -> Self {
        Self::new(search_path, Arc::new(ProtocolRegistry::new()))
    }

    /// The configured search path.
    pub fn search_path(&self) -> &SearchPath {
        &self.search_path
    }

    /// The document validator.
    pub fn validator(&self) -> &CodesValidator {
        &self.validator
    }

    /// Find the file for an identifier without loading it.
    ///
    /// # Errors
    ///
    /// [`ResolveError::InvalidRoot`] on the first bad root,
    /// [`ResolveError::NotFound`] if no root has a candidate.
    pub fn locate(&self, identifier: &Identifier) -> Result<PathBuf, ResolveError> {
        let mut searched = Vec::new();
        for root in self.search_path.roots() {
            if !root.is_dir() {
                return Err(ResolveError::InvalidRoot {
                    root: root.to_path_buf(),
                });
            }

            let candidate = root
                .join(identifier.brand().as_str())
                .join(identifier.category().as_str())
                .join(identifier.file_name(CODES_EXTENSION));

            tracing::debug!(root = %root.display(), candidate = %candidate.display(), "searching root");

            if candidate.is_file() {
                return Ok(candidate);
            }
            searched.push(root.to_path_buf());
        }

        Err(ResolveError::NotFound {
            identifier: identifier.to_string(),
            searched,
        })
    }

    /// Resolve, load and validate the document for `identifier`.
    ///
    /// # Errors
    ///
    /// Any [`ResolveError`]; a located file that fails validation is
    /// [`ResolveError::Codes`] carrying every violation.
    pub fn resolve(
        &self,
        identifier: &str,
        domain: Option<&str>,
    ) -> Result<NormalizedDocument, ResolveError> {
        let identifier = Identifier::parse(identifier)?;
        let path = self.locate(&identifier)?;
        let document = load_codes_file(&path, &self.validator)?;

        if let Some(domain) = domain {
            if !document.has_section(domain) {
                return Err(ResolveError::DomainNotPresent {
                    domain: domain.to_string(),
                    path,
                });
            }
        }

        tracing::debug!(%identifier, path = %path.display(), "resolved codes file");
        Ok(document)
    }
}

/// One-shot lookup: `extra_roots` before the built-in root, default command parser.
pub fn get_codes<I, P>(
    identifier: &str,
    domain: Option<&str>,
    extra_roots: I,
) -> Result<NormalizedDocument, ResolveError>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    SourceResolver::with_default_parser(SearchPath::new(extra_roots)).resolve(identifier, domain)
}
