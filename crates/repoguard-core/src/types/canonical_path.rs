//! Canonical absolute path type.

use std::io;
use std::path::Path;
use std::path::PathBuf;

use crate::canonical::soft_canonicalize;

/// An absolute path in canonical form.
///
/// `.` and `..` segments are resolved and symlinks are followed for every
/// component that exists on disk, so two `CanonicalPath`s naming the same
/// location compare equal and containment is a plain component-wise prefix
/// check.
///
/// # Security Properties
///
/// - Can ONLY be constructed through [`CanonicalPath::resolve`]
/// - NO `From<PathBuf>` implementation, so a raw untrusted string can never
///   reach a containment check without canonicalization
///
/// # Examples
///
/// ```no_run
/// use repoguard_core::CanonicalPath;
/// use std::path::Path;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let canonical = CanonicalPath::resolve(Path::new("/var/repos/../repos/repo1"))?;
/// assert!(canonical.as_path().is_absolute());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalPath(PathBuf);

impl CanonicalPath {
    /// Canonicalizes `path` and constructs a `CanonicalPath`.
    ///
    /// The path does not need to exist: the longest existing ancestor is
    /// resolved through the filesystem (following symlinks), the remainder
    /// is resolved lexically. This is the ONLY way to construct a
    /// `CanonicalPath`.
    ///
    /// # Errors
    ///
    /// Returns an error if the existing portion of the path cannot be
    /// canonicalized, e.g. on permission failures.
    pub fn resolve(path: &Path) -> io::Result<Self> {
        soft_canonicalize(path).map(Self)
    }

    /// Returns `true` if this path equals `root` or has `root` as an
    /// ancestor directory, compared segment by segment.
    ///
    /// `/test/repos-evil` is NOT contained in `/test/repos`.
    #[must_use]
    pub fn is_contained_in(&self, root: &Self) -> bool {
        self.0.starts_with(&root.0)
    }

    /// Returns the path as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Converts into the inner `PathBuf`.
    #[inline]
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for CanonicalPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_is_absolute_and_canonical() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let canonical = CanonicalPath::resolve(temp.path()).expect("should resolve");
        assert!(canonical.as_path().is_absolute());
        assert_eq!(canonical.as_path(), fs::canonicalize(temp.path()).unwrap());
    }

    #[test]
    fn test_equal_spellings_compare_equal() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let sub = temp.path().join("sub");
        fs::create_dir(&sub).expect("failed to create dir");

        let direct = CanonicalPath::resolve(&sub.join("repo")).expect("should resolve");
        let dotted = CanonicalPath::resolve(&sub.join("./missing/../repo")).expect("should resolve");
        assert_eq!(direct, dotted);
    }

    #[test]
    fn test_containment_is_segment_wise() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let root = CanonicalPath::resolve(&temp.path().join("repos")).expect("should resolve");
        let inside =
            CanonicalPath::resolve(&temp.path().join("repos/repo1")).expect("should resolve");
        let sibling =
            CanonicalPath::resolve(&temp.path().join("repos-evil/repo1")).expect("should resolve");

        assert!(inside.is_contained_in(&root));
        assert!(root.is_contained_in(&root));
        assert!(!sibling.is_contained_in(&root));
    }

    #[test]
    fn test_into_path_buf_round_trip() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let canonical = CanonicalPath::resolve(temp.path()).expect("should resolve");
        let path = canonical.clone().into_path_buf();
        assert_eq!(path, canonical.as_path());
    }
}
