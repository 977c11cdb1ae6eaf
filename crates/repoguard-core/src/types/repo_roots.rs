//! Configured repository root whitelist.

use std::path::Path;
use std::path::PathBuf;

use crate::EnvironmentError;
use crate::Result;

use super::CanonicalPath;

/// The immutable, ordered whitelist of repository roots.
///
/// Every root is canonicalized once at construction, so later containment
/// checks are pure component-wise prefix comparisons on canonical forms. An
/// empty `RepoRoots` means repository resolution is disabled: every candidate
/// is denied until roots are explicitly configured.
///
/// Built once at startup and never mutated, so concurrent readers need no
/// locking.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RepoRoots(Vec<CanonicalPath>);

impl RepoRoots {
    /// Builds the whitelist from administrator-supplied root strings.
    ///
    /// The configuration layer hands over already-split, already-trimmed
    /// strings; each is canonicalized here, so a root configured as
    /// `/test/repos/../other` is stored as `/test/other`.
    ///
    /// # Errors
    ///
    /// Returns [`EnvironmentError::RootCanonicalization`] if a root cannot be
    /// canonicalized.
    pub fn new<I, S>(roots: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut canonical = Vec::new();
        for root in roots {
            let path = Path::new(root.as_ref());
            let resolved =
                CanonicalPath::resolve(path).map_err(|source| {
                    EnvironmentError::RootCanonicalization {
                        path: PathBuf::from(root.as_ref()),
                        source,
                    }
                })?;
            canonical.push(resolved);
        }
        Ok(Self(canonical))
    }

    /// Returns `true` if no roots are configured.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of configured roots.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates the roots in configured priority order.
    pub fn iter(&self) -> impl Iterator<Item = &CanonicalPath> {
        self.0.iter()
    }
}
