//! Whitelist containment check for caller-supplied paths.

use std::path::Path;

use crate::error::Denial;
use crate::types::CanonicalPath;
use crate::types::RepoRoots;

/// Resolves a candidate path against the configured repository roots.
///
/// An absolute candidate is canonicalized once and tested against every root
/// in priority order. A relative candidate is resolved against each root in
/// turn, so resolution never depends on the process working directory.
///
/// Containment is evaluated on the final canonical form only: a candidate
/// containing `..` that cancels back inside an allowed root is accepted, and
/// a candidate that escapes one root but lands in another allowed root is
/// accepted too.
///
/// # Errors
///
/// Returns a [`Denial`] naming the rule that rejected the candidate. Callers
/// exposing results to untrusted parties must collapse every denial to a
/// single not-found outcome, as [`Environment`] does.
///
/// [`Environment`]: crate::Environment
pub fn resolve_repo_path(
    roots: &RepoRoots,
    candidate: &Path,
) -> std::result::Result<CanonicalPath, Denial> {
    if roots.is_empty() {
        return Err(Denial::NotConfigured);
    }

    if candidate.is_absolute() {
        let canonical =
            CanonicalPath::resolve(candidate).map_err(|_| Denial::Canonicalization {
                path: candidate.to_path_buf(),
            })?;
        for root in roots.iter() {
            if canonical.is_contained_in(root) {
                return Ok(canonical);
            }
        }
        return Err(Denial::NotContained {
            path: candidate.to_path_buf(),
        });
    }

    for root in roots.iter() {
        let joined = root.as_path().join(candidate);
        match CanonicalPath::resolve(&joined) {
            Ok(canonical) if canonical.is_contained_in(root) => return Ok(canonical),
            Ok(_) => {}
            Err(error) => {
                tracing::trace!(
                    root = %root.as_path().display(),
                    %error,
                    "skipping root, canonicalization failed"
                );
            }
        }
    }
    Err(Denial::NotContained {
        path: candidate.to_path_buf(),
    })
}
