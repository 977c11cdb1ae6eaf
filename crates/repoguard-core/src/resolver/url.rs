//! Whitelist containment check for URL-shaped candidates.

use url::Url;

use crate::error::Denial;
use crate::types::RepoRoots;

use super::resolve_repo_path;

/// Separator between an archive location and the entry path inside it.
const ARCHIVE_SEPARATOR: &str = "!/";

/// The two URL shapes accepted for repository locations.
///
/// Archive nesting is exactly one level deep: an archive of a plain file
/// reference. Deeper nesting does not classify.
#[derive(Debug, Clone)]
enum RepoUrl {
    /// A plain file reference, e.g. `file:///var/repos/repo1`.
    Direct(Url),
    /// An archive entry reference, e.g. `jar:file:///var/repos/repo1!/entry/`.
    ArchiveOf {
        /// The file reference naming the archive itself.
        inner: Url,
        /// The archive-internal part, starting at `!/`, reattached verbatim.
        suffix: String,
    },
}

/// Resolves a candidate URL against the configured repository roots.
///
/// Accepts a plain file reference or a `jar:`-wrapped file reference,
/// extracts the embedded filesystem path, delegates containment to
/// [`resolve_repo_path`], and on success reconstructs a URL of the original
/// outer shape with the canonical path substituted. Any archive-internal
/// suffix is preserved unchanged.
///
/// # Errors
///
/// Returns a [`Denial`] naming the rule that rejected the candidate:
/// unsupported schemes (anything but `file`/`jar`), file references carrying
/// a host, missing archive separators, and containment failures from the
/// delegated path check.
pub fn resolve_repo_url(roots: &RepoRoots, candidate: &Url) -> Result<Url, Denial> {
    match classify(candidate)? {
        RepoUrl::Direct(url) => resolve_file_url(roots, &url),
        RepoUrl::ArchiveOf { inner, suffix } => {
            let resolved = resolve_file_url(roots, &inner)?;
            let rebuilt = format!("jar:{resolved}{suffix}");
            Url::parse(&rebuilt).map_err(|error| Denial::MalformedReference {
                reason: format!("rebuilt archive URL did not parse: {error}"),
            })
        }
    }
}

fn classify(url: &Url) -> Result<RepoUrl, Denial> {
    match url.scheme() {
        "file" => Ok(RepoUrl::Direct(url.clone())),
        "jar" => {
            // The inner URL and archive suffix live in the opaque
            // scheme-specific part; the parser may have split a `?` off it.
            let mut raw = url.path().to_string();
            if let Some(query) = url.query() {
                raw.push('?');
                raw.push_str(query);
            }
            let Some(pos) = raw.find(ARCHIVE_SEPARATOR) else {
                return Err(Denial::MalformedReference {
                    reason: "archive URL has no `!/` separator".to_string(),
                });
            };
            let (inner_raw, suffix) = raw.split_at(pos);
            let inner = Url::parse(inner_raw).map_err(|error| Denial::MalformedReference {
                reason: format!("inner archive URL did not parse: {error}"),
            })?;
            if inner.scheme() != "file" {
                return Err(Denial::MalformedReference {
                    reason: format!("archive of unsupported scheme: {}", inner.scheme()),
                });
            }
            Ok(RepoUrl::ArchiveOf {
                inner,
                suffix: suffix.to_string(),
            })
        }
        other => Err(Denial::MalformedReference {
            reason: format!("unsupported scheme: {other}"),
        }),
    }
}

/// Resolves a host-less file URL through the path whitelist and rebuilds it
/// around the canonical path.
fn resolve_file_url(roots: &RepoRoots, url: &Url) -> Result<Url, Denial> {
    // A file reference must be purely local. A non-empty host is evidence
    // of a malformed or spoofed reference, never equivalent to a local
    // absolute path. A spelled `localhost` authority never reaches this
    // check: the WHATWG parser folds it into the host-less form on file
    // URLs, so `file://localhost/p` arrives here as `file:///p`.
    if let Some(host) = url.host_str() {
        if !host.is_empty() {
            return Err(Denial::MalformedReference {
                reason: format!("file URL carries a host: {host}"),
            });
        }
    }

    let path = url.to_file_path().map_err(|()| Denial::MalformedReference {
        reason: "file URL has no usable local path".to_string(),
    })?;
    let canonical = resolve_repo_path(roots, &path)?;
    Url::from_file_path(canonical.as_path()).map_err(|()| Denial::MalformedReference {
        reason: "canonical path did not convert back to a file URL".to_string(),
    })
}
