//! Error types for environment construction and location resolution.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `EnvironmentError`.
pub type Result<T> = std::result::Result<T, EnvironmentError>;

/// Errors that can occur while constructing an [`Environment`].
///
/// Construction is the only public surface that reports errors. Resolution
/// operations collapse every failure to `None` (see [`Denial`]).
///
/// [`Environment`]: crate::Environment
#[derive(Error, Debug)]
pub enum EnvironmentError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The home directory was not provided to the builder.
    #[error("home directory is not set")]
    MissingHome,

    /// A configured repository root could not be canonicalized.
    #[error("failed to canonicalize repository root {path}: {source}")]
    RootCanonicalization {
        /// The root as configured.
        path: PathBuf,
        /// The underlying filesystem error.
        source: std::io::Error,
    },
}

/// Why a candidate location was denied.
///
/// This is a diagnostic taxonomy only. [`Environment`] logs the denial
/// locally and returns `None`, so callers can never distinguish which rule
/// triggered — a deliberate property: distinguishable failures would let an
/// attacker enumerate configured roots or probe filesystem structure.
///
/// [`Environment`]: crate::Environment
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Denial {
    /// No repository roots are configured; resolution always fails closed.
    #[error("no repository roots are configured")]
    NotConfigured,

    /// The candidate canonicalizes outside every configured root.
    #[error("path resolves outside every configured root: {path}")]
    NotContained {
        /// The candidate as supplied by the caller.
        path: PathBuf,
    },

    /// Wrong URL scheme, non-empty host on a file reference, or unparseable
    /// reference syntax.
    #[error("malformed reference: {reason}")]
    MalformedReference {
        /// What made the reference malformed.
        reason: String,
    },

    /// The underlying filesystem lookup failed during canonicalization.
    #[error("failed to canonicalize candidate path: {path}")]
    Canonicalization {
        /// The path that could not be canonicalized.
        path: PathBuf,
    },
}

impl Denial {
    /// Returns `true` if this denial came from the containment check itself
    /// rather than from input syntax or filesystem trouble.
    #[must_use]
    pub const fn is_containment_failure(&self) -> bool {
        matches!(self, Self::NotConfigured | Self::NotContained { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EnvironmentError::MissingHome;
        assert_eq!(err.to_string(), "home directory is not set");
    }

    #[test]
    fn test_root_canonicalization_display() {
        let err = EnvironmentError::RootCanonicalization {
            path: PathBuf::from("/no/such/root"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().contains("/no/such/root"));
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: EnvironmentError = io_err.into();
        assert!(matches!(err, EnvironmentError::Io(_)));
    }

    #[test]
    fn test_denial_display() {
        let denial = Denial::NotConfigured;
        assert_eq!(denial.to_string(), "no repository roots are configured");

        let denial = Denial::NotContained {
            path: PathBuf::from("/outside/root"),
        };
        assert!(denial.to_string().contains("/outside/root"));

        let denial = Denial::MalformedReference {
            reason: "unsupported scheme: http".to_string(),
        };
        assert!(denial.to_string().contains("unsupported scheme"));
    }

    #[test]
    fn test_is_containment_failure() {
        assert!(Denial::NotConfigured.is_containment_failure());
        assert!(
            Denial::NotContained {
                path: PathBuf::from("/x")
            }
            .is_containment_failure()
        );
        assert!(
            !Denial::MalformedReference {
                reason: "bad".to_string()
            }
            .is_containment_failure()
        );
        assert!(
            !Denial::Canonicalization {
                path: PathBuf::from("/x")
            }
            .is_containment_failure()
        );
    }
}
