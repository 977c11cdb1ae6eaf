//! Whitelist-based resolution of repository locations.
//!
//! `repoguard-core` resolves two classes of untrusted, administrator- or
//! request-supplied location strings — configuration resource names and
//! repository/snapshot locations — into concrete filesystem or archive
//! locations, while preventing callers from escaping an explicitly
//! configured whitelist of allowed roots.
//!
//! This is a security boundary, not a convenience wrapper: a candidate path
//! or URL is fully canonicalized (`.`/`..` segments, symlinks, URL scheme
//! and host validation, archive-nested references) before any containment
//! decision, and every denial collapses to a single not-found outcome so the
//! resolver cannot be used to probe filesystem structure.
//!
//! # Examples
//!
//! ```no_run
//! use repoguard_core::Environment;
//! use url::Url;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let env = Environment::builder()
//!     .home("/var/lib/service")
//!     .repo_roots(["/mnt/backups"])
//!     .build()?;
//!
//! // Plain paths and file/archive URLs go through the same whitelist.
//! let path = env.resolve_repo_path("/mnt/backups/daily");
//! let url = env.resolve_repo_url(&Url::parse("jar:file:///mnt/backups/daily.zip!/meta/")?);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod canonical;

pub mod environment;
pub mod error;
pub mod locator;
pub mod resolver;
pub mod types;

// Re-export main API types
pub use environment::Environment;
pub use environment::EnvironmentBuilder;
pub use error::Denial;
pub use error::EnvironmentError;
pub use error::Result;
pub use locator::EmbeddedSet;
pub use locator::ResourceLocator;
pub use locator::ResourceRef;
pub use locator::SearchLocation;

// Re-export types module for easier access
pub use types::CanonicalPath;
pub use types::RepoRoots;
