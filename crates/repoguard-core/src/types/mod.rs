//! Core types for whitelist resolution.

mod canonical_path;
mod repo_roots;

pub use canonical_path::CanonicalPath;
pub use repo_roots::RepoRoots;
