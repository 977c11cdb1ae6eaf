//! Whitelist resolvers for repository paths and URLs.

mod path;
mod url;

pub use path::resolve_repo_path;
pub use url::resolve_repo_url;
