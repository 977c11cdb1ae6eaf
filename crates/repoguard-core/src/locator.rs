//! First-match lookup of configuration resources.

use std::path::PathBuf;

/// A set of resources compiled into the binary, keyed by relative name.
///
/// Typically built from `include_bytes!` data by the consuming service.
pub type EmbeddedSet = &'static [(&'static str, &'static [u8])];

/// A single base location searched by [`ResourceLocator`].
#[derive(Debug, Clone)]
pub enum SearchLocation {
    /// Resources embedded in the binary.
    Embedded(EmbeddedSet),
    /// A directory on the local filesystem.
    Dir(PathBuf),
}

/// A resolved configuration resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceRef {
    /// Bytes embedded in the binary.
    Embedded {
        /// The relative name the resource was registered under.
        name: &'static str,
        /// The resource contents.
        bytes: &'static [u8],
    },
    /// A file on the local filesystem.
    File(PathBuf),
}

/// Resolves relative resource names across an ordered list of search
/// locations. First match wins.
///
/// This is for trusted, compiled-in resource names only: no canonicalization
/// or whitelist check is performed, in contrast to the repository resolvers
/// whose inputs are attacker/administrator controlled at runtime.
#[derive(Debug, Clone)]
pub struct ResourceLocator {
    locations: Vec<SearchLocation>,
}

impl ResourceLocator {
    /// Creates a locator over `locations`, searched in the given order.
    #[must_use]
    pub fn new(locations: Vec<SearchLocation>) -> Self {
        Self { locations }
    }

    /// Returns the first location containing a resource named `name`, or
    /// `None` when no search location has a match.
    #[must_use]
    pub fn locate(&self, name: &str) -> Option<ResourceRef> {
        for location in &self.locations {
            match location {
                SearchLocation::Embedded(set) => {
                    if let Some(&(found, bytes)) = set.iter().find(|(n, _)| *n == name) {
                        return Some(ResourceRef::Embedded { name: found, bytes });
                    }
                }
                SearchLocation::Dir(dir) => {
                    let path = dir.join(name);
                    if path.is_file() {
                        return Some(ResourceRef::File(path));
                    }
                }
            }
        }
        None
    }
}
