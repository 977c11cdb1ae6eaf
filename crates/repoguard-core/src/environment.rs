//! Process environment: configured directories and the resolution surface.

use std::path::Path;
use std::path::PathBuf;

use url::Url;

use crate::EnvironmentError;
use crate::Result;
use crate::locator::EmbeddedSet;
use crate::locator::ResourceLocator;
use crate::locator::ResourceRef;
use crate::locator::SearchLocation;
use crate::resolver;
use crate::types::CanonicalPath;
use crate::types::RepoRoots;

/// The immutable resolution environment of the surrounding service.
///
/// Built once at startup from administrator-supplied configuration: a home
/// directory, an ordered list of data directories, and an ordered list of
/// repository root strings. All state is read-only after construction, so an
/// `Environment` can be shared freely across threads without locking.
///
/// The three operations collapse every internal failure to `None`. Which rule
/// denied a candidate is logged at `debug` level but never surfaces in the
/// returned value, so callers cannot be used to enumerate configured roots or
/// filesystem structure.
///
/// # Examples
///
/// ```no_run
/// use repoguard_core::Environment;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let env = Environment::builder()
///     .home("/var/lib/service")
///     .data_dir("/mnt/data0")
///     .repo_root("/mnt/backups")
///     .build()?;
///
/// if let Some(path) = env.resolve_repo_path("/mnt/backups/daily") {
///     println!("registering repository at {}", path.as_path().display());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Environment {
    home: PathBuf,
    config_dir: PathBuf,
    data_dirs: Vec<PathBuf>,
    repo_roots: RepoRoots,
    locator: ResourceLocator,
}

impl Environment {
    /// Creates a new [`EnvironmentBuilder`].
    #[must_use]
    pub fn builder() -> EnvironmentBuilder {
        EnvironmentBuilder::default()
    }

    /// Resolves a relative configuration resource name to a loadable
    /// location, or `None` when no search location has a match.
    ///
    /// Search order: embedded resource sets in registration order, then the
    /// config directory, then each data directory in configured order.
    ///
    /// Resource names are developer-controlled; no containment check is
    /// applied. Never pass runtime-supplied strings here — that is what
    /// [`resolve_repo_path`](Self::resolve_repo_path) is for.
    #[must_use]
    pub fn resolve_config_resource(&self, name: &str) -> Option<ResourceRef> {
        self.locator.locate(name)
    }

    /// Validates and canonicalizes a candidate repository path.
    ///
    /// Returns the canonical path only when it is equal to, or a descendant
    /// of, one of the configured repository roots. Everything else — no
    /// roots configured, escape via `..` or symlinks, canonicalization
    /// failure — is `None`.
    #[must_use]
    pub fn resolve_repo_path(&self, candidate: impl AsRef<Path>) -> Option<CanonicalPath> {
        let candidate = candidate.as_ref();
        match resolver::resolve_repo_path(&self.repo_roots, candidate) {
            Ok(path) => Some(path),
            Err(denial) => {
                if denial.is_containment_failure() {
                    tracing::debug!(
                        candidate = %candidate.display(),
                        %denial,
                        "repository path rejected by whitelist"
                    );
                } else {
                    tracing::debug!(
                        candidate = %candidate.display(),
                        %denial,
                        "repository path candidate unusable"
                    );
                }
                None
            }
        }
    }

    /// Validates and canonicalizes a candidate repository URL.
    ///
    /// Accepts a plain file reference or a single-level archive-nested file
    /// reference (`jar:file:...!/entry`). On success the returned URL has the
    /// canonical path substituted and any archive-internal suffix preserved.
    /// Every denial — wrong scheme, host-carrying file reference, escape —
    /// is `None`.
    #[must_use]
    pub fn resolve_repo_url(&self, candidate: &Url) -> Option<Url> {
        match resolver::resolve_repo_url(&self.repo_roots, candidate) {
            Ok(url) => Some(url),
            Err(denial) => {
                if denial.is_containment_failure() {
                    tracing::debug!(candidate = %candidate, %denial, "repository URL rejected by whitelist");
                } else {
                    tracing::debug!(candidate = %candidate, %denial, "repository URL candidate unusable");
                }
                None
            }
        }
    }

    /// The configured home directory.
    #[must_use]
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// The configuration directory, `home/config`.
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// The configured data directories, in priority order.
    #[must_use]
    pub fn data_dirs(&self) -> &[PathBuf] {
        &self.data_dirs
    }

    /// The configured repository root whitelist.
    #[must_use]
    pub fn repo_roots(&self) -> &RepoRoots {
        &self.repo_roots
    }
}

/// Builder for [`Environment`].
///
/// # Examples
///
/// ```no_run
/// use repoguard_core::Environment;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// static HELP: &[(&str, &[u8])] = &[("tool.help", b"usage: tool")];
///
/// let env = Environment::builder()
///     .home("/var/lib/service")
///     .data_dirs(["/mnt/data0", "/mnt/data1"])
///     .repo_roots(["/mnt/backups", "/mnt/archive"])
///     .embedded(HELP)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct EnvironmentBuilder {
    home: Option<PathBuf>,
    data_dirs: Vec<PathBuf>,
    repo_roots: Vec<String>,
    embedded: Vec<EmbeddedSet>,
}

impl EnvironmentBuilder {
    /// Sets the home directory. Required.
    #[must_use]
    pub fn home(mut self, path: impl Into<PathBuf>) -> Self {
        self.home = Some(path.into());
        self
    }

    /// Appends a data directory.
    #[must_use]
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_dirs.push(path.into());
        self
    }

    /// Appends data directories in the given order.
    #[must_use]
    pub fn data_dirs<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.data_dirs.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Appends an allowed repository root.
    #[must_use]
    pub fn repo_root(mut self, root: impl Into<String>) -> Self {
        self.repo_roots.push(root.into());
        self
    }

    /// Appends allowed repository roots in the given order.
    #[must_use]
    pub fn repo_roots<I, S>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.repo_roots.extend(roots.into_iter().map(Into::into));
        self
    }

    /// Registers a set of embedded resources, searched before any directory.
    #[must_use]
    pub fn embedded(mut self, set: EmbeddedSet) -> Self {
        self.embedded.push(set);
        self
    }

    /// Builds the [`Environment`].
    ///
    /// Canonicalizes every configured repository root up front so later
    /// containment checks never re-canonicalize roots.
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory was set or a repository root
    /// cannot be canonicalized.
    pub fn build(self) -> Result<Environment> {
        let home = self.home.ok_or(EnvironmentError::MissingHome)?;
        let config_dir = home.join("config");
        let repo_roots = RepoRoots::new(&self.repo_roots)?;

        let mut locations: Vec<SearchLocation> = self
            .embedded
            .into_iter()
            .map(SearchLocation::Embedded)
            .collect();
        locations.push(SearchLocation::Dir(config_dir.clone()));
        locations.extend(self.data_dirs.iter().cloned().map(SearchLocation::Dir));

        Ok(Environment {
            home,
            config_dir,
            data_dirs: self.data_dirs,
            repo_roots,
            locator: ResourceLocator::new(locations),
        })
    }
}
