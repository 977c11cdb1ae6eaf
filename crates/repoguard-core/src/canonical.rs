//! Soft path canonicalization.
//!
//! `std::fs::canonicalize` requires the whole path to exist, but repository
//! locations are routinely registered before the first snapshot creates them.
//! Soft canonicalization keeps the authoritative part — symlink resolution
//! for everything that does exist — and resolves the missing tail lexically.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

/// Canonicalizes `path` without requiring it to exist.
///
/// Steps:
/// 1. Make the path absolute (relative paths join the working directory).
/// 2. Resolve `.` and `..` lexically, so traversal is settled before any
///    filesystem access.
/// 3. Canonicalize the longest existing ancestor through `fs::canonicalize`,
///    resolving symlinks.
/// 4. Append the non-existing components unchanged.
///
/// # Errors
///
/// Returns an error if the working directory cannot be read (relative input)
/// or if canonicalizing the deepest on-disk ancestor fails — including when
/// that ancestor is a dangling symlink, which fails closed rather than being
/// resolved lexically. A fully non-existing path is not an error.
pub(crate) fn soft_canonicalize(path: &Path) -> io::Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut anchor = PathBuf::new();
    let mut parts: Vec<OsString> = Vec::new();
    for component in absolute.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => anchor.push(component),
            Component::CurDir => {}
            // `..` at the root has nowhere left to go; pop() is a no-op then
            Component::ParentDir => {
                parts.pop();
            }
            Component::Normal(name) => parts.push(name.to_os_string()),
        }
    }

    let mut logical = anchor;
    for part in &parts {
        logical.push(part);
    }

    // Walk up until something is present on disk, remembering what we
    // stripped. The probe must not follow symlinks: a dangling symlink is
    // still an on-disk entry that has to go through `fs::canonicalize`
    // below, never be appended lexically — treating it as missing would
    // hand back a path whose real target was never containment-checked.
    let mut existing = logical.as_path();
    let mut missing: Vec<OsString> = Vec::new();
    while existing.symlink_metadata().is_err() {
        if let Some(name) = existing.file_name() {
            missing.push(name.to_os_string());
        }
        match existing.parent() {
            Some(parent) => existing = parent,
            // Nothing on the way to the root exists; the lexical form is
            // the best canonical form available.
            None => return Ok(logical),
        }
    }

    let mut resolved = fs::canonicalize(existing)?;
    for name in missing.iter().rev() {
        resolved.push(name);
    }
    Ok(resolved)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_existing_path_matches_fs_canonicalize() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let result = soft_canonicalize(temp.path()).expect("should canonicalize");
        assert_eq!(result, fs::canonicalize(temp.path()).unwrap());
    }

    #[test]
    fn test_non_existing_tail_is_appended() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let candidate = temp.path().join("not/yet/created.txt");
        let result = soft_canonicalize(&candidate).expect("should canonicalize");
        assert_eq!(
            result,
            fs::canonicalize(temp.path())
                .unwrap()
                .join("not/yet/created.txt")
        );
    }

    #[test]
    fn test_parent_traversal_resolved_lexically() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let nested = temp.path().join("a/b");
        fs::create_dir_all(&nested).expect("failed to create dirs");

        let candidate = nested.join("missing/../../target.txt");
        let result = soft_canonicalize(&candidate).expect("should canonicalize");
        assert_eq!(
            result,
            fs::canonicalize(temp.path()).unwrap().join("a/target.txt")
        );
    }

    #[test]
    fn test_traversal_cannot_escape_root() {
        let candidate = Path::new("/..").join("..").join("file.txt");
        let result = soft_canonicalize(&candidate).expect("should canonicalize");
        assert_eq!(result, fs::canonicalize("/").unwrap().join("file.txt"));
    }

    #[test]
    fn test_relative_path_is_made_absolute() {
        let result = soft_canonicalize(Path::new("relative/file.txt")).expect("should resolve");
        assert!(result.is_absolute());
        assert!(result.ends_with("relative/file.txt"));
    }

    #[test]
    #[cfg(unix)]
    fn test_dangling_symlink_is_not_treated_as_missing() {
        use std::os::unix::fs::symlink;

        let temp = TempDir::new().expect("failed to create temp dir");
        let link = temp.path().join("link");
        symlink(temp.path().join("gone"), &link).expect("failed to create symlink");

        // The link is on disk even though its target is not; it must fail
        // canonicalization, not be appended as a plain missing component.
        assert!(soft_canonicalize(&link).is_err());
        assert!(soft_canonicalize(&link.join("nested.txt")).is_err());
    }

    #[test]
    #[cfg(unix)]
    fn test_symlink_in_existing_prefix_is_resolved() {
        use std::os::unix::fs::symlink;

        let temp = TempDir::new().expect("failed to create temp dir");
        let real = temp.path().join("real");
        fs::create_dir(&real).expect("failed to create dir");
        let link = temp.path().join("link");
        symlink(&real, &link).expect("failed to create symlink");

        let result = soft_canonicalize(&link.join("file.txt")).expect("should canonicalize");
        assert_eq!(result, fs::canonicalize(&real).unwrap().join("file.txt"));
    }
}
