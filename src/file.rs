//! Source-path resolution and raw text loading.
//!
//! Relative source paths are searched **upward** from a base directory: at
//! each ancestor level the candidate `{dir}/{source}` is checked, and the
//! first existing regular file wins. This is how a tool run from deep inside a
//! project tree finds `etc/connfig.ini` at the project root. The walk is an
//! explicit loop with a single termination condition (filesystem root
//! reached), so the failure behavior is auditable:
//!
//! - candidate exists but is not a regular file → keep walking;
//! - candidate exists but is unreadable → [`ConnfigError::PermissionDenied`],
//!   the walk stops;
//! - root reached with no match → [`ConnfigError::FileNotFound`].
//!
//! Absolute paths skip the walk and are checked directly, with the same
//! not-found vs permission-denied distinction.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ConnfigError;

/// Resolve a source path to a concrete, readable config file.
///
/// `base_dir` anchors the ancestor walk for relative paths; it is ignored for
/// absolute ones.
pub fn resolve_source_path(source: &Path, base_dir: &Path) -> Result<PathBuf, ConnfigError> {
    if source.is_absolute() {
        check_readable(source)?;
        return Ok(source.to_path_buf());
    }

    let mut dir = base_dir;
    loop {
        let candidate = dir.join(source);
        if candidate.is_file() {
            check_readable(&candidate)?;
            debug!(path = %candidate.display(), "resolved config source");
            return Ok(candidate);
        }

        match dir.parent() {
            Some(parent) => dir = parent,
            None => {
                // Reached the filesystem root without a match.
                return Err(ConnfigError::FileNotFound {
                    path: source.to_path_buf(),
                });
            }
        }
    }
}

/// Distinguish missing from unreadable without reading the whole file.
fn check_readable(path: &Path) -> Result<(), ConnfigError> {
    match fs::File::open(path) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(ConnfigError::FileNotFound {
            path: path.to_path_buf(),
        }),
        Err(e) if e.kind() == ErrorKind::PermissionDenied => Err(ConnfigError::PermissionDenied {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(ConnfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Read the resolved source file to a string.
pub fn read_source(path: &Path) -> Result<String, ConnfigError> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ConnfigError::FileNotFound {
            path: path.to_path_buf(),
        },
        ErrorKind::PermissionDenied => ConnfigError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => ConnfigError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn absolute_path_found() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("app.ini");
        fs::write(&file, "[s]\ndriver=sqlite\npath=/db\n").unwrap();

        let resolved = resolve_source_path(&file, Path::new("/ignored")).unwrap();
        assert_eq!(resolved, file);
    }

    #[test]
    fn absolute_path_missing_is_file_not_found() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.ini");
        let err = resolve_source_path(&missing, Path::new("/")).unwrap_err();
        assert!(matches!(err, ConnfigError::FileNotFound { .. }));
    }

    #[test]
    fn relative_path_found_in_base_dir() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("etc")).unwrap();
        let file = dir.path().join("etc").join("app.ini");
        fs::write(&file, "").unwrap();

        let resolved = resolve_source_path(Path::new("etc/app.ini"), dir.path()).unwrap();
        assert_eq!(resolved, file);
    }

    #[test]
    fn relative_path_found_in_ancestor() {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("etc")).unwrap();
        let file = root.path().join("etc").join("app.ini");
        fs::write(&file, "").unwrap();

        let deep = root.path().join("a").join("b").join("c");
        fs::create_dir_all(&deep).unwrap();

        let resolved = resolve_source_path(Path::new("etc/app.ini"), &deep).unwrap();
        assert_eq!(resolved, file);
    }

    #[test]
    fn nearest_ancestor_wins() {
        let root = TempDir::new().unwrap();
        let mid = root.path().join("mid");
        let deep = mid.join("deep");
        fs::create_dir_all(&deep).unwrap();

        fs::write(root.path().join("app.ini"), "outer").unwrap();
        fs::write(mid.join("app.ini"), "inner").unwrap();

        let resolved = resolve_source_path(Path::new("app.ini"), &deep).unwrap();
        assert_eq!(resolved, mid.join("app.ini"));
    }

    #[test]
    fn relative_path_exhausts_ancestors() {
        let dir = TempDir::new().unwrap();
        let err = resolve_source_path(Path::new("no/such/file.ini"), dir.path()).unwrap_err();
        match err {
            ConnfigError::FileNotFound { path } => {
                assert_eq!(path, Path::new("no/such/file.ini"));
            }
            other => panic!("Expected FileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn directory_with_source_name_is_skipped() {
        let root = TempDir::new().unwrap();
        let deep = root.path().join("work");
        fs::create_dir_all(&deep).unwrap();
        // A *directory* named app.ini at the deep level must not match...
        fs::create_dir(deep.join("app.ini")).unwrap();
        // ...the regular file one level up should.
        fs::write(root.path().join("app.ini"), "real").unwrap();

        let resolved = resolve_source_path(Path::new("app.ini"), &deep).unwrap();
        assert_eq!(resolved, root.path().join("app.ini"));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_file_is_permission_denied() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let file = dir.path().join("app.ini");
        fs::write(&file, "[s]\n").unwrap();
        fs::set_permissions(&file, fs::Permissions::from_mode(0o000)).unwrap();

        if fs::File::open(&file).is_ok() {
            // Permission bits are not enforced for this user (root); nothing
            // to assert.
            return;
        }

        let err = resolve_source_path(Path::new("app.ini"), dir.path()).unwrap_err();
        assert!(matches!(err, ConnfigError::PermissionDenied { .. }));

        fs::set_permissions(&file, fs::Permissions::from_mode(0o644)).unwrap();
    }

    #[test]
    fn read_source_returns_contents() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("app.json");
        fs::write(&file, "{}").unwrap();
        assert_eq!(read_source(&file).unwrap(), "{}");
    }
}
