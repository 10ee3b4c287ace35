//! Filename resolution confined to a single store root directory.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Errors related to resolving a caller-supplied filename.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// The filename was empty.
    #[error("filename is empty")]
    Empty,

    /// The filename would reach outside the store root, or names something
    /// other than a single entry directly inside it.
    #[error("filename '{name}' {reason}")]
    Escapes { name: String, reason: &'static str },
}

/// The store root could not be created or is not usable.
#[derive(Debug, thiserror::Error)]
#[error("store root {} is unusable: {error}", .path.display())]
pub struct StoreRootError {
    pub path: PathBuf,
    #[source]
    pub error: io::Error,
}

/// The single directory every file operation is confined to.
///
/// The root is canonicalized on open, so every path handed out by
/// [`StoreRoot::resolve`] is absolute and has the root as its direct parent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreRoot {
    root: PathBuf,
}

impl StoreRoot {
    /// Open the store root, creating the directory (and any parents) if it
    /// does not exist yet.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreRootError> {
        let dir = dir.into();
        let invalid = |error: io::Error| StoreRootError {
            path: dir.clone(),
            error,
        };

        fs::create_dir_all(&dir).map_err(invalid)?;
        let attr = fs::metadata(&dir).map_err(invalid)?;

        if !attr.is_dir() {
            return Err(invalid(io::Error::other("Root path must be a directory.")));
        }

        if attr.permissions().readonly() {
            return Err(invalid(io::Error::other("Root directory must be writable")));
        }

        let root = dir.canonicalize().map_err(invalid)?;
        tracing::debug!(root = %root.display(), "store root ready");
        Ok(Self { root })
    }

    /// Absolute path of the root directory.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Join `name` onto the root.
    ///
    /// `name` must be a single, plain path segment: no separators, no `.` or
    /// `..`, no absolute paths, no NUL bytes.
    ///
    /// ```rust
    /// use dirstore_core::{PathError, StoreRoot};
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// let root = StoreRoot::open(dir.path()).unwrap();
    ///
    /// assert_eq!(root.resolve("notes.txt").unwrap(), root.path().join("notes.txt"));
    /// assert!(matches!(root.resolve("../secret"), Err(PathError::Escapes { .. })));
    /// assert_eq!(root.resolve(""), Err(PathError::Empty));
    /// ```
    pub fn resolve(&self, name: &str) -> Result<PathBuf, PathError> {
        if name.is_empty() {
            return Err(PathError::Empty);
        }

        let escapes = |reason: &'static str| PathError::Escapes {
            name: name.to_string(),
            reason,
        };

        for component in Path::new(name).components() {
            match component {
                Component::ParentDir => return Err(escapes("refers to a parent directory")),
                Component::RootDir | Component::Prefix(_) => {
                    return Err(escapes("is an absolute path"))
                }
                Component::CurDir => return Err(escapes("refers to the store root itself")),
                Component::Normal(_) => {}
            }
        }

        // Trailing and doubled separators are normalized away by
        // `components`, so check the raw string as well.
        if name.contains(['/', '\\']) {
            return Err(escapes("contains a directory separator"));
        }

        if name.contains('\0') {
            return Err(escapes("contains a NUL byte"));
        }

        let resolved = self.root.join(name);
        if resolved.parent() != Some(self.root.as_path()) {
            return Err(escapes("does not name an entry of the store root"));
        }

        Ok(resolved)
    }
}
