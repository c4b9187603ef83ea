use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::{Serialize, Serializer};

use crate::domain::DomainError;

/// A filesystem path guaranteed to stay inside the workspace root.
///
/// Invariant: never absolute, never contains `..`. Enforced at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Fallible constructor.
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        if path.is_absolute() || path.has_root() {
            return Err(DomainError::AbsolutePathNotAllowed {
                path: path.display().to_string(),
            });
        }
        if path.components().any(|c| matches!(c, Component::ParentDir)) {
            return Err(DomainError::PathEscapesRoot {
                path: path.display().to_string(),
            });
        }
        Ok(Self(path))
    }

    /// Join a segment, maintaining the relative invariant.
    pub fn join(&self, segment: impl AsRef<Path>) -> Result<Self, DomainError> {
        Self::try_new(self.0.join(segment))
    }

    /// Strip `root` from `path`, yielding the part below it.
    ///
    /// Returns `None` when `path` is not under `root`.
    pub fn strip(path: &Path, root: &Path) -> Option<Self> {
        path.strip_prefix(root)
            .ok()
            .and_then(|rel| Self::try_new(rel).ok())
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Resolve against a concrete root directory.
    pub fn under(&self, root: &Path) -> PathBuf {
        root.join(&self.0)
    }

    /// Path segments as strings (lossy for non-UTF-8 names).
    pub fn segments(&self) -> impl Iterator<Item = std::borrow::Cow<'_, str>> {
        self.0.components().filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl Serialize for RelativePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0.display())
    }
}
