//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use tailor_core::{
    application::{ApplicationError, ports::Filesystem},
    error::TailorResult,
};

/// In-memory filesystem for testing.
///
/// Paths are kept sorted, so walks come out in the same order as
/// [`LocalFilesystem`](super::LocalFilesystem) produces for the same tree.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, Vec<u8>>,
    directories: BTreeSet<PathBuf>,
    read_only: BTreeSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn add_parents(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Seed a file and its parent directories (testing helper).
    pub fn insert_file(&self, path: impl AsRef<Path>, content: impl AsRef<[u8]>) {
        let path = path.as_ref();
        if let Ok(mut inner) = self.inner.write() {
            if let Some(parent) = path.parent() {
                inner.add_parents(parent);
            }
            inner.files.insert(path.to_path_buf(), content.as_ref().to_vec());
        }
    }

    /// Make every write, rename or removal at `path` fail (testing helper).
    pub fn set_read_only(&self, path: impl AsRef<Path>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.read_only.insert(path.as_ref().to_path_buf());
        }
    }

    /// Read a file's content as text (testing helper).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<String> {
        let inner = self.inner.read().ok()?;
        let bytes = inner.files.get(path.as_ref())?;
        String::from_utf8(bytes.clone()).ok()
    }

    /// Read a file's raw bytes (testing helper).
    pub fn read_bytes(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path.as_ref()).cloned()
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Clear all contents.
    pub fn clear(&self) {
        if let Ok(mut inner) = self.inner.write() {
            inner.files.clear();
            inner.directories.clear();
            inner.read_only.clear();
        }
    }

    fn read_lock(&self) -> TailorResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        Ok(self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?)
    }

    fn write_lock(&self, path: &Path) -> TailorResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        let inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        if inner.read_only.iter().any(|p| path.starts_with(p)) {
            return Err(not_permitted(path, "Read-only path"));
        }
        Ok(inner)
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for MemoryFilesystem {
    fn walk_files(&self, root: &Path) -> TailorResult<Vec<PathBuf>> {
        let inner = self.read_lock()?;
        if !inner.directories.contains(root) {
            return Err(not_permitted(root, "Directory does not exist"));
        }

        Ok(inner
            .files
            .keys()
            .filter(|p| p.starts_with(root))
            .cloned()
            .collect())
    }

    fn list_dirs(&self, path: &Path) -> TailorResult<Vec<PathBuf>> {
        let inner = self.read_lock()?;
        if !inner.directories.contains(path) {
            return Err(not_permitted(path, "Directory does not exist"));
        }

        Ok(inner
            .directories
            .iter()
            .filter(|d| d.parent() == Some(path))
            .cloned()
            .collect())
    }

    fn read(&self, path: &Path) -> TailorResult<Vec<u8>> {
        let inner = self.read_lock()?;
        inner
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| not_permitted(path, "File does not exist"))
    }

    fn write_file(&self, path: &Path, content: &str) -> TailorResult<()> {
        let mut inner = self.write_lock(path)?;

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(not_permitted(path, "Parent directory does not exist"));
            }
        }

        inner
            .files
            .insert(path.to_path_buf(), content.as_bytes().to_vec());
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> TailorResult<()> {
        let mut inner = self.write_lock(path)?;
        inner.add_parents(path);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn rename(&self, from: &Path, to: &Path) -> TailorResult<()> {
        let mut inner = self.write_lock(from)?;
        if !inner.directories.contains(from) {
            return Err(not_permitted(from, "Directory does not exist"));
        }
        if inner.files.contains_key(to) || inner.directories.contains(to) {
            return Err(not_permitted(to, "Destination exists"));
        }

        let moved = |p: &Path| p.strip_prefix(from).ok().map(|rest| to.join(rest));

        let dirs: Vec<_> = inner
            .directories
            .iter()
            .filter_map(|d| moved(d).map(|n| (d.clone(), n)))
            .collect();
        for (old, new) in dirs {
            inner.directories.remove(&old);
            inner.directories.insert(new);
        }

        let files: Vec<_> = inner
            .files
            .keys()
            .filter_map(|f| moved(f).map(|n| (f.clone(), n)))
            .collect();
        for (old, new) in files {
            if let Some(content) = inner.files.remove(&old) {
                inner.files.insert(new, content);
            }
        }

        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> TailorResult<()> {
        let mut inner = self.write_lock(path)?;

        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));

        Ok(())
    }

    fn remove_file(&self, path: &Path) -> TailorResult<()> {
        let mut inner = self.write_lock(path)?;
        inner
            .files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| not_permitted(path, "File does not exist"))
    }
}

fn not_permitted(path: &Path, reason: &str) -> tailor_core::error::TailorError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
    .into()
}
