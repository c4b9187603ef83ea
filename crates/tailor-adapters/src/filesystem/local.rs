//! Local filesystem adapter using std::fs and walkdir.

use std::io;
use std::path::{Path, PathBuf};

use tailor_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{TailorError, TailorResult},
};
use tracing::warn;
use walkdir::WalkDir;

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn walk_files(&self, root: &Path) -> TailorResult<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                // The root itself is unreadable: nothing to walk.
                Err(e) if e.depth() == 0 => {
                    return Err(map_walk_error(root, e));
                }
                Err(e) => {
                    warn!(
                        path = ?e.path(),
                        error = %e,
                        "Skipping unreadable entry"
                    );
                    continue;
                }
            };

            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }

    fn list_dirs(&self, path: &Path) -> TailorResult<Vec<PathBuf>> {
        let entries = std::fs::read_dir(path).map_err(|e| map_io_error(path, e, "list directory"))?;

        let mut dirs = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| map_io_error(path, e, "list directory"))?;
            let is_dir = entry
                .file_type()
                .map_err(|e| map_io_error(&entry.path(), e, "get file type"))?
                .is_dir();
            if is_dir {
                dirs.push(entry.path());
            }
        }
        dirs.sort();
        Ok(dirs)
    }

    fn read(&self, path: &Path) -> TailorResult<Vec<u8>> {
        std::fs::read(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write_file(&self, path: &Path, content: &str) -> TailorResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn create_dir_all(&self, path: &Path) -> TailorResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn rename(&self, from: &Path, to: &Path) -> TailorResult<()> {
        std::fs::rename(from, to).map_err(|e| map_io_error(from, e, "rename directory"))
    }

    fn remove_dir_all(&self, path: &Path) -> TailorResult<()> {
        std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }

    fn remove_file(&self, path: &Path) -> TailorResult<()> {
        std::fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> TailorError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

fn map_walk_error(root: &Path, e: walkdir::Error) -> TailorError {
    ApplicationError::FilesystemError {
        path: e.path().unwrap_or(root).to_path_buf(),
        reason: format!("Failed to walk directory: {}", e),
    }
    .into()
}
