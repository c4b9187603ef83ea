//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `tailor-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::{FileRecord, RenameRecord};
use crate::error::TailorResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `tailor_adapters::filesystem::LocalFilesystem` (production)
/// - `tailor_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - Paths passed in are already joined onto the run root
/// - Every call is a single, independently failable operation; there is no
///   transaction spanning calls
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Every regular file below `root`, depth-first, siblings sorted by name.
    /// Symbolic links are not followed.
    fn walk_files(&self, root: &Path) -> TailorResult<Vec<PathBuf>>;

    /// Immediate sub-directories of `path`, sorted by name.
    fn list_dirs(&self, path: &Path) -> TailorResult<Vec<PathBuf>>;

    /// Raw file content.
    fn read(&self, path: &Path) -> TailorResult<Vec<u8>>;

    /// Write content to a file, replacing it.
    fn write_file(&self, path: &Path, content: &str) -> TailorResult<()>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> TailorResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Move a directory.
    fn rename(&self, from: &Path, to: &Path) -> TailorResult<()>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> TailorResult<()>;

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> TailorResult<()>;
}

/// Port receiving each outcome as soon as it is produced.
///
/// The CLI implements this to stream its transcript; services also return
/// the full record lists, so observing is optional.
pub trait RunObserver {
    fn on_file(&self, _record: &FileRecord) {}

    fn on_rename(&self, _record: &RenameRecord) {}

    fn on_cleanup(&self, _record: &FileRecord) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RunObserver for NoopObserver {}
