//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The run root is missing or not a directory.
    #[error("Not a directory: {path}")]
    InvalidRoot { path: PathBuf },

    /// Package directory already exists.
    #[error("Package already exists at {path}")]
    PackageExists { path: PathBuf },

    /// Root workspace manifest not found.
    #[error("Workspace manifest not found at {path}")]
    ManifestMissing { path: PathBuf },

    /// In-memory state lock poisoned.
    #[error("Filesystem state lock poisoned")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::InvalidRoot { path } => vec![
                format!("'{}' is not a directory", path.display()),
                "Run from the root of the template checkout, or pass --root".into(),
            ],
            Self::PackageExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Use --force to overwrite the skeleton files".into(),
                "Choose a different package name".into(),
            ],
            Self::ManifestMissing { path } => vec![
                format!("Expected a workspace manifest at {}", path.display()),
                "Run from the workspace root, or pass --root".into(),
                "Check `layout.manifest` in your configuration".into(),
            ],
            Self::StoreLockError => vec!["Try again in a moment".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } | Self::StoreLockError => ErrorCategory::Internal,
            Self::InvalidRoot { .. } | Self::ManifestMissing { .. } => ErrorCategory::NotFound,
            Self::PackageExists { .. } => ErrorCategory::Validation,
        }
    }
}
