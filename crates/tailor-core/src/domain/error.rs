// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (carried inside run reports and retries)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid package name '{name}': {reason}")]
    InvalidPackageName { name: String, reason: String },

    #[error("Replacement tokens cannot be empty")]
    EmptyToken,

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Path escapes the workspace root: {path}")]
    PathEscapesRoot { path: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidPackageName { name, reason } => vec![
                format!("Package name '{}' is invalid: {}", name, reason),
                "Use ASCII letters, digits, hyphens, and underscores".into(),
                "Start with a letter or digit".into(),
                "Examples: my-library, widgets_core, reports".into(),
            ],
            Self::EmptyToken => vec![
                "Every replacement needs a non-empty token to search for".into(),
            ],
            Self::AbsolutePathNotAllowed { path } | Self::PathEscapesRoot { path } => vec![
                format!("'{}' must be relative to the workspace root", path),
                "Remove leading '/' and any '..' segments".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidPackageName { .. }
            | Self::EmptyToken
            | Self::AbsolutePathNotAllowed { .. }
            | Self::PathEscapesRoot { .. } => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
