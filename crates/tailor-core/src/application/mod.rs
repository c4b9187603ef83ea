//! Application layer for Tailor.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (CustomizeService, PackageService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! customization rules itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    CustomizeService, CustomizeSettings, MembershipStatus, PackageReport, PackageService,
};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, NoopObserver, RunObserver};

pub use error::ApplicationError;
