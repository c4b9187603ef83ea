//! Tailor Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Tailor
//! template customization tool, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           tailor-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (CustomizeService, PackageService)     │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │      (Driven: Filesystem, Observer)     │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    tailor-adapters (Infrastructure)     │
//! │   (LocalFilesystem, MemoryFilesystem)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (ReplacementMap, SkipRules, RenamePlan) │
//! │         No I/O                          │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tailor_core::prelude::*;
//!
//! # fn run(filesystem: Box<dyn Filesystem>) -> TailorResult<()> {
//! let customization = Customization::builder()
//!     .project_name("widgets")
//!     .library("widgets-core")?
//!     .build();
//!
//! let service = CustomizeService::new(filesystem);
//! let report = service.customize(
//!     ".",
//!     &customization,
//!     &CustomizeSettings::default(),
//!     RunMode::Apply,
//!     &NoopObserver,
//! )?;
//! println!("{} files modified", report.summary().modified);
//! # Ok(())
//! # }
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CustomizeService, CustomizeSettings, PackageReport, PackageService,
        ports::{Filesystem, NoopObserver, RunObserver},
    };
    pub use crate::domain::{
        Customization, FileRecord, Outcome, PackageName, PackageSpec, RelativePath, RenamePlan,
        RenameRecord, RenameStep, Replacement, ReplacementMap, RunMode, RunReport, SkipRules,
        WorkspaceLayout,
    };
    pub use crate::error::{TailorError, TailorResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
