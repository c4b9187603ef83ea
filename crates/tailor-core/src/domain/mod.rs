// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Tailor.
//!
//! This module contains pure customization logic with no I/O. Reading,
//! writing, walking and renaming are handled via ports (traits) defined in
//! the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Few external crates**: std library + thiserror, serde, chrono
//! - **Immutable values**: replacement maps, skip rules and plans are built
//!   once per run and never mutated while a pass runs
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod value_objects;

// Re-exports for convenience
pub use entities::{
    common::RelativePath,
    customization::{Customization, CustomizationBuilder, defaults, placeholders},
    layout::WorkspaceLayout,
    package::{DEFAULT_DESCRIPTION, Membership, PackageSpec, SkeletonFile, add_workspace_member},
    rename::{PackageListing, PackageRename, RenamePlan, RenameStep},
    replacement::{Replacement, ReplacementMap},
    report::{FileRecord, Outcome, RenameRecord, RunReport, Summary},
    skip::SkipRules,
};

pub use error::{DomainError, ErrorCategory};

pub use value_objects::{PackageName, RunMode};
