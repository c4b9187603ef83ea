//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "customize the template" or "add a package".

pub mod customize_service;
pub mod package_service;

pub use customize_service::{CustomizeService, CustomizeSettings, DEFAULT_CLEANUP_FILES};
pub use package_service::{MembershipStatus, PackageReport, PackageService};
