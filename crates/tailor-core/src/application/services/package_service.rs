//! Package Service - adds a new package to the workspace.
//!
//! 1. Check the root manifest and the target directory
//! 2. Write the package skeleton
//! 3. Register the package in the root manifest

use std::path::Path;

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{Membership, PackageSpec, RelativePath, WorkspaceLayout, add_workspace_member},
    error::TailorResult,
};

/// What happened to the root manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MembershipStatus {
    Added,
    AlreadyPresent,
    /// The manifest has no `workspace = [ ... ]` list; left untouched.
    SectionMissing,
}

/// Result of creating a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageReport {
    pub package_dir: RelativePath,
    pub files: Vec<RelativePath>,
    pub membership: MembershipStatus,
}

/// Package generator.
pub struct PackageService {
    filesystem: Box<dyn Filesystem>,
}

impl PackageService {
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Create `spec` under `root` and register it in the root manifest.
    ///
    /// An existing package directory is an error unless `overwrite` is set,
    /// in which case the skeleton files are written over it. Registration is
    /// skipped when the exact entry is already present.
    #[instrument(
        skip_all,
        fields(package = %spec.name, root = %root.as_ref().display(), overwrite)
    )]
    pub fn create_package(
        &self,
        root: impl AsRef<Path>,
        spec: &PackageSpec,
        layout: &WorkspaceLayout,
        overwrite: bool,
    ) -> TailorResult<PackageReport> {
        let root = root.as_ref();
        if !self.filesystem.is_dir(root) {
            return Err(ApplicationError::InvalidRoot {
                path: root.to_path_buf(),
            }
            .into());
        }

        let manifest = root.join(&layout.manifest);
        if !self.filesystem.exists(&manifest) {
            return Err(ApplicationError::ManifestMissing { path: manifest }.into());
        }

        let package_dir = spec.package_dir(layout)?;
        let package_path = package_dir.under(root);
        let fresh = !self.filesystem.exists(&package_path);
        if !fresh && !overwrite {
            return Err(ApplicationError::PackageExists { path: package_path }.into());
        }

        let skeleton = spec.skeleton(layout)?;
        if let Err(e) = self.write_skeleton(root, &skeleton) {
            if fresh {
                warn!("Write failed, attempting rollback");
                self.rollback(&package_path);
            }
            return Err(e);
        }

        let membership = self.register(&manifest, &spec.membership_entry(layout))?;

        info!(files = skeleton.len(), ?membership, "Package created");
        Ok(PackageReport {
            package_dir,
            files: skeleton.into_iter().map(|f| f.path).collect(),
            membership,
        })
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn write_skeleton(
        &self,
        root: &Path,
        skeleton: &[crate::domain::SkeletonFile],
    ) -> TailorResult<()> {
        for file in skeleton {
            let path = file.path.under(root);
            if let Some(parent) = path.parent() {
                self.filesystem.create_dir_all(parent)?;
            }
            self.filesystem.write_file(&path, &file.content)?;
        }
        Ok(())
    }

    fn register(&self, manifest: &Path, entry: &str) -> TailorResult<MembershipStatus> {
        let bytes = self.filesystem.read(manifest)?;
        let content = String::from_utf8(bytes).map_err(|e| ApplicationError::FilesystemError {
            path: manifest.to_path_buf(),
            reason: e.to_string(),
        })?;

        match add_workspace_member(&content, entry) {
            Membership::Added(updated) => {
                self.filesystem.write_file(manifest, &updated)?;
                Ok(MembershipStatus::Added)
            }
            Membership::AlreadyPresent => Ok(MembershipStatus::AlreadyPresent),
            Membership::SectionMissing => {
                warn!(
                    manifest = %manifest.display(),
                    "No `workspace = [` list found; package not registered"
                );
                Ok(MembershipStatus::SectionMissing)
            }
        }
    }

    /// Best-effort removal of a half-written package.
    fn rollback(&self, package_path: &Path) {
        if let Err(e) = self.filesystem.remove_dir_all(package_path) {
            warn!(
                error = %e,
                path = %package_path.display(),
                "Rollback failed"
            );
        } else {
            info!("Rollback successful");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockFilesystem;
    use crate::domain::PackageName;
    use crate::error::TailorError;

    const MANIFEST: &str = "[tool.uv.sources]\nworkspace = [\n    { path = \"packages/my-library\" },\n]\n";

    fn spec() -> PackageSpec {
        PackageSpec::new(
            PackageName::parse("reports").unwrap(),
            Some("report utilities".into()),
        )
    }

    #[test]
    fn missing_manifest_fails_before_writing() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().returning(|_| true);
        fs.expect_exists().returning(|_| false);
        fs.expect_write_file().never();
        fs.expect_create_dir_all().never();

        let service = PackageService::new(Box::new(fs));
        let err = service
            .create_package("/ws", &spec(), &WorkspaceLayout::default(), false)
            .unwrap_err();

        assert!(matches!(
            err,
            TailorError::Application(ApplicationError::ManifestMissing { .. })
        ));
    }

    #[test]
    fn existing_package_without_overwrite_is_rejected() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().returning(|_| true);
        fs.expect_exists().returning(|_| true);
        fs.expect_write_file().never();

        let service = PackageService::new(Box::new(fs));
        let err = service
            .create_package("/ws", &spec(), &WorkspaceLayout::default(), false)
            .unwrap_err();

        assert!(matches!(
            err,
            TailorError::Application(ApplicationError::PackageExists { .. })
        ));
    }

    #[test]
    fn failed_write_rolls_back_new_package() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().returning(|_| true);
        fs.expect_exists()
            .returning(|p| p.ends_with("pyproject.toml"));
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|p, _| {
            Err(ApplicationError::FilesystemError {
                path: p.to_path_buf(),
                reason: "disk full".into(),
            }
            .into())
        });
        fs.expect_remove_dir_all()
            .withf(|p| p.ends_with("packages/reports"))
            .times(1)
            .returning(|_| Ok(()));

        let service = PackageService::new(Box::new(fs));
        let result = service.create_package("/ws", &spec(), &WorkspaceLayout::default(), false);

        assert!(result.is_err());
    }

    #[test]
    fn manifest_is_written_once_with_new_entry() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().returning(|_| true);
        fs.expect_exists()
            .returning(|p| p == Path::new("/ws/pyproject.toml"));
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_read()
            .returning(|_| Ok(MANIFEST.as_bytes().to_vec()));
        fs.expect_write_file()
            .withf(|p, _| p != Path::new("/ws/pyproject.toml"))
            .times(4)
            .returning(|_, _| Ok(()));
        fs.expect_write_file()
            .withf(|p, content| {
                p == Path::new("/ws/pyproject.toml")
                    && content.contains("{ path = \"packages/reports\" },")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let service = PackageService::new(Box::new(fs));
        let report = service
            .create_package("/ws", &spec(), &WorkspaceLayout::default(), false)
            .unwrap();

        assert_eq!(report.membership, MembershipStatus::Added);
        assert_eq!(report.files.len(), 4);
        assert_eq!(report.package_dir.to_string(), "packages/reports");
    }
}
