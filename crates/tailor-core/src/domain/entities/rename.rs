//! Two-phase directory rename planning.
//!
//! Phase 1 renames package directories (`packages/my-library` →
//! `packages/widgets-core`). Phase 2 renames the module directories nested in
//! each package's source directory (`src/my_library` → `src/widgets_core`).
//! Phase 2 paths are expressed under the package directory *as it exists after
//! phase 1*, so phase 2 is only planned once phase 1 has been applied, or, in
//! a dry run, against the phase 1 plan passed as `pending`.

use serde::Serialize;

use super::{common::RelativePath, layout::WorkspaceLayout};
use crate::domain::{DomainError, PackageName};

/// A single planned directory move, both paths relative to the run root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameStep {
    pub from: RelativePath,
    pub to: RelativePath,
}

impl RenameStep {
    pub fn new(from: RelativePath, to: RelativePath) -> Self {
        Self { from, to }
    }
}

/// A template package and the name it should end up with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRename {
    pub from: PackageName,
    pub to: PackageName,
}

impl PackageRename {
    pub fn new(from: PackageName, to: PackageName) -> Self {
        Self { from, to }
    }

    pub fn renames_package(&self) -> bool {
        self.from != self.to
    }

    pub fn renames_module(&self) -> bool {
        self.from.module_name() != self.to.module_name()
    }
}

/// What the filesystem holds for one package directory: its path and the
/// module directories found in its source directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageListing {
    pub dir: RelativePath,
    pub modules: Vec<String>,
}

/// Ordered rename steps for one phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RenamePlan {
    steps: Vec<RenameStep>,
}

impl RenamePlan {
    pub fn new(steps: Vec<RenameStep>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[RenameStep] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Where `path` lives before this plan's steps are applied.
    ///
    /// A path under a step's destination maps to the same place under its
    /// source; any other path is returned unchanged.
    pub fn origin_of(&self, path: &RelativePath) -> RelativePath {
        self.steps
            .iter()
            .rev()
            .find_map(|step| {
                let rest = path.as_path().strip_prefix(step.to.as_path()).ok()?;
                if rest.as_os_str().is_empty() {
                    Some(step.from.clone())
                } else {
                    step.from.join(rest).ok()
                }
            })
            .unwrap_or_else(|| path.clone())
    }

    /// Phase 1: one step per package whose name changes, in the given order.
    pub fn packages(
        layout: &WorkspaceLayout,
        renames: &[PackageRename],
    ) -> Result<Self, DomainError> {
        let packages_dir = RelativePath::try_new(&layout.packages_dir)?;

        let steps = renames
            .iter()
            .filter(|r| r.renames_package())
            .map(|r| -> Result<RenameStep, DomainError> {
                Ok(RenameStep::new(
                    packages_dir.join(r.from.as_str())?,
                    packages_dir.join(r.to.as_str())?,
                ))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { steps })
    }

    /// Phase 2: module renames inside every listed package.
    ///
    /// `pending` holds phase 1 steps that were planned but not applied (dry
    /// run). A listed directory that a pending step moves is addressed by its
    /// destination; a listed directory that a pending step would overwrite is
    /// ignored. After a real phase 1, pass an empty plan.
    pub fn modules(
        layout: &WorkspaceLayout,
        renames: &[PackageRename],
        listings: &[PackageListing],
        pending: &RenamePlan,
    ) -> Result<Self, DomainError> {
        let mut steps = Vec::new();

        for listing in listings {
            if pending.steps.iter().any(|s| s.to == listing.dir) {
                continue;
            }

            let package_dir = pending
                .steps
                .iter()
                .find(|s| s.from == listing.dir)
                .map(|s| &s.to)
                .unwrap_or(&listing.dir);
            let source_dir = package_dir.join(&layout.source_dir)?;

            for rename in renames.iter().filter(|r| r.renames_module()) {
                let old_module = rename.from.module_name();
                if !listing.modules.contains(&old_module) {
                    continue;
                }
                steps.push(RenameStep::new(
                    source_dir.join(&old_module)?,
                    source_dir.join(rename.to.module_name())?,
                ));
            }
        }

        Ok(Self { steps })
    }
}

impl<'a> IntoIterator for &'a RenamePlan {
    type Item = &'a RenameStep;
    type IntoIter = std::slice::Iter<'a, RenameStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> PackageName {
        PackageName::parse(s).unwrap()
    }

    fn rel(s: &str) -> RelativePath {
        RelativePath::try_new(s).unwrap()
    }

    fn library_rename() -> Vec<PackageRename> {
        vec![
            PackageRename::new(name("my-library"), name("widgets-core")),
            PackageRename::new(name("my-app"), name("my-app")),
        ]
    }

    #[test]
    fn package_phase_skips_unchanged_names() {
        let plan = RenamePlan::packages(&WorkspaceLayout::default(), &library_rename()).unwrap();
        assert_eq!(
            plan.steps(),
            [RenameStep::new(
                rel("packages/my-library"),
                rel("packages/widgets-core")
            )]
        );
    }

    #[test]
    fn module_phase_resolves_under_renamed_package() {
        let listings = [PackageListing {
            dir: rel("packages/widgets-core"),
            modules: vec!["my_library".into()],
        }];
        let plan = RenamePlan::modules(
            &WorkspaceLayout::default(),
            &library_rename(),
            &listings,
            &RenamePlan::default(),
        )
        .unwrap();
        assert_eq!(
            plan.steps(),
            [RenameStep::new(
                rel("packages/widgets-core/src/my_library"),
                rel("packages/widgets-core/src/widgets_core"),
            )]
        );
    }

    #[test]
    fn module_phase_with_pending_package_steps_uses_destination() {
        let layout = WorkspaceLayout::default();
        let renames = library_rename();
        let pending = RenamePlan::packages(&layout, &renames).unwrap();
        let listings = [PackageListing {
            dir: rel("packages/my-library"),
            modules: vec!["my_library".into()],
        }];

        let plan = RenamePlan::modules(&layout, &renames, &listings, &pending).unwrap();
        assert_eq!(
            plan.steps()[0].from,
            rel("packages/widgets-core/src/my_library")
        );
    }

    #[test]
    fn module_phase_ignores_directories_about_to_be_replaced() {
        let layout = WorkspaceLayout::default();
        let renames = library_rename();
        let pending = RenamePlan::packages(&layout, &renames).unwrap();
        let listings = [PackageListing {
            dir: rel("packages/widgets-core"),
            modules: vec!["my_library".into()],
        }];

        let plan = RenamePlan::modules(&layout, &renames, &listings, &pending).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn module_phase_only_plans_existing_modules() {
        let listings = [PackageListing {
            dir: rel("packages/my-cli"),
            modules: vec!["my_cli".into()],
        }];
        let plan = RenamePlan::modules(
            &WorkspaceLayout::default(),
            &library_rename(),
            &listings,
            &RenamePlan::default(),
        )
        .unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn origin_maps_back_through_pending_steps() {
        let pending = RenamePlan::packages(&WorkspaceLayout::default(), &library_rename()).unwrap();

        assert_eq!(
            pending.origin_of(&rel("packages/widgets-core/src/my_library")),
            rel("packages/my-library/src/my_library")
        );
        assert_eq!(
            pending.origin_of(&rel("packages/widgets-core")),
            rel("packages/my-library")
        );
        assert_eq!(
            pending.origin_of(&rel("packages/my-app/src")),
            rel("packages/my-app/src")
        );
    }

    #[test]
    fn hyphen_only_change_renames_package_but_not_module() {
        let rename = PackageRename::new(name("my-app"), name("my_app"));
        assert!(rename.renames_package());
        assert!(!rename.renames_module());
    }
}
