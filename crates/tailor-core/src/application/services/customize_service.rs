//! Customize Service - the template customization engine.
//!
//! Runs the passes of a customization in a fixed order:
//! 1. Text substitution over every non-skipped file
//! 2. Package directory renames (phase 1)
//! 3. Module directory renames under the renamed packages (phase 2)
//! 4. Removal of template-only files
//!
//! Each file or directory is its own failable operation: a failure is
//! recorded as [`Outcome::Failed`] and the pass continues. Nothing is backed
//! up and nothing is rolled back; use [`RunMode::DryRun`] to preview.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, RunObserver},
    },
    domain::{
        Customization, FileRecord, Outcome, PackageListing, RelativePath, RenamePlan,
        RenameRecord, ReplacementMap, RunMode, RunReport, SkipRules, WorkspaceLayout,
    },
    error::TailorResult,
};

/// Files that only make sense in the pristine template.
pub const DEFAULT_CLEANUP_FILES: &[&str] = &["TEMPLATE.md", "setup_template.py"];

/// Everything about a run that comes from configuration rather than from
/// the user's answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomizeSettings {
    pub layout: WorkspaceLayout,
    pub skip: SkipRules,
    pub cleanup: Vec<String>,
}

impl Default for CustomizeSettings {
    fn default() -> Self {
        Self {
            layout: WorkspaceLayout::default(),
            skip: SkipRules::default(),
            cleanup: DEFAULT_CLEANUP_FILES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CustomizeSettings {
    fn cleanup_paths(&self) -> TailorResult<Vec<RelativePath>> {
        self.cleanup
            .iter()
            .map(|f| RelativePath::try_new(f).map_err(Into::into))
            .collect()
    }
}

/// The template customization engine.
pub struct CustomizeService {
    filesystem: Box<dyn Filesystem>,
}

impl CustomizeService {
    /// Create a new customize service with the given filesystem adapter.
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Customize the tree at `root`.
    ///
    /// Fails before touching anything if `root` is not a directory or the
    /// settings hold invalid paths; after that, per-item failures end up in
    /// the report instead.
    #[instrument(
        skip_all,
        fields(root = %root.as_ref().display(), dry_run = mode.is_dry_run())
    )]
    pub fn customize(
        &self,
        root: impl AsRef<Path>,
        customization: &Customization,
        settings: &CustomizeSettings,
        mode: RunMode,
        observer: &dyn RunObserver,
    ) -> TailorResult<RunReport> {
        let root = root.as_ref();
        if !self.filesystem.is_dir(root) {
            return Err(ApplicationError::InvalidRoot {
                path: root.to_path_buf(),
            }
            .into());
        }

        let map = customization.replacement_map()?;
        let cleanup = settings.cleanup_paths()?;
        let renames = customization.package_renames();
        let package_phase = RenamePlan::packages(&settings.layout, &renames)?;

        let reentrant = map.reentrant_tokens();
        if !reentrant.is_empty() {
            warn!(
                tokens = ?reentrant,
                "Replacements contain their own tokens; running again will rewrite the tree again"
            );
        }

        let mut report = RunReport::new(mode.is_dry_run());

        // 1. Text substitution
        report.files = self.apply_replacements(root, &map, &settings.skip, mode, observer)?;

        // 2. Package directories
        report.renames = self.rename_directories(root, &package_phase, mode, observer);

        // 3. Module directories, resolved against the tree phase 1 left behind
        let pending = if mode.is_dry_run() {
            package_phase
        } else {
            RenamePlan::default()
        };
        let listings = self.list_packages(root, &settings.layout);
        let module_phase = RenamePlan::modules(&settings.layout, &renames, &listings, &pending)?;
        report.renames.extend(self.rename_planned(
            root,
            &module_phase,
            &pending,
            mode,
            observer,
        ));

        // 4. Template-only files
        report.cleanup = self.cleanup(root, &cleanup, mode, observer);

        let report = report.finish();
        let summary = report.summary();
        info!(
            modified = summary.modified,
            renamed = summary.renamed + summary.replaced,
            removed = summary.removed,
            failed = summary.failed,
            "Customization finished"
        );
        Ok(report)
    }

    /// Text substitution pass.
    ///
    /// Walking the tree is the only fatal step; every file after that gets a
    /// record.
    #[instrument(skip_all, fields(root = %root.display(), tokens = map.len()))]
    pub fn apply_replacements(
        &self,
        root: &Path,
        map: &ReplacementMap,
        skip: &SkipRules,
        mode: RunMode,
        observer: &dyn RunObserver,
    ) -> TailorResult<Vec<FileRecord>> {
        let files = self.filesystem.walk_files(root)?;
        let mut records = Vec::with_capacity(files.len());

        for path in files {
            let Some(relative) = RelativePath::strip(&path, root) else {
                warn!(path = %path.display(), "Walked path is outside the root, ignoring");
                continue;
            };

            let outcome = if skip.is_skipped(&relative) {
                Outcome::Skipped
            } else {
                self.substitute_file(&path, map, mode)
            };

            match &outcome {
                Outcome::Failed(reason) => warn!(path = %relative, %reason, "Substitution failed"),
                other => debug!(path = %relative, outcome = %other, "Processed file"),
            }

            let record = FileRecord::new(relative, outcome);
            observer.on_file(&record);
            records.push(record);
        }

        Ok(records)
    }

    /// Directory rename pass, strictly in plan order.
    pub fn rename_directories(
        &self,
        root: &Path,
        plan: &RenamePlan,
        mode: RunMode,
        observer: &dyn RunObserver,
    ) -> Vec<RenameRecord> {
        self.rename_planned(root, plan, &RenamePlan::default(), mode, observer)
    }

    /// Cleanup pass. Missing files are recorded as `SkippedMissing`, so
    /// running it twice is harmless.
    #[instrument(skip_all, fields(root = %root.display()))]
    pub fn cleanup(
        &self,
        root: &Path,
        files: &[RelativePath],
        mode: RunMode,
        observer: &dyn RunObserver,
    ) -> Vec<FileRecord> {
        files
            .iter()
            .map(|relative| {
                let path = relative.under(root);
                let outcome = if !self.filesystem.exists(&path) {
                    Outcome::SkippedMissing
                } else if mode.is_dry_run() {
                    Outcome::Removed
                } else {
                    match self.filesystem.remove_file(&path) {
                        Ok(()) => Outcome::Removed,
                        Err(e) => Outcome::Failed(e.to_string()),
                    }
                };

                if let Outcome::Failed(reason) = &outcome {
                    warn!(path = %relative, %reason, "Cleanup failed");
                }

                let record = FileRecord::new(relative.clone(), outcome);
                observer.on_cleanup(&record);
                record
            })
            .collect()
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn substitute_file(&self, path: &Path, map: &ReplacementMap, mode: RunMode) -> Outcome {
        let bytes = match self.filesystem.read(path) {
            Ok(bytes) => bytes,
            Err(e) => return Outcome::Failed(e.to_string()),
        };

        let Ok(content) = String::from_utf8(bytes) else {
            return Outcome::SkippedBinary;
        };

        let rewritten = map.apply(&content);
        if rewritten == content {
            return Outcome::Unchanged;
        }
        if mode.is_dry_run() {
            return Outcome::Modified;
        }

        match self.filesystem.write_file(path, &rewritten) {
            Ok(()) => Outcome::Modified,
            Err(e) => Outcome::Failed(e.to_string()),
        }
    }

    /// Rename pass where `pending` holds steps planned but not applied yet.
    /// Existence checks look at where each path lives before those steps.
    #[instrument(skip_all, fields(root = %root.display(), steps = plan.steps().len()))]
    fn rename_planned(
        &self,
        root: &Path,
        plan: &RenamePlan,
        pending: &RenamePlan,
        mode: RunMode,
        observer: &dyn RunObserver,
    ) -> Vec<RenameRecord> {
        plan.steps()
            .iter()
            .map(|step| {
                let from = pending.origin_of(&step.from).under(root);
                let to = pending.origin_of(&step.to).under(root);
                let outcome = self.rename_one(&from, &to, mode);

                match &outcome {
                    Outcome::Failed(reason) => {
                        warn!(from = %step.from, to = %step.to, %reason, "Rename failed")
                    }
                    other => debug!(from = %step.from, to = %step.to, outcome = %other, "Renamed"),
                }

                let record = RenameRecord {
                    from: step.from.clone(),
                    to: step.to.clone(),
                    outcome,
                };
                observer.on_rename(&record);
                record
            })
            .collect()
    }

    fn rename_one(&self, from: &Path, to: &Path, mode: RunMode) -> Outcome {
        if !self.filesystem.exists(from) {
            return Outcome::SkippedMissing;
        }

        let replacing = self.filesystem.exists(to);
        if mode.is_dry_run() {
            return if replacing {
                Outcome::Replaced
            } else {
                Outcome::Renamed
            };
        }

        if replacing {
            if let Err(e) = self.filesystem.remove_dir_all(to) {
                return Outcome::Failed(e.to_string());
            }
        }

        match self.filesystem.rename(from, to) {
            Ok(()) if replacing => Outcome::Replaced,
            Ok(()) => Outcome::Renamed,
            Err(e) => Outcome::Failed(e.to_string()),
        }
    }

    /// Package directories that have a source directory, with the module
    /// directories found inside it.
    fn list_packages(&self, root: &Path, layout: &WorkspaceLayout) -> Vec<PackageListing> {
        let packages_dir = root.join(&layout.packages_dir);
        if !self.filesystem.is_dir(&packages_dir) {
            return Vec::new();
        }

        let packages = match self.filesystem.list_dirs(&packages_dir) {
            Ok(dirs) => dirs,
            Err(e) => {
                warn!(error = %e, "Could not list packages; skipping module renames");
                return Vec::new();
            }
        };

        packages
            .into_iter()
            .filter_map(|package| {
                let source = package.join(&layout.source_dir);
                if !self.filesystem.is_dir(&source) {
                    return None;
                }
                let modules = match self.filesystem.list_dirs(&source) {
                    Ok(dirs) => dirs
                        .iter()
                        .filter_map(|d| d.file_name())
                        .map(|n| n.to_string_lossy().into_owned())
                        .collect(),
                    Err(e) => {
                        warn!(path = %source.display(), error = %e, "Could not list modules");
                        Vec::new()
                    }
                };
                RelativePath::strip(&package, root).map(|dir| PackageListing { dir, modules })
            })
            .collect()
    }
}
