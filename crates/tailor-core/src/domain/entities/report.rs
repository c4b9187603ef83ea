//! Per-item outcomes and the aggregated run report.
//!
//! Every pass reports an [`Outcome`] per file or directory instead of
//! failing the run; a failed item carries its message and the pass moves on.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::common::RelativePath;

/// What happened to a single file or directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "kebab-case")]
pub enum Outcome {
    /// Content changed and was written (or would be, in a dry run).
    Modified,
    /// Content contained no token.
    Unchanged,
    /// Excluded by the skip rules.
    Skipped,
    /// Content is not valid UTF-8.
    SkippedBinary,
    /// Directory moved to a fresh destination.
    Renamed,
    /// Destination existed, was removed, then the directory was moved.
    Replaced,
    /// Source did not exist.
    SkippedMissing,
    /// Template-only file deleted.
    Removed,
    /// The operation failed; the message comes from the underlying error.
    Failed(String),
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Whether the transcript should show this outcome.
    pub fn is_reportable(&self) -> bool {
        !matches!(self, Self::Skipped | Self::SkippedMissing)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Modified => write!(f, "modified"),
            Self::Unchanged => write!(f, "unchanged"),
            Self::Skipped => write!(f, "skipped"),
            Self::SkippedBinary => write!(f, "skipped-binary"),
            Self::Renamed => write!(f, "renamed"),
            Self::Replaced => write!(f, "replaced"),
            Self::SkippedMissing => write!(f, "skipped-missing"),
            Self::Removed => write!(f, "removed"),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

/// Outcome for one file (substitution or cleanup).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    pub path: RelativePath,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl FileRecord {
    pub fn new(path: RelativePath, outcome: Outcome) -> Self {
        Self { path, outcome }
    }
}

/// Outcome for one planned directory move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameRecord {
    pub from: RelativePath,
    pub to: RelativePath,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Outcome counts across a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub modified: usize,
    pub unchanged: usize,
    pub skipped: usize,
    pub skipped_binary: usize,
    pub renamed: usize,
    pub replaced: usize,
    pub skipped_missing: usize,
    pub removed: usize,
    pub failed: usize,
}

impl Summary {
    fn count(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Modified => self.modified += 1,
            Outcome::Unchanged => self.unchanged += 1,
            Outcome::Skipped => self.skipped += 1,
            Outcome::SkippedBinary => self.skipped_binary += 1,
            Outcome::Renamed => self.renamed += 1,
            Outcome::Replaced => self.replaced += 1,
            Outcome::SkippedMissing => self.skipped_missing += 1,
            Outcome::Removed => self.removed += 1,
            Outcome::Failed(_) => self.failed += 1,
        }
    }
}

/// Everything a customization run did, pass by pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub dry_run: bool,
    pub files: Vec<FileRecord>,
    pub renames: Vec<RenameRecord>,
    pub cleanup: Vec<FileRecord>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl RunReport {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            files: Vec::new(),
            renames: Vec::new(),
            cleanup: Vec::new(),
            finished_at: None,
        }
    }

    /// Stamp the completion time.
    pub fn finish(mut self) -> Self {
        self.finished_at = Some(Utc::now());
        self
    }

    pub fn summary(&self) -> Summary {
        let mut summary = Summary::default();
        self.files
            .iter()
            .map(|r| &r.outcome)
            .chain(self.renames.iter().map(|r| &r.outcome))
            .chain(self.cleanup.iter().map(|r| &r.outcome))
            .for_each(|o| summary.count(o));
        summary
    }

    pub fn has_failures(&self) -> bool {
        self.summary().failed > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(s: &str) -> RelativePath {
        RelativePath::try_new(s).unwrap()
    }

    #[test]
    fn summary_counts_every_pass() {
        let mut report = RunReport::new(false);
        report.files.push(FileRecord::new(rel("a.py"), Outcome::Modified));
        report.files.push(FileRecord::new(rel("b.py"), Outcome::Unchanged));
        report.renames.push(RenameRecord {
            from: rel("packages/a"),
            to: rel("packages/b"),
            outcome: Outcome::Renamed,
        });
        report
            .cleanup
            .push(FileRecord::new(rel("TEMPLATE.md"), Outcome::Failed("denied".into())));

        let summary = report.summary();
        assert_eq!(summary.modified, 1);
        assert_eq!(summary.unchanged, 1);
        assert_eq!(summary.renamed, 1);
        assert_eq!(summary.failed, 1);
        assert!(report.has_failures());
    }

    #[test]
    fn outcome_display_uses_kebab_case() {
        assert_eq!(Outcome::SkippedBinary.to_string(), "skipped-binary");
        assert_eq!(Outcome::SkippedMissing.to_string(), "skipped-missing");
        assert_eq!(Outcome::Failed("x".into()).to_string(), "failed: x");
    }

    #[test]
    fn skips_are_not_reportable() {
        assert!(!Outcome::Skipped.is_reportable());
        assert!(!Outcome::SkippedMissing.is_reportable());
        assert!(Outcome::SkippedBinary.is_reportable());
    }

    #[test]
    fn finish_sets_timestamp() {
        assert!(RunReport::new(true).finish().finished_at.is_some());
    }
}
