//! Exclusion rules for the text substitution pass.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::common::RelativePath;

/// Which files the substitution pass must leave untouched.
///
/// A path is skipped when **any** of its segments (any ancestor directory or
/// the file name itself) equals one of `segments`, or when its extension is
/// one of `extensions`. Extensions are stored without the leading dot and
/// compared case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipRules {
    pub segments: BTreeSet<String>,
    pub extensions: BTreeSet<String>,
}

impl SkipRules {
    pub const DEFAULT_SEGMENTS: &'static [&'static str] = &[
        ".git",
        "__pycache__",
        ".pytest_cache",
        ".ruff_cache",
        ".uv",
        ".lock",
        "node_modules",
        ".venv",
    ];

    pub const DEFAULT_EXTENSIONS: &'static [&'static str] =
        &["png", "jpg", "jpeg", "gif", "pdf", "bin", "so", "pyc"];

    /// Rules that exclude nothing.
    pub fn empty() -> Self {
        Self {
            segments: BTreeSet::new(),
            extensions: BTreeSet::new(),
        }
    }

    pub fn with_segment(mut self, segment: impl Into<String>) -> Self {
        self.segments.insert(segment.into());
        self
    }

    pub fn with_extension(mut self, extension: impl AsRef<str>) -> Self {
        self.extensions
            .insert(extension.as_ref().trim_start_matches('.').to_owned());
        self
    }

    /// The skip predicate. `path` is relative to the run root so that the
    /// location of the checkout itself never causes exclusions.
    pub fn is_skipped(&self, path: &RelativePath) -> bool {
        if path
            .segments()
            .any(|segment| self.segments.contains(segment.as_ref()))
        {
            return true;
        }

        path.as_path()
            .extension()
            .map(|ext| self.extensions.contains(ext.to_string_lossy().as_ref()))
            .unwrap_or(false)
    }
}

impl Default for SkipRules {
    fn default() -> Self {
        Self {
            segments: Self::DEFAULT_SEGMENTS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            extensions: Self::DEFAULT_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(p: &str) -> RelativePath {
        RelativePath::try_new(p).unwrap()
    }

    #[test]
    fn git_metadata_is_skipped() {
        let rules = SkipRules::default();
        assert!(rules.is_skipped(&rel(".git/config")));
    }

    #[test]
    fn any_ancestor_segment_matches() {
        let rules = SkipRules::default();
        assert!(rules.is_skipped(&rel("packages/my-app/.venv/lib/site.py")));
        assert!(rules.is_skipped(&rel("a/b/c/__pycache__/d/mod.py")));
    }

    #[test]
    fn partial_segment_does_not_match() {
        let rules = SkipRules::default();
        assert!(!rules.is_skipped(&rel("docs/.github/workflow.yml")));
        assert!(!rules.is_skipped(&rel("my.git/readme.md")));
    }

    #[test]
    fn binary_extensions_are_skipped() {
        let rules = SkipRules::default();
        assert!(rules.is_skipped(&rel("docs/logo.png")));
        assert!(rules.is_skipped(&rel("src/my_app/__init__.pyc")));
        assert!(!rules.is_skipped(&rel("src/my_app/__init__.py")));
    }

    #[test]
    fn extension_match_is_case_sensitive() {
        let rules = SkipRules::default();
        assert!(!rules.is_skipped(&rel("docs/LOGO.PNG")));
    }

    #[test]
    fn lock_files_are_text() {
        // `.lock` is a directory segment, not an extension.
        let rules = SkipRules::default();
        assert!(!rules.is_skipped(&rel("uv.lock")));
        assert!(rules.is_skipped(&rel(".lock/state")));
    }

    #[test]
    fn empty_rules_skip_nothing() {
        let rules = SkipRules::empty();
        assert!(!rules.is_skipped(&rel(".git/HEAD")));
        assert!(!rules.is_skipped(&rel("logo.png")));
    }

    #[test]
    fn builder_normalises_leading_dot() {
        let rules = SkipRules::empty()
            .with_extension(".woff")
            .with_segment("dist");
        assert!(rules.is_skipped(&rel("font.woff")));
        assert!(rules.is_skipped(&rel("dist/index.js")));
    }
}
