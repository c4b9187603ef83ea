use serde::{Deserialize, Serialize};

/// Where things live inside a monorepo checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceLayout {
    /// Directory (under the root) holding one sub-directory per package.
    pub packages_dir: String,
    /// Source directory inside each package; modules live below it.
    pub source_dir: String,
    /// Test directory inside each package.
    pub tests_dir: String,
    /// Root manifest carrying the workspace membership list.
    pub manifest: String,
}

impl Default for WorkspaceLayout {
    fn default() -> Self {
        Self {
            packages_dir: "packages".into(),
            source_dir: "src".into(),
            tests_dir: "tests".into(),
            manifest: "pyproject.toml".into(),
        }
    }
}
