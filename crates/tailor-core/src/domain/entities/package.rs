//! New-package skeleton and workspace membership editing.
//!
//! Everything here is pure: [`PackageSpec::skeleton`] yields the files to
//! write and [`add_workspace_member`] yields the new manifest text. The
//! application layer does the I/O.

use serde::Serialize;

use super::{common::RelativePath, customization::placeholders, layout::WorkspaceLayout};
use crate::domain::{DomainError, PackageName};

pub const DEFAULT_DESCRIPTION: &str = "A package in the monorepo";

/// What to generate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageSpec {
    pub name: PackageName,
    pub description: String,
    pub author_name: String,
    pub author_email: String,
    pub project_name: String,
}

impl PackageSpec {
    /// A spec with the template's placeholder author and project, so a later
    /// customization run rewrites them along with the rest of the tree.
    pub fn new(name: PackageName, description: Option<String>) -> Self {
        Self {
            name,
            description: description
                .map(|d| d.trim().to_owned())
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_owned()),
            author_name: placeholders::AUTHOR_NAME.to_owned(),
            author_email: placeholders::AUTHOR_EMAIL.to_owned(),
            project_name: placeholders::PROJECT_NAME.to_owned(),
        }
    }

    /// The package directory relative to the workspace root.
    pub fn package_dir(&self, layout: &WorkspaceLayout) -> Result<RelativePath, DomainError> {
        RelativePath::try_new(&layout.packages_dir)?.join(self.name.as_str())
    }

    /// The membership entry as it appears inside the `workspace = [...]` list.
    pub fn membership_entry(&self, layout: &WorkspaceLayout) -> String {
        format!("{{ path = \"{}/{}\" }}", layout.packages_dir, self.name)
    }

    /// Render the fixed file skeleton: manifest, module init, example test,
    /// README.
    pub fn skeleton(&self, layout: &WorkspaceLayout) -> Result<Vec<SkeletonFile>, DomainError> {
        let root = self.package_dir(layout)?;
        let module = self.name.module_name();
        let module_dir = root.join(&layout.source_dir)?.join(&module)?;
        let tests_dir = root.join(&layout.tests_dir)?;

        Ok(vec![
            SkeletonFile::new(root.join("pyproject.toml")?, self.render_pyproject(layout)),
            SkeletonFile::new(
                module_dir.join("__init__.py")?,
                "\"\"\"Package initialization.\"\"\"\n\n__version__ = \"0.1.0\"\n".to_owned(),
            ),
            SkeletonFile::new(
                tests_dir.join("test_example.py")?,
                format!(
                    "\"\"\"Example tests for {name}.\"\"\"\n\
                     \n\
                     \n\
                     def test_example():\n\
                     \x20   \"\"\"Example test.\"\"\"\n\
                     \x20   assert True\n",
                    name = self.name
                ),
            ),
            SkeletonFile::new(root.join("README.md")?, self.render_readme()),
        ])
    }

    fn render_pyproject(&self, layout: &WorkspaceLayout) -> String {
        format!(
            r#"[build-system]
requires = ["hatchling"]
build-backend = "hatchling.build"

[project]
name = "{name}"
version = "0.1.0"
description = "{description}"
readme = "README.md"
requires-python = ">=3.11"
authors = [{{name = "{author}", email = "{email}"}}]
license = {{text = "MIT"}}
keywords = ["example"]

[project.urls]
Homepage = "https://github.com/example/{project}"
Repository = "https://github.com/example/{project}"

[tool.hatch.build.targets.wheel]
packages = ["{source}/{module}"]

[dependency-groups]
dev = [
    "pytest>=7.4.0",
    "pytest-cov>=4.1.0",
]
"#,
            name = self.name,
            description = escape_toml(&self.description),
            author = escape_toml(&self.author_name),
            email = escape_toml(&self.author_email),
            project = self.project_name,
            source = layout.source_dir,
            module = self.name.module_name(),
        )
    }

    fn render_readme(&self) -> String {
        format!(
            r#"# {name}

{description}

## Installation

```bash
uv pip install -e .
```

## Development

```bash
uv sync
pytest
```
"#,
            name = self.name,
            description = self.description,
        )
    }
}

fn escape_toml(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// One file of a package skeleton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkeletonFile {
    pub path: RelativePath,
    pub content: String,
}

impl SkeletonFile {
    pub fn new(path: RelativePath, content: String) -> Self {
        Self { path, content }
    }
}

/// Result of adding a member to the root manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Membership {
    /// Entry inserted; carries the new manifest text.
    Added(String),
    /// The exact entry string was already present; nothing to write.
    AlreadyPresent,
    /// No `workspace = [` list with a closing `]` line was found.
    SectionMissing,
}

/// Insert `entry` as the last element of the `workspace = [ ... ]` list.
///
/// The check for an existing entry is an exact substring match on `entry`,
/// so running this twice never duplicates a member.
pub fn add_workspace_member(manifest: &str, entry: &str) -> Membership {
    if manifest.contains(entry) {
        return Membership::AlreadyPresent;
    }

    let mut lines: Vec<&str> = manifest.split('\n').collect();
    let Some(open) = lines.iter().position(|l| l.contains("workspace = [")) else {
        return Membership::SectionMissing;
    };
    let Some(close) = lines
        .iter()
        .skip(open + 1)
        .position(|l| l.trim() == "]")
        .map(|offset| open + 1 + offset)
    else {
        return Membership::SectionMissing;
    };

    let line = format!("    {entry},");
    lines.insert(close, &line);
    Membership::Added(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"[project]
name = "python-monorepo"

[tool.uv.workspace]
members = ["packages/*"]

[tool.uv.sources]
workspace = [
    { path = "packages/my-library" },
]
"#;

    fn spec(name: &str, description: Option<&str>) -> PackageSpec {
        PackageSpec::new(
            PackageName::parse(name).unwrap(),
            description.map(str::to_owned),
        )
    }

    #[test]
    fn member_is_inserted_before_closing_bracket() {
        let Membership::Added(updated) =
            add_workspace_member(MANIFEST, "{ path = \"packages/reports\" }")
        else {
            panic!("expected entry to be added");
        };
        assert!(updated.contains(
            "    { path = \"packages/my-library\" },\n    { path = \"packages/reports\" },\n]"
        ));
        assert!(updated.ends_with("]\n"));
    }

    #[test]
    fn existing_member_is_not_duplicated() {
        assert_eq!(
            add_workspace_member(MANIFEST, "{ path = \"packages/my-library\" }"),
            Membership::AlreadyPresent
        );
    }

    #[test]
    fn missing_section_is_reported() {
        assert_eq!(
            add_workspace_member("[project]\nname = \"x\"\n", "{ path = \"packages/x\" }"),
            Membership::SectionMissing
        );
        assert_eq!(
            add_workspace_member("workspace = [\n", "{ path = \"packages/x\" }"),
            Membership::SectionMissing
        );
    }

    #[test]
    fn skeleton_has_four_files_in_layout() {
        let files = spec("reports", Some("report utilities"))
            .skeleton(&WorkspaceLayout::default())
            .unwrap();
        let paths: Vec<_> = files.iter().map(|f| f.path.to_string()).collect();
        assert_eq!(
            paths,
            [
                "packages/reports/pyproject.toml",
                "packages/reports/src/reports/__init__.py",
                "packages/reports/tests/test_example.py",
                "packages/reports/README.md",
            ]
        );
    }

    #[test]
    fn skeleton_test_passes_trivially() {
        let files = spec("reports", None)
            .skeleton(&WorkspaceLayout::default())
            .unwrap();
        let test = &files[2].content;
        assert!(test.contains("def test_example():"));
        assert!(test.contains("    assert True\n"));
    }

    #[test]
    fn pyproject_uses_module_name_for_wheel() {
        let files = spec("data-tools", Some("say \"hi\""))
            .skeleton(&WorkspaceLayout::default())
            .unwrap();
        let pyproject = &files[0].content;
        assert!(pyproject.contains("name = \"data-tools\""));
        assert!(pyproject.contains("packages = [\"src/data_tools\"]"));
        assert!(pyproject.contains("description = \"say \\\"hi\\\"\""));
    }

    #[test]
    fn new_package_carries_template_placeholders() {
        let spec = spec("reports", None);
        assert_eq!(spec.author_name, placeholders::AUTHOR_NAME);
        assert_eq!(spec.author_email, placeholders::AUTHOR_EMAIL);
        assert_eq!(spec.project_name, placeholders::PROJECT_NAME);
    }

    #[test]
    fn blank_description_uses_default() {
        assert_eq!(spec("x", Some("  ")).description, DEFAULT_DESCRIPTION);
    }

    #[test]
    fn membership_entry_format() {
        assert_eq!(
            spec("reports", None).membership_entry(&WorkspaceLayout::default()),
            "{ path = \"packages/reports\" }"
        );
    }
}
