//! End-to-end runs of the customization engine and the package generator
//! against a real template tree on disk.

use std::fs;
use std::path::Path;

use tailor_adapters::{LocalFilesystem, MemoryFilesystem};
use tailor_core::application::MembershipStatus;
use tailor_core::prelude::*;
use tempfile::TempDir;

const ROOT_MANIFEST: &str = r#"[project]
name = "python-monorepo"
version = "0.1.0"
description = "A Python monorepo using uv workspaces"
authors = [{name = "Developer", email = "dev@example.com"}]

[tool.uv.workspace]
members = ["packages/*"]

[tool.uv.sources]
workspace = [
    { path = "packages/my-library" },
    { path = "packages/my-app" },
    { path = "packages/my-cli" },
]
"#;

const LIBRARY_INIT: &str = r#""""A reusable library in the Python monorepo."""

__version__ = "0.1.0"


def add(a: int, b: int) -> int:
    return a + b


def multiply(a: int, b: int) -> int:
    return a * b
"#;

const LIBRARY_TEST: &str = r#""""Tests for my_library module."""

from my_library import add, multiply


def test_math():
    assert add(2, 3) == 5
    assert multiply(2, 3) == 6
"#;

const APP_INIT: &str = r#""""An application that uses the shared library."""

from my_library import add, multiply
"#;

const CLI_MAIN: &str = r#""""CLI interface for the monorepo application."""

import click
from my_library import add, multiply
"#;

fn write(root: &Path, relative: &str, content: impl AsRef<[u8]>) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn template() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "pyproject.toml", ROOT_MANIFEST);
    write(root, "README.md", "# python-monorepo\n\nBuilt on my-library, my-app and my-cli.\n");
    write(root, "TEMPLATE.md", "# Using this template\n");
    write(root, "setup_template.py", "print('customize me')\n");
    write(root, "packages/my-library/src/my_library/__init__.py", LIBRARY_INIT);
    write(root, "packages/my-library/tests/test_example.py", LIBRARY_TEST);
    write(root, "packages/my-app/src/my_app/__init__.py", APP_INIT);
    write(root, "packages/my-cli/src/my_cli/main.py", CLI_MAIN);
    write(root, "assets/logo.dat", [0x89, b'm', b'y', b'-', b'a', b'p', b'p', 0xff, 0x00]);
    write(root, ".git/config", "[remote] url = my-app\n");
    dir
}

fn customization() -> Customization {
    Customization::builder()
        .project_name("widgets")
        .author_name("Ada")
        .author_email("ada@example.org")
        .library("widgets-core")
        .unwrap()
        .app("widgets-app")
        .unwrap()
        .cli("widgets-cli")
        .unwrap()
        .build()
}

fn run(root: &Path, mode: RunMode) -> RunReport {
    CustomizeService::new(Box::new(LocalFilesystem::new()))
        .customize(
            root,
            &customization(),
            &CustomizeSettings::default(),
            mode,
            &NoopObserver,
        )
        .unwrap()
}

fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative)).unwrap()
}

#[test]
fn packages_and_modules_are_renamed_in_one_run() {
    let dir = template();
    let root = dir.path();

    let report = run(root, RunMode::Apply);

    assert!(!report.has_failures(), "{report:?}");
    assert!(!root.join("packages/my-library").exists());
    assert!(root.join("packages/widgets-core/src/widgets_core/__init__.py").is_file());
    assert!(root.join("packages/widgets-app/src/widgets_app/__init__.py").is_file());
    assert!(root.join("packages/widgets-cli/src/widgets_cli/main.py").is_file());
}

#[test]
fn imports_and_manifest_are_rewritten() {
    let dir = template();
    let root = dir.path();

    run(root, RunMode::Apply);

    let test = read(root, "packages/widgets-core/tests/test_example.py");
    assert!(test.contains("from widgets_core import add, multiply"));
    assert!(test.contains("assert add(2, 3) == 5"));

    let manifest = read(root, "pyproject.toml");
    assert!(manifest.contains("name = \"widgets\""));
    assert!(manifest.contains("description = \"widgets - Python monorepo with uv\""));
    assert!(manifest.contains("{name = \"Ada\", email = \"ada@example.org\"}"));
    assert!(manifest.contains("{ path = \"packages/widgets-cli\" }"));
    assert!(!manifest.contains("my-library"));
}

#[test]
fn second_run_modifies_nothing() {
    let dir = template();
    let root = dir.path();

    run(root, RunMode::Apply);
    let second = run(root, RunMode::Apply);

    let summary = second.summary();
    assert_eq!(summary.modified, 0);
    assert_eq!(summary.failed, 0);
    assert!(
        second
            .renames
            .iter()
            .all(|r| r.outcome == Outcome::SkippedMissing)
    );
}

#[test]
fn binary_files_are_left_byte_for_byte() {
    let dir = template();
    let root = dir.path();
    let before = fs::read(root.join("assets/logo.dat")).unwrap();

    let report = run(root, RunMode::Apply);

    assert_eq!(fs::read(root.join("assets/logo.dat")).unwrap(), before);
    let record = report
        .files
        .iter()
        .find(|r| r.path.to_string() == "assets/logo.dat")
        .unwrap();
    assert_eq!(record.outcome, Outcome::SkippedBinary);
}

#[test]
fn excluded_segments_are_untouched() {
    let dir = template();
    let root = dir.path();

    run(root, RunMode::Apply);

    assert_eq!(read(root, ".git/config"), "[remote] url = my-app\n");
}

#[test]
fn template_files_are_cleaned_up_once() {
    let dir = template();
    let root = dir.path();

    let first = run(root, RunMode::Apply);
    assert!(!root.join("TEMPLATE.md").exists());
    assert!(!root.join("setup_template.py").exists());
    assert!(first.cleanup.iter().all(|r| r.outcome == Outcome::Removed));

    let second = run(root, RunMode::Apply);
    assert!(
        second
            .cleanup
            .iter()
            .all(|r| r.outcome == Outcome::SkippedMissing)
    );
}

#[test]
fn dry_run_changes_nothing_but_reports_everything() {
    let dir = template();
    let root = dir.path();
    let manifest_before = read(root, "pyproject.toml");

    let report = run(root, RunMode::DryRun);

    assert!(report.dry_run);
    assert_eq!(read(root, "pyproject.toml"), manifest_before);
    assert!(root.join("packages/my-library/src/my_library").is_dir());
    assert!(root.join("TEMPLATE.md").is_file());

    assert!(report.summary().modified > 0);
    let module = report
        .renames
        .iter()
        .find(|r| r.to.to_string() == "packages/widgets-core/src/widgets_core")
        .unwrap();
    assert_eq!(module.outcome, Outcome::Renamed);
    assert!(report.renames.iter().all(|r| !r.outcome.is_failure()));
    assert!(report.cleanup.iter().all(|r| r.outcome == Outcome::Removed));
}

#[test]
fn existing_destination_is_replaced() {
    let dir = template();
    let root = dir.path();
    write(root, "packages/widgets-core/stale.txt", "old");

    let report = run(root, RunMode::Apply);

    assert!(!root.join("packages/widgets-core/stale.txt").exists());
    assert_eq!(report.renames[0].outcome, Outcome::Replaced);
    assert!(root.join("packages/widgets-core/src/widgets_core").is_dir());
}

#[test]
fn unreadable_file_fails_alone() {
    let fs = MemoryFilesystem::new();
    fs.insert_file("/ws/a.py", "import my_app");
    fs.insert_file("/ws/locked/b.py", "import my_app");
    fs.insert_file("/ws/c.py", "import my_app");
    fs.set_read_only("/ws/locked");

    let report = CustomizeService::new(Box::new(fs.clone()))
        .customize(
            "/ws",
            &customization(),
            &CustomizeSettings::default(),
            RunMode::Apply,
            &NoopObserver,
        )
        .unwrap();

    assert_eq!(report.summary().failed, 1);
    assert_eq!(report.summary().modified, 2);
    assert_eq!(fs.read_file("/ws/c.py").as_deref(), Some("import widgets_app"));
    assert_eq!(fs.read_file("/ws/locked/b.py").as_deref(), Some("import my_app"));
}

#[test]
fn add_package_registers_exactly_one_member() {
    let dir = template();
    let root = dir.path();
    let service = PackageService::new(Box::new(LocalFilesystem::new()));
    let spec = PackageSpec::new(
        PackageName::parse("reports").unwrap(),
        Some("report utilities".into()),
    );
    let layout = WorkspaceLayout::default();

    let report = service.create_package(root, &spec, &layout, false).unwrap();
    assert_eq!(report.membership, MembershipStatus::Added);

    let again = service.create_package(root, &spec, &layout, true).unwrap();
    assert_eq!(again.membership, MembershipStatus::AlreadyPresent);

    let manifest = read(root, "pyproject.toml");
    assert_eq!(manifest.matches("{ path = \"packages/reports\" }").count(), 1);
    assert!(manifest.contains("    { path = \"packages/my-cli\" },\n    { path = \"packages/reports\" },\n]"));

    let test = read(root, "packages/reports/tests/test_example.py");
    assert!(test.contains("assert True"));
    assert!(read(root, "packages/reports/README.md").contains("report utilities"));
    assert!(root.join("packages/reports/src/reports/__init__.py").is_file());
}

#[test]
fn add_package_refuses_existing_directory() {
    let dir = template();
    let service = PackageService::new(Box::new(LocalFilesystem::new()));
    let spec = PackageSpec::new(PackageName::parse("my-app").unwrap(), None);

    let err = service
        .create_package(dir.path(), &spec, &WorkspaceLayout::default(), false)
        .unwrap_err();

    assert!(err.to_string().contains("already exists"));
}

#[test]
fn generated_package_is_customized_with_the_rest() {
    let dir = template();
    let root = dir.path();
    PackageService::new(Box::new(LocalFilesystem::new()))
        .create_package(
            root,
            &PackageSpec::new(PackageName::parse("reports").unwrap(), None),
            &WorkspaceLayout::default(),
            false,
        )
        .unwrap();

    run(root, RunMode::Apply);

    let pyproject = read(root, "packages/reports/pyproject.toml");
    assert!(pyproject.contains("{name = \"Ada\", email = \"ada@example.org\"}"));
    assert!(pyproject.contains("https://github.com/example/widgets"));
}
