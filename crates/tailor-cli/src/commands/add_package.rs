//! Implementation of the `tailor add-package` command.

use tracing::instrument;

use tailor_adapters::LocalFilesystem;
use tailor_core::{
    application::{MembershipStatus, PackageReport, PackageService},
    domain::{PackageName, PackageSpec},
};

use crate::{
    cli::AddPackageArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Create the package skeleton and register it in the root manifest.
#[instrument(skip_all, fields(package = %args.name, root = %args.root.display()))]
pub fn execute(args: AddPackageArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let name = PackageName::parse(args.name).map_err(|e| CliError::Core(e.into()))?;
    let spec = PackageSpec::new(name, args.description);

    output.header(&format!("\u{1f4e6} Creating package: {}", spec.name))?;

    let service = PackageService::new(Box::new(LocalFilesystem::new()));
    let report = service.create_package(&args.root, &spec, &config.layout, args.force)?;

    output.json(&report)?;
    print_report(&output, &spec, &report, &config)
}

fn print_report(
    output: &OutputManager,
    spec: &PackageSpec,
    report: &PackageReport,
    config: &AppConfig,
) -> CliResult<()> {
    for file in &report.files {
        output.success(&format!("Created {file}"))?;
    }

    match report.membership {
        MembershipStatus::Added => {
            output.success(&format!("Updated root {}", config.layout.manifest))?
        }
        MembershipStatus::AlreadyPresent => output.info(&format!(
            "Root {} already lists {}",
            config.layout.manifest, report.package_dir
        ))?,
        MembershipStatus::SectionMissing => output.warning(&format!(
            "No `workspace = [ ... ]` list in {}; add {} by hand",
            config.layout.manifest,
            spec.membership_entry(&config.layout)
        ))?,
    }

    output.print("")?;
    output.success(&format!("Package '{}' created successfully!", spec.name))?;
    output.print("")?;
    output.print(&format!("Location: {}", report.package_dir))?;
    output.print("Next steps:")?;
    output.print("  1. Run: uv sync")?;
    output.print(&format!("  2. Edit {}/README.md", report.package_dir))?;
    output.print(&format!(
        "  3. Add your code to {}/{}/",
        config.layout.source_dir,
        spec.name.module_name()
    ))?;
    output.print(&format!("  4. Add tests to {}/", config.layout.tests_dir))?;

    Ok(())
}
