//! Implementation of the `tailor setup` command.
//!
//! Collects the answers (flags, then prompts, then configured defaults),
//! runs the customization engine over the checkout, and prints the
//! transcript and a summary.

use serde::Serialize;
use tracing::{debug, info, instrument};

use tailor_adapters::LocalFilesystem;
use tailor_core::{
    application::{CustomizeService, NoopObserver, RunObserver},
    domain::{Customization, RunMode, RunReport, Summary},
};

use crate::{
    cli::SetupArgs,
    config::{AppConfig, Defaults},
    error::{CliError, CliResult},
    output::{OutputManager, Transcript},
    prompt,
};

const RULE: &str = "============================================================";

/// Execute `tailor setup`.
///
/// 1. Resolve every answer
/// 2. Build and validate the [`Customization`]
/// 3. Run substitution, renames, and cleanup
/// 4. Print the summary and next steps
#[instrument(skip_all, fields(root = %args.root.display(), dry_run = args.dry_run))]
pub fn execute(args: SetupArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    // Prompts go to stderr, so JSON mode still asks; headings are silent there.
    let interactive = !args.yes;
    if interactive {
        output.print("")?;
        output.header(RULE)?;
        output.header("Monorepo template setup")?;
        output.header(RULE)?;
        output.print("")?;
    }

    let answers = if interactive {
        collect_answers(&args, &config.defaults, |question, default| {
            match question {
                Question::ProjectName => output.print("Project configuration:")?,
                Question::Library => {
                    output.print("")?;
                    output.print("Package names (leave blank to use defaults):")?;
                }
                _ => {}
            }
            prompt::ask(question.label(), default)
        })?
    } else {
        collect_answers(&args, &config.defaults, |_, default| Ok(default.to_owned()))?
    };

    let customization = answers.build()?;
    debug!(?customization, "Answers resolved");

    let mode = if args.dry_run {
        RunMode::DryRun
    } else {
        RunMode::Apply
    };

    output.print("")?;
    if mode.is_dry_run() {
        output.info("Dry run: nothing will be written")?;
    }
    output.header("Applying changes...")?;

    let transcript = Transcript::new(&output);
    let observer: &dyn RunObserver = if output.is_json() {
        &NoopObserver
    } else {
        &transcript
    };

    let service = CustomizeService::new(Box::new(LocalFilesystem::new()));
    let report = service.customize(
        &args.root,
        &customization,
        &config.customize_settings(),
        mode,
        observer,
    )?;

    let summary = report.summary();
    info!(
        modified = summary.modified,
        failed = summary.failed,
        "Setup finished"
    );

    output.json(&SetupOutput {
        customization: &customization,
        summary,
        report: &report,
    })?;

    print_summary(&output, &report, summary)?;
    Ok(())
}

// ── Answers ───────────────────────────────────────────────────────────────────

/// The questions, in the order they are asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Question {
    ProjectName,
    AuthorName,
    AuthorEmail,
    Library,
    App,
    Cli,
}

impl Question {
    fn label(self) -> &'static str {
        match self {
            Self::ProjectName => "Project name",
            Self::AuthorName => "Author name",
            Self::AuthorEmail => "Author email",
            Self::Library => "Library package name",
            Self::App => "App package name",
            Self::Cli => "CLI package name",
        }
    }
}

/// Raw answers before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Answers {
    project_name: String,
    author_name: String,
    author_email: String,
    library: String,
    app: String,
    cli: String,
}

impl Answers {
    fn build(self) -> CliResult<Customization> {
        let customization = Customization::builder()
            .project_name(self.project_name)
            .author_name(self.author_name)
            .author_email(self.author_email)
            .library(self.library)
            .and_then(|b| b.app(self.app))
            .and_then(|b| b.cli(self.cli))
            .map_err(|e| CliError::Core(e.into()))?
            .build();
        Ok(customization)
    }
}

/// Flags win; `ask` is called for everything else with the configured
/// default. A blank flag takes the default, as a blank answer does.
pub(crate) fn collect_answers(
    args: &SetupArgs,
    defaults: &Defaults,
    mut ask: impl FnMut(Question, &str) -> CliResult<String>,
) -> CliResult<Answers> {
    let mut resolve = |flag: &Option<String>, question: Question, default: &str| {
        match flag.as_deref().map(str::trim) {
            Some("") => Ok(default.to_owned()),
            Some(value) => Ok(value.to_owned()),
            None => ask(question, default),
        }
    };

    Ok(Answers {
        project_name: resolve(&args.project_name, Question::ProjectName, &defaults.project_name)?,
        author_name: resolve(&args.author_name, Question::AuthorName, &defaults.author_name)?,
        author_email: resolve(&args.author_email, Question::AuthorEmail, &defaults.author_email)?,
        library: resolve(&args.library, Question::Library, &defaults.library)?,
        app: resolve(&args.app, Question::App, &defaults.app)?,
        cli: resolve(&args.cli, Question::Cli, &defaults.cli)?,
    })
}

// ── Output ────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct SetupOutput<'a> {
    customization: &'a Customization,
    summary: Summary,
    report: &'a RunReport,
}

fn print_summary(output: &OutputManager, report: &RunReport, summary: Summary) -> CliResult<()> {
    output.print("")?;
    output.header(RULE)?;
    if report.dry_run {
        output.header("Dry run complete, no files were changed")?;
    } else {
        output.header("Template setup complete!")?;
    }
    output.header(RULE)?;

    output.print(&format!(
        "{} modified, {} unchanged, {} binary, {} directories renamed, {} removed",
        summary.modified,
        summary.unchanged,
        summary.skipped_binary,
        summary.renamed + summary.replaced,
        summary.removed,
    ))?;

    if summary.failed > 0 {
        output.warning(&format!(
            "{} item(s) failed and were left as they were; see the lines marked \u{2717} above",
            summary.failed
        ))?;
    }

    if let Some(finished) = report.finished_at {
        output.print(&format!(
            "Finished at {}",
            finished
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M:%S")
        ))?;
    }

    if !report.dry_run {
        output.print("")?;
        output.print("Next steps:")?;
        output.print("  1. Review and update README.md with your project description")?;
        output.print("  2. Update package descriptions in each pyproject.toml")?;
        output.print("  3. Update the LICENSE file if using a different license")?;
        output.print("  4. Run: uv sync")?;
        output.print("  5. Start developing!")?;
    }

    Ok(())
}

// ── tests ─────────────────────────────────────────────────────────────────────
