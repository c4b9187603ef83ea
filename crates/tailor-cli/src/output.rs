//! Output management and formatting.

use std::cell::Cell;
use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;
use tailor_core::{
    application::ports::RunObserver,
    domain::{FileRecord, Outcome, RenameRecord},
};
use tracing::warn;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let requested = if args.output_format == OutputFormat::Auto {
            match config.output.format.as_str() {
                "json" => OutputFormat::Json,
                "plain" => OutputFormat::Plain,
                "human" => OutputFormat::Human,
                _ => OutputFormat::Auto,
            }
        } else {
            args.output_format
        };

        // Resolve Auto → Human (TTY) or Plain (piped/redirected).
        let resolved_format = if requested == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            requested
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet and JSON modes.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.is_silent() {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.is_silent() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}") // ✓
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Error indicator: `✗ <msg>`.  *Not* suppressed in quiet mode; errors
    /// must always be visible.
    pub fn error(&self, msg: &str) -> io::Result<()> {
        if self.is_json() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2717} {msg}") // ✗
        } else {
            format!("{} {}", "\u{2717}".red().bold(), msg.red())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.is_silent() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}") // ⚠
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.is_silent() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}") // ℹ
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.is_silent() {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// Pretty JSON document on stdout. Only emitted in JSON mode.
    pub fn json<T: Serialize>(&self, value: &T) -> io::Result<()> {
        if !self.is_json() {
            return Ok(());
        }
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` if the only stdout output is the final JSON document.
    pub fn is_json(&self) -> bool {
        self.resolved_format == OutputFormat::Json
    }

    fn is_silent(&self) -> bool {
        self.quiet || self.is_json()
    }
}

// ── Transcript ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    Files,
    Renames,
    Cleanup,
}

/// Streams one line per outcome while a customization runs.
///
/// Silent skips and missing rename sources are not printed. A blank line and
/// a heading separate the passes.
pub struct Transcript<'a> {
    output: &'a OutputManager,
    pass: Cell<Pass>,
}

impl<'a> Transcript<'a> {
    pub fn new(output: &'a OutputManager) -> Self {
        Self {
            output,
            pass: Cell::new(Pass::Files),
        }
    }

    fn enter(&self, pass: Pass, heading: &str) {
        if self.pass.replace(pass) == pass {
            return;
        }
        if let Err(e) = self.output.print("").and_then(|()| self.output.header(heading)) {
            warn!(error = %e, "Failed to write transcript heading");
        }
    }

    fn emit(&self, subject: &str, outcome: &Outcome) {
        if !outcome.is_reportable() {
            return;
        }
        let result = match outcome {
            Outcome::Failed(reason) => self.output.error(&format!("{subject}: {reason}")),
            Outcome::SkippedBinary => self.output.success(&format!("{subject} (binary, left as is)")),
            Outcome::Unchanged => self.output.success(subject),
            other => self.output.success(&format!("{subject} ({other})")),
        };
        if let Err(e) = result {
            warn!(error = %e, "Failed to write transcript line");
        }
    }
}

impl RunObserver for Transcript<'_> {
    fn on_file(&self, record: &FileRecord) {
        self.emit(&record.path.to_string(), &record.outcome);
    }

    fn on_rename(&self, record: &RenameRecord) {
        if !record.outcome.is_reportable() {
            return;
        }
        self.enter(Pass::Renames, "Renaming directories:");
        self.emit(
            &format!("{} \u{2192} {}", record.from, record.to),
            &record.outcome,
        );
    }

    fn on_cleanup(&self, record: &FileRecord) {
        if !record.outcome.is_reportable() {
            return;
        }
        self.enter(Pass::Cleanup, "Cleaning up template files:");
        self.emit(&format!("Removed {}", record.path), &record.outcome);
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
