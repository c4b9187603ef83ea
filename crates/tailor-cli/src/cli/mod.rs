//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "tailor",
    bin_name = "tailor",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{2702} Turn the monorepo template into your project",
    long_about = "Tailor rewrites the placeholder names of a uv-workspace \
                  monorepo template (project, author, package names) across \
                  every file, renames the package and module directories, \
                  and adds new packages to the workspace.",
    after_help = "EXAMPLES:\n\
        \x20 tailor setup\n\
        \x20 tailor setup --project-name widgets --library widgets-core --yes\n\
        \x20 tailor setup --dry-run --output-format json\n\
        \x20 tailor add-package reports -d \"Report utilities\"",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Customize the template in place.
    #[command(
        about = "Customize the template checkout",
        after_help = "EXAMPLES:\n\
            \x20 tailor setup                                  # interactive\n\
            \x20 tailor setup --project-name widgets --yes     # defaults for the rest\n\
            \x20 tailor setup --root ../checkout --dry-run"
    )]
    Setup(SetupArgs),

    /// Add a new package to the workspace.
    #[command(
        visible_alias = "add",
        about = "Add a new package",
        after_help = "EXAMPLES:\n\
            \x20 tailor add-package my-new-package\n\
            \x20 tailor add-package my-new-package -d \"My package description\""
    )]
    AddPackage(AddPackageArgs),

    /// Initialise a Tailor configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 tailor init           # default location\n\
            \x20 tailor init --global  # global config\n\
            \x20 tailor init --local   # .tailor.toml in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 tailor completions bash > ~/.local/share/bash-completion/completions/tailor\n\
            \x20 tailor completions zsh  > ~/.zfunc/_tailor\n\
            \x20 tailor completions fish > ~/.config/fish/completions/tailor.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the Tailor configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 tailor config get defaults.author_name\n\
            \x20 tailor config set defaults.author_name \"Ada Lovelace\"\n\
            \x20 tailor config list"
    )]
    Config(ConfigCommands),
}

// ── setup ─────────────────────────────────────────────────────────────────────

/// Arguments for `tailor setup`.
///
/// Every answer can be given as a flag; anything left out is prompted for
/// (or taken from the configured default with `--yes`).
#[derive(Debug, Args)]
pub struct SetupArgs {
    /// Root of the template checkout.
    #[arg(
        long = "root",
        value_name = "DIR",
        default_value = ".",
        help = "Template checkout to customize"
    )]
    pub root: PathBuf,

    #[arg(long = "project-name", value_name = "NAME", help = "Project name")]
    pub project_name: Option<String>,

    #[arg(long = "author-name", value_name = "NAME", help = "Author name")]
    pub author_name: Option<String>,

    #[arg(long = "author-email", value_name = "EMAIL", help = "Author email")]
    pub author_email: Option<String>,

    #[arg(long = "library", value_name = "NAME", help = "Library package name")]
    pub library: Option<String>,

    #[arg(long = "app", value_name = "NAME", help = "App package name")]
    pub app: Option<String>,

    #[arg(long = "cli", value_name = "NAME", help = "CLI package name")]
    pub cli: Option<String>,

    /// Take flags and defaults without prompting.
    #[arg(short = 'y', long = "yes", help = "Do not prompt; use flags and defaults")]
    pub yes: bool,

    /// Report what would change without touching the tree.
    #[arg(long = "dry-run", help = "Show what would change without changing it")]
    pub dry_run: bool,
}

// ── add-package ───────────────────────────────────────────────────────────────

/// Arguments for `tailor add-package`.
#[derive(Debug, Args)]
pub struct AddPackageArgs {
    /// Name of the new package (e.g. `my-new-package`).
    #[arg(value_name = "NAME", help = "Name of the new package")]
    pub name: String,

    #[arg(
        short = 'd',
        long = "description",
        value_name = "TEXT",
        help = "Description of the package"
    )]
    pub description: Option<String>,

    #[arg(
        long = "root",
        value_name = "DIR",
        default_value = ".",
        help = "Workspace root"
    )]
    pub root: PathBuf,

    /// Write the skeleton over an existing package directory.
    #[arg(long = "force", help = "Overwrite an existing package directory")]
    pub force: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `tailor init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to the global config location.
    #[arg(long = "global", conflicts_with = "local", help = "Create global configuration")]
    pub global: bool,

    /// Write to `.tailor.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `tailor completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `tailor config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.author_name`.
        key: String,
    },
    /// Set a configuration key to a value.
    Set {
        /// Dotted key path.
        key: String,
        /// New value. Lists take comma-separated items.
        value: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
