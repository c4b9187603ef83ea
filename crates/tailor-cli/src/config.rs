//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only receives the
//! [`CustomizeSettings`] and [`WorkspaceLayout`] derived from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables, `TAILOR__SECTION__KEY`
//! 3. `--config FILE`, or else `./.tailor.toml` over the global file
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tailor_core::{
    application::{CustomizeSettings, services::DEFAULT_CLEANUP_FILES},
    domain::{SkipRules, WorkspaceLayout, defaults, placeholders},
};

/// File name of the per-checkout configuration.
pub const LOCAL_CONFIG_FILE: &str = ".tailor.toml";

const ENV_PREFIX: &str = "TAILOR";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Defaults offered at the setup prompts.
    pub defaults: Defaults,
    /// Where things live inside the workspace.
    pub layout: WorkspaceLayout,
    /// Files the substitution pass leaves alone.
    pub skip: SkipConfig,
    /// Template-only files removed at the end of setup.
    pub cleanup: CleanupConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Defaults {
    pub project_name: String,
    pub author_name: String,
    pub author_email: String,
    pub library: String,
    pub app: String,
    pub cli: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkipConfig {
    /// Path segments; any file with a matching segment is skipped.
    pub segments: Vec<String>,
    /// File extensions, without the dot.
    pub extensions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanupConfig {
    pub files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let skip = SkipRules::default();
        Self {
            defaults: Defaults {
                project_name: defaults::PROJECT_NAME.into(),
                author_name: defaults::AUTHOR_NAME.into(),
                author_email: defaults::AUTHOR_EMAIL.into(),
                library: placeholders::LIBRARY.into(),
                app: placeholders::APP.into(),
                cli: placeholders::CLI.into(),
            },
            layout: WorkspaceLayout::default(),
            skip: SkipConfig {
                segments: skip.segments.into_iter().collect(),
                extensions: skip.extensions.into_iter().collect(),
            },
            cleanup: CleanupConfig {
                files: DEFAULT_CLEANUP_FILES.iter().map(|f| f.to_string()).collect(),
            },
            output: OutputConfig {
                no_color: false,
                format: "auto".into(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then file(s), then environment.
    ///
    /// An explicit `config_file` must exist; the implicit locations are
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("Failed to build default configuration")?;

        let mut builder = Config::builder().add_source(defaults);

        match config_file {
            Some(path) => {
                builder = builder.add_source(File::from(path.as_path()).required(true));
            }
            None => {
                if let Some(global) = Self::global_config_path() {
                    builder = builder.add_source(File::from(global).required(false));
                }
                builder = builder.add_source(File::from(Path::new(LOCAL_CONFIG_FILE)).required(false));
            }
        }

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("skip.segments")
                    .with_list_parse_key("skip.extensions")
                    .with_list_parse_key("cleanup.files"),
            )
            .build()
            .context("Failed to read configuration")?;

        config
            .try_deserialize()
            .context("Configuration has invalid values")
    }

    /// Path to the global configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.tailor.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        Self::global_config_path().unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// The file currently in effect: the explicit one, else the local file if
    /// present, else the global path (which may not exist yet).
    pub fn active_path(explicit: Option<&PathBuf>) -> PathBuf {
        if let Some(path) = explicit {
            return path.clone();
        }
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return local;
        }
        Self::config_path()
    }

    /// Engine settings for a customization run.
    pub fn customize_settings(&self) -> CustomizeSettings {
        let skip = self
            .skip
            .segments
            .iter()
            .fold(SkipRules::empty(), |rules, s| rules.with_segment(s.as_str()));
        let skip = self
            .skip
            .extensions
            .iter()
            .fold(skip, |rules, e| rules.with_extension(e));

        CustomizeSettings {
            layout: self.layout.clone(),
            skip,
            cleanup: self.cleanup.files.clone(),
        }
    }

    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "tailor", "tailor")
            .map(|d| d.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_template_placeholders() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.defaults.project_name, "my-project");
        assert_eq!(cfg.defaults.library, "my-library");
        assert_eq!(cfg.layout.manifest, "pyproject.toml");
        assert_eq!(cfg.cleanup.files, ["TEMPLATE.md", "setup_template.py"]);
    }

    #[test]
    fn default_no_color_is_false() {
        assert!(!AppConfig::default().output.no_color);
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tailor.toml");
        std::fs::write(
            &path,
            "[defaults]\nauthor_name = \"Ada\"\n\n[skip]\nextensions = [\"svg\"]\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.defaults.author_name, "Ada");
        assert_eq!(cfg.defaults.author_email, "dev@example.com");
        assert_eq!(cfg.skip.extensions, ["svg"]);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(AppConfig::load(Some(&dir.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn settings_carry_skip_rules() {
        let settings = AppConfig::default().customize_settings();
        assert_eq!(settings.skip, SkipRules::default());
        assert_eq!(settings.layout, WorkspaceLayout::default());
    }

    #[test]
    fn config_path_is_not_empty() {
        let p = AppConfig::config_path();
        assert!(!p.as_os_str().is_empty());
    }
}
