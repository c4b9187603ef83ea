//! The user's answers for a template customization run, and everything
//! derived from them: the replacement map and the package renames.

use serde::Serialize;

use super::{rename::PackageRename, replacement::ReplacementMap};
use crate::domain::{DomainError, PackageName};

/// Placeholders the template ships with.
pub mod placeholders {
    pub const PROJECT_NAME: &str = "python-monorepo";
    pub const PROJECT_DESCRIPTION: &str = "A Python monorepo using uv workspaces";
    pub const AUTHOR_NAME: &str = "Developer";
    pub const AUTHOR_EMAIL: &str = "dev@example.com";
    pub const LIBRARY: &str = "my-library";
    pub const APP: &str = "my-app";
    pub const CLI: &str = "my-cli";
}

/// Defaults offered at the prompts.
pub mod defaults {
    pub const PROJECT_NAME: &str = "my-project";
    pub const AUTHOR_NAME: &str = super::placeholders::AUTHOR_NAME;
    pub const AUTHOR_EMAIL: &str = super::placeholders::AUTHOR_EMAIL;
}

/// Answers collected for one run. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Customization {
    pub project_name: String,
    pub author_name: String,
    pub author_email: String,
    pub library: PackageName,
    pub app: PackageName,
    pub cli: PackageName,
}

impl Customization {
    pub fn builder() -> CustomizationBuilder {
        CustomizationBuilder::default()
    }

    /// The three template packages paired with their chosen names, in the
    /// order library, app, cli.
    pub fn package_renames(&self) -> Vec<PackageRename> {
        [
            (placeholders::LIBRARY, &self.library),
            (placeholders::APP, &self.app),
            (placeholders::CLI, &self.cli),
        ]
        .into_iter()
        .map(|(from, to)| PackageRename::new(PackageName(from.to_owned()), to.clone()))
        .collect()
    }

    /// Build the ordered replacement map.
    ///
    /// Hyphenated package names come before their module spelling, package
    /// tokens before the project name, and the project description last.
    pub fn replacement_map(&self) -> Result<ReplacementMap, DomainError> {
        let mut map = ReplacementMap::new();

        for rename in self.package_renames() {
            map.insert(rename.from.as_str(), rename.to.as_str())?;
            map.insert(rename.from.module_name(), rename.to.module_name())?;
        }

        map.insert(placeholders::PROJECT_NAME, &self.project_name)?;
        map.insert(placeholders::AUTHOR_NAME, &self.author_name)?;
        map.insert(placeholders::AUTHOR_EMAIL, &self.author_email)?;
        map.insert(
            placeholders::PROJECT_DESCRIPTION,
            format!("{} - Python monorepo with uv", self.project_name),
        )?;

        Ok(map)
    }
}

impl Default for Customization {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Builder for [`Customization`]; unset fields take the prompt defaults.
#[derive(Debug, Clone, Default)]
pub struct CustomizationBuilder {
    project_name: Option<String>,
    author_name: Option<String>,
    author_email: Option<String>,
    library: Option<PackageName>,
    app: Option<PackageName>,
    cli: Option<PackageName>,
}

impl CustomizationBuilder {
    pub fn project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = Some(name.into());
        self
    }

    pub fn author_name(mut self, name: impl Into<String>) -> Self {
        self.author_name = Some(name.into());
        self
    }

    pub fn author_email(mut self, email: impl Into<String>) -> Self {
        self.author_email = Some(email.into());
        self
    }

    pub fn library(mut self, name: impl Into<String>) -> Result<Self, DomainError> {
        self.library = Some(PackageName::parse(name)?);
        Ok(self)
    }

    pub fn app(mut self, name: impl Into<String>) -> Result<Self, DomainError> {
        self.app = Some(PackageName::parse(name)?);
        Ok(self)
    }

    pub fn cli(mut self, name: impl Into<String>) -> Result<Self, DomainError> {
        self.cli = Some(PackageName::parse(name)?);
        Ok(self)
    }

    pub fn build(self) -> Customization {
        let placeholder = |raw: &str| PackageName(raw.to_owned());

        Customization {
            project_name: non_blank(self.project_name, defaults::PROJECT_NAME),
            author_name: non_blank(self.author_name, defaults::AUTHOR_NAME),
            author_email: non_blank(self.author_email, defaults::AUTHOR_EMAIL),
            library: self
                .library
                .unwrap_or_else(|| placeholder(placeholders::LIBRARY)),
            app: self.app.unwrap_or_else(|| placeholder(placeholders::APP)),
            cli: self.cli.unwrap_or_else(|| placeholder(placeholders::CLI)),
        }
    }
}

fn non_blank(value: Option<String>, default: &str) -> String {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_prompts() {
        let c = Customization::default();
        assert_eq!(c.project_name, "my-project");
        assert_eq!(c.author_name, "Developer");
        assert_eq!(c.author_email, "dev@example.com");
        assert_eq!(c.library.as_str(), "my-library");
    }

    #[test]
    fn blank_answers_fall_back_to_defaults() {
        let c = Customization::builder()
            .project_name("   ")
            .author_name("")
            .build();
        assert_eq!(c.project_name, "my-project");
        assert_eq!(c.author_name, "Developer");
    }

    #[test]
    fn replacement_map_order_is_fixed() {
        let c = Customization::builder()
            .project_name("widgets")
            .library("widgets-core")
            .unwrap()
            .build();
        let map = c.replacement_map().unwrap();
        let tokens: Vec<_> = map.entries().iter().map(|e| e.token.as_str()).collect();
        assert_eq!(
            tokens,
            [
                "my-library",
                "my_library",
                "my-app",
                "my_app",
                "my-cli",
                "my_cli",
                "python-monorepo",
                "Developer",
                "dev@example.com",
                "A Python monorepo using uv workspaces",
            ]
        );
    }

    #[test]
    fn replacement_map_rewrites_modules_and_description() {
        let c = Customization::builder()
            .project_name("widgets")
            .library("widgets-core")
            .unwrap()
            .build();
        let map = c.replacement_map().unwrap();

        assert_eq!(
            map.apply("from my_library import add"),
            "from widgets_core import add"
        );
        assert_eq!(
            map.apply("description = \"A Python monorepo using uv workspaces\""),
            "description = \"widgets - Python monorepo with uv\""
        );
    }

    #[test]
    fn invalid_package_name_is_rejected() {
        assert!(Customization::builder().app("bad name").is_err());
    }

    #[test]
    fn package_renames_cover_all_three_packages() {
        let renames = Customization::default().package_renames();
        assert_eq!(renames.len(), 3);
        assert!(renames.iter().all(|r| !r.renames_package()));
    }
}
