//! Value objects: small, validated, immutable domain types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::DomainError;

// ============================================================================
// PackageName
// ============================================================================

/// The distribution name of a workspace package, e.g. `my-library`.
///
/// Invariant: non-empty, ASCII alphanumerics plus `-` and `_`, first
/// character alphanumeric. Enforced at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PackageName(pub(crate) String);

impl PackageName {
    /// Validate and wrap a package name.
    pub fn parse(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let invalid = |reason: &str| DomainError::InvalidPackageName {
            name: name.clone(),
            reason: reason.into(),
        };

        let Some(first) = name.chars().next() else {
            return Err(invalid("name cannot be empty"));
        };
        if !first.is_ascii_alphanumeric() {
            return Err(invalid("name must start with a letter or digit"));
        }
        if let Some(bad) = name
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(invalid(&format!("character '{bad}' is not allowed")));
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The importable module name: hyphens become underscores.
    ///
    /// `my-library` → `my_library`
    pub fn module_name(&self) -> String {
        self.0.replace('-', "_")
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PackageName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PackageName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<PackageName> for String {
    fn from(name: PackageName) -> Self {
        name.0
    }
}

impl AsRef<str> for PackageName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// RunMode
// ============================================================================

/// Whether a pass touches the filesystem or only reports what it would do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunMode {
    #[default]
    Apply,
    DryRun,
}

impl RunMode {
    pub fn is_dry_run(self) -> bool {
        matches!(self, Self::DryRun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_name_replaces_hyphens() {
        let name = PackageName::parse("widgets-core").unwrap();
        assert_eq!(name.module_name(), "widgets_core");
    }

    #[test]
    fn module_name_of_snake_case_is_unchanged() {
        let name = PackageName::parse("my_app").unwrap();
        assert_eq!(name.module_name(), "my_app");
    }

    #[test]
    fn empty_name_is_rejected() {
        assert!(matches!(
            PackageName::parse(""),
            Err(DomainError::InvalidPackageName { .. })
        ));
    }

    #[test]
    fn leading_punctuation_is_rejected() {
        assert!(PackageName::parse("-lib").is_err());
        assert!(PackageName::parse(".hidden").is_err());
    }

    #[test]
    fn path_separators_are_rejected() {
        assert!(PackageName::parse("a/b").is_err());
        assert!(PackageName::parse("a\\b").is_err());
        assert!(PackageName::parse("a b").is_err());
    }

    #[test]
    fn valid_names_pass() {
        for name in ["my-library", "reports", "widgets_core", "lib2", "9lives"] {
            assert!(PackageName::parse(name).is_ok(), "failed for: {name}");
        }
    }

    #[test]
    fn from_str_round_trips_display() {
        let name: PackageName = "my-cli".parse().unwrap();
        assert_eq!(name.to_string(), "my-cli");
    }
}
