//! Ordered literal token replacement.
//!
//! A [`ReplacementMap`] is applied entry by entry, in insertion order, with
//! plain substring replacement (no regex). Order matters whenever one token
//! is a substring of another token or of an earlier replacement, so the map
//! is never re-sorted.

use serde::Serialize;

use crate::domain::DomainError;

/// One `token → replacement` association.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Replacement {
    pub token: String,
    pub replacement: String,
}

impl Replacement {
    pub fn is_noop(&self) -> bool {
        self.token == self.replacement
    }
}

/// Ordered token → replacement associations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReplacementMap {
    entries: Vec<Replacement>,
}

impl ReplacementMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Later entries see the output of earlier ones.
    ///
    /// A token that is already present keeps its original position and takes
    /// the new replacement.
    pub fn insert(
        &mut self,
        token: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Result<(), DomainError> {
        let token = token.into();
        if token.is_empty() {
            return Err(DomainError::EmptyToken);
        }
        let replacement = replacement.into();

        match self.entries.iter_mut().find(|e| e.token == token) {
            Some(existing) => existing.replacement = replacement,
            None => self.entries.push(Replacement { token, replacement }),
        }
        Ok(())
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(
        mut self,
        token: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Result<Self, DomainError> {
        self.insert(token, replacement)?;
        Ok(self)
    }

    pub fn entries(&self) -> &[Replacement] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply every entry in order, replacing all occurrences of each token.
    pub fn apply(&self, content: &str) -> String {
        self.entries
            .iter()
            .filter(|e| !e.is_noop())
            .fold(content.to_owned(), |acc, e| {
                if acc.contains(e.token.as_str()) {
                    acc.replace(e.token.as_str(), &e.replacement)
                } else {
                    acc
                }
            })
    }

    /// Tokens whose replacement text still contains some token of the map.
    ///
    /// When this is non-empty a second run can rewrite the tree again, so
    /// the substitution pass is no longer idempotent.
    pub fn reentrant_tokens(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| !e.is_noop())
            .filter(|e| {
                self.entries
                    .iter()
                    .filter(|other| !other.is_noop())
                    .any(|other| e.replacement.contains(other.token.as_str()))
            })
            .map(|e| e.token.as_str())
            .collect()
    }
}

impl<'a> IntoIterator for &'a ReplacementMap {
    type Item = &'a Replacement;
    type IntoIter = std::slice::Iter<'a, Replacement>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
