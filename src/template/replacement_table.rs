//! Ordered find/replace table for a single render.

use std::collections::HashMap;

/// Ordered `(token, replacement)` pairs, where a token is the literal `%name%` string.
///
/// Tokens are unique: inserting a token that is already present replaces its
/// replacement in place and keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplacementTable {
    entries: Vec<(String, String)>,
}

impl ReplacementTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Register `token` (already wrapped in `%`) with its replacement
    pub fn insert(&mut self, token: impl Into<String>, replacement: impl Into<String>) {
        let token = token.into();
        let replacement = replacement.into();

        match self.entries.iter_mut().find(|(existing, _)| *existing == token) {
            Some(entry) => entry.1 = replacement,
            None => self.entries.push((token, replacement)),
        }
    }

    /// Add every entry of `other`, letting its replacements win on shared tokens
    pub fn extend(&mut self, other: ReplacementTable) {
        for (token, replacement) in other.entries {
            self.insert(token, replacement);
        }
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == token)
            .map(|(_, replacement)| replacement.as_str())
    }

    pub fn contains(&self, token: &str) -> bool {
        self.get(token).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(token, replacement)| (token.as_str(), replacement.as_str()))
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(token, _)| token.as_str())
    }

    /// Exact-token lookup map used by the engine's scan
    pub(crate) fn lookup(&self) -> HashMap<&str, &str> {
        self.iter().collect()
    }
}

impl<T: Into<String>, R: Into<String>> FromIterator<(T, R)> for ReplacementTable {
    fn from_iter<I: IntoIterator<Item = (T, R)>>(iter: I) -> Self {
        let mut table = ReplacementTable::new();
        for (token, replacement) in iter {
            table.insert(token, replacement);
        }
        table
    }
}

impl IntoIterator for ReplacementTable {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
