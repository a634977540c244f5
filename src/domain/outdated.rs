//! Outdated-version data as reported by `npm outdated --json`

use crate::domain::version::LINKED;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Latest known version of a single package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutdatedEntry {
    /// Newest version known to the registry, or `"linked"`
    pub latest: String,
    /// Currently installed version, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<String>,
    /// Newest version satisfying the declared range, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wanted: Option<String>,
}

impl OutdatedEntry {
    /// Creates an entry carrying only the latest version
    pub fn new(latest: impl Into<String>) -> Self {
        Self {
            latest: latest.into(),
            current: None,
            wanted: None,
        }
    }

    /// Creates an entry for a locally linked package
    pub fn linked() -> Self {
        Self::new(LINKED)
    }

    /// Returns true if the package is linked locally
    pub fn is_linked(&self) -> bool {
        self.latest == LINKED
    }
}

/// Lookup of latest versions by package name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutdatedInfo {
    entries: BTreeMap<String, OutdatedEntry>,
}

impl OutdatedInfo {
    /// Creates an empty lookup
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an entry
    pub fn insert(&mut self, name: impl Into<String>, entry: OutdatedEntry) {
        self.entries.insert(name.into(), entry);
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, entry: OutdatedEntry) -> Self {
        self.insert(name, entry);
        self
    }

    /// Returns the entry for a package
    pub fn get(&self, name: &str) -> Option<&OutdatedEntry> {
        self.entries.get(name)
    }

    /// Returns the number of known packages
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is known
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in name order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &OutdatedEntry)> {
        self.entries.iter()
    }
}

impl FromIterator<(String, OutdatedEntry)> for OutdatedInfo {
    fn from_iter<I: IntoIterator<Item = (String, OutdatedEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
