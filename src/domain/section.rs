//! Dependency sections of a package.json manifest

use serde::{Deserialize, Serialize};
use std::fmt;

/// A dependency section the updater rewrites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DependencySection {
    /// `dependencies`
    Dependencies,
    /// `devDependencies`
    DevDependencies,
}

impl DependencySection {
    /// Returns all sections in install order
    pub fn all() -> &'static [DependencySection] {
        &[
            DependencySection::Dependencies,
            DependencySection::DevDependencies,
        ]
    }

    /// Returns the JSON key of this section
    pub fn key(&self) -> &'static str {
        match self {
            DependencySection::Dependencies => "dependencies",
            DependencySection::DevDependencies => "devDependencies",
        }
    }

    /// Returns the flag telling the package manager where to record installs
    pub fn save_flag(&self) -> &'static str {
        match self {
            DependencySection::Dependencies => "--save",
            DependencySection::DevDependencies => "--save-dev",
        }
    }
}

impl fmt::Display for DependencySection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}
