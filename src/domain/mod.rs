//! Core domain models for pkgup
//!
//! - Dependency sections of a manifest
//! - Version specifier heuristics
//! - Outdated-version lookup data

mod outdated;
mod section;
pub mod version;

pub use outdated::{OutdatedEntry, OutdatedInfo};
pub use section::DependencySection;

use std::collections::BTreeMap;

/// Package name to version specifier, in name order
pub type DependencyMap = BTreeMap<String, String>;
