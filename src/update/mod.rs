//! Update selection for dependency sections
//!
//! This module decides which declared dependencies get rewritten to the
//! wildcard so the next install pulls the latest version.

use crate::domain::version::{self, WILDCARD};
use crate::domain::{DependencyMap, DependencySection, OutdatedInfo};
use crate::manifest::Manifest;

/// Decide which packages of `modules` should request the latest version.
///
/// Every returned name maps to `*`. Prerelease specifiers are never
/// selected. Packages known to `outdated` are selected when their major
/// does not exceed the latest major, or when they are linked. Unknown
/// packages are selected only if they already use `*`. Git and path
/// references are dropped afterwards whatever the outcome above.
pub fn select_updatable(modules: &DependencyMap, outdated: &OutdatedInfo) -> DependencyMap {
    modules
        .iter()
        .filter(|(name, spec)| is_candidate(name, spec, outdated))
        .filter(|(_, spec)| !version::is_non_registry(spec))
        .map(|(name, _)| (name.clone(), WILDCARD.to_string()))
        .collect()
}

fn is_candidate(name: &str, spec: &str, outdated: &OutdatedInfo) -> bool {
    if version::is_prerelease(spec) {
        return false;
    }

    if let Some(entry) = outdated.get(name) {
        // `<=` keeps packages on the same major; they are re-pinned too
        if version::major_version(spec) <= version::major_version(&entry.latest) {
            return true;
        }
        if entry.is_linked() {
            return true;
        }
    }

    version::is_wildcard(spec)
}

/// Names to pass explicitly to the install command.
///
/// Scoped packages (`@scope/name`) are left to the final plain install.
pub fn install_names(selection: &DependencyMap) -> Vec<String> {
    selection
        .keys()
        .filter(|name| !name.starts_with('@'))
        .cloned()
        .collect()
}

/// Packages reported as outdated whose declared specifier is a prerelease.
///
/// Returns `(name, declared, latest)` in name order. These are never
/// rewritten, so the caller can tell the user why.
pub fn skipped_prereleases(
    modules: &DependencyMap,
    outdated: &OutdatedInfo,
) -> Vec<(String, String, String)> {
    outdated
        .iter()
        .filter_map(|(name, entry)| {
            let spec = modules.get(name)?;
            version::is_prerelease(spec)
                .then(|| (name.clone(), spec.clone(), entry.latest.clone()))
        })
        .collect()
}

/// Selected rewrites for both dependency sections
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdatePlan {
    /// Selection for `dependencies`
    pub dependencies: DependencyMap,
    /// Selection for `devDependencies`
    pub dev_dependencies: DependencyMap,
}

impl UpdatePlan {
    /// Build a plan by running the selection on each section of a manifest
    pub fn from_manifest(manifest: &Manifest, outdated: &OutdatedInfo) -> Self {
        let mut plan = Self::default();
        for section in DependencySection::all() {
            *plan.section_mut(*section) =
                select_updatable(&manifest.dependencies(*section), outdated);
        }
        plan
    }

    /// Selection for a section
    pub fn section(&self, section: DependencySection) -> &DependencyMap {
        match section {
            DependencySection::Dependencies => &self.dependencies,
            DependencySection::DevDependencies => &self.dev_dependencies,
        }
    }

    fn section_mut(&mut self, section: DependencySection) -> &mut DependencyMap {
        match section {
            DependencySection::Dependencies => &mut self.dependencies,
            DependencySection::DevDependencies => &mut self.dev_dependencies,
        }
    }

    /// Total number of rewritten entries
    pub fn total(&self) -> usize {
        self.dependencies.len() + self.dev_dependencies.len()
    }

    /// Returns true if nothing is rewritten
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Merge the selections into the manifest
    pub fn apply(&self, manifest: &mut Manifest) {
        for section in DependencySection::all() {
            manifest.set_versions(*section, self.section(*section));
        }
    }
}
