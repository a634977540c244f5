//! npm registry source
//!
//! Looks up `dist-tags.latest` for every declared package.
//! API endpoint: https://registry.npmjs.org/{package}

use crate::domain::version;
use crate::domain::{DependencyMap, OutdatedEntry, OutdatedInfo};
use crate::error::{OutdatedError, RegistryError};
use crate::outdated::{HttpClient, OutdatedSource};
use async_trait::async_trait;
use semver::Version;
use serde::Deserialize;
use std::collections::HashMap;

/// npm registry base URL
pub const NPM_REGISTRY_URL: &str = "https://registry.npmjs.org";

const REGISTRY_NAME: &str = "npm";

/// npm package metadata response
#[derive(Debug, Deserialize)]
struct NpmPackageResponse {
    #[serde(rename = "dist-tags", default)]
    dist_tags: HashMap<String, String>,
}

/// Queries the npm registry directly, one package at a time
pub struct RegistryOutdatedSource {
    client: HttpClient,
    base_url: String,
}

impl RegistryOutdatedSource {
    /// Create a source using the public npm registry
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, NPM_REGISTRY_URL)
    }

    /// Create a source using a custom registry
    pub fn with_base_url(client: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Build the URL for a package
    fn build_url(&self, package: &str) -> String {
        // Scoped names keep their `@` but the separator must be escaped
        let encoded = if package.starts_with('@') {
            package.replacen('/', "%2f", 1)
        } else {
            package.to_string()
        };
        format!("{}/{}", self.base_url, encoded)
    }

    async fn fetch_latest(&self, package: &str) -> Result<Option<String>, RegistryError> {
        let url = self.build_url(package);
        let response: NpmPackageResponse =
            self.client.get_json(&url, package, REGISTRY_NAME).await?;
        Ok(response.dist_tags.get("latest").cloned())
    }
}

/// Returns true if a declared specifier lags behind `latest`.
///
/// Specifiers whose base version cannot be read are reported as behind.
pub fn is_behind(spec: &str, latest: &str) -> bool {
    let Ok(latest) = Version::parse(latest) else {
        return true;
    };
    match Version::parse(version::base_version(spec)) {
        Ok(current) => current < latest,
        Err(_) => true,
    }
}

#[async_trait]
impl OutdatedSource for RegistryOutdatedSource {
    fn name(&self) -> &'static str {
        "npm registry"
    }

    async fn outdated(&self, declared: &DependencyMap) -> Result<OutdatedInfo, OutdatedError> {
        let mut info = OutdatedInfo::new();

        for (name, spec) in declared {
            if version::is_non_registry(spec) || version::is_wildcard(spec) {
                continue;
            }

            let latest = match self.fetch_latest(name).await {
                Ok(Some(latest)) => latest,
                // Private or unpublished packages have nothing to report
                Ok(None) | Err(RegistryError::PackageNotFound { .. }) => continue,
                Err(e) => return Err(e.into()),
            };

            if is_behind(spec, &latest) {
                info.insert(name.clone(), OutdatedEntry::new(latest));
            }
        }

        Ok(info)
    }
}
