//! Outdated-version sources
//!
//! This module provides:
//! - The `OutdatedSource` seam queried once per update run
//! - `npm outdated --json` through the process runner
//! - npm registry lookups over HTTP
//! - JSON files in the `npm outdated --json` shape
//! - Fixed in-memory data

mod client;
mod file;
mod npm;
mod registry;

#[cfg(test)]
mod test_registry;

pub use client::HttpClient;
pub use file::FileOutdatedSource;
pub use npm::NpmOutdatedSource;
pub use registry::{RegistryOutdatedSource, NPM_REGISTRY_URL};

use crate::domain::{DependencyMap, OutdatedEntry, OutdatedInfo};
use crate::error::OutdatedError;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Trait for sources of latest-version data
#[async_trait]
pub trait OutdatedSource: Send + Sync {
    /// Short name used in log messages
    fn name(&self) -> &'static str;

    /// Report the latest known version for outdated packages.
    ///
    /// `declared` holds every dependency of the manifest with its current
    /// specifier. Packages missing from the result are considered current.
    async fn outdated(&self, declared: &DependencyMap) -> Result<OutdatedInfo, OutdatedError>;
}

/// Source returning fixed data
#[derive(Debug, Clone, Default)]
pub struct StaticOutdatedSource {
    info: OutdatedInfo,
}

impl StaticOutdatedSource {
    /// Create a source that always returns `info`
    pub fn new(info: OutdatedInfo) -> Self {
        Self { info }
    }
}

#[async_trait]
impl OutdatedSource for StaticOutdatedSource {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn outdated(&self, _declared: &DependencyMap) -> Result<OutdatedInfo, OutdatedError> {
        Ok(self.info.clone())
    }
}

/// Parse `npm outdated --json` output.
///
/// Accepts an empty document, entries that are arrays (one per workspace
/// location; the first wins) and skips entries without a `latest` field.
/// An npm error payload becomes [`OutdatedError::CommandFailed`].
pub fn parse_outdated_json(origin: &str, text: &str) -> Result<OutdatedInfo, OutdatedError> {
    if text.trim().is_empty() {
        return Ok(OutdatedInfo::new());
    }

    let value: Value = serde_json::from_str(text)
        .map_err(|e| OutdatedError::invalid_response(origin, e.to_string()))?;
    let Value::Object(entries) = value else {
        return Err(OutdatedError::invalid_response(
            origin,
            "expected a JSON object",
        ));
    };

    if let Some(message) = npm_error_message(&entries) {
        return Err(OutdatedError::command_failed(origin, message));
    }

    let mut info = OutdatedInfo::new();
    for (name, entry) in entries {
        let entry = match entry {
            Value::Array(mut locations) if !locations.is_empty() => locations.swap_remove(0),
            other => other,
        };
        if entry.get("latest").and_then(Value::as_str).is_none() {
            continue;
        }
        let entry: OutdatedEntry = serde_json::from_value(entry)
            .map_err(|e| OutdatedError::invalid_response(origin, format!("{}: {}", name, e)))?;
        info.insert(name, entry);
    }
    Ok(info)
}

fn npm_error_message(entries: &Map<String, Value>) -> Option<String> {
    let error = entries.get("error")?.as_object()?;
    if error.contains_key("latest") {
        return None;
    }

    let code = error.get("code").and_then(Value::as_str).unwrap_or("unknown");
    let summary = error
        .get("summary")
        .and_then(Value::as_str)
        .unwrap_or_default();
    Some(format!("{} {}", code, summary).trim().to_string())
}
