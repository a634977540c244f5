//! Outdated data read from a JSON file

use crate::domain::{DependencyMap, OutdatedInfo};
use crate::error::OutdatedError;
use crate::outdated::{parse_outdated_json, OutdatedSource};
use async_trait::async_trait;
use std::path::PathBuf;

/// Reads a saved `npm outdated --json` document
#[derive(Debug, Clone)]
pub struct FileOutdatedSource {
    path: PathBuf,
}

impl FileOutdatedSource {
    /// Create a source reading `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl OutdatedSource for FileOutdatedSource {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn outdated(&self, _declared: &DependencyMap) -> Result<OutdatedInfo, OutdatedError> {
        let origin = self.path.display().to_string();
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| OutdatedError::invalid_response(&origin, e.to_string()))?;
        parse_outdated_json(&origin, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("outdated.json");
        std::fs::write(&path, r#"{"mocha": {"latest": "10.2.0"}}"#).unwrap();

        let info = FileOutdatedSource::new(&path)
            .outdated(&DependencyMap::new())
            .await
            .unwrap();
        assert_eq!(info.get("mocha").unwrap().latest, "10.2.0");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let err = FileOutdatedSource::new(temp_dir.path().join("missing.json"))
            .outdated(&DependencyMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, OutdatedError::InvalidResponse { .. }));
    }
}
