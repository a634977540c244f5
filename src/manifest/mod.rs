//! package.json loading and writing
//!
//! This module provides:
//! - Order-preserving parsing of the whole manifest document
//! - Typed access to the dependency sections
//! - Writing back with the original indentation and trailing newline

mod format;

pub use format::JsonStyle;

use crate::domain::{DependencyMap, DependencySection};
use crate::error::ManifestError;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Default manifest file name
pub const MANIFEST_FILENAME: &str = "package.json";

/// An in-memory package.json
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    document: Map<String, Value>,
    style: JsonStyle,
}

impl Manifest {
    /// Parse manifest content. `path` is only used for error context.
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Result<Self, ManifestError> {
        let path = path.into();
        let value: Value = serde_json::from_str(content)
            .map_err(|e| ManifestError::json_parse_error(&path, e.to_string()))?;

        let Value::Object(document) = value else {
            return Err(ManifestError::invalid_structure(
                &path,
                "top-level value is not an object",
            ));
        };

        for section in DependencySection::all() {
            match document.get(section.key()) {
                None | Some(Value::Object(_)) => {}
                Some(_) => {
                    return Err(ManifestError::invalid_structure(
                        &path,
                        format!("\"{}\" is not an object", section.key()),
                    ));
                }
            }
        }

        Ok(Self {
            path,
            document,
            style: JsonStyle::detect(content),
        })
    }

    /// Path the manifest was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns a top-level string field such as `name` or `version`
    pub fn string_field(&self, key: &str) -> Option<&str> {
        self.document.get(key).and_then(Value::as_str)
    }

    /// Returns the string entries of a dependency section.
    ///
    /// A missing section is empty. Non-string entries are skipped.
    pub fn dependencies(&self, section: DependencySection) -> DependencyMap {
        self.document
            .get(section.key())
            .and_then(Value::as_object)
            .map(|deps| {
                deps.iter()
                    .filter_map(|(name, spec)| {
                        spec.as_str().map(|s| (name.clone(), s.to_string()))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns the entries of both dependency sections.
    ///
    /// When a package appears in both, the `dependencies` entry wins.
    pub fn all_dependencies(&self) -> DependencyMap {
        let mut all = DependencyMap::new();
        for section in DependencySection::all().iter().rev() {
            all.extend(self.dependencies(*section));
        }
        all
    }

    /// Overwrite version specifiers in a section, keeping key positions.
    ///
    /// The section is created only when there is something to write.
    pub fn set_versions(&mut self, section: DependencySection, versions: &DependencyMap) {
        if versions.is_empty() {
            return;
        }

        let entry = self
            .document
            .entry(section.key())
            .or_insert_with(|| Value::Object(Map::new()));

        if let Value::Object(deps) = entry {
            for (name, spec) in versions {
                deps.insert(name.clone(), Value::String(spec.clone()));
            }
        }
    }

    /// Render the manifest using its detected style
    pub fn render(&self) -> Result<String, ManifestError> {
        self.style
            .render(&self.document)
            .map_err(|e| ManifestError::invalid_structure(&self.path, e.to_string()))
    }
}

/// Read and parse a manifest file
pub fn read_manifest(path: &Path) -> Result<Manifest, ManifestError> {
    if !path.exists() {
        return Err(ManifestError::not_found(path));
    }

    let content = fs::read_to_string(path).map_err(|e| ManifestError::read_error(path, e))?;
    Manifest::parse(path, &content)
}

/// Write a manifest back to the path it was loaded from
pub fn write_manifest(manifest: &Manifest) -> Result<(), ManifestError> {
    let content = manifest.render()?;
    fs::write(manifest.path(), content).map_err(|e| ManifestError::write_error(manifest.path(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<Manifest, ManifestError> {
        Manifest::parse("package.json", content)
    }

    #[test]
    fn test_parse_sections() {
        let manifest = parse(
            r#"{
  "dependencies": { "lodash": "^4.17.21", "express": "~4.18.2" },
  "devDependencies": { "typescript": "^5.0.0" }
}"#,
        )
        .unwrap();

        let deps = manifest.dependencies(DependencySection::Dependencies);
        assert_eq!(deps.len(), 2);
        assert_eq!(deps["lodash"], "^4.17.21");

        let dev = manifest.dependencies(DependencySection::DevDependencies);
        assert_eq!(dev["typescript"], "^5.0.0");
    }

    #[test]
    fn test_missing_section_is_empty() {
        let manifest = parse(r#"{"name": "x"}"#).unwrap();
        assert!(manifest
            .dependencies(DependencySection::DevDependencies)
            .is_empty());
    }

    #[test]
    fn test_non_string_entries_skipped() {
        let manifest = parse(r#"{"dependencies": {"a": "1.0.0", "b": {"version": "2"}}}"#).unwrap();
        let deps = manifest.dependencies(DependencySection::Dependencies);
        assert_eq!(deps.len(), 1);
        assert!(deps.contains_key("a"));
    }

    #[test]
    fn test_invalid_json() {
        let err = parse("not json").unwrap_err();
        assert!(matches!(err, ManifestError::JsonParseError { .. }));
    }

    #[test]
    fn test_non_object_root() {
        let err = parse("[1, 2]").unwrap_err();
        assert!(matches!(err, ManifestError::InvalidStructure { .. }));
    }

    #[test]
    fn test_non_object_section() {
        let err = parse(r#"{"dependencies": ["lodash"]}"#).unwrap_err();
        assert!(matches!(err, ManifestError::InvalidStructure { .. }));
    }

    #[test]
    fn test_all_dependencies_prefers_regular_section() {
        let manifest = parse(
            r#"{"dependencies": {"a": "^1.0.0"}, "devDependencies": {"a": "^0.9.0", "b": "*"}}"#,
        )
        .unwrap();
        let all = manifest.all_dependencies();
        assert_eq!(all["a"], "^1.0.0");
        assert_eq!(all["b"], "*");
    }

    #[test]
    fn test_set_versions_preserves_key_order() {
        let content = r#"{
  "name": "test-package",
  "version": "1.0.0",
  "dependencies": {
    "zod": "^3.0.0",
    "axios": "^1.0.0",
    "lodash": "^4.17.21"
  }
}
"#;
        let mut manifest = parse(content).unwrap();
        let mut versions = DependencyMap::new();
        versions.insert("axios".to_string(), "*".to_string());
        manifest.set_versions(DependencySection::Dependencies, &versions);

        let rendered = manifest.render().unwrap();
        assert_eq!(rendered, content.replace("^1.0.0", "*"));
    }

    #[test]
    fn test_set_versions_empty_does_not_create_section() {
        let content = "{\n  \"name\": \"x\"\n}\n";
        let mut manifest = parse(content).unwrap();
        manifest.set_versions(DependencySection::DevDependencies, &DependencyMap::new());
        assert_eq!(manifest.render().unwrap(), content);
    }

    #[test]
    fn test_unknown_keys_round_trip() {
        let content = r#"{
    "name": "x",
    "scripts": {
        "test": "mocha"
    },
    "engines": {
        "node": ">=18"
    },
    "dependencies": {
        "a": "^1.0.0"
    }
}"#;
        let manifest = parse(content).unwrap();
        assert_eq!(manifest.render().unwrap(), content);
    }

    #[test]
    fn test_string_field() {
        let manifest = parse(r#"{"name": "x", "version": "1.2.3", "private": true}"#).unwrap();
        assert_eq!(manifest.string_field("version"), Some("1.2.3"));
        assert_eq!(manifest.string_field("private"), None);
    }

    #[test]
    fn test_read_manifest_not_found() {
        let temp_dir = tempfile::tempdir().unwrap();
        let err = read_manifest(&temp_dir.path().join(MANIFEST_FILENAME)).unwrap_err();
        assert!(matches!(err, ManifestError::NotFound { .. }));
    }

    #[test]
    fn test_write_manifest() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(MANIFEST_FILENAME);
        fs::write(&path, "{\n  \"dependencies\": {\n    \"a\": \"^1.0.0\"\n  }\n}\n").unwrap();

        let mut manifest = read_manifest(&path).unwrap();
        let mut versions = DependencyMap::new();
        versions.insert("a".to_string(), "*".to_string());
        manifest.set_versions(DependencySection::Dependencies, &versions);
        write_manifest(&manifest).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "{\n  \"dependencies\": {\n    \"a\": \"*\"\n  }\n}\n");
    }
}
