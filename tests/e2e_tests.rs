//! End-to-end tests for the pkgup CLI
//!
//! These tests verify:
//! - Dry-run mode leaves package.json unchanged
//! - The manifest is rewritten before installing, even if installing fails
//! - Exit codes and error messages for broken manifests
//! - The release pipeline in dry-run mode

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const PACKAGE_JSON: &str = r#"{
  "name": "test-project",
  "version": "1.0.0",
  "dependencies": {
    "lodash": "^4.17.20",
    "@scope/lib": "^1.0.0"
  },
  "devDependencies": {
    "typescript": "~5.0.0"
  }
}
"#;

const OUTDATED_JSON: &str = r#"{
  "lodash": {"current": "4.17.20", "wanted": "4.17.21", "latest": "4.17.21"},
  "@scope/lib": {"current": "1.0.0", "wanted": "1.0.0", "latest": "2.0.0"}
}"#;

/// Create a test directory with package.json and a saved outdated report
fn create_test_project() -> TempDir {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    fs::write(temp_dir.path().join("package.json"), PACKAGE_JSON).unwrap();
    fs::write(temp_dir.path().join("outdated.json"), OUTDATED_JSON).unwrap();
    temp_dir
}

fn pkgup() -> Command {
    let mut cmd = Command::cargo_bin("pkgup").unwrap();
    cmd.env("NO_COLOR", "1");
    cmd
}

mod update_tests {
    use super::*;

    #[test]
    fn test_dry_run_leaves_manifest_unchanged() {
        let project = create_test_project();

        pkgup()
            .current_dir(project.path())
            .args(["update", "--dry-run", "--outdated-file", "outdated.json"])
            .assert()
            .success()
            .stderr(predicate::str::contains("would run: npm install lodash --save"))
            .stderr(predicate::str::contains("dependencies @scope/lib -> *"));

        let content = fs::read_to_string(project.path().join("package.json")).unwrap();
        assert_eq!(content, PACKAGE_JSON);
    }

    #[test]
    fn test_dir_option() {
        let project = create_test_project();
        let outdated = project.path().join("outdated.json");

        pkgup()
            .args(["update", "-n", "--dir"])
            .arg(project.path())
            .arg("--outdated-file")
            .arg(&outdated)
            .assert()
            .success();
    }

    #[test]
    fn test_manifest_written_before_failed_install() {
        let project = create_test_project();

        pkgup()
            .current_dir(project.path())
            .args([
                "update",
                "--outdated-file",
                "outdated.json",
                "--package-manager",
                "pkgup-missing-package-manager",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to run"));

        let content = fs::read_to_string(project.path().join("package.json")).unwrap();
        assert!(content.contains("\"lodash\": \"*\""));
        assert!(content.contains("\"@scope/lib\": \"*\""));
        assert!(content.contains("\"typescript\": \"~5.0.0\""));
    }

    #[test]
    fn test_missing_manifest() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("outdated.json"), "{}").unwrap();

        pkgup()
            .current_dir(temp_dir.path())
            .args(["update", "--outdated-file", "outdated.json"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("manifest file not found"));
    }

    #[test]
    fn test_invalid_manifest() {
        let project = create_test_project();
        fs::write(project.path().join("package.json"), "{ broken").unwrap();

        pkgup()
            .current_dir(project.path())
            .args(["update", "--outdated-file", "outdated.json"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to parse JSON"));
    }

    #[test]
    fn test_invalid_outdated_file() {
        let project = create_test_project();
        fs::write(project.path().join("outdated.json"), "not json").unwrap();

        pkgup()
            .current_dir(project.path())
            .args(["update", "-n", "--outdated-file", "outdated.json"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid outdated data"));
    }
}

mod release_tests {
    use super::*;

    #[test]
    fn test_release_dry_run_lists_steps() {
        let project = create_test_project();

        pkgup()
            .current_dir(project.path())
            .args(["release", "--dry-run"])
            .assert()
            .success()
            .stderr(predicate::str::contains("task release started"))
            .stderr(predicate::str::contains("ci/build.js"))
            .stderr(predicate::str::contains("would run: npm publish"))
            .stderr(predicate::str::contains("would run: git tag v1.0.0"));
    }

    #[test]
    fn test_release_without_manifest() {
        let temp_dir = tempfile::tempdir().unwrap();

        pkgup()
            .current_dir(temp_dir.path())
            .args(["release", "--dry-run"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("manifest file not found"));
    }
}

mod cli_tests {
    use super::*;

    #[test]
    fn test_version() {
        pkgup()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("pkgup"));
    }

    #[test]
    fn test_missing_subcommand() {
        pkgup().assert().failure();
    }
}
