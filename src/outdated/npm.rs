//! `npm outdated --json` source

use crate::domain::{DependencyMap, OutdatedInfo};
use crate::error::OutdatedError;
use crate::outdated::{parse_outdated_json, OutdatedSource};
use crate::package_manager::ProcessRunner;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

/// Asks the package manager which installed packages are outdated
pub struct NpmOutdatedSource {
    runner: Arc<dyn ProcessRunner>,
    package_manager: String,
    cwd: PathBuf,
}

impl NpmOutdatedSource {
    /// Create a source running `<package_manager> outdated --json` in `cwd`
    pub fn new(
        runner: Arc<dyn ProcessRunner>,
        package_manager: impl Into<String>,
        cwd: impl Into<PathBuf>,
    ) -> Self {
        Self {
            runner,
            package_manager: package_manager.into(),
            cwd: cwd.into(),
        }
    }

    fn args() -> Vec<String> {
        vec!["outdated".to_string(), "--json".to_string()]
    }

    fn command_line(&self) -> String {
        format!("{} {}", self.package_manager, Self::args().join(" "))
    }
}

#[async_trait]
impl OutdatedSource for NpmOutdatedSource {
    fn name(&self) -> &'static str {
        "npm outdated"
    }

    async fn outdated(&self, _declared: &DependencyMap) -> Result<OutdatedInfo, OutdatedError> {
        let command = self.command_line();
        let output = self
            .runner
            .run(&self.package_manager, &Self::args(), &self.cwd)
            .await
            .map_err(|e| OutdatedError::command_failed(&command, e.to_string()))?;

        // Exit status 1 only means that something is outdated
        if !output.is_success() && output.stdout.trim().is_empty() {
            let stderr = output.stderr.trim();
            if !stderr.is_empty() {
                return Err(OutdatedError::command_failed(&command, stderr));
            }
        }

        parse_outdated_json(&command, &output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package_manager::CommandOutput;
    use std::path::Path;
    use std::sync::Mutex;

    struct RecordingRunner {
        output: CommandOutput,
        calls: Mutex<Vec<(String, Vec<String>, PathBuf)>>,
    }

    impl RecordingRunner {
        fn new(output: CommandOutput) -> Arc<Self> {
            Arc::new(Self {
                output,
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ProcessRunner for RecordingRunner {
        async fn run(
            &self,
            program: &str,
            args: &[String],
            cwd: &Path,
        ) -> std::io::Result<CommandOutput> {
            self.calls
                .lock()
                .unwrap()
                .push((program.to_string(), args.to_vec(), cwd.to_path_buf()));
            Ok(self.output.clone())
        }
    }

    #[tokio::test]
    async fn test_outdated_exit_one_is_parsed() {
        let runner = RecordingRunner::new(CommandOutput {
            code: Some(1),
            stdout: r#"{"lodash": {"current": "4.17.20", "wanted": "4.17.21", "latest": "4.17.21"}}"#
                .to_string(),
            stderr: String::new(),
        });
        let source = NpmOutdatedSource::new(runner.clone(), "npm", "/project");

        let info = source.outdated(&DependencyMap::new()).await.unwrap();
        assert_eq!(info.get("lodash").unwrap().latest, "4.17.21");

        let calls = runner.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "npm");
        assert_eq!(calls[0].1, vec!["outdated", "--json"]);
        assert_eq!(calls[0].2, PathBuf::from("/project"));
    }

    #[tokio::test]
    async fn test_nothing_outdated() {
        let runner = RecordingRunner::new(CommandOutput::success(""));
        let source = NpmOutdatedSource::new(runner, "npm", ".");
        assert!(source.outdated(&DependencyMap::new()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failure_without_json() {
        let runner = RecordingRunner::new(CommandOutput::failure(254, "npm ERR! enoent"));
        let source = NpmOutdatedSource::new(runner, "npm", ".");
        let err = source.outdated(&DependencyMap::new()).await.unwrap_err();
        assert!(matches!(err, OutdatedError::CommandFailed { .. }));
    }
}
