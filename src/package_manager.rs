//! Package manager process execution
//!
//! This module provides:
//! - The `ProcessRunner` seam used for every external command
//! - A system runner that spawns real processes with tokio
//! - Install argument construction for the update workflow

use crate::domain::DependencySection;
use crate::error::InstallError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

/// Default package manager executable
pub const DEFAULT_PACKAGE_MANAGER: &str = "npm";

/// Captured result of a finished process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when terminated by a signal
    pub code: Option<i32>,
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
}

impl CommandOutput {
    /// Create a successful output
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Create a failed output
    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Returns true if the process exited with status 0
    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Trait for running external commands
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run `program` with `args` in `cwd` and wait for it to finish.
    ///
    /// Errors only when the process cannot be started. A non-zero exit is
    /// reported through [`CommandOutput`].
    async fn run(
        &self,
        program: &str,
        args: &[String],
        cwd: &Path,
    ) -> std::io::Result<CommandOutput>;

    /// Like [`run`](Self::run), but the runner may pass the child's output
    /// straight to the terminal instead of capturing it.
    async fn run_streamed(
        &self,
        program: &str,
        args: &[String],
        cwd: &Path,
    ) -> std::io::Result<CommandOutput> {
        self.run(program, args, cwd).await
    }
}

/// Runner that executes real commands
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProcessRunner {
    /// Inherit stdout/stderr in `run_streamed`
    stream_output: bool,
}

impl SystemProcessRunner {
    /// Create a new system runner
    pub fn new() -> Self {
        Self::default()
    }

    /// Let streamed commands write to the terminal as they run
    pub fn with_streamed_output(mut self, stream_output: bool) -> Self {
        self.stream_output = stream_output;
        self
    }
}

#[async_trait]
impl ProcessRunner for SystemProcessRunner {
    async fn run(
        &self,
        program: &str,
        args: &[String],
        cwd: &Path,
    ) -> std::io::Result<CommandOutput> {
        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .output()
            .await?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    async fn run_streamed(
        &self,
        program: &str,
        args: &[String],
        cwd: &Path,
    ) -> std::io::Result<CommandOutput> {
        if !self.stream_output {
            return self.run(program, args, cwd).await;
        }

        let status = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await?;

        Ok(CommandOutput {
            code: status.code(),
            stdout: String::new(),
            stderr: String::new(),
        })
    }
}

/// A fully described command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Executable name
    pub program: String,
    /// Arguments
    pub args: Vec<String>,
    /// Working directory
    pub cwd: PathBuf,
}

impl Invocation {
    /// Create a new invocation
    pub fn new(program: impl Into<String>, args: Vec<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args,
            cwd: cwd.into(),
        }
    }

    /// `<pm> install <names...> <save flag>` for one section
    pub fn install_section(
        package_manager: &str,
        section: DependencySection,
        names: &[String],
        cwd: impl Into<PathBuf>,
    ) -> Self {
        let mut args = Vec::with_capacity(names.len() + 2);
        args.push("install".to_string());
        args.extend(names.iter().cloned());
        args.push(section.save_flag().to_string());
        Self::new(package_manager, args, cwd)
    }

    /// Plain `<pm> install`
    pub fn install_all(package_manager: &str, cwd: impl Into<PathBuf>) -> Self {
        Self::new(package_manager, vec!["install".to_string()], cwd)
    }

    /// Human-readable command line
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run with `runner`, turning a spawn failure or non-zero exit into an error
    pub async fn execute(&self, runner: &dyn ProcessRunner) -> Result<CommandOutput, InstallError> {
        let output = runner
            .run_streamed(&self.program, &self.args, &self.cwd)
            .await
            .map_err(|source| InstallError::Spawn {
                command: self.command_line(),
                cwd: self.cwd.clone(),
                source,
            })?;

        if !output.is_success() {
            return Err(InstallError::Failed {
                command: self.command_line(),
                code: output.code,
                stderr: output.stderr.trim().to_string(),
            });
        }

        Ok(output)
    }
}
