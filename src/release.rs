//! Release pipeline
//!
//! Runs the pre-release hooks, publishes the package and tags the version.
//! Every step runs in the explicit project root; the process working
//! directory is never changed.

use crate::error::ReleaseError;
use crate::logger::Logger;
use crate::manifest::{read_manifest, MANIFEST_FILENAME};
use crate::package_manager::{Invocation, ProcessRunner, DEFAULT_PACKAGE_MANAGER};
use crate::progress::Progress;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Name of the release task in log output
pub const RELEASE_TASK: &str = "release";

/// Hooks run before publishing when none are configured
pub const DEFAULT_BEFORE_RELEASE: [&str; 2] = ["./ci/build.js", "./ci/test.js"];

/// Options for a release
#[derive(Debug, Clone)]
pub struct ReleaseOptions {
    /// Project root
    pub base_dir: PathBuf,
    /// Executables run before publishing, relative to `base_dir`
    pub before_release: Vec<PathBuf>,
    /// Package manager executable
    pub package_manager: String,
    /// Create and push a `v<version>` git tag after publishing
    pub tag: bool,
    /// Print the steps without running them
    pub dry_run: bool,
}

impl ReleaseOptions {
    /// Create options with the default hooks
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            before_release: DEFAULT_BEFORE_RELEASE.iter().map(PathBuf::from).collect(),
            package_manager: DEFAULT_PACKAGE_MANAGER.to_string(),
            tag: true,
            dry_run: false,
        }
    }

    /// Replace the pre-release hooks
    pub fn with_before_release(mut self, hooks: Vec<PathBuf>) -> Self {
        self.before_release = hooks;
        self
    }

    /// Set the package manager executable
    pub fn with_package_manager(mut self, package_manager: impl Into<String>) -> Self {
        self.package_manager = package_manager.into();
        self
    }

    /// Enable or disable git tagging
    pub fn with_tag(mut self, tag: bool) -> Self {
        self.tag = tag;
        self
    }

    /// Enable or disable dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// One named step of the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseStep {
    /// Label used in log output
    pub name: String,
    /// Command run for this step
    pub invocation: Invocation,
}

/// Outcome of a release
#[derive(Debug, Clone)]
pub struct ReleaseReport {
    /// Package version from the manifest
    pub version: Option<String>,
    /// Steps in execution order
    pub steps: Vec<ReleaseStep>,
    /// Whether this was a dry run
    pub dry_run: bool,
}

/// Runs the release task
pub struct Releaser {
    runner: Arc<dyn ProcessRunner>,
    logger: Logger,
}

impl Releaser {
    /// Create a releaser that runs every step through `runner`
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            runner,
            logger: Logger::quiet(),
        }
    }

    /// Set the logger
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Build the list of steps without running anything
    pub fn plan(&self, options: &ReleaseOptions) -> Result<ReleaseReport, ReleaseError> {
        let manifest_path = options.base_dir.join(MANIFEST_FILENAME);
        let manifest = read_manifest(&manifest_path)?;
        let version = manifest.string_field("version").map(str::to_string);
        let cwd = &options.base_dir;

        let mut steps: Vec<ReleaseStep> = options
            .before_release
            .iter()
            .map(|hook| ReleaseStep {
                name: hook.display().to_string(),
                invocation: Invocation::new(
                    cwd.join(hook).display().to_string(),
                    Vec::new(),
                    cwd,
                ),
            })
            .collect();

        steps.push(ReleaseStep {
            name: "publish".to_string(),
            invocation: Invocation::new(
                &options.package_manager,
                vec!["publish".to_string()],
                cwd,
            ),
        });

        if options.tag {
            let tag = match &version {
                Some(version) => format!("v{}", version),
                None => return Err(ReleaseError::MissingVersion { path: manifest_path }),
            };
            steps.push(ReleaseStep {
                name: "tag".to_string(),
                invocation: Invocation::new("git", vec!["tag".to_string(), tag.clone()], cwd),
            });
            steps.push(ReleaseStep {
                name: "push tag".to_string(),
                invocation: Invocation::new(
                    "git",
                    vec!["push".to_string(), "origin".to_string(), tag],
                    cwd,
                ),
            });
        }

        Ok(ReleaseReport {
            version,
            steps,
            dry_run: options.dry_run,
        })
    }

    /// Run the release task, stopping at the first failing step
    pub async fn run(&self, options: &ReleaseOptions) -> Result<ReleaseReport, ReleaseError> {
        let report = self.plan(options)?;
        let started = Instant::now();
        self.logger.info(format!("task {} started", RELEASE_TASK));

        if report.dry_run {
            for step in &report.steps {
                self.logger
                    .info(format!("  would run: {}", step.invocation.command_line()));
            }
            return Ok(report);
        }

        let mut progress = Progress::new(self.logger.shows_progress());
        for step in &report.steps {
            progress.spinner(&format!("[{}] {}", RELEASE_TASK, step.name));
            let result = step.invocation.execute(self.runner.as_ref()).await;
            progress.finish_and_clear();

            if let Err(e) = result {
                self.logger
                    .error(format!("task {} failed at '{}'", RELEASE_TASK, step.name));
                return Err(ReleaseError::step_failed(&step.name, e.to_string()));
            }
            self.logger.success(&step.name);
        }

        self.logger.success(format!(
            "task {} completed in {:.1?}",
            RELEASE_TASK,
            started.elapsed()
        ));
        Ok(report)
    }
}
