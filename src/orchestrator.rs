//! Update orchestrator for coordinating the entire update workflow
//!
//! This module provides:
//! - Workflow coordination: read → query outdated → select → write → install
//! - Dry-run mode support
//! - Sequential install invocations that stop at the first failure

use crate::domain::DependencySection;
use crate::error::AppError;
use crate::logger::Logger;
use crate::manifest::{read_manifest, write_manifest, MANIFEST_FILENAME};
use crate::outdated::OutdatedSource;
use crate::package_manager::{Invocation, ProcessRunner, DEFAULT_PACKAGE_MANAGER};
use crate::progress::Progress;
use crate::update::{install_names, skipped_prereleases, UpdatePlan};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Options for a single update run
#[derive(Debug, Clone)]
pub struct UpdateOptions {
    /// Directory relative paths are resolved against
    pub base_dir: PathBuf,
    /// Manifest path, `package.json` when unset
    pub pkg_path: Option<PathBuf>,
    /// Package manager executable
    pub package_manager: String,
    /// Report what would change without writing or installing
    pub dry_run: bool,
}

impl UpdateOptions {
    /// Create options rooted at `base_dir`
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            pkg_path: None,
            package_manager: DEFAULT_PACKAGE_MANAGER.to_string(),
            dry_run: false,
        }
    }

    /// Set the manifest path
    pub fn with_pkg_path(mut self, pkg_path: impl Into<PathBuf>) -> Self {
        self.pkg_path = Some(pkg_path.into());
        self
    }

    /// Set the package manager executable
    pub fn with_package_manager(mut self, package_manager: impl Into<String>) -> Self {
        self.package_manager = package_manager.into();
        self
    }

    /// Enable or disable dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Resolved manifest path
    pub fn manifest_path(&self) -> PathBuf {
        let pkg_path = self
            .pkg_path
            .as_deref()
            .unwrap_or_else(|| Path::new(MANIFEST_FILENAME));
        self.base_dir.join(pkg_path)
    }

    /// Directory the package manager runs in
    pub fn install_dir(&self) -> PathBuf {
        match self.manifest_path().parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

/// Outcome of an update run
#[derive(Debug, Clone)]
pub struct UpdateReport {
    /// Manifest that was processed
    pub manifest_path: PathBuf,
    /// Rewritten entries per section
    pub plan: UpdatePlan,
    /// Install commands, in execution order
    pub installs: Vec<Invocation>,
    /// Whether this was a dry run
    pub dry_run: bool,
}

/// Orchestrator for the update workflow
pub struct Updater {
    runner: Arc<dyn ProcessRunner>,
    source: Arc<dyn OutdatedSource>,
    logger: Logger,
}

impl Updater {
    /// Create an updater using `runner` for installs and `source` for version data
    pub fn new(runner: Arc<dyn ProcessRunner>, source: Arc<dyn OutdatedSource>) -> Self {
        Self {
            runner,
            source,
            logger: Logger::quiet(),
        }
    }

    /// Set the logger
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Run the update workflow
    pub async fn run(&self, options: &UpdateOptions) -> Result<UpdateReport, AppError> {
        let manifest_path = options.manifest_path();
        let install_dir = options.install_dir();

        // Step 1: Load the manifest
        let mut manifest = read_manifest(&manifest_path)?;
        self.logger
            .trace(format!("loaded {}", manifest_path.display()));

        // Step 2: Query outdated versions once for both sections
        let mut progress = Progress::new(self.logger.shows_progress());
        progress.spinner(&format!("Checking outdated packages ({})", self.source.name()));
        let declared = manifest.all_dependencies();
        let outdated = self.source.outdated(&declared).await;
        progress.finish_and_clear();
        let outdated = outdated?;
        self.logger
            .trace(format!("{} outdated package(s) reported", outdated.len()));
        for (name, spec, latest) in skipped_prereleases(&declared, &outdated) {
            self.logger.warn(format!(
                "{} is pinned to prerelease {}; not updating to {}",
                name, spec, latest
            ));
        }

        // Step 3: Select entries to rewrite
        let plan = UpdatePlan::from_manifest(&manifest, &outdated);

        let mut installs = Vec::with_capacity(DependencySection::all().len() + 1);
        for section in DependencySection::all() {
            let names = install_names(plan.section(*section));
            self.logger
                .trace(format!("{} to update:\n{}", section, names.join(", ")));
            installs.push(Invocation::install_section(
                &options.package_manager,
                *section,
                &names,
                &install_dir,
            ));
        }
        installs.push(Invocation::install_all(
            &options.package_manager,
            &install_dir,
        ));

        let report = UpdateReport {
            manifest_path: manifest_path.clone(),
            plan,
            installs,
            dry_run: options.dry_run,
        };

        if options.dry_run {
            self.log_dry_run(&report);
            return Ok(report);
        }

        // Step 4: Write the manifest before installing anything
        report.plan.apply(&mut manifest);
        write_manifest(&manifest)?;
        self.logger.info(format!(
            "Rewrote {} dependencies and {} devDependencies in {}",
            report.plan.dependencies.len(),
            report.plan.dev_dependencies.len(),
            manifest_path.display()
        ));

        // Step 5: Install, one command at a time
        for install in &report.installs {
            let command = install.command_line();
            progress.spinner(&format!("Running {}", command));
            let result = install.execute(self.runner.as_ref()).await;
            progress.finish_and_clear();

            let output = result?;
            if !output.stdout.trim().is_empty() {
                self.logger.trace(output.stdout.trim());
            }
            self.logger.success(command);
        }

        Ok(report)
    }

    fn log_dry_run(&self, report: &UpdateReport) {
        self.logger.info(format!(
            "Dry run: {} entries would be rewritten in {}",
            report.plan.total(),
            report.manifest_path.display()
        ));
        for section in DependencySection::all() {
            for name in report.plan.section(*section).keys() {
                self.logger.info(format!("  {} {} -> *", section, name));
            }
        }
        for install in &report.installs {
            self.logger
                .info(format!("  would run: {}", install.command_line()));
        }
    }
}
