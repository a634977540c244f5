//! CLI argument parsing module for pkgup

use crate::logger::Verbosity;
use crate::orchestrator::UpdateOptions;
use crate::outdated::NPM_REGISTRY_URL;
use crate::package_manager::DEFAULT_PACKAGE_MANAGER;
use crate::release::{ReleaseOptions, DEFAULT_BEFORE_RELEASE};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

/// Bump package.json dependencies to their latest versions
#[derive(Parser, Debug, Clone)]
#[command(name = "pkgup", version, about = "Bump package.json dependencies and reinstall")]
pub struct CliArgs {
    /// Enable verbose output (trace messages and package manager output)
    #[arg(long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Enable quiet mode - errors only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Rewrite outdated dependencies to `*` and reinstall them
    Update(UpdateArgs),
    /// Run build/test hooks, publish the package and tag the version
    Release(ReleaseArgs),
}

/// Where outdated-version data comes from
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceKind {
    /// `<package-manager> outdated --json`
    #[default]
    Npm,
    /// Query the npm registry over HTTP
    Registry,
}

/// Arguments of `pkgup update`
#[derive(Args, Debug, Clone)]
pub struct UpdateArgs {
    /// Path to package.json (default: package.json in the project directory)
    pub pkg_path: Option<PathBuf>,

    /// Project directory (default: current directory)
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Package manager executable
    #[arg(long, default_value = DEFAULT_PACKAGE_MANAGER)]
    pub package_manager: String,

    /// Source of outdated-version data
    #[arg(long, value_enum, default_value_t = SourceKind::Npm)]
    pub source: SourceKind,

    /// Registry URL used with `--source registry`
    #[arg(long, default_value = NPM_REGISTRY_URL)]
    pub registry_url: String,

    /// Read outdated data from a saved `npm outdated --json` file
    #[arg(long, conflicts_with = "source")]
    pub outdated_file: Option<PathBuf>,

    /// Dry run mode - show what would be updated without making changes
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

/// Arguments of `pkgup release`
#[derive(Args, Debug, Clone)]
pub struct ReleaseArgs {
    /// Project directory (default: current directory)
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Hook run before publishing (can be specified multiple times)
    #[arg(long = "before-release", action = ArgAction::Append)]
    pub before_release: Vec<PathBuf>,

    /// Package manager executable
    #[arg(long, default_value = DEFAULT_PACKAGE_MANAGER)]
    pub package_manager: String,

    /// Do not create and push a git tag
    #[arg(long)]
    pub no_tag: bool,

    /// Print the steps without running them
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

impl CliArgs {
    /// Verbosity selected by the global flags
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}

impl UpdateArgs {
    /// Build update options, resolving paths against `cwd` when no `--dir` is given
    pub fn to_options(&self, cwd: &Path) -> UpdateOptions {
        let base_dir = resolve_dir(self.dir.as_deref(), cwd);
        let mut options = UpdateOptions::new(base_dir)
            .with_package_manager(&self.package_manager)
            .with_dry_run(self.dry_run);
        if let Some(pkg_path) = &self.pkg_path {
            options = options.with_pkg_path(pkg_path);
        }
        options
    }
}

impl ReleaseArgs {
    /// Build release options, resolving paths against `cwd` when no `--dir` is given
    pub fn to_options(&self, cwd: &Path) -> ReleaseOptions {
        let base_dir = resolve_dir(self.dir.as_deref(), cwd);
        let hooks = if self.before_release.is_empty() {
            DEFAULT_BEFORE_RELEASE.iter().map(PathBuf::from).collect()
        } else {
            self.before_release.clone()
        };
        ReleaseOptions::new(base_dir)
            .with_before_release(hooks)
            .with_package_manager(&self.package_manager)
            .with_tag(!self.no_tag)
            .with_dry_run(self.dry_run)
    }
}

fn resolve_dir(dir: Option<&Path>, cwd: &Path) -> PathBuf {
    match dir {
        Some(dir) => cwd.join(dir),
        None => cwd.to_path_buf(),
    }
}
