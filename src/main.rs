//! pkgup - bump package.json dependencies to their latest versions
//!
//! `pkgup update` rewrites outdated entries of `dependencies` and
//! `devDependencies` to `*` and reinstalls them.
//! `pkgup release` runs the pre-release hooks, publishes and tags.

use clap::Parser;
use pkgup::cli::{CliArgs, Command, SourceKind, UpdateArgs};
use pkgup::logger::{Logger, Verbosity};
use pkgup::orchestrator::Updater;
use pkgup::outdated::{
    FileOutdatedSource, HttpClient, NpmOutdatedSource, OutdatedSource, RegistryOutdatedSource,
};
use pkgup::package_manager::{ProcessRunner, SystemProcessRunner};
use pkgup::release::Releaser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    let logger = Logger::new(args.verbosity());

    match run(args, logger).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logger.error(format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs, logger: Logger) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let streamed = logger.verbosity() == Verbosity::Verbose;
    let runner: Arc<dyn ProcessRunner> =
        Arc::new(SystemProcessRunner::new().with_streamed_output(streamed));

    match &args.command {
        Command::Update(update) => {
            let options = update.to_options(&cwd);
            logger.trace(format!("pkgup v{}", env!("CARGO_PKG_VERSION")));
            logger.trace(format!("manifest: {}", options.manifest_path().display()));

            let source = build_source(update, runner.clone(), &cwd, options.install_dir())?;
            let report = Updater::new(runner, source)
                .with_logger(logger)
                .run(&options)
                .await?;

            if !report.dry_run {
                logger.success(format!("Updated {} dependencies", report.plan.total()));
            }
        }
        Command::Release(release) => {
            let options = release.to_options(&cwd);
            Releaser::new(runner)
                .with_logger(logger)
                .run(&options)
                .await?;
        }
    }

    Ok(())
}

/// Select the outdated-version source from CLI options
fn build_source(
    args: &UpdateArgs,
    runner: Arc<dyn ProcessRunner>,
    cwd: &Path,
    install_dir: PathBuf,
) -> anyhow::Result<Arc<dyn OutdatedSource>> {
    if let Some(path) = &args.outdated_file {
        return Ok(Arc::new(FileOutdatedSource::new(cwd.join(path))));
    }

    let source: Arc<dyn OutdatedSource> = match args.source {
        SourceKind::Npm => Arc::new(NpmOutdatedSource::new(
            runner,
            &args.package_manager,
            install_dir,
        )),
        SourceKind::Registry => Arc::new(RegistryOutdatedSource::with_base_url(
            HttpClient::new()?,
            &args.registry_url,
        )),
    };
    Ok(source)
}
