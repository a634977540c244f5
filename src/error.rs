//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ManifestError: Issues reading, parsing or writing package.json
//! - OutdatedError: Issues obtaining outdated-version data
//! - RegistryError: Issues with npm registry communication
//! - InstallError: Package manager install invocations that failed
//! - ReleaseError: Release pipeline steps that failed

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Manifest file related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Outdated-version source errors
    #[error(transparent)]
    Outdated(#[from] OutdatedError),

    /// Install errors
    #[error(transparent)]
    Install(#[from] InstallError),

    /// Release errors
    #[error(transparent)]
    Release(#[from] ReleaseError),
}

/// Errors related to manifest file operations
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest file not found
    #[error("manifest file not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write manifest file
    #[error("failed to write manifest file {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing error
    #[error("failed to parse JSON in {path}: {message}")]
    JsonParseError { path: PathBuf, message: String },

    /// Valid JSON with an unexpected shape
    #[error("invalid manifest structure in {path}: {message}")]
    InvalidStructure { path: PathBuf, message: String },
}

/// Errors related to obtaining outdated-version data
#[derive(Error, Debug)]
pub enum OutdatedError {
    /// The outdated command could not run or reported an error
    #[error("failed to list outdated packages with `{command}`: {message}")]
    CommandFailed { command: String, message: String },

    /// The outdated data could not be parsed
    #[error("invalid outdated data from {origin}: {message}")]
    InvalidResponse { origin: String, message: String },

    /// Registry lookup failed
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Errors related to package registry communication
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Package not found in registry
    #[error("package '{package}' not found in {registry} registry")]
    PackageNotFound { package: String, registry: String },

    /// Network request failed
    #[error("failed to fetch package '{package}' from {registry}: {message}")]
    NetworkError {
        package: String,
        registry: String,
        message: String,
    },

    /// Rate limit exceeded
    #[error("rate limit exceeded for {registry} registry")]
    RateLimitExceeded { registry: String },

    /// Invalid response from registry
    #[error("invalid response from {registry} for '{package}': {message}")]
    InvalidResponse {
        package: String,
        registry: String,
        message: String,
    },

    /// Timeout
    #[error("timeout while fetching '{package}' from {registry}")]
    Timeout { package: String, registry: String },
}

/// Errors related to package manager install invocations
#[derive(Error, Debug)]
pub enum InstallError {
    /// The package manager executable could not be started
    #[error("failed to run `{command}` in {cwd}: {source}")]
    Spawn {
        command: String,
        cwd: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The package manager exited unsuccessfully
    #[error("`{command}` failed{}{}", exit_code_suffix(.code), stderr_suffix(.stderr))]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

/// Errors related to the release pipeline
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// A release step failed
    #[error("release step '{step}' failed: {message}")]
    StepFailed { step: String, message: String },

    /// The manifest has no version to tag
    #[error("manifest {path} has no \"version\" field to tag")]
    MissingVersion { path: PathBuf },

    /// The manifest could not be loaded
    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

fn exit_code_suffix(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!(" with exit code {}", code),
        None => " (terminated by signal)".to_string(),
    }
}

// Streamed commands leave nothing captured
fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {}", stderr)
    }
}

impl ManifestError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ManifestError::NotFound { path: path.into() }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new WriteError
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::WriteError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new JsonParseError
    pub fn json_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::JsonParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidStructure error
    pub fn invalid_structure(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::InvalidStructure {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl OutdatedError {
    /// Creates a new CommandFailed error
    pub fn command_failed(command: impl Into<String>, message: impl Into<String>) -> Self {
        OutdatedError::CommandFailed {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(origin: impl Into<String>, message: impl Into<String>) -> Self {
        OutdatedError::InvalidResponse {
            origin: origin.into(),
            message: message.into(),
        }
    }
}

impl RegistryError {
    /// Creates a new PackageNotFound error
    pub fn package_not_found(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::PackageNotFound {
            package: package.into(),
            registry: registry.into(),
        }
    }

    /// Creates a new NetworkError
    pub fn network_error(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::NetworkError {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new RateLimitExceeded error
    pub fn rate_limit_exceeded(registry: impl Into<String>) -> Self {
        RegistryError::RateLimitExceeded {
            registry: registry.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::Timeout {
            package: package.into(),
            registry: registry.into(),
        }
    }
}

impl ReleaseError {
    /// Creates a new StepFailed error
    pub fn step_failed(step: impl Into<String>, message: impl Into<String>) -> Self {
        ReleaseError::StepFailed {
            step: step.into(),
            message: message.into(),
        }
    }
}
