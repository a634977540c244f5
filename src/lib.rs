//! pkgup - package.json dependency updater library
//!
//! This library provides the pieces of the `pkgup` CLI:
//! - Selection of outdated dependencies to rewrite to `*`
//! - Order-preserving package.json reading and writing
//! - Outdated-version sources (npm CLI, npm registry, saved JSON)
//! - Package manager invocation behind an injectable runner
//! - A release pipeline running hooks, publish and tagging

pub mod cli;
pub mod domain;
pub mod error;
pub mod logger;
pub mod manifest;
pub mod orchestrator;
pub mod outdated;
pub mod package_manager;
pub mod progress;
pub mod release;
pub mod update;
