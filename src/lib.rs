#![warn(missing_docs)]
//! Library support for the rely CLI.
//!
//! `rely add` fetches component descriptors from a static registry, resolves
//! their registry dependencies depth-first and copies their source files into
//! `src/components/{core,ui}/<name>` of the current project.

/// Registry generation from component templates.
mod build;
/// Command-line interface wiring and dispatch.
mod cli;
/// Command implementations.
mod commands;
/// Configuration loading.
mod config;
/// Failure and warning aggregation.
mod diagnostics;
/// Error handling for the crate.
mod error;
/// Presence-based integrity checks.
mod integrity;
/// Writing component files to disk.
mod materialize;
/// Color palette and styling for CLI output.
mod palette;
/// Path normalization and display utilities.
mod paths;
/// Spinner display for resolver progress.
mod progress;
/// Vue project and alias validation.
mod project;
/// Component descriptors and registry clients.
mod registry;
/// Install summary aggregation.
mod report;
/// Dependency resolution and installation.
mod resolver;
/// In-memory registry and builders for tests.
#[cfg(test)]
mod testutil;

pub use crate::error::{Error, Result};

/// Run the CLI, returning a structured error on failure.
pub async fn run() -> Result<()> {
    cli::run().await
}
