//! Error types for the rely CLI.

use std::{io, path::PathBuf, process::ExitCode, result::Result as StdResult};

use thiserror::Error;
use toml::de::Error as TomlError;

/// Result type for rely operations.
pub type Result<T> = StdResult<T, Error>;

/// Errors that can occur while running the CLI.
#[derive(Debug, Error)]
pub enum Error {
    /// The registry has no component with the requested name.
    #[error("Component \"{name}\" does not exist in the registry.")]
    ComponentNotFound {
        /// Missing component name.
        name: String,
    },
    /// A component name cannot be used as a registry key or directory name.
    #[error("Invalid component name \"{name}\"")]
    InvalidComponentName {
        /// Rejected component name.
        name: String,
    },
    /// The registry request failed or returned a non-success status.
    #[error("Network error while fetching \"{name}\" from {url}: {message}")]
    Network {
        /// Component being fetched.
        name: String,
        /// URL that was requested.
        url: String,
        /// Error message.
        message: String,
    },
    /// The registry returned a document that is not a valid component descriptor.
    #[error("Invalid registry entry for \"{name}\": {message}")]
    InvalidDescriptor {
        /// Component being fetched.
        name: String,
        /// Error message describing the shape problem.
        message: String,
    },
    /// A component file or directory could not be written.
    #[error("Failed to write {path}: {source}")]
    ComponentWrite {
        /// Path that failed to write.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// The configuration file could not be read.
    #[error("Failed to read config at {path}: {source}")]
    ConfigRead {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// The configuration file could not be parsed.
    #[error("Failed to parse config at {path}: {source}")]
    ConfigParse {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying parse error.
        source: TomlError,
    },
    /// The registry base URL is not a valid URL.
    #[error("Invalid registry URL: {url}")]
    InvalidUrl {
        /// The invalid URL.
        url: String,
    },
    /// The working directory could not be determined.
    #[error("Failed to resolve the current directory: {source}")]
    CurrentDirMissing {
        /// Underlying IO error.
        source: io::Error,
    },
    /// No package.json was found in the project root.
    #[error("No package.json found in {root}. Make sure you are at the root of your project.")]
    NotAProject {
        /// Project root that was inspected.
        root: PathBuf,
    },
    /// The package.json could not be read or parsed.
    #[error("Failed to read {path}: {message}")]
    PackageJson {
        /// Path to package.json.
        path: PathBuf,
        /// Error message.
        message: String,
    },
    /// The project does not depend on Vue or Nuxt.
    #[error("This project does not appear to use Vue.js. Install Vue first or run this command in a Vue project.")]
    NotVueProject,
    /// An interactive prompt failed.
    #[error("Prompt failed: {message}")]
    PromptFailed {
        /// Error message describing the prompt failure.
        message: String,
    },
    /// The templates directory for a registry build does not exist.
    #[error("Templates directory does not exist: {path}")]
    TemplatesMissing {
        /// Missing templates directory.
        path: PathBuf,
    },
    /// A template file could not be read during a registry build.
    #[error("Failed to read template at {path}: {source}")]
    TemplateRead {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// A registry document could not be written during a registry build.
    #[error("Failed to write registry output at {path}: {source}")]
    RegistryWrite {
        /// Path that failed to write.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// Command output could not be written.
    #[error("Failed to write output: {source}")]
    Output {
        /// Underlying IO error.
        source: io::Error,
    },
    /// A registry document could not be serialized.
    #[error("Failed to serialize registry entry for {name}: {source}")]
    RegistrySerialize {
        /// Component name.
        name: String,
        /// Underlying serialization error.
        source: serde_json::Error,
    },
}

impl Error {
    /// Map errors to exit codes for CLI termination.
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(1)
    }
}
