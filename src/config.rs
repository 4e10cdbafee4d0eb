//! Configuration loading.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::{
    error::{Error, Result},
    registry::DEFAULT_REGISTRY_URL,
};

/// Name of the optional per-project config file.
pub const CONFIG_FILE_NAME: &str = "rely.toml";

/// Parsed configuration for the CLI.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Registry base URL, when configured.
    registry: Option<String>,
}

/// Raw config file structure.
#[derive(Debug, Deserialize)]
struct RawConfig {
    /// Registry base URL.
    registry: Option<String>,
}

impl Config {
    /// Load the config for a project, falling back to defaults when absent.
    pub(crate) fn load(project_root: &Path) -> Result<Self> {
        Self::load_from(&Self::path_for(project_root))
    }

    /// Load a config file from an explicit path.
    pub(crate) fn load_from(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(error) => {
                return Err(Error::ConfigRead {
                    path: path.to_path_buf(),
                    source: error,
                });
            }
        };

        let raw: RawConfig = toml::from_str(&contents).map_err(|error| Error::ConfigParse {
            path: path.to_path_buf(),
            source: error,
        })?;

        let registry = raw
            .registry
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());
        Ok(Self { registry })
    }

    /// Registry URL to use, preferring an explicit override.
    pub(crate) fn registry_url<'a>(&'a self, explicit: Option<&'a str>) -> &'a str {
        explicit
            .or(self.registry.as_deref())
            .unwrap_or(DEFAULT_REGISTRY_URL)
    }

    /// Path of the config file for a project.
    pub(crate) fn path_for(project_root: &Path) -> PathBuf {
        project_root.join(CONFIG_FILE_NAME)
    }
}
