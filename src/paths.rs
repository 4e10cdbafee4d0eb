//! Path normalization and display utilities.

use std::{
    env,
    path::{MAIN_SEPARATOR, Path, PathBuf},
};

use path_clean::PathClean;

use crate::error::{Error, Result};

/// Resolve the project root from an optional override and the working directory.
pub fn project_root(explicit: Option<&Path>) -> Result<PathBuf> {
    let cwd = env::current_dir().map_err(|error| Error::CurrentDirMissing { source: error })?;
    let root = match explicit {
        Some(path) if path.is_relative() => cwd.join(path),
        Some(path) => path.to_path_buf(),
        None => cwd,
    };
    Ok(normalize_path(&root))
}

/// Resolve `path` against `base` when it is relative.
pub fn resolve_in(base: &Path, path: &Path) -> PathBuf {
    if path.is_relative() {
        base.join(path).clean()
    } else {
        path.to_path_buf()
    }
}

/// Normalize a path for comparisons by cleaning and canonicalizing when possible.
pub fn normalize_path(path: &Path) -> PathBuf {
    match dunce::canonicalize(path) {
        Ok(canonical) => canonical,
        Err(_) => path.clean(),
    }
}

/// Render a path for display.
///
/// Paths inside the project are shown relative to its root; anything else
/// uses a tilde prefix for the home directory.
pub fn display_path(path: &Path, project_root: &Path) -> String {
    if let Ok(stripped) = path.strip_prefix(project_root)
        && !stripped.as_os_str().is_empty()
    {
        return stripped.display().to_string();
    }
    if let Some(home) = dirs::home_dir()
        && let Ok(stripped) = path.strip_prefix(&home)
    {
        if stripped.as_os_str().is_empty() {
            return "~".to_string();
        }
        return format!("~{}{}", MAIN_SEPARATOR, stripped.display());
    }
    path.display().to_string()
}
