//! Writing component files into the project tree.

use std::{fs, path::Path};

use tracing::debug;

use crate::{
    error::{Error, Result},
    registry::RegistryFile,
};

/// Write every file into `target_dir`, creating it and its parents as needed.
///
/// Existing files are overwritten unconditionally.
pub fn materialize(target_dir: &Path, files: &[RegistryFile]) -> Result<()> {
    fs::create_dir_all(target_dir).map_err(|error| Error::ComponentWrite {
        path: target_dir.to_path_buf(),
        source: error,
    })?;

    for file in files {
        let path = target_dir.join(&file.name);
        debug!(path = %path.display(), bytes = file.content.len(), "writing component file");
        fs::write(&path, &file.content).map_err(|error| Error::ComponentWrite {
            path: path.clone(),
            source: error,
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::materialize;
    use crate::{error::Error, registry::RegistryFile};

    fn file(name: &str, content: &str) -> RegistryFile {
        RegistryFile {
            name: name.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn creates_nested_directories() {
        let dir = tempdir().expect("tempdir");
        let target = dir.path().join("src/components/ui/button");
        materialize(&target, &[file("Button.vue", "<template />")]).expect("materialize");

        let written = fs::read_to_string(target.join("Button.vue")).expect("read");
        assert_eq!(written, "<template />");
    }

    #[test]
    fn overwrites_existing_files() {
        let dir = tempdir().expect("tempdir");
        fs::write(dir.path().join("index.ts"), "stale").expect("write");
        materialize(dir.path(), &[file("index.ts", "fresh")]).expect("materialize");

        let written = fs::read_to_string(dir.path().join("index.ts")).expect("read");
        assert_eq!(written, "fresh");
    }

    #[test]
    fn reports_write_failures() {
        let dir = tempdir().expect("tempdir");
        let blocker = dir.path().join("button");
        fs::write(&blocker, "not a directory").expect("write");

        let error = materialize(&blocker, &[file("Button.vue", "")]).expect_err("should fail");
        assert!(matches!(error, Error::ComponentWrite { .. }));
    }
}
