//! Presence-based integrity checks for installed components.

use std::path::Path;

/// Completeness of a component directory relative to its expected files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrityVerdict {
    /// The component directory does not exist.
    MissingDirectory,
    /// The directory exists but at least one expected file is absent.
    MissingFiles,
    /// Every expected file is present. Contents are not inspected.
    Complete,
}

/// Classify `target_dir` against the file names a component ships.
pub fn check<S: AsRef<str>>(target_dir: &Path, expected: &[S]) -> IntegrityVerdict {
    if !target_dir.is_dir() {
        return IntegrityVerdict::MissingDirectory;
    }

    let missing = expected
        .iter()
        .any(|name| !target_dir.join(name.as_ref()).exists());
    if missing {
        IntegrityVerdict::MissingFiles
    } else {
        IntegrityVerdict::Complete
    }
}
