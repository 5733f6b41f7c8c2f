//! Per-user document location.
//!
//! # Invariants
//! - Derivation from a home path is pure and deterministic.
//! - Directory creation is idempotent.

use super::{StoreError, StoreResult};
use std::path::{Path, PathBuf};

/// Application directory created under the user's home.
pub const APP_DIR_NAME: &str = "FastNotes";
/// Document file name inside the application directory.
pub const DATA_FILE_NAME: &str = "data.json";

/// Resolved location of the note document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLocation {
    data_dir: PathBuf,
    data_file: PathBuf,
}

impl StoreLocation {
    /// Derives `<home>/FastNotes/data.json`.
    pub fn from_home(home: &Path) -> Self {
        Self::in_dir(home.join(APP_DIR_NAME))
    }

    /// Uses `dir/data.json` directly.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let data_dir = dir.into();
        let data_file = data_dir.join(DATA_FILE_NAME);
        Self {
            data_dir,
            data_file,
        }
    }

    /// Resolves the location for the current user.
    ///
    /// # Errors
    /// - Returns `HomeDirUnavailable` when no home directory can be found.
    pub fn for_current_user() -> StoreResult<Self> {
        dirs::home_dir()
            .map(|home| Self::from_home(&home))
            .ok_or(StoreError::HomeDirUnavailable)
    }

    pub fn data_dir(&self) -> &Path {
        self.data_dir.as_path()
    }

    pub fn data_file(&self) -> &Path {
        self.data_file.as_path()
    }

    /// Creates the data directory if absent. Repeated calls are no-ops.
    pub fn ensure_dir(&self) -> StoreResult<()> {
        std::fs::create_dir_all(&self.data_dir).map_err(|source| StoreError::CreateDir {
            path: self.data_dir.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::StoreLocation;
    use std::path::Path;

    #[test]
    fn from_home_is_deterministic() {
        let first = StoreLocation::from_home(Path::new("/home/ana"));
        let second = StoreLocation::from_home(Path::new("/home/ana"));
        assert_eq!(first, second);
        assert_eq!(first.data_dir(), Path::new("/home/ana/FastNotes"));
        assert_eq!(first.data_file(), Path::new("/home/ana/FastNotes/data.json"));
    }

    #[test]
    fn ensure_dir_is_idempotent() {
        let temp = tempfile::tempdir().unwrap();
        let location = StoreLocation::from_home(temp.path());
        location.ensure_dir().unwrap();
        location.ensure_dir().unwrap();
        assert!(location.data_dir().is_dir());
    }
}
