//! Note tree persistence.
//!
//! # Responsibility
//! - Round-trip the whole tree to one document at a per-user location.
//! - Recover from missing or corrupt documents without failing the caller.
//!
//! # Invariants
//! - A save writes the full tree; there are no incremental writes.
//! - Load never returns an error; corruption degrades to an empty tree.
//! - The document location is an explicit value, never ambient state.

use crate::model::node::{Node, Tree};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod json_store;
mod location;

pub use json_store::JsonStore;
pub use location::{StoreLocation, APP_DIR_NAME, DATA_FILE_NAME};

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from store operations.
#[derive(Debug)]
pub enum StoreError {
    /// Filesystem read/write/rename failure.
    Io(std::io::Error),
    /// Tree could not be encoded, or document could not be decoded.
    Json(serde_json::Error),
    /// Data directory could not be created.
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The current user's home directory could not be determined.
    HomeDirUnavailable,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "invalid note document: {err}"),
            Self::CreateDir { path, source } => write!(
                f,
                "failed to create data directory `{}`: {source}",
                path.display()
            ),
            Self::HomeDirUnavailable => write!(f, "home directory is unavailable"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::CreateDir { source, .. } => Some(source),
            Self::HomeDirUnavailable => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Persistence contract consumed by the workspace service.
pub trait NoteStore {
    /// Loads the full tree. Missing or corrupt documents yield an empty tree.
    fn load(&self) -> Tree;
    /// Replaces the stored document with `tree`.
    fn save(&self, tree: &[Node]) -> StoreResult<()>;
}

impl<S: NoteStore + ?Sized> NoteStore for &S {
    fn load(&self) -> Tree {
        (**self).load()
    }

    fn save(&self, tree: &[Node]) -> StoreResult<()> {
        (**self).save(tree)
    }
}
