//! JSON document store.
//!
//! # Responsibility
//! - Read and write the note tree as one pretty-printed JSON array.
//! - Emit `store_load` / `store_save` events with duration and status.
//!
//! # Invariants
//! - Saves go through a temp file in the data directory and an atomic rename,
//!   so readers never observe a half-written document.
//! - A failed save leaves the previous document in place.
//! - Loaded trees never contain two nodes with the same id.

use super::location::StoreLocation;
use super::{NoteStore, StoreResult};
use crate::model::node::{count_nodes, reassign_duplicate_ids, Node, Tree};
use log::{error, info, warn};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::io::{ErrorKind, Write};
use std::time::Instant;
use tempfile::NamedTempFile;

const DOCUMENT_INDENT: &[u8] = b"    ";

/// File-backed store for the whole note tree.
#[derive(Debug, Clone)]
pub struct JsonStore {
    location: StoreLocation,
}

impl JsonStore {
    /// Creates a store bound to `location`. Nothing is touched on disk yet.
    pub fn new(location: StoreLocation) -> Self {
        Self { location }
    }

    /// Creates a store at `<home>/FastNotes/data.json` for the current user.
    pub fn for_current_user() -> StoreResult<Self> {
        StoreLocation::for_current_user().map(Self::new)
    }

    pub fn location(&self) -> &StoreLocation {
        &self.location
    }

    /// Strict load used by diagnostics.
    ///
    /// Returns `Ok(None)` when no document exists. Ids repeated in the
    /// document are replaced so every node is addressable on its own.
    ///
    /// # Errors
    /// - Returns `Io` when the document exists but cannot be read.
    /// - Returns `Json` when the document is malformed.
    pub fn try_load(&self) -> StoreResult<Option<Tree>> {
        let raw = match std::fs::read(self.location.data_file()) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let mut tree = serde_json::from_slice::<Tree>(&raw)?;
        let replaced = reassign_duplicate_ids(&mut tree);
        if replaced > 0 {
            warn!(
                "event=store_load module=store status=repaired duplicate_ids={} path={}",
                replaced,
                self.location.data_file().display()
            );
        }
        Ok(Some(tree))
    }

    fn write_document(&self, tree: &[Node]) -> StoreResult<()> {
        self.location.ensure_dir()?;

        let mut payload = Vec::new();
        let formatter = PrettyFormatter::with_indent(DOCUMENT_INDENT);
        let mut serializer = Serializer::with_formatter(&mut payload, formatter);
        tree.serialize(&mut serializer)?;

        let mut file = NamedTempFile::new_in(self.location.data_dir())?;
        file.write_all(&payload)?;
        file.as_file().sync_all()?;
        file.persist(self.location.data_file()).map_err(|err| err.error)?;
        Ok(())
    }
}

impl NoteStore for JsonStore {
    fn load(&self) -> Tree {
        let started_at = Instant::now();
        let path = self.location.data_file();
        match self.try_load() {
            Ok(Some(tree)) => {
                info!(
                    "event=store_load module=store status=ok nodes={} duration_ms={}",
                    count_nodes(&tree),
                    started_at.elapsed().as_millis()
                );
                tree
            }
            Ok(None) => {
                info!(
                    "event=store_load module=store status=missing path={}",
                    path.display()
                );
                Vec::new()
            }
            Err(err) => {
                // Corrupt or unreadable documents are treated as no data.
                error!(
                    "event=store_load module=store status=recovered error_code=store_load_failed path={} error={}",
                    path.display(),
                    err
                );
                Vec::new()
            }
        }
    }

    fn save(&self, tree: &[Node]) -> StoreResult<()> {
        let started_at = Instant::now();
        match self.write_document(tree) {
            Ok(()) => {
                info!(
                    "event=store_save module=store status=ok nodes={} duration_ms={}",
                    count_nodes(tree),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=store_save module=store status=error error_code=store_save_failed path={} duration_ms={} error={}",
                    self.location.data_file().display(),
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}
