//! Write-through workspace facade.
//!
//! # Responsibility
//! - Load the tree once, apply tree model operations, persist after each one.
//! - Hand callers a refreshed listing after every operation.
//! - Open buffered editor sessions and apply their commits.
//!
//! # Invariants
//! - The in-memory tree is authoritative; a failed save never rolls back the
//!   mutation and is surfaced as `MutationOutcome::save_error`.
//! - Navigation (`enter_folder`, `go_back`) never writes to storage.
//! - Rejected operations leave both tree and storage untouched.

use crate::model::node::{Node, NodeId};
use crate::service::editor_session::EditorSession;
use crate::service::listing::{build_listing, ListingEntry};
use crate::store::{NoteStore, StoreError, StoreResult};
use crate::tree::tree_model::{CommitEdit, TreeError, TreeModel};
use log::{debug, info, warn};

/// Result of a mutating workspace operation that was applied.
#[derive(Debug)]
pub struct MutationOutcome {
    /// Listing of the current sequence after the mutation. Empty when the
    /// current view can no longer be resolved.
    pub listing: Vec<ListingEntry>,
    /// Set when the mutation applied but could not be persisted.
    pub save_error: Option<StoreError>,
}

impl MutationOutcome {
    pub fn is_persisted(&self) -> bool {
        self.save_error.is_none()
    }
}

/// Single-session workspace over one store.
pub struct WorkspaceService<S: NoteStore> {
    tree: TreeModel,
    store: S,
}

impl<S: NoteStore> WorkspaceService<S> {
    /// Loads the stored tree and positions navigation at the root.
    pub fn open(store: S) -> Self {
        let tree = TreeModel::new(store.load());
        info!(
            "event=workspace_open module=workspace status=ok root_items={}",
            tree.root().len()
        );
        Self { tree, store }
    }

    pub fn tree(&self) -> &TreeModel {
        &self.tree
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Listing of the current sequence.
    pub fn listing(&self) -> Result<Vec<ListingEntry>, TreeError> {
        self.tree.current().map(build_listing)
    }

    pub fn can_go_back(&self) -> bool {
        self.tree.can_go_back()
    }

    pub fn add_note(&mut self, title: impl Into<String>) -> Result<MutationOutcome, TreeError> {
        self.tree.add_note(title)?;
        Ok(self.persist("add_note"))
    }

    pub fn add_folder(&mut self, title: impl Into<String>) -> Result<MutationOutcome, TreeError> {
        self.tree.add_folder(title)?;
        Ok(self.persist("add_folder"))
    }

    pub fn rename(
        &mut self,
        index: usize,
        new_title: impl Into<String>,
    ) -> Result<MutationOutcome, TreeError> {
        self.tree.rename(index, new_title)?;
        Ok(self.persist("rename"))
    }

    pub fn toggle_favourite(&mut self, index: usize) -> Result<MutationOutcome, TreeError> {
        self.tree.toggle_favourite(index)?;
        Ok(self.persist("toggle_favourite"))
    }

    pub fn set_color(&mut self, index: usize, color: &str) -> Result<MutationOutcome, TreeError> {
        self.tree.set_color(index, color)?;
        Ok(self.persist("set_color"))
    }

    /// Deletes the item at `index`. Callers confirm with the user beforehand.
    pub fn delete(&mut self, index: usize) -> Result<MutationOutcome, TreeError> {
        let removed = self.tree.delete(index)?;
        debug!(
            "event=node_delete module=workspace status=ok removed_nodes={}",
            removed.subtree_len()
        );
        Ok(self.persist("delete"))
    }

    /// Replaces a note body directly, bypassing an editor session.
    pub fn edit_content(
        &mut self,
        index: usize,
        new_content: impl Into<String>,
    ) -> Result<MutationOutcome, TreeError> {
        self.tree.edit_content(index, new_content)?;
        Ok(self.persist("edit_content"))
    }

    /// Drops the whole tree. Callers confirm with the user beforehand.
    pub fn clear_all(&mut self) -> Result<MutationOutcome, TreeError> {
        self.tree.clear_all();
        Ok(self.persist("clear_all"))
    }

    pub fn enter_folder(&mut self, index: usize) -> Result<Vec<ListingEntry>, TreeError> {
        self.tree.enter_folder(index)?;
        self.listing()
    }

    /// No-op at the root.
    pub fn go_back(&mut self) -> Result<Vec<ListingEntry>, TreeError> {
        self.tree.go_back();
        self.listing()
    }

    /// Opens an editor on the note at `index`.
    pub fn open_editor(&self, index: usize) -> Result<EditorSession, TreeError> {
        let node = self.tree.get(index)?;
        EditorSession::open(index, node)
    }

    /// Applies an editor commit and persists.
    pub fn commit_edit(&mut self, commit: CommitEdit) -> Result<MutationOutcome, TreeError> {
        self.tree.apply_commit(commit)?;
        Ok(self.persist("commit_edit"))
    }

    /// Deletes the note an editor session was opened on and ends the session.
    pub fn delete_edited(&mut self, session: EditorSession) -> Result<MutationOutcome, TreeError> {
        self.delete_by_id(session.id())
    }

    /// Deletes any node by id.
    pub fn delete_by_id(&mut self, id: NodeId) -> Result<MutationOutcome, TreeError> {
        self.tree.delete_by_id(id)?;
        Ok(self.persist("delete_by_id"))
    }

    /// Persists the current tree without mutating it.
    pub fn save(&self) -> StoreResult<()> {
        self.store.save(self.tree.root())
    }

    /// Orderly shutdown: one final save, then hands back the tree.
    pub fn close(self) -> (Vec<Node>, StoreResult<()>) {
        let result = self.save();
        info!(
            "event=workspace_close module=workspace status={}",
            if result.is_ok() { "ok" } else { "error" }
        );
        (self.tree.into_root(), result)
    }

    fn persist(&self, operation: &str) -> MutationOutcome {
        let save_error = self.store.save(self.tree.root()).err();
        if let Some(err) = &save_error {
            warn!(
                "event=workspace_mutation module=workspace status=unsaved op={} error={}",
                operation, err
            );
        } else {
            debug!(
                "event=workspace_mutation module=workspace status=ok op={}",
                operation
            );
        }
        let listing = self.listing().unwrap_or_else(|err| {
            warn!(
                "event=workspace_listing module=workspace status=error op={} error={}",
                operation, err
            );
            Vec::new()
        });
        MutationOutcome {
            listing,
            save_error,
        }
    }
}
