//! Buffered note editor session.
//!
//! # Responsibility
//! - Hold a detached copy of one note's body and color while it is edited.
//! - Turn the buffered state into a single `CommitEdit` command.
//!
//! # Invariants
//! - The session never aliases the live tree; edits reach it only via commit.
//! - Closing a session commits. Only `discard` drops buffered edits.

use crate::model::color::Color;
use crate::model::node::{Node, NodeId, NodeKind};
use crate::tree::tree_model::{CommitEdit, TreeError};

/// Editor state for one note, addressed by stable id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSession {
    id: NodeId,
    title: String,
    content: String,
    color: Color,
    dirty: bool,
}

impl EditorSession {
    /// Opens a session on `node` found at `index`.
    ///
    /// # Errors
    /// - `NotANote` when `node` is a folder.
    pub(crate) fn open(index: usize, node: &Node) -> Result<Self, TreeError> {
        let NodeKind::Note { content } = &node.kind else {
            return Err(TreeError::NotANote(index));
        };
        Ok(Self {
            id: node.id,
            title: node.title.clone(),
            content: content.clone(),
            color: node.color.clone(),
            dirty: false,
        })
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Window title; the editor does not rename.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    pub fn content(&self) -> &str {
        self.content.as_str()
    }

    pub fn color(&self) -> &Color {
        &self.color
    }

    /// Whether buffered state differs from what was opened.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.dirty = true;
    }

    /// Changes the buffered background color.
    pub fn choose_color(&mut self, color: &str) -> Result<(), TreeError> {
        self.color = Color::parse(color)?;
        self.dirty = true;
        Ok(())
    }

    /// Explicit save.
    pub fn commit(self) -> CommitEdit {
        CommitEdit {
            id: self.id,
            content: self.content,
            color: self.color,
        }
    }

    /// Closing the editor saves.
    pub fn close(self) -> CommitEdit {
        self.commit()
    }

    /// Drops buffered edits without touching the tree.
    pub fn discard(self) {}
}
