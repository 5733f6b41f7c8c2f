//! In-memory tree model with positional addressing.
//!
//! # Responsibility
//! - Apply structural operations to the currently displayed sequence.
//! - Track folder navigation as a stack of prior contexts.
//!
//! # Invariants
//! - Index-based operations address the current sequence only.
//! - Invalid input is rejected before any mutation.
//! - Operations never touch storage; persisting is the caller's step.
//! - Folders are only created fresh, so the tree stays acyclic.

use crate::model::color::{Color, InvalidColor};
use crate::model::node::{find_node, find_node_mut, remove_node, Node, NodeId, NodeKind, Tree};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from tree model operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// Index is outside `[0, len)` of the current sequence.
    IndexOutOfRange { index: usize, len: usize },
    /// Title is blank after trim.
    EmptyTitle,
    /// Operation requires a note but the target is a folder.
    NotANote(usize),
    /// Operation requires a folder but the target is a note.
    NotAFolder(usize),
    /// Color input failed validation.
    InvalidColor(InvalidColor),
    /// Current folder context no longer exists in the tree.
    StaleFolder(NodeId),
    /// Id-addressed node does not exist.
    NodeNotFound(NodeId),
    /// Folder is the current view or on the navigation stack.
    FolderOpen(NodeId),
}

impl Display for TreeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for sequence of length {len}")
            }
            Self::EmptyTitle => write!(f, "title must not be blank"),
            Self::NotANote(index) => write!(f, "item at index {index} is not a note"),
            Self::NotAFolder(index) => write!(f, "item at index {index} is not a folder"),
            Self::InvalidColor(err) => write!(f, "{err}"),
            Self::StaleFolder(id) => write!(f, "current folder no longer exists: {id}"),
            Self::NodeNotFound(id) => write!(f, "node not found: {id}"),
            Self::FolderOpen(id) => write!(f, "folder is open in the current view: {id}"),
        }
    }
}

impl Error for TreeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidColor(err) => Some(err),
            _ => None,
        }
    }
}

impl From<InvalidColor> for TreeError {
    fn from(value: InvalidColor) -> Self {
        Self::InvalidColor(value)
    }
}

/// Editor commit applied atomically to one note, addressed by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitEdit {
    pub id: NodeId,
    pub content: String,
    pub color: Color,
}

/// Note tree plus navigation state.
#[derive(Debug, Clone, Default)]
pub struct TreeModel {
    root: Tree,
    current_folder: Option<NodeId>,
    folder_stack: Vec<Option<NodeId>>,
}

impl TreeModel {
    /// Creates a model positioned at the root of `root`.
    pub fn new(root: Tree) -> Self {
        Self {
            root,
            current_folder: None,
            folder_stack: Vec::new(),
        }
    }

    /// Root sequence, as persisted.
    pub fn root(&self) -> &[Node] {
        self.root.as_slice()
    }

    pub fn into_root(self) -> Tree {
        self.root
    }

    /// Folder whose contents are displayed. `None` means root.
    pub fn current_folder(&self) -> Option<NodeId> {
        self.current_folder
    }

    /// Number of saved contexts available to `go_back`.
    pub fn depth(&self) -> usize {
        self.folder_stack.len()
    }

    pub fn can_go_back(&self) -> bool {
        !self.folder_stack.is_empty()
    }

    /// Returns the currently displayed sequence.
    pub fn current(&self) -> Result<&[Node], TreeError> {
        match self.current_folder {
            None => Ok(self.root.as_slice()),
            Some(folder_id) => find_node(&self.root, folder_id)
                .and_then(Node::contents)
                .ok_or(TreeError::StaleFolder(folder_id)),
        }
    }

    /// Returns the item at `index` of the current sequence.
    pub fn get(&self, index: usize) -> Result<&Node, TreeError> {
        let items = self.current()?;
        items.get(index).ok_or(TreeError::IndexOutOfRange {
            index,
            len: items.len(),
        })
    }

    /// Looks up any node by id, regardless of navigation context.
    pub fn find(&self, id: NodeId) -> Option<&Node> {
        find_node(&self.root, id)
    }

    /// Appends a new empty note to the current sequence.
    pub fn add_note(&mut self, title: impl Into<String>) -> Result<NodeId, TreeError> {
        let title = normalize_title(title.into())?;
        self.push(Node::note(title))
    }

    /// Appends a new empty folder to the current sequence.
    pub fn add_folder(&mut self, title: impl Into<String>) -> Result<NodeId, TreeError> {
        let title = normalize_title(title.into())?;
        self.push(Node::folder(title))
    }

    /// Replaces the title at `index`. A blank title leaves the item unchanged.
    pub fn rename(&mut self, index: usize, new_title: impl Into<String>) -> Result<(), TreeError> {
        let item = self.item_mut(index)?;
        if let Ok(title) = normalize_title(new_title.into()) {
            item.title = title;
        }
        Ok(())
    }

    /// Flips `favourite` at `index` and returns the new value.
    pub fn toggle_favourite(&mut self, index: usize) -> Result<bool, TreeError> {
        let item = self.item_mut(index)?;
        item.favourite = !item.favourite;
        Ok(item.favourite)
    }

    /// Replaces the color at `index` after validating `color`.
    pub fn set_color(&mut self, index: usize, color: &str) -> Result<(), TreeError> {
        let color = Color::parse(color)?;
        self.item_mut(index)?.color = color;
        Ok(())
    }

    /// Removes and returns the item at `index`; later siblings shift down.
    pub fn delete(&mut self, index: usize) -> Result<Node, TreeError> {
        let items = self.current_mut()?;
        if index >= items.len() {
            return Err(TreeError::IndexOutOfRange {
                index,
                len: items.len(),
            });
        }
        Ok(items.remove(index))
    }

    /// Makes the folder at `index` the current sequence.
    pub fn enter_folder(&mut self, index: usize) -> Result<NodeId, TreeError> {
        let item = self.get(index)?;
        if !item.is_folder() {
            return Err(TreeError::NotAFolder(index));
        }
        let folder_id = item.id;
        self.folder_stack.push(self.current_folder);
        self.current_folder = Some(folder_id);
        Ok(folder_id)
    }

    /// Restores the previous context. Returns `false` when the stack is empty.
    pub fn go_back(&mut self) -> bool {
        match self.folder_stack.pop() {
            Some(previous) => {
                self.current_folder = previous;
                true
            }
            None => false,
        }
    }

    /// Drops every node and returns navigation to the empty root.
    pub fn clear_all(&mut self) {
        self.root.clear();
        self.current_folder = None;
        self.folder_stack.clear();
    }

    /// Replaces the body of the note at `index`.
    pub fn edit_content(
        &mut self,
        index: usize,
        new_content: impl Into<String>,
    ) -> Result<(), TreeError> {
        let item = self.item_mut(index)?;
        match &mut item.kind {
            NodeKind::Note { content } => {
                *content = new_content.into();
                Ok(())
            }
            NodeKind::Folder { .. } => Err(TreeError::NotANote(index)),
        }
    }

    /// Applies an editor commit to the note it was opened from.
    pub fn apply_commit(&mut self, commit: CommitEdit) -> Result<(), TreeError> {
        let node =
            find_node_mut(&mut self.root, commit.id).ok_or(TreeError::NodeNotFound(commit.id))?;
        match &mut node.kind {
            NodeKind::Note { content } => {
                *content = commit.content;
                node.color = commit.color;
                Ok(())
            }
            NodeKind::Folder { .. } => Err(TreeError::NodeNotFound(commit.id)),
        }
    }

    /// Removes a node by id from wherever it lives.
    pub fn delete_by_id(&mut self, id: NodeId) -> Result<Node, TreeError> {
        if self.current_folder == Some(id) || self.folder_stack.contains(&Some(id)) {
            return Err(TreeError::FolderOpen(id));
        }
        remove_node(&mut self.root, id).ok_or(TreeError::NodeNotFound(id))
    }

    fn push(&mut self, node: Node) -> Result<NodeId, TreeError> {
        let id = node.id;
        self.current_mut()?.push(node);
        Ok(id)
    }

    fn current_mut(&mut self) -> Result<&mut Vec<Node>, TreeError> {
        match self.current_folder {
            None => Ok(&mut self.root),
            Some(folder_id) => match find_node_mut(&mut self.root, folder_id) {
                Some(Node {
                    kind: NodeKind::Folder { contents },
                    ..
                }) => Ok(contents),
                _ => Err(TreeError::StaleFolder(folder_id)),
            },
        }
    }

    fn item_mut(&mut self, index: usize) -> Result<&mut Node, TreeError> {
        let items = self.current_mut()?;
        let len = items.len();
        items
            .get_mut(index)
            .ok_or(TreeError::IndexOutOfRange { index, len })
    }
}

/// Titles are stored as typed; only blank input is rejected.
fn normalize_title(value: String) -> Result<String, TreeError> {
    if value.trim().is_empty() {
        return Err(TreeError::EmptyTitle);
    }
    Ok(value)
}

#[cfg(test)]
impl TreeModel {
    /// Model whose current folder id no longer resolves.
    pub(crate) fn with_stale_folder(root: Tree, missing: NodeId) -> Self {
        Self {
            root,
            current_folder: Some(missing),
            folder_stack: vec![None],
        }
    }
}
