//! Note/folder node model and its document encoding.
//!
//! # Responsibility
//! - Define the tagged node shared by notes and folders.
//! - Map nodes to and from the persisted JSON document shape.
//!
//! # Invariants
//! - A folder exclusively owns its `contents`; nodes are never shared.
//! - Every node carries a stable `NodeId`, generated when absent on load.
//! - `is_folder` absent or `false` decodes as a note.
//! - Unknown document fields are ignored.

use super::color::Color;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashSet;
use uuid::Uuid;

/// Stable node identifier.
///
/// Positional indices remain the public addressing scheme; ids only anchor
/// navigation context and editor commits.
pub type NodeId = Uuid;

/// Ordered root sequence of the note tree.
pub type Tree = Vec<Node>;

/// Variant payload of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Plain-text note body (possibly empty).
    Note { content: String },
    /// Ordered child nodes, arbitrarily nested.
    Folder { contents: Vec<Node> },
}

/// One entry of the note tree.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "NodeRecord")]
pub struct Node {
    pub id: NodeId,
    /// Display title. Non-empty for nodes created through the tree model.
    pub title: String,
    pub color: Color,
    /// Only surfaced for notes; preserved untouched on folders.
    pub favourite: bool,
    pub kind: NodeKind,
}

impl Node {
    /// Creates an empty note with default color and `favourite = false`.
    pub fn note(title: impl Into<String>) -> Self {
        Self::new(
            title,
            NodeKind::Note {
                content: String::new(),
            },
        )
    }

    /// Creates an empty folder with default color.
    pub fn folder(title: impl Into<String>) -> Self {
        Self::new(
            title,
            NodeKind::Folder {
                contents: Vec::new(),
            },
        )
    }

    fn new(title: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            color: Color::default(),
            favourite: false,
            kind,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.kind, NodeKind::Folder { .. })
    }

    /// Returns the note body, or `None` for folders.
    pub fn content(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Note { content } => Some(content.as_str()),
            NodeKind::Folder { .. } => None,
        }
    }

    /// Returns folder children, or `None` for notes.
    pub fn contents(&self) -> Option<&[Node]> {
        match &self.kind {
            NodeKind::Note { .. } => None,
            NodeKind::Folder { contents } => Some(contents.as_slice()),
        }
    }

    /// Builder-style helper used by fixtures and import paths.
    pub fn with_content(mut self, value: impl Into<String>) -> Self {
        if let NodeKind::Note { content } = &mut self.kind {
            *content = value.into();
        }
        self
    }

    /// Builder-style helper used by fixtures and import paths.
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        if let NodeKind::Folder { contents } = &mut self.kind {
            *contents = children;
        }
        self
    }

    /// Counts this node and all of its descendants.
    pub fn subtree_len(&self) -> usize {
        1 + self
            .contents()
            .map(count_nodes)
            .unwrap_or_default()
    }
}

/// Counts every node in a sequence, descending into folders.
pub fn count_nodes(nodes: &[Node]) -> usize {
    nodes.iter().map(Node::subtree_len).sum()
}

/// Locates a node by id anywhere below `nodes`.
pub fn find_node(nodes: &[Node], id: NodeId) -> Option<&Node> {
    for node in nodes {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = node.contents().and_then(|children| find_node(children, id)) {
            return Some(found);
        }
    }
    None
}

/// Mutable counterpart of [`find_node`].
pub fn find_node_mut(nodes: &mut [Node], id: NodeId) -> Option<&mut Node> {
    for node in nodes.iter_mut() {
        if node.id == id {
            return Some(node);
        }
        if let NodeKind::Folder { contents } = &mut node.kind {
            if let Some(found) = find_node_mut(contents, id) {
                return Some(found);
            }
        }
    }
    None
}

/// Removes a node by id from whichever sequence owns it.
pub fn remove_node(nodes: &mut Vec<Node>, id: NodeId) -> Option<Node> {
    if let Some(position) = nodes.iter().position(|node| node.id == id) {
        return Some(nodes.remove(position));
    }
    for node in nodes.iter_mut() {
        if let NodeKind::Folder { contents } = &mut node.kind {
            if let Some(removed) = remove_node(contents, id) {
                return Some(removed);
            }
        }
    }
    None
}

/// Gives every node whose id was already seen earlier in document order a
/// fresh id. Returns how many ids were replaced.
pub fn reassign_duplicate_ids(nodes: &mut [Node]) -> usize {
    fn walk(nodes: &mut [Node], seen: &mut HashSet<NodeId>) -> usize {
        let mut replaced = 0;
        for node in nodes.iter_mut() {
            if !seen.insert(node.id) {
                node.id = Uuid::new_v4();
                seen.insert(node.id);
                replaced += 1;
            }
            if let NodeKind::Folder { contents } = &mut node.kind {
                replaced += walk(contents, seen);
            }
        }
        replaced
    }
    walk(nodes, &mut HashSet::new())
}

/// Persisted document shape, read side.
#[derive(Deserialize)]
struct NodeRecord {
    #[serde(default = "Uuid::new_v4")]
    id: NodeId,
    title: String,
    #[serde(default)]
    color: Color,
    #[serde(default)]
    favourite: bool,
    #[serde(default)]
    is_folder: bool,
    #[serde(default)]
    content: String,
    #[serde(default)]
    contents: Vec<Node>,
}

impl From<NodeRecord> for Node {
    fn from(record: NodeRecord) -> Self {
        let kind = if record.is_folder {
            NodeKind::Folder {
                contents: record.contents,
            }
        } else {
            NodeKind::Note {
                content: record.content,
            }
        };
        Self {
            id: record.id,
            title: record.title,
            color: record.color,
            favourite: record.favourite,
            kind,
        }
    }
}

/// Persisted document shape, write side. Borrows to avoid cloning subtrees.
#[derive(Serialize)]
struct NodeRecordRef<'a> {
    id: &'a NodeId,
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_folder: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    contents: Option<&'a [Node]>,
    color: &'a Color,
    favourite: bool,
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let record = NodeRecordRef {
            id: &self.id,
            title: self.title.as_str(),
            content: self.content(),
            is_folder: self.is_folder().then_some(true),
            contents: self.contents(),
            color: &self.color,
            favourite: self.favourite,
        };
        record.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::{count_nodes, find_node, reassign_duplicate_ids, remove_node, Node, NodeKind};
    use serde_json::json;

    #[test]
    fn note_without_optional_fields_gets_defaults() {
        let node: Node = serde_json::from_value(json!({"title": "a", "content": "b"})).unwrap();
        assert_eq!(node.color.as_str(), "white");
        assert!(!node.favourite);
        assert_eq!(node.content(), Some("b"));
    }

    #[test]
    fn folder_flag_selects_folder_variant() {
        let node: Node = serde_json::from_value(json!({
            "title": "Work",
            "is_folder": true,
            "contents": [{"title": "Todo", "content": ""}],
            "color": "white"
        }))
        .unwrap();
        assert!(node.is_folder());
        assert_eq!(node.contents().unwrap().len(), 1);
    }

    #[test]
    fn is_folder_false_decodes_as_note() {
        let node: Node =
            serde_json::from_value(json!({"title": "n", "is_folder": false, "contents": []}))
                .unwrap();
        assert!(matches!(node.kind, NodeKind::Note { .. }));
    }

    #[test]
    fn folder_encoding_omits_note_fields() {
        let value = serde_json::to_value(Node::folder("Work")).unwrap();
        assert_eq!(value["is_folder"], json!(true));
        assert!(value.get("content").is_none());

        let value = serde_json::to_value(Node::note("Todo")).unwrap();
        assert!(value.get("is_folder").is_none());
        assert_eq!(value["content"], json!(""));
    }

    #[test]
    fn lookup_helpers_descend_into_folders() {
        let inner = Node::note("deep");
        let inner_id = inner.id;
        let mut tree = vec![
            Node::note("top"),
            Node::folder("f").with_children(vec![Node::folder("g").with_children(vec![inner])]),
        ];
        assert_eq!(count_nodes(&tree), 4);
        assert_eq!(find_node(&tree, inner_id).unwrap().title, "deep");

        let removed = remove_node(&mut tree, inner_id).unwrap();
        assert_eq!(removed.title, "deep");
        assert_eq!(count_nodes(&tree), 3);
    }

    #[test]
    fn duplicate_ids_keep_first_occurrence() {
        let child = Node::note("A");
        let mut copied_child = Node::note("B");
        copied_child.id = child.id;
        let first = Node::folder("Work").with_children(vec![child]);
        let mut copy = Node::folder("Home").with_children(vec![copied_child]);
        copy.id = first.id;
        let original_id = first.id;
        let mut tree = vec![first, copy];

        assert_eq!(reassign_duplicate_ids(&mut tree), 2);
        assert_eq!(tree[0].id, original_id);
        assert_ne!(tree[1].id, original_id);
        assert_ne!(
            tree[0].contents().unwrap()[0].id,
            tree[1].contents().unwrap()[0].id
        );
        assert_eq!(reassign_duplicate_ids(&mut tree), 0);
    }
}
