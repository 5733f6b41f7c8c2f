//! Display projection of the current sequence.

use crate::model::node::Node;

/// Star appended to favourite entries.
pub const FAVOURITE_MARKER: &str = " ⭐";

/// One row of the note list as a UI would render it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    /// Position in the current sequence; the key for every operation.
    pub index: usize,
    /// `"{n}. title"` for notes, `"[Folder] title"` for folders.
    pub label: String,
    /// Row background color.
    pub color: String,
    pub is_folder: bool,
    pub favourite: bool,
}

impl ListingEntry {
    /// Context-menu label for the favourite toggle.
    pub fn favourite_action_label(&self) -> &'static str {
        if self.favourite {
            "Unfavourite"
        } else {
            "Favourite"
        }
    }
}

/// Builds one entry per item, in sequence order.
pub fn build_listing(items: &[Node]) -> Vec<ListingEntry> {
    items
        .iter()
        .enumerate()
        .map(|(index, node)| {
            let mut label = if node.is_folder() {
                format!("[Folder] {}", node.title)
            } else {
                format!("{}. {}", index + 1, node.title)
            };
            if node.favourite {
                label.push_str(FAVOURITE_MARKER);
            }
            ListingEntry {
                index,
                label,
                color: node.color.to_string(),
                is_folder: node.is_folder(),
                favourite: node.favourite,
            }
        })
        .collect()
}
