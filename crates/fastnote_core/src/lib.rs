//! Core domain logic for FastNotes.
//! This crate is the single source of truth for the note tree invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;
pub mod tree;

pub use config::{AppConfig, ConfigError, EditorConfig, WindowConfig, DEFAULT_CONFIG_PATH};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::color::{Color, InvalidColor, DEFAULT_COLOR};
pub use model::node::{Node, NodeId, NodeKind, Tree};
pub use service::editor_session::EditorSession;
pub use service::listing::{build_listing, ListingEntry};
pub use service::workspace_service::{MutationOutcome, WorkspaceService};
pub use store::{JsonStore, NoteStore, StoreError, StoreLocation, StoreResult};
pub use tree::tree_model::{CommitEdit, TreeError, TreeModel};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
