//! Flutter-facing bindings for FastNotes core.

pub mod api;
