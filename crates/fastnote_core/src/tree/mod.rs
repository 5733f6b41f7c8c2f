//! Structural operations over the note tree.
//!
//! # Responsibility
//! - Own the in-memory tree and the folder navigation stack.
//! - Expose index-addressed mutations on the current sequence.
//!
//! # Invariants
//! - Every operation is a pure in-memory transform.

pub mod tree_model;
