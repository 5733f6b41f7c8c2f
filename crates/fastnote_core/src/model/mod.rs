//! Note tree domain model.
//!
//! # Responsibility
//! - Define the node, color and identifier types shared by store and tree model.
//!
//! # Invariants
//! - The tree is an ordered, acyclic sequence of exclusively owned nodes.
//! - Sibling order is insertion order.

pub mod color;
pub mod node;
