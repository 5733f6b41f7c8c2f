//! Core use-case services.
//!
//! # Responsibility
//! - Combine tree model and store into write-through use-cases.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod editor_session;
pub mod listing;
pub mod workspace_service;
