//! Core types shared across markundo crates
//!
//! This crate provides the foundational types used by the tree document,
//! the undo engine and the logging facility:
//!
//! - **Identity types**: NodeId, MutationTarget, NodeKind
//! - **Schema constants**: Canonical field keys and event names

pub mod ids;
pub mod schema;

pub use ids::{MutationTarget, NodeId, NodeKind};
