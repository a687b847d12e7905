//! markundo Core - Transactional undo/redo for ordered markup trees
//!
//! This crate provides the undo/redo engine of a markup document editor,
//! including:
//! - An arena-backed tree document with child and attribute collections
//! - A synchronous four-method mutation listener contract
//! - Reversible commands (Insert, Remove, Change) with sibling-position replay
//! - A change recorder that groups mutations into user-visible transactions
//! - The undo/redo engine walking whole transactions backward and forward
//! - Markup rendering for inspection and comparison of document states

pub mod commands;
pub mod engine;
pub mod errors;
pub mod history;
pub mod listener;
pub mod logging_facility;
pub mod model;
pub mod recorder;
pub mod render;

pub use markundo_core_types as types;

// Re-export commonly used types
pub use commands::Command;
pub use engine::UndoEngine;
pub use errors::{ExError, ExErrorKind, Result, TreeError};
pub use history::History;
pub use listener::{MutationListener, SubscriptionId};
pub use markundo_core_types::{MutationTarget, NodeId, NodeKind};
pub use model::{Document, Node};
pub use recorder::ChangeRecorder;
pub use render::render_markup;
