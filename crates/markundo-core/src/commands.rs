//! Reversible commands recorded from document mutations
//!
//! Each command describes one atomic tree mutation and can replay itself
//! backward (`undo`) or forward (`redo`) against the document it was
//! recorded on. Replay goes through the document's public mutation API, so a
//! command applied to a tree it does not match surfaces a `TreeError`.

use crate::errors::Result;
use crate::model::Document;
use markundo_core_types::{MutationTarget, NodeId};

/// Command enum covering every recordable mutation
///
/// `range_start` is fixed at creation: it marks the oldest command of a
/// transaction.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `node` was linked into `parent`
    ///
    /// `previous_sibling` is captured lazily by `undo`, right before the node
    /// is unlinked, and used by the next `redo`.
    Insert {
        parent: NodeId,
        node: NodeId,
        target: MutationTarget,
        previous_sibling: Option<NodeId>,
        range_start: bool,
    },

    /// `node` was unlinked from `parent`
    ///
    /// `previous_sibling` is captured eagerly at recording time; once the node
    /// is gone the tree no longer knows where it was.
    Remove {
        parent: NodeId,
        node: NodeId,
        target: MutationTarget,
        previous_sibling: Option<NodeId>,
        range_start: bool,
    },

    /// Scalar value of `node` went from `old_value` to `new_value`
    Change {
        node: NodeId,
        old_value: String,
        new_value: String,
        range_start: bool,
    },
}

impl Command {
    pub fn insert(parent: NodeId, node: NodeId, target: MutationTarget, range_start: bool) -> Self {
        Command::Insert {
            parent,
            node,
            target,
            previous_sibling: None,
            range_start,
        }
    }

    pub fn remove(
        parent: NodeId,
        node: NodeId,
        target: MutationTarget,
        previous_sibling: Option<NodeId>,
        range_start: bool,
    ) -> Self {
        Command::Remove {
            parent,
            node,
            target,
            previous_sibling,
            range_start,
        }
    }

    pub fn change(
        node: NodeId,
        old_value: impl Into<String>,
        new_value: impl Into<String>,
        range_start: bool,
    ) -> Self {
        Command::Change {
            node,
            old_value: old_value.into(),
            new_value: new_value.into(),
            range_start,
        }
    }

    /// Whether this is the oldest command of its transaction
    pub fn is_range_start(&self) -> bool {
        match self {
            Command::Insert { range_start, .. }
            | Command::Remove { range_start, .. }
            | Command::Change { range_start, .. } => *range_start,
        }
    }

    /// The node the mutation was about
    pub fn node(&self) -> NodeId {
        match self {
            Command::Insert { node, .. }
            | Command::Remove { node, .. }
            | Command::Change { node, .. } => *node,
        }
    }

    /// Short caption for undo/redo menu entries
    pub fn label(&self) -> &'static str {
        match self {
            Command::Insert { .. } => "Insert",
            Command::Remove { .. } => "Delete",
            Command::Change { .. } => "Change",
        }
    }

    /// Reverse the mutation, returning the node the caller should focus
    ///
    /// # Errors
    ///
    /// Returns the document's `TreeError` if the tree no longer matches the
    /// state this command was recorded against.
    pub fn undo(&mut self, doc: &mut Document) -> Result<NodeId> {
        match self {
            Command::Insert {
                parent,
                node,
                target,
                previous_sibling,
                ..
            } => {
                *previous_sibling = doc.previous_sibling(*parent, *node, *target)?;
                doc.remove(*parent, *node, *target)?;
                Ok(*parent)
            }
            Command::Remove {
                parent,
                node,
                target,
                previous_sibling,
                ..
            } => {
                relink(doc, *parent, *node, *target, *previous_sibling)?;
                Ok(*node)
            }
            Command::Change {
                node, old_value, ..
            } => {
                doc.set_value(*node, old_value.as_str())?;
                Ok(*node)
            }
        }
    }

    /// Re-apply the mutation, returning the node the caller should focus
    ///
    /// # Errors
    ///
    /// Returns the document's `TreeError` if the tree no longer matches the
    /// state this command was undone from.
    pub fn redo(&mut self, doc: &mut Document) -> Result<NodeId> {
        match self {
            Command::Insert {
                parent,
                node,
                target,
                previous_sibling,
                ..
            } => {
                relink(doc, *parent, *node, *target, *previous_sibling)?;
                Ok(*node)
            }
            Command::Remove {
                parent,
                node,
                target,
                ..
            } => {
                doc.remove(*parent, *node, *target)?;
                Ok(*parent)
            }
            Command::Change {
                node, new_value, ..
            } => {
                doc.set_value(*node, new_value.as_str())?;
                Ok(*node)
            }
        }
    }
}

/// Put `node` back directly after `previous_sibling`, or first if none
fn relink(
    doc: &mut Document,
    parent: NodeId,
    node: NodeId,
    target: MutationTarget,
    previous_sibling: Option<NodeId>,
) -> Result<()> {
    match previous_sibling {
        Some(sibling) => doc.insert_after(parent, node, sibling, target),
        None => doc.insert_first(parent, node, target),
    }
}
