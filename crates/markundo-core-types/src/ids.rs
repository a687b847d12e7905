//! Identity and tag types for tree nodes
//!
//! A `NodeId` is a handle into the arena of a single document. Handles are
//! never reused while the document that issued them is alive, so equality of
//! handles is equality of node identity.

use serde::{Deserialize, Serialize};

/// Opaque handle to a node owned by a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
    /// Wrap a raw arena index
    pub fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// Raw arena index
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Ordered collection a structural mutation applies to
///
/// Decided once when a mutation is recorded and carried on the command, so
/// replay never has to guess from the node's kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationTarget {
    /// The ordered child list
    ChildSlot,
    /// The ordered attribute collection of an element
    AttributeSlot,
}

impl MutationTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            MutationTarget::ChildSlot => "child",
            MutationTarget::AttributeSlot => "attribute",
        }
    }
}

/// Kind of a tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Document,
    Element,
    Attribute,
    Text,
    Comment,
}

impl NodeKind {
    /// Whether nodes of this kind may own an attribute collection
    pub fn has_attributes(&self) -> bool {
        matches!(self, NodeKind::Element)
    }

    /// Whether nodes of this kind may own child nodes
    pub fn has_children(&self) -> bool {
        matches!(self, NodeKind::Document | NodeKind::Element)
    }
}
