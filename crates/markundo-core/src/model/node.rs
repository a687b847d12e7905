use markundo_core_types::{NodeId, NodeKind};

/// A node as stored in a document's arena
///
/// Read-only outside the crate: every change goes through `Document` so that
/// listeners observe it.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub(crate) kind: NodeKind,
    /// Element or attribute name; empty for other kinds
    pub(crate) name: String,
    /// Scalar content (attribute value, text, comment body)
    pub(crate) value: String,
    /// None for the root and for detached nodes
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) attributes: Vec<NodeId>,
}

impl Node {
    pub(crate) fn new(kind: NodeKind, name: String, value: String) -> Self {
        Self {
            kind,
            name,
            value,
            parent: None,
            children: Vec::new(),
            attributes: Vec::new(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn attributes(&self) -> &[NodeId] {
        &self.attributes
    }

    /// Namespace declarations are added implicitly by markup serializers
    pub fn is_namespace_declaration(&self) -> bool {
        self.kind == NodeKind::Attribute
            && (self.name == "xmlns" || self.name.starts_with("xmlns:"))
    }
}
