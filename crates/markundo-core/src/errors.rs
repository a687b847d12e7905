use markundo_core_types::{MutationTarget, NodeId, NodeKind};
use thiserror::Error;

/// Result type alias using TreeError
pub type Result<T> = std::result::Result<T, TreeError>;

// ========== Error Facility ==========

/// Classification of tree precondition failures
///
/// Each kind maps to a stable error code used in `end_error` log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    NotFound,
    AlreadyLinked,
    NotLinked,
    WrongSlot,
    NotAContainer,
    CycleDetected,
    RootImmovable,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::AlreadyLinked => "ERR_ALREADY_LINKED",
            ExErrorKind::NotLinked => "ERR_NOT_LINKED",
            ExErrorKind::WrongSlot => "ERR_WRONG_SLOT",
            ExErrorKind::NotAContainer => "ERR_NOT_A_CONTAINER",
            ExErrorKind::CycleDetected => "ERR_CYCLE_DETECTED",
            ExErrorKind::RootImmovable => "ERR_ROOT_IMMOVABLE",
        }
    }
}

/// Canonical structured error type
///
/// Classification fields for programmatic handling plus context for
/// debugging. Built from a `TreeError` or directly with the builder methods.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    node_id: Option<NodeId>,
    target: Option<MutationTarget>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            node_id: None,
            target: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add node context
    pub fn with_node(mut self, node: NodeId) -> Self {
        self.node_id = Some(node);
        self
    }

    /// Add collection context
    pub fn with_target(mut self, target: MutationTarget) -> Self {
        self.target = Some(target);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn node_id(&self) -> Option<NodeId> {
        self.node_id
    }

    pub fn target(&self) -> Option<MutationTarget> {
        self.target
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(node) = self.node_id {
            write!(f, " (node: {})", node)?;
        }
        if let Some(target) = self.target {
            write!(f, " (slot: {})", target.as_str())?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Structural precondition failures reported by the tree document
///
/// Replaying a command against a tree it was not recorded on surfaces one of
/// these instead of producing a corrupted tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// Handle does not belong to this document
    #[error("Node not found: {node}")]
    NodeNotFound { node: NodeId },

    /// Node already has a parent and must be removed first
    #[error("Node {node} is already linked under {parent}")]
    AlreadyLinked { node: NodeId, parent: NodeId },

    /// Node is not an entry of the addressed collection
    #[error("Node {node} is not in the {} collection of {parent}", target.as_str())]
    NotLinked {
        node: NodeId,
        parent: NodeId,
        target: MutationTarget,
    },

    /// Anchor sibling for a positional insert is not in the collection
    #[error("Sibling {sibling} is not in the {} collection of {parent}", target.as_str())]
    SiblingNotFound {
        sibling: NodeId,
        parent: NodeId,
        target: MutationTarget,
    },

    /// Attribute placed in a child slot, or anything else in an attribute slot
    #[error("A {kind:?} node cannot go into the {} collection", target.as_str())]
    WrongSlot {
        node: NodeId,
        kind: NodeKind,
        target: MutationTarget,
    },

    /// Parent kind does not own the addressed collection
    #[error("A {kind:?} node has no {} collection", target.as_str())]
    NotAContainer {
        parent: NodeId,
        kind: NodeKind,
        target: MutationTarget,
    },

    /// Linking would make a node its own ancestor
    #[error("Cycle detected: {node} would become its own ancestor")]
    CycleDetected { node: NodeId },

    /// The document root cannot be linked anywhere
    #[error("The document root {node} cannot be moved")]
    RootImmovable { node: NodeId },
}

impl From<TreeError> for ExError {
    fn from(err: TreeError) -> Self {
        let message = err.to_string();
        match err {
            TreeError::NodeNotFound { node } => ExError::new(ExErrorKind::NotFound).with_node(node),
            TreeError::AlreadyLinked { node, .. } => {
                ExError::new(ExErrorKind::AlreadyLinked).with_node(node)
            }
            TreeError::NotLinked { node, target, .. } => ExError::new(ExErrorKind::NotLinked)
                .with_node(node)
                .with_target(target),
            TreeError::SiblingNotFound {
                sibling, target, ..
            } => ExError::new(ExErrorKind::NotLinked)
                .with_node(sibling)
                .with_target(target),
            TreeError::WrongSlot { node, target, .. } => ExError::new(ExErrorKind::WrongSlot)
                .with_node(node)
                .with_target(target),
            TreeError::NotAContainer { parent, target, .. } => {
                ExError::new(ExErrorKind::NotAContainer)
                    .with_node(parent)
                    .with_target(target)
            }
            TreeError::CycleDetected { node } => {
                ExError::new(ExErrorKind::CycleDetected).with_node(node)
            }
            TreeError::RootImmovable { node } => {
                ExError::new(ExErrorKind::RootImmovable).with_node(node)
            }
        }
        .with_message(message)
    }
}
