use std::rc::Rc;

use super::node::Node;
use crate::errors::{Result, TreeError};
use crate::listener::{MutationListener, SubscriptionId};
use markundo_core_types::{MutationTarget, NodeId, NodeKind};

/// Arena-backed markup tree
///
/// The document owns every node it ever created; nodes are never freed while
/// the document lives, so a `NodeId` stays valid after the node is unlinked.
/// Not thread-safe - designed for single-threaded use from the editor's UI
/// thread.
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    listeners: Vec<(SubscriptionId, Rc<dyn MutationListener>)>,
    next_subscription: u64,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("root", &self.root)
            .field("nodes", &self.nodes)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document holding only its root node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Document, String::new(), String::new())],
            root: NodeId::from_index(0),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes ever created, attached or not, including the root
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // ===== Creation (detached, not a tree mutation) =====

    pub fn create_element(&mut self, name: impl Into<String>) -> NodeId {
        self.alloc(Node::new(NodeKind::Element, name.into(), String::new()))
    }

    pub fn create_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) -> NodeId {
        self.alloc(Node::new(NodeKind::Attribute, name.into(), value.into()))
    }

    pub fn create_text(&mut self, value: impl Into<String>) -> NodeId {
        self.alloc(Node::new(NodeKind::Text, String::new(), value.into()))
    }

    pub fn create_comment(&mut self, value: impl Into<String>) -> NodeId {
        self.alloc(Node::new(NodeKind::Comment, String::new(), value.into()))
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(node);
        id
    }

    // ===== Queries =====

    /// Get a node by handle
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if the handle was not issued by this document.
    pub fn get(&self, id: NodeId) -> Result<&Node> {
        self.nodes
            .get(id.index())
            .ok_or(TreeError::NodeNotFound { node: id })
    }

    fn get_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(id.index())
            .ok_or(TreeError::NodeNotFound { node: id })
    }

    /// # Errors
    ///
    /// Returns `NodeNotFound` for a foreign handle.
    pub fn value(&self, id: NodeId) -> Result<&str> {
        Ok(self.get(id)?.value())
    }

    /// # Errors
    ///
    /// Returns `NodeNotFound` for a foreign handle.
    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.get(id)?.parent())
    }

    /// The ordered collection of `parent` selected by `target`
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` for a foreign handle, or `NotAContainer` if the
    /// parent's kind has no such collection.
    pub fn collection(&self, parent: NodeId, target: MutationTarget) -> Result<&[NodeId]> {
        let node = self.get(parent)?;
        check_container(parent, node.kind, target)?;
        Ok(match target {
            MutationTarget::ChildSlot => &node.children,
            MutationTarget::AttributeSlot => &node.attributes,
        })
    }

    /// Entry directly before `node` in `parent`'s collection
    ///
    /// # Errors
    ///
    /// Returns `NotLinked` if `node` is not in the collection.
    pub fn previous_sibling(
        &self,
        parent: NodeId,
        node: NodeId,
        target: MutationTarget,
    ) -> Result<Option<NodeId>> {
        let entries = self.collection(parent, target)?;
        let pos = position_of(entries, node).ok_or(TreeError::NotLinked {
            node,
            parent,
            target,
        })?;
        Ok(pos.checked_sub(1).map(|i| entries[i]))
    }

    /// First attribute of `element` with the given name
    pub fn attribute(&self, element: NodeId, name: &str) -> Option<NodeId> {
        let entries = self.collection(element, MutationTarget::AttributeSlot).ok()?;
        entries
            .iter()
            .copied()
            .find(|id| self.nodes[id.index()].name == name)
    }

    /// Whether `id` is the root or its parent chain reaches the root
    ///
    /// For an attribute this means its owning element is attached.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == self.root {
                return true;
            }
            current = match self.get(node) {
                Ok(n) => n.parent,
                Err(_) => return false,
            };
        }
        false
    }

    // ===== Subscriptions =====

    /// Register a listener; it is called synchronously on every mutation
    pub fn subscribe(&mut self, listener: Rc<dyn MutationListener>) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Returns false if the subscription was unknown
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    // ===== Mutations =====

    /// Link `node` as the first entry of `parent`'s collection
    ///
    /// # Errors
    ///
    /// See `insert_at` preconditions.
    pub fn insert_first(&mut self, parent: NodeId, node: NodeId, target: MutationTarget) -> Result<()> {
        self.insert_at(parent, node, target, 0)
    }

    /// Link `node` directly after `previous_sibling`
    ///
    /// # Errors
    ///
    /// Returns `SiblingNotFound` if `previous_sibling` is not in the
    /// collection, plus the usual link preconditions.
    pub fn insert_after(
        &mut self,
        parent: NodeId,
        node: NodeId,
        previous_sibling: NodeId,
        target: MutationTarget,
    ) -> Result<()> {
        let entries = self.collection(parent, target)?;
        let pos = position_of(entries, previous_sibling).ok_or(TreeError::SiblingNotFound {
            sibling: previous_sibling,
            parent,
            target,
        })?;
        self.insert_at(parent, node, target, pos + 1)
    }

    /// Link `node` as the last entry of `parent`'s collection
    ///
    /// # Errors
    ///
    /// See `insert_at` preconditions.
    pub fn append(&mut self, parent: NodeId, node: NodeId, target: MutationTarget) -> Result<()> {
        let len = self.collection(parent, target)?.len();
        self.insert_at(parent, node, target, len)
    }

    fn insert_at(
        &mut self,
        parent: NodeId,
        node: NodeId,
        target: MutationTarget,
        index: usize,
    ) -> Result<()> {
        self.check_link(parent, node, target)?;

        self.get_mut(node)?.parent = Some(parent);
        let owner = self.get_mut(parent)?;
        match target {
            MutationTarget::ChildSlot => owner.children.insert(index, node),
            MutationTarget::AttributeSlot => owner.attributes.insert(index, node),
        }

        for (_, listener) in &self.listeners {
            listener.node_inserted(self, parent, node, target);
        }
        Ok(())
    }

    /// Unlink `node` from `parent`'s collection
    ///
    /// # Errors
    ///
    /// Returns `NotLinked` if `node` is not an entry of that collection.
    pub fn remove(&mut self, parent: NodeId, node: NodeId, target: MutationTarget) -> Result<()> {
        let pos = position_of(self.collection(parent, target)?, node).ok_or(
            TreeError::NotLinked {
                node,
                parent,
                target,
            },
        )?;

        for (_, listener) in &self.listeners {
            listener.node_removing(self, parent, node, target);
        }

        let owner = self.get_mut(parent)?;
        match target {
            MutationTarget::ChildSlot => owner.children.remove(pos),
            MutationTarget::AttributeSlot => owner.attributes.remove(pos),
        };
        self.get_mut(node)?.parent = None;
        Ok(())
    }

    /// Replace the scalar value of `node`
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` for a foreign handle.
    pub fn set_value(&mut self, node: NodeId, value: impl Into<String>) -> Result<()> {
        self.get(node)?;

        for (_, listener) in &self.listeners {
            listener.value_changing(self, node);
        }
        self.get_mut(node)?.value = value.into();
        for (_, listener) in &self.listeners {
            listener.value_changed(self, node);
        }
        Ok(())
    }

    fn check_link(&self, parent: NodeId, node: NodeId, target: MutationTarget) -> Result<()> {
        let owner = self.get(parent)?;
        check_container(parent, owner.kind, target)?;

        if node == self.root {
            return Err(TreeError::RootImmovable { node });
        }
        let child = self.get(node)?;
        if let Some(current) = child.parent {
            return Err(TreeError::AlreadyLinked {
                node,
                parent: current,
            });
        }

        let fits = match target {
            MutationTarget::AttributeSlot => child.kind == NodeKind::Attribute,
            MutationTarget::ChildSlot => {
                !matches!(child.kind, NodeKind::Attribute | NodeKind::Document)
            }
        };
        if !fits {
            return Err(TreeError::WrongSlot {
                node,
                kind: child.kind,
                target,
            });
        }

        // parent must not sit below node
        let mut current = Some(parent);
        while let Some(ancestor) = current {
            if ancestor == node {
                return Err(TreeError::CycleDetected { node });
            }
            current = self.get(ancestor)?.parent;
        }
        Ok(())
    }
}

fn check_container(parent: NodeId, kind: NodeKind, target: MutationTarget) -> Result<()> {
    let ok = match target {
        MutationTarget::ChildSlot => kind.has_children(),
        MutationTarget::AttributeSlot => kind.has_attributes(),
    };
    if ok {
        Ok(())
    } else {
        Err(TreeError::NotAContainer {
            parent,
            kind,
            target,
        })
    }
}

fn position_of(entries: &[NodeId], node: NodeId) -> Option<usize> {
    entries.iter().position(|id| *id == node)
}
