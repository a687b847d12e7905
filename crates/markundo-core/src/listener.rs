//! Mutation notification contract between a document and its observers
//!
//! A `Document` invokes its subscribed listeners synchronously from inside
//! every structural or value mutation. "-ing" callbacks run before the tree
//! is touched, "-ed" callbacks after, and each fires exactly once per
//! logical mutation.

use crate::model::Document;
use markundo_core_types::{MutationTarget, NodeId};

/// Handle returned by `Document::subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

/// Observer of document mutations
///
/// Callbacks receive the document read-only; a listener must not try to
/// mutate the tree it is observing.
pub trait MutationListener {
    /// The value of `node` is about to change; `doc` still shows the old value
    fn value_changing(&self, doc: &Document, node: NodeId);

    /// The value of `node` has changed; `doc` shows the new value
    fn value_changed(&self, doc: &Document, node: NodeId);

    /// `node` has just been linked into `parent`'s `target` collection
    fn node_inserted(&self, doc: &Document, parent: NodeId, node: NodeId, target: MutationTarget);

    /// `node` is about to be unlinked from `parent`'s `target` collection
    fn node_removing(&self, doc: &Document, parent: NodeId, node: NodeId, target: MutationTarget);
}
