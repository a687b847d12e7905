//! Undo/redo engine
//!
//! The engine owns the change recorder of one document and replays whole
//! transactions from the recorded history.
//!
//! ## Replay contract
//!
//! - `undo` pops commands until it has undone one whose `range_start` is
//!   set (or the stack runs dry)
//! - `redo` pops the top command, then keeps going while the next command
//!   is not a range start
//! - The recorder is silenced for the whole loop, so replay never records
//!   new commands and never clears the opposite stack
//!
//! ## Example
//!
//! ```
//! use markundo_core::{Document, MutationTarget, UndoEngine};
//!
//! let mut doc = Document::new();
//! let engine = UndoEngine::attach(&mut doc);
//!
//! let product = doc.create_element("Product");
//! engine.begin_new_command_range();
//! doc.append(doc.root(), product, MutationTarget::ChildSlot).unwrap();
//!
//! assert_eq!(engine.next_undo_label(), "Insert");
//! assert_eq!(engine.undo(&mut doc).unwrap(), Some(doc.root()));
//! assert!(doc.get(product).unwrap().parent().is_none());
//! ```

use std::rc::Rc;
use std::time::Instant;

use crate::errors::Result;
use crate::history::History;
use crate::listener::SubscriptionId;
use crate::model::Document;
use crate::recorder::ChangeRecorder;
use crate::{log_op_end, log_op_error, log_op_start, log_replay_end};
use markundo_core_types::NodeId;

#[derive(Debug)]
pub struct UndoEngine {
    recorder: Rc<ChangeRecorder>,
    subscription: SubscriptionId,
}

impl UndoEngine {
    /// Create an engine and subscribe its recorder to `doc`
    ///
    /// Mutations made before attaching are not undoable.
    pub fn attach(doc: &mut Document) -> Self {
        let recorder = Rc::new(ChangeRecorder::new());
        let subscription = doc.subscribe(recorder.clone());
        Self {
            recorder,
            subscription,
        }
    }

    /// Unsubscribe from `doc`; the history is dropped with the engine
    pub fn detach(self, doc: &mut Document) -> bool {
        doc.unsubscribe(self.subscription)
    }

    pub fn recorder(&self) -> &ChangeRecorder {
        &self.recorder
    }

    /// Mark the next recorded command as the start of a new transaction
    pub fn begin_new_command_range(&self) {
        self.recorder.begin_new_command_range();
    }

    /// Undo the most recent transaction
    ///
    /// Returns `Ok(None)` when there is nothing to undo, otherwise the node the
    /// caller should re-focus.
    ///
    /// # Errors
    ///
    /// Returns the document's `TreeError` if a command no longer matches the
    /// tree. The failing command stays on the undo stack; commands already
    /// undone in this transaction stay on the redo stack.
    pub fn undo(&self, doc: &mut Document) -> Result<Option<NodeId>> {
        if !self.can_undo() {
            return Ok(None);
        }
        let started = Instant::now();
        log_op_start!("undo", undo_len = self.history().undo_commands().len());

        let _quiet = self.recorder.silence();
        let mut touched = Vec::new();
        loop {
            let popped = self.recorder.history_mut().pop_undo();
            let Some(mut cmd) = popped else {
                break;
            };
            match cmd.undo(doc) {
                Ok(node) => touched.push(node),
                Err(err) => {
                    self.recorder.history_mut().push_undo(cmd);
                    log_op_error!("undo", err.clone(), started);
                    return Err(err);
                }
            }
            let boundary = cmd.is_range_start();
            self.recorder.history_mut().push_redo(cmd);
            if boundary {
                break;
            }
        }

        let affected = affected_node(doc, &touched);
        log_replay_end!(
            "undo",
            started,
            replayed = touched.len(),
            affected = affected
        );
        Ok(affected)
    }

    /// Redo the most recently undone transaction
    ///
    /// # Errors
    ///
    /// Returns the document's `TreeError` if a command no longer matches the
    /// tree. The failing command stays on the redo stack.
    pub fn redo(&self, doc: &mut Document) -> Result<Option<NodeId>> {
        if !self.can_redo() {
            return Ok(None);
        }
        let started = Instant::now();
        log_op_start!("redo", redo_len = self.history().redo_commands().len());

        let _quiet = self.recorder.silence();
        let mut touched = Vec::new();
        loop {
            let popped = self.recorder.history_mut().pop_redo();
            let Some(mut cmd) = popped else {
                break;
            };
            match cmd.redo(doc) {
                Ok(node) => touched.push(node),
                Err(err) => {
                    self.recorder.history_mut().push_redo(cmd);
                    log_op_error!("redo", err.clone(), started);
                    return Err(err);
                }
            }
            self.recorder.history_mut().push_undo(cmd);

            let more = self
                .history()
                .peek_redo()
                .is_some_and(|next| !next.is_range_start());
            if !more {
                break;
            }
        }

        let affected = affected_node(doc, &touched);
        log_replay_end!(
            "redo",
            started,
            replayed = touched.len(),
            affected = affected
        );
        Ok(affected)
    }

    /// Undo whole transactions until at most `checkpoint` remain
    ///
    /// `checkpoint` is a value previously read from `undo_count`. Returns the
    /// affected node of the last transaction undone.
    ///
    /// # Errors
    ///
    /// Stops at the first failing transaction and returns its error.
    pub fn rollback_to(&self, doc: &mut Document, checkpoint: usize) -> Result<Option<NodeId>> {
        let started = Instant::now();
        // each undo consumes exactly one run
        let mut remaining = self.undo_count();
        log_op_start!("rollback", undo_len = remaining);

        let mut affected = None;
        while remaining > checkpoint {
            match self.undo(doc) {
                Ok(node) => affected = node,
                Err(err) => {
                    log_op_error!("rollback", err.clone(), started, undo_len = remaining);
                    return Err(err);
                }
            }
            remaining -= 1;
        }

        log_op_end!("rollback", started, undo_len = remaining);
        Ok(affected)
    }

    pub fn can_undo(&self) -> bool {
        self.history().can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history().can_redo()
    }

    /// Forget all history; the document keeps its current content
    pub fn clear(&self) {
        self.recorder.history_mut().clear();
        tracing::debug!(component = module_path!(), op = "clear", "history cleared");
    }

    /// Number of transactions that can be undone
    pub fn undo_count(&self) -> usize {
        self.history().undo_count()
    }

    /// Number of transactions that can be redone
    pub fn redo_count(&self) -> usize {
        self.history().redo_count()
    }

    pub fn next_undo_label(&self) -> String {
        self.history().next_undo_label().to_string()
    }

    pub fn next_redo_label(&self) -> String {
        self.history().next_redo_label().to_string()
    }

    /// Labels of all undoable transactions, most recent first
    pub fn undo_labels(&self) -> Vec<String> {
        to_owned(self.history().undo_labels())
    }

    /// Labels of all redoable transactions, next to redo first
    pub fn redo_labels(&self) -> Vec<String> {
        to_owned(self.history().redo_labels())
    }

    fn history(&self) -> std::cell::Ref<'_, History> {
        self.recorder.history()
    }
}

/// Pick the node to report after replaying a transaction
///
/// Evaluated once the whole transaction is applied: the last returned node
/// that is still attached to the document wins; if none is, the last
/// returned node.
fn affected_node(doc: &Document, touched: &[NodeId]) -> Option<NodeId> {
    touched
        .iter()
        .rev()
        .find(|node| doc.is_attached(**node))
        .or(touched.last())
        .copied()
}

fn to_owned(labels: Vec<&'static str>) -> Vec<String> {
    labels.into_iter().map(str::to_string).collect()
}
