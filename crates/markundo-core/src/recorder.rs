//! Change recorder: turns document notifications into commands
//!
//! The recorder is subscribed to exactly one document. Every live mutation
//! becomes one `Command` appended to the history; the first command after
//! `begin_new_command_range` opens a new transaction.

use std::cell::{Cell, Ref, RefCell, RefMut};

use crate::commands::Command;
use crate::history::History;
use crate::listener::MutationListener;
use crate::model::Document;
use markundo_core_types::schema::EVENT_RECORDED;
use markundo_core_types::{MutationTarget, NodeId};

#[derive(Debug)]
pub struct ChangeRecorder {
    history: RefCell<History>,
    listening: Cell<bool>,
    range_start: Cell<bool>,
    /// Old value captured by `value_changing`, consumed by `value_changed`
    pending_change: RefCell<Option<(NodeId, String)>>,
}

impl Default for ChangeRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeRecorder {
    pub fn new() -> Self {
        Self {
            history: RefCell::new(History::new()),
            listening: Cell::new(true),
            range_start: Cell::new(false),
            pending_change: RefCell::new(None),
        }
    }

    /// Mark the next recorded command as the start of a new transaction
    pub fn begin_new_command_range(&self) {
        self.range_start.set(true);
    }

    pub fn is_listening(&self) -> bool {
        self.listening.get()
    }

    /// Stop recording until the returned guard is dropped
    pub fn silence(&self) -> SilenceGuard<'_> {
        let previous = self.listening.replace(false);
        SilenceGuard {
            recorder: self,
            previous,
        }
    }

    pub fn history(&self) -> Ref<'_, History> {
        self.history.borrow()
    }

    pub(crate) fn history_mut(&self) -> RefMut<'_, History> {
        self.history.borrow_mut()
    }

    fn push(&self, cmd: Command) {
        tracing::debug!(
            component = module_path!(),
            op = "record",
            event = EVENT_RECORDED,
            command = cmd.label(),
            node_id = %cmd.node(),
            range_start = cmd.is_range_start(),
        );
        self.history.borrow_mut().record(cmd);
        self.range_start.set(false);
    }
}

/// Restores the recorder's previous listening state on drop
#[must_use = "recording resumes as soon as the guard is dropped"]
pub struct SilenceGuard<'a> {
    recorder: &'a ChangeRecorder,
    previous: bool,
}

impl Drop for SilenceGuard<'_> {
    fn drop(&mut self) {
        self.recorder.listening.set(self.previous);
    }
}

impl MutationListener for ChangeRecorder {
    fn value_changing(&self, doc: &Document, node: NodeId) {
        if !self.is_listening() {
            return;
        }
        let old = doc.value(node).map(str::to_string).unwrap_or_default();
        *self.pending_change.borrow_mut() = Some((node, old));
    }

    fn value_changed(&self, doc: &Document, node: NodeId) {
        if !self.is_listening() {
            return;
        }
        let old_value = match self.pending_change.borrow_mut().take() {
            Some((pending, old)) if pending == node => old,
            _ => String::new(),
        };
        let new_value = doc.value(node).map(str::to_string).unwrap_or_default();
        self.push(Command::change(
            node,
            old_value,
            new_value,
            self.range_start.get(),
        ));
    }

    fn node_inserted(&self, doc: &Document, parent: NodeId, node: NodeId, target: MutationTarget) {
        if !self.is_listening() {
            return;
        }
        if target == MutationTarget::AttributeSlot
            && doc.get(node).is_ok_and(|n| n.is_namespace_declaration())
        {
            tracing::trace!(
                component = module_path!(),
                op = "record",
                node_id = %node,
                "skipping implicit namespace declaration"
            );
            return;
        }
        self.push(Command::insert(parent, node, target, self.range_start.get()));
    }

    fn node_removing(&self, doc: &Document, parent: NodeId, node: NodeId, target: MutationTarget) {
        if !self.is_listening() {
            return;
        }
        let previous_sibling = doc
            .previous_sibling(parent, node, target)
            .ok()
            .flatten();
        self.push(Command::remove(
            parent,
            node,
            target,
            previous_sibling,
            self.range_start.get(),
        ));
    }
}
