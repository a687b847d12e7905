//! Undo and redo stacks
//!
//! Both stacks push and pop at the end of their `Vec`. On the undo stack a
//! transaction is a run whose *lowest* entry carries `range_start`; undoing
//! it moves the run onto the redo stack in reverse order, so there the
//! range-start entry ends up on *top* of its run.

use crate::commands::Command;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct History {
    undo: Vec<Command>,
    redo: Vec<Command>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a freshly recorded command and invalidate the redo stack
    pub fn record(&mut self, cmd: Command) {
        self.undo.push(cmd);
        self.redo.clear();
    }

    pub(crate) fn pop_undo(&mut self) -> Option<Command> {
        self.undo.pop()
    }

    pub(crate) fn pop_redo(&mut self) -> Option<Command> {
        self.redo.pop()
    }

    /// Push without touching the redo stack (replay path)
    pub(crate) fn push_undo(&mut self, cmd: Command) {
        self.undo.push(cmd);
    }

    pub(crate) fn push_redo(&mut self, cmd: Command) {
        self.redo.push(cmd);
    }

    pub fn peek_redo(&self) -> Option<&Command> {
        self.redo.last()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    /// Recorded commands, oldest first
    pub fn undo_commands(&self) -> &[Command] {
        &self.undo
    }

    /// Undone commands, in stack order (next to redo last)
    pub fn redo_commands(&self) -> &[Command] {
        &self.redo
    }

    /// Transactions on the undo stack, most recent first
    pub fn undo_runs(&self) -> Vec<&[Command]> {
        let mut runs = Vec::new();
        let mut start = 0;
        for (i, cmd) in self.undo.iter().enumerate() {
            if cmd.is_range_start() && i > start {
                runs.push(&self.undo[start..i]);
                start = i;
            }
        }
        if start < self.undo.len() {
            runs.push(&self.undo[start..]);
        }
        runs.reverse();
        runs
    }

    /// Transactions on the redo stack, next to redo first
    pub fn redo_runs(&self) -> Vec<&[Command]> {
        let mut runs: Vec<&[Command]> = self
            .redo
            .split_inclusive(|cmd| cmd.is_range_start())
            .collect();
        runs.reverse();
        runs
    }

    pub fn undo_count(&self) -> usize {
        self.undo_runs().len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_runs().len()
    }

    /// Label of the oldest command of the next transaction to undo
    pub fn next_undo_label(&self) -> &'static str {
        self.undo_labels().first().copied().unwrap_or("")
    }

    /// Label of the oldest command of the next transaction to redo
    pub fn next_redo_label(&self) -> &'static str {
        self.redo_labels().first().copied().unwrap_or("")
    }

    /// One label per undo transaction, most recent first
    pub fn undo_labels(&self) -> Vec<&'static str> {
        self.undo_runs()
            .into_iter()
            .filter_map(|run| run.first().map(Command::label))
            .collect()
    }

    /// One label per redo transaction, next to redo first
    pub fn redo_labels(&self) -> Vec<&'static str> {
        self.redo_runs()
            .into_iter()
            .filter_map(|run| run.last().map(Command::label))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use markundo_core_types::{MutationTarget, NodeId};

    fn n(i: usize) -> NodeId {
        NodeId::from_index(i)
    }

    fn insert(start: bool) -> Command {
        Command::insert(n(0), n(1), MutationTarget::ChildSlot, start)
    }

    fn change(start: bool) -> Command {
        Command::change(n(1), "a", "b", start)
    }

    #[test]
    fn test_record_clears_redo() {
        let mut history = History::new();
        history.push_redo(change(true));
        assert!(history.can_redo());

        history.record(insert(true));

        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_runs_split_at_range_start() {
        let mut history = History::new();
        history.record(insert(true));
        history.record(change(false));
        history.record(change(true));

        let runs = history.undo_runs();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].len(), 1);
        assert_eq!(runs[1].len(), 2);
        assert_eq!(history.undo_labels(), vec!["Change", "Insert"]);
        assert_eq!(history.next_undo_label(), "Change");
    }

    #[test]
    fn test_unmarked_leading_commands_form_one_run() {
        let mut history = History::new();
        history.record(change(false));
        history.record(change(false));
        history.record(insert(true));

        assert_eq!(history.undo_count(), 2);
        assert_eq!(history.undo_labels(), vec!["Insert", "Change"]);
    }

    #[test]
    fn test_redo_runs_end_at_range_start() {
        let mut history = History::new();
        // stack order after undoing [insert*, change] then an unmarked [change, change]
        history.push_redo(change(false));
        history.push_redo(insert(true));
        history.push_redo(change(false));
        history.push_redo(change(false));

        let runs = history.redo_runs();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].len(), 2);
        assert_eq!(runs[1].len(), 2);
        assert_eq!(history.redo_labels(), vec!["Change", "Insert"]);
        assert_eq!(history.redo_count(), 2);
    }

    #[test]
    fn test_empty_labels() {
        let history = History::new();
        assert_eq!(history.next_undo_label(), "");
        assert_eq!(history.next_redo_label(), "");
        assert_eq!(history.undo_count(), 0);
        assert_eq!(history.redo_count(), 0);
    }

    #[test]
    fn test_clear() {
        let mut history = History::new();
        history.record(insert(true));
        history.push_redo(change(true));

        history.clear();

        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }
}
