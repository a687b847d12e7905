//! Undo/Redo Scenario Tests
//!
//! End-to-end behaviour of the engine attached to an installer document.
//!
//! ## Scenarios Covered
//!
//! 1. Insert then attribute change, undone and redone one transaction at a time
//! 2. Multi-mutation transactions replay atomically
//! 3. Sibling positions survive remove/undo/redo
//! 4. Clear, labels, checkpoints and rollback
//! 5. New edits after undo discard the redo history
//! 6. Omitting a range start merges edits into the previous transaction

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{append_element, child_names, set_attribute, wix_document};
use markundo_core::{render_markup, Document, UndoEngine};

use markundo_core::MutationTarget::{AttributeSlot, ChildSlot};

#[test]
fn test_insert_and_change_are_separate_transactions() {
    // GIVEN a document with a root element carrying Id="Foo"
    let mut doc = Document::new();
    let root = doc.root();
    let setup = append_element(&mut doc, root, "Setup");
    let id = set_attribute(&mut doc, setup, "Id", "Foo");
    let engine = UndoEngine::attach(&mut doc);

    // WHEN nodeX is inserted as first child of the root (transaction 1)
    let node_x = doc.create_element("X");
    engine.begin_new_command_range();
    doc.insert_first(root, node_x, ChildSlot).unwrap();

    // AND Id is changed from Foo to Bar (transaction 2)
    engine.begin_new_command_range();
    doc.set_value(id, "Bar").unwrap();

    assert_eq!(engine.undo_count(), 2);

    // THEN the first undo restores Id without touching nodeX
    assert_eq!(engine.undo(&mut doc).unwrap(), Some(id));
    assert_eq!(doc.value(id).unwrap(), "Foo");
    assert_eq!(doc.parent(node_x).unwrap(), Some(root));

    // AND the second undo removes nodeX and reports the root
    assert_eq!(engine.undo(&mut doc).unwrap(), Some(root));
    assert_eq!(doc.parent(node_x).unwrap(), None);
    assert!(!engine.can_undo());

    // AND redo reinserts nodeX as the root's first child
    assert_eq!(engine.redo(&mut doc).unwrap(), Some(node_x));
    assert_eq!(
        doc.get(root).unwrap().children().first().copied(),
        Some(node_x)
    );
    assert_eq!(doc.value(id).unwrap(), "Foo");

    // AND a second redo restores Id to Bar
    assert_eq!(engine.redo(&mut doc).unwrap(), Some(id));
    assert_eq!(doc.value(id).unwrap(), "Bar");
    assert!(!engine.can_redo());
}

#[test]
fn test_dialog_action_with_several_writes_is_one_step() {
    // GIVEN the installer fixture
    let (mut doc, fx) = wix_document();
    let before = render_markup(&doc);
    let engine = UndoEngine::attach(&mut doc);

    // WHEN one dialog action adds a feature element with two attributes
    engine.begin_new_command_range();
    let feature = append_element(&mut doc, fx.product, "Feature");
    set_attribute(&mut doc, feature, "Id", "Main");
    set_attribute(&mut doc, feature, "Level", "1");
    let after = render_markup(&doc);

    // THEN it is one undoable transaction labelled by its first command
    assert_eq!(engine.undo_count(), 1);
    assert_eq!(engine.next_undo_label(), "Insert");

    // AND a single undo reverts all of it
    assert_eq!(engine.undo(&mut doc).unwrap(), Some(fx.product));
    assert_eq!(render_markup(&doc), before);

    // AND a single redo re-applies all of it
    engine.redo(&mut doc).unwrap();
    assert_eq!(render_markup(&doc), after);
    assert_eq!(engine.undo_count(), 1);
}

#[test]
fn test_remove_undo_restores_sibling_order() {
    // GIVEN Product with children Package, Directory, and a third element
    let (mut doc, fx) = wix_document();
    append_element(&mut doc, fx.product, "Media");
    let engine = UndoEngine::attach(&mut doc);
    let original = child_names(&doc, fx.product);

    // WHEN the middle child is deleted
    engine.begin_new_command_range();
    doc.remove(fx.product, fx.directory, ChildSlot).unwrap();
    assert_eq!(engine.next_undo_label(), "Delete");

    // THEN undo puts it back between its former siblings
    assert_eq!(engine.undo(&mut doc).unwrap(), Some(fx.directory));
    assert_eq!(child_names(&doc, fx.product), original);

    // AND redo removes it again, reporting the parent
    assert_eq!(engine.redo(&mut doc).unwrap(), Some(fx.product));
    assert_eq!(
        child_names(&doc, fx.product),
        vec!["Package".to_string(), "Media".to_string()]
    );
}

#[test]
fn test_attribute_removal_restores_attribute_order() {
    // GIVEN Product with attributes Id, Name
    let (mut doc, fx) = wix_document();
    let engine = UndoEngine::attach(&mut doc);
    let before = render_markup(&doc);

    // WHEN the first attribute is deleted
    engine.begin_new_command_range();
    doc.remove(fx.product, fx.id_attr, AttributeSlot).unwrap();

    // THEN undo restores it as the first attribute, not as a child
    engine.undo(&mut doc).unwrap();
    assert_eq!(render_markup(&doc), before);
    assert_eq!(
        doc.get(fx.product).unwrap().attributes().first().copied(),
        Some(fx.id_attr)
    );
    assert!(!doc
        .get(fx.product)
        .unwrap()
        .children()
        .contains(&fx.id_attr));
}

#[test]
fn test_undo_report_for_attribute_of_removed_element() {
    // GIVEN a new element and an attribute change on it in one transaction
    let (mut doc, fx) = wix_document();
    let icon = doc.create_element("Icon");
    let source = set_attribute(&mut doc, icon, "SourceFile", "");
    let engine = UndoEngine::attach(&mut doc);

    engine.begin_new_command_range();
    doc.append(fx.product, icon, ChildSlot).unwrap();
    doc.set_value(source, "app.ico").unwrap();

    // WHEN the transaction is undone
    let affected = engine.undo(&mut doc).unwrap();

    // THEN the attribute of the now-detached element is not reported
    assert_eq!(affected, Some(fx.product));
    assert_eq!(doc.value(source).unwrap(), "");
}

#[test]
fn test_clear_keeps_document_content() {
    // GIVEN a recorded insertion
    let (mut doc, fx) = wix_document();
    let engine = UndoEngine::attach(&mut doc);
    engine.begin_new_command_range();
    append_element(&mut doc, fx.product, "Feature");
    engine.begin_new_command_range();
    doc.set_value(fx.id_attr, "Other").unwrap();
    engine.undo(&mut doc).unwrap();
    let content = render_markup(&doc);

    // WHEN history is cleared
    engine.clear();

    // THEN nothing can be undone or redone but the tree is unchanged
    assert!(!engine.can_undo());
    assert!(!engine.can_redo());
    assert_eq!(engine.next_undo_label(), "");
    assert_eq!(render_markup(&doc), content);
}

#[test]
fn test_new_edit_discards_redo() {
    // GIVEN an undone transaction
    let (mut doc, fx) = wix_document();
    let engine = UndoEngine::attach(&mut doc);
    engine.begin_new_command_range();
    doc.set_value(fx.id_attr, "Bar").unwrap();
    engine.undo(&mut doc).unwrap();
    assert!(engine.can_redo());
    assert_eq!(engine.next_redo_label(), "Change");

    // WHEN a new edit is made
    engine.begin_new_command_range();
    doc.set_value(fx.id_attr, "Baz").unwrap();

    // THEN the redo history is gone
    assert!(!engine.can_redo());
    assert_eq!(engine.redo(&mut doc).unwrap(), None);
    assert_eq!(doc.value(fx.id_attr).unwrap(), "Baz");
}

#[test]
fn test_can_undo_after_first_command() {
    let (mut doc, fx) = wix_document();
    let engine = UndoEngine::attach(&mut doc);
    assert!(!engine.can_undo());

    engine.begin_new_command_range();
    assert!(!engine.can_undo());

    doc.set_value(fx.id_attr, "Bar").unwrap();
    assert!(engine.can_undo());
}

#[test]
fn test_missing_range_start_merges_into_previous_transaction() {
    // GIVEN one transaction
    let (mut doc, fx) = wix_document();
    let engine = UndoEngine::attach(&mut doc);
    engine.begin_new_command_range();
    doc.set_value(fx.id_attr, "Bar").unwrap();

    // WHEN a second edit is made without beginning a new range
    append_element(&mut doc, fx.product, "Feature");

    // THEN both edits are undone together
    assert_eq!(engine.undo_count(), 1);
    engine.undo(&mut doc).unwrap();
    assert_eq!(doc.value(fx.id_attr).unwrap(), "Foo");
    assert_eq!(
        child_names(&doc, fx.product),
        vec!["Package".to_string(), "Directory".to_string()]
    );
}

#[test]
fn test_rollback_to_checkpoint() {
    // GIVEN one committed transaction and a checkpoint
    let (mut doc, fx) = wix_document();
    let engine = UndoEngine::attach(&mut doc);
    engine.begin_new_command_range();
    doc.set_value(fx.id_attr, "Kept").unwrap();
    let checkpoint = engine.undo_count();
    let at_checkpoint = render_markup(&doc);

    // WHEN a cancelled dialog made three more transactions
    for name in ["A", "B", "C"] {
        engine.begin_new_command_range();
        append_element(&mut doc, fx.directory, name);
    }
    assert_eq!(engine.undo_count(), checkpoint + 3);

    // THEN rolling back returns exactly to the checkpoint
    let affected = engine.rollback_to(&mut doc, checkpoint).unwrap();
    assert_eq!(affected, Some(fx.directory));
    assert_eq!(engine.undo_count(), checkpoint);
    assert_eq!(engine.redo_count(), 3);
    assert_eq!(render_markup(&doc), at_checkpoint);
}

#[test]
fn test_label_lists_follow_history() {
    let (mut doc, fx) = wix_document();
    let engine = UndoEngine::attach(&mut doc);

    engine.begin_new_command_range();
    append_element(&mut doc, fx.product, "Feature");
    engine.begin_new_command_range();
    doc.set_value(fx.id_attr, "Bar").unwrap();
    engine.begin_new_command_range();
    doc.remove(fx.product, fx.package, ChildSlot).unwrap();

    assert_eq!(engine.undo_labels(), vec!["Delete", "Change", "Insert"]);

    engine.undo(&mut doc).unwrap();
    engine.undo(&mut doc).unwrap();

    assert_eq!(engine.undo_labels(), vec!["Insert"]);
    assert_eq!(engine.redo_labels(), vec!["Change", "Delete"]);
    assert_eq!(engine.next_redo_label(), "Change");
}

#[test]
fn test_engines_on_separate_documents_do_not_interact() {
    let (mut first, fx1) = wix_document();
    let (mut second, fx2) = wix_document();
    let engine1 = UndoEngine::attach(&mut first);
    let engine2 = UndoEngine::attach(&mut second);

    engine1.begin_new_command_range();
    first.set_value(fx1.id_attr, "One").unwrap();

    assert!(engine1.can_undo());
    assert!(!engine2.can_undo());

    engine2.begin_new_command_range();
    second.set_value(fx2.id_attr, "Two").unwrap();
    engine1.undo(&mut first).unwrap();

    assert_eq!(first.value(fx1.id_attr).unwrap(), "Foo");
    assert_eq!(second.value(fx2.id_attr).unwrap(), "Two");
}

#[test]
fn test_detach_stops_recording() {
    let (mut doc, fx) = wix_document();
    let engine = UndoEngine::attach(&mut doc);

    assert!(engine.detach(&mut doc));

    let engine = UndoEngine::attach(&mut doc);
    engine.begin_new_command_range();
    doc.set_value(fx.id_attr, "Bar").unwrap();
    assert_eq!(engine.undo_count(), 1);
}

#[test]
fn test_namespace_declaration_insert_is_not_undoable() {
    let (mut doc, fx) = wix_document();
    let engine = UndoEngine::attach(&mut doc);

    engine.begin_new_command_range();
    set_attribute(&mut doc, fx.wix, "xmlns:util", "http://schemas.microsoft.com/wix/UtilExtension");

    assert!(!engine.can_undo());
}
