//! Script execution against a live document and engine

use anyhow::{anyhow, Context, Result};
use markundo_core::{render_markup, Document, MutationTarget, NodeId, NodeKind, UndoEngine};

use super::format_v0::{ScriptElement, ScriptStep, ScriptV0};
use super::paths;

/// Where a new node goes inside its parent's child list
enum Position {
    First,
    After(NodeId),
    Last,
}

/// A document with an attached engine
pub struct Session {
    pub doc: Document,
    pub engine: UndoEngine,
    /// Node reported by the most recent undo, redo or rollback
    pub last_affected: Option<NodeId>,
}

impl Session {
    /// Build the initial document, then attach the engine
    pub fn load(document: &ScriptElement) -> Result<Self> {
        let mut doc = Document::new();
        let root = doc.root();
        build_element(&mut doc, root, document, Position::Last)?;
        let engine = UndoEngine::attach(&mut doc);
        Ok(Self {
            doc,
            engine,
            last_affected: None,
        })
    }

    pub fn apply(&mut self, step: &ScriptStep) -> Result<()> {
        match step {
            ScriptStep::Begin => self.engine.begin_new_command_range(),
            ScriptStep::Insert {
                parent,
                element,
                text,
                first,
                after,
            } => {
                let parent = paths::resolve(&self.doc, parent)?;
                let position = match (first, after) {
                    (true, _) => Position::First,
                    (false, Some(sibling)) => {
                        Position::After(paths::resolve_from(&self.doc, parent, sibling)?)
                    }
                    (false, None) => Position::Last,
                };
                match (element, text) {
                    (Some(el), _) => {
                        build_element(&mut self.doc, parent, el, position)?;
                    }
                    (None, Some(value)) => {
                        let node = self.doc.create_text(value.as_str());
                        link(&mut self.doc, parent, node, position)?;
                    }
                    (None, None) => return Err(anyhow!("insert has nothing to insert")),
                }
            }
            ScriptStep::Remove { path, attribute } => {
                let node = paths::resolve(&self.doc, path)?;
                match attribute {
                    Some(name) => {
                        let attr = self
                            .doc
                            .attribute(node, name)
                            .ok_or_else(|| anyhow!("No attribute '{}' on '{}'", name, path))?;
                        self.doc.remove(node, attr, MutationTarget::AttributeSlot)?;
                    }
                    None => {
                        let parent = self
                            .doc
                            .parent(node)?
                            .ok_or_else(|| anyhow!("Cannot remove the document node"))?;
                        self.doc.remove(parent, node, MutationTarget::ChildSlot)?;
                    }
                }
            }
            ScriptStep::Set {
                path,
                attribute,
                value,
            } => {
                let node = paths::resolve(&self.doc, path)?;
                match attribute {
                    Some(name) => set_attribute(&mut self.doc, node, name, value)?,
                    None => set_text(&mut self.doc, node, value)?,
                }
            }
            ScriptStep::Undo => self.last_affected = self.engine.undo(&mut self.doc)?,
            ScriptStep::Redo => self.last_affected = self.engine.redo(&mut self.doc)?,
            ScriptStep::Clear => self.engine.clear(),
            ScriptStep::Rollback { to } => {
                self.last_affected = self.engine.rollback_to(&mut self.doc, *to)?;
            }
        }
        Ok(())
    }

    pub fn render(&self) -> String {
        render_markup(&self.doc)
    }

    /// History summary printed after the document
    pub fn summary(&self) -> String {
        let mut lines = vec![
            count_line(
                "undo",
                self.engine.undo_count(),
                &self.engine.next_undo_label(),
            ),
            count_line(
                "redo",
                self.engine.redo_count(),
                &self.engine.next_redo_label(),
            ),
        ];
        if let Some(node) = self.last_affected {
            lines.push(format!("affected: {}", paths::describe(&self.doc, node)));
        }
        lines.join("\n") + "\n"
    }
}

/// Load the document and apply every step in order
pub fn run_script(script: &ScriptV0) -> Result<Session> {
    let mut session = Session::load(&script.document).context("Failed to build document")?;

    for (index, step) in script.steps.iter().enumerate() {
        tracing::debug!(
            component = module_path!(),
            op = "step",
            index = index + 1,
            step = ?step,
        );
        session
            .apply(step)
            .with_context(|| format!("step {} failed", index + 1))?;
    }

    Ok(session)
}

fn count_line(name: &str, count: usize, next: &str) -> String {
    if count == 0 {
        format!("{}: 0", name)
    } else {
        format!("{}: {} (next: {})", name, count, next)
    }
}

/// Link a new element, then fill in its attributes, text and children
fn build_element(
    doc: &mut Document,
    parent: NodeId,
    spec: &ScriptElement,
    position: Position,
) -> Result<NodeId> {
    let element = doc.create_element(spec.name.as_str());
    link(doc, parent, element, position)?;

    for attr in &spec.attributes {
        let node = doc.create_attribute(attr.name.as_str(), attr.value.as_str());
        doc.append(element, node, MutationTarget::AttributeSlot)?;
    }
    if let Some(text) = &spec.text {
        let node = doc.create_text(text.as_str());
        doc.append(element, node, MutationTarget::ChildSlot)?;
    }
    for child in &spec.children {
        build_element(doc, element, child, Position::Last)?;
    }
    Ok(element)
}

fn link(doc: &mut Document, parent: NodeId, node: NodeId, position: Position) -> Result<()> {
    match position {
        Position::First => doc.insert_first(parent, node, MutationTarget::ChildSlot)?,
        Position::After(sibling) => {
            doc.insert_after(parent, node, sibling, MutationTarget::ChildSlot)?
        }
        Position::Last => doc.append(parent, node, MutationTarget::ChildSlot)?,
    }
    Ok(())
}

fn set_attribute(doc: &mut Document, element: NodeId, name: &str, value: &str) -> Result<()> {
    match doc.attribute(element, name) {
        Some(attr) => doc.set_value(attr, value)?,
        None => {
            let attr = doc.create_attribute(name, value);
            doc.append(element, attr, MutationTarget::AttributeSlot)?;
        }
    }
    Ok(())
}

fn set_text(doc: &mut Document, element: NodeId, value: &str) -> Result<()> {
    let existing = doc
        .get(element)?
        .children()
        .iter()
        .copied()
        .find(|c| doc.get(*c).is_ok_and(|n| n.kind() == NodeKind::Text));
    match existing {
        Some(text) => doc.set_value(text, value)?,
        None => {
            let text = doc.create_text(value);
            doc.append(element, text, MutationTarget::ChildSlot)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::script::parser::parse_script_str;

    fn run(yaml: &str) -> Session {
        run_script(&parse_script_str(yaml).unwrap()).unwrap()
    }

    const INSTALLER: &str = r#"
schema_version: 0
document:
  name: Wix
  attributes:
    - { name: xmlns, value: "http://schemas.microsoft.com/wix/2006/wi" }
  children:
    - name: Product
      attributes:
        - { name: Id, value: Foo }
      children:
        - name: Package
        - name: Directory
"#;

    fn with_steps(steps: &str) -> String {
        format!("{}steps:\n{}", INSTALLER, steps)
    }

    #[test]
    fn test_loaded_document_is_not_undoable() {
        let session = run(INSTALLER);

        assert!(!session.engine.can_undo());
        assert_eq!(
            session.render(),
            "<Wix xmlns=\"http://schemas.microsoft.com/wix/2006/wi\">\n  <Product Id=\"Foo\">\n    <Package />\n    <Directory />\n  </Product>\n</Wix>\n"
        );
        assert_eq!(session.summary(), "undo: 0\nredo: 0\n");
    }

    #[test]
    fn test_insert_after_then_undo() {
        let session = run(&with_steps(
            "  - begin\n  - insert: { parent: Wix/Product, element: { name: Media }, after: Package }\n  - undo\n",
        ));

        let product = paths::resolve(&session.doc, "Wix/Product").unwrap();
        assert_eq!(session.last_affected, Some(product));
        assert!(paths::resolve(&session.doc, "Wix/Product/Media").is_err());
        assert_eq!(
            session.summary(),
            "undo: 0\nredo: 1 (next: Insert)\naffected: Wix/Product\n"
        );
    }

    #[test]
    fn test_set_creates_or_changes() {
        let mut session = run(&with_steps(
            "  - begin\n  - set: { path: Wix/Product, attribute: Id, value: Bar }\n  - begin\n  - set: { path: Wix/Product, attribute: Name, value: Setup }\n  - begin\n  - set: { path: Wix/Product/Package, value: hello }\n",
        ));

        assert_eq!(
            session.engine.undo_labels(),
            vec!["Insert", "Insert", "Change"]
        );

        session.apply(&ScriptStep::Rollback { to: 0 }).unwrap();
        assert!(session.render().contains("<Product Id=\"Foo\">"));
        assert!(!session.render().contains("hello"));
    }

    #[test]
    fn test_remove_attribute_and_element() {
        let session = run(&with_steps(
            "  - begin\n  - remove: { path: Wix/Product, attribute: Id }\n  - begin\n  - remove: { path: Wix/Product/Directory }\n",
        ));

        assert_eq!(session.engine.undo_labels(), vec!["Delete", "Delete"]);
        assert!(session.render().contains("<Product>"));
        assert!(!session.render().contains("Directory"));
    }

    #[test]
    fn test_missing_path_reports_step() {
        let script = parse_script_str(&with_steps(
            "  - begin\n  - remove: { path: Wix/Nope }\n",
        ))
        .unwrap();

        let err = run_script(&script).err().unwrap();
        assert!(format!("{:#}", err).contains("step 2 failed"));
    }

    #[test]
    fn test_removing_document_node_fails() {
        let mut session = run(INSTALLER);
        assert!(session
            .apply(&ScriptStep::Remove {
                path: "/".to_string(),
                attribute: None,
            })
            .is_err());
    }
}
