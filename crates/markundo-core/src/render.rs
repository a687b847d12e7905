//! Markup rendering of a document
//!
//! Produces an indented, deterministic text form of the attached tree. Used
//! by the CLI for output and by tests to compare whole-document states.

use std::fmt::Write;

use crate::model::Document;
use markundo_core_types::{NodeId, NodeKind};

const INDENT: &str = "  ";

/// Render every node reachable from the root
pub fn render_markup(doc: &Document) -> String {
    let mut out = String::new();
    if let Ok(root) = doc.get(doc.root()) {
        for child in root.children() {
            render_node(doc, *child, 0, &mut out);
        }
    }
    out
}

fn render_node(doc: &Document, id: NodeId, depth: usize, out: &mut String) {
    let Ok(node) = doc.get(id) else {
        return;
    };
    let pad = INDENT.repeat(depth);

    match node.kind() {
        NodeKind::Element => {
            let _ = write!(out, "{}<{}", pad, node.name());
            for attr in node.attributes() {
                if let Ok(a) = doc.get(*attr) {
                    let _ = write!(out, " {}=\"{}\"", a.name(), escape(a.value(), true));
                }
            }
            if node.children().is_empty() {
                out.push_str(" />\n");
            } else {
                out.push_str(">\n");
                for child in node.children() {
                    render_node(doc, *child, depth + 1, out);
                }
                let _ = writeln!(out, "{}</{}>", pad, node.name());
            }
        }
        NodeKind::Text => {
            let _ = writeln!(out, "{}{}", pad, escape(node.value(), false));
        }
        NodeKind::Comment => {
            let _ = writeln!(out, "{}<!--{}-->", pad, node.value());
        }
        // attributes are rendered inline; a document node never nests
        NodeKind::Attribute | NodeKind::Document => {}
    }
}

fn escape(value: &str, in_attribute: bool) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if in_attribute => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}
