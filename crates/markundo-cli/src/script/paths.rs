//! Slash paths addressing elements
//!
//! `Wix/Product/Feature[1]` walks element children by name from the
//! document node; `[n]` picks the n-th same-named element (zero-based,
//! default 0). An empty path or `/` is the document node itself.

use anyhow::{anyhow, bail, Context, Result};
use markundo_core::{Document, NodeId, NodeKind};

/// Resolve an absolute path from the document node
pub fn resolve(doc: &Document, path: &str) -> Result<NodeId> {
    resolve_from(doc, doc.root(), path)
}

/// Resolve a path relative to `start`
pub fn resolve_from(doc: &Document, start: NodeId, path: &str) -> Result<NodeId> {
    let mut current = start;
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        let (name, index) = parse_segment(segment)?;
        current = nth_child_element(doc, current, name, index)?
            .ok_or_else(|| anyhow!("No element '{}' in path '{}'", segment, path))?;
    }
    Ok(current)
}

/// Describe a node as a path that `resolve` maps back to it
///
/// Attributes render as `element@name`, text as `element/#text`.
pub fn describe(doc: &Document, node: NodeId) -> String {
    let Ok(n) = doc.get(node) else {
        return node.to_string();
    };
    match n.kind() {
        NodeKind::Document => "/".to_string(),
        NodeKind::Attribute => match n.parent() {
            Some(owner) => format!("{}@{}", describe(doc, owner), n.name()),
            None => format!("@{}", n.name()),
        },
        NodeKind::Text | NodeKind::Comment => {
            let leaf = if n.kind() == NodeKind::Text {
                "#text"
            } else {
                "#comment"
            };
            match n.parent() {
                Some(owner) => format!("{}/{}", describe(doc, owner), leaf),
                None => leaf.to_string(),
            }
        }
        NodeKind::Element => {
            let Some(parent) = n.parent() else {
                return n.name().to_string();
            };
            let index = doc
                .get(parent)
                .map(|p| {
                    p.children()
                        .iter()
                        .take_while(|c| **c != node)
                        .filter(|c| is_element_named(doc, **c, n.name()))
                        .count()
                })
                .unwrap_or(0);
            let segment = if index == 0 {
                n.name().to_string()
            } else {
                format!("{}[{}]", n.name(), index)
            };
            if parent == doc.root() {
                segment
            } else {
                format!("{}/{}", describe(doc, parent), segment)
            }
        }
    }
}

fn parse_segment(segment: &str) -> Result<(&str, usize)> {
    let Some(open) = segment.find('[') else {
        return Ok((segment, 0));
    };
    let Some(inner) = segment[open + 1..].strip_suffix(']') else {
        bail!("Unterminated index in path segment '{}'", segment);
    };
    let index = inner
        .parse::<usize>()
        .with_context(|| format!("Invalid index in path segment '{}'", segment))?;
    Ok((&segment[..open], index))
}

fn nth_child_element(
    doc: &Document,
    parent: NodeId,
    name: &str,
    index: usize,
) -> Result<Option<NodeId>> {
    let node = doc.get(parent)?;
    Ok(node
        .children()
        .iter()
        .copied()
        .filter(|c| is_element_named(doc, *c, name))
        .nth(index))
}

fn is_element_named(doc: &Document, node: NodeId, name: &str) -> bool {
    doc.get(node)
        .is_ok_and(|n| n.kind() == NodeKind::Element && n.name() == name)
}
