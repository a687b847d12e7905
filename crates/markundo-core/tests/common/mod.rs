use markundo_core::{Document, MutationTarget, NodeId, NodeKind};

/// Handles into the fixture installer document
#[allow(dead_code)]
pub struct WixFixture {
    pub wix: NodeId,
    pub product: NodeId,
    pub id_attr: NodeId,
    pub package: NodeId,
    pub directory: NodeId,
}

/// Build a small installer definition before any engine is attached
///
/// ```text
/// <Wix xmlns="...">
///   <Product Id="Foo" Name="Setup">
///     <Package Compressed="yes" />
///     <Directory Id="TARGETDIR" />
///   </Product>
/// </Wix>
/// ```
#[allow(dead_code)]
pub fn wix_document() -> (Document, WixFixture) {
    let mut doc = Document::new();
    let root = doc.root();
    let wix = append_element(&mut doc, root, "Wix");
    set_attribute(&mut doc, wix, "xmlns", "http://schemas.microsoft.com/wix/2006/wi");

    let product = append_element(&mut doc, wix, "Product");
    let id_attr = set_attribute(&mut doc, product, "Id", "Foo");
    set_attribute(&mut doc, product, "Name", "Setup");

    let package = append_element(&mut doc, product, "Package");
    set_attribute(&mut doc, package, "Compressed", "yes");
    let directory = append_element(&mut doc, product, "Directory");
    set_attribute(&mut doc, directory, "Id", "TARGETDIR");

    (
        doc,
        WixFixture {
            wix,
            product,
            id_attr,
            package,
            directory,
        },
    )
}

/// Create an element and append it as last child
#[allow(dead_code)]
pub fn append_element(doc: &mut Document, parent: NodeId, name: &str) -> NodeId {
    let el = doc.create_element(name);
    doc.append(parent, el, MutationTarget::ChildSlot).unwrap();
    el
}

/// Create an attribute and append it to the element's attribute collection
#[allow(dead_code)]
pub fn set_attribute(doc: &mut Document, element: NodeId, name: &str, value: &str) -> NodeId {
    let attr = doc.create_attribute(name, value);
    doc.append(element, attr, MutationTarget::AttributeSlot)
        .unwrap();
    attr
}

/// Attached elements in document order, starting with the root
#[allow(dead_code)]
pub fn attached_elements(doc: &Document) -> Vec<NodeId> {
    let mut out = Vec::new();
    let mut stack = vec![doc.root()];
    while let Some(id) = stack.pop() {
        out.push(id);
        let node = doc.get(id).unwrap();
        for child in node.children().iter().rev() {
            if doc.get(*child).unwrap().kind() == NodeKind::Element {
                stack.push(*child);
            }
        }
    }
    out
}

/// Child names of `parent`, in order
#[allow(dead_code)]
pub fn child_names(doc: &Document, parent: NodeId) -> Vec<String> {
    doc.get(parent)
        .unwrap()
        .children()
        .iter()
        .map(|c| doc.get(*c).unwrap().name().to_string())
        .collect()
}
