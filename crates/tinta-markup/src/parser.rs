//! Conversion of a `roxmltree` document into the owned [`Document`] arena.

use roxmltree::{NodeType, ParsingOptions};

use crate::error::ParseError;
use crate::tree::{Attribute, Document, Element, Node, NodeId, NodeKind};

const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// Parse markup into a [`Document`].
///
/// DTDs are accepted so that entities declared in the internal subset (as
/// written by Illustrator, e.g. `xmlns="&ns_svg;"`) resolve. Entity values
/// are expanded into the tree; the prolog is not kept.
pub fn parse_str(src: &str) -> Result<Document, ParseError> {
    let mut options = ParsingOptions::default();
    options.allow_dtd = true;
    let xml = roxmltree::Document::parse_with_options(src, options)?;

    let mut nodes = vec![Node { kind: NodeKind::Document, parent: None, children: Vec::new() }];
    let mut root = None;

    // Explicit stack: nesting depth is bounded only by the input.
    let mut stack: Vec<(roxmltree::Node<'_, '_>, NodeId)> =
        xml.root().children().rev().map(|c| (c, Document::DOCUMENT)).collect();

    while let Some((xnode, parent)) = stack.pop() {
        let kind = match xnode.node_type() {
            NodeType::Root => continue,
            NodeType::Element => NodeKind::Element(convert_element(src, xnode)),
            NodeType::Text => NodeKind::Text(xnode.text().unwrap_or_default().to_string()),
            NodeType::Comment => NodeKind::Comment(xnode.text().unwrap_or_default().to_string()),
            NodeType::PI => match xnode.pi() {
                Some(pi) => NodeKind::Pi(match pi.value {
                    Some(value) => format!("{} {value}", pi.target),
                    None => pi.target.to_string(),
                }),
                None => continue,
            },
        };

        let id = NodeId(nodes.len());
        if parent == Document::DOCUMENT && xnode.is_element() {
            root = Some(id);
        }
        nodes.push(Node { kind, parent: Some(parent), children: Vec::new() });
        nodes[parent.0].children.push(id);
        stack.extend(xnode.children().rev().map(|c| (c, id)));
    }

    let root = root.ok_or_else(|| ParseError {
        message: "document has no root element".to_string(),
        line: 1,
        col: 1,
    })?;
    Ok(Document { nodes, root })
}

fn convert_element(src: &str, xnode: roxmltree::Node<'_, '_>) -> Element {
    let mut attrs = Vec::new();

    // Namespace declarations introduced on this element.
    let inherited: Vec<_> = xnode
        .parent()
        .map(|p| p.namespaces().map(|ns| (ns.name(), ns.uri())).collect())
        .unwrap_or_default();
    for ns in xnode.namespaces() {
        if ns.name() == Some("xml") || inherited.contains(&(ns.name(), ns.uri())) {
            continue;
        }
        let name = match ns.name() {
            Some(prefix) => format!("xmlns:{prefix}"),
            None => "xmlns".to_string(),
        };
        attrs.push(Attribute::new(name, ns.uri()));
    }

    for a in xnode.attributes() {
        let name = match a.namespace() {
            None => a.name().to_string(),
            Some(uri) => match prefix_for(xnode, uri) {
                Some(prefix) => format!("{prefix}:{}", a.name()),
                None => a.name().to_string(),
            },
        };
        attrs.push(Attribute::new(name, a.value()));
    }

    Element { name: qualified_name(src, xnode), attrs }
}

/// Element name as written, prefix included.
fn qualified_name(src: &str, xnode: roxmltree::Node<'_, '_>) -> String {
    let tag = xnode.tag_name();
    src.get(xnode.range())
        .and_then(|s| s.strip_prefix('<'))
        .and_then(|s| s.split(|c: char| c.is_whitespace() || c == '/' || c == '>').next())
        .filter(|qname| qname.rsplit(':').next() == Some(tag.name()))
        .map_or_else(|| tag.name().to_string(), str::to_string)
}

fn prefix_for<'a>(xnode: roxmltree::Node<'a, '_>, uri: &str) -> Option<&'a str> {
    if uri == XML_NS {
        return Some("xml");
    }
    xnode.namespaces().filter(|ns| ns.uri() == uri).find_map(|ns| ns.name())
}
