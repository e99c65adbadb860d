use std::collections::HashMap;
use std::fmt::Write as _;

use crate::tree::{Attribute, Document, NodeId, NodeKind};

/// Replacement attribute lists keyed by element.
///
/// An element present in the map is written with exactly the listed
/// attributes (in that order) instead of its parsed ones. Everything else is
/// written as parsed.
pub type Rewrites = HashMap<NodeId, Vec<Attribute>>;

enum Step {
    Open(NodeId),
    Close(NodeId),
}

impl Document {
    /// Serialize the document as parsed.
    pub fn to_markup(&self) -> String {
        self.to_markup_with(&Rewrites::new())
    }

    /// Serialize the document, substituting attribute lists from `rewrites`.
    pub fn to_markup_with(&self, rewrites: &Rewrites) -> String {
        let mut out = String::with_capacity(self.len() * 32);
        let mut stack: Vec<Step> =
            self.node(Document::DOCUMENT).children.iter().rev().map(|&c| Step::Open(c)).collect();

        while let Some(step) = stack.pop() {
            let id = match step {
                Step::Open(id) => id,
                Step::Close(id) => {
                    if let Some(el) = self.element(id) {
                        out.push_str("</");
                        out.push_str(&el.name);
                        out.push('>');
                    }
                    continue;
                }
            };
            let node = self.node(id);
            match &node.kind {
                NodeKind::Document => {}
                NodeKind::Element(el) => {
                    out.push('<');
                    out.push_str(&el.name);
                    let attrs = rewrites.get(&id).unwrap_or(&el.attrs);
                    for a in attrs {
                        // Writing into a String cannot fail.
                        let _ = write!(out, " {}=\"{}\"", a.name, escape_attr(&a.value));
                    }
                    if node.children.is_empty() {
                        out.push_str("/>");
                        continue;
                    }
                    out.push('>');
                    stack.push(Step::Close(id));
                    stack.extend(node.children.iter().rev().map(|&c| Step::Open(c)));
                }
                NodeKind::Text(t) => out.push_str(&escape_text(t)),
                NodeKind::Comment(t) => {
                    out.push_str("<!--");
                    out.push_str(t);
                    out.push_str("-->");
                }
                NodeKind::Pi(t) => {
                    out.push_str("<?");
                    out.push_str(t);
                    out.push_str("?>");
                }
            }
        }
        out
    }
}

fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '"' => out.push_str("&quot;"),
            '\n' => out.push_str("&#10;"),
            c => out.push(c),
        }
    }
    out
}
