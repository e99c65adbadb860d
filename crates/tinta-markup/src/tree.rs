// ── Attribute ─────────────────────────────────────────────────────────────

/// A single `name="value"` pair, value already entity-decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: value.into() }
    }
}

// ── Element ───────────────────────────────────────────────────────────────

/// An element node: qualified name plus attributes in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Qualified name as written, e.g. `"path"` or `"svg:path"`.
    pub name: String,
    pub attrs: Vec<Attribute>,
}

impl Element {
    /// Name with any namespace prefix stripped.
    pub fn local_name(&self) -> &str {
        match self.name.rsplit_once(':') {
            Some((_, local)) => local,
            None => &self.name,
        }
    }

    /// Look up an attribute value by exact name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.iter().find(|a| a.name == name).map(|a| a.value.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|a| a.name == name)
    }

    /// Replace the value of `name` in place, or append it.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|a| a.name == name) {
            Some(a) => a.value = value,
            None => self.attrs.push(Attribute::new(name, value)),
        }
    }

    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let pos = self.attrs.iter().position(|a| a.name == name)?;
        Some(self.attrs.remove(pos).value)
    }
}

// ── Node ──────────────────────────────────────────────────────────────────

/// Index of a node inside its [`Document`] arena.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The invisible document node at index 0; owns the root element and
    /// any comments or processing instructions around it.
    Document,
    Element(Element),
    /// Character data, CDATA sections included, entity-decoded.
    Text(String),
    Comment(String),
    /// `target` or `target value`.
    Pi(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match &self.kind {
            NodeKind::Element(e) => Some(e),
            _ => None,
        }
    }
}

// ── Document ──────────────────────────────────────────────────────────────

/// A parsed markup document.
///
/// Nodes live in an arena in document order (pre-order), with parent links
/// resolved once while parsing. The tree is never mutated after parsing;
/// rewrites are expressed as [`Rewrites`](crate::writer::Rewrites) and
/// applied during serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub(crate) nodes: Vec<Node>,
    pub(crate) root: NodeId,
}

impl Document {
    /// The document node (index 0).
    pub const DOCUMENT: NodeId = NodeId(0);

    /// The single top-level element (`<svg>` for SVG documents).
    pub fn root_element(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.nodes.get(id.0).and_then(Node::as_element)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|n| n.parent)
    }

    /// Iterate ancestors of `id`, nearest first. The document node is not
    /// included.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut cur = self.parent(id);
        std::iter::from_fn(move || {
            let id = cur?;
            if id == Self::DOCUMENT {
                return None;
            }
            cur = self.parent(id);
            Some(id)
        })
    }

    /// Iterate `id` and all of its descendants in document order.
    pub fn descendants(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack = vec![id];
        std::iter::from_fn(move || {
            let id = stack.pop()?;
            stack.extend(self.node(id).children.iter().rev().copied());
            Some(id)
        })
    }

    /// All elements whose local name is `name`, in document order.
    pub fn elements_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = NodeId> + 'a {
        self.descendants(self.root)
            .filter(move |&id| self.element(id).is_some_and(|e| e.local_name() == name))
    }

    /// Concatenated text content below `id`.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        for n in self.descendants(id) {
            match &self.node(n).kind {
                NodeKind::Text(t) => out.push_str(t),
                _ => {}
            }
        }
        out
    }

    /// First element carrying `id="<value>"`.
    pub fn find_by_id(&self, value: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .find(|&n| self.element(n).and_then(|e| e.attr("id")) == Some(value))
    }
}
