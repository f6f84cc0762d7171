//! Document tree for slurry.
//!
//! The tree uses arena allocation with [`NodeId`] indices for all
//! relationships, providing O(1) access and traversal without borrow
//! checker issues. It is the target of the parser's tree builder, but
//! carries no parsing logic of its own.

/// Ordered `(qualified name, value)` attribute pairs of an element.
pub type AttributeList = Vec<(String, String)>;

/// A type-safe index into the document tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The document node is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// One node of the tree, with indices for parent, children and siblings.
#[derive(Debug, Clone)]
pub struct Node {
    /// What kind of node this is, with its payload.
    pub node_type: NodeType,
    /// Parent node, `None` for the document and for detached nodes.
    pub parent: Option<NodeId>,
    /// Children in document order.
    pub children: Vec<NodeId>,
    /// Next sibling.
    pub next_sibling: Option<NodeId>,
    /// Previous sibling.
    pub prev_sibling: Option<NodeId>,
}

/// Node kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeType {
    /// The document node at [`NodeId::ROOT`].
    Document,
    /// A document type declaration.
    Doctype {
        /// Declared root element name.
        name: String,
        /// Public identifier, empty if absent.
        public_id: String,
        /// System identifier, empty if absent.
        system_id: String,
    },
    /// An element.
    Element(ElementData),
    /// Character data.
    Text(String),
    /// A comment.
    Comment(String),
    /// A processing instruction.
    ProcessingInstruction {
        /// Target name.
        target: String,
        /// Everything after the target.
        data: String,
    },
}

/// Element-specific data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ElementData {
    /// Namespace URI, empty when namespace processing is off.
    pub namespace: String,
    /// Name without prefix.
    pub local_name: String,
    /// Qualified name as reported by the parser.
    pub tag_name: String,
    /// Attributes in document order.
    pub attrs: AttributeList,
}

impl ElementData {
    /// Build element data with no namespace from a tag name.
    #[must_use]
    pub fn named(tag_name: &str) -> Self {
        Self {
            namespace: String::new(),
            local_name: tag_name.rsplit(':').next().unwrap_or(tag_name).to_string(),
            tag_name: tag_name.to_string(),
            attrs: Vec::new(),
        }
    }

    /// Value of the attribute with the given qualified name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns the element's id attribute value if present.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }
}

/// Arena-based document tree with O(1) node access and traversal.
#[derive(Debug, Clone)]
pub struct DomTree {
    /// All nodes in the tree, indexed by `NodeId`.
    /// The Document node is always at index 0 (`NodeId::ROOT`).
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a new tree with just the Document node.
    #[must_use]
    pub fn new() -> Self {
        let mut tree = Self { nodes: Vec::new() };
        let _ = tree.alloc(NodeType::Document);
        tree
    }

    /// Get the root document node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Get the number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (should always have at least the Document).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        });
        id
    }

    /// Appends `child` as the last child of `parent`, updating all relationships.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let prev_last_child = self.nodes[parent.0].children.last().copied();

        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);

        if let Some(prev_id) = prev_last_child {
            self.nodes[prev_id.0].next_sibling = Some(child);
            self.nodes[child.0].prev_sibling = Some(prev_id);
        }
    }

    /// Append text under `parent`, extending the last child if it is
    /// already a text node. Returns the text node.
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        if let Some(last) = self.last_child(parent) {
            if let NodeType::Text(existing) = &mut self.nodes[last.0].node_type {
                existing.push_str(text);
                return last;
            }
        }
        let id = self.alloc(NodeType::Text(text.to_string()));
        self.append_child(parent, id);
        id
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.first().copied())
    }

    /// Get the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.last().copied())
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Iterate over every node below `id` in document order.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> DescendantIterator<'_> {
        let mut stack: Vec<NodeId> = self.children(id).to_vec();
        stack.reverse();
        DescendantIterator { tree: self, stack }
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Concatenated text of every text node below `id`.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .filter_map(|node| self.as_text(node))
            .collect()
    }

    /// The element whose parent is the document, if it exists.
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.children(NodeId::ROOT)
            .iter()
            .find(|&&id| self.as_element(id).is_some())
            .copied()
    }

    /// Every element below `id` with the given local name, in document order.
    #[must_use]
    pub fn elements_by_local_name(&self, id: NodeId, local_name: &str) -> Vec<NodeId> {
        self.descendants(id)
            .filter(|&node| {
                self.as_element(node)
                    .is_some_and(|e| e.local_name == local_name)
            })
            .collect()
    }

    /// Render the subtree rooted at `id` as an indented outline, one node
    /// per line.
    #[must_use]
    pub fn outline(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.outline_into(id, 0, &mut out);
        out
    }

    fn outline_into(&self, id: NodeId, indent: usize, out: &mut String) {
        let Some(node) = self.get(id) else {
            return;
        };
        let prefix = "  ".repeat(indent);
        let line = match &node.node_type {
            NodeType::Document => "Document".to_string(),
            NodeType::Doctype { name, public_id, system_id } => {
                format!("<!DOCTYPE {name} \"{public_id}\" \"{system_id}\">")
            }
            NodeType::Element(data) if data.attrs.is_empty() => format!("<{}>", data.tag_name),
            NodeType::Element(data) => {
                let attrs: Vec<String> = data
                    .attrs
                    .iter()
                    .map(|(k, v)| format!("{k}=\"{v}\""))
                    .collect();
                format!("<{} {}>", data.tag_name, attrs.join(" "))
            }
            NodeType::Text(data) => {
                let display = data.replace('\n', "\\n").replace(' ', "\u{00B7}");
                format!("\"{display}\"")
            }
            NodeType::Comment(data) => format!("<!--{data}-->"),
            NodeType::ProcessingInstruction { target, data } => format!("<?{target} {data}?>"),
        };
        out.push_str(&prefix);
        out.push_str(&line);
        out.push('\n');
        for &child_id in self.children(id) {
            self.outline_into(child_id, indent + 1, out);
        }
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Pre-order iterator over the descendants of a node.
pub struct DescendantIterator<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl Iterator for DescendantIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack.extend(self.tree.children(id).iter().rev());
        Some(id)
    }
}
