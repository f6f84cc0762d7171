use slurry_dom::{DomTree, ElementData, NodeId, NodeType};
use slurry_schema::Attributes;

use super::ContentHandler;
use crate::error::Result;

/// A [`ContentHandler`] that builds a [`DomTree`].
///
/// Ignorable whitespace and prefix mappings are not represented in the
/// tree.
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    tree: DomTree,
    open: Vec<NodeId>,
}

impl TreeBuilder {
    /// Create a builder holding an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The tree built so far.
    #[must_use]
    pub const fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Take the finished tree.
    #[must_use]
    pub fn into_tree(self) -> DomTree {
        self.tree
    }

    fn current(&self) -> NodeId {
        self.open.last().copied().unwrap_or(NodeId::ROOT)
    }

    fn append(&mut self, node: NodeType) -> NodeId {
        let id = self.tree.alloc(node);
        self.tree.append_child(self.current(), id);
        id
    }
}

impl ContentHandler for TreeBuilder {
    fn start_element(
        &mut self,
        uri: &str,
        local_name: &str,
        qname: &str,
        attributes: &Attributes,
    ) -> Result<()> {
        let mut data = ElementData::named(qname);
        data.namespace = uri.to_string();
        if !local_name.is_empty() {
            data.local_name = local_name.to_string();
        }
        data.attrs = attributes
            .iter()
            .filter_map(|attr| Some((attr.qname.clone(), attr.value.clone()?)))
            .collect();
        let id = self.append(NodeType::Element(data));
        self.open.push(id);
        Ok(())
    }

    fn end_element(&mut self, _uri: &str, _local_name: &str, _qname: &str) -> Result<()> {
        let _ = self.open.pop();
        Ok(())
    }

    fn characters(&mut self, text: &str) -> Result<()> {
        let _ = self.tree.append_text(self.current(), text);
        Ok(())
    }

    fn processing_instruction(&mut self, target: &str, data: &str) -> Result<()> {
        let _ = self.append(NodeType::ProcessingInstruction {
            target: target.to_string(),
            data: data.to_string(),
        });
        Ok(())
    }

    fn comment(&mut self, text: &str) -> Result<()> {
        let _ = self.append(NodeType::Comment(text.to_string()));
        Ok(())
    }

    fn doctype(
        &mut self,
        name: &str,
        public_id: Option<&str>,
        system_id: Option<&str>,
    ) -> Result<()> {
        let _ = self.append(NodeType::Doctype {
            name: name.to_string(),
            public_id: public_id.unwrap_or_default().to_string(),
            system_id: system_id.unwrap_or_default().to_string(),
        });
        Ok(())
    }
}
