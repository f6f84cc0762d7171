//! Consumers of the parser's structural events.
//!
//! [`ContentHandler`] is the seam between the parser and anything that
//! wants its output. Two stock consumers are provided: [`EventRecorder`]
//! keeps an owned list of [`Event`]s and [`TreeBuilder`] builds a
//! [`slurry_dom::DomTree`].

/// Owned event list.
pub mod recorder;
/// Document tree construction.
pub mod tree;

pub use recorder::{Event, EventRecorder};
pub use tree::TreeBuilder;

use slurry_schema::Attributes;

use crate::error::Result;

/// Receiver of a balanced, well-formed event stream.
///
/// Every method defaults to doing nothing. Returning an error aborts the
/// parse; the error comes back unchanged from the parse call.
#[allow(unused_variables)]
pub trait ContentHandler {
    /// First event of every parse.
    fn start_document(&mut self) -> Result<()> {
        Ok(())
    }

    /// Last event of every parse.
    fn end_document(&mut self) -> Result<()> {
        Ok(())
    }

    /// `prefix` is bound to `uri` until the matching end mapping.
    fn start_prefix_mapping(&mut self, prefix: &str, uri: &str) -> Result<()> {
        Ok(())
    }

    /// The binding of `prefix` ends.
    fn end_prefix_mapping(&mut self, prefix: &str) -> Result<()> {
        Ok(())
    }

    /// An element opens. `uri` and `local_name` are empty when namespace
    /// reporting is off.
    fn start_element(
        &mut self,
        uri: &str,
        local_name: &str,
        qname: &str,
        attributes: &Attributes,
    ) -> Result<()> {
        Ok(())
    }

    /// The most recently opened element closes.
    fn end_element(&mut self, uri: &str, local_name: &str, qname: &str) -> Result<()> {
        Ok(())
    }

    /// Character data inside the current element.
    fn characters(&mut self, text: &str) -> Result<()> {
        Ok(())
    }

    /// Whitespace that had no place in the tree.
    fn ignorable_whitespace(&mut self, text: &str) -> Result<()> {
        Ok(())
    }

    /// A processing instruction.
    fn processing_instruction(&mut self, target: &str, data: &str) -> Result<()> {
        Ok(())
    }

    /// A comment.
    fn comment(&mut self, text: &str) -> Result<()> {
        Ok(())
    }

    /// A marked CDATA section starts; its text follows as characters.
    fn start_cdata(&mut self) -> Result<()> {
        Ok(())
    }

    /// The marked CDATA section ends.
    fn end_cdata(&mut self) -> Result<()> {
        Ok(())
    }

    /// The document type declaration.
    fn doctype(
        &mut self,
        name: &str,
        public_id: Option<&str>,
        system_id: Option<&str>,
    ) -> Result<()> {
        Ok(())
    }
}
