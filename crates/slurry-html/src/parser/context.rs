//! Per-parse state and the structural repair algorithm.
//!
//! A [`ParseContext`] lives for exactly one document. It receives the
//! scanner's lexical events, keeps the open-element stack in a shape the
//! schema allows, and forwards a balanced event stream to a
//! [`ContentHandler`].

use std::collections::HashMap;
use std::sync::Arc;

use slurry_common::warning::warn_once;
use slurry_schema::names::prefix_of;
use slurry_schema::{Categories, ElementFlags, ElementType, Schema};

use super::element::Element;
use super::issues::{IssueKind, ParseIssue};
use super::names::{clean_public_id, make_name, split_declaration, trim_quotes};
use super::options::ParserOptions;
use crate::error::Result;
use crate::scanner::{ScanHandler, decode_reference};
use crate::sink::ContentHandler;

/// Whether a prefixed name needs its own prefix mapping.
fn foreign(prefix: &str, namespace: &str, schema_uri: &str) -> bool {
    !prefix.is_empty() && !namespace.is_empty() && namespace != schema_uri
}

/// Mutable state of a single parse.
///
/// The bottom of the stack is a `<root>` sentinel that is never reported or
/// popped; the element above it is the document element.
pub struct ParseContext<'a, H: ContentHandler + ?Sized> {
    schema: &'a Schema,
    options: ParserOptions,
    handler: &'a mut H,
    stack: Vec<Element>,
    /// Restartable elements closed early; the last entry is reopened first.
    saved: Vec<Element>,
    /// Element whose start tag is still being read.
    new_element: Option<Element>,
    attribute_name: Option<String>,
    pi_target: Option<String>,
    doctype_seen: bool,
    /// No element has been pushed yet.
    virgin: bool,
    cdata_requested: bool,
    /// Element types made up for unknown names, keyed by lowercase name.
    bogons: HashMap<String, Arc<ElementType>>,
    issues: Vec<ParseIssue>,
}

impl<'a, H: ContentHandler + ?Sized> ParseContext<'a, H> {
    /// Create the state for one parse reporting to `handler`.
    #[must_use]
    pub fn new(schema: &'a Schema, options: ParserOptions, handler: &'a mut H) -> Self {
        Self {
            schema,
            options,
            handler,
            stack: vec![Element::new(Arc::clone(schema.root_type()), false)],
            saved: Vec::new(),
            new_element: None,
            attribute_name: None,
            pi_target: None,
            doctype_seen: false,
            virgin: true,
            cdata_requested: false,
            bogons: HashMap::new(),
            issues: Vec::new(),
        }
    }

    /// Report the start of the document. Call once, before scanning.
    ///
    /// # Errors
    ///
    /// Returns whatever the content handler returns.
    pub fn begin(&mut self) -> Result<()> {
        self.handler.start_document()?;
        if !self.schema.uri().is_empty() {
            self.handler
                .start_prefix_mapping(self.schema.prefix(), self.schema.uri())?;
        }
        Ok(())
    }

    /// Repairs recorded so far.
    #[must_use]
    pub fn issues(&self) -> &[ParseIssue] {
        &self.issues
    }

    /// Consume the context, returning the repairs it recorded.
    #[must_use]
    pub fn into_issues(self) -> Vec<ParseIssue> {
        self.issues
    }

    fn issue(&mut self, kind: IssueKind, message: String) {
        if self.options.report_issues {
            let _ = warn_once("HTML Parser", &message);
        }
        self.issues.push(ParseIssue::new(kind, message));
    }

    fn top(&self) -> &Element {
        // The sentinel is never popped.
        &self.stack[self.stack.len() - 1]
    }

    fn lookup_type(&self, name: &str) -> Option<Arc<ElementType>> {
        self.schema
            .lookup(name)
            .or_else(|| self.bogons.get(&name.to_lowercase()))
            .cloned()
    }

    fn pcdata(&self) -> Element {
        Element::new(Arc::clone(self.schema.pcdata_type()), false)
    }

    // ===== Stack operations =====

    fn push(&mut self, mut element: Element) -> Result<()> {
        element.clean();
        if self.options.cdata_elements && element.has_flag(ElementFlags::CDATA) {
            self.cdata_requested = true;
        }
        self.virgin = false;
        self.stack.push(element);

        let schema_uri = self.schema.uri();
        let element = &self.stack[self.stack.len() - 1];
        let qname = element.name();
        if !self.options.namespaces {
            let mut attributes = element.attributes().clone();
            for attr in attributes.iter_mut() {
                attr.namespace.clear();
                attr.local_name.clear();
            }
            return self.handler.start_element("", "", qname, &attributes);
        }

        let prefix = prefix_of(qname);
        if foreign(prefix, element.namespace(), schema_uri) {
            self.handler
                .start_prefix_mapping(prefix, element.namespace())?;
        }
        for attr in element.attributes() {
            let prefix = prefix_of(&attr.qname);
            if foreign(prefix, &attr.namespace, schema_uri) {
                self.handler.start_prefix_mapping(prefix, &attr.namespace)?;
            }
        }
        self.handler.start_element(
            element.namespace(),
            element.local_name(),
            qname,
            element.attributes(),
        )
    }

    /// Close the top element for good. The sentinel stays.
    fn pop(&mut self) -> Result<Option<Element>> {
        if self.stack.len() <= 1 {
            return Ok(None);
        }
        let Some(element) = self.stack.pop() else {
            return Ok(None);
        };
        let qname = element.name();
        if self.options.namespaces {
            let schema_uri = self.schema.uri();
            self.handler
                .end_element(element.namespace(), element.local_name(), qname)?;
            for attr in element.attributes().iter().rev() {
                let prefix = prefix_of(&attr.qname);
                if foreign(prefix, &attr.namespace, schema_uri) {
                    self.handler.end_prefix_mapping(prefix)?;
                }
            }
            let prefix = prefix_of(qname);
            if foreign(prefix, element.namespace(), schema_uri) {
                self.handler.end_prefix_mapping(prefix)?;
            }
        } else {
            self.handler.end_element("", "", qname)?;
        }
        if element.has_flag(ElementFlags::CDATA) {
            self.cdata_requested = false;
        }
        Ok(Some(element))
    }

    /// Pop the top element, keeping a copy for reopening if its type is
    /// restartable.
    fn restartably_pop(&mut self) -> Result<()> {
        if let Some(mut element) = self.pop()? {
            if self.options.restart_elements && element.has_flag(ElementFlags::RESTARTABLE) {
                element.anonymize();
                self.saved.push(element);
            }
        }
        Ok(())
    }

    /// Reopen saved elements while the stack top accepts them and each one
    /// could hold `next`.
    fn restart(&mut self, next: Option<&Element>) -> Result<()> {
        while let Some(head) = self.saved.last() {
            if !self.top().can_contain(head) || next.is_some_and(|next| !head.can_contain(next)) {
                break;
            }
            if let Some(head) = self.saved.pop() {
                self.push(head)?;
            }
        }
        Ok(())
    }

    fn pop_preclosed(&mut self) -> Result<()> {
        while self.stack.len() > 1 && self.top().is_preclosed() {
            let _ = self.pop()?;
        }
        Ok(())
    }

    /// Close the element at `index` and everything above it. The document
    /// element is never closed.
    fn close_from(&mut self, index: usize) -> Result<()> {
        if index <= 1 || index >= self.stack.len() {
            return Ok(());
        }
        while self.stack.len() - 1 > index {
            self.restartably_pop()?;
        }
        let _ = self.pop()?;
        self.pop_preclosed()?;
        self.restart(None)
    }

    /// Make room for `candidate` and open it together with any ancestors
    /// its type requires.
    ///
    /// Returns the stack index `candidate` landed at (the top of the stack
    /// for character data), or `None` if it has no place in the document.
    fn rectify(&mut self, candidate: Element) -> Result<Option<usize>> {
        let mut chain = vec![candidate];
        let position = loop {
            let outermost = &chain[chain.len() - 1];
            if let Some(position) = self.stack.iter().rposition(|open| open.can_contain(outermost)) {
                break position;
            }
            let parent = outermost.element_type().parent().and_then(|name| {
                if chain.iter().any(|element| element.name().eq_ignore_ascii_case(name)) {
                    None
                } else {
                    self.lookup_type(name)
                }
            });
            match parent {
                Some(parent) => chain.push(Element::new(parent, self.options.default_attributes)),
                None => {
                    self.new_element = None;
                    let message = format!("no place for <{}> in the document", chain[0].name());
                    self.issue(IssueKind::IgnoredElement, message);
                    return Ok(None);
                }
            }
        };

        while self.stack.len() - 1 > position && self.stack.len() > 2 {
            self.restartably_pop()?;
        }

        let mut landing = None;
        while let Some(element) = chain.pop() {
            if element.name() != Schema::PCDATA {
                self.push(element)?;
                landing = Some(self.stack.len() - 1);
            }
            self.restart(chain.last())?;
        }
        self.new_element = None;
        Ok(Some(landing.unwrap_or(self.stack.len() - 1)))
    }

    // ===== Entities =====

    fn lookup_entity(&self, name: &str) -> Option<u32> {
        let value = match name.strip_prefix('#') {
            Some(number) => match number.strip_prefix('x').or_else(|| number.strip_prefix('X')) {
                Some(hex) => u32::from_str_radix(hex, 16).ok(),
                None => number.parse().ok(),
            },
            None => self.schema.entity_value(name),
        };
        value.filter(|&value| value != 0)
    }

    /// Expand the `;`-terminated references in an attribute value. Anything
    /// that does not resolve stays as written.
    fn expand_entities(&self, value: &str) -> String {
        let mut expanded = String::with_capacity(value.len());
        let mut reference: Option<usize> = None;
        for c in value.chars() {
            if c == '&' {
                reference = Some(expanded.len());
                expanded.push(c);
                continue;
            }
            expanded.push(c);
            let Some(start) = reference else {
                continue;
            };
            if c.is_alphanumeric() || c == '#' {
                continue;
            }
            reference = None;
            if c == ';' {
                let name = &expanded[start + 1..expanded.len() - 1];
                if let Some(code) = self.lookup_entity(name) {
                    expanded.truncate(start);
                    if let Some(decoded) = decode_reference(code) {
                        expanded.push(decoded);
                    }
                }
            }
        }
        expanded
    }

    fn end_tag_basic(&mut self, raw: &str) -> Result<()> {
        self.new_element = None;
        let name = if raw.is_empty() {
            self.top().name().to_string()
        } else {
            let canonical = make_name(raw, self.options.translate_colons);
            if let Some(element_type) = self.lookup_type(&canonical) {
                element_type.name().to_string()
            } else {
                self.issue(
                    IssueKind::UnmatchedEndTag,
                    format!("ignored end tag </{canonical}> for an unknown element"),
                );
                return Ok(());
            }
        };

        let mut no_force = false;
        let mut found = None;
        for (index, open) in self.stack.iter().enumerate().rev() {
            if open.name() == name {
                found = Some(index);
                break;
            }
            if open.has_flag(ElementFlags::NO_FORCE_CLOSE) {
                no_force = true;
            }
        }
        let Some(index) = found else {
            self.issue(
                IssueKind::UnmatchedEndTag,
                format!("ignored end tag </{name}> with no open element"),
            );
            return Ok(());
        };
        if index <= 1 {
            return Ok(());
        }

        if no_force {
            self.stack[index].preclose();
            self.issue(
                IssueKind::PreclosedElement,
                format!("deferred closing <{name}> until its enclosing element closes"),
            );
        } else {
            while self.stack.len() - 1 > index {
                self.restartably_pop()?;
            }
            let _ = self.pop()?;
        }
        self.pop_preclosed()?;
        self.restart(None)
    }
}

impl<H: ContentHandler + ?Sized> ScanHandler for ParseContext<'_, H> {
    fn attribute_name(&mut self, name: &str) -> Result<()> {
        if self.new_element.is_some() {
            self.attribute_name =
                Some(make_name(name, self.options.translate_colons).to_lowercase());
        }
        Ok(())
    }

    fn attribute_value(&mut self, value: &str) -> Result<()> {
        let Some(name) = self.attribute_name.take() else {
            return Ok(());
        };
        let value = self.expand_entities(value);
        if let Some(element) = self.new_element.as_mut() {
            element.set_attribute(&name, value);
        }
        Ok(())
    }

    fn attribute_without_value(&mut self) -> Result<()> {
        if let (Some(name), Some(element)) = (self.attribute_name.take(), self.new_element.as_mut()) {
            element.set_attribute(&name, name.clone());
        }
        Ok(())
    }

    fn start_tag_name(&mut self, name: &str) -> Result<()> {
        if self.new_element.is_some() {
            return Ok(());
        }
        let name = make_name(name, self.options.translate_colons);
        let element_type = match self.lookup_type(&name) {
            Some(element_type) => element_type,
            None if self.options.ignore_bogons => {
                self.issue(
                    IssueKind::IgnoredElement,
                    format!("dropped unknown element <{name}>"),
                );
                return Ok(());
            }
            None => {
                let model = if self.options.bogons_empty {
                    Categories::EMPTY
                } else {
                    Categories::ANY
                };
                let member_of = if self.options.root_bogons {
                    Categories::ANY
                } else {
                    Categories::ANY.without(Categories::ROOT)
                };
                let mut bogon =
                    self.schema
                        .new_element_type(&name, model, member_of, ElementFlags::NONE);
                if !self.options.root_bogons {
                    bogon.set_parent(
                        self.schema
                            .root_element_type()
                            .map(|root| root.name().to_lowercase()),
                    );
                }
                let bogon = Arc::new(bogon);
                let _ = self.bogons.insert(name.to_lowercase(), Arc::clone(&bogon));
                self.issue(
                    IssueKind::UnknownElement,
                    format!("unknown element <{name}>"),
                );
                bogon
            }
        };
        self.new_element = Some(Element::new(element_type, self.options.default_attributes));
        Ok(())
    }

    fn start_tag_close(&mut self) -> Result<()> {
        let Some(element) = self.new_element.take() else {
            return Ok(());
        };
        let empty = element.model() == Categories::EMPTY;
        if let Some(index) = self.rectify(element)? {
            if empty {
                self.close_from(index)?;
            }
        }
        Ok(())
    }

    fn empty_tag_close(&mut self) -> Result<()> {
        let Some(element) = self.new_element.take() else {
            return Ok(());
        };
        if let Some(index) = self.rectify(element)? {
            self.close_from(index)?;
        }
        Ok(())
    }

    fn end_tag(&mut self, name: &str) -> Result<()> {
        let top = self.top();
        if self.options.cdata_elements
            && top.has_flag(ElementFlags::CDATA)
            && !name.trim().eq_ignore_ascii_case(top.name())
        {
            let literal = format!("</{name}>");
            let message = format!("kept {literal} inside <{}> as text", top.name());
            self.handler.characters(&literal)?;
            self.issue(IssueKind::LiteralEndTagInCdata, message);
            self.cdata_requested = true;
            return Ok(());
        }
        self.end_tag_basic(name)
    }

    fn text(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        if text.chars().all(char::is_whitespace)
            && !self
                .top()
                .element_type()
                .can_contain(self.schema.pcdata_type())
        {
            if self.options.ignorable_whitespace {
                self.handler.ignorable_whitespace(text)?;
            }
            return Ok(());
        }
        let pcdata = self.pcdata();
        if self.rectify(pcdata)?.is_some() {
            self.handler.characters(text)?;
        }
        Ok(())
    }

    fn cdata_section(&mut self, text: &str) -> Result<()> {
        let pcdata = self.pcdata();
        if self.rectify(pcdata)?.is_none() {
            return Ok(());
        }
        self.handler.start_cdata()?;
        if !text.is_empty() {
            self.handler.characters(text)?;
        }
        self.handler.end_cdata()
    }

    fn comment(&mut self, text: &str) -> Result<()> {
        self.handler.comment(text)
    }

    fn declaration(&mut self, text: &str) -> Result<()> {
        let tokens = split_declaration(text);
        let Some(&keyword) = tokens.first() else {
            return Ok(());
        };
        if !keyword.eq_ignore_ascii_case("DOCTYPE") {
            return Ok(());
        }
        if self.doctype_seen {
            self.issue(
                IssueKind::DuplicateDoctype,
                "ignored a second DOCTYPE declaration".to_string(),
            );
            return Ok(());
        }
        self.doctype_seen = true;
        let Some(&name) = tokens.get(1) else {
            return Ok(());
        };
        let (public_id, system_id) = match (tokens.get(2), tokens.get(3)) {
            (Some(kind), Some(&id)) if kind.eq_ignore_ascii_case("SYSTEM") => {
                (None, Some(trim_quotes(id).to_string()))
            }
            (Some(kind), Some(&id)) if kind.eq_ignore_ascii_case("PUBLIC") => {
                let system = tokens.get(4).map_or("", |&system| trim_quotes(system));
                (
                    Some(clean_public_id(trim_quotes(id))),
                    Some(system.to_string()),
                )
            }
            _ => (None, None),
        };
        self.handler
            .doctype(name, public_id.as_deref(), system_id.as_deref())
    }

    fn pi_target(&mut self, target: &str) -> Result<()> {
        if self.new_element.is_none() {
            self.pi_target = Some(make_name(target, true));
        }
        Ok(())
    }

    fn pi(&mut self, data: &str) -> Result<()> {
        if self.new_element.is_some() {
            return Ok(());
        }
        let Some(target) = self.pi_target.take() else {
            return Ok(());
        };
        if target.eq_ignore_ascii_case("xml") {
            return Ok(());
        }
        let data = data.strip_suffix('?').unwrap_or(data);
        self.handler.processing_instruction(&target, data)
    }

    fn entity(&mut self, name: &str) -> Option<u32> {
        self.lookup_entity(name)
    }

    fn eof(&mut self) -> Result<()> {
        if self.virgin {
            let pcdata = self.pcdata();
            let _ = self.rectify(pcdata)?;
        }
        while self.stack.len() > 1 {
            let _ = self.pop()?;
        }
        if !self.schema.uri().is_empty() {
            self.handler.end_prefix_mapping(self.schema.prefix())?;
        }
        self.handler.end_document()
    }

    fn take_cdata_request(&mut self) -> bool {
        std::mem::take(&mut self.cdata_requested)
    }
}
