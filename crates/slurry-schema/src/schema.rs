//! The element type and entity registry consulted by the parser.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::attributes::AttributeKind;
use crate::element_type::ElementType;
use crate::model::{Categories, ElementFlags};

/// Errors from building a schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// An attribute or parent was declared for an element type that was
    /// never registered.
    #[error("no element type named {0:?}")]
    UnknownElement(String),
}

/// A case-insensitive registry of element types plus an entity table.
///
/// Every schema contains two reserved types that the parser relies on:
/// [`Schema::PCDATA`], a placeholder used to place character data, and
/// [`Schema::ROOT`], the sentinel at the bottom of the open-element stack.
/// The reserved types are not returned by [`Schema::lookup`] under their
/// markup-visible names, so a document cannot open them.
#[derive(Debug, Clone)]
pub struct Schema {
    types: HashMap<String, Arc<ElementType>>,
    entities: HashMap<String, u32>,
    uri: String,
    prefix: String,
    root_element: Option<String>,
    pcdata: Arc<ElementType>,
    root: Arc<ElementType>,
}

impl Schema {
    /// Name of the character data placeholder type.
    pub const PCDATA: &'static str = "<pcdata>";
    /// Name of the stack sentinel type.
    pub const ROOT: &'static str = "<root>";

    /// Create an empty schema whose unprefixed elements live in `uri`.
    #[must_use]
    pub fn new(uri: &str, prefix: &str) -> Self {
        let pcdata = ElementType::new(
            Self::PCDATA,
            Categories::EMPTY,
            Categories::PCDATA,
            ElementFlags::NONE,
            uri,
        );
        let root = ElementType::new(
            Self::ROOT,
            Categories::ROOT,
            Categories::EMPTY,
            ElementFlags::NONE,
            uri,
        );
        Self {
            types: HashMap::new(),
            entities: HashMap::new(),
            uri: uri.to_string(),
            prefix: prefix.to_string(),
            root_element: None,
            pcdata: Arc::new(pcdata),
            root: Arc::new(root),
        }
    }

    /// Register an element type, replacing any earlier type with the same
    /// (case-insensitive) name.
    ///
    /// The first type whose member-of set is exactly [`Categories::ROOT`]
    /// becomes the schema's root element type.
    pub fn element_type(
        &mut self,
        name: &str,
        model: Categories,
        member_of: Categories,
        flags: ElementFlags,
    ) {
        let element = self.new_element_type(name, model, member_of, flags);
        let key = name.to_lowercase();
        if member_of == Categories::ROOT && self.root_element.is_none() {
            self.root_element = Some(key.clone());
        }
        let _ = self.types.insert(key, Arc::new(element));
    }

    /// Build an element type in this schema's namespace without registering
    /// it. Used for element types synthesized while parsing.
    #[must_use]
    pub fn new_element_type(
        &self,
        name: &str,
        model: Categories,
        member_of: Categories,
        flags: ElementFlags,
    ) -> ElementType {
        ElementType::new(name, model, member_of, flags, &self.uri)
    }

    /// Declare a typed, optionally defaulted attribute on a registered type.
    ///
    /// A `None` value declares the type only.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownElement`] if `element` is not registered.
    pub fn attribute(
        &mut self,
        element: &str,
        attribute: &str,
        kind: AttributeKind,
        value: Option<&str>,
    ) -> Result<(), SchemaError> {
        let element_type = self.registered_mut(element)?;
        element_type
            .attributes_mut()
            .set(attribute, Some(kind), value.map(str::to_string));
        Ok(())
    }

    /// Set the natural parent of a registered type. The parent of
    /// [`Schema::PCDATA`] decides where stray text is placed.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownElement`] if either type is not
    /// registered.
    pub fn parent(&mut self, name: &str, parent: &str) -> Result<(), SchemaError> {
        let parent = parent.to_lowercase();
        if !self.types.contains_key(&parent) {
            return Err(SchemaError::UnknownElement(parent));
        }
        self.registered_mut(name)?.set_parent(Some(parent));
        Ok(())
    }

    /// Add a named character entity. Names are case-sensitive.
    pub fn entity(&mut self, name: &str, value: u32) {
        let _ = self.entities.insert(name.to_string(), value);
    }

    /// Find an element type by case-insensitive name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Arc<ElementType>> {
        self.types.get(&name.to_lowercase())
    }

    /// The code point of a named entity.
    #[must_use]
    pub fn entity_value(&self, name: &str) -> Option<u32> {
        self.entities.get(name).copied()
    }

    /// Namespace URI of unprefixed elements.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Prefix bound to [`Schema::uri`] at the start of each document.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The type that may act as the document element (`html` for HTML).
    #[must_use]
    pub fn root_element_type(&self) -> Option<&Arc<ElementType>> {
        self.root_element.as_ref().and_then(|name| self.types.get(name))
    }

    /// The character data placeholder type.
    #[must_use]
    pub const fn pcdata_type(&self) -> &Arc<ElementType> {
        &self.pcdata
    }

    /// The stack sentinel type.
    #[must_use]
    pub const fn root_type(&self) -> &Arc<ElementType> {
        &self.root
    }

    fn registered_mut(&mut self, name: &str) -> Result<&mut ElementType, SchemaError> {
        match name {
            Self::PCDATA => return Ok(Arc::make_mut(&mut self.pcdata)),
            Self::ROOT => return Ok(Arc::make_mut(&mut self.root)),
            _ => {}
        }
        let key = name.to_lowercase();
        match self.types.get_mut(&key) {
            Some(element_type) => Ok(Arc::make_mut(element_type)),
            None => Err(SchemaError::UnknownElement(key)),
        }
    }
}
