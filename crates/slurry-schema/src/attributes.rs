use serde::Serialize;
use strum_macros::{Display, EnumString};

use crate::names::{attribute_namespace, local_name_of};

/// Declared type of an attribute.
///
/// Values of every type except [`AttributeKind::Cdata`] are
/// whitespace-normalized when they are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum AttributeKind {
    /// Free text.
    #[default]
    Cdata,
    /// A unique identifier. Stripped when an element is reopened.
    Id,
    /// A reference to an identifier.
    Idref,
    /// Whitespace-separated identifier references.
    Idrefs,
    /// A name token.
    Nmtoken,
    /// Whitespace-separated name tokens.
    Nmtokens,
    /// A name.
    Name,
    /// An entity name.
    Entity,
    /// Whitespace-separated entity names.
    Entities,
    /// A notation name.
    Notation,
}

/// One attribute of an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    /// Namespace URI (empty for unprefixed attributes).
    pub namespace: String,
    /// Name without its prefix.
    pub local_name: String,
    /// Name as written, after case normalization.
    pub qname: String,
    /// Declared type.
    pub kind: AttributeKind,
    /// The value. `None` marks an attribute the schema declares only to give
    /// it a type; such entries are dropped before an element is reported.
    pub value: Option<String>,
}

/// An ordered attribute list with unique qualified names.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Attributes {
    items: Vec<Attribute>,
}

impl Attributes {
    /// Create an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Number of attributes, including valueless declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the list has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the attributes in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.items.iter()
    }

    /// Iterate mutably over the attributes in order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Attribute> {
        self.items.iter_mut()
    }

    /// Position of the attribute with the given qualified name.
    #[must_use]
    pub fn index_of(&self, qname: &str) -> Option<usize> {
        self.items.iter().position(|attr| attr.qname == qname)
    }

    /// Look up an attribute by qualified name.
    #[must_use]
    pub fn get(&self, qname: &str) -> Option<&Attribute> {
        self.items.iter().find(|attr| attr.qname == qname)
    }

    /// The value of the attribute with the given qualified name.
    #[must_use]
    pub fn value(&self, qname: &str) -> Option<&str> {
        self.get(qname).and_then(|attr| attr.value.as_deref())
    }

    /// Add an attribute or overwrite the existing one with the same name.
    ///
    /// `xmlns` and `xmlns:*` are ignored: namespace declarations are never
    /// taken from the markup. When `kind` is `None` a new attribute is CDATA
    /// and an existing one keeps its declared type.
    pub fn set(&mut self, qname: &str, kind: Option<AttributeKind>, value: Option<String>) {
        if qname == "xmlns" || qname.starts_with("xmlns:") {
            return;
        }
        match self.index_of(qname) {
            Some(index) => {
                let existing = &mut self.items[index];
                let kind = kind.unwrap_or(existing.kind);
                existing.kind = kind;
                existing.value = normalize_for(kind, value);
            }
            None => {
                let kind = kind.unwrap_or_default();
                self.items.push(Attribute {
                    namespace: attribute_namespace(qname),
                    local_name: local_name_of(qname).to_string(),
                    qname: qname.to_string(),
                    kind,
                    value: normalize_for(kind, value),
                });
            }
        }
    }

    /// Keep only the attributes for which `keep` returns true.
    pub fn retain(&mut self, keep: impl FnMut(&Attribute) -> bool) {
        self.items.retain(keep);
    }

    /// Drop valueless declarations and attributes without a local name.
    pub fn clean(&mut self) {
        self.retain(|attr| attr.value.is_some() && !attr.local_name.is_empty());
    }

    /// Drop identity-carrying attributes (type ID, or named `name`) so a
    /// reopened copy of an element does not duplicate them.
    pub fn anonymize(&mut self) {
        self.retain(|attr| attr.kind != AttributeKind::Id && attr.qname != "name");
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

fn normalize_for(kind: AttributeKind, value: Option<String>) -> Option<String> {
    match kind {
        AttributeKind::Cdata => value,
        _ => value.map(|v| v.split_whitespace().collect::<Vec<_>>().join(" ")),
    }
}
