use crate::attributes::Attributes;
use crate::model::{Categories, ElementFlags};
use crate::names::{element_namespace, local_name_of};

/// Schema description of one kind of element.
///
/// Element types are owned by a [`Schema`](crate::Schema) and shared
/// read-only with every parse that uses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementType {
    name: String,
    namespace: String,
    local_name: String,
    model: Categories,
    member_of: Categories,
    flags: ElementFlags,
    attributes: Attributes,
    parent: Option<String>,
}

impl ElementType {
    /// Create an element type. The namespace is derived from the name's
    /// prefix, falling back to `default_uri` for unprefixed names.
    #[must_use]
    pub fn new(
        name: &str,
        model: Categories,
        member_of: Categories,
        flags: ElementFlags,
        default_uri: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            namespace: element_namespace(name, default_uri),
            local_name: local_name_of(name).to_string(),
            model,
            member_of,
            flags,
            attributes: Attributes::new(),
            parent: None,
        }
    }

    /// Qualified name, as registered.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Namespace URI.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Name without its prefix.
    #[must_use]
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// Categories this element's children may belong to.
    #[must_use]
    pub const fn model(&self) -> Categories {
        self.model
    }

    /// Categories this element belongs to.
    #[must_use]
    pub const fn member_of(&self) -> Categories {
        self.member_of
    }

    /// Behavioural flags.
    #[must_use]
    pub const fn flags(&self) -> ElementFlags {
        self.flags
    }

    /// Returns true if the type carries every flag in `flag`.
    #[must_use]
    pub const fn has_flag(&self, flag: ElementFlags) -> bool {
        self.flags.contains(flag)
    }

    /// Default and typed attributes every new instance starts with.
    #[must_use]
    pub const fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Mutable access to the default attributes, for schema builders.
    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    /// Name of the natural parent used to ascend during rectification.
    #[must_use]
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Set the natural parent.
    pub fn set_parent(&mut self, parent: Option<String>) {
        self.parent = parent;
    }

    /// Returns true if an element of this type may directly contain an
    /// element of type `other`.
    #[must_use]
    pub const fn can_contain(&self, other: &Self) -> bool {
        self.model.intersects(other.member_of)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOCK: Categories = Categories::from_bits(1 << 1);
    const INLINE: Categories = Categories::from_bits(1 << 2);

    #[test]
    fn test_can_contain_uses_model_and_member_of() {
        let div = ElementType::new(
            "div",
            BLOCK | INLINE | Categories::PCDATA,
            BLOCK,
            ElementFlags::NONE,
            "urn:h",
        );
        let span = ElementType::new("span", INLINE | Categories::PCDATA, INLINE, ElementFlags::NONE, "urn:h");

        assert!(div.can_contain(&span));
        assert!(div.can_contain(&div));
        assert!(!span.can_contain(&div));
    }

    #[test]
    fn test_prefixed_name_gets_prefix_namespace() {
        let rect = ElementType::new("svg:rect", Categories::EMPTY, INLINE, ElementFlags::NONE, "urn:h");
        assert_eq!(rect.namespace(), "urn:x-prefix:svg");
        assert_eq!(rect.local_name(), "rect");
        assert_eq!(rect.name(), "svg:rect");
    }
}
