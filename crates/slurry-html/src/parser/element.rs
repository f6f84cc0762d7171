use std::sync::Arc;

use slurry_schema::{Attributes, Categories, ElementFlags, ElementType};

/// One open (or saved) tag instance.
///
/// An element lives either on the parser's open-element stack or in its
/// list of elements saved for restart, never both.
#[derive(Debug, Clone)]
pub struct Element {
    element_type: Arc<ElementType>,
    attributes: Attributes,
    preclosed: bool,
}

impl Element {
    /// Create an element, optionally starting from the type's defaulted
    /// attributes.
    #[must_use]
    pub fn new(element_type: Arc<ElementType>, default_attributes: bool) -> Self {
        let attributes = if default_attributes {
            element_type.attributes().clone()
        } else {
            Attributes::new()
        };
        Self {
            element_type,
            attributes,
            preclosed: false,
        }
    }

    /// The element's type.
    #[must_use]
    pub const fn element_type(&self) -> &Arc<ElementType> {
        &self.element_type
    }

    /// Qualified name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.element_type.name()
    }

    /// Namespace URI.
    #[must_use]
    pub fn namespace(&self) -> &str {
        self.element_type.namespace()
    }

    /// Name without prefix.
    #[must_use]
    pub fn local_name(&self) -> &str {
        self.element_type.local_name()
    }

    /// Content model of the element's type.
    #[must_use]
    pub fn model(&self) -> Categories {
        self.element_type.model()
    }

    /// Whether the element's type carries `flag`.
    #[must_use]
    pub fn has_flag(&self, flag: ElementFlags) -> bool {
        self.element_type.has_flag(flag)
    }

    /// Whether `child` may be a direct child of this element.
    #[must_use]
    pub fn can_contain(&self, child: &Self) -> bool {
        self.element_type.can_contain(&child.element_type)
    }

    /// Current attributes.
    #[must_use]
    pub const fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Set an attribute, keeping the type it was declared with.
    pub fn set_attribute(&mut self, name: &str, value: String) {
        self.attributes.set(name, None, Some(value));
    }

    /// Drop valueless declarations before the element is reported.
    pub fn clean(&mut self) {
        self.attributes.clean();
    }

    /// Drop identity-carrying attributes before the element is saved.
    pub fn anonymize(&mut self) {
        self.attributes.anonymize();
    }

    /// Whether an end tag for this element was seen inside a no-force-close
    /// ancestor.
    #[must_use]
    pub const fn is_preclosed(&self) -> bool {
        self.preclosed
    }

    /// Mark the element closed; it is popped once it reaches the top.
    pub const fn preclose(&mut self) {
        self.preclosed = true;
    }
}
