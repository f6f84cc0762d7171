//! Prefix, local-name and namespace resolution for qualified names.
//!
//! HTML has no namespace declarations of its own, so prefixes are mapped
//! to synthetic URIs instead of being resolved against `xmlns` attributes.

/// The namespace bound to the reserved `xml` prefix.
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// URI prefix for namespaces invented for unbound prefixes.
pub const PREFIX_NAMESPACE_BASE: &str = "urn:x-prefix:";

/// The prefix of a qualified name, or `""` if it has none.
#[must_use]
pub fn prefix_of(name: &str) -> &str {
    name.split_once(':').map_or("", |(prefix, _)| prefix)
}

/// The local part of a qualified name.
#[must_use]
pub fn local_name_of(name: &str) -> &str {
    name.split_once(':').map_or(name, |(_, local)| local)
}

/// Namespace of an element name: unprefixed names live in `default_uri`.
#[must_use]
pub fn element_namespace(name: &str, default_uri: &str) -> String {
    match name.split_once(':') {
        None => default_uri.to_string(),
        Some((prefix, _)) => prefixed_namespace(prefix),
    }
}

/// Namespace of an attribute name: unprefixed attributes have none.
#[must_use]
pub fn attribute_namespace(name: &str) -> String {
    match name.split_once(':') {
        None => String::new(),
        Some((prefix, _)) => prefixed_namespace(prefix),
    }
}

fn prefixed_namespace(prefix: &str) -> String {
    if prefix == "xml" {
        XML_NAMESPACE.to_string()
    } else {
        format!("{PREFIX_NAMESPACE_BASE}{prefix}")
    }
}
