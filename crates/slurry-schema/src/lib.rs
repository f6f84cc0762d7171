//! Schema data for the slurry HTML parser.
//!
//! # Scope
//!
//! This crate implements:
//! - **Content models** - [`Categories`] bitsets describing which kinds of
//!   children an element accepts and which kinds it belongs to
//! - **Element types** - [`ElementType`] descriptors with flags, typed default
//!   attributes and a natural parent used to rebuild missing ancestors
//! - **Schema registry** - [`Schema`], a case-insensitive lookup of element
//!   types plus the named character entity table
//! - **HTML** - [`html_schema`], a built-in HTML 4 schema
//!
//! The schema is pure data. The parser only reads it; element types invented
//! for unknown tags during a parse never leak back into a [`Schema`].

/// Typed attribute lists.
pub mod attributes;
/// Element type descriptors.
pub mod element_type;
/// The built-in HTML schema.
pub mod html;
/// Category bitsets and element flags.
pub mod model;
/// Qualified-name helpers (prefixes, local names, namespaces).
pub mod names;
/// The element type registry.
pub mod schema;

pub use attributes::{Attribute, AttributeKind, Attributes};
pub use element_type::ElementType;
pub use html::html_schema;
pub use model::{Categories, ElementFlags};
pub use schema::{Schema, SchemaError};
