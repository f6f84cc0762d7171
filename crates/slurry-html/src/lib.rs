//! Forgiving HTML scanner and schema-guided parser.
//!
//! # Scope
//!
//! This crate implements:
//! - **Scanner** ([`scanner`])
//!   - A build-once transition table driven one character at a time
//!   - Tags, attributes, text, comments, declarations, processing
//!     instructions, CDATA sections and raw text for `script`/`style`
//!   - Numeric and named character references, with Windows-1252 fixups
//!
//! - **Parser** ([`parser`])
//!   - Element types, content models and natural parents from a
//!     [`slurry_schema::Schema`]
//!   - Rectification: missing ancestors are opened, misplaced elements
//!     closed, and restartable formatting elements reopened
//!   - Unknown elements, namespaces for prefixed names, DOCTYPE handling
//!
//! - **Consumers** ([`sink`])
//!   - The [`ContentHandler`] event contract
//!   - [`EventRecorder`] and [`TreeBuilder`]
//!
//! Whatever the input, the events handed to a [`ContentHandler`] describe
//! a well-formed document: every element that starts also ends, in order.
//!
//! # Not Implemented
//!
//! - Encoding detection (input is already text)
//! - Serializing events back to markup

/// Scanner and parser errors.
pub mod error;
/// Schema-guided structural parser.
pub mod parser;
/// Table-driven lexical scanner.
pub mod scanner;
/// Event consumers.
pub mod sink;

pub use error::{Error, Result};
pub use parser::{
    HtmlParser, IssueKind, ParseIssue, ParserOptions, parse_to_events, parse_to_tree,
};
pub use scanner::{HtmlScanner, Locator, ScanHandler};
pub use sink::{ContentHandler, Event, EventRecorder, TreeBuilder};
