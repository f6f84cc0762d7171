//! Schema-guided parser that turns scanner events into a balanced element
//! stream.

/// Per-parse state and rectification.
pub mod context;
/// Open element instances.
pub mod element;
/// Repairs recorded during a parse.
pub mod issues;
/// Name canonicalization and declaration helpers.
pub mod names;
/// Feature switches.
pub mod options;

pub use context::ParseContext;
pub use element::Element;
pub use issues::{IssueKind, ParseIssue};
pub use options::ParserOptions;

use std::io::Read;

use slurry_dom::DomTree;
use slurry_schema::{Schema, html_schema};

use crate::error::Result;
use crate::scanner::{HtmlScanner, Locator};
use crate::sink::{ContentHandler, Event, EventRecorder, TreeBuilder};

/// An HTML parser bound to a schema.
///
/// One parser may run any number of sequential parses; each parse gets a
/// fresh [`ParseContext`], so nothing leaks from one document into the
/// next.
pub struct HtmlParser<'s> {
    schema: &'s Schema,
    options: ParserOptions,
    scanner: HtmlScanner,
}

impl HtmlParser<'static> {
    /// Create a parser for the built-in HTML schema with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_schema(html_schema())
    }
}

impl Default for HtmlParser<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'s> HtmlParser<'s> {
    /// Create a parser for a custom schema with default options.
    #[must_use]
    pub fn with_schema(schema: &'s Schema) -> Self {
        Self {
            schema,
            options: ParserOptions::default(),
            scanner: HtmlScanner::new(),
        }
    }

    /// Replace the feature switches.
    #[must_use]
    pub const fn with_options(mut self, options: ParserOptions) -> Self {
        self.options = options;
        self
    }

    /// Current feature switches.
    #[must_use]
    pub const fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Identify the next document for the scanner's locator.
    pub fn set_document_ids(&mut self, public_id: Option<&str>, system_id: Option<&str>) {
        self.scanner.reset_locator(public_id, system_id);
    }

    /// Location of the last event reported by the scanner.
    #[must_use]
    pub const fn locator(&self) -> &Locator {
        self.scanner.locator()
    }

    /// Parse `html`, reporting to `handler`.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by `handler`. Malformed markup is
    /// repaired, never reported as an error.
    pub fn parse<H: ContentHandler + ?Sized>(&mut self, html: &str, handler: &mut H) -> Result<()> {
        let _ = self.parse_with_issues(html, handler)?;
        Ok(())
    }

    /// Parse `html`, reporting to `handler`, and return the repairs made.
    ///
    /// # Errors
    ///
    /// As [`Self::parse`].
    pub fn parse_with_issues<H: ContentHandler + ?Sized>(
        &mut self,
        html: &str,
        handler: &mut H,
    ) -> Result<Vec<ParseIssue>> {
        let mut context = ParseContext::new(self.schema, self.options, handler);
        context.begin()?;
        self.scanner.scan(html, &mut context)?;
        Ok(context.into_issues())
    }

    /// Parse everything `reader` yields and return the repairs made.
    /// Invalid UTF-8 is replaced with U+FFFD.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Io`] if reading fails, otherwise as
    /// [`Self::parse`].
    pub fn parse_reader<R: Read, H: ContentHandler + ?Sized>(
        &mut self,
        reader: R,
        handler: &mut H,
    ) -> Result<Vec<ParseIssue>> {
        let mut context = ParseContext::new(self.schema, self.options, handler);
        context.begin()?;
        self.scanner.scan_reader(reader, &mut context)?;
        Ok(context.into_issues())
    }
}

/// Parse `html` with the built-in schema into a document tree.
///
/// # Errors
///
/// Never fails for in-memory input; the `Result` mirrors [`HtmlParser::parse`].
///
/// # Example
/// ```
/// use slurry_html::parse_to_tree;
///
/// let tree = parse_to_tree("<p>Hello").unwrap();
/// let html = tree.document_element().unwrap();
/// assert_eq!(tree.text_content(html), "Hello");
/// assert_eq!(tree.elements_by_local_name(html, "p").len(), 1);
/// ```
pub fn parse_to_tree(html: &str) -> Result<DomTree> {
    let mut builder = TreeBuilder::new();
    HtmlParser::new().parse(html, &mut builder)?;
    Ok(builder.into_tree())
}

/// Parse `html` with the built-in schema into an owned event list.
///
/// # Errors
///
/// Never fails for in-memory input; the `Result` mirrors [`HtmlParser::parse`].
pub fn parse_to_events(html: &str) -> Result<Vec<Event>> {
    let mut recorder = EventRecorder::new();
    HtmlParser::new().parse(html, &mut recorder)?;
    Ok(recorder.into_events())
}
