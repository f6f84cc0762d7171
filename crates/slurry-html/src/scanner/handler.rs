use crate::error::Result;

/// Receiver of the scanner's lexical events.
///
/// Every `&str` argument borrows the scanner's reusable buffer and is only
/// valid for the duration of the call.
pub trait ScanHandler {
    /// An attribute name.
    fn attribute_name(&mut self, name: &str) -> Result<()>;

    /// The value of the most recent attribute name.
    fn attribute_value(&mut self, value: &str) -> Result<()>;

    /// The most recent attribute name appeared without `=value`.
    fn attribute_without_value(&mut self) -> Result<()>;

    /// A start-tag name (general identifier).
    fn start_tag_name(&mut self, name: &str) -> Result<()>;

    /// The `>` closing a start tag.
    fn start_tag_close(&mut self) -> Result<()>;

    /// The `/>` closing an empty-element tag.
    fn empty_tag_close(&mut self) -> Result<()>;

    /// An end tag. The name is empty for `</>`.
    fn end_tag(&mut self, name: &str) -> Result<()>;

    /// A run of character data. Long runs arrive in several calls.
    fn text(&mut self, text: &str) -> Result<()>;

    /// The content of a `<![CDATA[ ... ]]>` section.
    fn cdata_section(&mut self, text: &str) -> Result<()>;

    /// The body of a comment.
    fn comment(&mut self, text: &str) -> Result<()>;

    /// The body of a `<!...>` declaration.
    fn declaration(&mut self, text: &str) -> Result<()>;

    /// A processing-instruction target.
    fn pi_target(&mut self, target: &str) -> Result<()>;

    /// Processing-instruction data following the most recent target.
    fn pi(&mut self, data: &str) -> Result<()>;

    /// Resolve the reference text between `&` and `;` (for example `amp`,
    /// `#65` or `#x41`) to a code point.
    fn entity(&mut self, name: &str) -> Option<u32>;

    /// End of input. Called exactly once, last.
    fn eof(&mut self) -> Result<()>;

    /// Whether the handler wants the scanner to switch to raw text after the
    /// current event. Returning `true` clears the request.
    fn take_cdata_request(&mut self) -> bool {
        false
    }
}
