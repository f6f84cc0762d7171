use serde::Serialize;
use strum_macros::Display;

/// Kinds of structural repair the parser performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum IssueKind {
    /// A start tag named an element the schema does not know; a placeholder
    /// type was made up for it.
    UnknownElement,
    /// Content was dropped: an unknown element with bogons ignored, or
    /// content that could not be placed anywhere.
    IgnoredElement,
    /// An end tag matched no open element.
    UnmatchedEndTag,
    /// An end tag was deferred because a no-force-close element is open
    /// above its match.
    PreclosedElement,
    /// A second DOCTYPE declaration was ignored.
    DuplicateDoctype,
    /// An end tag inside raw content did not close it and was kept as text.
    LiteralEndTagInCdata,
}

/// A repair recorded during a parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseIssue {
    /// What kind of repair this was.
    pub kind: IssueKind,
    /// Human-readable description.
    pub message: String,
}

impl ParseIssue {
    /// Create an issue.
    #[must_use]
    pub const fn new(kind: IssueKind, message: String) -> Self {
        Self { kind, message }
    }
}
