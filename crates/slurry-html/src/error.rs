use std::error::Error as StdError;
use std::io;

use thiserror::Error;

/// Result alias used throughout the scanner and parser.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures that abort a scan.
///
/// Malformed markup is never one of them: the scanner and parser repair it.
#[derive(Debug, Error)]
pub enum Error {
    /// The transition table has no entry for a reachable state and input.
    /// This is a defect in the table, not in the document.
    #[error("scanner has no transition from state {state} on {input:?} (line {line}, column {column})")]
    NoTransition {
        /// Name of the scanner state.
        state: String,
        /// The offending input character, `None` at end of input.
        input: Option<char>,
        /// Line of the offending character.
        line: usize,
        /// Column of the offending character.
        column: usize,
    },
    /// The character source failed.
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
    /// A content handler aborted the parse.
    #[error("content handler failed: {0}")]
    Handler(#[source] Box<dyn StdError + Send + Sync>),
}

impl Error {
    /// Wrap an arbitrary error raised by a content handler.
    pub fn handler(err: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self::Handler(err.into())
    }
}
