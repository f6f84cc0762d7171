//! The scanner's finite-state machine.
//!
//! The machine is written down once as a flat list of
//! `(state, trigger, action, next state)` rows in [`TRANSITIONS`] and compiled
//! on first use into a dense table indexed by state and input column. The
//! compiled table is process-wide and never changes after construction.

use std::sync::LazyLock;

use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{Display, EnumCount, EnumIter};

/// Lexical states of the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumCount, EnumIter)]
pub enum State {
    /// Ordinary character data.
    Text,
    /// Just after `<`.
    TagOpen,
    /// Inside a start-tag name.
    TagName,
    /// Whitespace between attributes.
    TagWhitespace,
    /// Inside an attribute name.
    AttributeName,
    /// After an attribute name and whitespace, waiting for `=`.
    BeforeEquals,
    /// After `=`, waiting for the value.
    AttributeValue,
    /// Inside an unquoted attribute value.
    UnquotedValue,
    /// Inside a single-quoted attribute value.
    SingleQuoted,
    /// Inside a double-quoted attribute value.
    DoubleQuoted,
    /// After `/` inside a start tag.
    EmptyTag,
    /// Inside an end tag.
    EndTag,
    /// After `&` in character data.
    Entity,
    /// After `&#`.
    NumericReference,
    /// After `&#x`.
    HexReference,
    /// After `<!`.
    Declaration,
    /// Inside a declaration body.
    DeclarationBody,
    /// After `<!-`.
    CommentStart,
    /// Inside a comment.
    Comment,
    /// After one `-` inside a comment.
    CommentDash,
    /// After `--` inside a comment.
    CommentEnd,
    /// After `<![`.
    CdataOpen,
    /// After `<![C`.
    CdataOpenC,
    /// After `<![CD`.
    CdataOpenCd,
    /// After `<![CDA`.
    CdataOpenCda,
    /// After `<![CDAT`.
    CdataOpenCdat,
    /// After `<![CDATA`.
    CdataOpenCdata,
    /// Inside a marked CDATA section.
    CdataSection,
    /// After `]` inside a CDATA section.
    CdataSectionBracket,
    /// After `]]` inside a CDATA section.
    CdataSectionEnd,
    /// After `<?`.
    PiTarget,
    /// Processing-instruction data.
    PiData,
    /// Raw content of a CDATA element such as `script`.
    RawText,
    /// After `<` inside raw content.
    RawTextLessThan,
    /// After `</` inside raw content; everything up to `>` is kept verbatim.
    RawEndTag,
    /// Input exhausted.
    Done,
}

/// Work performed on a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Action {
    /// Discard the character.
    Skip,
    /// Append the character to the buffer.
    Save,
    /// Append a space instead of the character.
    Space,
    /// Append `<` and the character: a stray less-than.
    LessThan,
    /// Append `<` and flush as text.
    LessThanText,
    /// Append `-` and the character.
    Dash,
    /// Append `- -` and the character.
    DashDash,
    /// Append `- `.
    DashSpace,
    /// Flush the buffer as text.
    Text,
    /// Drop the last buffered character, then flush as text.
    UnsaveText,
    /// Flush text, then start collecting a reference with `&`.
    EntityStart,
    /// Collect or resolve a character reference.
    Entity,
    /// Report the buffer as a start-tag name.
    TagName,
    /// Report the start-tag name and close the tag.
    TagNameClose,
    /// Close the start tag.
    TagClose,
    /// Close an empty-element tag, reporting a pending name first.
    EmptyTag,
    /// Report the buffer as an end-tag name.
    EndTag,
    /// Report an attribute name.
    AttrName,
    /// Report an attribute name that has no value.
    AttrNameNoValue,
    /// Report a valueless attribute name and close the tag.
    AttrNameNoValueClose,
    /// Report an attribute value.
    AttrValue,
    /// Report an attribute value and close the tag.
    AttrValueClose,
    /// The pending attribute has no value; start a new name with the character.
    NoValueSave,
    /// The pending attribute has no value; close the tag.
    NoValueClose,
    /// Report a comment.
    Comment,
    /// Report a declaration.
    Declaration,
    /// Report a marked CDATA section, minus its trailing `]]`.
    CdataSection,
    /// Report a processing-instruction target.
    PiTarget,
    /// Report a processing-instruction target with empty data.
    PiTargetPi,
    /// Report processing-instruction data.
    Pi,
}

/// Input that selects a row of the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Exactly this character.
    Char(char),
    /// Space, newline or tab.
    Whitespace,
    /// Any character without a more specific row, and end of input when no
    /// [`Trigger::Eof`] row exists.
    Any,
    /// End of input.
    Eof,
}

use Action as A;
use State as S;
use Trigger::{Any, Char, Eof, Whitespace};

/// The scanner's machine as `(state, trigger, action, next state)` rows.
#[rustfmt::skip]
pub const TRANSITIONS: &[(State, Trigger, Action, State)] = &[
    (S::Text, Char('&'), A::EntityStart, S::Entity),
    (S::Text, Char('<'), A::Text, S::TagOpen),
    (S::Text, Any, A::Save, S::Text),
    (S::Text, Eof, A::Text, S::Done),

    (S::TagOpen, Char('!'), A::Skip, S::Declaration),
    (S::TagOpen, Char('/'), A::Skip, S::EndTag),
    (S::TagOpen, Char('?'), A::Skip, S::PiTarget),
    (S::TagOpen, Char('<'), A::Save, S::TagOpen),
    (S::TagOpen, Whitespace, A::LessThan, S::Text),
    (S::TagOpen, Any, A::Save, S::TagName),
    (S::TagOpen, Eof, A::LessThanText, S::Done),

    (S::TagName, Char('/'), A::Skip, S::EmptyTag),
    (S::TagName, Char('>'), A::TagNameClose, S::Text),
    (S::TagName, Whitespace, A::TagName, S::TagWhitespace),
    (S::TagName, Any, A::Save, S::TagName),
    (S::TagName, Eof, A::Skip, S::Done),

    (S::TagWhitespace, Char('/'), A::Skip, S::EmptyTag),
    (S::TagWhitespace, Char('>'), A::TagClose, S::Text),
    (S::TagWhitespace, Whitespace, A::Skip, S::TagWhitespace),
    (S::TagWhitespace, Any, A::Save, S::AttributeName),
    (S::TagWhitespace, Eof, A::TagClose, S::Done),

    (S::AttributeName, Char('/'), A::AttrNameNoValue, S::EmptyTag),
    (S::AttributeName, Char('='), A::AttrName, S::AttributeValue),
    (S::AttributeName, Char('>'), A::AttrNameNoValueClose, S::Text),
    (S::AttributeName, Whitespace, A::AttrName, S::BeforeEquals),
    (S::AttributeName, Any, A::Save, S::AttributeName),
    (S::AttributeName, Eof, A::AttrNameNoValueClose, S::Done),

    (S::BeforeEquals, Char('='), A::Skip, S::AttributeValue),
    (S::BeforeEquals, Char('>'), A::NoValueClose, S::Text),
    (S::BeforeEquals, Whitespace, A::Skip, S::BeforeEquals),
    (S::BeforeEquals, Any, A::NoValueSave, S::AttributeName),
    (S::BeforeEquals, Eof, A::NoValueClose, S::Done),

    (S::AttributeValue, Char('\''), A::Skip, S::SingleQuoted),
    (S::AttributeValue, Char('"'), A::Skip, S::DoubleQuoted),
    (S::AttributeValue, Char('>'), A::AttrValueClose, S::Text),
    (S::AttributeValue, Whitespace, A::Skip, S::AttributeValue),
    (S::AttributeValue, Any, A::Save, S::UnquotedValue),
    (S::AttributeValue, Eof, A::AttrValueClose, S::Done),

    (S::UnquotedValue, Char('>'), A::AttrValueClose, S::Text),
    (S::UnquotedValue, Whitespace, A::AttrValue, S::TagWhitespace),
    (S::UnquotedValue, Any, A::Save, S::UnquotedValue),
    (S::UnquotedValue, Eof, A::AttrValueClose, S::Done),

    (S::SingleQuoted, Char('\''), A::AttrValue, S::TagWhitespace),
    (S::SingleQuoted, Whitespace, A::Space, S::SingleQuoted),
    (S::SingleQuoted, Any, A::Save, S::SingleQuoted),
    (S::SingleQuoted, Eof, A::AttrValueClose, S::Done),

    (S::DoubleQuoted, Char('"'), A::AttrValue, S::TagWhitespace),
    (S::DoubleQuoted, Whitespace, A::Space, S::DoubleQuoted),
    (S::DoubleQuoted, Any, A::Save, S::DoubleQuoted),
    (S::DoubleQuoted, Eof, A::AttrValueClose, S::Done),

    (S::EmptyTag, Char('>'), A::EmptyTag, S::Text),
    (S::EmptyTag, Whitespace, A::Skip, S::TagWhitespace),
    (S::EmptyTag, Any, A::Save, S::AttributeName),
    (S::EmptyTag, Eof, A::EmptyTag, S::Done),

    (S::EndTag, Char('>'), A::EndTag, S::Text),
    (S::EndTag, Whitespace, A::Skip, S::EndTag),
    (S::EndTag, Any, A::Save, S::EndTag),
    (S::EndTag, Eof, A::EndTag, S::Done),

    (S::Entity, Any, A::Entity, S::Entity),
    (S::Entity, Eof, A::Entity, S::Done),
    (S::NumericReference, Any, A::Entity, S::NumericReference),
    (S::HexReference, Any, A::Entity, S::HexReference),

    (S::Declaration, Char('-'), A::Skip, S::CommentStart),
    (S::Declaration, Char('['), A::Skip, S::CdataOpen),
    (S::Declaration, Char('>'), A::Skip, S::Text),
    (S::Declaration, Any, A::Save, S::DeclarationBody),
    (S::Declaration, Eof, A::Skip, S::Done),

    (S::DeclarationBody, Char('>'), A::Declaration, S::Text),
    (S::DeclarationBody, Any, A::Save, S::DeclarationBody),
    (S::DeclarationBody, Eof, A::Skip, S::Done),

    (S::CommentStart, Char('-'), A::Skip, S::Comment),
    (S::CommentStart, Any, A::Save, S::Comment),
    (S::CommentStart, Eof, A::Comment, S::Done),

    (S::Comment, Char('-'), A::Skip, S::CommentDash),
    (S::Comment, Any, A::Save, S::Comment),
    (S::Comment, Eof, A::Comment, S::Done),

    (S::CommentDash, Char('-'), A::Skip, S::CommentEnd),
    (S::CommentDash, Any, A::Dash, S::Comment),
    (S::CommentDash, Eof, A::Comment, S::Done),

    (S::CommentEnd, Char('-'), A::DashSpace, S::CommentEnd),
    (S::CommentEnd, Char('>'), A::Comment, S::Text),
    (S::CommentEnd, Any, A::DashDash, S::Comment),
    (S::CommentEnd, Eof, A::Comment, S::Done),

    (S::CdataOpen, Char('C'), A::Skip, S::CdataOpenC),
    (S::CdataOpen, Any, A::Skip, S::Declaration),
    (S::CdataOpen, Eof, A::Skip, S::Done),
    (S::CdataOpenC, Char('D'), A::Skip, S::CdataOpenCd),
    (S::CdataOpenC, Any, A::Skip, S::Declaration),
    (S::CdataOpenC, Eof, A::Skip, S::Done),
    (S::CdataOpenCd, Char('A'), A::Skip, S::CdataOpenCda),
    (S::CdataOpenCd, Any, A::Skip, S::Declaration),
    (S::CdataOpenCd, Eof, A::Skip, S::Done),
    (S::CdataOpenCda, Char('T'), A::Skip, S::CdataOpenCdat),
    (S::CdataOpenCda, Any, A::Skip, S::Declaration),
    (S::CdataOpenCda, Eof, A::Skip, S::Done),
    (S::CdataOpenCdat, Char('A'), A::Skip, S::CdataOpenCdata),
    (S::CdataOpenCdat, Any, A::Skip, S::Declaration),
    (S::CdataOpenCdat, Eof, A::Skip, S::Done),
    (S::CdataOpenCdata, Char('['), A::Skip, S::CdataSection),
    (S::CdataOpenCdata, Any, A::Skip, S::Declaration),
    (S::CdataOpenCdata, Eof, A::Skip, S::Done),

    (S::CdataSection, Char(']'), A::Save, S::CdataSectionBracket),
    (S::CdataSection, Any, A::Save, S::CdataSection),
    (S::CdataSection, Eof, A::Skip, S::Done),
    (S::CdataSectionBracket, Char(']'), A::Save, S::CdataSectionEnd),
    (S::CdataSectionBracket, Any, A::Save, S::CdataSection),
    (S::CdataSectionBracket, Eof, A::Skip, S::Done),
    (S::CdataSectionEnd, Char('>'), A::CdataSection, S::Text),
    (S::CdataSectionEnd, Char(']'), A::Save, S::CdataSectionEnd),
    (S::CdataSectionEnd, Any, A::Save, S::CdataSection),
    (S::CdataSectionEnd, Eof, A::Skip, S::Done),

    (S::PiTarget, Char('>'), A::PiTargetPi, S::Text),
    (S::PiTarget, Whitespace, A::PiTarget, S::PiData),
    (S::PiTarget, Any, A::Save, S::PiTarget),
    (S::PiTarget, Eof, A::PiTargetPi, S::Done),

    (S::PiData, Char('>'), A::Pi, S::Text),
    (S::PiData, Any, A::Save, S::PiData),
    (S::PiData, Eof, A::Pi, S::Done),

    (S::RawText, Char('<'), A::Save, S::RawTextLessThan),
    (S::RawText, Any, A::Save, S::RawText),
    (S::RawText, Eof, A::Text, S::Done),

    (S::RawTextLessThan, Char('/'), A::UnsaveText, S::RawEndTag),
    (S::RawTextLessThan, Char('<'), A::Save, S::RawTextLessThan),
    (S::RawTextLessThan, Any, A::Save, S::RawText),
    (S::RawTextLessThan, Eof, A::Text, S::Done),

    (S::RawEndTag, Char('>'), A::EndTag, S::Text),
    (S::RawEndTag, Any, A::Save, S::RawEndTag),
    (S::RawEndTag, Eof, A::EndTag, S::Done),
];

const WHITESPACE: [char; 3] = [' ', '\n', '\t'];

/// A resolved `(action, next state)` cell.
pub type Transition = (Action, State);

/// Dense form of [`TRANSITIONS`].
///
/// Column 0 collects every character above the highest trigger character,
/// column 1 is end of input and column `c + 2` is character `c`.
pub struct CompiledTable {
    rows: Vec<Vec<Option<Transition>>>,
    highest: u32,
}

impl CompiledTable {
    fn compile() -> Self {
        let highest = TRANSITIONS
            .iter()
            .filter_map(|&(_, trigger, _, _)| match trigger {
                Char(c) => Some(c as u32),
                Whitespace => Some(' ' as u32),
                Any | Eof => None,
            })
            .max()
            .unwrap_or(0);
        let width = highest as usize + 3;
        let mut rows = vec![vec![None; width]; State::COUNT];

        // Defaults first so that specific rows overwrite them.
        for &(state, trigger, action, next) in TRANSITIONS {
            if trigger == Any {
                rows[state as usize].fill(Some((action, next)));
            }
        }
        for &(state, trigger, action, next) in TRANSITIONS {
            let row = &mut rows[state as usize];
            match trigger {
                Char(c) => row[c as usize + 2] = Some((action, next)),
                Whitespace => {
                    for c in WHITESPACE {
                        row[c as usize + 2] = Some((action, next));
                    }
                }
                Eof => row[1] = Some((action, next)),
                Any => {}
            }
        }
        Self { rows, highest }
    }

    const fn column(&self, input: Option<char>) -> usize {
        match input {
            None => 1,
            Some(c) if c as u32 <= self.highest => c as usize + 2,
            Some(_) => 0,
        }
    }

    /// The transition taken from `state` on `input` (`None` is end of input).
    #[must_use]
    pub fn lookup(&self, state: State, input: Option<char>) -> Option<Transition> {
        self.rows
            .get(state as usize)
            .and_then(|row| row.get(self.column(input)))
            .copied()
            .flatten()
    }

    /// States that have no entry for some input column.
    #[must_use]
    pub fn incomplete_states(&self) -> Vec<State> {
        State::iter()
            .filter(|&state| state != State::Done)
            .filter(|&state| self.rows[state as usize].iter().any(Option::is_none))
            .collect()
    }
}

static TABLE: LazyLock<CompiledTable> = LazyLock::new(CompiledTable::compile);

/// The process-wide compiled machine.
pub fn table() -> &'static CompiledTable {
    &TABLE
}
