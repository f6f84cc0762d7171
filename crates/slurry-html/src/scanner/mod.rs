//! Table-driven lexical scanner.
//!
//! [`HtmlScanner`] pulls characters from its input, normalizes them, and
//! drives the machine in [`table`]. Every recognized unit is reported to a
//! [`ScanHandler`]. The scanner knows nothing about document structure; a
//! handler that wants raw content (for `script` and `style`) asks for it
//! through [`ScanHandler::take_cdata_request`].

/// The scanner's lexical event receiver.
pub mod handler;
/// The transition table and its compiled form.
pub mod table;

use std::io::Read;

pub use handler::ScanHandler;
pub use table::{Action, State};

use crate::error::{Error, Result};

/// Text and raw-text runs longer than this are reported in pieces.
pub const FLUSH_THRESHOLD: usize = 180;

/// Unicode equivalents of the Windows-1252 characters 0x80 to 0x9F.
const WINDOWS_1252: [char; 32] = [
    '\u{20AC}', '\u{FFFD}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{FFFD}', '\u{017D}', '\u{FFFD}',
    '\u{FFFD}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{FFFD}', '\u{017E}', '\u{0178}',
];

fn windows_1252(value: u32) -> Option<char> {
    value
        .checked_sub(0x80)
        .and_then(|index| WINDOWS_1252.get(index as usize))
        .copied()
}

/// Turn a resolved reference value into the character to substitute.
///
/// Values 0x80 to 0x9F are read as Windows-1252. Controls below 0x20,
/// surrogates, the non-characters U+FFFE and U+FFFF, and values past
/// U+10FFFF yield `None` and are dropped.
///
/// # Example
/// ```
/// use slurry_html::scanner::decode_reference;
///
/// assert_eq!(decode_reference(65), Some('A'));
/// assert_eq!(decode_reference(0x93), Some('\u{201C}'));
/// assert_eq!(decode_reference(0xD800), None);
/// ```
#[must_use]
pub fn decode_reference(value: u32) -> Option<char> {
    let value = windows_1252(value).map_or(value, u32::from);
    if value < 0x20 {
        return None;
    }
    char::from_u32(value).filter(|&c| !is_non_character(c))
}

/// U+FFFE and U+FFFF may not appear in XML text.
const fn is_non_character(c: char) -> bool {
    matches!(c, '\u{FFFE}' | '\u{FFFF}')
}

/// Where the scanner is in the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Locator {
    /// Public identifier of the document, if known.
    pub public_id: Option<String>,
    /// System identifier of the document, if known.
    pub system_id: Option<String>,
    /// Line of the last reported event, starting at 1.
    pub line: usize,
    /// Column of the last reported event.
    pub column: usize,
}

/// Character source with unlimited pushback.
struct Input<I> {
    chars: I,
    pushback: Vec<char>,
}

impl<I: Iterator<Item = char>> Input<I> {
    const fn new(chars: I) -> Self {
        Self {
            chars,
            pushback: Vec::new(),
        }
    }

    fn read(&mut self) -> Option<char> {
        self.pushback.pop().or_else(|| self.chars.next())
    }

    fn unread(&mut self, c: Option<char>) {
        if let Some(c) = c {
            self.pushback.push(c);
        }
    }
}

/// The lexical scanner.
///
/// A scanner may be reused for any number of sequential scans.
pub struct HtmlScanner {
    state: State,
    next_state: State,
    buffer: String,
    locator: Locator,
    line: usize,
    column: usize,
}

impl HtmlScanner {
    /// Create a scanner in the text state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: State::Text,
            next_state: State::Text,
            buffer: String::with_capacity(FLUSH_THRESHOLD + 20),
            locator: Locator {
                line: 1,
                ..Locator::default()
            },
            line: 1,
            column: 0,
        }
    }

    /// Seed location metadata for the next scan.
    pub fn reset_locator(&mut self, public_id: Option<&str>, system_id: Option<&str>) {
        self.locator = Locator {
            public_id: public_id.map(str::to_string),
            system_id: system_id.map(str::to_string),
            line: 1,
            column: 0,
        };
        self.line = 1;
        self.column = 0;
    }

    /// Location of the last reported event.
    #[must_use]
    pub const fn locator(&self) -> &Locator {
        &self.locator
    }

    /// Switch to raw text once the current action completes. Only the end
    /// tag leaves raw text.
    pub const fn start_cdata(&mut self) {
        self.next_state = State::RawText;
    }

    /// Scan a whole string.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by `handler`, or
    /// [`Error::NoTransition`] if the machine is incomplete.
    pub fn scan<H: ScanHandler + ?Sized>(&mut self, input: &str, handler: &mut H) -> Result<()> {
        self.scan_chars(input.chars(), handler)
    }

    /// Scan everything `reader` yields. Invalid UTF-8 is replaced with
    /// U+FFFD.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if reading fails, otherwise as [`Self::scan`].
    pub fn scan_reader<R: Read, H: ScanHandler + ?Sized>(
        &mut self,
        mut reader: R,
        handler: &mut H,
    ) -> Result<()> {
        let mut bytes = Vec::new();
        let _ = reader.read_to_end(&mut bytes)?;
        self.scan(&String::from_utf8_lossy(&bytes), handler)
    }

    fn scan_chars<I, H>(&mut self, chars: I, handler: &mut H) -> Result<()>
    where
        I: Iterator<Item = char>,
        H: ScanHandler + ?Sized,
    {
        self.state = State::Text;
        self.next_state = State::Text;
        self.buffer.clear();
        self.line = 1;
        self.column = 0;

        let mut input = Input::new(chars);
        let first = input.read();
        if first != Some('\u{FEFF}') {
            input.unread(first);
        }

        while self.state != State::Done {
            let mut ch = input
                .read()
                .map(|c| windows_1252(u32::from(c)).unwrap_or(c));
            if ch == Some('\r') {
                let next = input.read();
                if next != Some('\n') {
                    input.unread(next);
                }
                ch = Some('\n');
            }

            let position = (self.line, self.column);
            if ch == Some('\n') {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }

            if ch.is_some_and(|c| (c < ' ' && c != '\n' && c != '\t') || is_non_character(c)) {
                continue;
            }

            let Some((action, next)) = table::table().lookup(self.state, ch) else {
                return Err(Error::NoTransition {
                    state: self.state.to_string(),
                    input: ch,
                    line: self.line,
                    column: self.column,
                });
            };
            self.next_state = next;
            if self.perform(action, ch, handler)? {
                input.unread(ch);
                (self.line, self.column) = position;
            }
            if handler.take_cdata_request() {
                self.start_cdata();
            }
            self.state = self.next_state;
        }
        handler.eof()
    }

    /// Run one action. Returns `true` if `ch` must be read again.
    fn perform<H: ScanHandler + ?Sized>(
        &mut self,
        action: Action,
        ch: Option<char>,
        handler: &mut H,
    ) -> Result<bool> {
        match action {
            Action::Skip => {}
            Action::Save => self.save_input(ch, handler)?,
            Action::Space => self.save(' ', handler)?,
            Action::LessThan => {
                self.mark();
                self.save('<', handler)?;
                self.save_input(ch, handler)?;
            }
            Action::LessThanText => {
                self.mark();
                self.save('<', handler)?;
                self.flush_text(handler)?;
            }
            Action::Dash => {
                self.save('-', handler)?;
                self.save_input(ch, handler)?;
            }
            Action::DashDash => {
                for c in "- -".chars() {
                    self.save(c, handler)?;
                }
                self.save_input(ch, handler)?;
            }
            Action::DashSpace => {
                self.save('-', handler)?;
                self.save(' ', handler)?;
            }
            Action::Text => {
                self.mark();
                self.flush_text(handler)?;
            }
            Action::UnsaveText => {
                let _ = self.buffer.pop();
                self.flush_text(handler)?;
            }
            Action::EntityStart => {
                self.flush_text(handler)?;
                self.save_input(ch, handler)?;
            }
            Action::Entity => return self.entity(ch, handler),
            Action::TagName => self.emit(handler, H::start_tag_name)?,
            Action::TagNameClose => {
                self.emit(handler, H::start_tag_name)?;
                handler.start_tag_close()?;
            }
            Action::TagClose => {
                self.buffer.clear();
                handler.start_tag_close()?;
            }
            Action::EmptyTag => {
                self.mark();
                if !self.buffer.is_empty() {
                    self.emit(handler, H::start_tag_name)?;
                }
                handler.empty_tag_close()?;
            }
            Action::EndTag => self.emit(handler, H::end_tag)?,
            Action::AttrName => self.emit(handler, H::attribute_name)?,
            Action::AttrNameNoValue => {
                self.emit(handler, H::attribute_name)?;
                handler.attribute_without_value()?;
            }
            Action::AttrNameNoValueClose => {
                self.emit(handler, H::attribute_name)?;
                handler.attribute_without_value()?;
                handler.start_tag_close()?;
            }
            Action::AttrValue => self.emit(handler, H::attribute_value)?,
            Action::AttrValueClose => {
                self.emit(handler, H::attribute_value)?;
                handler.start_tag_close()?;
            }
            Action::NoValueSave => {
                self.buffer.clear();
                handler.attribute_without_value()?;
                self.save_input(ch, handler)?;
            }
            Action::NoValueClose => {
                self.buffer.clear();
                handler.attribute_without_value()?;
                handler.start_tag_close()?;
            }
            Action::Comment => {
                self.mark();
                self.emit(handler, H::comment)?;
            }
            Action::Declaration => self.emit(handler, H::declaration)?,
            Action::CdataSection => {
                self.mark();
                if self.buffer.ends_with("]]") {
                    self.buffer.truncate(self.buffer.len() - 2);
                }
                self.emit(handler, H::cdata_section)?;
            }
            Action::PiTarget => self.emit(handler, H::pi_target)?,
            Action::PiTargetPi => {
                self.emit(handler, H::pi_target)?;
                handler.pi("")?;
            }
            Action::Pi => {
                self.mark();
                self.emit(handler, H::pi)?;
            }
        }
        Ok(false)
    }

    /// Extend or resolve a character reference.
    fn entity<H: ScanHandler + ?Sized>(&mut self, ch: Option<char>, handler: &mut H) -> Result<bool> {
        self.mark();
        if let Some(c) = ch {
            let keep = match self.state {
                State::Entity if c == '#' => {
                    self.next_state = State::NumericReference;
                    true
                }
                State::NumericReference if c == 'x' || c == 'X' => {
                    self.next_state = State::HexReference;
                    true
                }
                State::Entity => c.is_alphanumeric(),
                State::NumericReference => c.is_ascii_digit(),
                State::HexReference => c.is_ascii_hexdigit(),
                _ => false,
            };
            if keep {
                self.save(c, handler)?;
                return Ok(false);
            }
        }

        self.next_state = State::Text;
        let name = self.buffer.strip_prefix('&').unwrap_or(&self.buffer);
        match handler.entity(name) {
            Some(value) => {
                self.buffer.clear();
                if let Some(decoded) = decode_reference(value) {
                    self.save(decoded, handler)?;
                }
                Ok(ch != Some(';'))
            }
            // The literal `&name` stays in the buffer as text.
            None => Ok(true),
        }
    }

    const fn mark(&mut self) {
        self.locator.line = self.line;
        self.locator.column = self.column;
    }

    fn save<H: ScanHandler + ?Sized>(&mut self, c: char, handler: &mut H) -> Result<()> {
        if self.buffer.len() >= FLUSH_THRESHOLD
            && matches!(self.state, State::Text | State::RawText)
        {
            self.flush_text(handler)?;
        }
        self.buffer.push(c);
        Ok(())
    }

    fn save_input<H: ScanHandler + ?Sized>(&mut self, ch: Option<char>, handler: &mut H) -> Result<()> {
        match ch {
            Some(c) => self.save(c, handler),
            None => Ok(()),
        }
    }

    fn flush_text<H: ScanHandler + ?Sized>(&mut self, handler: &mut H) -> Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        self.emit(handler, H::text)
    }

    /// Hand the buffer to `event` and reset it.
    fn emit<H: ScanHandler + ?Sized>(
        &mut self,
        handler: &mut H,
        event: impl FnOnce(&mut H, &str) -> Result<()>,
    ) -> Result<()> {
        let result = event(handler, &self.buffer);
        self.buffer.clear();
        result
    }
}

impl Default for HtmlScanner {
    fn default() -> Self {
        Self::new()
    }
}
