use std::fmt;

use serde::Serialize;
use slurry_schema::Attributes;

use super::ContentHandler;
use crate::error::Result;

/// An owned structural event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// Start of the document.
    StartDocument,
    /// End of the document.
    EndDocument,
    /// A prefix binding starts.
    StartPrefixMapping {
        /// The prefix.
        prefix: String,
        /// The namespace it is bound to.
        uri: String,
    },
    /// A prefix binding ends.
    EndPrefixMapping {
        /// The prefix.
        prefix: String,
    },
    /// An element opens.
    StartElement {
        /// Namespace URI.
        uri: String,
        /// Name without prefix.
        local_name: String,
        /// Qualified name.
        qname: String,
        /// `(qualified name, value)` pairs in order.
        attributes: Vec<(String, String)>,
    },
    /// An element closes.
    EndElement {
        /// Namespace URI.
        uri: String,
        /// Name without prefix.
        local_name: String,
        /// Qualified name.
        qname: String,
    },
    /// Character data.
    Characters {
        /// The text.
        text: String,
    },
    /// Whitespace with no place in the tree.
    IgnorableWhitespace {
        /// The whitespace.
        text: String,
    },
    /// A processing instruction.
    ProcessingInstruction {
        /// Target name.
        target: String,
        /// Everything after the target.
        data: String,
    },
    /// A comment.
    Comment {
        /// Comment body.
        text: String,
    },
    /// A marked CDATA section starts.
    StartCdata,
    /// A marked CDATA section ends.
    EndCdata,
    /// The document type declaration.
    Doctype {
        /// Declared root element name.
        name: String,
        /// Public identifier.
        public_id: Option<String>,
        /// System identifier.
        system_id: Option<String>,
    },
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartDocument => write!(f, "start-document"),
            Self::EndDocument => write!(f, "end-document"),
            Self::StartPrefixMapping { prefix, uri } => write!(f, "start-prefix {prefix}={uri}"),
            Self::EndPrefixMapping { prefix } => write!(f, "end-prefix {prefix}"),
            Self::StartElement {
                qname, attributes, ..
            } => {
                write!(f, "start <{qname}")?;
                for (name, value) in attributes {
                    write!(f, " {name}={value:?}")?;
                }
                write!(f, ">")
            }
            Self::EndElement { qname, .. } => write!(f, "end </{qname}>"),
            Self::Characters { text } => write!(f, "text {text:?}"),
            Self::IgnorableWhitespace { text } => write!(f, "whitespace {text:?}"),
            Self::ProcessingInstruction { target, data } => write!(f, "pi {target} {data:?}"),
            Self::Comment { text } => write!(f, "comment {text:?}"),
            Self::StartCdata => write!(f, "start-cdata"),
            Self::EndCdata => write!(f, "end-cdata"),
            Self::Doctype {
                name,
                public_id,
                system_id,
            } => write!(f, "doctype {name} {public_id:?} {system_id:?}"),
        }
    }
}

/// A [`ContentHandler`] that records every event.
#[derive(Debug, Clone)]
pub struct EventRecorder {
    events: Vec<Event>,
    merge_text: bool,
}

impl EventRecorder {
    /// Create a recorder that merges adjacent character events.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            events: Vec::new(),
            merge_text: true,
        }
    }

    /// Choose whether adjacent character events are merged into one.
    #[must_use]
    pub const fn with_text_merging(mut self, merge: bool) -> Self {
        self.merge_text = merge;
        self
    }

    /// Events recorded so far.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Take the recorded events.
    #[must_use]
    pub fn into_events(self) -> Vec<Event> {
        self.events
    }

    fn record(&mut self, event: Event) -> Result<()> {
        self.events.push(event);
        Ok(())
    }
}

impl Default for EventRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentHandler for EventRecorder {
    fn start_document(&mut self) -> Result<()> {
        self.record(Event::StartDocument)
    }

    fn end_document(&mut self) -> Result<()> {
        self.record(Event::EndDocument)
    }

    fn start_prefix_mapping(&mut self, prefix: &str, uri: &str) -> Result<()> {
        self.record(Event::StartPrefixMapping {
            prefix: prefix.to_string(),
            uri: uri.to_string(),
        })
    }

    fn end_prefix_mapping(&mut self, prefix: &str) -> Result<()> {
        self.record(Event::EndPrefixMapping {
            prefix: prefix.to_string(),
        })
    }

    fn start_element(
        &mut self,
        uri: &str,
        local_name: &str,
        qname: &str,
        attributes: &Attributes,
    ) -> Result<()> {
        let attributes = attributes
            .iter()
            .filter_map(|attr| Some((attr.qname.clone(), attr.value.clone()?)))
            .collect();
        self.record(Event::StartElement {
            uri: uri.to_string(),
            local_name: local_name.to_string(),
            qname: qname.to_string(),
            attributes,
        })
    }

    fn end_element(&mut self, uri: &str, local_name: &str, qname: &str) -> Result<()> {
        self.record(Event::EndElement {
            uri: uri.to_string(),
            local_name: local_name.to_string(),
            qname: qname.to_string(),
        })
    }

    fn characters(&mut self, text: &str) -> Result<()> {
        if self.merge_text {
            if let Some(Event::Characters { text: last }) = self.events.last_mut() {
                last.push_str(text);
                return Ok(());
            }
        }
        self.record(Event::Characters {
            text: text.to_string(),
        })
    }

    fn ignorable_whitespace(&mut self, text: &str) -> Result<()> {
        self.record(Event::IgnorableWhitespace {
            text: text.to_string(),
        })
    }

    fn processing_instruction(&mut self, target: &str, data: &str) -> Result<()> {
        self.record(Event::ProcessingInstruction {
            target: target.to_string(),
            data: data.to_string(),
        })
    }

    fn comment(&mut self, text: &str) -> Result<()> {
        self.record(Event::Comment {
            text: text.to_string(),
        })
    }

    fn start_cdata(&mut self) -> Result<()> {
        self.record(Event::StartCdata)
    }

    fn end_cdata(&mut self) -> Result<()> {
        self.record(Event::EndCdata)
    }

    fn doctype(
        &mut self,
        name: &str,
        public_id: Option<&str>,
        system_id: Option<&str>,
    ) -> Result<()> {
        self.record(Event::Doctype {
            name: name.to_string(),
            public_id: public_id.map(str::to_string),
            system_id: system_id.map(str::to_string),
        })
    }
}
