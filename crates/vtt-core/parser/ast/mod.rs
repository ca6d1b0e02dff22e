//! AST node types for WebVTT documents
//!
//! Every node is an immutable value type compared structurally. Nodes are
//! produced by parsing or by explicit construction and consumed whole by
//! printing.
//!
//! # Example
//!
//! ```rust
//! use vtt_core::{Component, Cue, CueMetadata, CuePayload, Document, Element, Header, Time, Timing};
//!
//! let cue = Cue::new(
//!     CueMetadata::new(None, Timing::new(Time::new(0, 0, 1, 0), Time::new(0, 0, 2, 0)), []),
//!     CuePayload::new(vec![Component::plain("Hello")]),
//! );
//! let document = Document::new(Header::default(), vec![Element::Cue(cue)]);
//!
//! assert_eq!(document.to_string(), "WEBVTT\n\n00:01.000 --> 00:02.000\nHello");
//! ```

mod cue;
mod payload;
mod region;
mod time;

pub use cue::{Alignment, Cue, CueMetadata, Direction, Setting};
pub use payload::{Component, CuePayload};
pub use region::{Region, RegionAnchor, RegionScroll, RegionSetting};
pub use time::{Time, Timing};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parsed WebVTT document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Document {
    /// Signature line and metadata
    pub header: Header,
    /// Body blocks in document order
    pub elements: Vec<Element>,
}

impl Document {
    /// Create document from header and elements
    #[must_use]
    pub const fn new(header: Header, elements: Vec<Element>) -> Self {
        Self { header, elements }
    }

    /// Iterate over cues
    pub fn cues(&self) -> impl Iterator<Item = &Cue> {
        self.elements.iter().filter_map(|element| match element {
            Element::Cue(cue) => Some(cue),
            _ => None,
        })
    }

    /// Iterate over notes
    pub fn notes(&self) -> impl Iterator<Item = &Note> {
        self.elements.iter().filter_map(|element| match element {
            Element::Note(note) => Some(note),
            _ => None,
        })
    }

    /// Iterate over style sheets
    pub fn styles(&self) -> impl Iterator<Item = &Style> {
        self.elements.iter().filter_map(|element| match element {
            Element::Style(style) => Some(style),
            _ => None,
        })
    }

    /// Iterate over region definitions
    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.elements.iter().filter_map(|element| match element {
            Element::Region(region) => Some(region),
            _ => None,
        })
    }

    /// Iterate over blocks kept verbatim because no grammar matched them
    pub fn unknowns(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(|element| match element {
            Element::Unknown(raw) => Some(raw.as_str()),
            _ => None,
        })
    }
}

/// Document header
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Header {
    /// Free text after the `WEBVTT` signature
    ///
    /// Empty text is printed as a bare signature and reads back as `None`.
    pub text: Option<String>,
    /// `key: value` lines in written order
    pub metadata: Vec<HeaderMetadata>,
}

impl Header {
    /// Create header from text and metadata, treating empty text as `None`
    #[must_use]
    pub fn new(text: Option<String>, metadata: Vec<HeaderMetadata>) -> Self {
        Self {
            text: text.filter(|text| !text.is_empty()),
            metadata,
        }
    }

    /// Value of the first metadata line with the given key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.metadata
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.value.as_str())
    }
}

/// Header metadata line
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HeaderMetadata {
    /// Text before the colon
    pub key: String,
    /// Text after the colon
    pub value: String,
}

impl HeaderMetadata {
    /// Create metadata line
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Body block
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Element {
    /// `NOTE` comment
    Note(Note),
    /// `STYLE` sheet
    Style(Style),
    /// `REGION` definition
    Region(Region),
    /// Timed cue
    Cue(Cue),
    /// Block no grammar matched, kept verbatim
    Unknown(String),
}

/// Comment block
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Note {
    /// Comment text
    pub text: String,
}

impl Note {
    /// Create note
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Style sheet block
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Style {
    /// CSS text
    pub text: String,
}

impl Style {
    /// Create style block
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_queries_filter_by_kind() {
        let document = Document::new(
            Header::default(),
            vec![
                Element::Note(Note::new("n")),
                Element::Style(Style::new("::cue {}")),
                Element::Region(Region::default()),
                Element::Unknown("junk".to_string()),
                Element::Cue(Cue::new(
                    CueMetadata::new(None, Timing::default(), []),
                    CuePayload::default(),
                )),
            ],
        );
        assert_eq!(document.cues().count(), 1);
        assert_eq!(document.notes().next(), Some(&Note::new("n")));
        assert_eq!(document.styles().count(), 1);
        assert_eq!(document.regions().count(), 1);
        assert_eq!(document.unknowns().collect::<Vec<_>>(), ["junk"]);
    }

    #[test]
    fn header_lookup_returns_first_match() {
        let header = Header::new(
            None,
            vec![
                HeaderMetadata::new("Kind", "captions"),
                HeaderMetadata::new("Kind", "subtitles"),
            ],
        );
        assert_eq!(header.get("Kind"), Some("captions"));
        assert_eq!(header.get("Language"), None);
    }
}
