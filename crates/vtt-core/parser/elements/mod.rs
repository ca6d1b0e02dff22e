//! Element parsers for the blocks of a WebVTT document
//!
//! Each body block is tried as a note, a style sheet, a region definition and
//! a cue, in that order. A block no grammar accepts is kept verbatim as
//! [`Element::Unknown`] and the reason is recorded as a [`ParseIssue`].
//!
//! # Example
//!
//! ```rust
//! use vtt_core::parser::elements::ElementParser;
//! use vtt_core::tokenizer::BlockTokenizer;
//! use vtt_core::utils::EntityCodec;
//! use vtt_core::Element;
//!
//! let codec = EntityCodec::default();
//! let mut parser = ElementParser::new(&codec, Some(128));
//! let elements: Vec<_> = BlockTokenizer::new("NOTE hi\n\nnot a cue")
//!     .map(|block| parser.parse_block(block))
//!     .collect();
//!
//! assert!(matches!(elements[0], Element::Note(_)));
//! assert_eq!(elements[1], Element::Unknown("not a cue".to_string()));
//! assert_eq!(parser.into_issues().len(), 1);
//! ```

pub mod blocks;
pub mod cue;
pub mod header;

pub use blocks::{is_region_block, parse_note, parse_region, parse_style};
pub use cue::{parse_cue_parts, CueParts, CueRejection};
pub use header::{parse_header, HeaderParse, SIGNATURE};

use core::fmt;

use super::{
    ast::{Cue, Element},
    errors::{IssueCategory, ParseIssue},
    payload::PayloadParser,
};
use crate::{tokenizer::Block, utils::entities::EntityCodec};

/// Block-by-block element parser collecting recoverable issues
#[derive(Debug)]
pub struct ElementParser<'c> {
    /// Decoder for note, style, identifier and setting text
    codec: &'c EntityCodec,
    /// Parser for cue payloads
    payload: PayloadParser<'c>,
    /// Issues collected so far
    issues: Vec<ParseIssue>,
}

impl<'c> ElementParser<'c> {
    /// Create parser with the given codec and payload nesting limit
    #[must_use]
    pub const fn new(codec: &'c EntityCodec, max_nesting_depth: Option<usize>) -> Self {
        Self {
            codec,
            payload: PayloadParser::new(codec, max_nesting_depth),
            issues: Vec::new(),
        }
    }

    /// Parse one block into an element
    pub fn parse_block(&mut self, block: Block<'_>) -> Element {
        log::trace!("Parsing block at line {}", block.line);

        if let Some(note) = parse_note(block, self.codec) {
            return Element::Note(note);
        }
        if let Some(style) = parse_style(block, self.codec) {
            return Element::Style(style);
        }
        if let Some(region) = parse_region(block, self.codec) {
            return Element::Region(region);
        }

        match parse_cue_parts(block, self.codec) {
            Ok(parts) => Element::Cue(self.build_cue(parts)),
            Err(rejection) => self.unknown(block, rejection),
        }
    }

    /// Issues collected so far
    #[must_use]
    pub fn issues(&self) -> &[ParseIssue] {
        &self.issues
    }

    /// Consume the parser, returning its issues
    #[must_use]
    pub fn into_issues(self) -> Vec<ParseIssue> {
        self.issues
    }

    fn build_cue(&mut self, parts: CueParts<'_>) -> Cue {
        let parsed = self.payload.parse_tracked(parts.payload);
        if parsed.depth_exceeded {
            self.issues.push(ParseIssue::warning(
                IssueCategory::Markup,
                "Cue markup nested too deeply, inner tags kept as text".to_string(),
                parts.payload_line,
            ));
        }
        Cue::new(parts.metadata, parsed.payload)
    }

    fn unknown(&mut self, block: Block<'_>, rejection: CueRejection) -> Element {
        log::debug!("Block at line {} kept verbatim: {rejection:?}", block.line);

        let issue = if is_region_block(block) {
            ParseIssue::warning(
                IssueCategory::Setting,
                "Region block has invalid settings".to_string(),
                block.line,
            )
        } else {
            match rejection {
                CueRejection::MissingTiming { line } => ParseIssue::warning(
                    IssueCategory::Structure,
                    "Block is not a note, style, region or cue".to_string(),
                    line,
                ),
                CueRejection::InvalidTiming { line } => ParseIssue::warning(
                    IssueCategory::Timing,
                    "Malformed cue timing line".to_string(),
                    line,
                ),
                CueRejection::InvalidSettings { line } => ParseIssue::warning(
                    IssueCategory::Setting,
                    "Cue timing line has invalid settings".to_string(),
                    line,
                ),
            }
        };
        self.issues.push(issue);

        Element::Unknown(block.text.to_string())
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Note(note) => fmt::Display::fmt(note, f),
            Self::Style(style) => fmt::Display::fmt(style, f),
            Self::Region(region) => fmt::Display::fmt(region, f),
            Self::Cue(cue) => fmt::Display::fmt(cue, f),
            Self::Unknown(raw) => f.write_str(raw),
        }
    }
}
