//! WebVTT document parser and printer
//!
//! Parsing prepares the input (byte order mark removed, line endings
//! normalized to `\n`, surrounding blank lines trimmed), reads the header and
//! then turns every blank-line separated block into an [`Element`]. Only a
//! malformed header fails; any other block that no grammar accepts is kept
//! verbatim as [`Element::Unknown`].
//!
//! Printing is the inverse and never fails. Parsing the printed form of a
//! document yields the same document.
//!
//! # Example
//!
//! ```rust
//! use vtt_core::parser::{Parser, ParserConfig};
//!
//! let parser = Parser::with_config(ParserConfig {
//!     max_nesting_depth: Some(16),
//!     ..ParserConfig::default()
//! })?;
//! let output = parser.parse_with_issues("WEBVTT\n\nnot a cue\n\n00:01.000 --> 00:02.000\nHi")?;
//!
//! assert_eq!(output.document.cues().count(), 1);
//! assert_eq!(output.issues.len(), 1);
//! assert_eq!(output.issues[0].line, 3);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod ast;
pub mod elements;
pub mod errors;
pub mod payload;
pub mod settings;
pub mod timing;

pub use ast::{
    Alignment, Component, Cue, CueMetadata, CuePayload, Direction, Document, Element, Header,
    HeaderMetadata, Note, Region, RegionAnchor, RegionScroll, RegionSetting, Setting, Style, Time,
    Timing,
};
pub use errors::{IssueCategory, IssueSeverity, ParseError, ParseIssue};
pub use payload::PayloadParser;

use core::{fmt, str::FromStr};

use self::elements::{parse_header, ElementParser, HeaderParse};
use crate::{
    tokenizer::{BlockTokenizer, Scanner, BLOCK_SEPARATOR},
    utils::{
        entities::{EntityCodec, EntityTable},
        errors::{CoreError, Result},
        utf8::{normalize_line_endings, strip_bom},
    },
};

/// Nesting limit for cue markup unless configured otherwise
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 128;

/// Configuration for document parsing
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Number of tag levels parsed as markup; deeper text stays plain
    ///
    /// `None` disables the limit.
    pub max_nesting_depth: Option<usize>,

    /// Named character references resolved when decoding text
    pub entities: EntityTable,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_nesting_depth: Some(DEFAULT_MAX_NESTING_DEPTH),
            entities: EntityTable::default(),
        }
    }
}

impl ParserConfig {
    /// Check the configuration for values the parser cannot work with
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Config`] if `max_nesting_depth` is `Some(0)`,
    /// which would leave even top-level tags unparsed.
    pub fn validate(&self) -> Result<()> {
        if self.max_nesting_depth == Some(0) {
            return Err(CoreError::config(
                "max_nesting_depth must be at least 1, use None to disable the limit",
            ));
        }
        Ok(())
    }
}

/// Parsed document together with recoverable issues
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutput {
    /// Parsed document
    pub document: Document,
    /// Blocks kept verbatim, dropped header lines and truncated markup
    pub issues: Vec<ParseIssue>,
}

impl ParseOutput {
    /// Check whether any issue has warning severity
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.issues
            .iter()
            .any(|issue| issue.severity == IssueSeverity::Warning)
    }
}

/// Configured WebVTT parser
#[derive(Debug, Clone, Default)]
pub struct Parser {
    /// Parser settings
    config: ParserConfig,
    /// Codec built from the configured entity table
    codec: EntityCodec,
}

impl Parser {
    /// Create parser with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create parser with a custom configuration
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Config`] if the configuration is invalid.
    pub fn with_config(config: ParserConfig) -> Result<Self> {
        config.validate()?;
        let codec = EntityCodec::new(config.entities.clone());
        Ok(Self { config, codec })
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a document
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Parse`] if the header is malformed.
    pub fn parse(&self, source: &str) -> Result<Document> {
        self.parse_with_issues(source).map(|output| output.document)
    }

    /// Parse a document and report recoverable issues
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Parse`] if the header is malformed.
    pub fn parse_with_issues(&self, source: &str) -> Result<ParseOutput> {
        let normalized = normalize_line_endings(strip_bom(source));
        let content = normalized.trim_start_matches('\n');
        let first_line = 1 + normalized.len() - content.len();
        let content = content.trim_end_matches('\n');

        let mut issues = Vec::new();
        let HeaderParse {
            header,
            body,
            body_line,
        } = parse_header(Scanner::with_line(content, first_line), &self.codec, &mut issues)?;

        let mut elements = ElementParser::new(&self.codec, self.config.max_nesting_depth);
        let parsed: Vec<Element> = BlockTokenizer::starting_at(body, body_line)
            .map(|block| elements.parse_block(block))
            .collect();
        issues.extend(elements.into_issues());

        log::debug!(
            "Parsed {} elements with {} issues",
            parsed.len(),
            issues.len()
        );

        Ok(ParseOutput {
            document: Document::new(header, parsed),
            issues,
        })
    }

    /// Parse cue payload text with this parser's entity table and nesting limit
    #[must_use]
    pub fn parse_payload(&self, text: &str) -> CuePayload {
        PayloadParser::new(&self.codec, self.config.max_nesting_depth).parse(text)
    }
}

/// Parse a document with the default configuration
///
/// # Errors
///
/// Returns [`CoreError::Parse`] if the header is malformed.
pub fn parse(source: &str) -> Result<Document> {
    Parser::new().parse(source)
}

/// Print a document
#[must_use]
pub fn print(document: &Document) -> String {
    document.to_string()
}

impl Document {
    /// Parse a document with the default configuration
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Parse`] if the header is malformed.
    pub fn parse(source: &str) -> Result<Self> {
        parse(source)
    }
}

impl FromStr for Document {
    type Err = CoreError;

    fn from_str(source: &str) -> Result<Self> {
        Self::parse(source)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{BLOCK_SEPARATOR}", self.header)?;
        for (index, element) in self.elements.iter().enumerate() {
            if index > 0 {
                f.write_str(BLOCK_SEPARATOR)?;
            }
            write!(f, "{element}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ParserConfig::default();
        assert_eq!(config.max_nesting_depth, Some(DEFAULT_MAX_NESTING_DEPTH));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_depth_is_rejected() {
        let config = ParserConfig {
            max_nesting_depth: Some(0),
            ..ParserConfig::default()
        };
        assert!(matches!(
            Parser::with_config(config),
            Err(CoreError::Config(_))
        ));
    }

    #[test]
    fn input_is_normalized_before_parsing() {
        let document = parse("\u{feff}\r\n\r\nWEBVTT\r\n\r\n00:01.000 --> 00:02.000\rHi\r\n\n").unwrap();
        let cue = document.cues().next().unwrap();
        assert_eq!(cue.text(), "Hi");
    }

    #[test]
    fn line_numbers_count_trimmed_lines() {
        let output = Parser::new()
            .parse_with_issues("\n\nWEBVTT\n\njunk")
            .unwrap();
        assert_eq!(output.issues[0].line, 5);
        assert!(output.has_warnings());

        let err = parse("\n\nWEBVTT\tx").unwrap_err();
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn header_only_document() {
        let document = parse("WEBVTT").unwrap();
        assert_eq!(document, Document::default());
        assert_eq!(print(&document), "WEBVTT\n\n");
    }

    #[test]
    fn minimal_entity_table() {
        let parser = Parser::with_config(ParserConfig {
            entities: EntityTable::minimal(),
            ..ParserConfig::default()
        })
        .unwrap();
        let payload = parser.parse_payload("&copy; &amp;");
        assert_eq!(payload.text(), "&copy; &");
    }
}
