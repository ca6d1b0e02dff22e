//! # VTT-RS Core
//!
//! Parser and printer for the WebVTT subtitle format. A document is read into
//! a typed tree (header, notes, style sheets, regions and cues with their
//! settings and payload markup) and printed back to text, with
//! `parse(print(document)) == document` for every document the printer can
//! express.
//!
//! ## Features
//!
//! - **Recovering parser**: only a malformed header is an error; unreadable
//!   blocks are kept verbatim as `Unknown` elements and reported as issues
//! - **Cue markup tree**: `<b>`, `<i>`, `<u>`, `<ruby>`, `<rt>`, `<c>`, `<v>`,
//!   `<lang>`, timestamps and arbitrary closed tags
//! - **Character references**: named, decimal and hexadecimal; the full HTML5
//!   name table behind the default `html5-entities` feature
//! - **Thread-safe**: all tree types are plain owned values, `Send + Sync`
//!
//! ## Quick Start
//!
//! ```rust
//! use vtt_core::{Component, Document};
//!
//! let text = "WEBVTT\n\n\
//!             intro\n\
//!             00:01.000 --> 00:04.000 align:start\n\
//!             <v Roger>Hello <b>world</b>";
//!
//! let document = Document::parse(text)?;
//! let cue = document.cues().next().unwrap();
//!
//! assert_eq!(cue.metadata.identifier(), Some("intro"));
//! assert_eq!(cue.text(), "Hello world");
//! assert!(matches!(cue.payload.components[0], Component::Voice { .. }));
//!
//! // The printer always closes voice tags
//! assert_eq!(document.to_string(), format!("{text}</v>"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(clippy::all)]
#![deny(unsafe_code)]

pub mod parser;
pub mod tokenizer;
pub mod utils;

pub use parser::{
    parse, print, Alignment, Component, Cue, CueMetadata, CuePayload, Direction, Document,
    Element, Header, HeaderMetadata, IssueCategory, IssueSeverity, Note, ParseError, ParseIssue,
    ParseOutput, Parser, ParserConfig, Region, RegionAnchor, RegionScroll, RegionSetting, Setting,
    Style, Time, Timing,
};
pub use utils::{CoreError, EntityCodec, EntityTable, Result};

/// Crate version for runtime compatibility checks
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
