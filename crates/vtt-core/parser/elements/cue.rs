//! Cue block parser
//!
//! A cue block is an optional identifier line, a timing line with settings,
//! and the payload text. The first line is tried as a timing line; when that
//! fails it is taken as the identifier and the second line must be the timing.

use core::fmt;

use crate::{
    parser::{
        ast::{Cue, CueMetadata},
        settings::parse_settings_line,
        timing::{parse_timing, TIMING_ARROW},
    },
    tokenizer::{Block, Scanner},
    utils::entities::{encode, EntityCodec},
};

/// Why a block could not be read as a cue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueRejection {
    /// Neither of the first two lines looks like a timing line
    MissingTiming {
        /// First line of the block
        line: usize,
    },
    /// A line contains `-->` but is not a valid timing
    InvalidTiming {
        /// Line holding the malformed timing
        line: usize,
    },
    /// Timing parsed but the rest of its line is not a list of settings
    InvalidSettings {
        /// Timing line
        line: usize,
    },
}

impl CueRejection {
    /// Line the rejection refers to
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::MissingTiming { line }
            | Self::InvalidTiming { line }
            | Self::InvalidSettings { line } => *line,
        }
    }
}

/// Cue metadata plus the raw payload text it introduces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CueParts<'a> {
    /// Identifier, timing and settings
    pub metadata: CueMetadata,
    /// Unparsed payload, empty when the block ends after the timing line
    pub payload: &'a str,
    /// Line the payload starts on
    pub payload_line: usize,
}

/// Split a block into cue metadata and payload text
///
/// # Errors
///
/// Returns a [`CueRejection`] describing the first line that prevented the
/// block from being a cue.
pub fn parse_cue_parts<'a>(
    block: Block<'a>,
    codec: &EntityCodec,
) -> Result<CueParts<'a>, CueRejection> {
    let mut scanner = block.scanner();
    let metadata = parse_metadata(&mut scanner, codec)?;

    let payload_line = scanner.line() + 1;
    let payload = if scanner.eat("\n") {
        scanner.rest()
    } else {
        ""
    };

    Ok(CueParts {
        metadata,
        payload,
        payload_line,
    })
}

fn parse_metadata(
    scanner: &mut Scanner<'_>,
    codec: &EntityCodec,
) -> Result<CueMetadata, CueRejection> {
    let first_line = scanner.line();
    if let Some(timing) = parse_timing(scanner) {
        let settings = parse_settings_line(scanner, codec)
            .ok_or(CueRejection::InvalidSettings { line: first_line })?;
        return Ok(CueMetadata::new(None, timing, settings));
    }

    let identifier = scanner.take_line();
    let no_timing = if identifier.contains(TIMING_ARROW) {
        CueRejection::InvalidTiming { line: first_line }
    } else {
        CueRejection::MissingTiming { line: first_line }
    };
    if !scanner.eat("\n") {
        return Err(no_timing);
    }

    let timing_line = scanner.line();
    let Some(timing) = parse_timing(scanner) else {
        return Err(if scanner.rest().lines().next().unwrap_or_default().contains(TIMING_ARROW) {
            CueRejection::InvalidTiming { line: timing_line }
        } else {
            no_timing
        });
    };
    let settings = parse_settings_line(scanner, codec)
        .ok_or(CueRejection::InvalidSettings { line: timing_line })?;

    Ok(CueMetadata::new(
        Some(codec.decode(identifier).into_owned()),
        timing,
        settings,
    ))
}

impl fmt::Display for CueMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(identifier) = self.identifier() {
            writeln!(f, "{}", encode(identifier))?;
        }
        write!(f, "{}", self.timing())?;
        self.settings()
            .iter()
            .try_for_each(|setting| write!(f, " {setting}"))
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.metadata)?;
        let payload = self.payload.to_string();
        if payload.is_empty() {
            return Ok(());
        }
        write!(f, "\n{payload}")
    }
}
