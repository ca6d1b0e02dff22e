//! Structural parse errors
//!
//! Only the document header can make parsing fail. Every other anomaly is
//! recovered into an `Unknown` element and optionally reported as a
//! [`ParseIssue`](super::ParseIssue).

use thiserror::Error;

/// Unrecoverable document error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Document does not start with `WEBVTT`
    #[error("Missing WEBVTT signature at line {line}")]
    MissingSignature { line: usize },

    /// Signature followed by something other than a space or a line break
    #[error("Invalid character {found:?} after WEBVTT signature at line {line}: expected a space or a line break")]
    InvalidSignature { found: char, line: usize },

    /// Header reaches the end of input with lines that are not metadata
    #[error("Header starting at line {line} is not terminated by a blank line")]
    UnterminatedHeader { line: usize },
}

impl ParseError {
    /// Line the error refers to (1-based)
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::MissingSignature { line }
            | Self::InvalidSignature { line, .. }
            | Self::UnterminatedHeader { line } => *line,
        }
    }
}
