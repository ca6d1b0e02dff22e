//! Core error type for vtt-rs operations
//!
//! Provides the main `CoreError` enum that wraps all error types from different
//! modules in the crate. Structural document failures arrive as [`ParseError`]
//! and are carried unchanged so callers can still match on the exact cause.

use core::fmt;

use thiserror::Error;

use crate::parser::errors::ParseError;

/// Main error type for vtt-rs core operations
///
/// Only a malformed header makes document parsing fail; everything else in a
/// document recovers into `Unknown` elements. The remaining variants come from
/// the standalone `FromStr` entry points and configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Structural parse failure
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Time or timing line did not match the grammar
    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    /// Cue or region setting token did not match any setting grammar
    #[error("Invalid setting: {0}")]
    InvalidSetting(String),

    /// Entity table data could not be loaded
    #[error("Invalid entity table: {0}")]
    InvalidEntityTable(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CoreError {
    /// Create time error from invalid input
    pub fn invalid_time<T: fmt::Display>(time: T, reason: &str) -> Self {
        Self::InvalidTime(format!("'{time}': {reason}"))
    }

    /// Create setting error from invalid input
    pub fn invalid_setting<T: fmt::Display>(setting: T, reason: &str) -> Self {
        Self::InvalidSetting(format!("'{setting}': {reason}"))
    }

    /// Create configuration error from message
    pub fn config<T: fmt::Display>(message: T) -> Self {
        Self::Config(message.to_string())
    }

    /// Check whether the error came from document structure
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(self, Self::Parse(_))
    }

    /// Line number attached to the error, if any
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::Parse(err) => Some(err.line()),
            _ => None,
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = core::result::Result<T, CoreError>;
