//! Utility functions and shared types for vtt-rs
//!
//! Contains the character reference codec, input normalization, hashing
//! helpers and the crate-wide error type.

pub mod entities;
pub mod errors;
pub mod hashers;
pub mod utf8;

pub use entities::{EntityCodec, EntityTable};
pub use errors::{CoreError, Result};
pub use hashers::dedup_preserving_order;
pub use utf8::{normalize_line_endings, strip_bom};
