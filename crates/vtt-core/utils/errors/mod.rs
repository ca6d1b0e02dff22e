//! Error types shared across vtt-rs modules
//!
//! # Examples
//!
//! ```rust
//! use vtt_core::utils::errors::CoreError;
//!
//! let err = CoreError::invalid_time("00:01", "missing milliseconds");
//! assert!(!err.is_structural());
//! ```

mod core;

pub use self::core::{CoreError, Result};
