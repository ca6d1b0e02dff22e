//! Parser error types
//!
//! - `parse_error` - Unrecoverable header errors
//! - `parse_issue` - Recoverable issues collected during parsing

pub mod parse_error;
pub mod parse_issue;

pub use parse_error::ParseError;
pub use parse_issue::{IssueCategory, IssueSeverity, ParseIssue};
