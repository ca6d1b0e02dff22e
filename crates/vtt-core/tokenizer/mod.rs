//! Block tokenizer for WebVTT documents
//!
//! The body of a WebVTT document is a sequence of blocks separated by runs of
//! two or more line breaks. [`BlockTokenizer`] hands out each block as a
//! zero-copy slice of the source together with the line it starts on.
//!
//! # Example
//!
//! ```rust
//! use vtt_core::tokenizer::BlockTokenizer;
//!
//! let source = "NOTE first\n\n\n00:01.000 --> 00:02.000\nHello";
//! let blocks: Vec<_> = BlockTokenizer::new(source).collect();
//!
//! assert_eq!(blocks[0].text, "NOTE first");
//! assert_eq!(blocks[1].text, "00:01.000 --> 00:02.000\nHello");
//! assert_eq!(blocks[1].line, 4);
//! ```

pub mod scanner;

pub use scanner::{is_horizontal_whitespace, Scanner};

use crate::utils::utf8::count_newlines;

/// Separator between blocks
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// One blank-line separated block of a document body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    /// Block text without surrounding line breaks
    pub text: &'a str,
    /// Line number of the first line of the block (1-based)
    pub line: usize,
}

impl<'a> Block<'a> {
    /// Scanner positioned at the start of the block
    #[must_use]
    pub const fn scanner(&self) -> Scanner<'a> {
        Scanner::with_line(self.text, self.line)
    }
}

/// Iterator over the blocks of a normalized document body
#[derive(Debug, Clone)]
pub struct BlockTokenizer<'a> {
    /// Source text being split
    source: &'a str,
    /// Current byte position in source
    position: usize,
    /// Current line number for block positions
    line: usize,
}

impl<'a> BlockTokenizer<'a> {
    /// Create tokenizer for a body starting on line 1
    #[must_use]
    pub const fn new(source: &'a str) -> Self {
        Self::starting_at(source, 1)
    }

    /// Create tokenizer for a body whose first line has the given number
    #[must_use]
    pub const fn starting_at(source: &'a str, line: usize) -> Self {
        Self {
            source,
            position: 0,
            line,
        }
    }
}

impl<'a> Iterator for BlockTokenizer<'a> {
    type Item = Block<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.source[self.position..];
        let trimmed = rest.trim_start_matches('\n');
        let skipped = rest.len() - trimmed.len();
        self.position += skipped;
        self.line += skipped;

        if trimmed.is_empty() {
            return None;
        }

        let end = trimmed.find(BLOCK_SEPARATOR).unwrap_or(trimmed.len());
        let block = Block {
            text: &trimmed[..end],
            line: self.line,
        };
        self.position += end;
        self.line += count_newlines(block.text);

        Some(block)
    }
}
