//! Cursor used by the line-oriented grammars
//!
//! Header, timing and settings grammars all walk a normalized (`\n` only)
//! source with a [`Scanner`]. It is `Copy`, so a grammar that fails can
//! restore the position it started from.

use crate::utils::utf8::count_newlines;

/// Horizontal whitespace accepted around times and setting tokens
#[must_use]
pub const fn is_horizontal_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\u{000B}' | '\u{000C}')
}

/// Byte cursor over a source with line tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scanner<'a> {
    /// Source text being scanned
    source: &'a str,
    /// Current byte position in source
    position: usize,
    /// Current line number (1-based)
    line: usize,
}

impl<'a> Scanner<'a> {
    /// Create scanner at the start of `source`, on line 1
    #[must_use]
    pub const fn new(source: &'a str) -> Self {
        Self::with_line(source, 1)
    }

    /// Create scanner whose first line has the given number
    #[must_use]
    pub const fn with_line(source: &'a str, line: usize) -> Self {
        Self {
            source,
            position: 0,
            line,
        }
    }

    /// Get current position
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Get current line
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Unconsumed input
    #[must_use]
    pub fn rest(&self) -> &'a str {
        &self.source[self.position..]
    }

    /// Check if at end of source
    #[must_use]
    pub const fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Check if at end of source or at a line break
    #[must_use]
    pub fn is_at_line_end(&self) -> bool {
        matches!(self.peek(), None | Some('\n'))
    }

    /// Peek at current character without advancing
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Consume `literal` if the input starts with it
    pub fn eat(&mut self, literal: &str) -> bool {
        if self.rest().starts_with(literal) {
            self.consume(literal.len());
            true
        } else {
            false
        }
    }

    /// Consume the longest prefix whose characters satisfy `predicate`
    pub fn take_while(&mut self, mut predicate: impl FnMut(char) -> bool) -> &'a str {
        let rest = self.rest();
        let len = rest.find(|ch: char| !predicate(ch)).unwrap_or(rest.len());
        self.consume(len);
        &rest[..len]
    }

    /// Skip whitespace (excluding newlines), returning how many bytes were skipped
    pub fn skip_horizontal_whitespace(&mut self) -> usize {
        self.take_while(is_horizontal_whitespace).len()
    }

    /// Consume text up to (not including) the next line break
    pub fn take_line(&mut self) -> &'a str {
        self.take_while(|ch| ch != '\n')
    }

    /// Consume a run of ASCII digits
    pub fn take_digits(&mut self) -> &'a str {
        self.take_while(|ch| ch.is_ascii_digit())
    }

    /// Consume an optionally signed decimal integer
    ///
    /// The position is left untouched when no integer is present or the
    /// value does not fit in an `i64`.
    pub fn take_integer(&mut self) -> Option<i64> {
        self.attempt(|scanner| {
            let sign_len = usize::from(scanner.eat("-") || scanner.eat("+"));
            let digits = scanner.take_digits();
            if digits.is_empty() {
                return None;
            }
            let start = scanner.position - digits.len() - sign_len;
            scanner.source[start..scanner.position].parse().ok()
        })
    }

    /// Run `grammar`, restoring the position if it fails
    pub fn attempt<T>(&mut self, grammar: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let checkpoint = *self;
        let result = grammar(self);
        if result.is_none() {
            *self = checkpoint;
        }
        result
    }

    /// Advance by `len` bytes, counting line breaks
    fn consume(&mut self, len: usize) {
        self.line += count_newlines(&self.rest()[..len]);
        self.position += len;
    }
}
