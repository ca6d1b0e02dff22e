//! UTF-8 input preparation for WebVTT documents
//!
//! Files arrive with Windows (`\r\n`) or classic Mac (`\r`) line endings and
//! often with a byte order mark. The grammars only ever see `\n`.

use std::borrow::Cow;

/// Unicode byte order mark as it appears in decoded text
pub const BOM: char = '\u{FEFF}';

/// Strip a single leading byte order mark
///
/// # Examples
///
/// ```rust
/// # use vtt_core::utils::utf8::strip_bom;
/// assert_eq!(strip_bom("\u{FEFF}WEBVTT"), "WEBVTT");
/// assert_eq!(strip_bom("WEBVTT"), "WEBVTT");
/// ```
#[must_use]
pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix(BOM).unwrap_or(text)
}

/// Normalize line endings to Unix style (\n)
///
/// Converts Windows (\r\n) and classic Mac (\r) line endings to Unix (\n).
/// Text without carriage returns is borrowed unchanged.
///
/// # Examples
///
/// ```rust
/// # use vtt_core::utils::utf8::normalize_line_endings;
/// let input = "Line 1\r\nLine 2\rLine 3\n";
/// let normalized = normalize_line_endings(input);
/// assert_eq!(normalized, "Line 1\nLine 2\nLine 3\n");
/// ```
#[must_use]
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Count newline characters in a span
#[must_use]
pub fn count_newlines(text: &str) -> usize {
    text.bytes().filter(|&byte| byte == b'\n').count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bom_is_stripped_once() {
        assert_eq!(strip_bom("\u{FEFF}\u{FEFF}x"), "\u{FEFF}x");
        assert_eq!(strip_bom(""), "");
    }

    #[test]
    fn line_endings_are_normalized() {
        assert_eq!(normalize_line_endings("a\r\n\r\nb"), "a\n\nb");
        assert_eq!(normalize_line_endings("a\r\rb"), "a\n\nb");
        assert!(matches!(normalize_line_endings("a\nb"), Cow::Borrowed(_)));
    }

    #[test]
    fn newlines_are_counted() {
        assert_eq!(count_newlines("a\nb\n\nc"), 3);
        assert_eq!(count_newlines(""), 0);
    }
}
