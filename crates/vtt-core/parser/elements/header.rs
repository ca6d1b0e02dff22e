//! Header parser for the `WEBVTT` signature block
//!
//! The header is the only place a document can fail to parse. It is the
//! signature line with optional free text, followed by `key: value` metadata
//! lines up to the first blank line.

use core::fmt;

use crate::{
    parser::{
        ast::{Header, HeaderMetadata},
        errors::{IssueCategory, ParseError, ParseIssue},
    },
    tokenizer::{Scanner, BLOCK_SEPARATOR},
    utils::{
        entities::{encode, EntityCodec},
        utf8::count_newlines,
    },
};

/// Signature every document starts with
pub const SIGNATURE: &str = "WEBVTT";

/// Parsed header and the body that follows it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderParse<'a> {
    /// Signature text and metadata
    pub header: Header,
    /// Remaining source after the header, including the separating newlines
    pub body: &'a str,
    /// Line number `body` starts on
    pub body_line: usize,
}

/// Parse the header at the start of a normalized document
///
/// # Errors
///
/// Returns [`ParseError::MissingSignature`] when the source does not start
/// with `WEBVTT`, [`ParseError::InvalidSignature`] when the signature is
/// followed by anything but a space or a line break, and
/// [`ParseError::UnterminatedHeader`] when the lines after the signature run
/// to the end of the input and are not all `key: value` metadata.
pub fn parse_header<'a>(
    mut scanner: Scanner<'a>,
    codec: &EntityCodec,
    issues: &mut Vec<ParseIssue>,
) -> Result<HeaderParse<'a>, ParseError> {
    let signature_line = scanner.line();
    if !scanner.eat(SIGNATURE) {
        return Err(ParseError::MissingSignature {
            line: signature_line,
        });
    }

    let text = match scanner.peek() {
        None | Some('\n') => None,
        Some(' ') => {
            scanner.skip_horizontal_whitespace();
            Some(codec.decode(scanner.take_line()).into_owned()).filter(|text| !text.is_empty())
        }
        Some(found) => {
            return Err(ParseError::InvalidSignature {
                found,
                line: signature_line,
            })
        }
    };

    let rest = scanner.rest();
    if rest.is_empty() {
        return Ok(HeaderParse {
            header: Header::new(text, Vec::new()),
            body: rest,
            body_line: scanner.line(),
        });
    }

    let end = match rest.find(BLOCK_SEPARATOR) {
        Some(end) => end,
        None if is_metadata_only(rest) => rest.len(),
        None => {
            return Err(ParseError::UnterminatedHeader {
                line: signature_line,
            })
        }
    };

    let block = &rest[..end];
    let metadata = parse_metadata(block, scanner.line(), issues);

    Ok(HeaderParse {
        header: Header::new(text, metadata),
        body: &rest[end..],
        body_line: scanner.line() + count_newlines(block),
    })
}

/// Metadata lines of the header block
///
/// `block` starts with the line break ending the signature line, so line `n`
/// of the split sits `n` lines below `signature_line`.
fn parse_metadata(
    block: &str,
    signature_line: usize,
    issues: &mut Vec<ParseIssue>,
) -> Vec<HeaderMetadata> {
    let mut metadata = Vec::new();
    for (offset, line) in block.split('\n').enumerate().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            issues.push(ParseIssue::info(
                IssueCategory::Header,
                "Whitespace-only header line ignored".to_string(),
                signature_line + offset,
            ));
            continue;
        }
        match metadata_entry(line) {
            Some(entry) => metadata.push(entry),
            None => {
                log::debug!("Dropping header line {line:?}");
                issues.push(ParseIssue::warning(
                    IssueCategory::Header,
                    format!("Header line '{line}' is not a 'key: value' pair and was dropped"),
                    signature_line + offset,
                ));
            }
        }
    }
    metadata
}

/// Header lines reaching the end of input that hold nothing but metadata
fn is_metadata_only(block: &str) -> bool {
    block
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .all(|line| metadata_entry(line).is_some())
}

/// Exactly two non-empty parts around `:`
fn metadata_entry(line: &str) -> Option<HeaderMetadata> {
    let mut parts = line.split(':').map(str::trim).filter(|part| !part.is_empty());
    match (parts.next(), parts.next(), parts.next()) {
        (Some(key), Some(value), None) => Some(HeaderMetadata::new(key, value)),
        _ => None,
    }
}

impl fmt::Display for HeaderMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.value)
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(SIGNATURE)?;
        if let Some(text) = self.text.as_deref().filter(|text| !text.is_empty()) {
            write!(f, " {}", encode(text))?;
        }
        self.metadata
            .iter()
            .try_for_each(|entry| write!(f, "\n{entry}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::errors::IssueSeverity;

    fn header(source: &str) -> Result<(HeaderParse<'_>, Vec<ParseIssue>), ParseError> {
        let mut issues = Vec::new();
        let parsed = parse_header(Scanner::new(source), &EntityCodec::default(), &mut issues)?;
        Ok((parsed, issues))
    }

    #[test]
    fn bare_signature() {
        let (parsed, issues) = header("WEBVTT").unwrap();
        assert_eq!(parsed.header, Header::default());
        assert!(parsed.body.is_empty());
        assert!(issues.is_empty());
    }

    #[test]
    fn signature_text_is_decoded() {
        let (parsed, _) = header("WEBVTT   Tom &amp; Jerry\n\nNOTE x").unwrap();
        assert_eq!(parsed.header.text.as_deref(), Some("Tom & Jerry"));
        assert_eq!(parsed.body, "\n\nNOTE x");
        assert_eq!(parsed.body_line, 1);
    }

    #[test]
    fn spaces_without_text_mean_no_text() {
        let (parsed, _) = header("WEBVTT   ").unwrap();
        assert_eq!(parsed.header.text, None);
    }

    #[test]
    fn metadata_lines() {
        let (parsed, issues) =
            header("WEBVTT\nKind: captions\n  Language :en  \nbogus\na:b:c\n\nbody").unwrap();
        assert_eq!(
            parsed.header.metadata,
            vec![
                HeaderMetadata::new("Kind", "captions"),
                HeaderMetadata::new("Language", "en"),
            ]
        );
        assert_eq!(parsed.body_line, 5);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].line, 4);
        assert_eq!(issues[1].line, 5);
        assert_eq!(issues[0].category, IssueCategory::Header);
    }

    #[test]
    fn signature_failures() {
        assert_eq!(
            header("WEBVTT\tfoo").unwrap_err(),
            ParseError::InvalidSignature {
                found: '\t',
                line: 1
            }
        );
        assert_eq!(
            header("WEBVTTX").unwrap_err(),
            ParseError::InvalidSignature {
                found: 'X',
                line: 1
            }
        );
        assert_eq!(
            header("00:01.000 --> 00:02.000").unwrap_err(),
            ParseError::MissingSignature { line: 1 }
        );
        assert_eq!(
            header("WEBVTT\n00:01.000 --> 00:02.000\nHi").unwrap_err(),
            ParseError::UnterminatedHeader { line: 1 }
        );
        assert_eq!(
            header("WEBVTT\nKind: captions\n00:01.000 --> 00:02.000").unwrap_err(),
            ParseError::UnterminatedHeader { line: 1 }
        );
    }

    #[test]
    fn whitespace_only_lines_are_reported_as_info() {
        let (parsed, issues) =
            header("WEBVTT\nKind: captions\n  \t\nLanguage: en\n\nbody").unwrap();
        assert_eq!(parsed.header.metadata.len(), 2);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, IssueSeverity::Info);
        assert_eq!(issues[0].line, 3);
    }

    #[test]
    fn metadata_reaching_end_of_input() {
        let (parsed, issues) = header("WEBVTT\nKind: captions\nLanguage: en").unwrap();
        assert_eq!(
            parsed.header.metadata,
            vec![
                HeaderMetadata::new("Kind", "captions"),
                HeaderMetadata::new("Language", "en"),
            ]
        );
        assert!(parsed.body.is_empty());
        assert_eq!(parsed.body_line, 3);
        assert!(issues.is_empty());
    }

    #[test]
    fn printing() {
        let header = Header::new(
            Some("a<b".to_string()),
            vec![HeaderMetadata::new("Kind", "captions")],
        );
        assert_eq!(header.to_string(), "WEBVTT a&lt;b\nKind: captions");
        let empty_text = Header::new(Some(String::new()), vec![]);
        assert_eq!(empty_text.text, None);
        assert_eq!(empty_text.to_string(), "WEBVTT");
    }
}
