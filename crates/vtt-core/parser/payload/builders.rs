//! Tag recognizers for cue payload markup
//!
//! Each builder looks for the leftmost occurrence of one kind of tag in a
//! text slice. Matching is case-insensitive and spans line breaks. Styled tags
//! and the voice tag are regular expressions; the timestamp tag needs a
//! look-ahead and the generic tag a back-reference, so both are scanned by
//! hand.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    parser::{
        ast::{Component, Time},
        timing::parse_time,
    },
    tokenizer::Scanner,
};

/// Finds the leftmost tag of one kind
pub type Builder = for<'a> fn(&'a str) -> Option<TagMatch<'a>>;

/// Builders in priority order; on equal start positions the earlier one wins
pub const BUILDERS: [Builder; 10] = [
    bold,
    italic,
    underline,
    ruby,
    ruby_text,
    class,
    voice,
    timestamp,
    language,
    generic,
];

/// Tag found in a text slice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMatch<'a> {
    /// Byte offset of the opening `<`
    pub start: usize,
    /// Byte offset just past the closing tag, or where the tag's text stops
    pub end: usize,
    /// Tag kind and attributes
    pub tag: Tag<'a>,
    /// Raw text between the opening and closing tags
    pub inner: &'a str,
}

/// Tag kind with the attributes read from the opening tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag<'a> {
    Bold(Vec<String>),
    Italic(Vec<String>),
    Underline(Vec<String>),
    Ruby(Vec<String>),
    RubyText(Vec<String>),
    Class(Option<&'a str>),
    Voice { classes: Vec<String>, name: &'a str },
    Timestamp(Time),
    Language { classes: Vec<String>, locale: &'a str },
}

impl Tag<'_> {
    /// Build the component for this tag around already parsed children
    #[must_use]
    pub fn into_component(self, children: Vec<Component>) -> Component {
        match self {
            Self::Bold(classes) => Component::bold(classes, children),
            Self::Italic(classes) => Component::italic(classes, children),
            Self::Underline(classes) => Component::underline(classes, children),
            Self::Ruby(classes) => Component::ruby(classes, children),
            Self::RubyText(classes) => Component::ruby_text(classes, children),
            Self::Class(name) => Component::class(name.map(str::to_owned), children),
            Self::Voice { classes, name } => Component::voice(classes, name, children),
            Self::Timestamp(time) => Component::timestamp(time, children),
            Self::Language { classes, locale } => Component::language(classes, locale, children),
        }
    }
}

/// Leftmost tag in `text` over all builders
#[must_use]
pub fn find_first(text: &str) -> Option<TagMatch<'_>> {
    BUILDERS
        .iter()
        .filter_map(|builder| builder(text))
        .min_by_key(|found| found.start)
}

/// `<name.classes annotation>text</name>`
fn styled_pattern(name: &str) -> Regex {
    Regex::new(&format!(r"(?is)<{name}(?:\.(.*?))??(?: .*?)??>(.*?)</{name}>"))
        .expect("styled tag pattern should compile")
}

static BOLD: Lazy<Regex> = Lazy::new(|| styled_pattern("b"));
static ITALIC: Lazy<Regex> = Lazy::new(|| styled_pattern("i"));
static UNDERLINE: Lazy<Regex> = Lazy::new(|| styled_pattern("u"));
static RUBY: Lazy<Regex> = Lazy::new(|| styled_pattern("ruby"));
static RUBY_TEXT: Lazy<Regex> = Lazy::new(|| styled_pattern("rt"));
static CLASS: Lazy<Regex> = Lazy::new(|| styled_pattern("c"));

static VOICE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<v(?:\.(.*?))?? (.*?)>(.*?)(?:</v>|\z)").expect("voice pattern should compile")
});

static LANGUAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<lang(?:\.(.*?))?? (.*?)>(.*?)</lang>")
        .expect("language pattern should compile")
});

static TIME_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<([0-9]+:[0-9]+(?::[0-9]+)?\.[0-9]+)>").expect("time tag pattern should compile")
});

/// Dot separated class list
fn split_classes(classes: &str) -> Vec<String> {
    classes.split('.').map(str::to_owned).collect()
}

/// Shared shape of the six styled tags
fn styled<'a>(
    regex: &Regex,
    text: &'a str,
    tag: fn(Vec<String>) -> Tag<'a>,
) -> Option<TagMatch<'a>> {
    let captures = regex.captures(text)?;
    let whole = captures.get(0)?;
    let classes = captures
        .get(1)
        .map(|classes| split_classes(classes.as_str()))
        .unwrap_or_default();
    Some(TagMatch {
        start: whole.start(),
        end: whole.end(),
        tag: tag(classes),
        inner: captures.get(2)?.as_str(),
    })
}

fn bold(text: &str) -> Option<TagMatch<'_>> {
    styled(&BOLD, text, Tag::Bold)
}

fn italic(text: &str) -> Option<TagMatch<'_>> {
    styled(&ITALIC, text, Tag::Italic)
}

fn underline(text: &str) -> Option<TagMatch<'_>> {
    styled(&UNDERLINE, text, Tag::Underline)
}

fn ruby(text: &str) -> Option<TagMatch<'_>> {
    styled(&RUBY, text, Tag::Ruby)
}

fn ruby_text(text: &str) -> Option<TagMatch<'_>> {
    styled(&RUBY_TEXT, text, Tag::RubyText)
}

/// `<c.name>` keeps the whole dot suffix as a single name
fn class(text: &str) -> Option<TagMatch<'_>> {
    let captures = CLASS.captures(text)?;
    let whole = captures.get(0)?;
    Some(TagMatch {
        start: whole.start(),
        end: whole.end(),
        tag: Tag::Class(captures.get(1).map(|name| name.as_str())),
        inner: captures.get(2)?.as_str(),
    })
}

/// The voice closing tag may be omitted
fn voice(text: &str) -> Option<TagMatch<'_>> {
    let captures = VOICE.captures(text)?;
    let whole = captures.get(0)?;
    let classes = captures
        .get(1)
        .map(|classes| split_classes(classes.as_str()))
        .unwrap_or_default();
    Some(TagMatch {
        start: whole.start(),
        end: whole.end(),
        tag: Tag::Voice {
            classes,
            name: captures.get(2)?.as_str(),
        },
        inner: captures.get(3)?.as_str(),
    })
}

fn language(text: &str) -> Option<TagMatch<'_>> {
    let captures = LANGUAGE.captures(text)?;
    let whole = captures.get(0)?;
    let classes = captures
        .get(1)
        .map(|classes| split_classes(classes.as_str()))
        .unwrap_or_default();
    Some(TagMatch {
        start: whole.start(),
        end: whole.end(),
        tag: Tag::Language {
            classes,
            locale: captures.get(2)?.as_str(),
        },
        inner: captures.get(3)?.as_str(),
    })
}

/// `<time>` with text up to the next time tag or the end of the slice
///
/// Time tags whose value does not parse are skipped, but still end the text
/// of an earlier timestamp.
fn timestamp(text: &str) -> Option<TagMatch<'_>> {
    TIME_TAG.captures_iter(text).find_map(|captures| {
        let whole = captures.get(0)?;
        let time = tag_time(captures.get(1)?.as_str())?;
        let end = TIME_TAG
            .find_at(text, whole.end())
            .map_or(text.len(), |next| next.start());
        Some(TagMatch {
            start: whole.start(),
            end,
            tag: Tag::Timestamp(time),
            inner: &text[whole.end()..end],
        })
    })
}

fn tag_time(value: &str) -> Option<Time> {
    let mut scanner = Scanner::new(value);
    parse_time(&mut scanner).filter(|_| scanner.is_at_end())
}

/// `<name>text</name>` for any name, closing tag compared case-insensitively
///
/// Candidates are tried in the order a lazy back-tracking matcher would: the
/// leftmost `<`, then the shortest name, then the shortest text. A longer
/// name can only close where the shortest one already does, so each `<`
/// needs a single lookup among the closing tags after it.
fn generic(text: &str) -> Option<TagMatch<'_>> {
    let closings = closing_tags(text);
    if closings.is_empty() {
        return None;
    }
    for (open, _) in text.match_indices('<') {
        let name_start = open + 1;
        let name_len = text[name_start..].find('>')?;
        let name = &text[name_start..name_start + name_len];
        let inner_start = name_start + name_len + 1;

        let after = closings.partition_point(|&(closing, _)| closing < inner_start);
        if let Some(&(closing, _)) = closings[after..]
            .iter()
            .find(|(_, closing_name)| closing_name.eq_ignore_ascii_case(name))
        {
            return Some(TagMatch {
                start: open,
                end: closing + name_len + 3,
                tag: Tag::Class(Some(name)),
                inner: &text[inner_start..closing],
            });
        }
    }
    None
}

/// Every `</name>` in `text` with the offset of its `<`, in order
fn closing_tags(text: &str) -> Vec<(usize, &str)> {
    text.match_indices("</")
        .filter_map(|(closing, _)| {
            let name_start = closing + 2;
            let name_len = text[name_start..].find('>')?;
            Some((closing, &text[name_start..name_start + name_len]))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn styled_tags_read_classes_and_skip_annotation() {
        let found = bold("x <b.loud.red ignored>hi</b> y").unwrap();
        assert_eq!(found.start, 2);
        assert_eq!(found.inner, "hi");
        assert_eq!(
            found.tag,
            Tag::Bold(vec!["loud".to_string(), "red".to_string()])
        );
        assert_eq!(&"x <b.loud.red ignored>hi</b> y"[found.end..], " y");
    }

    #[test]
    fn styled_tags_are_case_insensitive() {
        let found = italic("<I>x</i>").unwrap();
        assert_eq!(found.tag, Tag::Italic(vec![]));
        assert_eq!(found.inner, "x");
    }

    #[test]
    fn longer_tag_names_do_not_match_short_ones() {
        assert!(bold("<br>x</b>").is_none());
        assert!(ruby_text("<ruby>x</ruby>").is_none());
    }

    #[test]
    fn class_keeps_whole_suffix() {
        let found = class("<c.a.b>x</c>").unwrap();
        assert_eq!(found.tag, Tag::Class(Some("a.b")));
        assert_eq!(class("<c>x</c>").unwrap().tag, Tag::Class(None));
    }

    #[test]
    fn voice_runs_to_end_without_close() {
        let text = "<v.loud Roger Bingham>We are in New York";
        let found = voice(text).unwrap();
        assert_eq!(
            found.tag,
            Tag::Voice {
                classes: vec!["loud".to_string()],
                name: "Roger Bingham"
            }
        );
        assert_eq!(found.inner, "We are in New York");
        assert_eq!(found.end, text.len());
    }

    #[test]
    fn language_needs_locale() {
        let found = language("<lang en-US>hi</lang>").unwrap();
        assert_eq!(
            found.tag,
            Tag::Language {
                classes: vec![],
                locale: "en-US"
            }
        );
        assert!(language("<lang>hi</lang>").is_none());
    }

    #[test]
    fn timestamp_text_stops_at_next_time_tag() {
        let text = "a<00:01.000>b<00:02.000>c";
        let found = timestamp(text).unwrap();
        assert_eq!(found.start, 1);
        assert_eq!(found.inner, "b");
        assert_eq!(found.tag, Tag::Timestamp(Time::new(0, 0, 1, 0)));
        assert_eq!(&text[found.end..], "<00:02.000>c");
    }

    #[test]
    fn unparseable_time_tag_is_skipped() {
        let text = "<99999999999:00.000>a<01:00:02.500>b";
        let found = timestamp(text).unwrap();
        assert_eq!(found.tag, Tag::Timestamp(Time::new(1, 0, 2, 500)));
        assert_eq!(found.inner, "b");
    }

    #[test]
    fn generic_tag_uses_back_reference() {
        let found = generic("<span>x</SPAN>").unwrap();
        assert_eq!(found.tag, Tag::Class(Some("span")));
        assert_eq!(found.inner, "x");
        assert!(generic("<span>x</div>").is_none());
    }

    #[test]
    fn generic_tag_prefers_shortest_name_then_shortest_text() {
        let found = generic("a <x>1</X> 2</x>").unwrap();
        assert_eq!(found.start, 2);
        assert_eq!(found.inner, "1");
        assert_eq!(found.end, 10);

        let found = generic("<>x</>").unwrap();
        assert_eq!(found.tag, Tag::Class(Some("")));
        assert_eq!(found.inner, "x");

        let found = generic("<a>b</c> <d>e</d>").unwrap();
        assert_eq!(found.start, 9);
        assert_eq!(found.inner, "e");
    }

    #[test]
    fn generic_tag_without_match_stays_fast() {
        let started = std::time::Instant::now();
        assert!(generic(&"</>".repeat(4000)).is_none());
        assert!(generic(&format!("{}{}", "<x>".repeat(2000), "</y>".repeat(2000))).is_none());
        assert!(started.elapsed() < std::time::Duration::from_secs(2));
    }

    #[test]
    fn earliest_start_wins_and_ties_go_to_builder_order() {
        let found = find_first("<i>a</i><b>c</b>").unwrap();
        assert_eq!(found.tag, Tag::Italic(vec![]));

        let found = find_first("<b>x</b>").unwrap();
        assert_eq!(found.tag, Tag::Bold(vec![]));
    }

    #[test]
    fn plain_text_has_no_tags() {
        assert!(find_first("just text & more").is_none());
        assert!(find_first("a < b > c").is_none());
    }
}
