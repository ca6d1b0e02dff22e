//! Character reference codec for cue text
//!
//! Decoding resolves named (`&amp;`), decimal (`&#169;`) and hexadecimal
//! (`&#x3E9;`) references. A span that does not resolve passes through
//! unchanged, so decoding never fails.
//!
//! Encoding only escapes the six characters that are unsafe in WebVTT text.
//! Other printable characters are never turned into named references.
//!
//! # Example
//!
//! ```rust
//! use vtt_core::utils::entities::{decode, encode};
//!
//! assert_eq!(decode("Tom &amp; Jerry &#169;"), "Tom & Jerry \u{a9}");
//! assert_eq!(decode("&bogus; &amp"), "&bogus; &amp");
//! assert_eq!(encode("a < b"), "a &lt; b");
//! ```

use std::{borrow::Cow, collections::HashMap, fmt, sync::Arc};

use ahash::RandomState;

use crate::utils::hashers::create_hash_map;

#[cfg(feature = "serde")]
use crate::utils::errors::{CoreError, Result};

/// Named references that always decode, regardless of the configured table
///
/// These are also the only references produced by [`encode`].
pub const REQUIRED_ENTITIES: [(&str, &str); 6] = [
    ("amp", "&"),
    ("nbsp", "\u{00A0}"),
    ("lrm", "\u{200E}"),
    ("rlm", "\u{200F}"),
    ("lt", "<"),
    ("gt", ">"),
];

/// Mapping from entity name to decoded text
///
/// The default table resolves every HTML5 named reference when the
/// `html5-entities` feature is enabled, and only [`REQUIRED_ENTITIES`]
/// otherwise. Custom tables can be supplied as data.
#[derive(Clone, Default)]
pub struct EntityTable {
    /// Where named lookups beyond the required set are answered
    source: TableSource,
}

/// Backing store for named lookups
#[derive(Clone, Default)]
enum TableSource {
    /// Required references only
    #[cfg_attr(not(feature = "html5-entities"), default)]
    Minimal,
    /// Full HTML5 named reference list
    #[cfg(feature = "html5-entities")]
    #[default]
    Html5,
    /// Caller supplied names, stored without `&` and `;`
    Custom(Arc<HashMap<String, String, RandomState>>),
}

impl EntityTable {
    /// Table containing only the required references
    #[must_use]
    pub const fn minimal() -> Self {
        Self {
            source: TableSource::Minimal,
        }
    }

    /// Table containing every HTML5 named reference
    #[cfg(feature = "html5-entities")]
    #[cfg_attr(docsrs, doc(cfg(feature = "html5-entities")))]
    #[must_use]
    pub const fn html5() -> Self {
        Self {
            source: TableSource::Html5,
        }
    }

    /// Build a table from `(name, text)` pairs
    ///
    /// Names may be written bare (`hellip`) or as full tokens (`&hellip;`).
    ///
    /// # Example
    ///
    /// ```rust
    /// use vtt_core::utils::entities::{EntityCodec, EntityTable};
    ///
    /// let table = EntityTable::from_map([("&hellip;", "\u{2026}")]);
    /// let codec = EntityCodec::new(table);
    /// assert_eq!(codec.decode("wait&hellip;"), "wait\u{2026}");
    /// ```
    pub fn from_map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut names = create_hash_map();
        for (name, text) in entries {
            names.insert(bare_name(name.as_ref()).to_string(), text.into());
        }
        Self {
            source: TableSource::Custom(Arc::new(names)),
        }
    }

    /// Load a table from a JSON object mapping entity tokens to text
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidEntityTable`] if the input is not a JSON
    /// object of strings.
    #[cfg(feature = "serde")]
    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: HashMap<String, String> = serde_json::from_str(json)
            .map_err(|err| CoreError::InvalidEntityTable(err.to_string()))?;
        Ok(Self::from_map(entries))
    }

    /// Resolve an entity name (without `&` and `;`)
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&str> {
        if let Some((_, text)) = REQUIRED_ENTITIES
            .iter()
            .find(|(required, _)| *required == name)
        {
            return Some(*text);
        }
        match &self.source {
            TableSource::Minimal => None,
            #[cfg(feature = "html5-entities")]
            TableSource::Html5 => quick_xml::escape::resolve_html5_entity(name),
            TableSource::Custom(names) => names.get(name).map(String::as_str),
        }
    }
}

impl fmt::Debug for EntityTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            TableSource::Minimal => f.write_str("EntityTable::Minimal"),
            #[cfg(feature = "html5-entities")]
            TableSource::Html5 => f.write_str("EntityTable::Html5"),
            TableSource::Custom(names) => write!(f, "EntityTable::Custom({} names)", names.len()),
        }
    }
}

/// Strip the `&` and `;` delimiters from an entity token
fn bare_name(token: &str) -> &str {
    let token = token.strip_prefix('&').unwrap_or(token);
    token.strip_suffix(';').unwrap_or(token)
}

/// Decoder/encoder pair bound to an entity table
#[derive(Debug, Clone, Default)]
pub struct EntityCodec {
    /// Named reference lookup
    table: EntityTable,
}

impl EntityCodec {
    /// Create codec using the given table
    #[must_use]
    pub const fn new(table: EntityTable) -> Self {
        Self { table }
    }

    /// Table used for named references
    #[must_use]
    pub const fn table(&self) -> &EntityTable {
        &self.table
    }

    /// Decode every resolvable reference in `text`
    ///
    /// A reference runs from `&` to the next `;`. A span that does not
    /// resolve is kept literally, including any `&` inside it.
    #[must_use]
    pub fn decode<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if !text.contains('&') {
            return Cow::Borrowed(text);
        }

        let mut decoded = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(amp) = rest.find('&') {
            decoded.push_str(&rest[..amp]);
            let candidate = &rest[amp..];
            match candidate[1..].find(';') {
                Some(offset) => {
                    let token = &candidate[..offset + 2];
                    self.push_reference(token, &mut decoded);
                    rest = &candidate[offset + 2..];
                }
                None => {
                    decoded.push_str(candidate);
                    rest = "";
                }
            }
        }
        decoded.push_str(rest);

        Cow::Owned(decoded)
    }

    /// Escape the required characters in `text`
    #[must_use]
    pub fn encode(text: &str) -> Cow<'_, str> {
        encode(text)
    }

    /// Append the decoded form of a complete `&...;` token
    fn push_reference(&self, token: &str, out: &mut String) {
        let body = &token[1..token.len() - 1];
        match body.strip_prefix('#') {
            Some(number) => match decode_numeric(number) {
                Some(ch) => out.push(ch),
                None => out.push_str(token),
            },
            None => out.push_str(self.table.resolve(body).unwrap_or(token)),
        }
    }
}

/// Resolve the digits of a numeric reference to a character
fn decode_numeric(number: &str) -> Option<char> {
    let (digits, radix) = number
        .strip_prefix(|ch: char| ch == 'x' || ch == 'X')
        .map_or((number, 10), |hex| (hex, 16));
    if digits.is_empty() || !digits.chars().all(|ch| ch.is_digit(radix)) {
        return None;
    }
    u32::from_str_radix(digits, radix)
        .ok()
        .and_then(char::from_u32)
}

/// Reference emitted for a character that must be escaped
const fn escape_for(ch: char) -> Option<&'static str> {
    match ch {
        '&' => Some("&amp;"),
        '\u{00A0}' => Some("&nbsp;"),
        '\u{200E}' => Some("&lrm;"),
        '\u{200F}' => Some("&rlm;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        _ => None,
    }
}

/// Decode references using the default table
#[must_use]
pub fn decode(text: &str) -> Cow<'_, str> {
    EntityCodec::default().decode(text)
}

/// Escape `&`, `<`, `>`, U+00A0, U+200E and U+200F
#[must_use]
pub fn encode(text: &str) -> Cow<'_, str> {
    if !text.chars().any(|ch| escape_for(ch).is_some()) {
        return Cow::Borrowed(text);
    }

    let mut encoded = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match escape_for(ch) {
            Some(reference) => encoded.push_str(reference),
            None => encoded.push(ch),
        }
    }
    encoded.into()
}
