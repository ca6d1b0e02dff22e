//! Cue payload markup parser and printer
//!
//! The parser repeatedly takes the leftmost tag any builder finds in the
//! remaining text. Text before it becomes a plain component, the tag's inner
//! text is parsed recursively into its children, and scanning resumes after
//! the tag. Text that contains no tag at all becomes a single plain
//! component, entity-decoded.
//!
//! # Example
//!
//! ```rust
//! use vtt_core::{Component, CuePayload};
//!
//! let payload = CuePayload::parse("<b>Hi</b> &amp; bye");
//! assert_eq!(
//!     payload.components,
//!     vec![
//!         Component::bold(vec![], vec![Component::plain("Hi")]),
//!         Component::plain(" & bye"),
//!     ]
//! );
//! assert_eq!(payload.to_string(), "<b>Hi</b> &amp; bye");
//! ```

pub mod builders;

use core::{convert::Infallible, fmt, str::FromStr};

use super::{
    ast::{Component, CuePayload},
    DEFAULT_MAX_NESTING_DEPTH,
};
use crate::utils::entities::{encode, EntityCodec};

/// Result of parsing a payload with nesting tracking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadParse {
    /// Parsed component tree
    pub payload: CuePayload,
    /// Markup below the nesting limit was kept as plain text
    pub depth_exceeded: bool,
}

/// Payload parser bound to an entity codec and nesting limit
#[derive(Debug, Clone, Copy)]
pub struct PayloadParser<'c> {
    /// Decoder for plain text
    codec: &'c EntityCodec,
    /// Number of tag levels parsed as markup, `None` for no limit
    max_depth: Option<usize>,
}

impl<'c> PayloadParser<'c> {
    /// Create parser with the given codec and nesting limit
    #[must_use]
    pub const fn new(codec: &'c EntityCodec, max_depth: Option<usize>) -> Self {
        Self { codec, max_depth }
    }

    /// Parse payload text into a component tree
    #[must_use]
    pub fn parse(&self, text: &str) -> CuePayload {
        self.parse_tracked(text).payload
    }

    /// Parse payload text, reporting whether the nesting limit was hit
    #[must_use]
    pub fn parse_tracked(&self, text: &str) -> PayloadParse {
        let mut depth_exceeded = false;
        let components = self.components(text, 0, &mut depth_exceeded);
        PayloadParse {
            payload: CuePayload::new(components),
            depth_exceeded,
        }
    }

    /// Sibling components of `text`, which sits `depth` tags deep
    fn components(&self, text: &str, depth: usize, depth_exceeded: &mut bool) -> Vec<Component> {
        let mut components = Vec::new();
        let mut rest = text;

        while !rest.is_empty() {
            let Some(found) = builders::find_first(rest) else {
                components.push(self.plain(rest));
                break;
            };
            if found.start > 0 {
                components.push(self.plain(&rest[..found.start]));
            }

            let children = if self.max_depth.is_some_and(|max| depth + 1 >= max) {
                if builders::find_first(found.inner).is_some() {
                    log::warn!("Cue markup nested deeper than {} tags kept as text", depth + 1);
                    *depth_exceeded = true;
                }
                self.leaf(found.inner)
            } else {
                self.components(found.inner, depth + 1, depth_exceeded)
            };
            components.push(found.tag.into_component(children));
            rest = &rest[found.end..];
        }

        components
    }

    /// Inner text as an unparsed plain child
    fn leaf(&self, text: &str) -> Vec<Component> {
        if text.is_empty() {
            Vec::new()
        } else {
            vec![self.plain(text)]
        }
    }

    fn plain(&self, text: &str) -> Component {
        Component::Plain(self.codec.decode(text).into_owned())
    }
}

impl CuePayload {
    /// Parse payload text with the default entity table and nesting limit
    #[must_use]
    pub fn parse(text: &str) -> Self {
        PayloadParser::new(&EntityCodec::default(), Some(DEFAULT_MAX_NESTING_DEPTH)).parse(text)
    }
}

impl FromStr for CuePayload {
    type Err = Infallible;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(text))
    }
}

/// Write `.class` for each class
fn write_classes(f: &mut fmt::Formatter<'_>, classes: &[String]) -> fmt::Result {
    classes.iter().try_for_each(|class| write!(f, ".{class}"))
}

fn write_children(f: &mut fmt::Formatter<'_>, children: &[Component]) -> fmt::Result {
    children.iter().try_for_each(|child| write!(f, "{child}"))
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(text) => f.write_str(&encode(text)),
            Self::Timestamp { time, children } => {
                write!(f, "<{time}>")?;
                write_children(f, children)
            }
            Self::Class { name, children } => {
                f.write_str("<c")?;
                if let Some(name) = name {
                    write!(f, ".{name}")?;
                }
                f.write_str(">")?;
                write_children(f, children)?;
                f.write_str("</c>")
            }
            Self::Voice {
                classes,
                name: annotation,
                children,
            }
            | Self::Language {
                classes,
                locale: annotation,
                children,
            } => {
                let tag = self.tag_name().unwrap_or_default();
                write!(f, "<{tag}")?;
                write_classes(f, classes)?;
                write!(f, " {annotation}>")?;
                write_children(f, children)?;
                write!(f, "</{tag}>")
            }
            Self::Bold { classes, children }
            | Self::Italic { classes, children }
            | Self::Underline { classes, children }
            | Self::Ruby { classes, children }
            | Self::RubyText { classes, children } => {
                let tag = self.tag_name().unwrap_or_default();
                write!(f, "<{tag}")?;
                write_classes(f, classes)?;
                f.write_str(">")?;
                write_children(f, children)?;
                write!(f, "</{tag}>")
            }
        }
    }
}

impl fmt::Display for CuePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_children(f, &self.components)
    }
}
