//! Cue payload component tree
//!
//! Payload text is a tree of [`Component`]s: plain text leaves and markup
//! nodes that exclusively own their children.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::time::Time;

/// Parsed cue text
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CuePayload {
    /// Top-level components in text order
    pub components: Vec<Component>,
}

impl CuePayload {
    /// Create payload from components
    #[must_use]
    pub const fn new(components: Vec<Component>) -> Self {
        Self { components }
    }

    /// Check if the payload has no components
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Text content with all markup removed
    #[must_use]
    pub fn text(&self) -> String {
        let mut text = String::new();
        for component in &self.components {
            component.collect_text(&mut text);
        }
        text
    }
}

impl From<Vec<Component>> for CuePayload {
    fn from(components: Vec<Component>) -> Self {
        Self::new(components)
    }
}

/// Node of a cue payload tree
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Component {
    /// Decoded text
    Plain(String),
    /// `<b>`
    Bold {
        /// Class names from the dot suffix
        classes: Vec<String>,
        /// Nested components
        children: Vec<Component>,
    },
    /// `<i>`
    Italic {
        /// Class names from the dot suffix
        classes: Vec<String>,
        /// Nested components
        children: Vec<Component>,
    },
    /// `<u>`
    Underline {
        /// Class names from the dot suffix
        classes: Vec<String>,
        /// Nested components
        children: Vec<Component>,
    },
    /// `<ruby>`
    Ruby {
        /// Class names from the dot suffix
        classes: Vec<String>,
        /// Nested components
        children: Vec<Component>,
    },
    /// `<rt>`
    RubyText {
        /// Class names from the dot suffix
        classes: Vec<String>,
        /// Nested components
        children: Vec<Component>,
    },
    /// `<c>` or any other tag closed by the same name
    Class {
        /// Class name, `None` for a bare `<c>`
        name: Option<String>,
        /// Nested components
        children: Vec<Component>,
    },
    /// `<v name>`, which may be left unclosed
    Voice {
        /// Class names from the dot suffix
        classes: Vec<String>,
        /// Speaker name
        name: String,
        /// Nested components
        children: Vec<Component>,
    },
    /// `<mm:ss.ttt>`, owning everything up to the next timestamp
    Timestamp {
        /// Time the following text becomes active
        time: Time,
        /// Nested components
        children: Vec<Component>,
    },
    /// `<lang locale>`
    Language {
        /// Class names from the dot suffix
        classes: Vec<String>,
        /// BCP 47 language tag
        locale: String,
        /// Nested components
        children: Vec<Component>,
    },
}

impl Component {
    /// Plain text leaf
    pub fn plain(text: impl Into<String>) -> Self {
        Self::Plain(text.into())
    }

    /// Bold node
    #[must_use]
    pub const fn bold(classes: Vec<String>, children: Vec<Self>) -> Self {
        Self::Bold { classes, children }
    }

    /// Italic node
    #[must_use]
    pub const fn italic(classes: Vec<String>, children: Vec<Self>) -> Self {
        Self::Italic { classes, children }
    }

    /// Underline node
    #[must_use]
    pub const fn underline(classes: Vec<String>, children: Vec<Self>) -> Self {
        Self::Underline { classes, children }
    }

    /// Ruby container node
    #[must_use]
    pub const fn ruby(classes: Vec<String>, children: Vec<Self>) -> Self {
        Self::Ruby { classes, children }
    }

    /// Ruby text node
    #[must_use]
    pub const fn ruby_text(classes: Vec<String>, children: Vec<Self>) -> Self {
        Self::RubyText { classes, children }
    }

    /// Class span node
    #[must_use]
    pub const fn class(name: Option<String>, children: Vec<Self>) -> Self {
        Self::Class { name, children }
    }

    /// Voice span node
    pub fn voice(classes: Vec<String>, name: impl Into<String>, children: Vec<Self>) -> Self {
        Self::Voice {
            classes,
            name: name.into(),
            children,
        }
    }

    /// Timestamp node
    #[must_use]
    pub const fn timestamp(time: Time, children: Vec<Self>) -> Self {
        Self::Timestamp { time, children }
    }

    /// Language span node
    pub fn language(classes: Vec<String>, locale: impl Into<String>, children: Vec<Self>) -> Self {
        Self::Language {
            classes,
            locale: locale.into(),
            children,
        }
    }

    /// Tag name used when printing, `None` for plain text and timestamps
    #[must_use]
    pub const fn tag_name(&self) -> Option<&'static str> {
        match self {
            Self::Plain(_) | Self::Timestamp { .. } => None,
            Self::Bold { .. } => Some("b"),
            Self::Italic { .. } => Some("i"),
            Self::Underline { .. } => Some("u"),
            Self::Ruby { .. } => Some("ruby"),
            Self::RubyText { .. } => Some("rt"),
            Self::Class { .. } => Some("c"),
            Self::Voice { .. } => Some("v"),
            Self::Language { .. } => Some("lang"),
        }
    }

    /// Nested components, empty for plain text
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Plain(_) => &[],
            Self::Bold { children, .. }
            | Self::Italic { children, .. }
            | Self::Underline { children, .. }
            | Self::Ruby { children, .. }
            | Self::RubyText { children, .. }
            | Self::Class { children, .. }
            | Self::Voice { children, .. }
            | Self::Timestamp { children, .. }
            | Self::Language { children, .. } => children,
        }
    }

    /// Class names attached to the tag
    #[must_use]
    pub fn classes(&self) -> &[String] {
        match self {
            Self::Bold { classes, .. }
            | Self::Italic { classes, .. }
            | Self::Underline { classes, .. }
            | Self::Ruby { classes, .. }
            | Self::RubyText { classes, .. }
            | Self::Voice { classes, .. }
            | Self::Language { classes, .. } => classes,
            Self::Plain(_) | Self::Class { .. } | Self::Timestamp { .. } => &[],
        }
    }

    /// Text content with all markup removed
    #[must_use]
    pub fn text(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    /// Append text content of this subtree to `out`
    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Plain(text) => out.push_str(text),
            _ => {
                for child in self.children() {
                    child.collect_text(out);
                }
            }
        }
    }
}
