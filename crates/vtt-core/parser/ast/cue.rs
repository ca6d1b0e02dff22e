//! Cue AST nodes
//!
//! A cue is its metadata block (identifier, timing, settings) followed by the
//! payload markup tree.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{payload::CuePayload, time::Timing};
use crate::utils::hashers::dedup_preserving_order;

/// Timed text cue
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cue {
    /// Identifier, timing and settings
    pub metadata: CueMetadata,
    /// Cue text as a component tree
    pub payload: CuePayload,
}

impl Cue {
    /// Create cue from metadata and payload
    #[must_use]
    pub const fn new(metadata: CueMetadata, payload: CuePayload) -> Self {
        Self { metadata, payload }
    }

    /// Payload text with all markup removed
    ///
    /// # Example
    ///
    /// ```rust
    /// use vtt_core::{Cue, CueMetadata, CuePayload, Timing};
    ///
    /// let payload = CuePayload::parse("<v Esme>It's <b>you</b>!");
    /// let cue = Cue::new(CueMetadata::new(None, Timing::default(), []), payload);
    /// assert_eq!(cue.text(), "It's you!");
    /// ```
    #[must_use]
    pub fn text(&self) -> String {
        self.payload.text()
    }
}

/// Cue metadata block
///
/// Settings are deduplicated on construction, keeping the first occurrence of
/// each distinct value. Distinct values of the same kind are all kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CueMetadata {
    /// Optional cue identifier line
    identifier: Option<String>,
    /// Start and end times
    timing: Timing,
    /// Positioning and region settings in written order
    settings: Vec<Setting>,
}

impl CueMetadata {
    /// Create metadata, dropping repeated settings
    #[must_use]
    pub fn new<S>(identifier: Option<String>, timing: Timing, settings: S) -> Self
    where
        S: IntoIterator<Item = Setting>,
    {
        Self {
            identifier,
            timing,
            settings: dedup_preserving_order(settings.into_iter().collect()),
        }
    }

    /// Cue identifier
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    /// Cue timing
    #[must_use]
    pub const fn timing(&self) -> &Timing {
        &self.timing
    }

    /// Cue settings
    #[must_use]
    pub fn settings(&self) -> &[Setting] {
        &self.settings
    }
}

/// Cue setting token
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Setting {
    /// `vertical:lr|rl`
    Vertical(Direction),
    /// `line:N`
    LineNumber(i64),
    /// `line:N%`
    LinePercentage(i64),
    /// `position:N%`
    Position(i64),
    /// `size:N%`
    Size(i64),
    /// `align:...`
    Align(Alignment),
    /// `region:id`
    Region(String),
}

impl Setting {
    /// Setting name as written before the separator
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Vertical(_) => "vertical",
            Self::LineNumber(_) | Self::LinePercentage(_) => "line",
            Self::Position(_) => "position",
            Self::Size(_) => "size",
            Self::Align(_) => "align",
            Self::Region(_) => "region",
        }
    }
}

/// Vertical text direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Left to right
    Lr,
    /// Right to left
    Rl,
}

impl Direction {
    /// All directions in grammar order
    pub const ALL: [Self; 2] = [Self::Lr, Self::Rl];

    /// Keyword used in cue settings
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lr => "lr",
            Self::Rl => "rl",
        }
    }
}

/// Cue text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Alignment {
    /// `start`
    Start,
    /// `left`
    Left,
    /// `center`
    Center,
    /// `middle`
    Middle,
    /// `end`
    End,
    /// `right`
    Right,
}

impl Alignment {
    /// All alignments in grammar order
    pub const ALL: [Self; 6] = [
        Self::Start,
        Self::Left,
        Self::Center,
        Self::Middle,
        Self::End,
        Self::Right,
    ];

    /// Keyword used in cue settings
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Left => "left",
            Self::Center => "center",
            Self::Middle => "middle",
            Self::End => "end",
            Self::Right => "right",
        }
    }
}
