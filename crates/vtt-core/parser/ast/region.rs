//! Region definition AST nodes

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::utils::hashers::dedup_preserving_order;

/// `REGION` definition block
///
/// Settings are deduplicated on construction, keeping the first occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Region {
    /// Region settings in written order
    settings: Vec<RegionSetting>,
}

impl Region {
    /// Create region, dropping repeated settings
    #[must_use]
    pub fn new<S>(settings: S) -> Self
    where
        S: IntoIterator<Item = RegionSetting>,
    {
        Self {
            settings: dedup_preserving_order(settings.into_iter().collect()),
        }
    }

    /// Region settings
    #[must_use]
    pub fn settings(&self) -> &[RegionSetting] {
        &self.settings
    }

    /// First `id` setting, the name cues refer to with `region:`
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.settings.iter().find_map(|setting| match setting {
            RegionSetting::Id(id) => Some(id.as_str()),
            _ => None,
        })
    }
}

/// Region setting token
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RegionSetting {
    /// `id:name`
    Id(String),
    /// `lines:N`
    Lines(i64),
    /// `width:N%`
    WidthPercentage(i64),
    /// `scroll:...`
    Scroll(RegionScroll),
    /// `regionanchor:X%,Y%`
    Anchor(RegionAnchor),
    /// `viewportanchor:X%,Y%`
    ViewportAnchor(RegionAnchor),
}

/// Anchor point in percent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegionAnchor {
    /// Horizontal percentage
    pub x: i64,
    /// Vertical percentage
    pub y: i64,
}

impl RegionAnchor {
    /// Create anchor from percentages
    #[must_use]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Region scroll direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RegionScroll {
    /// `up`
    Up,
    /// `down`
    Down,
    /// `left`
    Left,
    /// `right`
    Right,
}

impl RegionScroll {
    /// All scroll directions in grammar order
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Keyword used in region settings
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}
