//! Cue time values
//!
//! A [`Time`] keeps the four fields exactly as written so that printing a
//! parsed value reproduces it. Conversions to and from durations go through
//! the total millisecond count.

use core::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Milliseconds per second
const MS_PER_SECOND: u64 = 1_000;
/// Milliseconds per minute
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
/// Milliseconds per hour
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;

/// Point in time within a media timeline
///
/// Fields are not range checked: `00:75.000` parses as 75 seconds and prints
/// back unchanged.
///
/// # Example
///
/// ```rust
/// use vtt_core::Time;
///
/// let time = Time::new(1, 2, 3, 4);
/// assert_eq!(time.to_string(), "01:02:03.004");
/// assert_eq!(time.total_milliseconds(), 3_723_004);
/// assert_eq!(Time::from_seconds(3723.004), time);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Time {
    /// Hours, omitted from printed form when zero
    pub hours: u32,
    /// Minutes
    pub minutes: u32,
    /// Seconds
    pub seconds: u32,
    /// Milliseconds, always printed with three digits
    pub milliseconds: u32,
}

impl Time {
    /// Create time from its fields
    #[must_use]
    pub const fn new(hours: u32, minutes: u32, seconds: u32, milliseconds: u32) -> Self {
        Self {
            hours,
            minutes,
            seconds,
            milliseconds,
        }
    }

    /// Create canonical time from a millisecond count
    ///
    /// Hours saturate at `u32::MAX` for counts beyond what a cue can express.
    #[must_use]
    pub fn from_milliseconds(total: u64) -> Self {
        let field = |value: u64| u32::try_from(value).unwrap_or(u32::MAX);
        Self {
            hours: field(total / MS_PER_HOUR),
            minutes: field(total % MS_PER_HOUR / MS_PER_MINUTE),
            seconds: field(total % MS_PER_MINUTE / MS_PER_SECOND),
            milliseconds: field(total % MS_PER_SECOND),
        }
    }

    /// Create canonical time from fractional seconds, rounded to the nearest millisecond
    ///
    /// Negative and non-finite inputs clamp to zero.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_seconds(seconds: f64) -> Self {
        let milliseconds = (seconds * 1000.0).round();
        if milliseconds.is_finite() && milliseconds > 0.0 {
            Self::from_milliseconds(milliseconds as u64)
        } else {
            Self::default()
        }
    }

    /// Total milliseconds represented by all four fields
    #[must_use]
    pub const fn total_milliseconds(&self) -> u64 {
        self.hours as u64 * MS_PER_HOUR
            + self.minutes as u64 * MS_PER_MINUTE
            + self.seconds as u64 * MS_PER_SECOND
            + self.milliseconds as u64
    }

    /// Fractional seconds
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_seconds(&self) -> f64 {
        self.total_milliseconds() as f64 / 1000.0
    }

    /// Convert to a standard duration
    #[must_use]
    pub const fn to_duration(&self) -> Duration {
        Duration::from_millis(self.total_milliseconds())
    }
}

impl From<Duration> for Time {
    fn from(duration: Duration) -> Self {
        Self::from_milliseconds(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }
}

impl From<Time> for Duration {
    fn from(time: Time) -> Self {
        time.to_duration()
    }
}

/// Start and end of a cue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Timing {
    /// Cue start
    pub start: Time,
    /// Cue end
    pub end: Time,
}

impl Timing {
    /// Create timing from start and end
    #[must_use]
    pub const fn new(start: Time, end: Time) -> Self {
        Self { start, end }
    }

    /// Create timing from fractional second offsets
    #[must_use]
    pub fn from_seconds(start: f64, end: f64) -> Self {
        Self::new(Time::from_seconds(start), Time::from_seconds(end))
    }

    /// Time between start and end, zero when the cue ends before it starts
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.end.to_duration().saturating_sub(self.start.to_duration())
    }
}
