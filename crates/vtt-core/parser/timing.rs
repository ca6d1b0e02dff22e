//! Time and timing line grammar
//!
//! Times are `H+:MM:SS.mmm` or `MM:SS.mmm`, each group one or more ASCII
//! digits, with optional horizontal whitespace around them. A timing line is
//! `start --> end`.
//!
//! Printing zero-pads every field, omits the hours group when it is zero and
//! always writes three millisecond digits.

use core::{fmt, str::FromStr};

use super::ast::{Time, Timing};
use crate::{
    tokenizer::Scanner,
    utils::errors::{CoreError, Result},
};

/// Separator between start and end times
pub const TIMING_ARROW: &str = "-->";

/// Parse a time at the cursor, consuming surrounding horizontal whitespace
pub fn parse_time(scanner: &mut Scanner<'_>) -> Option<Time> {
    scanner.attempt(|scanner| {
        let time = scan_time(scanner)?;
        scanner.skip_horizontal_whitespace();
        Some(time)
    })
}

/// Parse `start --> end` at the cursor
///
/// Whitespace after the end time is left for the settings grammar.
pub fn parse_timing(scanner: &mut Scanner<'_>) -> Option<Timing> {
    scanner.attempt(|scanner| {
        let start = scan_time(scanner)?;
        scanner.skip_horizontal_whitespace();
        if !scanner.eat(TIMING_ARROW) {
            return None;
        }
        let end = scan_time(scanner)?;
        Some(Timing::new(start, end))
    })
}

/// Leading whitespace, then the colon separated groups
fn scan_time(scanner: &mut Scanner<'_>) -> Option<Time> {
    scanner.skip_horizontal_whitespace();
    let first = scan_group(scanner)?;
    if !scanner.eat(":") {
        return None;
    }
    let second = scan_group(scanner)?;
    let third = if scanner.eat(":") {
        Some(scan_group(scanner)?)
    } else {
        None
    };
    if !scanner.eat(".") {
        return None;
    }
    let milliseconds = scan_group(scanner)?;

    Some(match third {
        Some(seconds) => Time::new(first, second, seconds, milliseconds),
        None => Time::new(0, first, second, milliseconds),
    })
}

/// One digit group; overflowing values fail the grammar
fn scan_group(scanner: &mut Scanner<'_>) -> Option<u32> {
    scanner.take_digits().parse().ok()
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hours != 0 {
            write!(f, "{:02}:", self.hours)?;
        }
        write!(
            f,
            "{:02}:{:02}.{:03}",
            self.minutes, self.seconds, self.milliseconds
        )
    }
}

impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {TIMING_ARROW} {}", self.start, self.end)
    }
}

impl FromStr for Time {
    type Err = CoreError;

    fn from_str(text: &str) -> Result<Self> {
        let mut scanner = Scanner::new(text);
        match parse_time(&mut scanner) {
            Some(time) if scanner.is_at_end() => Ok(time),
            Some(_) => Err(CoreError::invalid_time(text, "unexpected trailing text")),
            None => Err(CoreError::invalid_time(
                text,
                "expected [hh:]mm:ss.ttt with ASCII digits",
            )),
        }
    }
}

impl FromStr for Timing {
    type Err = CoreError;

    fn from_str(text: &str) -> Result<Self> {
        let mut scanner = Scanner::new(text);
        let timing = parse_timing(&mut scanner)
            .ok_or_else(|| CoreError::invalid_time(text, "expected 'start --> end'"))?;
        scanner.skip_horizontal_whitespace();
        if scanner.is_at_end() {
            Ok(timing)
        } else {
            Err(CoreError::invalid_time(text, "unexpected trailing text"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_forms() {
        assert_eq!("01:02.003".parse::<Time>(), Ok(Time::new(0, 1, 2, 3)));
        assert_eq!("1:02:03.004".parse::<Time>(), Ok(Time::new(1, 2, 3, 4)));
        assert_eq!("0:00.500".parse::<Time>(), Ok(Time::new(0, 0, 0, 500)));
        assert_eq!(" \t00:01.000\u{b}".parse::<Time>(), Ok(Time::new(0, 0, 1, 0)));
    }

    #[test]
    fn rejects_malformed_times() {
        for text in [
            "", "00:01", "00.01.000", "00:01,000", "a0:01.000", "00:01.", ":01.000",
            "00:00:00:00.000", "00:01.000x", "00:01.-1", "4294967296:00.000",
        ] {
            assert!(text.parse::<Time>().is_err(), "{text:?} should not parse");
        }
    }

    #[test]
    fn prints_hours_only_when_non_zero() {
        assert_eq!(Time::new(0, 0, 1, 0).to_string(), "00:01.000");
        assert_eq!(Time::new(1, 2, 3, 4).to_string(), "01:02:03.004");
        assert_eq!(Time::new(123, 0, 0, 0).to_string(), "123:00:00.000");
        assert_eq!(Time::new(0, 0, 75, 5).to_string(), "00:75.005");
    }

    #[test]
    fn timing_round_trip() {
        let timing = Timing::new(Time::new(0, 0, 1, 0), Time::new(0, 0, 2, 0));
        assert_eq!(timing.to_string(), "00:01.000 --> 00:02.000");
        assert_eq!(timing.to_string().parse::<Timing>(), Ok(timing));
    }

    #[test]
    fn timing_tolerates_missing_spaces() {
        let timing: Timing = "00:00.000-->00:01.000".parse().unwrap();
        assert_eq!(timing.end, Time::new(0, 0, 1, 0));
    }

    #[test]
    fn timing_rejects_wrong_arrows() {
        for text in ["00:00.000 -> 00:01.000", "00:00.000 --- 00:01.000", "00:00.000 00:01.000"] {
            assert!(text.parse::<Timing>().is_err(), "{text:?} should not parse");
        }
    }

    #[test]
    fn parse_timing_leaves_trailing_whitespace() {
        let mut scanner = Scanner::new("00:00.000 --> 00:01.000  align:start");
        assert!(parse_timing(&mut scanner).is_some());
        assert_eq!(scanner.rest(), "  align:start");
    }
}
