//! Cue and region setting grammars
//!
//! A setting is `name(:|=)value` with optional horizontal whitespace around the
//! separator. Sub-grammars are tried in a fixed priority order and the first
//! one that matches wins, so `line:50%` is a percentage and `line:50` a line
//! number. Printing always uses `:`.
//!
//! Cue settings follow the timing on the same line, separated by whitespace or
//! commas. Region settings fill the rest of a `REGION` block, separated by
//! whitespace or single line breaks.

use core::{fmt, str::FromStr};

use super::ast::{Alignment, Direction, RegionAnchor, RegionScroll, RegionSetting, Setting};
use crate::{
    tokenizer::{is_horizontal_whitespace, Scanner},
    utils::{
        entities::{encode, EntityCodec},
        errors::{CoreError, Result},
    },
};

/// Grammar for a single cue setting
type SettingGrammar = fn(&mut Scanner<'_>, &EntityCodec) -> Option<Setting>;

/// Grammar for a single region setting
type RegionSettingGrammar = fn(&mut Scanner<'_>, &EntityCodec) -> Option<RegionSetting>;

/// Cue setting grammars in priority order
const CUE_SETTINGS: [SettingGrammar; 7] = [
    vertical,
    align,
    position,
    size,
    line_percentage,
    line_number,
    region,
];

/// Region setting grammars in priority order
const REGION_SETTINGS: [RegionSettingGrammar; 6] = [
    region_id,
    region_lines,
    region_width,
    region_scroll,
    region_anchor,
    viewport_anchor,
];

/// Parse one cue setting at the cursor
pub fn parse_setting(scanner: &mut Scanner<'_>, codec: &EntityCodec) -> Option<Setting> {
    CUE_SETTINGS
        .iter()
        .find_map(|grammar| scanner.attempt(|scanner| grammar(scanner, codec)))
}

/// Parse the settings that follow a timing, up to the end of the line
///
/// At least one whitespace character must separate the end time from the
/// first setting. Returns `None` if any token on the line is not a setting;
/// the line break itself is not consumed.
pub fn parse_settings_line(scanner: &mut Scanner<'_>, codec: &EntityCodec) -> Option<Vec<Setting>> {
    scanner.attempt(|scanner| {
        let mut settings = Vec::new();
        loop {
            let separated = !scanner
                .take_while(|ch| is_horizontal_whitespace(ch) || ch == ',')
                .is_empty();
            if scanner.is_at_line_end() {
                return Some(settings);
            }
            if !separated {
                return None;
            }
            settings.push(parse_setting(scanner, codec)?);
        }
    })
}

/// Parse one region setting at the cursor
pub fn parse_region_setting(
    scanner: &mut Scanner<'_>,
    codec: &EntityCodec,
) -> Option<RegionSetting> {
    REGION_SETTINGS
        .iter()
        .find_map(|grammar| scanner.attempt(|scanner| grammar(scanner, codec)))
}

/// Parse region settings up to the end of input
///
/// The first setting must be preceded by whitespace or a line break, which
/// lets the caller hand over the cursor right after the `REGION` keyword.
pub fn parse_region_settings(
    scanner: &mut Scanner<'_>,
    codec: &EntityCodec,
) -> Option<Vec<RegionSetting>> {
    scanner.attempt(|scanner| {
        let mut settings = Vec::new();
        loop {
            let mut separated = scanner.skip_horizontal_whitespace() > 0;
            if scanner.eat("\n") {
                separated = true;
                scanner.skip_horizontal_whitespace();
            }
            if scanner.is_at_end() {
                return Some(settings);
            }
            if !separated {
                return None;
            }
            settings.push(parse_region_setting(scanner, codec)?);
        }
    })
}

/// Setting name and `:`/`=` separator with optional surrounding whitespace
fn key(scanner: &mut Scanner<'_>, name: &str) -> Option<()> {
    if !scanner.eat(name) {
        return None;
    }
    scanner.skip_horizontal_whitespace();
    if !(scanner.eat(":") || scanner.eat("=")) {
        return None;
    }
    scanner.skip_horizontal_whitespace();
    Some(())
}

/// Keyword from a fixed set, matched as a whole alphabetic word
fn keyword<T: Copy>(scanner: &mut Scanner<'_>, values: &[T], as_str: fn(T) -> &'static str) -> Option<T> {
    let word = scanner.take_while(|ch| ch.is_ascii_alphabetic());
    values.iter().copied().find(|value| as_str(*value) == word)
}

/// Integer immediately followed by `%`
fn percentage(scanner: &mut Scanner<'_>) -> Option<i64> {
    let value = scanner.take_integer()?;
    scanner.eat("%").then_some(value)
}

/// Identifier value running to the next whitespace, entity-decoded
fn identifier(scanner: &mut Scanner<'_>, codec: &EntityCodec) -> String {
    codec
        .decode(scanner.take_while(|ch| !ch.is_whitespace()))
        .into_owned()
}

/// `X%,Y%` with optional horizontal whitespace around each part
fn anchor(scanner: &mut Scanner<'_>) -> Option<RegionAnchor> {
    let x = scanner.take_integer()?;
    scanner.skip_horizontal_whitespace();
    scanner.eat("%").then_some(())?;
    scanner.skip_horizontal_whitespace();
    scanner.eat(",").then_some(())?;
    scanner.skip_horizontal_whitespace();
    let y = scanner.take_integer()?;
    scanner.skip_horizontal_whitespace();
    scanner.eat("%").then_some(RegionAnchor::new(x, y))
}

fn vertical(scanner: &mut Scanner<'_>, _: &EntityCodec) -> Option<Setting> {
    key(scanner, "vertical")?;
    keyword(scanner, &Direction::ALL, Direction::as_str).map(Setting::Vertical)
}

fn align(scanner: &mut Scanner<'_>, _: &EntityCodec) -> Option<Setting> {
    key(scanner, "align")?;
    keyword(scanner, &Alignment::ALL, Alignment::as_str).map(Setting::Align)
}

fn position(scanner: &mut Scanner<'_>, _: &EntityCodec) -> Option<Setting> {
    key(scanner, "position")?;
    percentage(scanner).map(Setting::Position)
}

fn size(scanner: &mut Scanner<'_>, _: &EntityCodec) -> Option<Setting> {
    key(scanner, "size")?;
    percentage(scanner).map(Setting::Size)
}

fn line_percentage(scanner: &mut Scanner<'_>, _: &EntityCodec) -> Option<Setting> {
    key(scanner, "line")?;
    percentage(scanner).map(Setting::LinePercentage)
}

fn line_number(scanner: &mut Scanner<'_>, _: &EntityCodec) -> Option<Setting> {
    key(scanner, "line")?;
    scanner.take_integer().map(Setting::LineNumber)
}

fn region(scanner: &mut Scanner<'_>, codec: &EntityCodec) -> Option<Setting> {
    key(scanner, "region")?;
    Some(Setting::Region(identifier(scanner, codec)))
}

fn region_id(scanner: &mut Scanner<'_>, codec: &EntityCodec) -> Option<RegionSetting> {
    key(scanner, "id")?;
    Some(RegionSetting::Id(identifier(scanner, codec)))
}

fn region_lines(scanner: &mut Scanner<'_>, _: &EntityCodec) -> Option<RegionSetting> {
    key(scanner, "lines")?;
    scanner.take_integer().map(RegionSetting::Lines)
}

fn region_width(scanner: &mut Scanner<'_>, _: &EntityCodec) -> Option<RegionSetting> {
    key(scanner, "width")?;
    percentage(scanner).map(RegionSetting::WidthPercentage)
}

fn region_scroll(scanner: &mut Scanner<'_>, _: &EntityCodec) -> Option<RegionSetting> {
    key(scanner, "scroll")?;
    keyword(scanner, &RegionScroll::ALL, RegionScroll::as_str).map(RegionSetting::Scroll)
}

fn region_anchor(scanner: &mut Scanner<'_>, _: &EntityCodec) -> Option<RegionSetting> {
    key(scanner, "regionanchor")?;
    anchor(scanner).map(RegionSetting::Anchor)
}

fn viewport_anchor(scanner: &mut Scanner<'_>, _: &EntityCodec) -> Option<RegionSetting> {
    key(scanner, "viewportanchor")?;
    anchor(scanner).map(RegionSetting::ViewportAnchor)
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for RegionScroll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for RegionAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%,{}%", self.x, self.y)
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name();
        match self {
            Self::Vertical(direction) => write!(f, "{name}:{direction}"),
            Self::LineNumber(value) => write!(f, "{name}:{value}"),
            Self::LinePercentage(value) | Self::Position(value) | Self::Size(value) => {
                write!(f, "{name}:{value}%")
            }
            Self::Align(alignment) => write!(f, "{name}:{alignment}"),
            Self::Region(id) => write!(f, "{name}:{}", encode(id)),
        }
    }
}

impl fmt::Display for RegionSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id:{}", encode(id)),
            Self::Lines(lines) => write!(f, "lines:{lines}"),
            Self::WidthPercentage(width) => write!(f, "width:{width}%"),
            Self::Scroll(scroll) => write!(f, "scroll:{scroll}"),
            Self::Anchor(anchor) => write!(f, "regionanchor:{anchor}"),
            Self::ViewportAnchor(anchor) => write!(f, "viewportanchor:{anchor}"),
        }
    }
}

impl FromStr for Setting {
    type Err = CoreError;

    fn from_str(text: &str) -> Result<Self> {
        let mut scanner = Scanner::new(text);
        match parse_setting(&mut scanner, &EntityCodec::default()) {
            Some(setting) if scanner.is_at_end() => Ok(setting),
            Some(_) => Err(CoreError::invalid_setting(text, "unexpected trailing text")),
            None => Err(CoreError::invalid_setting(text, "not a cue setting")),
        }
    }
}

impl FromStr for RegionSetting {
    type Err = CoreError;

    fn from_str(text: &str) -> Result<Self> {
        let mut scanner = Scanner::new(text);
        match parse_region_setting(&mut scanner, &EntityCodec::default()) {
            Some(setting) if scanner.is_at_end() => Ok(setting),
            Some(_) => Err(CoreError::invalid_setting(text, "unexpected trailing text")),
            None => Err(CoreError::invalid_setting(text, "not a region setting")),
        }
    }
}
