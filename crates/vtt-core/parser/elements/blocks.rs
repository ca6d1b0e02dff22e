//! Keyword blocks: `NOTE`, `STYLE` and `REGION`

use core::fmt;

use crate::{
    parser::{
        ast::{Note, Region, Style},
        settings::parse_region_settings,
    },
    tokenizer::{is_horizontal_whitespace, Block},
    utils::entities::{encode, EntityCodec},
};

/// Comment block keyword
pub const NOTE: &str = "NOTE";

/// Style sheet block keyword
pub const STYLE: &str = "STYLE";

/// Region block keyword
pub const REGION: &str = "REGION";

/// Older region keyword still accepted on parse
pub const LEGACY_REGION: &str = "Region:";

/// `NOTE` followed by spaces or line breaks, then the comment text
pub fn parse_note(block: Block<'_>, codec: &EntityCodec) -> Option<Note> {
    let rest = block.text.strip_prefix(NOTE)?;
    let text = if rest.is_empty() {
        rest
    } else if rest.starts_with(is_horizontal_whitespace) {
        rest.trim_start_matches(is_horizontal_whitespace)
    } else if rest.starts_with('\n') {
        rest.trim_start_matches('\n')
    } else {
        return None;
    };
    Some(Note::new(codec.decode(text)))
}

/// `STYLE`, a line break, then the style sheet
pub fn parse_style(block: Block<'_>, codec: &EntityCodec) -> Option<Style> {
    let rest = block.text.strip_prefix(STYLE)?;
    if !(rest.is_empty() || rest.starts_with('\n')) {
        return None;
    }
    Some(Style::new(codec.decode(rest.trim_start_matches('\n'))))
}

/// Check whether the block opens with a region keyword
#[must_use]
pub fn is_region_block(block: Block<'_>) -> bool {
    block.text.starts_with(REGION) || block.text.starts_with(LEGACY_REGION)
}

/// `REGION` or `Region:` followed by region settings filling the block
pub fn parse_region(block: Block<'_>, codec: &EntityCodec) -> Option<Region> {
    let mut scanner = block.scanner();
    if !(scanner.eat(REGION) || scanner.eat(LEGACY_REGION)) {
        return None;
    }
    parse_region_settings(&mut scanner, codec).map(Region::new)
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(NOTE)?;
        if self.text.is_empty() {
            return Ok(());
        }
        write!(f, "\n{}", encode(&self.text))
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(STYLE)?;
        if self.text.is_empty() {
            return Ok(());
        }
        write!(f, "\n{}", encode(&self.text))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REGION)?;
        self.settings()
            .iter()
            .try_for_each(|setting| write!(f, "\n{setting}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::{RegionAnchor, RegionSetting};

    fn block(text: &str) -> Block<'_> {
        Block { text, line: 1 }
    }

    #[test]
    fn notes() {
        let codec = EntityCodec::default();
        assert_eq!(parse_note(block("NOTE"), &codec), Some(Note::new("")));
        assert_eq!(parse_note(block("NOTE  a &lt; b"), &codec), Some(Note::new("a < b")));
        assert_eq!(parse_note(block("NOTE\n  indented"), &codec), Some(Note::new("  indented")));
        assert_eq!(parse_note(block("NOTES"), &codec), None);
        assert_eq!(parse_note(block("note x"), &codec), None);
    }

    #[test]
    fn styles_need_a_line_break() {
        let codec = EntityCodec::default();
        assert_eq!(
            parse_style(block("STYLE\n::cue { color: red }"), &codec),
            Some(Style::new("::cue { color: red }"))
        );
        assert_eq!(parse_style(block("STYLE"), &codec), Some(Style::new("")));
        assert_eq!(parse_style(block("STYLE ::cue {}"), &codec), None);
    }

    #[test]
    fn regions_accept_both_keywords() {
        let codec = EntityCodec::default();
        let expected = Region::new([
            RegionSetting::Id("fred".to_string()),
            RegionSetting::Anchor(RegionAnchor::new(0, 100)),
        ]);
        assert_eq!(
            parse_region(block("REGION\nid:fred\nregionanchor:0%,100%"), &codec),
            Some(expected.clone())
        );
        assert_eq!(
            parse_region(block("Region: id=fred regionanchor=0%,100%"), &codec),
            Some(expected)
        );
        assert_eq!(parse_region(block("REGION"), &codec), Some(Region::default()));
        assert_eq!(parse_region(block("REGION\nid:x\nnonsense"), &codec), None);
        assert!(is_region_block(block("REGION\nnonsense")));
    }

    #[test]
    fn printing() {
        assert_eq!(Note::new("a & b").to_string(), "NOTE\na &amp; b");
        assert_eq!(Note::new("").to_string(), "NOTE");
        assert_eq!(Style::new("::cue {}").to_string(), "STYLE\n::cue {}");
        assert_eq!(
            Region::new([RegionSetting::Id("r".to_string()), RegionSetting::Lines(3)]).to_string(),
            "REGION\nid:r\nlines:3"
        );
    }
}
