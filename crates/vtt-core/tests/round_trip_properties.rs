//! Property-based round-trip tests
//!
//! Builds documents the printer can express exactly and checks that printing
//! and parsing them again gives back the same tree.

use proptest::prelude::*;
use vtt_core::{
    parse, print, Alignment, Component, Cue, CueMetadata, CuePayload, Direction, Document,
    Element, Header, HeaderMetadata, Note, Region, RegionAnchor, RegionScroll, RegionSetting,
    Setting, Style, Time, Timing,
};

/// Plain text that starts and ends with a letter or digit
fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9]",
        "[a-zA-Z0-9][a-zA-Z0-9 &<>.,!?]{0,20}[a-zA-Z0-9]",
    ]
}

fn arb_time() -> impl Strategy<Value = Time> {
    (0u64..20_000_000).prop_map(Time::from_milliseconds)
}

fn arb_setting() -> impl Strategy<Value = Setting> {
    prop_oneof![
        prop::sample::select(vec![Direction::Rl, Direction::Lr]).prop_map(Setting::Vertical),
        (-50i64..50).prop_map(Setting::LineNumber),
        (0i64..=100).prop_map(Setting::LinePercentage),
        (0i64..=100).prop_map(Setting::Position),
        (0i64..=100).prop_map(Setting::Size),
        prop::sample::select(vec![
            Alignment::Start,
            Alignment::Center,
            Alignment::Middle,
            Alignment::End,
            Alignment::Left,
            Alignment::Right,
        ])
        .prop_map(Setting::Align),
        "[a-z][a-z0-9]{0,6}".prop_map(Setting::Region),
    ]
}

/// Tag kind and every attribute a tag of that kind may carry
type TagShape = (usize, Vec<String>, Option<String>, String, String);

/// Number of tag kinds `make_tag` can build, timestamps excluded
const TAG_KINDS: usize = 8;

fn arb_shape() -> impl Strategy<Value = TagShape> {
    (
        0..TAG_KINDS,
        prop::collection::vec("[a-z][a-z0-9]{0,3}", 0..3),
        prop::option::of("[a-z]{1,4}(\\.[a-z]{1,4})?"),
        "[A-Z][a-z]{0,5}( [A-Z][a-z]{0,5})?",
        "[a-z]{2}(-[A-Z]{2})?",
    )
}

fn make_tag(shape: TagShape, children: Vec<Component>) -> Component {
    let (kind, classes, class_name, voice, locale) = shape;
    match kind % TAG_KINDS {
        0 => Component::bold(classes, children),
        1 => Component::italic(classes, children),
        2 => Component::underline(classes, children),
        3 => Component::ruby(classes, children),
        4 => Component::ruby_text(classes, children),
        5 => Component::class(class_name, children),
        6 => Component::voice(classes, voice, children),
        _ => Component::language(classes, locale, children),
    }
}

fn leaf_tag(shape: TagShape, text: Option<String>) -> Component {
    make_tag(shape, text.map(Component::plain).into_iter().collect())
}

fn arb_leaf() -> impl Strategy<Value = (TagShape, Option<String>)> {
    (arb_shape(), prop::option::of(arb_text()))
}

/// A tag holding plain text, or one holding tags of other kinds
///
/// A tag never contains another tag of its own kind, since the first closing
/// tag of that kind would end the outer one.
fn arb_tagged() -> impl Strategy<Value = Component> {
    prop_oneof![
        arb_leaf().prop_map(|(shape, text)| leaf_tag(shape, text)),
        (
            arb_shape(),
            prop::option::of(arb_text()),
            prop::collection::vec((arb_leaf(), prop::option::of(arb_text())), 1..3),
        )
            .prop_map(|(shape, lead, inner)| {
                let outer = shape.0 % TAG_KINDS;
                let mut children: Vec<Component> = lead.map(Component::plain).into_iter().collect();
                for ((mut leaf_shape, text), after) in inner {
                    if leaf_shape.0 % TAG_KINDS == outer {
                        leaf_shape.0 = outer + 1;
                    }
                    children.push(leaf_tag(leaf_shape, text));
                    children.extend(after.map(Component::plain));
                }
                make_tag(shape, children)
            }),
    ]
}

/// Siblings alternating between tags and plain runs, never two plain runs in a row
fn arb_siblings() -> impl Strategy<Value = Vec<Component>> {
    (
        prop::option::of(arb_text()),
        prop::collection::vec((arb_tagged(), prop::option::of(arb_text())), 0..3),
    )
        .prop_map(|(lead, tagged)| {
            let mut components: Vec<Component> = lead.map(Component::plain).into_iter().collect();
            for (tag, after) in tagged {
                components.push(tag);
                components.extend(after.map(Component::plain));
            }
            components
        })
}

/// Timestamp text runs to the end of its slice, so it only closes a payload
fn arb_payload() -> impl Strategy<Value = CuePayload> {
    (
        arb_siblings(),
        prop::option::of((arb_time(), arb_siblings())),
    )
        .prop_map(|(mut components, timestamp)| {
            components.extend(
                timestamp.map(|(time, children)| Component::timestamp(time, children)),
            );
            CuePayload::new(components)
        })
}

fn arb_cue() -> impl Strategy<Value = Element> {
    (
        prop::option::of("[a-z][a-z0-9]{0,8}"),
        arb_time(),
        arb_time(),
        prop::collection::vec(arb_setting(), 0..4),
        arb_payload(),
    )
        .prop_map(|(identifier, start, end, settings, payload)| {
            Element::Cue(Cue::new(
                CueMetadata::new(identifier, Timing::new(start, end), settings),
                payload,
            ))
        })
}

fn arb_anchor() -> impl Strategy<Value = RegionAnchor> {
    (0i64..=100, 0i64..=100).prop_map(|(x, y)| RegionAnchor::new(x, y))
}

fn arb_region_setting() -> impl Strategy<Value = RegionSetting> {
    prop_oneof![
        "[a-z][a-z0-9]{0,6}".prop_map(RegionSetting::Id),
        (0i64..20).prop_map(RegionSetting::Lines),
        (0i64..=100).prop_map(RegionSetting::WidthPercentage),
        prop::sample::select(RegionScroll::ALL.to_vec()).prop_map(RegionSetting::Scroll),
        arb_anchor().prop_map(RegionSetting::Anchor),
        arb_anchor().prop_map(RegionSetting::ViewportAnchor),
    ]
}

fn arb_element() -> impl Strategy<Value = Element> {
    prop_oneof![
        4 => arb_cue(),
        1 => arb_text().prop_map(|text| Element::Note(Note::new(text))),
        1 => arb_text().prop_map(|text| Element::Style(Style::new(text))),
        1 => prop::collection::vec(arb_region_setting(), 0..5)
            .prop_map(|settings| Element::Region(Region::new(settings))),
    ]
}

fn arb_header() -> impl Strategy<Value = Header> {
    (
        prop::option::of(arb_text()),
        prop::collection::vec(
            (
                "[A-Z][a-zA-Z]{0,7}",
                "[a-z0-9]([a-z0-9 -]{0,8}[a-z0-9])?",
            ),
            0..3,
        ),
    )
        .prop_map(|(text, metadata)| {
            Header::new(
                text,
                metadata
                    .into_iter()
                    .map(|(key, value)| HeaderMetadata::new(key, value))
                    .collect(),
            )
        })
}

fn arb_document() -> impl Strategy<Value = Document> {
    (arb_header(), prop::collection::vec(arb_element(), 0..8))
        .prop_map(|(header, elements)| Document::new(header, elements))
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn test_print_then_parse_is_identity(document in arb_document()) {
            let printed = print(&document);
            let reparsed = parse(&printed).unwrap();
            prop_assert_eq!(reparsed, document);
        }

        #[test]
        fn test_printing_is_stable(document in arb_document()) {
            let printed = print(&document);
            let reprinted = print(&parse(&printed).unwrap());
            prop_assert_eq!(reprinted, printed);
        }

        #[test]
        fn test_payload_markup_round_trips(payload in arb_payload()) {
            prop_assert_eq!(CuePayload::parse(&payload.to_string()), payload);
        }

        #[test]
        fn test_timing_lines_round_trip(start in arb_time(), end in arb_time()) {
            let timing = Timing::new(start, end);
            prop_assert_eq!(timing.to_string().parse::<Timing>(), Ok(timing));
        }

        #[test]
        fn test_parse_never_panics_after_signature(body in "[ -~\n]{0,200}") {
            let source = format!("WEBVTT\n\n{body}");
            prop_assert!(parse(&source).is_ok());
        }
    }
}
