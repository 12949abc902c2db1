//! Property tests over generated trees and values

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, Utc};
use proptest::prelude::*;
use tagdown::{JsonSyntax, Syntax, Tag, TagPath, TagRead, t, tag::Content};

use crate::helpers::*;

fn epoch() -> StoppedClock {
    StoppedClock(DateTime::<Utc>::UNIX_EPOCH.fixed_offset())
}

fn content_strategy() -> impl Strategy<Value = Content> {
    prop_oneof![
        text_strategy().prop_map(Content::from),
        name_strategy().prop_map(|name| Content::from(t(name))),
    ]
}

proptest! {
    #[test]
    fn prop_print_matches_syntax_print(json in tag_json_strategy(3)) {
        let syntax = JsonSyntax::default();
        let tag = Tag::from(json.clone());
        prop_assert_eq!(tag.print(), syntax.print_tag(&json));

        let reparsed = Tag::parse(&tag.print()).unwrap();
        prop_assert_eq!(reparsed, Tag::from(syntax.shake_tag(&json)));
    }

    #[test]
    fn prop_json_string_round_trip(tag in tag_strategy()) {
        let json = tag.to_json_string().unwrap();
        prop_assert_eq!(Tag::from_json_str(&json).unwrap(), tag);
    }

    #[test]
    fn prop_freeze_preserves_shape(tag in tag_strategy()) {
        let frozen = tag.freeze();
        prop_assert_eq!(frozen.print(), tag.print());
        prop_assert_eq!(frozen.unfreeze(), tag);
    }

    #[test]
    fn prop_truncate_is_bounded(text in text_strategy(), length in -5i64..40) {
        let truncated = t("p").with_text(text.as_str()).truncate(length);
        let bound = usize::try_from(length.max(0)).unwrap();
        prop_assert!(truncated.chars().count() <= bound);
        if length > 0 && !text.is_empty() {
            prop_assert!(truncated.ends_with('…'));
        } else {
            prop_assert!(truncated.is_empty());
        }
    }

    #[test]
    fn prop_number_round_trip(value in any::<f64>().prop_filter("finite", |v| v.is_finite())) {
        let mut tag = t("n");
        tag.from_number(value);
        prop_assert_eq!(tag.to_number(), value);
    }

    #[test]
    fn prop_bool_and_text_round_trip(flag in any::<bool>(), text in ".*") {
        let mut tag = t("v");
        prop_assert_eq!(tag.from_bool(flag).to_boolean(), flag);
        prop_assert_eq!(tag.from_value(text.as_str()).text(), text.as_str());
    }

    #[test]
    fn prop_date_round_trip(
        millis in 0i64..7_258_118_400_000,
        offset_minutes in -720i32..=840,
    ) {
        let offset = FixedOffset::east_opt(offset_minutes * 60).unwrap();
        let date = DateTime::<Utc>::from_timestamp_millis(millis)
            .unwrap()
            .with_timezone(&offset);
        let mut tag = t("d");
        tag.from_date(&date);
        let read = tag.to_date_with(&epoch());
        prop_assert_eq!(read, date);
        prop_assert_eq!(read.offset(), date.offset());
    }

    #[test]
    fn prop_set_is_stable(
        existing in prop::collection::vec("[a-c]", 0..8),
        incoming in prop::collection::vec("[a-d]", 0..6),
    ) {
        let mut root = t("root").with_contents(existing.iter().map(|name| t(name.as_str())));
        let untouched_before: Vec<_> = root
            .contents
            .tags()
            .filter(|tag| !incoming.contains(&tag.name))
            .map(Tag::id)
            .collect();

        let batch: Vec<Tag> = incoming
            .iter()
            .enumerate()
            .map(|(index, name)| t(name.as_str()).with_text(index.to_string()))
            .collect();
        root.set_tag(TagPath::new(), batch);

        let mut expected: HashMap<&str, Vec<String>> = HashMap::new();
        for (index, name) in incoming.iter().enumerate() {
            expected.entry(name.as_str()).or_default().push(index.to_string());
        }
        for (name, texts) in &expected {
            let found: Vec<String> = root
                .tags(*name)
                .iter()
                .map(|tag| tag.text().to_string())
                .collect();
            prop_assert_eq!(&found, texts);
        }

        let untouched_after: Vec<_> = root
            .contents
            .tags()
            .filter(|tag| !incoming.contains(&tag.name))
            .map(Tag::id)
            .collect();
        prop_assert_eq!(untouched_after, untouched_before);
    }

    #[test]
    fn prop_add_coalesces_text(batches in prop::collection::vec(
        prop::collection::vec(content_strategy(), 0..4),
        0..5,
    )) {
        let mut tag = t("p");
        let mut all_text = String::new();
        for batch in batches {
            for content in &batch {
                if let Content::Text(text) = content {
                    all_text.push_str(text);
                }
            }
            tag.add_contents(batch);
        }
        prop_assert!(has_no_adjacent_text(&tag));
        let stored: String = tag.contents.iter().filter_map(Content::as_text).collect();
        prop_assert_eq!(stored, all_text);
    }

    #[test]
    fn prop_deferred_attach_creates_one_chain(
        segments in prop::collection::vec(name_strategy(), 1..4),
        through_attributes in any::<bool>(),
    ) {
        let path = TagPath::from(segments.clone());
        let mut root = t("root");

        {
            let handle = if through_attributes { root.attr(&path) } else { root.tag(&path) };
            prop_assert!(handle.is_detached());
            handle.set_text("leaf");
        }
        // A second write goes to the same tag
        if through_attributes {
            root.attr(&path).set_text("leaf");
        } else {
            root.tag(&path).set_text("leaf");
        }

        for depth in 1..=segments.len() {
            let prefix = TagPath::from(&segments[..depth]);
            let count = if through_attributes {
                root.attrs(&prefix).len()
            } else {
                root.tags(&prefix).len()
            };
            prop_assert_eq!(count, 1);
        }
        let leaf = if through_attributes { root.find_attr(&path) } else { root.find_tag(&path) };
        prop_assert_eq!(leaf.map(|leaf| leaf.text()), Some("leaf"));
        prop_assert_eq!(root.contents.is_empty(), through_attributes);
    }
}
