use chrono::{DateTime, FixedOffset};
use proptest::prelude::*;
use tagdown::{Clock, ContentJson, Tag, TagJson, TagRead, t, tag::Content};

// ==========================
// FIXTURES
// ==========================

/// A small document used across modules:
///
/// doc[@lang "en"]
///   head
///     title "Hello"
///   body
///     p "first"
///     p "second" [@class "lead"]
pub fn sample_document() -> Tag {
    t("doc")
        .with_attributes([t("lang").with_text("en")])
        .with_contents([
            t("head").with_contents([t("title").with_text("Hello")]),
            t("body").with_contents([
                t("p").with_text("first"),
                t("p")
                    .with_text("second")
                    .with_attributes([t("class").with_text("lead")]),
            ]),
        ])
}

/// An attribute-flagged tag meant to be stored among contents.
pub fn inline_attr(name: &str, text: &str) -> Tag {
    let mut attr = t(name).with_text(text);
    attr.is_attribute = true;
    attr
}

/// Names of the direct content tags, in order
pub fn content_names(tag: &Tag) -> Vec<String> {
    tag.contents.tags().map(|tag| tag.name.clone()).collect()
}

/// True if no two neighbouring content entries are both text runs
pub fn has_no_adjacent_text(tag: &Tag) -> bool {
    tag.contents
        .windows(2)
        .all(|pair| !(matches!(pair[0], Content::Text(_)) && matches!(pair[1], Content::Text(_))))
}

pub fn texts<T: TagRead>(tags: &[&T]) -> Vec<String> {
    tags.iter().map(|tag| tag.text().to_string()).collect()
}

/// Clock that always reports the same instant.
#[derive(Debug)]
pub struct StoppedClock(pub DateTime<FixedOffset>);

impl Clock for StoppedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

// ==========================
// STRATEGIES
// ==========================

pub fn name_strategy() -> impl Strategy<Value = String> {
    "[a-e]{1,3}"
}

pub fn text_strategy() -> impl Strategy<Value = String> {
    "[ -~]{0,10}"
}

/// Arbitrary tag projections up to `depth` levels deep.
pub fn tag_json_strategy(depth: u32) -> impl Strategy<Value = TagJson> {
    let leaf = (name_strategy(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(name, is_quoted, is_attribute, is_literal)| TagJson {
            name,
            is_quoted,
            is_attribute,
            is_literal,
            ..TagJson::default()
        },
    );
    leaf.prop_recursive(depth, 48, 4, |inner| {
        let content = prop_oneof![
            text_strategy().prop_map(ContentJson::Text),
            inner.clone().prop_map(ContentJson::Tag),
        ];
        (
            name_strategy(),
            any::<bool>(),
            any::<bool>(),
            prop::collection::vec(inner, 0..3),
            prop::collection::vec(content, 0..5),
        )
            .prop_map(|(name, is_quoted, is_literal, attributes, contents)| TagJson {
                name,
                is_quoted,
                is_literal,
                attributes,
                contents,
                ..TagJson::default()
            })
    })
}

/// Arbitrary tag trees up to three levels deep.
pub fn tag_strategy() -> impl Strategy<Value = Tag> {
    tag_json_strategy(3).prop_map(Tag::from)
}
