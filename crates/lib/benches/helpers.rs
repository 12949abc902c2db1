//! Shared helpers for benchmark tests

use tagdown::{Tag, t};

/// Builds a flat list of `count` children cycling through `distinct` names.
///
/// Each child carries its index as text so overwrites are observable.
pub fn flat_tag(count: usize, distinct: usize) -> Tag {
    t("root").with_contents((0..count).map(|i| t(format!("n{}", i % distinct)).with_text(i.to_string())))
}

/// Builds a document of `sections` sections with `items` items each, every
/// item carrying a `class` attribute.
pub fn document(sections: usize, items: usize) -> Tag {
    t("doc").with_contents((0..sections).map(|s| {
        t("section").with_contents((0..items).map(move |i| {
            t("item")
                .with_attributes([t("class").with_text(format!("c{s}"))])
                .with_text(format!("item {i}"))
        }))
    }))
}

/// A dotted path `l0.l1...` of the given depth.
pub fn deep_path(depth: usize) -> String {
    (0..depth).map(|level| format!("l{level}")).collect::<Vec<_>>().join(".")
}
