//! TagPath integration tests

use tagdown::{TagPath, TagRead, t};

use crate::helpers::*;

#[test]
fn test_path_forms_address_the_same_tag() {
    let doc = sample_document();
    let dotted = doc.find_tag("head.title");
    let array = doc.find_tag(["head", "title"]);
    let built = doc.find_tag(TagPath::new().push("head").push("title"));
    let owned = doc.find_tag(vec!["head".to_string(), "title".to_string()]);
    assert!(dotted.is_some());
    assert_eq!(dotted, array);
    assert_eq!(dotted, built);
    assert_eq!(dotted, owned);
}

#[test]
fn test_segments_with_dots_need_explicit_segments() {
    let root = t("root").with_contents([t("v1.2").with_text("dotted")]);
    assert!(root.find_tag("v1.2").is_none());
    assert_eq!(root.find_tag(["v1.2"]).map(|tag| tag.text()), Some("dotted"));
}

#[test]
fn test_strict_rejects_empty_segments() {
    let err = TagPath::strict("a..b").unwrap_err();
    assert!(err.is_path_error());
    assert_eq!(err.path(), Some("a..b"));
    assert!(TagPath::strict(".a").is_err());
    assert!(TagPath::strict("a.").is_err());

    assert!(TagPath::strict("").unwrap().is_empty());
    assert_eq!(TagPath::strict("a.b").unwrap(), TagPath::from("a.b"));
}

#[test]
fn test_split_last_and_display() {
    let path = TagPath::from("body.p.class");
    let (parent, last) = path.split_last().unwrap();
    assert_eq!(parent, ["body", "p"]);
    assert_eq!(last, "class");
    assert_eq!(path.last(), Some("class"));
    assert_eq!(path.to_string(), "body.p.class");
    assert_eq!(TagPath::new().to_string(), "(empty path)");
    assert!(TagPath::new().split_last().is_none());
}

#[test]
fn test_path_can_be_reused_by_reference() {
    let mut doc = sample_document();
    let body = TagPath::from("body");
    let paragraphs = body.clone().push("p");
    assert_eq!(doc.tags(&paragraphs).len(), 2);
    doc.set_tag(&body, [t("p").with_text("x")]);
    assert_eq!(texts(&doc.tags(&paragraphs)), ["x"]);
}
