//! Syntax seam integration tests
//!
//! The built-in JSON syntax plus a minimal line syntax showing that the tree
//! model works with any implementation.

use tagdown::{
    JsonSyntax, Syntax, Tag, TagRead, t,
    tag::{ContentJson, TagError, TagJson},
};

use crate::helpers::*;

/// `name: text` on a single line. Nothing else.
struct LineSyntax;

impl Syntax for LineSyntax {
    fn parse_tag(&self, text: &str) -> Result<TagJson, TagError> {
        let (name, body) = text
            .split_once(':')
            .ok_or_else(|| TagError::InvalidTagText {
                reason: "expected `name: text`".to_string(),
            })?;
        let mut tag = TagJson::named(name.trim());
        let body = body.trim();
        if !body.is_empty() {
            tag.contents.push(ContentJson::Text(body.to_string()));
        }
        Ok(tag)
    }

    fn print_tag(&self, tag: &TagJson) -> String {
        let text: String = self
            .shake_tag(tag)
            .contents
            .iter()
            .filter_map(|content| match content {
                ContentJson::Text(text) => Some(text.as_str()),
                ContentJson::Tag(_) => None,
            })
            .collect();
        format!("{}: {}", tag.name, text)
    }

    fn shake_tag(&self, tag: &TagJson) -> TagJson {
        JsonSyntax::default().shake_tag(tag)
    }
}

#[test]
fn test_custom_syntax_parses_into_tags() {
    let tag = Tag::parse_with(&LineSyntax, "title: Hello").unwrap();
    assert_eq!(tag.name, "title");
    assert_eq!(tag.text(), "Hello");
    assert_eq!(LineSyntax.print_tag(&tag.to_json()), "title: Hello");

    let err = Tag::parse_with(&LineSyntax, "no separator").unwrap_err();
    assert!(err.is_parse_error());
}

#[test]
fn test_json_print_parse_round_trip() {
    let doc = sample_document();
    let reparsed = Tag::parse(&doc.print()).unwrap();
    assert_eq!(reparsed, doc);

    let pretty = JsonSyntax::pretty().print_tag(&doc.to_json());
    assert_eq!(Tag::parse_with(&JsonSyntax::pretty(), &pretty).unwrap(), doc);
}

#[test]
fn test_print_normalizes_text_runs() {
    let mut tag = t("p");
    tag.contents.splice_all(["", "a"]);
    tag.contents.push(t("br"));
    tag.contents.add(["b"]);
    let printed = tag.print();
    let reparsed = Tag::parse(&printed).unwrap();
    assert_eq!(reparsed.contents.len(), 3);
    assert_eq!(reparsed.text(), "a");
}

#[test]
fn test_json_field_names_and_defaults() {
    let tag = Tag::parse(r#"{"isQuoted": true, "contents": ["x", {"name": "b"}]}"#).unwrap();
    assert_eq!(tag.name, "unnamed");
    assert!(tag.is_quoted);
    assert!(!tag.is_literal);
    assert_eq!(tag.find_tag("b").map(|b| b.name.as_str()), Some("b"));

    let printed = t("a").print();
    assert!(printed.contains("\"isAttribute\":false"));
    assert!(!printed.contains("layout"));
}

#[test]
fn test_layout_is_preserved() {
    let mut tag = t("a");
    tag.layout = Some(serde_json::json!({"indent": 2}));
    let reparsed = Tag::parse(&tag.print()).unwrap();
    assert_eq!(reparsed.layout, tag.layout);
}
