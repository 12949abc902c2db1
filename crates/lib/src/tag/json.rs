//! Plain-data projection of a tag tree.
//!
//! [`TagJson`] is the node-shaped value exchanged with a [`Syntax`](crate::Syntax)
//! and with serde. Conversions in both directions are lossless: flags, order
//! and layout are carried as they are.

use serde::{Deserialize, Serialize};

use super::{
    Tag, TagRead,
    attributes::Attributes,
    list::{Content, Contents},
};

/// Opaque formatting metadata owned by the printer.
pub type Layout = serde_json::Value;

fn default_name() -> String {
    "unnamed".to_string()
}

/// A tag as plain nested data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagJson {
    #[serde(default)]
    pub is_quoted: bool,
    #[serde(default)]
    pub is_attribute: bool,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<TagJson>,
    #[serde(default)]
    pub is_literal: bool,
    #[serde(default)]
    pub contents: Vec<ContentJson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,
}

impl Default for TagJson {
    fn default() -> Self {
        Self {
            is_quoted: false,
            is_attribute: false,
            name: default_name(),
            attributes: Vec::new(),
            is_literal: false,
            contents: Vec::new(),
            layout: None,
        }
    }
}

impl TagJson {
    /// Creates an empty projection with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A content entry of [`TagJson`]: a JSON string is text, an object is a tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentJson {
    Text(String),
    Tag(TagJson),
}

pub(crate) fn tag_to_json<T: TagRead>(tag: &T) -> TagJson {
    TagJson {
        is_quoted: tag.is_quoted(),
        is_attribute: tag.is_attribute(),
        name: tag.name().to_string(),
        attributes: tag.attribute_entries().iter().map(tag_to_json).collect(),
        is_literal: tag.is_literal(),
        contents: tag
            .content_entries()
            .iter()
            .map(|content| match content {
                Content::Text(text) => ContentJson::Text(text.clone()),
                Content::Tag(tag) => ContentJson::Tag(tag_to_json(tag)),
            })
            .collect(),
        layout: tag.layout().cloned(),
    }
}

impl From<TagJson> for Tag {
    fn from(json: TagJson) -> Self {
        let mut attributes = Attributes::new();
        attributes
            .items_mut()
            .extend(json.attributes.into_iter().map(Tag::from));
        let contents: Contents = json
            .contents
            .into_iter()
            .map(|content| match content {
                ContentJson::Text(text) => Content::Text(text),
                ContentJson::Tag(tag) => Content::Tag(Tag::from(tag)),
            })
            .collect();

        let mut tag = Tag::new(json.name);
        tag.is_quoted = json.is_quoted;
        tag.is_attribute = json.is_attribute;
        tag.is_literal = json.is_literal;
        tag.attributes = attributes;
        tag.contents = contents;
        tag.layout = json.layout;
        tag
    }
}

impl From<&Tag> for TagJson {
    fn from(tag: &Tag) -> Self {
        tag_to_json(tag)
    }
}
