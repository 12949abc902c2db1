//! Deep read-only snapshots of a tag tree.
//!
//! A [`FrozenTag`] is built eagerly from a [`Tag`] and shares nothing with it
//! afterwards, so it can be handed to any number of readers, across threads,
//! without synchronization.

use super::{
    Tag, TagPath, TagRead,
    attributes::{AttributeView, Attributes},
    json::Layout,
    list::{Content, ContentView, Contents},
};

/// Immutable mirror of a tag and its whole subtree.
#[derive(Debug, Clone, PartialEq)]
pub struct FrozenTag {
    name: String,
    is_quoted: bool,
    is_attribute: bool,
    is_literal: bool,
    attributes: Vec<FrozenTag>,
    contents: Vec<Content<FrozenTag>>,
    layout: Option<Layout>,
}

impl FrozenTag {
    /// Follows `path` through attributes. An empty path is the tag itself.
    pub fn attr(&self, path: impl Into<TagPath>) -> Option<&FrozenTag> {
        self.find_attr(path)
    }

    /// Follows `path` through contents. An empty path is the tag itself.
    pub fn tag(&self, path: impl Into<TagPath>) -> Option<&FrozenTag> {
        self.find_tag(path)
    }

    /// Read-only attribute lookups over both storage locations.
    pub fn attributes(&self) -> AttributeView<'_, FrozenTag> {
        self.attribute_view()
    }

    pub fn contents(&self) -> ContentView<'_, FrozenTag> {
        self.content_view()
    }

    /// Builds an independent mutable tree with the same shape and values.
    pub fn unfreeze(&self) -> Tag {
        let mut attributes = Attributes::new();
        attributes
            .items_mut()
            .extend(self.attributes.iter().map(FrozenTag::unfreeze));
        let contents: Contents = self
            .contents
            .iter()
            .map(|content| match content {
                Content::Text(text) => Content::Text(text.clone()),
                Content::Tag(tag) => Content::Tag(tag.unfreeze()),
            })
            .collect();

        let mut tag = Tag::new(self.name.as_str());
        tag.is_quoted = self.is_quoted;
        tag.is_attribute = self.is_attribute;
        tag.is_literal = self.is_literal;
        tag.attributes = attributes;
        tag.contents = contents;
        tag.layout = self.layout.clone();
        tag
    }
}

impl From<&Tag> for FrozenTag {
    fn from(tag: &Tag) -> Self {
        Self {
            name: tag.name.clone(),
            is_quoted: tag.is_quoted,
            is_attribute: tag.is_attribute,
            is_literal: tag.is_literal,
            attributes: tag.attributes.iter().map(FrozenTag::from).collect(),
            contents: tag
                .contents
                .iter()
                .map(|content| match content {
                    Content::Text(text) => Content::Text(text.clone()),
                    Content::Tag(tag) => Content::Tag(FrozenTag::from(tag)),
                })
                .collect(),
            layout: tag.layout.clone(),
        }
    }
}

impl From<Tag> for FrozenTag {
    fn from(tag: Tag) -> Self {
        Self::from(&tag)
    }
}

impl TagRead for FrozenTag {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_quoted(&self) -> bool {
        self.is_quoted
    }

    fn is_attribute(&self) -> bool {
        self.is_attribute
    }

    fn is_literal(&self) -> bool {
        self.is_literal
    }

    fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    fn attribute_entries(&self) -> &[Self] {
        &self.attributes
    }

    fn content_entries(&self) -> &[Content<Self>] {
        &self.contents
    }
}

impl std::fmt::Display for FrozenTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.print())
    }
}
