//! The ordered content list of a tag.
//!
//! Contents mix free text runs with nested tags. Lookups by name only ever
//! consider tags; text runs are skipped. Appending keeps the list free of
//! adjacent text runs by merging text into a trailing text entry.

use std::{collections::HashMap, ops::Deref};

use super::{Tag, TagId};

/// A single entry of a content list: a text run or a nested tag.
///
/// The tag type is generic so the same shape serves both mutable tags and
/// their frozen mirrors.
#[derive(Debug, Clone, PartialEq)]
pub enum Content<T = Tag> {
    /// A run of free text
    Text(String),
    /// A nested tag
    Tag(T),
}

impl<T> Content<T> {
    /// Returns the text if this is a text run.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => Some(text),
            Content::Tag(_) => None,
        }
    }

    /// Returns the tag if this entry is one.
    pub fn as_tag(&self) -> Option<&T> {
        match self {
            Content::Tag(tag) => Some(tag),
            Content::Text(_) => None,
        }
    }

    /// Returns the tag mutably if this entry is one.
    pub fn as_tag_mut(&mut self) -> Option<&mut T> {
        match self {
            Content::Tag(tag) => Some(tag),
            Content::Text(_) => None,
        }
    }

    /// Returns true if this is a text run
    pub fn is_text(&self) -> bool {
        matches!(self, Content::Text(_))
    }

    /// Returns true if this is a nested tag
    pub fn is_tag(&self) -> bool {
        matches!(self, Content::Tag(_))
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(text.to_string())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

impl From<Tag> for Content {
    fn from(tag: Tag) -> Self {
        Content::Tag(tag)
    }
}

/// Ordered content list with name-indexed lookup and merge operations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contents {
    items: Vec<Content>,
}

impl Contents {
    /// Creates an empty content list
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the first tag named `name`.
    pub fn get(&self, name: &str) -> Option<&Tag> {
        self.position(name).and_then(|index| self.items[index].as_tag())
    }

    /// Returns the first tag named `name`, mutably.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Tag> {
        let index = self.position(name)?;
        self.items[index].as_tag_mut()
    }

    /// Returns every tag named `name`, in list order.
    pub fn get_all(&self, name: &str) -> Vec<&Tag> {
        self.tags().filter(|tag| tag.name == name).collect()
    }

    /// Reconciles `tags` against the entries already present.
    ///
    /// Each incoming tag overwrites the first not-yet-overwritten entry with the
    /// same name, keeping its position. Incoming tags without such an entry are
    /// appended after the existing entries. Existing entries of a reconciled name
    /// that were not overwritten are removed. Entries of other names, and text
    /// runs, keep their place.
    pub fn set(&mut self, tags: impl IntoIterator<Item = Tag>) {
        // Index just past the last overwritten entry, per name.
        let mut marks: HashMap<String, usize> = HashMap::new();
        let mut appended = Vec::new();
        let mut overwritten = 0usize;

        for tag in tags {
            let start = marks.get(&tag.name).copied().unwrap_or(0);
            let found = self.items[start..]
                .iter()
                .position(|content| matches!(content, Content::Tag(t) if t.name == tag.name))
                .map(|offset| start + offset);
            match found {
                Some(index) => {
                    marks.insert(tag.name.clone(), index + 1);
                    self.items[index] = Content::Tag(tag);
                    overwritten += 1;
                }
                None => appended.push(tag),
            }
        }

        let before = self.items.len();
        let mut index = 0;
        self.items.retain(|content| {
            let keep = match content {
                Content::Tag(tag) => marks.get(&tag.name).is_none_or(|&mark| index < mark),
                Content::Text(_) => true,
            };
            index += 1;
            keep
        });
        let removed = before - self.items.len();

        tracing::trace!(
            overwritten,
            appended = appended.len(),
            removed,
            "Reconciled contents"
        );
        self.items.extend(appended.into_iter().map(Content::Tag));
    }

    /// Appends `contents`, merging text into a trailing text run.
    pub fn add<C: Into<Content>>(&mut self, contents: impl IntoIterator<Item = C>) {
        for content in contents {
            self.push(content.into());
        }
    }

    /// Appends a single entry, merging text into a trailing text run.
    pub fn push(&mut self, content: impl Into<Content>) {
        match (self.items.last_mut(), content.into()) {
            (Some(Content::Text(last)), Content::Text(text)) => last.push_str(&text),
            (_, content) => self.items.push(content),
        }
    }

    /// Replaces the tag with identity `search` by `replacement`.
    ///
    /// Returns whether a matching tag was found.
    pub fn replace(&mut self, search: TagId, replacement: Tag) -> bool {
        let found = self
            .items
            .iter()
            .position(|content| matches!(content, Content::Tag(tag) if tag.id() == search));
        match found {
            Some(index) => {
                self.items[index] = Content::Tag(replacement);
                true
            }
            None => false,
        }
    }

    /// Removes the first tag named `name`.
    pub fn delete(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Removes every tag named `name`.
    pub fn delete_all(&mut self, name: &str) -> bool {
        let before = self.items.len();
        self.items
            .retain(|content| !matches!(content, Content::Tag(tag) if tag.name == name));
        self.items.len() != before
    }

    /// Replaces every entry.
    pub fn splice_all<C: Into<Content>>(&mut self, contents: impl IntoIterator<Item = C>) {
        self.items = contents.into_iter().map(Into::into).collect();
    }

    /// Removes every entry
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterates over the nested tags, skipping text.
    pub fn tags(&self) -> impl Iterator<Item = &Tag> {
        self.items.iter().filter_map(Content::as_tag)
    }

    /// Iterates mutably over the nested tags, skipping text.
    pub fn tags_mut(&mut self) -> impl Iterator<Item = &mut Tag> {
        self.items.iter_mut().filter_map(Content::as_tag_mut)
    }

    pub(crate) fn items_mut(&mut self) -> &mut Vec<Content> {
        &mut self.items
    }

    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|content| matches!(content, Content::Tag(tag) if tag.name == name))
    }
}

impl Deref for Contents {
    type Target = [Content];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl<C: Into<Content>> FromIterator<C> for Contents {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Contents {
    type Item = &'a Content;
    type IntoIter = std::slice::Iter<'a, Content>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for Contents {
    type Item = Content;
    type IntoIter = std::vec::IntoIter<Content>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Read-only view over a content list.
///
/// Used for both mutable tags and frozen mirrors; it exposes lookups only.
#[derive(Debug)]
pub struct ContentView<'a, T> {
    contents: &'a [Content<T>],
}

impl<T> Clone for ContentView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ContentView<'_, T> {}

impl<'a, T: super::TagRead> ContentView<'a, T> {
    pub(crate) fn new(contents: &'a [Content<T>]) -> Self {
        Self { contents }
    }

    /// Returns the first tag named `name`.
    pub fn get(&self, name: &str) -> Option<&'a T> {
        self.tags().find(|tag| tag.name() == name)
    }

    /// Returns every tag named `name`, in list order.
    pub fn get_all(&self, name: &str) -> Vec<&'a T> {
        self.tags().filter(|tag| tag.name() == name).collect()
    }

    /// Iterates over the nested tags, skipping text.
    pub fn tags(&self) -> impl Iterator<Item = &'a T> + use<'a, T> {
        self.contents.iter().filter_map(Content::as_tag)
    }

    /// Iterates over every entry.
    pub fn iter(&self) -> std::slice::Iter<'a, Content<T>> {
        self.contents.iter()
    }

    /// Returns the number of entries
    pub fn len(&self) -> usize {
        self.contents.len()
    }

    /// Returns true if there are no entries
    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}
