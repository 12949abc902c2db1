//! Read capability shared by mutable tags and frozen mirrors.

use std::borrow::Cow;

use chrono::{DateTime, FixedOffset};

use super::{
    TagJson, TagPath,
    attributes::AttributeView,
    json::{Layout, tag_to_json},
    list::{Content, ContentView},
    path::Target,
    value::{TRUTHY_TOKENS, parse_date, parse_number_prefix},
};
use crate::{
    clock::{Clock, SystemClock},
    syntax::{JsonSyntax, Syntax},
};

/// Read-only navigation, coercion and traversal over a tag tree.
///
/// Implementors only expose their fields; every query is provided on top of
/// them, so [`Tag`](super::Tag) and [`FrozenTag`](super::FrozenTag) answer
/// identically for the same shape.
///
/// Traversal callbacks receive the visited item and its index in the list it
/// is stored in. All traversals are depth-first and pre-order, visit
/// attributes before contents at each level, and walk contents left to right.
pub trait TagRead: Sized {
    fn name(&self) -> &str;
    fn is_quoted(&self) -> bool;
    fn is_attribute(&self) -> bool;
    fn is_literal(&self) -> bool;
    fn layout(&self) -> Option<&Layout>;
    /// Entries of the dedicated attribute list only
    fn attribute_entries(&self) -> &[Self];
    fn content_entries(&self) -> &[Content<Self>];

    /// Attribute lookups spanning the attribute list and inline attributes.
    fn attribute_view(&self) -> AttributeView<'_, Self> {
        AttributeView::new(self.attribute_entries(), self.content_entries())
    }

    fn content_view(&self) -> ContentView<'_, Self> {
        ContentView::new(self.content_entries())
    }

    /// Follows `path` through attributes. An empty path is the tag itself.
    fn find_attr(&self, path: impl Into<TagPath>) -> Option<&Self> {
        find(self, &path.into(), Target::Attribute)
    }

    /// Follows `path` through contents. An empty path is the tag itself.
    fn find_tag(&self, path: impl Into<TagPath>) -> Option<&Self> {
        find(self, &path.into(), Target::Content)
    }

    /// Collects every attribute reachable through `path`, fanning out over
    /// same-named siblings at each level. An empty path yields nothing.
    fn attrs(&self, path: impl Into<TagPath>) -> Vec<&Self> {
        find_all(self, &path.into(), Target::Attribute)
    }

    /// Collects every content tag reachable through `path`, fanning out over
    /// same-named siblings at each level. An empty path yields nothing.
    fn tags(&self, path: impl Into<TagPath>) -> Vec<&Self> {
        find_all(self, &path.into(), Target::Content)
    }

    /// The first content entry if it is text, otherwise `""`.
    fn text(&self) -> &str {
        match self.content_entries().first() {
            Some(Content::Text(text)) => text,
            _ => "",
        }
    }

    /// Concatenates text in content order, descending into nested tags.
    ///
    /// Stops once at least `soft_length` characters are collected. The result
    /// is not cut, so it may be longer than `soft_length`.
    fn get_texts(&self, soft_length: usize) -> String {
        let mut text = String::new();
        let mut length = 0;
        for content in self.content_entries() {
            let part = match content {
                Content::Text(run) => Cow::Borrowed(run.as_str()),
                Content::Tag(tag) => Cow::Owned(tag.get_texts(soft_length)),
            };
            length += part.chars().count();
            text.push_str(&part);
            if length >= soft_length {
                break;
            }
        }
        text
    }

    /// Shortens the text to at most `length` characters, ending in `…`.
    ///
    /// Returns `""` for non-positive lengths and for tags without text.
    fn truncate(&self, length: i64) -> String {
        if length <= 0 {
            return String::new();
        }
        let length = usize::try_from(length).unwrap_or(usize::MAX);
        let text = self.get_texts(length);
        if text.is_empty() {
            return String::new();
        }
        let mut truncated: String = text.chars().take(length - 1).collect();
        truncated.push('…');
        truncated
    }

    fn to_boolean(&self) -> bool {
        TRUTHY_TOKENS.contains(&self.text())
    }

    /// Reads the leading number of the text; `0` when there is none.
    fn to_number(&self) -> f64 {
        match parse_number_prefix(self.text()) {
            Some(number) if !number.is_nan() && number != 0.0 => number,
            _ => 0.0,
        }
    }

    /// Reads the text as a date, falling back to the current system time.
    fn to_date(&self) -> DateTime<FixedOffset> {
        self.to_date_with(&SystemClock)
    }

    /// Reads the text as a date, falling back to `clock`.
    fn to_date_with(&self, clock: &dyn Clock) -> DateTime<FixedOffset> {
        match parse_date(self.text()) {
            Some(date) => date,
            None => {
                tracing::debug!(
                    name = self.name(),
                    text = self.text(),
                    "Unparsable date, using current time"
                );
                clock.now()
            }
        }
    }

    fn to_json(&self) -> TagJson {
        tag_to_json(self)
    }

    /// Canonical text produced by [`JsonSyntax`].
    fn print(&self) -> String {
        JsonSyntax::default().print_tag(&self.to_json())
    }

    /// Visits every text run and every tag, attributes included.
    fn traverse<FT, FG>(&self, mut for_text: FT, mut for_tag: FG) -> &Self
    where
        FT: FnMut(&str, usize),
        FG: FnMut(&Self, usize),
    {
        walk(self, Traversal::All, &mut for_text, &mut for_tag);
        self
    }

    /// Visits every text run, including text nested inside attributes.
    fn traverse_text<FT>(&self, mut for_text: FT) -> &Self
    where
        FT: FnMut(&str, usize),
    {
        walk(self, Traversal::Text, &mut for_text, &mut |_, _| {});
        self
    }

    /// Visits every tag, attributes included.
    fn traverse_tag<FG>(&self, mut for_tag: FG) -> &Self
    where
        FG: FnMut(&Self, usize),
    {
        walk(self, Traversal::Tag, &mut |_, _| {}, &mut for_tag);
        self
    }

    /// Visits every attribute anywhere in the tree, from both storage
    /// locations.
    fn traverse_attribute<FA>(&self, mut for_attribute: FA) -> &Self
    where
        FA: FnMut(&Self, usize),
    {
        walk(self, Traversal::Attribute, &mut |_, _| {}, &mut for_attribute);
        self
    }

    /// Like [`traverse`](TagRead::traverse) but attribute list entries are
    /// only searched for nested content, never reported themselves.
    fn traverse_content<FT, FG>(&self, mut for_text: FT, mut for_tag: FG) -> &Self
    where
        FT: FnMut(&str, usize),
        FG: FnMut(&Self, usize),
    {
        walk(self, Traversal::Content, &mut for_text, &mut for_tag);
        self
    }

    fn traverse_text_content<FT>(&self, mut for_text: FT) -> &Self
    where
        FT: FnMut(&str, usize),
    {
        walk(self, Traversal::TextContent, &mut for_text, &mut |_, _| {});
        self
    }

    fn traverse_tag_content<FG>(&self, mut for_tag: FG) -> &Self
    where
        FG: FnMut(&Self, usize),
    {
        walk(self, Traversal::TagContent, &mut |_, _| {}, &mut for_tag);
        self
    }
}

fn children<'t, T: TagRead>(tag: &'t T, target: Target, name: &str) -> Vec<&'t T> {
    match target {
        Target::Attribute => tag.attribute_view().get_all(name),
        Target::Content => tag.content_view().get_all(name),
    }
}

fn find<'t, T: TagRead>(tag: &'t T, path: &TagPath, target: Target) -> Option<&'t T> {
    path.segments()
        .iter()
        .try_fold(tag, |current, name| match target {
            Target::Attribute => current.attribute_view().get(name),
            Target::Content => current.content_view().get(name),
        })
}

fn find_all<'t, T: TagRead>(tag: &'t T, path: &TagPath, target: Target) -> Vec<&'t T> {
    if path.is_empty() {
        return Vec::new();
    }
    path.segments().iter().fold(vec![tag], |matched, name| {
        matched
            .into_iter()
            .flat_map(|current| children(current, target, name))
            .collect()
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Traversal {
    All,
    Text,
    Tag,
    Attribute,
    Content,
    TextContent,
    TagContent,
}

impl Traversal {
    /// Whether attribute list entries are reported
    fn reports_attribute_list(self) -> bool {
        matches!(self, Traversal::All | Traversal::Tag | Traversal::Attribute)
    }

    fn reports_text(self) -> bool {
        matches!(
            self,
            Traversal::All | Traversal::Text | Traversal::Content | Traversal::TextContent
        )
    }

    fn reports_content_tag<T: TagRead>(self, tag: &T) -> bool {
        match self {
            Traversal::All | Traversal::Tag | Traversal::Content | Traversal::TagContent => true,
            Traversal::Attribute => tag.is_attribute(),
            Traversal::Text | Traversal::TextContent => false,
        }
    }
}

fn walk<T: TagRead>(
    tag: &T,
    mode: Traversal,
    for_text: &mut dyn FnMut(&str, usize),
    for_tag: &mut dyn FnMut(&T, usize),
) {
    for (index, attr) in tag.attribute_entries().iter().enumerate() {
        if mode.reports_attribute_list() {
            for_tag(attr, index);
        }
        walk(attr, mode, for_text, for_tag);
    }
    for (index, content) in tag.content_entries().iter().enumerate() {
        match content {
            Content::Text(text) => {
                if mode.reports_text() {
                    for_text(text, index);
                }
            }
            Content::Tag(child) => {
                if mode.reports_content_tag(child) {
                    for_tag(child, index);
                }
                walk(child, mode, for_text, for_tag);
            }
        }
    }
}
