//! The tag tree and its editing engine.
//!
//! A [`Tag`] owns an ordered attribute list and an ordered content list of
//! text runs and nested tags. Edits go through name paths:
//!
//! - [`Tag::attr`] / [`Tag::tag`] return a [`TagHandle`] that is either
//!   attached to an existing tag or deferred. A deferred handle splices itself
//!   (and any missing ancestors) into the tree on its first write.
//! - [`Tag::set_attr`] / [`Tag::set_tag`] reconcile a batch of tags at a path,
//!   creating missing levels on the way.
//! - [`Tag::delete_attr`] / [`Tag::delete_tag`] and their fan-out variants
//!   remove same-named entries; unresolvable paths are a no-op.
//!
//! Reads are shared with [`FrozenTag`] through the [`TagRead`] trait.

use std::{
    fmt,
    str::FromStr,
    sync::atomic::{AtomicU64, Ordering},
};

use chrono::{DateTime, TimeZone};

mod attributes;
mod errors;
mod frozen;
mod handle;
mod json;
mod list;
mod path;
mod read;
mod value;


pub use attributes::{AttributeSet, AttributeView, Attributes, attributes_from_pairs};
pub use errors::TagError;
pub use frozen::FrozenTag;
pub use handle::TagHandle;
pub use json::{ContentJson, Layout, TagJson};
pub use list::{Content, ContentView, Contents};
pub use path::{TagPath, Target};
pub use read::TagRead;
pub use value::{TRUTHY_TOKENS, TagValue, format_number, to_iso_string};

use attributes::Slot;
use path::Step;

use crate::syntax::{JsonSyntax, Syntax};

/// Process-unique identity of a tag value.
///
/// Identity follows the value, not its shape: two tags built the same way have
/// different ids, and a clone gets fresh ids for its whole subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagId(u64);

impl TagId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tag#{}", self.0)
    }
}

/// Position of a direct child, on either side of a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Location {
    Attribute(Slot),
    Content(usize),
}

/// A named node of a tagdown document.
#[derive(Debug)]
pub struct Tag {
    pub name: String,
    /// Printing hint, preserved as is
    pub is_quoted: bool,
    /// Whether this tag is an attribute when stored among contents
    pub is_attribute: bool,
    /// Printing hint, preserved as is
    pub is_literal: bool,
    pub attributes: Attributes,
    pub contents: Contents,
    pub layout: Option<Layout>,
    id: TagId,
}

impl Tag {
    /// Creates an empty tag.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_quoted: false,
            is_attribute: false,
            is_literal: false,
            attributes: Attributes::new(),
            contents: Contents::new(),
            layout: None,
            id: TagId::next(),
        }
    }

    /// Parses a single tag with the built-in [`JsonSyntax`].
    pub fn parse(text: &str) -> Result<Self, TagError> {
        Self::parse_with(&JsonSyntax::default(), text)
    }

    /// Parses a single tag with `syntax`.
    pub fn parse_with(syntax: &impl Syntax, text: &str) -> Result<Self, TagError> {
        syntax.parse_tag(text).map(Tag::from)
    }

    /// Reads a tag from its JSON projection.
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        let json: TagJson = serde_json::from_str(json).map_err(|err| TagError::Json {
            reason: err.to_string(),
        })?;
        Ok(json.into())
    }

    /// Writes the JSON projection of this tag.
    pub fn to_json_string(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(&self.to_json())?)
    }

    pub fn id(&self) -> TagId {
        self.id
    }

    /// Mutable access to the attributes in both storage locations.
    pub fn attributes_mut(&mut self) -> AttributeSet<'_> {
        AttributeSet::new(&mut self.attributes, &mut self.contents)
    }

    /// Builder form of [`Tag::set_attributes`].
    pub fn with_attributes(mut self, attributes: impl IntoIterator<Item = Tag>) -> Self {
        self.set_attributes(attributes);
        self
    }

    /// Builder form of [`Tag::set_contents`].
    pub fn with_contents<C: Into<Content>>(mut self, contents: impl IntoIterator<Item = C>) -> Self {
        self.set_contents(contents);
        self
    }

    /// Builder form of [`Tag::set_text`].
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    /// Looks up `path` through attributes.
    ///
    /// Never fails: when a segment is missing the handle is deferred and
    /// attaches itself, creating the missing levels, on its first write.
    pub fn attr(&mut self, path: impl Into<TagPath>) -> TagHandle<'_> {
        self.lookup_steps(path.into().steps(Target::Attribute))
    }

    /// Looks up `path` through contents. See [`Tag::attr`].
    pub fn tag(&mut self, path: impl Into<TagPath>) -> TagHandle<'_> {
        self.lookup_steps(path.into().steps(Target::Content))
    }

    /// Mutable lookup through attributes without creating anything.
    pub fn find_attr_mut(&mut self, path: impl Into<TagPath>) -> Option<&mut Tag> {
        self.walk(&path.into().steps(Target::Attribute))
    }

    /// Mutable lookup through contents without creating anything.
    pub fn find_tag_mut(&mut self, path: impl Into<TagPath>) -> Option<&mut Tag> {
        self.walk(&path.into().steps(Target::Content))
    }

    /// Reconciles `attributes` into the attributes of the tag at `path`.
    ///
    /// Missing levels of `path` are created as a chain of nested attributes.
    pub fn set_attr(
        &mut self,
        path: impl Into<TagPath>,
        attributes: impl IntoIterator<Item = Tag>,
    ) -> &mut Self {
        self.walk_or_create(&path.into().steps(Target::Attribute))
            .attributes_mut()
            .set(attributes);
        self
    }

    /// Reconciles `tags` into the contents of the tag at `path`.
    ///
    /// Missing levels of `path` are created as a chain of nested tags.
    pub fn set_tag(&mut self, path: impl Into<TagPath>, tags: impl IntoIterator<Item = Tag>) -> &mut Self {
        self.walk_or_create(&path.into().steps(Target::Content))
            .contents
            .set(tags);
        self
    }

    /// Removes every attribute named by the last segment of `path` from the
    /// tag the rest of the path leads to.
    ///
    /// Returns whether anything was removed; a missing parent is a no-op.
    pub fn delete_attr(&mut self, path: impl Into<TagPath>) -> bool {
        let path = path.into();
        let Some((parents, name)) = path.split_last() else {
            return false;
        };
        let steps = TagPath::from(parents).steps(Target::Attribute);
        match self.walk(&steps) {
            Some(parent) => parent.attributes_mut().delete_all(name),
            None => false,
        }
    }

    /// Content counterpart of [`Tag::delete_attr`].
    pub fn delete_tag(&mut self, path: impl Into<TagPath>) -> bool {
        let path = path.into();
        let Some((parents, name)) = path.split_last() else {
            return false;
        };
        let steps = TagPath::from(parents).steps(Target::Content);
        match self.walk(&steps) {
            Some(parent) => parent.contents.delete_all(name),
            None => false,
        }
    }

    /// Like [`Tag::delete_attr`], but over every tag the parent path fans out to.
    pub fn delete_attrs(&mut self, path: impl Into<TagPath>) -> bool {
        let path = path.into();
        match path.split_last() {
            Some((parents, name)) => self.delete_fan_out(Target::Attribute, parents, name),
            None => false,
        }
    }

    /// Like [`Tag::delete_tag`], but over every tag the parent path fans out to.
    pub fn delete_tags(&mut self, path: impl Into<TagPath>) -> bool {
        let path = path.into();
        match path.split_last() {
            Some((parents, name)) => self.delete_fan_out(Target::Content, parents, name),
            None => false,
        }
    }

    /// Replaces the attribute list.
    pub fn set_attributes(&mut self, attributes: impl IntoIterator<Item = Tag>) -> &mut Self {
        self.attributes.splice_all(attributes);
        self
    }

    /// Replaces the content list with a single text run.
    pub fn set_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.contents.splice_all([Content::Text(text.into())]);
        self
    }

    /// Replaces the content list.
    pub fn set_contents<C: Into<Content>>(&mut self, contents: impl IntoIterator<Item = C>) -> &mut Self {
        self.contents.splice_all(contents);
        self
    }

    /// Appends to the content list, merging adjacent text.
    pub fn add_contents<C: Into<Content>>(&mut self, contents: impl IntoIterator<Item = C>) -> &mut Self {
        self.contents.add(contents);
        self
    }

    /// Writes `value` into this tag.
    ///
    /// Scalars and dates become the text, another tag contributes only its
    /// text, and a structure is wrapped as a nested tag replacing all contents.
    pub fn from_value(&mut self, value: impl Into<TagValue>) -> &mut Self {
        match value.into() {
            TagValue::Structure(json) => self.set_contents([Tag::from(json)]),
            value => match value.render() {
                Some(text) => self.set_text(text),
                None => unreachable!("only structures render without text"),
            },
        }
    }

    pub fn from_bool(&mut self, value: bool) -> &mut Self {
        self.set_text(value.to_string())
    }

    pub fn from_number(&mut self, value: impl Into<f64>) -> &mut Self {
        self.set_text(format_number(value.into()))
    }

    /// Writes `date` as `YYYY-MM-DDTHH:mm:ss.sss±HH:mm`.
    pub fn from_date<Tz: TimeZone>(&mut self, date: &DateTime<Tz>) -> &mut Self {
        self.set_text(to_iso_string(date))
    }

    /// Writes `literal` as the text and marks the tag literal.
    pub fn from_literal(&mut self, literal: impl Into<String>) -> &mut Self {
        self.set_text(literal);
        self.is_literal = true;
        self
    }

    /// Takes a deep read-only snapshot.
    pub fn freeze(&self) -> FrozenTag {
        FrozenTag::from(self)
    }

    pub(crate) fn lookup_steps(&mut self, steps: Vec<Step>) -> TagHandle<'_> {
        // Resolve with a shared borrow first so a miss can still hand out
        // `self` to the deferred handle.
        let Some(locations) = self.locate_path(&steps) else {
            return TagHandle::detached(self, steps);
        };
        let mut current = self;
        for location in locations {
            current = current.entry_mut(location);
        }
        TagHandle::attached(current)
    }

    fn locate_path(&self, steps: &[Step]) -> Option<Vec<Location>> {
        let mut locations = Vec::with_capacity(steps.len());
        let mut current = self;
        for step in steps {
            let location = current.locate(step.target, &step.name)?;
            locations.push(location);
            current = current.entry(location);
        }
        Some(locations)
    }

    pub(crate) fn locate(&self, target: Target, name: &str) -> Option<Location> {
        match target {
            Target::Attribute => self.attribute_view().slot(name).map(Location::Attribute),
            Target::Content => self.contents.position(name).map(Location::Content),
        }
    }

    fn entry(&self, location: Location) -> &Tag {
        let content = match location {
            Location::Attribute(Slot::List(index)) => return &self.attributes[index],
            Location::Attribute(Slot::Inline(index)) | Location::Content(index) => &self.contents[index],
        };
        match content {
            Content::Tag(tag) => tag,
            Content::Text(_) => unreachable!("location points at a text run"),
        }
    }

    pub(crate) fn entry_mut(&mut self, location: Location) -> &mut Tag {
        match location {
            Location::Attribute(slot) => self.attributes_mut().into_slot_mut(slot),
            Location::Content(index) => match &mut self.contents.items_mut()[index] {
                Content::Tag(tag) => tag,
                Content::Text(_) => unreachable!("location points at a text run"),
            },
        }
    }

    fn walk(&mut self, steps: &[Step]) -> Option<&mut Tag> {
        let mut current = self;
        for step in steps {
            let location = current.locate(step.target, &step.name)?;
            current = current.entry_mut(location);
        }
        Some(current)
    }

    /// Follows `steps`, creating every missing level on the way.
    ///
    /// The first missing level is built together with all deeper ones as a
    /// singly nested chain; each link sits on the side its step addresses.
    pub(crate) fn walk_or_create(&mut self, steps: &[Step]) -> &mut Tag {
        let mut current = self;
        for (depth, step) in steps.iter().enumerate() {
            if current.locate(step.target, &step.name).is_none() {
                let remaining = &steps[depth..];
                tracing::trace!(
                    name = %step.name,
                    depth,
                    levels = remaining.len(),
                    "Creating missing tag chain"
                );
                current.reconcile(step.target, [build_chain(remaining)]);
            }
            let Some(location) = current.locate(step.target, &step.name) else {
                unreachable!("tag {} was just reconciled", step.name);
            };
            current = current.entry_mut(location);
        }
        current
    }

    pub(crate) fn reconcile(&mut self, target: Target, tags: impl IntoIterator<Item = Tag>) {
        match target {
            Target::Attribute => self.attributes_mut().set(tags),
            Target::Content => self.contents.set(tags),
        }
    }

    fn delete_fan_out(&mut self, target: Target, parents: &[String], name: &str) -> bool {
        let Some((first, rest)) = parents.split_first() else {
            return match target {
                Target::Attribute => self.attributes_mut().delete_all(name),
                Target::Content => self.contents.delete_all(name),
            };
        };
        let mut removed = false;
        for child in self.children_named_mut(target, first) {
            removed |= child.delete_fan_out(target, rest, name);
        }
        removed
    }

    fn children_named_mut(&mut self, target: Target, name: &str) -> Vec<&mut Tag> {
        match target {
            Target::Attribute => {
                let Tag {
                    attributes,
                    contents,
                    ..
                } = self;
                attributes
                    .iter_mut()
                    .filter(|attr| attr.name == name)
                    .chain(
                        contents
                            .tags_mut()
                            .filter(|tag| tag.is_attribute && tag.name == name),
                    )
                    .collect()
            }
            Target::Content => self.contents.tags_mut().filter(|tag| tag.name == name).collect(),
        }
    }
}

/// Builds `a > b > c` for steps `a.b.c`, nesting each link on the side the
/// following step addresses.
fn build_chain(steps: &[Step]) -> Tag {
    let mut links = steps.iter().rev();
    let Some(innermost) = links.next() else {
        unreachable!("chain needs at least one step");
    };
    let mut child = Tag::new(innermost.name.as_str());
    let mut child_target = innermost.target;
    for step in links {
        let mut parent = Tag::new(step.name.as_str());
        match child_target {
            Target::Attribute => parent.attributes_mut().add([child]),
            Target::Content => parent.contents.push(child),
        }
        child = parent;
        child_target = step.target;
    }
    child
}

impl Default for Tag {
    fn default() -> Self {
        Self::new("unnamed")
    }
}

impl Clone for Tag {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            is_quoted: self.is_quoted,
            is_attribute: self.is_attribute,
            is_literal: self.is_literal,
            attributes: self.attributes.clone(),
            contents: self.contents.clone(),
            layout: self.layout.clone(),
            id: TagId::next(),
        }
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.is_quoted == other.is_quoted
            && self.is_attribute == other.is_attribute
            && self.is_literal == other.is_literal
            && self.attributes == other.attributes
            && self.contents == other.contents
            && self.layout == other.layout
    }
}

impl TagRead for Tag {
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

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.print())
    }
}

impl FromStr for Tag {
    type Err = TagError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text)
    }
}

/// Shorthand for [`Tag::new`].
pub fn t(name: impl Into<String>) -> Tag {
    Tag::new(name)
}

/// Shorthand for a literal tag.
pub fn tl(name: impl Into<String>) -> Tag {
    let mut tag = Tag::new(name);
    tag.is_literal = true;
    tag
}
