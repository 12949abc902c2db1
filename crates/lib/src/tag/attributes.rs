//! Attribute storage and the facade that spans both storage locations.
//!
//! An attribute of a tag lives either in the tag's dedicated attribute list or
//! inline in its content list as a tag flagged `is_attribute`. Callers should
//! not care which: [`AttributeSet`] and [`AttributeView`] probe the attribute
//! list first, then the attribute-flagged contents, and writes go through the
//! same two-location contract. Fresh attributes always land in the attribute
//! list, never inline.

use std::{collections::HashMap, ops::Deref};

use super::{
    Tag, TagId, TagRead, TagValue,
    list::{Content, Contents},
};

/// Where an attribute was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Slot {
    /// Index into the attribute list
    List(usize),
    /// Index into the content list
    Inline(usize),
}

/// The dedicated attribute list of a tag.
///
/// On its own this only knows about the attribute-list side; use
/// [`Tag::attributes_mut`] or [`TagRead::attribute_view`] for lookups that also
/// see inline attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    items: Vec<Tag>,
}

impl Attributes {
    /// Creates an empty attribute list
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every entry, flagging each new entry as an attribute.
    pub fn splice_all(&mut self, attributes: impl IntoIterator<Item = Tag>) {
        self.items = attributes.into_iter().map(flag_attribute).collect();
    }

    /// Iterates mutably over the entries.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Tag> {
        self.items.iter_mut()
    }

    pub(crate) fn items_mut(&mut self) -> &mut Vec<Tag> {
        &mut self.items
    }
}

impl Deref for Attributes {
    type Target = [Tag];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl FromIterator<Tag> for Attributes {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(flag_attribute).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for Attributes {
    type Item = Tag;
    type IntoIter = std::vec::IntoIter<Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

fn flag_attribute(mut tag: Tag) -> Tag {
    tag.is_attribute = true;
    tag
}

/// Builds attributes from `(name, value)` pairs, skipping absent values.
///
/// ```
/// use tagdown::{TagRead, TagValue, t, tag::attributes_from_pairs};
///
/// let attrs = attributes_from_pairs([
///     ("id", Some(TagValue::from("intro"))),
///     ("hidden", None),
///     ("level", Some(TagValue::from(2))),
/// ]);
/// assert_eq!(attrs.len(), 2);
/// assert_eq!(attrs[1].text(), "2");
/// ```
pub fn attributes_from_pairs<K, I>(pairs: I) -> Vec<Tag>
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Option<TagValue>)>,
{
    pairs
        .into_iter()
        .filter_map(|(name, value)| {
            let value = value?;
            let mut attr = Tag::new(name);
            attr.is_attribute = true;
            attr.from_value(value);
            Some(attr)
        })
        .collect()
}

/// Mutable facade over both attribute storage locations of one tag.
///
/// Obtained from [`Tag::attributes_mut`].
#[derive(Debug)]
pub struct AttributeSet<'a> {
    attributes: &'a mut Attributes,
    contents: &'a mut Contents,
}

impl<'a> AttributeSet<'a> {
    pub(crate) fn new(attributes: &'a mut Attributes, contents: &'a mut Contents) -> Self {
        Self {
            attributes,
            contents,
        }
    }

    fn view(&self) -> AttributeView<'_, Tag> {
        AttributeView::new(self.attributes, self.contents)
    }

    /// Returns the first attribute named `name`, list entries first.
    pub fn get(&self, name: &str) -> Option<&Tag> {
        let slot = self.view().slot(name)?;
        Some(self.slot_ref(slot))
    }

    /// Returns the first attribute named `name`, mutably.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Tag> {
        let slot = self.view().slot(name)?;
        Some(self.slot_mut(slot))
    }

    /// Returns every attribute named `name`: list entries, then inline ones.
    pub fn get_all(&self, name: &str) -> Vec<&Tag> {
        self.view().get_all(name)
    }

    /// Reconciles `attributes` against both storage locations.
    ///
    /// Each incoming attribute overwrites the first not-yet-overwritten
    /// same-named entry, scanning the attribute list before the inline
    /// attributes, and takes over that entry's position. Attributes without a
    /// match are appended to the attribute list. Unconsumed same-named entries
    /// in either location are removed afterwards.
    pub fn set(&mut self, attributes: impl IntoIterator<Item = Tag>) {
        // Per name: (list mark, inline mark), each just past the last overwrite.
        let mut marks: HashMap<String, (usize, usize)> = HashMap::new();
        let mut appended = Vec::new();
        let mut overwritten = 0usize;

        for attr in attributes.into_iter().map(flag_attribute) {
            let (list_mark, inline_mark) = marks.get(&attr.name).copied().unwrap_or((0, 0));
            let in_list = self.attributes.items[list_mark..]
                .iter()
                .position(|existing| existing.name == attr.name)
                .map(|offset| list_mark + offset);
            if let Some(index) = in_list {
                marks.insert(attr.name.clone(), (index + 1, inline_mark));
                self.attributes.items[index] = attr;
                overwritten += 1;
                continue;
            }
            let inline = self.contents[inline_mark..]
                .iter()
                .position(|content| is_inline_attribute(content, &attr.name))
                .map(|offset| inline_mark + offset);
            match inline {
                Some(index) => {
                    // The whole attribute list is consumed for this name once
                    // matching moves inline.
                    let list_end = self.attributes.items.len();
                    marks.insert(attr.name.clone(), (list_end, index + 1));
                    self.contents.items_mut()[index] = Content::Tag(attr);
                    overwritten += 1;
                }
                None => appended.push(attr),
            }
        }

        let before = self.attributes.items.len() + self.contents.len();
        let mut index = 0;
        self.attributes.items.retain(|existing| {
            let keep = marks
                .get(&existing.name)
                .is_none_or(|&(list_mark, _)| index < list_mark);
            index += 1;
            keep
        });
        let mut index = 0;
        self.contents.items_mut().retain(|content| {
            let keep = match content {
                Content::Tag(tag) if tag.is_attribute => marks
                    .get(&tag.name)
                    .is_none_or(|&(_, inline_mark)| index < inline_mark),
                _ => true,
            };
            index += 1;
            keep
        });
        let removed = before - self.attributes.items.len() - self.contents.len();

        tracing::trace!(
            overwritten,
            appended = appended.len(),
            removed,
            "Reconciled attributes"
        );
        self.attributes.items.extend(appended);
    }

    /// Appends `attributes` to the attribute list.
    pub fn add(&mut self, attributes: impl IntoIterator<Item = Tag>) {
        self.attributes
            .items
            .extend(attributes.into_iter().map(flag_attribute));
    }

    /// Replaces the attribute with identity `search` by `replacement`.
    ///
    /// The attribute list is probed before the inline attributes. Returns
    /// whether a matching attribute was found.
    pub fn replace(&mut self, search: TagId, replacement: Tag) -> bool {
        let replacement = flag_attribute(replacement);
        if let Some(index) = self.attributes.iter().position(|attr| attr.id() == search) {
            self.attributes.items[index] = replacement;
            return true;
        }
        let inline = self.contents.iter().position(
            |content| matches!(content, Content::Tag(tag) if tag.is_attribute && tag.id() == search),
        );
        match inline {
            Some(index) => {
                self.contents.items_mut()[index] = Content::Tag(replacement);
                true
            }
            None => false,
        }
    }

    /// Removes the first attribute named `name`, from whichever location holds it.
    pub fn delete(&mut self, name: &str) -> bool {
        match self.view().slot(name) {
            Some(Slot::List(index)) => {
                self.attributes.items.remove(index);
                true
            }
            Some(Slot::Inline(index)) => {
                self.contents.items_mut().remove(index);
                true
            }
            None => false,
        }
    }

    /// Removes every attribute named `name` from both locations.
    pub fn delete_all(&mut self, name: &str) -> bool {
        let before = self.attributes.items.len() + self.contents.len();
        self.attributes.items.retain(|attr| attr.name != name);
        self.contents
            .items_mut()
            .retain(|content| !is_inline_attribute(content, name));
        before != self.attributes.items.len() + self.contents.len()
    }

    /// Moves the attributes named in `names` to the top of the attribute list.
    ///
    /// The first list entry for each name is placed in the order given; names
    /// without an entry are skipped. Everything else keeps its relative order.
    /// Inline attributes are not moved.
    pub fn place_at_top(&mut self, names: &[&str]) {
        let mut picked: Vec<usize> = Vec::with_capacity(names.len());
        for (position, name) in names.iter().enumerate() {
            if names[..position].contains(name) {
                continue;
            }
            if let Some(index) = self.attributes.iter().position(|attr| attr.name == *name) {
                picked.push(index);
            }
        }

        // Already a contiguous prefix in the requested order.
        if picked.iter().enumerate().all(|(slot, &index)| slot == index) {
            return;
        }

        let mut taken: Vec<Option<Tag>> = Vec::with_capacity(picked.len());
        let mut remaining = Vec::with_capacity(self.attributes.items.len());
        let mut slots: Vec<Option<Tag>> = self.attributes.items.drain(..).map(Some).collect();
        for &index in &picked {
            taken.push(slots[index].take());
        }
        remaining.extend(slots.into_iter().flatten());
        self.attributes.items = taken.into_iter().flatten().chain(remaining).collect();
    }

    /// Number of attributes across both locations
    pub fn len(&self) -> usize {
        self.view().len()
    }

    /// Returns true if there are no attributes in either location
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn slot(&self, name: &str) -> Option<Slot> {
        self.view().slot(name)
    }

    fn slot_ref(&self, slot: Slot) -> &Tag {
        match slot {
            Slot::List(index) => &self.attributes.items[index],
            Slot::Inline(index) => match &self.contents[index] {
                Content::Tag(tag) => tag,
                Content::Text(_) => unreachable!("inline attribute slot points at text"),
            },
        }
    }

    pub(crate) fn slot_mut(&mut self, slot: Slot) -> &mut Tag {
        slot_mut(self.attributes, self.contents, slot)
    }

    pub(crate) fn into_slot_mut(self, slot: Slot) -> &'a mut Tag {
        slot_mut(self.attributes, self.contents, slot)
    }
}

fn slot_mut<'t>(attributes: &'t mut Attributes, contents: &'t mut Contents, slot: Slot) -> &'t mut Tag {
    match slot {
        Slot::List(index) => &mut attributes.items[index],
        Slot::Inline(index) => match &mut contents.items_mut()[index] {
            Content::Tag(tag) => tag,
            Content::Text(_) => unreachable!("inline attribute slot points at text"),
        },
    }
}

fn is_inline_attribute<T: TagRead>(content: &Content<T>, name: &str) -> bool {
    matches!(content, Content::Tag(tag) if tag.is_attribute() && tag.name() == name)
}

/// Read-only facade over both attribute storage locations.
///
/// Shared by mutable tags and frozen mirrors.
#[derive(Debug)]
pub struct AttributeView<'a, T> {
    attributes: &'a [T],
    contents: &'a [Content<T>],
}

impl<T> Clone for AttributeView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for AttributeView<'_, T> {}

impl<'a, T: TagRead> AttributeView<'a, T> {
    pub(crate) fn new(attributes: &'a [T], contents: &'a [Content<T>]) -> Self {
        Self {
            attributes,
            contents,
        }
    }

    /// Returns the first attribute named `name`, list entries first.
    pub fn get(&self, name: &str) -> Option<&'a T> {
        self.iter().find(|attr| attr.name() == name)
    }

    /// Returns every attribute named `name`: list entries, then inline ones.
    pub fn get_all(&self, name: &str) -> Vec<&'a T> {
        self.iter().filter(|attr| attr.name() == name).collect()
    }

    /// Iterates over list entries followed by inline attributes.
    pub fn iter(&self) -> impl Iterator<Item = &'a T> + use<'a, T> {
        self.attributes.iter().chain(
            self.contents
                .iter()
                .filter_map(Content::as_tag)
                .filter(|tag| tag.is_attribute()),
        )
    }

    /// Number of attributes across both locations
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Returns true if there are no attributes in either location
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub(crate) fn slot(&self, name: &str) -> Option<Slot> {
        if let Some(index) = self.attributes.iter().position(|attr| attr.name() == name) {
            return Some(Slot::List(index));
        }
        self.contents
            .iter()
            .position(|content| is_inline_attribute(content, name))
            .map(Slot::Inline)
    }
}
