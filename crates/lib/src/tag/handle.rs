//! Handles returned by singular path lookups.
//!
//! A lookup that finds its target hands out an attached handle wrapping the
//! existing tag. A lookup that misses hands out a deferred one: it owns a fresh
//! tag named after the last segment and remembers the parent it was looked up
//! from together with the steps taken. Reads see the fresh tag. The first write
//! attaches it, creating every missing level between the parent and the tag,
//! and from then on the handle is an ordinary `&mut Tag`.
//!
//! The handle mutably borrows the parent, so the tree cannot change between the
//! failed lookup and the attach.

use std::ops::Deref;

use chrono::{DateTime, TimeZone};

use super::{Content, Tag, TagPath, TagValue, path::Step};

/// Result of [`Tag::attr`] or [`Tag::tag`].
///
/// Dereferences to the tag for reading. Writing methods consume the handle,
/// attach it if needed and return the attached tag for further edits.
#[derive(Debug)]
pub struct TagHandle<'a> {
    state: State<'a>,
}

#[derive(Debug)]
enum State<'a> {
    Attached(&'a mut Tag),
    Detached {
        parent: &'a mut Tag,
        steps: Vec<Step>,
        tag: Tag,
    },
    /// Only observable while [`TagHandle::get_mut`] swaps states
    Attaching,
}

impl<'a> TagHandle<'a> {
    pub(crate) fn attached(tag: &'a mut Tag) -> Self {
        Self {
            state: State::Attached(tag),
        }
    }

    pub(crate) fn detached(parent: &'a mut Tag, steps: Vec<Step>) -> Self {
        let Some(last) = steps.last() else {
            return Self::attached(parent);
        };
        let mut tag = Tag::new(last.name.as_str());
        tag.is_attribute = last.target == super::Target::Attribute;
        Self {
            state: State::Detached { parent, steps, tag },
        }
    }

    /// Returns true until the first write attaches the tag.
    pub fn is_detached(&self) -> bool {
        matches!(self.state, State::Detached { .. })
    }

    /// Continues the lookup through attributes.
    ///
    /// On a deferred handle the steps are recorded; nothing is created until a
    /// write.
    pub fn attr(self, path: impl Into<TagPath>) -> TagHandle<'a> {
        self.extend(path.into().steps(super::Target::Attribute))
    }

    /// Continues the lookup through contents. See [`TagHandle::attr`].
    pub fn tag(self, path: impl Into<TagPath>) -> TagHandle<'a> {
        self.extend(path.into().steps(super::Target::Content))
    }

    fn extend(self, more: Vec<Step>) -> TagHandle<'a> {
        match self.state {
            State::Attached(tag) => tag.lookup_steps(more),
            State::Detached {
                parent,
                mut steps,
                tag,
            } => {
                if more.is_empty() {
                    return Self {
                        state: State::Detached { parent, steps, tag },
                    };
                }
                steps.extend(more);
                Self::detached(parent, steps)
            }
            State::Attaching => unreachable!("handle observed mid-attach"),
        }
    }

    /// Attaches if needed and returns the tag for editing.
    pub fn get_mut(&mut self) -> &mut Tag {
        if matches!(self.state, State::Detached { .. }) {
            let State::Detached { parent, steps, tag } =
                std::mem::replace(&mut self.state, State::Attaching)
            else {
                unreachable!("state checked above");
            };
            self.state = State::Attached(attach(parent, steps, tag));
        }
        match &mut self.state {
            State::Attached(tag) => &mut **tag,
            _ => unreachable!("handle attached above"),
        }
    }

    /// Attaches if needed and returns the tag with the lifetime of the lookup.
    pub fn into_mut(self) -> &'a mut Tag {
        match self.state {
            State::Attached(tag) => tag,
            State::Detached { parent, steps, tag } => attach(parent, steps, tag),
            State::Attaching => unreachable!("handle observed mid-attach"),
        }
    }

    pub fn set_text(self, text: impl Into<String>) -> &'a mut Tag {
        self.into_mut().set_text(text)
    }

    pub fn set_contents<C: Into<Content>>(self, contents: impl IntoIterator<Item = C>) -> &'a mut Tag {
        self.into_mut().set_contents(contents)
    }

    pub fn add_contents<C: Into<Content>>(self, contents: impl IntoIterator<Item = C>) -> &'a mut Tag {
        self.into_mut().add_contents(contents)
    }

    pub fn set_attributes(self, attributes: impl IntoIterator<Item = Tag>) -> &'a mut Tag {
        self.into_mut().set_attributes(attributes)
    }

    pub fn set_attr(
        self,
        path: impl Into<TagPath>,
        attributes: impl IntoIterator<Item = Tag>,
    ) -> &'a mut Tag {
        self.into_mut().set_attr(path, attributes)
    }

    pub fn set_tag(self, path: impl Into<TagPath>, tags: impl IntoIterator<Item = Tag>) -> &'a mut Tag {
        self.into_mut().set_tag(path, tags)
    }

    /// See [`Tag::from_value`].
    pub fn from_value(self, value: impl Into<TagValue>) -> &'a mut Tag {
        self.into_mut().from_value(value)
    }

    pub fn from_bool(self, value: bool) -> &'a mut Tag {
        self.into_mut().from_bool(value)
    }

    pub fn from_number(self, value: impl Into<f64>) -> &'a mut Tag {
        self.into_mut().from_number(value)
    }

    pub fn from_date<Tz: TimeZone>(self, date: &DateTime<Tz>) -> &'a mut Tag {
        self.into_mut().from_date(date)
    }

    pub fn from_literal(self, literal: impl Into<String>) -> &'a mut Tag {
        self.into_mut().from_literal(literal)
    }
}

impl Deref for TagHandle<'_> {
    type Target = Tag;

    fn deref(&self) -> &Tag {
        match &self.state {
            State::Attached(tag) => &**tag,
            State::Detached { tag, .. } => tag,
            State::Attaching => unreachable!("handle observed mid-attach"),
        }
    }
}

/// Splices a deferred tag into `parent` along `steps`.
fn attach<'a>(parent: &'a mut Tag, steps: Vec<Step>, tag: Tag) -> &'a mut Tag {
    let Some((last, prefix)) = steps.split_last() else {
        unreachable!("deferred handle without steps");
    };
    tracing::debug!(name = %last.name, depth = steps.len(), "Attaching deferred tag");

    let owner = parent.walk_or_create(prefix);
    owner.reconcile(last.target, [tag]);
    let Some(location) = owner.locate(last.target, &last.name) else {
        unreachable!("deferred tag {} was just reconciled", last.name);
    };
    owner.entry_mut(location)
}
