//! The boundary between the tree model and a concrete text format.
//!
//! The tree model never reads or writes text itself. A [`Syntax`] turns text
//! into the plain [`TagJson`] projection and back, and normalizes projections
//! before they are compared. [`JsonSyntax`] is the built-in implementation and
//! is what `Display`, `FromStr` and [`TagRead::print`](crate::TagRead::print)
//! use.

use crate::tag::{ContentJson, TagError, TagJson};

/// Parser and printer for a single tag.
pub trait Syntax {
    /// Parses text holding exactly one tag.
    ///
    /// Fails with [`TagError::InvalidTagText`] when the text is not a tag.
    fn parse_tag(&self, text: &str) -> Result<TagJson, TagError>;

    /// Prints the canonical text of `tag`.
    ///
    /// Must be a left inverse of [`Syntax::parse_tag`] up to formatting.
    fn print_tag(&self, tag: &TagJson) -> String;

    /// Strips details that do not survive a print/parse round trip.
    fn shake_tag(&self, tag: &TagJson) -> TagJson;
}

/// Tags as JSON documents.
///
/// Printing shakes first: empty text runs are dropped and adjacent text runs
/// are merged, at every level.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSyntax {
    pretty: bool,
}

impl JsonSyntax {
    /// Prints indented JSON instead of a single line.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl Syntax for JsonSyntax {
    fn parse_tag(&self, text: &str) -> Result<TagJson, TagError> {
        serde_json::from_str(text).map_err(|err| TagError::InvalidTagText {
            reason: err.to_string(),
        })
    }

    fn print_tag(&self, tag: &TagJson) -> String {
        let shaken = self.shake_tag(tag);
        let printed = if self.pretty {
            serde_json::to_string_pretty(&shaken)
        } else {
            serde_json::to_string(&shaken)
        };
        match printed {
            Ok(text) => text,
            Err(err) => unreachable!("tag projections always serialize: {err}"),
        }
    }

    fn shake_tag(&self, tag: &TagJson) -> TagJson {
        let mut contents: Vec<ContentJson> = Vec::with_capacity(tag.contents.len());
        for content in &tag.contents {
            match content {
                ContentJson::Text(text) if text.is_empty() => {}
                ContentJson::Text(text) => match contents.last_mut() {
                    Some(ContentJson::Text(last)) => last.push_str(text),
                    _ => contents.push(ContentJson::Text(text.clone())),
                },
                ContentJson::Tag(nested) => contents.push(ContentJson::Tag(self.shake_tag(nested))),
            }
        }
        TagJson {
            is_quoted: tag.is_quoted,
            is_attribute: tag.is_attribute,
            name: tag.name.clone(),
            attributes: tag.attributes.iter().map(|attr| self.shake_tag(attr)).collect(),
            is_literal: tag.is_literal,
            contents,
            layout: tag.layout.clone(),
        }
    }
}
