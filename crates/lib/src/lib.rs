//!
//! tagdown: an in-memory, mutable tree model for tagdown documents.
//! This library provides the node type and the editing engine around it; turning raw text
//! into a tree and back is delegated to a [`Syntax`] implementation.
//!
//! ## Core Concepts
//!
//! * **Tags (`tag::Tag`)**: Named elements carrying an ordered attribute list and an ordered
//!   content list that mixes text runs and nested tags.
//! * **Attributes**: Tags marked as metadata of their owner. They live either in the owner's
//!   attribute list or inline among its contents; [`tag::AttributeSet`] hides that duality.
//! * **Paths (`tag::TagPath`)**: Name-segment navigation (`"head.meta.title"`). Singular
//!   lookups never fail: a miss yields a deferred [`tag::TagHandle`] that attaches itself to
//!   the tree on its first write.
//! * **Set reconciliation**: Bulk assignment overwrites same-named entries in place, appends
//!   new ones and drops excess duplicates without reordering survivors.
//! * **Frozen mirrors (`tag::FrozenTag`)**: Deep, read-only snapshots that can be shared
//!   freely between readers.
//!
//! ```
//! use tagdown::{TagRead, t};
//!
//! let mut doc = t("doc");
//! doc.tag("head.title").set_text("Hello");
//! doc.attr("lang").from_value("en");
//!
//! assert_eq!(doc.find_tag("head.title").map(|title| title.text()), Some("Hello"));
//! assert_eq!(doc.find_attr("lang").map(|lang| lang.text()), Some("en"));
//! ```

pub mod clock;
pub mod syntax;
pub mod tag;

pub use clock::{Clock, SystemClock};
#[cfg(any(test, feature = "testing"))]
pub use clock::FixedClock;
pub use syntax::{JsonSyntax, Syntax};
pub use tag::{
    Content, ContentJson, FrozenTag, Tag, TagHandle, TagId, TagJson, TagPath, TagRead, TagValue, t,
    tl,
};

/// Result type used throughout the tagdown library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the tagdown library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured tag errors from the tag module
    #[error(transparent)]
    Tag(tag::TagError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Tag(_) => "tag",
            Error::Io(_) => "io",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error indicates rejected textual or JSON input.
    pub fn is_parse_error(&self) -> bool {
        match self {
            Error::Tag(tag_err) => tag_err.is_parse_error(),
            Error::Serialize(_) => true,
            Error::Io(_) => false,
        }
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        matches!(self, Error::Io(_))
    }
}
