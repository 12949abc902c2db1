//! Error types for tag operations.
//!
//! Most tree operations never fail: lookups return deferred handles, deletes of
//! missing entries are no-ops and value coercions fall back to defaults. The
//! errors here cover the few places where input is rejected outright, namely
//! constructing a tag from text or JSON that does not describe a single tag.

use thiserror::Error;

/// Structured error types for tag operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum TagError {
    /// The text handed to a tag constructor is not a single valid tag
    #[error("expected tag in tagdown string: {reason}")]
    InvalidTagText { reason: String },

    /// A path could not be interpreted
    #[error("Invalid tag path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// The JSON projection of a tag could not be produced or consumed
    #[error("Tag JSON conversion failed: {reason}")]
    Json { reason: String },
}

impl TagError {
    /// Check if this error came from rejecting textual input
    pub fn is_parse_error(&self) -> bool {
        matches!(self, TagError::InvalidTagText { .. } | TagError::Json { .. })
    }

    /// Check if this error is related to path handling
    pub fn is_path_error(&self) -> bool {
        matches!(self, TagError::InvalidPath { .. })
    }

    /// Get the path if this is a path-related error
    pub fn path(&self) -> Option<&str> {
        match self {
            TagError::InvalidPath { path, .. } => Some(path),
            _ => None,
        }
    }
}

// Conversion from TagError to the main Error type
impl From<TagError> for crate::Error {
    fn from(err: TagError) -> Self {
        crate::Error::Tag(err)
    }
}
