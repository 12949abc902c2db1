//! Name paths for navigating tag trees.
//!
//! A [`TagPath`] is an ordered list of tag names; each segment consumes one
//! level of the tree. Paths are plain name navigation: a segment matches any
//! child with that name, with the first match winning for singular lookups.
//!
//! # Usage
//!
//! ```rust
//! use tagdown::TagPath;
//!
//! // Dotted strings are split and normalized
//! let path = TagPath::from("head.meta..title.");
//! assert_eq!(path.segments(), ["head", "meta", "title"]);
//!
//! // Slices are taken verbatim, so names may contain dots
//! let path = TagPath::from(["v1.2", "notes"]);
//! assert_eq!(path.len(), 2);
//! ```

use std::fmt;

use super::errors::TagError;

/// Which of a tag's two lists a path step addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// The attribute side: the attribute list plus attribute-flagged contents
    Attribute,
    /// The content list
    Content,
}

/// One navigation step of a deferred lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Step {
    pub(crate) target: Target,
    pub(crate) name: String,
}

impl Step {
    pub(crate) fn new(target: Target, name: impl Into<String>) -> Self {
        Self {
            target,
            name: name.into(),
        }
    }
}

/// An owned path of tag names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TagPath {
    segments: Vec<String>,
}

impl TagPath {
    /// Creates a new empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a dotted path, rejecting empty segments instead of dropping them.
    ///
    /// Use this for user supplied paths where `"a..b"` is more likely a typo
    /// than an intentional shorthand.
    pub fn strict(path: &str) -> Result<Self, TagError> {
        if path.is_empty() {
            return Ok(Self::new());
        }
        let segments: Vec<String> = path.split('.').map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(TagError::InvalidPath {
                path: path.to_string(),
                reason: "path segments cannot be empty".to_string(),
            });
        }
        Ok(Self { segments })
    }

    /// Adds a single segment, taken verbatim.
    pub fn push(mut self, name: impl Into<String>) -> Self {
        self.segments.push(name.into());
        self
    }

    /// Returns the segments in order.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns the number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` if the path addresses the tag itself.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Splits off the last segment, returning the parent path and the name.
    pub fn split_last(&self) -> Option<(&[String], &str)> {
        self.segments
            .split_last()
            .map(|(last, parent)| (parent, last.as_str()))
    }

    /// Returns the last segment, or `None` if empty.
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    pub(crate) fn steps(&self, target: Target) -> Vec<Step> {
        self.segments
            .iter()
            .map(|name| Step::new(target, name.as_str()))
            .collect()
    }
}

impl From<&str> for TagPath {
    fn from(path: &str) -> Self {
        Self {
            segments: path
                .split('.')
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

impl From<&String> for TagPath {
    fn from(path: &String) -> Self {
        Self::from(path.as_str())
    }
}

impl From<String> for TagPath {
    fn from(path: String) -> Self {
        Self::from(path.as_str())
    }
}

impl From<&[&str]> for TagPath {
    fn from(segments: &[&str]) -> Self {
        Self {
            segments: segments.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl<const N: usize> From<[&str; N]> for TagPath {
    fn from(segments: [&str; N]) -> Self {
        Self::from(&segments[..])
    }
}

impl From<Vec<String>> for TagPath {
    fn from(segments: Vec<String>) -> Self {
        Self { segments }
    }
}

impl From<&[String]> for TagPath {
    fn from(segments: &[String]) -> Self {
        Self {
            segments: segments.to_vec(),
        }
    }
}

impl From<&TagPath> for TagPath {
    fn from(path: &TagPath) -> Self {
        path.clone()
    }
}

impl fmt::Display for TagPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            write!(f, "(empty path)")
        } else {
            write!(f, "{}", self.segments.join("."))
        }
    }
}
