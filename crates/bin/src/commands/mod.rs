//! Subcommand implementations and the document file helpers they share.

pub mod edit;
pub mod read;

use std::{fs, path::Path};

use tagdown::{JsonSyntax, Syntax, Tag, TagPath, TagRead};

use crate::cli::Target;

/// Reads and parses a document file.
pub fn load(file: &Path) -> tagdown::Result<Tag> {
    let text = fs::read_to_string(file)?;
    let tag = Tag::parse(&text)?;
    tracing::debug!(file = %file.display(), root = %tag.name, "Loaded document");
    Ok(tag)
}

/// Writes a document back in its pretty canonical form.
pub fn save(file: &Path, tag: &Tag) -> tagdown::Result<()> {
    fs::write(file, JsonSyntax::pretty().print_tag(&tag.to_json()))?;
    tracing::info!(file = %file.display(), "Saved document");
    Ok(())
}

/// Parses the user supplied path, rejecting empty segments.
pub fn parse_path(target: &Target) -> tagdown::Result<TagPath> {
    Ok(TagPath::strict(&target.path)?)
}
