//! CLI argument definitions for the tagdown binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

/// Inspect and edit tagdown documents stored as JSON
#[derive(Parser, Debug)]
#[command(name = "tagdown")]
#[command(about = "tagdown: read and edit tag trees from the command line")]
#[command(version)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human", env = "TAGDOWN_FORMAT")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the canonical rendition of a document
    Show(ShowArgs),
    /// Print the text of the tag(s) at a path
    Get(GetArgs),
    /// Write a text value at a path, creating missing levels
    Set(SetArgs),
    /// Delete the tag(s) at a path
    Delete(DeleteArgs),
    /// Print the truncated text of the tag at a path
    Truncate(TruncateArgs),
}

/// Document file and the path inside it
#[derive(clap::Args, Debug)]
pub struct Target {
    /// Document file
    pub file: PathBuf,

    /// Dotted path of tag names; empty addresses the root
    pub path: String,

    /// Follow the path through attributes instead of contents
    #[arg(long)]
    pub attr: bool,
}

/// Arguments for the show command
#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Document file
    pub file: PathBuf,
}

/// Arguments for the get command
#[derive(clap::Args, Debug)]
pub struct GetArgs {
    #[command(flatten)]
    pub target: Target,

    /// Collect every match, fanning out over same-named tags
    #[arg(long)]
    pub all: bool,
}

/// Arguments for the set command
#[derive(clap::Args, Debug)]
pub struct SetArgs {
    #[command(flatten)]
    pub target: Target,

    /// Text to write
    pub value: String,

    /// Mark the tag literal
    #[arg(long)]
    pub literal: bool,
}

/// Arguments for the delete command
#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    #[command(flatten)]
    pub target: Target,

    /// Delete under every parent the path fans out to
    #[arg(long)]
    pub all: bool,
}

/// Arguments for the truncate command
#[derive(clap::Args, Debug)]
pub struct TruncateArgs {
    #[command(flatten)]
    pub target: Target,

    /// Maximum length in characters, ellipsis included
    #[arg(allow_negative_numbers = true)]
    pub length: i64,
}
