//! Read-only commands: show, get and truncate.

use tagdown::{JsonSyntax, Syntax, TagRead};

use super::{load, parse_path};
use crate::cli::{GetArgs, ShowArgs, TruncateArgs};
use crate::output::{OutputFormat, print_table};

/// Run the show command
pub fn show(args: &ShowArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load(&args.file)?;
    let printed = match format {
        OutputFormat::Human => JsonSyntax::pretty().print_tag(&doc.to_json()),
        OutputFormat::Json => doc.print(),
    };
    println!("{printed}");
    Ok(())
}

/// Run the get command
pub fn get(args: &GetArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load(&args.target.file)?;
    let path = parse_path(&args.target)?;

    if args.all {
        let found = if args.target.attr {
            doc.attrs(&path)
        } else {
            doc.tags(&path)
        };
        match format {
            OutputFormat::Human => {
                if found.is_empty() {
                    println!("No tags found at {path}.");
                    return Ok(());
                }
                let rows: Vec<Vec<String>> = found
                    .iter()
                    .enumerate()
                    .map(|(index, tag)| vec![index.to_string(), tag.name.clone(), tag.text().to_string()])
                    .collect();
                print_table(&["#", "NAME", "TEXT"], &rows);
            }
            OutputFormat::Json => {
                let entries: Vec<_> = found
                    .iter()
                    .map(|tag| serde_json::json!({ "name": tag.name, "text": tag.text() }))
                    .collect();
                println!("{}", serde_json::to_string(&entries)?);
            }
        }
        return Ok(());
    }

    let found = if args.target.attr {
        doc.find_attr(&path)
    } else {
        doc.find_tag(&path)
    };
    let Some(tag) = found else {
        return Err(format!("no tag at {path}").into());
    };
    match format {
        OutputFormat::Human => println!("{}", tag.text()),
        OutputFormat::Json => {
            let value = serde_json::json!({
                "name": tag.name,
                "text": tag.text(),
                "number": tag.to_number(),
                "boolean": tag.to_boolean(),
            });
            println!("{}", serde_json::to_string(&value)?);
        }
    }
    Ok(())
}

/// Run the truncate command
pub fn truncate(args: &TruncateArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load(&args.target.file)?;
    let path = parse_path(&args.target)?;
    let found = if args.target.attr {
        doc.find_attr(&path)
    } else {
        doc.find_tag(&path)
    };
    let Some(tag) = found else {
        return Err(format!("no tag at {path}").into());
    };

    let truncated = tag.truncate(args.length);
    match format {
        OutputFormat::Human => println!("{truncated}"),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(&serde_json::json!({ "text": truncated }))?)
        }
    }
    Ok(())
}
