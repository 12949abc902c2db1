//! Commands that change a document and write it back.

use super::{load, parse_path, save};
use crate::cli::{DeleteArgs, SetArgs};
use crate::output::OutputFormat;

/// Run the set command
pub fn set(args: &SetArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let mut doc = load(&args.target.file)?;
    let path = parse_path(&args.target)?;

    let handle = if args.target.attr {
        doc.attr(&path)
    } else {
        doc.tag(&path)
    };
    let created = handle.is_detached();
    let tag = if args.literal {
        handle.from_literal(args.value.as_str())
    } else {
        handle.from_value(args.value.as_str())
    };
    let name = tag.name.clone();
    save(&args.target.file, &doc)?;

    match format {
        OutputFormat::Human => {
            let verb = if created { "Created" } else { "Updated" };
            println!("{verb} {path}");
        }
        OutputFormat::Json => {
            let value = serde_json::json!({
                "path": path.to_string(),
                "name": name,
                "created": created,
            });
            println!("{}", serde_json::to_string(&value)?);
        }
    }
    Ok(())
}

/// Run the delete command
pub fn delete(args: &DeleteArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let mut doc = load(&args.target.file)?;
    let path = parse_path(&args.target)?;

    let removed = match (args.target.attr, args.all) {
        (true, true) => doc.delete_attrs(&path),
        (true, false) => doc.delete_attr(&path),
        (false, true) => doc.delete_tags(&path),
        (false, false) => doc.delete_tag(&path),
    };
    if removed {
        save(&args.target.file, &doc)?;
    }

    match format {
        OutputFormat::Human => {
            if removed {
                println!("Deleted {path}");
            } else {
                println!("Nothing to delete at {path}.");
            }
        }
        OutputFormat::Json => {
            let value = serde_json::json!({ "path": path.to_string(), "removed": removed });
            println!("{}", serde_json::to_string(&value)?);
        }
    }
    Ok(())
}
