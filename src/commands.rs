//! Command handlers for the `novamind` CLI. Each handler performs one store
//! operation and prints the outcome.

use crate::args::{ArgParser, NoteFields};
use crate::config::NoteDefaults;
use crate::error::StoreError;
use crate::formatting::{FormatContext, terminal_columns, truncate_with_ellipsis};
use crate::note::Note;
use crate::store::NoteStore;
use std::collections::BTreeMap;
use std::env;
use std::error::Error;
use std::fs;
use std::process::{Command, Stdio};
use tempfile::Builder;

pub(crate) fn print_help() {
    println!(
        "\
NovaMind notes
Usage:
  novamind new <title> [body...] [-t <tag>]... [--tags \"a, b\"]
                                  Create and save a note
  novamind list [-t <tag>]... [-s <text>]
                                  List notes sorted by id
  novamind view <id>              Show a note's metadata and body
  novamind edit <id> [--title T] [--body B] [--tags \"a, b\"] [--type T]
                [--status S] [--responsible R]
                                  Change fields; with no flags, edit the body in $EDITOR
  novamind delete <id>...         Delete notes and their files
  novamind tags                   List every tag with its note count
  novamind path                   Show the notes directory
  novamind help                   Show this message

Environment:
  NOVAMIND_DIR                    Override notes directory (default: ~/.novamind/notes_data)
  NOVAMIND_LOG                    Log filter (default: warn)
  NO_COLOR                        Disable colored output
"
    );
}

pub(crate) fn new_note(
    args: Vec<String>,
    store: &mut NoteStore,
) -> Result<(), Box<dyn Error>> {
    let mut fields = NoteFields::parse(args, "new")?;
    if fields.positional.is_empty() && fields.title.is_none() {
        return Err("Usage: novamind new <title> [body...]".into());
    }

    let mut note = store.create_draft();
    if fields.title.is_none() {
        fields.title = Some(fields.positional.remove(0));
    }
    if fields.body.is_none() && !fields.positional.is_empty() {
        fields.body = Some(fields.positional.join(" "));
    }
    apply_fields(&mut note, fields, store.defaults());

    store.save(&mut note)?;
    println!("Created note {} ({})", note.id(), note.title);
    Ok(())
}

pub(crate) fn list_notes(
    args: Vec<String>,
    store: &NoteStore,
    ctx: &FormatContext,
) -> Result<(), Box<dyn Error>> {
    let mut tag_filters: Vec<String> = Vec::new();
    let mut search: Option<String> = None;
    let mut parser = ArgParser::new(args, "list");
    while let Some(arg) = parser.next() {
        match arg.as_str() {
            "-t" | "--tag" => tag_filters.push(parser.extract_tag()?),
            "-s" | "--search" => search = Some(parser.extract_value(&arg)?),
            other => return Err(parser.unknown_flag(other)),
        }
    }

    let mut notes = store.notes_with_tags(&tag_filters);
    if let Some(q) = &search {
        let ql = q.to_lowercase();
        notes.retain(|n| {
            n.title.to_lowercase().contains(&ql)
                || n.content.to_lowercase().contains(&ql)
        });
    }

    if notes.is_empty() {
        if store.is_empty() {
            println!("No notes yet. Try `novamind new <title>`.");
        } else {
            println!("No matching notes.");
        }
        return Ok(());
    }

    for n in notes {
        let updated = n.updated_display();
        // id + timestamp + separators
        let fixed = n.id().chars().count() + updated.chars().count() + 8;
        let title = match terminal_columns() {
            Some(cols) => truncate_with_ellipsis(&n.title, cols.saturating_sub(fixed)),
            None => n.title.clone(),
        };
        let mut line = format!(
            "{}  | {}  | {}",
            ctx.format_id(n.id()),
            ctx.format_timestamp(&updated),
            title
        );
        if !n.tags().is_empty() {
            line.push_str("  ");
            line.push_str(&ctx.format_tags(n.tags()));
        }
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn view_note(
    args: Vec<String>,
    store: &NoteStore,
    ctx: &FormatContext,
) -> Result<(), Box<dyn Error>> {
    let id = args.first().ok_or("Usage: novamind view <id>")?;
    let note = store.get(id).ok_or(StoreError::NotFound(id.clone()))?;

    println!("{}", ctx.format_header(&format!("# {} ({})", note.title, note.id())));
    println!("Created: {}", ctx.format_timestamp(&note.created_display()));
    println!("Updated: {}", ctx.format_timestamp(&note.updated_display()));
    println!("Tags: {}", ctx.format_tags(note.tags()));
    println!(
        "Type: {} | Status: {} | Responsible: {}",
        note.meta_type, note.status, note.responsible
    );
    println!();
    println!("{}", note.content);
    Ok(())
}

pub(crate) fn edit_note(
    args: Vec<String>,
    store: &mut NoteStore,
) -> Result<(), Box<dyn Error>> {
    let mut fields = NoteFields::parse(args, "edit")?;
    if fields.positional.is_empty() {
        return Err("Usage: novamind edit <id> [field flags]".into());
    }
    let id = fields.positional.remove(0);
    let mut note =
        store.get(&id).cloned().ok_or(StoreError::NotFound(id.clone()))?;

    if fields.has_changes() {
        apply_fields(&mut note, fields, store.defaults());
    } else if !edit_body_in_editor(&mut note)? {
        println!("Edit canceled.");
        return Ok(());
    }

    store.save(&mut note)?;
    println!("Updated {}", note.id());
    Ok(())
}

pub(crate) fn delete_notes(
    args: Vec<String>,
    store: &mut NoteStore,
) -> Result<(), Box<dyn Error>> {
    if args.is_empty() {
        return Err("Usage: novamind delete <id>...".into());
    }

    let mut failed = 0;
    for id in &args {
        match store.try_delete(id) {
            Ok(()) => println!("Deleted {id}"),
            Err(e) => {
                eprintln!("{e}");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(format!("{failed} note(s) could not be deleted").into());
    }
    Ok(())
}

pub(crate) fn list_tags(
    store: &NoteStore,
    ctx: &FormatContext,
) -> Result<(), Box<dyn Error>> {
    let index = store.rebuild_tag_index();
    if index.is_empty() {
        println!("No tags found.");
        return Ok(());
    }

    let mut counts: BTreeMap<&str, usize> =
        index.iter().map(|t| (t.as_str(), 0)).collect();
    for note in store.notes().values() {
        for tag in note.tags() {
            if let Some(c) = counts.get_mut(tag.as_str()) {
                *c += 1;
            }
        }
    }

    for (tag, count) in counts {
        println!("{:15} | count {:4}", ctx.format_tag(tag), count);
    }
    Ok(())
}

/// Copy the given fields onto `note`. A blank title becomes the untitled label.
fn apply_fields(note: &mut Note, fields: NoteFields, defaults: &NoteDefaults) {
    if let Some(title) = fields.title {
        note.title = if title.trim().is_empty() {
            defaults.untitled.clone()
        } else {
            title
        };
    }
    if let Some(body) = fields.body {
        note.content = body;
    }
    if let Some(tags) = fields.tags {
        note.set_tags(tags);
    }
    if let Some(meta_type) = fields.meta_type {
        note.meta_type = meta_type;
    }
    if let Some(status) = fields.status {
        note.status = status;
    }
    if let Some(responsible) = fields.responsible {
        note.responsible = responsible;
    }
}

/// Open `$EDITOR` on a private scratch copy of the body. Returns false when
/// the editor exits unsuccessfully, leaving the note unchanged.
fn edit_body_in_editor(note: &mut Note) -> Result<bool, Box<dyn Error>> {
    let editor = env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    let scratch = Builder::new().prefix("novamind-").suffix(".md").tempfile()?;
    fs::write(scratch.path(), &note.content)?;

    let status = Command::new(&editor)
        .arg(scratch.path())
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| format!("Could not launch {editor}: {e}"))?;
    if !status.success() {
        return Ok(false);
    }

    note.content = fs::read_to_string(scratch.path())?;
    Ok(true)
}
