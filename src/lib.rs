//! Markdown notes with YAML front matter, kept in a flat directory.
//!
//! [`NoteStore`] owns the collection for the lifetime of the process and is
//! the only path that writes or deletes note files. [`Note`] handles the
//! conversion between a record and its file text. The `novamind` binary is a
//! thin command shell over the store.

pub mod config;
pub mod error;
pub mod frontmatter;
pub mod note;
pub mod store;
pub mod tags;

mod args;
mod commands;
mod formatting;
mod logging;

pub use config::{Config, NoteDefaults};
pub use error::{NoteError, StoreError};
pub use frontmatter::FrontMatter;
pub use note::Note;
pub use store::NoteStore;

use formatting::FormatContext;
use std::env;
use std::error::Error;

pub fn entry() -> Result<(), Box<dyn Error>> {
    logging::init();

    let mut args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        commands::print_help();
        return Ok(());
    }

    let cmd = args.remove(0);
    if matches!(cmd.as_str(), "help" | "-h" | "--help") {
        commands::print_help();
        return Ok(());
    }

    let config = Config::from_env()?;
    let mut store = NoteStore::open(&config)?;
    let ctx = FormatContext::from_env();

    match cmd.as_str() {
        "new" => commands::new_note(args, &mut store)?,
        "list" => commands::list_notes(args, &store, &ctx)?,
        "view" => commands::view_note(args, &store, &ctx)?,
        "edit" => commands::edit_note(args, &mut store)?,
        "delete" => commands::delete_notes(args, &mut store)?,
        "tags" => commands::list_tags(&store, &ctx)?,
        "path" => println!("{}", store.dir().display()),
        other => {
            commands::print_help();
            return Err(format!("Unknown command: {other}").into());
        }
    }

    Ok(())
}
