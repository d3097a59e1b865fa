//! Environment-driven configuration for the notes directory and the labels
//! substituted when a note is missing metadata.

use std::env;
use std::io;
use std::path::PathBuf;

pub const DIR_ENV: &str = "NOVAMIND_DIR";
pub const LOG_ENV: &str = "NOVAMIND_LOG";

/// Labels used when a field is absent from a file or a note is brand new.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDefaults {
    pub meta_type: String,
    pub status: String,
    pub responsible: String,
    pub draft_title: String,
    /// Replaces a title that was cleared while editing.
    pub untitled: String,
    pub draft_status: String,
    pub draft_responsible: String,
}

impl Default for NoteDefaults {
    fn default() -> Self {
        Self {
            meta_type: "Note".to_string(),
            status: "No status".to_string(),
            responsible: "Unassigned".to_string(),
            draft_title: "New note".to_string(),
            untitled: "Untitled".to_string(),
            draft_status: "Draft".to_string(),
            draft_responsible: String::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub notes_dir: PathBuf,
    pub defaults: NoteDefaults,
}

impl Config {
    pub fn new(notes_dir: impl Into<PathBuf>) -> Self {
        Self { notes_dir: notes_dir.into(), defaults: NoteDefaults::default() }
    }

    pub fn from_env() -> io::Result<Self> {
        Ok(Self::new(notes_dir()?))
    }
}

/// Resolve the notes directory: `NOVAMIND_DIR`, else `~/.novamind/notes_data`.
pub fn notes_dir() -> io::Result<PathBuf> {
    if let Ok(dir) = env::var(DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    let home = env::var("HOME").map_err(|_| {
        io::Error::other(format!("HOME not set; set {DIR_ENV} explicitly"))
    })?;
    Ok(PathBuf::from(home).join(".novamind").join("notes_data"))
}
