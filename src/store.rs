//! Directory-backed note collection.
//!
//! The directory is scanned once when the store is opened; afterwards the
//! in-memory map is authoritative and only changes through [`NoteStore::save`]
//! and [`NoteStore::delete`]. Every mutation takes `&mut self`, so one owner
//! performs at most one mutation at a time.

use crate::config::{Config, NoteDefaults};
use crate::error::StoreError;
use crate::note::{Note, note_path, now_utc};
use crate::tags::{note_has_tags, tag_index};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Debug)]
pub struct NoteStore {
    dir: PathBuf,
    defaults: NoteDefaults,
    notes: HashMap<String, Note>,
}

impl NoteStore {
    /// Create the notes directory if needed and load every note in it.
    pub fn open(config: &Config) -> Result<Self, StoreError> {
        ensure_dir(&config.notes_dir)?;
        let mut store = Self {
            dir: config.notes_dir.clone(),
            defaults: config.defaults.clone(),
            notes: HashMap::new(),
        };
        store.load_all();
        Ok(store)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn defaults(&self) -> &NoteDefaults {
        &self.defaults
    }

    /// Rescan the directory and replace the collection.
    ///
    /// Files are visited in filename order; when two files resolve to the
    /// same id the later filename wins. Unreadable files are skipped.
    pub fn load_all(&mut self) -> &HashMap<String, Note> {
        let mut notes = HashMap::new();
        let files = match list_note_files(&self.dir) {
            Ok(files) => files,
            Err(e) => {
                warn!("Could not list {}: {e}", self.dir.display());
                Vec::new()
            }
        };

        for path in files {
            let note = match Note::load(&path, &self.defaults) {
                Ok(note) => note,
                Err(e) => {
                    warn!("Skipping {}: {e}", path.display());
                    continue;
                }
            };
            if let Some(prev) = notes.insert(note.id().to_string(), note) {
                let prev_path = prev
                    .file_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                warn!(
                    id = prev.id(),
                    "Duplicate note id; {} replaces {prev_path}",
                    path.display()
                );
            }
        }

        debug!("Loaded {} notes from {}", notes.len(), self.dir.display());
        self.notes = notes;
        &self.notes
    }

    /// A new unsaved note with a fresh id. The collection is not touched.
    pub fn create_draft(&self) -> Note {
        let id = Uuid::new_v4().to_string();
        let mut note = Note::draft(id, &self.defaults);
        note.set_file_path(note_path(&self.dir, note.id()));
        note
    }

    /// Write `note` to disk and record it in the collection.
    ///
    /// On failure neither the collection nor `note` is modified.
    pub fn save(&mut self, note: &mut Note) -> Result<(), StoreError> {
        let path = note
            .file_path()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| note_path(&self.dir, note.id()));
        let written_at = note.stamp_for(now_utc());
        let text = note.render_at(written_at)?;

        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        fs::write(&path, text).map_err(|e| StoreError::io(&path, e))?;

        note.mark_written(written_at, path);
        info!(id = note.id(), "Saved note '{}'", note.title);
        self.notes.insert(note.id().to_string(), note.clone());
        Ok(())
    }

    /// Remove a note and its file. A file that is already gone counts as
    /// removed; any other failure keeps the note in the collection.
    pub fn try_delete(&mut self, id: &str) -> Result<(), StoreError> {
        let note =
            self.notes.get(id).ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        if let Some(path) = note.file_path() {
            match fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    debug!("{} was already removed", path.display());
                }
                Err(e) => return Err(StoreError::io(path, e)),
            }
        }

        self.notes.remove(id);
        info!(id, "Deleted note");
        Ok(())
    }

    /// `true` when the note was removed from memory (and disk).
    pub fn delete(&mut self, id: &str) -> bool {
        match self.try_delete(id) {
            Ok(()) => true,
            Err(StoreError::NotFound(_)) => false,
            Err(e) => {
                warn!(id, "Delete failed: {e}");
                false
            }
        }
    }

    /// Sorted, deduplicated union of every note's tags.
    pub fn rebuild_tag_index(&self) -> Vec<String> {
        tag_index(self.notes.values())
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.get(id)
    }

    pub fn notes(&self) -> &HashMap<String, Note> {
        &self.notes
    }

    pub fn notes_sorted(&self) -> Vec<&Note> {
        let mut notes: Vec<&Note> = self.notes.values().collect();
        notes.sort_by(|a, b| a.id().cmp(b.id()));
        notes
    }

    /// Notes carrying every tag in `tags`, sorted by id.
    pub fn notes_with_tags(&self, tags: &[String]) -> Vec<&Note> {
        self.notes_sorted()
            .into_iter()
            .filter(|n| note_has_tags(n, tags))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

fn ensure_dir(path: &Path) -> Result<(), StoreError> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| StoreError::io(path, e))?;
    }
    Ok(())
}

/// `*.md` files directly inside `dir` (symlinks followed), sorted by
/// filename. Entries that cannot be read are logged and skipped.
fn list_note_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {e}", dir.display());
                continue;
            }
        };
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) != Some("md") {
            continue;
        }
        if path.is_file() {
            files.push(path);
        } else if path.is_symlink() {
            warn!("Skipping dangling link {}", path.display());
        }
    }
    files.sort();
    Ok(files)
}
