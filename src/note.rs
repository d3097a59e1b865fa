//! In-memory note record and its Markdown + YAML front matter form.

use crate::config::NoteDefaults;
use crate::error::NoteError;
use crate::frontmatter::{self, MARKER};
use crate::tags::{normalize_tags, parse_tag_list};
use chrono::{
    DateTime, NaiveDate, NaiveDateTime, SecondsFormat, SubsecRound, Utc,
};
use serde::Serialize;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Presentation-only timestamp format. Never parsed back.
pub const DISPLAY_FMT: &str = "%d %b %Y %H:%M";

const NAIVE_FMTS: &[&str] =
    &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    id: String,
    pub title: String,
    /// Markdown body. Leading whitespace is not preserved on disk: the
    /// body read back after the closing `---` line is trimmed at the start.
    pub content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    tags: Vec<String>,
    pub meta_type: String,
    pub status: String,
    pub responsible: String,
    file_path: Option<PathBuf>,
}

/// Front matter as written to disk. Field order is the on-disk key order.
#[derive(Serialize)]
struct Header<'a> {
    id: &'a str,
    title: &'a str,
    created: String,
    updated: String,
    tags: &'a [String],
    meta_type: &'a str,
    status: &'a str,
    responsible: &'a str,
}

pub fn now_utc() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

/// Canonical wire form, e.g. `2024-01-05T10:00:00Z`.
pub fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn display_timestamp(dt: DateTime<Utc>) -> String {
    dt.format(DISPLAY_FMT).to_string()
}

/// Accepts RFC 3339 (any offset) and naive ISO-8601 forms, read as UTC.
pub fn parse_timestamp(ts: &str) -> Option<DateTime<Utc>> {
    let ts = ts.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Some(dt.with_timezone(&Utc).trunc_subsecs(0));
    }
    for fmt in NAIVE_FMTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(ts, fmt) {
            return Some(naive.and_utc().trunc_subsecs(0));
        }
    }
    NaiveDate::parse_from_str(ts, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// `my-first-note` becomes `My first note`.
pub fn title_from_stem(stem: &str) -> String {
    let spaced = stem.replace('-', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

pub fn note_path(dir: &Path, id: &str) -> PathBuf {
    dir.join(format!("{id}.md"))
}

impl Note {
    /// A fresh note that has never been written.
    pub fn draft(id: impl Into<String>, defaults: &NoteDefaults) -> Self {
        let now = now_utc();
        Self {
            id: id.into(),
            title: defaults.draft_title.clone(),
            content: String::new(),
            created_at: now,
            updated_at: now,
            tags: Vec::new(),
            meta_type: defaults.meta_type.clone(),
            status: defaults.draft_status.clone(),
            responsible: defaults.draft_responsible.clone(),
            file_path: None,
        }
    }

    /// Build a note from file text. Missing or malformed metadata falls
    /// back to values derived from `path` and `defaults`.
    pub fn parse(text: &str, path: &Path, defaults: &NoteDefaults) -> Self {
        let (meta, body) = frontmatter::split(text).into_parts();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let id = scalar(&meta, "id")
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| stem.clone());
        let title = scalar(&meta, "title").unwrap_or_else(|| title_from_stem(&stem));

        let created_at = scalar(&meta, "created")
            .and_then(|s| parse_timestamp(&s))
            .unwrap_or_else(now_utc);
        let updated_at = scalar(&meta, "updated")
            .and_then(|s| parse_timestamp(&s))
            .unwrap_or(created_at)
            .max(created_at);

        Self {
            id,
            title,
            content: body,
            created_at,
            updated_at,
            tags: tag_values(&meta),
            meta_type: scalar(&meta, "meta_type")
                .unwrap_or_else(|| defaults.meta_type.clone()),
            status: scalar(&meta, "status")
                .unwrap_or_else(|| defaults.status.clone()),
            responsible: scalar(&meta, "responsible")
                .unwrap_or_else(|| defaults.responsible.clone()),
            file_path: Some(path.to_path_buf()),
        }
    }

    pub fn load(path: &Path, defaults: &NoteDefaults) -> io::Result<Self> {
        let raw = fs::read_to_string(path)?;
        Ok(Self::parse(&raw, path, defaults))
    }

    /// File text with `updated` stamped at `now`; leaves `self` untouched.
    pub fn render_at(&self, now: DateTime<Utc>) -> Result<String, NoteError> {
        let header = Header {
            id: &self.id,
            title: &self.title,
            created: format_timestamp(self.created_at),
            updated: format_timestamp(self.stamp_for(now)),
            tags: &self.tags,
            meta_type: &self.meta_type,
            status: &self.status,
            responsible: &self.responsible,
        };
        let yaml = serde_yaml::to_string(&header)?;
        Ok(format!("{MARKER}\n{yaml}{MARKER}\n\n{}", self.content))
    }

    /// File text stamped with the current time. `updated_at` is moved to the
    /// written instant.
    pub fn serialize(&mut self) -> Result<String, NoteError> {
        let now = now_utc();
        let text = self.render_at(now)?;
        self.updated_at = self.stamp_for(now);
        Ok(text)
    }

    pub(crate) fn stamp_for(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.trunc_subsecs(0).max(self.created_at)
    }

    pub(crate) fn mark_written(&mut self, at: DateTime<Utc>, path: PathBuf) {
        self.updated_at = at;
        self.file_path = Some(path);
    }

    pub(crate) fn set_file_path(&mut self, path: PathBuf) {
        self.file_path = Some(path);
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn set_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags = normalize_tags(tags);
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn created_display(&self) -> String {
        display_timestamp(self.created_at)
    }

    pub fn updated_display(&self) -> String {
        display_timestamp(self.updated_at)
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn has_file(&self) -> bool {
        self.file_path.is_some()
    }
}

fn scalar_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn scalar(meta: &Mapping, key: &str) -> Option<String> {
    meta.get(key).and_then(scalar_value)
}

fn tag_values(meta: &Mapping) -> Vec<String> {
    match meta.get("tags") {
        Some(Value::Sequence(items)) => {
            normalize_tags(items.iter().filter_map(scalar_value))
        }
        Some(Value::String(list)) => parse_tag_list(list),
        _ => Vec::new(),
    }
}
