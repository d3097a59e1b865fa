//! Splits note text into a YAML metadata mapping and a Markdown body.
//!
//! Splitting never fails: anything that is not a well-formed, non-empty
//! mapping fenced by `---` lines comes back as [`FrontMatter::Bare`] and the
//! caller substitutes defaults.

use serde_yaml::{Mapping, Value};
use tracing::debug;

pub const MARKER: &str = "---";

#[derive(Debug, Clone, PartialEq)]
pub enum FrontMatter {
    Parsed { metadata: Mapping, body: String },
    Bare(String),
}

impl FrontMatter {
    pub fn metadata(&self) -> Option<&Mapping> {
        match self {
            FrontMatter::Parsed { metadata, .. } => Some(metadata),
            FrontMatter::Bare(_) => None,
        }
    }

    pub fn body(&self) -> &str {
        match self {
            FrontMatter::Parsed { body, .. } => body,
            FrontMatter::Bare(body) => body,
        }
    }

    pub fn into_parts(self) -> (Mapping, String) {
        match self {
            FrontMatter::Parsed { metadata, body } => (metadata, body),
            FrontMatter::Bare(body) => (Mapping::new(), body),
        }
    }
}

pub fn split(text: &str) -> FrontMatter {
    let Some((yaml, rest)) = fenced_block(text) else {
        debug!("no front matter fence found");
        return FrontMatter::Bare(text.to_string());
    };

    match serde_yaml::from_str::<Value>(yaml) {
        Ok(Value::Mapping(metadata)) if !metadata.is_empty() => {
            FrontMatter::Parsed { metadata, body: rest.trim_start().to_string() }
        }
        Ok(_) => {
            debug!("front matter is empty or not a mapping");
            FrontMatter::Bare(text.to_string())
        }
        Err(e) => {
            debug!("front matter is not valid YAML: {e}");
            FrontMatter::Bare(text.to_string())
        }
    }
}

/// Returns the text between the opening and closing marker lines and
/// everything after the closing line.
fn fenced_block(text: &str) -> Option<(&str, &str)> {
    let mut lines = text.split_inclusive('\n');
    let first = lines.next()?;
    if !is_marker(first) {
        return None;
    }

    let yaml_start = first.len();
    let mut offset = yaml_start;
    for line in lines {
        if is_marker(line) {
            return Some((&text[yaml_start..offset], &text[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

fn is_marker(line: &str) -> bool {
    line.trim_end() == MARKER
}
