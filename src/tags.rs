use crate::note::Note;
use std::collections::BTreeSet;

/// Trim a tag; blank input yields an empty string.
pub fn normalize_tag(t: &str) -> String {
    t.trim().to_string()
}

/// Normalize and deduplicate a list of tags into sorted order
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut normalized: Vec<String> = tags
        .into_iter()
        .map(|t| normalize_tag(t.as_ref()))
        .filter(|t| !t.is_empty())
        .collect();
    normalized.sort();
    normalized.dedup();
    normalized
}

/// Parse user input such as `"alpha, beta, alpha"`.
pub fn parse_tag_list(input: &str) -> Vec<String> {
    normalize_tags(input.split(','))
}

/// Sorted union of every note's tags.
pub fn tag_index<'a>(notes: impl IntoIterator<Item = &'a Note>) -> Vec<String> {
    let set: BTreeSet<&str> = notes
        .into_iter()
        .flat_map(|n| n.tags().iter().map(String::as_str))
        .collect();
    set.into_iter().map(str::to_string).collect()
}

/// Check if a note has all required tags
pub fn note_has_tags(note: &Note, tags: &[String]) -> bool {
    tags.iter().all(|t| note.tags().contains(t))
}

pub fn hash_tag(tag: &str) -> u64 {
    let mut h: u64 = 5381;
    for b in tag.bytes() {
        h = (h.wrapping_shl(5)).wrapping_add(h) ^ u64::from(b);
    }
    h
}

/// Stable color for a tag, picked from a small pastel palette.
pub fn color_for_tag(tag: &str) -> (u8, u8, u8) {
    const PALETTE: &[(u8, u8, u8)] = &[
        (137, 180, 250),
        (166, 227, 161),
        (249, 226, 175),
        (245, 194, 231),
        (148, 226, 213),
        (198, 160, 246),
        (255, 214, 165),
        (186, 225, 255),
    ];
    PALETTE[(hash_tag(tag) as usize) % PALETTE.len()]
}
