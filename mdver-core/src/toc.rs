//! Table of Contents extraction from Markdown

use regex::Regex;
use std::sync::OnceLock;

use crate::slug::slugify;

/// A heading in the markdown document
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Heading {
    pub id: String,
    pub level: u8,
    pub text: String,
    pub line: usize,
}

/// Extract headings from markdown text using regex scanning.
///
/// The scan is purely textual: `#` lines inside fenced code blocks are
/// reported as headings too.
pub fn extract_headings(text: &str) -> Vec<Heading> {
    static HEADING_REGEX: OnceLock<Regex> = OnceLock::new();

    let re = HEADING_REGEX.get_or_init(|| {
        // ATX headings only: 1-6 hashes, at least one blank, then text
        Regex::new(r"^(#{1,6})[ \t]+(.+)$").unwrap()
    });

    text.split('\n')
        .enumerate()
        .filter_map(|(line_idx, line)| {
            let captures = re.captures(line)?;
            let level = captures.get(1)?.as_str().len() as u8;
            let text = captures.get(2)?.as_str().trim().to_string();

            Some(Heading {
                id: slugify(&text),
                level,
                text,
                line: line_idx,
            })
        })
        .collect()
}

/// Keep only headings at or above the given depth
pub fn filter_max_level(headings: &[Heading], max_level: u8) -> Vec<Heading> {
    headings
        .iter()
        .filter(|h| h.level <= max_level)
        .cloned()
        .collect()
}

/// Resolve a table-of-contents click to the first heading carrying `id`
pub fn find_by_id<'a>(headings: &'a [Heading], id: &str) -> Option<&'a Heading> {
    headings.iter().find(|h| h.id == id)
}
