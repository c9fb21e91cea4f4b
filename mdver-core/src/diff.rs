//! Line diff between adjacent document versions

use similar::{Algorithm, ChangeTag, TextDiff};

/// Edit annotation for a single line
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiffKind {
    Added,
    Removed,
    Unchanged,
}

/// One line of the reconstructed text with its edit annotation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffLine {
    pub content: String,
    pub kind: DiffKind,
}

impl DiffLine {
    pub fn new(content: impl Into<String>, kind: DiffKind) -> Self {
        Self {
            content: content.into(),
            kind,
        }
    }
}

/// Line counts per annotation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiffStats {
    pub added: usize,
    pub removed: usize,
    pub unchanged: usize,
}

impl DiffStats {
    pub fn from_lines(lines: &[DiffLine]) -> Self {
        lines.iter().fold(Self::default(), |mut stats, line| {
            match line.kind {
                DiffKind::Added => stats.added += 1,
                DiffKind::Removed => stats.removed += 1,
                DiffKind::Unchanged => stats.unchanged += 1,
            }
            stats
        })
    }

    /// True when the two versions differ at all
    pub fn has_changes(&self) -> bool {
        self.added > 0 || self.removed > 0
    }
}

/// Split text on `\n` only. Empty text has no lines; a trailing newline
/// yields a trailing empty line, so joining with `\n` restores the input.
pub fn split_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        Vec::new()
    } else {
        text.split('\n').collect()
    }
}

/// Compute the annotated line sequence turning `old` into `new`
pub fn diff_lines(old: &str, new: &str) -> Vec<DiffLine> {
    let old_lines = split_lines(old);
    let new_lines = split_lines(new);

    let diff = TextDiff::configure()
        .algorithm(Algorithm::Myers)
        .diff_slices(&old_lines, &new_lines);

    let lines: Vec<DiffLine> = diff
        .iter_all_changes()
        .map(|change| {
            let kind = match change.tag() {
                ChangeTag::Equal => DiffKind::Unchanged,
                ChangeTag::Delete => DiffKind::Removed,
                ChangeTag::Insert => DiffKind::Added,
            };
            DiffLine::new(change.value(), kind)
        })
        .collect();

    log::debug!(
        "diffed {} old / {} new lines into {} entries",
        old_lines.len(),
        new_lines.len(),
        lines.len()
    );

    lines
}

/// Lines of the older version (unchanged and removed)
pub fn old_side(lines: &[DiffLine]) -> Vec<&str> {
    lines
        .iter()
        .filter(|l| l.kind != DiffKind::Added)
        .map(|l| l.content.as_str())
        .collect()
}

/// Lines of the newer version (unchanged and added)
pub fn new_side(lines: &[DiffLine]) -> Vec<&str> {
    lines
        .iter()
        .filter(|l| l.kind != DiffKind::Removed)
        .map(|l| l.content.as_str())
        .collect()
}

/// Flatten the annotated sequence into searchable text
pub fn diff_text(lines: &[DiffLine]) -> String {
    lines
        .iter()
        .map(|l| l.content.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
