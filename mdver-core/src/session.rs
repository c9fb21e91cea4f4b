//! Viewing session: selected version, diff mode and search state
//!
//! All mutation of the viewer state goes through one `Session`. Derived data
//! (outline, diff, matches) is recomputed whenever its inputs change.

use std::borrow::Cow;

use crate::diff::{self, DiffLine};
use crate::doc::Document;
use crate::search::{self, Direction, SearchMatcher, SearchStatus, Span};
use crate::toc::{self, Heading};
use crate::version::{VersionError, VersionList};

pub struct Session {
    versions: VersionList,
    selected: usize,
    diff_mode: bool,
    headings: Vec<Heading>,
    diff: Option<Vec<DiffLine>>,
    search: SearchMatcher,
}

impl Session {
    /// Start a session on the oldest version
    pub fn new(versions: VersionList) -> Self {
        let mut session = Self {
            versions,
            selected: 0,
            diff_mode: false,
            headings: Vec::new(),
            diff: None,
            search: SearchMatcher::new(),
        };
        session.recompute();
        session
    }

    pub fn versions(&self) -> &VersionList {
        &self.versions
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Select a version by index. Leaves state untouched on error.
    pub fn select(&mut self, index: usize) -> Result<(), VersionError> {
        if index >= self.versions.len() {
            return Err(VersionError::OutOfRange {
                index: isize::try_from(index).unwrap_or(isize::MAX),
                len: self.versions.len(),
            });
        }
        self.apply_selection(index);
        Ok(())
    }

    /// Select relative to the current version (negative steps go back)
    pub fn step(&mut self, delta: isize) -> Result<(), VersionError> {
        let target = (self.selected as isize).checked_add(delta).ok_or(
            VersionError::OutOfRange {
                index: isize::MAX,
                len: self.versions.len(),
            },
        )?;
        let index = self.versions.check_index(target)?;
        self.apply_selection(index);
        Ok(())
    }

    fn apply_selection(&mut self, index: usize) {
        self.selected = index;
        self.diff_mode = false;
        self.recompute();
    }

    /// Whether a predecessor exists to diff against
    pub fn can_diff(&self) -> bool {
        self.selected > 0
    }

    /// Flip diff mode; has no effect on the first version. Returns the new flag.
    pub fn toggle_diff_mode(&mut self) -> bool {
        if self.can_diff() {
            self.diff_mode = !self.diff_mode;
            self.recompute();
        }
        self.diff_mode
    }

    pub fn diff_mode_on(&self) -> bool {
        self.diff_mode
    }

    pub fn current_document(&self) -> &Document {
        // selected is validated on every change and the list is non-empty
        &self.versions.as_slice()[self.selected]
    }

    pub fn previous_document(&self) -> Option<&Document> {
        self.selected
            .checked_sub(1)
            .and_then(|idx| self.versions.get(idx))
    }

    /// Outline of the selected version's raw text
    pub fn headings(&self) -> &[Heading] {
        &self.headings
    }

    /// Annotated lines against the previous version, only in diff mode
    pub fn diff_lines(&self) -> Option<&[DiffLine]> {
        self.diff.as_deref()
    }

    /// Text that search and highlighting run over
    pub fn active_content(&self) -> Cow<'_, str> {
        match &self.diff {
            Some(lines) => Cow::Owned(diff::diff_text(lines)),
            None => Cow::Borrowed(&self.current_document().content),
        }
    }

    pub fn set_query(&mut self, query: &str) -> SearchStatus {
        let content = self.active_content().into_owned();
        self.search.search(&content, query)
    }

    pub fn advance(&mut self, direction: Direction) -> SearchStatus {
        self.search.advance(direction)
    }

    /// Land on match `nth`, wrapping cyclically
    pub fn jump_to(&mut self, nth: usize) -> SearchStatus {
        self.search.jump_to(nth)
    }

    pub fn search_status(&self) -> SearchStatus {
        self.search.status()
    }

    pub fn search(&self) -> &SearchMatcher {
        &self.search
    }

    /// Active content split into highlight spans for the current query
    pub fn highlighted(&self) -> Vec<Span> {
        search::highlight(&self.active_content(), self.search.query())
    }

    pub fn version_label(&self) -> String {
        format!("Version {} of {}", self.selected + 1, self.versions.len())
    }

    pub fn comparison_label(&self) -> Option<String> {
        if !self.diff_mode {
            return None;
        }
        self.previous_document()
            .map(|prev| format!("Compared with {}", prev.name))
    }

    fn recompute(&mut self) {
        let current = self.current_document();
        let headings = toc::extract_headings(&current.content);
        let diff = match (self.diff_mode, self.previous_document()) {
            (true, Some(prev)) => Some(diff::diff_lines(&prev.content, &current.content)),
            _ => None,
        };

        log::debug!(
            "selected version {} ({}), diff mode {}, {} headings",
            self.selected + 1,
            current.name,
            self.diff_mode,
            headings.len()
        );

        self.headings = headings;
        self.diff = diff;

        let content = self.active_content().into_owned();
        self.search.refresh(&content);
    }
}
