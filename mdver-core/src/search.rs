//! Case-insensitive literal search with cyclic match navigation

use regex::{Regex, RegexBuilder};
use std::ops::Range;

/// Direction for stepping between matches
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// Snapshot handed to a search-status consumer.
///
/// `current` is 1-based and is 0 when there are no matches.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStatus {
    pub query: String,
    pub current: usize,
    pub total: usize,
}

/// A run of highlighted or plain text
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub is_match: bool,
}

/// Search state over one piece of content
#[derive(Clone, Debug, Default)]
pub struct SearchMatcher {
    query: String,
    matches: Vec<Range<usize>>,
    current: usize,
}

impl SearchMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a fresh query over `content`; the cursor lands on the first match
    pub fn search(&mut self, content: &str, query: &str) -> SearchStatus {
        self.query = query.to_string();
        self.refresh(content)
    }

    /// Re-run the current query after the content changed
    pub fn refresh(&mut self, content: &str) -> SearchStatus {
        self.matches = find_matches(content, &self.query);
        self.current = if self.matches.is_empty() { 0 } else { 1 };

        log::debug!(
            "search {:?}: {} matches",
            self.query,
            self.matches.len()
        );

        self.status()
    }

    /// Step the cursor, wrapping at both ends. No-op without matches.
    pub fn advance(&mut self, direction: Direction) -> SearchStatus {
        let total = self.matches.len();
        if total > 0 {
            self.current = match direction {
                Direction::Next if self.current < total => self.current + 1,
                Direction::Next => 1,
                Direction::Previous if self.current > 1 => self.current - 1,
                Direction::Previous => total,
            };
        }
        self.status()
    }

    /// Land on match `nth` (1-based), counting around the end as often as
    /// needed. `nth = 0` counts as 1. No-op without matches.
    pub fn jump_to(&mut self, nth: usize) -> SearchStatus {
        let total = self.matches.len();
        if total > 0 {
            self.current = (nth.max(1) - 1) % total + 1;
        }
        self.status()
    }

    /// Drop the query and all matches
    pub fn clear(&mut self) -> SearchStatus {
        self.query.clear();
        self.matches.clear();
        self.current = 0;
        self.status()
    }

    pub fn status(&self) -> SearchStatus {
        SearchStatus {
            query: if is_blank(&self.query) {
                String::new()
            } else {
                self.query.clone()
            },
            current: self.current,
            total: self.matches.len(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn matches(&self) -> &[Range<usize>] {
        &self.matches
    }

    /// Byte range of the current match in the searched content
    pub fn current_range(&self) -> Option<Range<usize>> {
        self.current
            .checked_sub(1)
            .and_then(|idx| self.matches.get(idx))
            .cloned()
    }
}

/// Queries made only of whitespace never match anything
fn is_blank(query: &str) -> bool {
    query.trim().is_empty()
}

/// Longer queries are scanned directly instead of compiled
const MAX_REGEX_QUERY_CHARS: usize = 256;

/// Compile a query into a case-insensitive matcher for its literal text
fn query_regex(query: &str) -> Option<Regex> {
    if query.chars().count() > MAX_REGEX_QUERY_CHARS {
        log::debug!("query of {} chars, using folded scan", query.chars().count());
        return None;
    }

    match RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => Some(re),
        Err(e) => {
            log::warn!("Failed to compile search query, using folded scan: {}", e);
            None
        }
    }
}

fn chars_eq_folded(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Char-by-char case-insensitive scan, non-overlapping, left to right
fn find_folded(content: &str, query: &str) -> Vec<Range<usize>> {
    let needle: Vec<char> = query.chars().collect();
    let mut matches = Vec::new();
    let mut start = 0;

    while start < content.len() {
        let mut end = start;
        let mut haystack = content[start..].chars();
        let matched = needle.iter().all(|&q| match haystack.next() {
            Some(c) if chars_eq_folded(c, q) => {
                end += c.len_utf8();
                true
            }
            _ => false,
        });

        if matched && end > start {
            matches.push(start..end);
            start = end;
        } else {
            start += content[start..].chars().next().map_or(1, char::len_utf8);
        }
    }

    matches
}

/// Byte ranges of every non-overlapping occurrence, left to right
pub fn find_matches(content: &str, query: &str) -> Vec<Range<usize>> {
    if is_blank(query) {
        return Vec::new();
    }

    match query_regex(query) {
        Some(re) => re.find_iter(content).map(|m| m.range()).collect(),
        None => find_folded(content, query),
    }
}

/// Number of non-overlapping occurrences of `query` in `content`
pub fn count_matches(content: &str, query: &str) -> usize {
    find_matches(content, query).len()
}

/// Split `text` into spans, marking each occurrence of `query`.
///
/// Concatenating the span texts always yields `text` unchanged.
pub fn highlight(text: &str, query: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut last = 0;

    for range in find_matches(text, query) {
        if range.start > last {
            spans.push(Span {
                text: text[last..range.start].to_string(),
                is_match: false,
            });
        }
        spans.push(Span {
            text: text[range.clone()].to_string(),
            is_match: true,
        });
        last = range.end;
    }

    if last < text.len() {
        spans.push(Span {
            text: text[last..].to_string(),
            is_match: false,
        });
    }

    spans
}

/// Render spans back to a string, wrapping matches with the given markers
pub fn render_spans(spans: &[Span], start: &str, end: &str) -> String {
    let mut out = String::new();
    for span in spans {
        if span.is_match {
            out.push_str(start);
            out.push_str(&span.text);
            out.push_str(end);
        } else {
            out.push_str(&span.text);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(spans: &[Span]) -> String {
        spans.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_count_matches() {
        assert_eq!(count_matches("abcabc", "abc"), 2);
        assert_eq!(count_matches("abcabc", "xyz"), 0);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(count_matches("Test test TEST", "tEsT"), 3);
        assert_eq!(count_matches("Поиск ПОИСК", "поиск"), 2);
    }

    #[test]
    fn test_non_overlapping() {
        assert_eq!(count_matches("aaaa", "aa"), 2);
        assert_eq!(find_matches("aaaa", "aa"), vec![0..2, 2..4]);
    }

    #[test]
    fn test_query_is_literal() {
        assert_eq!(count_matches("a.c abc", "a.c"), 1);
        assert_eq!(count_matches("1+1=2 (x) [y] *z* $", "(x)"), 1);
        assert_eq!(count_matches("price: $5.00", "$5.00"), 1);
        assert_eq!(count_matches("back\\slash", "\\"), 1);
        assert_eq!(count_matches("a|b", "|"), 1);
    }

    #[test]
    fn test_fresh_query_sets_cursor() {
        let mut matcher = SearchMatcher::new();

        let status = matcher.search("abcabc", "abc");
        assert_eq!(status.total, 2);
        assert_eq!(status.current, 1);
        assert_eq!(status.query, "abc");

        let status = matcher.search("abcabc", "xyz");
        assert_eq!(status.total, 0);
        assert_eq!(status.current, 0);
    }

    #[test]
    fn test_empty_query_resets() {
        let mut matcher = SearchMatcher::new();
        matcher.search("abc", "a");

        let status = matcher.search("abc", "");
        assert_eq!(status, SearchStatus::default());

        let status = matcher.search("a b c", "   ");
        assert_eq!(status, SearchStatus::default());
    }

    #[test]
    fn test_cyclic_navigation() {
        let mut matcher = SearchMatcher::new();
        matcher.search("x x x", "x");

        assert_eq!(matcher.advance(Direction::Next).current, 2);
        assert_eq!(matcher.advance(Direction::Next).current, 3);
        assert_eq!(matcher.advance(Direction::Next).current, 1);
        assert_eq!(matcher.advance(Direction::Previous).current, 3);
        assert_eq!(matcher.advance(Direction::Previous).current, 2);
    }

    #[test]
    fn test_advance_without_matches_is_noop() {
        let mut matcher = SearchMatcher::new();
        matcher.search("abc", "zzz");

        assert_eq!(matcher.advance(Direction::Next).current, 0);
        assert_eq!(matcher.advance(Direction::Previous).current, 0);
    }

    #[test]
    fn test_jump_to_wraps_without_stepping() {
        let mut matcher = SearchMatcher::new();
        matcher.search("ab ab", "ab");

        assert_eq!(matcher.jump_to(0).current, 1);
        assert_eq!(matcher.jump_to(2).current, 2);
        assert_eq!(matcher.jump_to(3).current, 1);
        assert_eq!(matcher.jump_to(usize::MAX).current, 1);

        matcher.search("ab ab", "zz");
        assert_eq!(matcher.jump_to(5).current, 0);
    }

    #[test]
    fn test_long_query_still_counts() {
        let query = "Поиск ".repeat(100);
        let content = format!("{} | {}", query.to_uppercase(), query.to_lowercase());

        assert!(query.chars().count() > MAX_REGEX_QUERY_CHARS);
        assert_eq!(count_matches(&content, &query), 2);

        let matches = find_matches(&content, &query);
        assert_eq!(matches[0].start, 0);
        assert_eq!(&content[matches[1].clone()], query.to_lowercase());
    }

    #[test]
    fn test_folded_scan_agrees_with_regex() {
        let cases = [
            ("abcabc", "abc"),
            ("aaaa", "aa"),
            ("Test test TEST", "tEsT"),
            ("Поиск ПОИСК", "поиск"),
            ("a.c abc", "a.c"),
            ("no match here", "xyz"),
        ];

        for (content, query) in cases {
            assert_eq!(
                find_folded(content, query),
                find_matches(content, query),
                "query {:?}",
                query
            );
        }
    }

    #[test]
    fn test_current_range() {
        let mut matcher = SearchMatcher::new();
        assert!(matcher.current_range().is_none());

        matcher.search("one two one", "one");
        assert_eq!(matcher.current_range(), Some(0..3));
        matcher.advance(Direction::Next);
        assert_eq!(matcher.current_range(), Some(8..11));
    }

    #[test]
    fn test_refresh_on_new_content() {
        let mut matcher = SearchMatcher::new();
        matcher.search("a a a", "a");
        matcher.advance(Direction::Next);

        let status = matcher.refresh("a b a");
        assert_eq!(status.total, 2);
        assert_eq!(status.current, 1);
    }

    #[test]
    fn test_clear() {
        let mut matcher = SearchMatcher::new();
        matcher.search("abc", "b");

        assert_eq!(matcher.clear(), SearchStatus::default());
        assert_eq!(matcher.query(), "");
    }

    #[test]
    fn test_highlight_spans() {
        let spans = highlight("Say Hello, hello!", "hello");

        assert_eq!(
            spans,
            vec![
                Span { text: "Say ".into(), is_match: false },
                Span { text: "Hello".into(), is_match: true },
                Span { text: ", ".into(), is_match: false },
                Span { text: "hello".into(), is_match: true },
                Span { text: "!".into(), is_match: false },
            ]
        );
    }

    #[test]
    fn test_highlight_round_trip() {
        let cases = [
            ("", ""),
            ("", "x"),
            ("plain text", ""),
            ("plain text", "   "),
            ("abcabc", "abc"),
            ("<b>tag</b> & entity", "<b>"),
            ("Юникод и ЮНИКОД", "юникод"),
            ("line1\nline2\r\n", "\n"),
        ];

        for (text, query) in cases {
            assert_eq!(plain(&highlight(text, query)), text, "query {:?}", query);
        }
    }

    #[test]
    fn test_highlight_empty_query_is_noop() {
        let spans = highlight("nothing here", "");
        assert_eq!(spans.len(), 1);
        assert!(!spans[0].is_match);
        assert!(highlight("", "").is_empty());
    }

    #[test]
    fn test_render_spans() {
        let spans = highlight("find me, FIND me", "find");
        assert_eq!(render_spans(&spans, "[", "]"), "[find] me, [FIND] me");
    }
}
