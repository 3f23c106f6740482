#![forbid(unsafe_code)]

//! Case-insensitive substring search.
//!
//! Folding is per character via [`char::to_lowercase`], so a match always
//! spans exactly as many source characters as the needle has. That keeps
//! match ranges aligned with the source even for characters whose lowercase
//! form expands (`'İ'`), at the cost of not matching across such expansions.
//!
//! # Example
//! ```
//! use folio_text::search::find_case_insensitive;
//!
//! let hit = find_case_insensitive("Meet Tony Toskalio", "tony toskalio", 0).unwrap();
//! assert_eq!(hit.range, 5..18);
//! ```

/// A single search match with its byte range in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Byte offset range of the match in the source string.
    pub range: std::ops::Range<usize>,
}

impl SearchResult {
    /// Create a new search result.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { range: start..end }
    }

    /// Byte offset of the first matched character.
    #[must_use]
    pub fn start(&self) -> usize {
        self.range.start
    }

    /// Extract the matched text from the source.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.range.clone()]
    }
}

#[inline]
fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Try to match `needle` at byte offset `start` of `haystack`.
///
/// Returns the byte offset just past the match.
fn match_at(haystack: &str, start: usize, needle: &str) -> Option<usize> {
    let mut hay = haystack[start..].char_indices();
    let mut end = start;
    for n in needle.chars() {
        let (offset, h) = hay.next()?;
        if !chars_eq_ignore_case(h, n) {
            return None;
        }
        end = start + offset + h.len_utf8();
    }
    Some(end)
}

/// Find the first case-insensitive occurrence of `needle` in `haystack`
/// starting at or after byte offset `from`.
///
/// Returns `None` for an empty needle, or when `from` is past the end or not
/// on a character boundary.
#[must_use]
pub fn find_case_insensitive(haystack: &str, needle: &str, from: usize) -> Option<SearchResult> {
    if needle.is_empty() || from > haystack.len() || !haystack.is_char_boundary(from) {
        return None;
    }
    haystack[from..]
        .char_indices()
        .map(|(offset, _)| from + offset)
        .find_map(|start| match_at(haystack, start, needle).map(|end| SearchResult::new(start, end)))
}
