#![forbid(unsafe_code)]

//! Grapheme-indexed prefixes.
//!
//! Reveal progress is counted in extended grapheme clusters so a partially
//! revealed text never ends in half a user-perceived character (a base letter
//! without its combining accent, half an emoji sequence).

use unicode_segmentation::UnicodeSegmentation;

/// Byte boundaries of every grapheme cluster in a text.
///
/// `boundaries[k]` is the byte length of the first `k` graphemes, so
/// `boundaries[0] == 0` and the last entry is the full byte length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphemeIndex {
    boundaries: Vec<usize>,
}

impl GraphemeIndex {
    /// Index the graphemes of `text`.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let mut boundaries = Vec::with_capacity(text.len() + 1);
        boundaries.push(0);
        boundaries.extend(
            text.grapheme_indices(true)
                .map(|(offset, grapheme)| offset + grapheme.len()),
        );
        Self { boundaries }
    }

    /// Number of graphemes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.boundaries.len() - 1
    }

    /// Whether the indexed text is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Byte length of the first `count` graphemes, clamped to the full text.
    #[inline]
    #[must_use]
    pub fn byte_offset(&self, count: usize) -> usize {
        self.boundaries[count.min(self.len())]
    }

    /// The first `count` graphemes of `text`.
    ///
    /// `text` must be the string this index was built from.
    #[must_use]
    pub fn prefix<'a>(&self, text: &'a str, count: usize) -> &'a str {
        &text[..self.byte_offset(count)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_is_one_grapheme_per_byte() {
        let idx = GraphemeIndex::new("drawing");
        assert_eq!(idx.len(), 7);
        assert_eq!(idx.prefix("drawing", 4), "draw");
    }

    #[test]
    fn combining_mark_stays_with_base() {
        let text = "cafe\u{301}!";
        let idx = GraphemeIndex::new(text);
        assert_eq!(idx.len(), 5);
        assert_eq!(idx.prefix(text, 4), "cafe\u{301}");
    }

    #[test]
    fn multibyte_chars() {
        let text = "syπth";
        let idx = GraphemeIndex::new(text);
        assert_eq!(idx.len(), 5);
        assert_eq!(idx.prefix(text, 3), "syπ");
        assert_eq!(idx.byte_offset(3), 4);
    }

    #[test]
    fn prefix_clamps() {
        let idx = GraphemeIndex::new("ab");
        assert_eq!(idx.prefix("ab", 99), "ab");
    }

    #[test]
    fn empty_text() {
        let idx = GraphemeIndex::new("");
        assert!(idx.is_empty());
        assert_eq!(idx.prefix("", 3), "");
    }
}
