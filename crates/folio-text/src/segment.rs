#![forbid(unsafe_code)]

//! Keyword overlay matcher.
//!
//! Splits text into plain and keyword [`Segment`]s. Segments borrow from the
//! source text and the keyword table and are rebuilt on every render; nothing
//! here is patched incrementally.
//!
//! # Algorithm
//!
//! Scan left to right from cursor `i`. Among all keywords, take the
//! case-insensitive occurrence with the smallest start at or after `i`; on a
//! tie the keyword declared first wins. Emit the gap before it as text (when
//! non-empty), then the keyword, then continue after the match. When no
//! keyword occurs any more, emit the remainder as one final text segment,
//! which may be empty.
//!
//! Each keyword's next occurrence is cached and only searched again once the
//! cursor has moved past its start, so every keyword is searched roughly once
//! per occurrence instead of once per emitted segment.
//!
//! # Partial reveals
//!
//! Run on a prefix of the full text, an occurrence cut off by the end of the
//! prefix is simply not found and stays part of the trailing text segment.
//! A keyword is only ever emitted once its whole length is present.
//!
//! # Example
//! ```
//! use folio_text::{KeywordAction, KeywordDescriptor, KeywordSet, segment};
//!
//! let keywords = KeywordSet::new(vec![
//!     KeywordDescriptor::new("tony toskalio", KeywordAction::navigate("/")),
//! ]);
//! let partial = segment("i'm tony tos", &keywords);
//! assert!(partial.iter().all(|s| !s.is_keyword()));
//!
//! let full = segment("i'm tony toskalio.", &keywords);
//! assert_eq!(full[1].content, "tony toskalio");
//! ```

use std::ops::Range;

use smallvec::SmallVec;

use crate::keyword::{KeywordDescriptor, KeywordSet};
use crate::search::{SearchResult, find_case_insensitive};

/// What a segment is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind<'a> {
    /// Plain text.
    Text,
    /// A recognized keyword.
    Keyword {
        /// The matching descriptor.
        descriptor: &'a KeywordDescriptor,
        /// Declaration index of the descriptor in its [`KeywordSet`].
        index: usize,
    },
}

/// One contiguous piece of segmented text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    /// Plain or keyword.
    pub kind: SegmentKind<'a>,
    /// The covered source text, with its original casing.
    pub content: &'a str,
    /// Byte range of `content` in the source.
    pub range: Range<usize>,
}

impl<'a> Segment<'a> {
    /// A plain text segment.
    #[must_use]
    pub fn text(source: &'a str, range: Range<usize>) -> Self {
        Self {
            kind: SegmentKind::Text,
            content: &source[range.clone()],
            range,
        }
    }

    /// Whether this segment is a keyword.
    #[must_use]
    pub fn is_keyword(&self) -> bool {
        matches!(self.kind, SegmentKind::Keyword { .. })
    }

    /// The keyword descriptor, for keyword segments.
    #[must_use]
    pub fn descriptor(&self) -> Option<&'a KeywordDescriptor> {
        match self.kind {
            SegmentKind::Keyword { descriptor, .. } => Some(descriptor),
            SegmentKind::Text => None,
        }
    }
}

/// Segmentation output. Typical texts carry a handful of keywords.
pub type Segments<'a> = SmallVec<[Segment<'a>; 8]>;

/// Split `text` into plain and keyword segments.
///
/// Concatenating every segment's `content` reproduces `text` exactly. The
/// last segment is always plain text (possibly empty).
#[must_use]
pub fn segment<'a>(text: &'a str, keywords: &'a KeywordSet) -> Segments<'a> {
    let mut out = Segments::new();
    let mut next: SmallVec<[Option<SearchResult>; 8]> = keywords
        .iter()
        .map(|k| find_case_insensitive(text, &k.word, 0))
        .collect();
    let mut cursor = 0;

    loop {
        for (slot, keyword) in next.iter_mut().zip(keywords) {
            if slot.as_ref().is_some_and(|hit| hit.start() < cursor) {
                *slot = find_case_insensitive(text, &keyword.word, cursor);
            }
        }

        // `min_by_key` keeps the first minimum, so equal starts resolve to the
        // earliest declaration.
        let best = next
            .iter()
            .enumerate()
            .filter_map(|(idx, hit)| hit.as_ref().map(|h| (idx, h.range.clone())))
            .min_by_key(|(_, range)| range.start);
        let Some((index, range)) = best else {
            break;
        };
        let Some(descriptor) = keywords.get(index) else {
            break;
        };

        if range.start > cursor {
            out.push(Segment::text(text, cursor..range.start));
        }
        cursor = range.end;
        out.push(Segment {
            kind: SegmentKind::Keyword { descriptor, index },
            content: &text[range.clone()],
            range,
        });
    }

    out.push(Segment::text(text, cursor..text.len()));
    tracing::trace!(
        bytes = text.len(),
        segments = out.len(),
        "segmented text"
    );
    out
}
