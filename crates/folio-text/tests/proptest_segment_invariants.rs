//! Property-based invariant tests for the keyword overlay matcher.
//!
//! 1. Concatenated segment contents reproduce the input exactly.
//! 2. Segment ranges are contiguous and cover the input.
//! 3. Every keyword segment matches its descriptor's word case-insensitively.
//! 4. The last segment is plain text.
//! 5. Segmenting a prefix never yields a keyword that extends past the prefix.

use folio_text::{GraphemeIndex, KeywordAction, KeywordDescriptor, KeywordSet, segment};
use proptest::prelude::*;

fn keyword_set() -> impl Strategy<Value = KeywordSet> {
    proptest::collection::vec("[abAB ]{1,4}", 0..5).prop_map(|words| {
        KeywordSet::new(
            words
                .into_iter()
                .map(|w| KeywordDescriptor::new(w, KeywordAction::None))
                .collect(),
        )
    })
}

proptest! {
    #[test]
    fn concatenation_round_trips(text in "[abAB πé]{0,40}", keywords in keyword_set()) {
        let segs = segment(&text, &keywords);
        let joined: String = segs.iter().map(|s| s.content).collect();
        prop_assert_eq!(joined.as_str(), text.as_str());
    }

    #[test]
    fn ranges_are_contiguous(text in "[abAB ]{0,40}", keywords in keyword_set()) {
        let segs = segment(&text, &keywords);
        let mut expected_start = 0;
        for seg in &segs {
            prop_assert_eq!(seg.range.start, expected_start);
            expected_start = seg.range.end;
        }
        prop_assert_eq!(expected_start, text.len());
        prop_assert!(!segs.last().is_some_and(|s| s.is_keyword()));
    }

    #[test]
    fn keyword_segments_match_their_word(text in "[abAB ]{0,40}", keywords in keyword_set()) {
        for seg in segment(&text, &keywords) {
            if let Some(desc) = seg.descriptor() {
                prop_assert_eq!(seg.content.to_lowercase(), desc.word.to_lowercase());
            }
        }
    }

    #[test]
    fn prefixes_never_leak_partial_keywords(text in "[abAB ]{0,40}", keywords in keyword_set(), cut in 0usize..41) {
        let index = GraphemeIndex::new(&text);
        let prefix = index.prefix(&text, cut);
        for seg in segment(prefix, &keywords) {
            prop_assert!(seg.range.end <= prefix.len());
            if let Some(desc) = seg.descriptor() {
                prop_assert_eq!(seg.content.len(), desc.word.len());
            }
        }
    }
}
