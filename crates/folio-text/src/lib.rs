#![forbid(unsafe_code)]

//! Text primitives for folio: keyword descriptors, case-insensitive search,
//! grapheme-indexed prefixes, and the keyword overlay matcher.
//!
//! # Example
//! ```
//! use folio_text::{KeywordAction, KeywordDescriptor, KeywordSet, segment};
//!
//! let keywords = KeywordSet::new(vec![
//!     KeywordDescriptor::new("the mundane", KeywordAction::navigate("/mundane")),
//! ]);
//! let segments = segment("another highlight is The Mundane, a short film", &keywords);
//! assert_eq!(segments[1].content, "The Mundane");
//! assert!(segments[1].is_keyword());
//! ```

pub mod graphemes;
pub mod keyword;
pub mod search;
pub mod segment;

pub use graphemes::GraphemeIndex;
pub use keyword::{KeywordAction, KeywordDescriptor, KeywordSet};
pub use search::{SearchResult, find_case_insensitive};
pub use segment::{Segment, SegmentKind, Segments, segment};
