//! Fuzzy reproduction matching between generated text and reference books
//!
//! This crate finds passages of a generated text that reproduce a reference
//! text nearly word for word. Both texts are reduced to sequences of
//! normalized word keys; the matcher then looks for long aligned runs that
//! tolerate small gaps (a dropped, inserted or substituted word) on either
//! side.
//!
//! # Architecture
//!
//! - **text**: normalization, tokenization and reference loading (metadata
//!   preamble, chapter markers)
//! - **matcher**: inverted index, seed-and-extend alignment and selection
//! - **report**: self-contained match records, rendering and exclusions
//! - **comparison**: the end-to-end entry point tying these together
//!
//! # Example
//!
//! ```rust
//! use reprise_core::{Comparator, MatchConfig, ReferenceText};
//!
//! let book = ReferenceText::parse(
//!     "{\"title\": \"Fables\"}\n###END METADATA###\n\
//!      The quick brown fox jumps over the lazy dog.",
//! )
//! .unwrap();
//!
//! let config = MatchConfig::builder().min_length_words(5).build().unwrap();
//! let comparator = Comparator::new(config);
//!
//! let matches = comparator.compare("Quoth he: the quick brown canine jumps over the lazy dog!", &book);
//! assert_eq!(matches.len(), 1);
//! assert_eq!(matches[0].word_count(), 8);
//! assert_eq!(book.meta("title"), Some("Fables"));
//! ```

pub mod comparison;
pub mod config;
pub mod error;
pub mod matcher;
pub mod report;
pub mod text;

pub use comparison::Comparator;
pub use config::{defaults, MatchConfig, MatchConfigBuilder, MatchSettings};
pub use error::{ConfigError, Error, Result};
pub use matcher::{find_matches, Alignment, FuzzyMatcher, ReferenceIndex, Segment, Side};
pub use report::{ExclusionFilter, ReportedMatch, Reporter};
pub use text::{
    normalize_text, Chapter, ChapterIndex, ReferenceText, Token, TokenizedText, Tokenizer,
    METADATA_END_MARKER,
};
