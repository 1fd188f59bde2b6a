//! Tokenization and segmentation of query and reference texts

pub mod chapters;
pub mod normalize;
pub mod reference;
pub mod tokenizer;

pub use chapters::{Chapter, ChapterIndex};
pub use normalize::normalize_text;
pub use reference::{ReferenceText, METADATA_END_MARKER};
pub use tokenizer::{Token, TokenizedText, Tokenizer};
