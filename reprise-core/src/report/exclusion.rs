//! Discounting reference passages that were given to the model
//!
//! When a prompt quotes the book (say, its first sentence), reproducing that
//! quote is not evidence of memorization. Matches lying entirely inside an
//! excluded passage are dropped; matches containing one are shortened by its
//! size.

use super::ReportedMatch;
use crate::text::Tokenizer;

#[derive(Debug, Clone, PartialEq, Eq)]
struct ExcludedPassage {
    normalized: String,
    words: usize,
    chars: usize,
}

/// Set of passages whose reproduction is not counted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionFilter {
    passages: Vec<ExcludedPassage>,
}

impl ExclusionFilter {
    /// Create an empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a passage, builder style
    pub fn with_passage(mut self, text: &str) -> Self {
        self.add(text);
        self
    }

    /// Add a passage; passages without words are ignored
    pub fn add(&mut self, text: &str) {
        let tokens = Tokenizer::new().tokenize(text);
        if tokens.is_empty() {
            return;
        }

        let normalized = tokens
            .iter()
            .map(|token| token.key())
            .collect::<Vec<_>>()
            .join(" ");
        let chars = tokens.iter().map(|token| token.char_len()).sum();

        self.passages.push(ExcludedPassage {
            normalized,
            words: tokens.len(),
            chars,
        });
    }

    /// Whether the filter holds no passages
    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }

    /// Drop or shorten `record` according to the excluded passages
    pub fn apply(&self, mut record: ReportedMatch) -> Option<ReportedMatch> {
        for passage in &self.passages {
            if contains_words(&passage.normalized, &record.reference_normalized) {
                log::debug!("dropping match inside excluded passage");
                return None;
            }

            if contains_words(&record.reference_normalized, &passage.normalized) {
                record.word_count = record.word_count.saturating_sub(passage.words);
                record.char_count = record.char_count.saturating_sub(passage.chars);
                record
                    .rendering
                    .push_str(&format!("SHORTENED ({}) {}\n", passage.chars, passage.normalized));
            }
        }
        Some(record)
    }

    /// Apply to every record, keeping order
    pub fn apply_all(&self, records: Vec<ReportedMatch>) -> Vec<ReportedMatch> {
        if self.is_empty() {
            return records;
        }
        records.into_iter().filter_map(|record| self.apply(record)).collect()
    }
}

/// Whether `needle` occurs in `haystack` on word boundaries
fn contains_words(haystack: &str, needle: &str) -> bool {
    format!(" {haystack} ").contains(&format!(" {needle} "))
}
