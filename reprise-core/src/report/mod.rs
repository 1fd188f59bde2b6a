//! Turning alignments into reported matches

pub mod exclusion;
mod render;

pub use exclusion::ExclusionFilter;

use crate::matcher::{Alignment, Side};
use crate::text::{Chapter, ChapterIndex, TokenizedText};
use render::{render_block, render_side};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ops::Range;

/// A finished, self-contained record of one reproduced passage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportedMatch {
    pub(crate) word_count: usize,
    pub(crate) char_count: usize,
    pub(crate) skipped_query_chars: usize,
    pub(crate) skipped_reference_chars: usize,
    pub(crate) chapter: Chapter,
    pub(crate) query_span: Range<usize>,
    pub(crate) reference_span: Range<usize>,
    pub(crate) query_text: String,
    pub(crate) reference_text: String,
    pub(crate) reference_normalized: String,
    pub(crate) rendering: String,
}

impl ReportedMatch {
    /// Matched words
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Characters of the matched words
    pub fn char_count(&self) -> usize {
        self.char_count
    }

    /// Characters skipped in the generated text
    pub fn skipped_query_chars(&self) -> usize {
        self.skipped_query_chars
    }

    /// Characters skipped in the reference text
    pub fn skipped_reference_chars(&self) -> usize {
        self.skipped_reference_chars
    }

    /// Chapter of the reference where the match starts
    pub fn chapter(&self) -> Chapter {
        self.chapter
    }

    /// Byte span of the passage in the generated text
    pub fn query_span(&self) -> Range<usize> {
        self.query_span.clone()
    }

    /// Byte span of the passage in the reference body
    pub fn reference_span(&self) -> Range<usize> {
        self.reference_span.clone()
    }

    /// Passage as it appears in the generated text
    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    /// Passage as it appears in the reference
    pub fn reference_text(&self) -> &str {
        &self.reference_text
    }

    /// Reference passage as space-joined comparison keys
    pub fn reference_normalized(&self) -> &str {
        &self.reference_normalized
    }

    /// Human-readable rendering with matched words upper-cased
    pub fn rendering(&self) -> &str {
        &self.rendering
    }
}

/// Materializes [`ReportedMatch`] records
#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter {
    context_words: usize,
}

impl Reporter {
    /// Create a reporter showing `context_words` extra tokens around each match
    pub fn new(context_words: usize) -> Self {
        Self { context_words }
    }

    /// Build the record for one alignment
    pub fn report(
        &self,
        alignment: &Alignment,
        query: &TokenizedText,
        reference: &TokenizedText,
        chapters: &ChapterIndex,
    ) -> ReportedMatch {
        let query_tokens = query.tokens();
        let reference_tokens = reference.tokens();

        let (first_q, first_r) = alignment.first_match();
        let (last_q, last_r) = alignment.last_match();

        let word_count = alignment.matched_words();
        let char_count = alignment.matched_chars(query_tokens);

        let matched_query: HashSet<usize> = alignment.matches().map(|(q, _)| q).collect();
        let matched_reference: HashSet<usize> = alignment.matches().map(|(_, r)| r).collect();

        let query_line = render_side(query, alignment.query_range(), self.context_words, |i| {
            matched_query.contains(&i)
        });
        let reference_line = render_side(
            reference,
            alignment.reference_range(),
            self.context_words,
            |i| matched_reference.contains(&i),
        );

        let reference_normalized = reference_tokens[alignment.reference_range()]
            .iter()
            .map(|token| token.key())
            .collect::<Vec<_>>()
            .join(" ");

        ReportedMatch {
            word_count,
            char_count,
            skipped_query_chars: alignment.skipped_chars(Side::Query, query_tokens),
            skipped_reference_chars: alignment.skipped_chars(Side::Reference, reference_tokens),
            chapter: chapters.chapter_at(reference_tokens[first_r].start()),
            query_span: query_tokens[first_q].start()..query_tokens[last_q].end(),
            reference_span: reference_tokens[first_r].start()..reference_tokens[last_r].end(),
            query_text: query.passage(first_q, last_q).to_string(),
            reference_text: reference.passage(first_r, last_r).to_string(),
            reference_normalized,
            rendering: render_block(&query_line, &reference_line, word_count, char_count),
        }
    }
}
