//! Human-readable rendering of a match for manual audit

use crate::text::TokenizedText;
use std::ops::Range;

/// Join the words of `range` (widened by `context` tokens each way),
/// upper-casing those for which `matched` holds.
pub(crate) fn render_side(
    doc: &TokenizedText,
    range: Range<usize>,
    context: usize,
    matched: impl Fn(usize) -> bool,
) -> String {
    let start = range.start.saturating_sub(context);
    let end = (range.end + context).min(doc.len());

    let mut line = String::new();
    for index in start..end {
        if index > start {
            line.push(' ');
        }
        let word = doc.word(index);
        if matched(index) {
            line.extend(word.chars().flat_map(char::to_uppercase));
        } else {
            line.push_str(word);
        }
    }
    line
}

/// Assemble the full rendering block
pub(crate) fn render_block(query_line: &str, reference_line: &str, words: usize, chars: usize) -> String {
    format!("QUERY: {query_line}\nREFER: {reference_line}\nWORDS: {words:3} CHARS: {chars:4}\n")
}
