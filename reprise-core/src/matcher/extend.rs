//! Seed extension with bounded per-gap deviation

use super::alignment::{Alignment, Segment, Side};
use crate::text::Token;

/// A stretch of an alignment under construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece {
    /// Consecutive exact matches
    Run(usize),
    /// Tokens skipped on the query and reference side
    Gap(usize, usize),
}

/// Gap shapes `(query, reference)` in the order they are tried
///
/// Smaller gaps come first; among gaps of equal size, balanced substitutions
/// are preferred, then skips on the query side.
pub(crate) fn gap_options(max_gap_words: usize) -> Vec<(usize, usize)> {
    let mut options: Vec<(usize, usize)> = (0..=max_gap_words)
        .flat_map(|a| (0..=max_gap_words).map(move |b| (a, b)))
        .filter(|&(a, b)| a + b > 0)
        .collect();

    options.sort_by_key(|&(a, b)| (a + b, a.abs_diff(b), std::cmp::Reverse(a)));
    options
}

/// Grows anchors into maximal alignments
pub(crate) struct Extender<'a> {
    query: &'a [Token],
    reference: &'a [Token],
    gaps: &'a [(usize, usize)],
    lookahead: usize,
}

impl<'a> Extender<'a> {
    pub(crate) fn new(
        query: &'a [Token],
        reference: &'a [Token],
        gaps: &'a [(usize, usize)],
        lookahead: usize,
    ) -> Self {
        Self {
            query,
            reference,
            gaps,
            lookahead,
        }
    }

    #[inline]
    pub(crate) fn same(&self, q: usize, r: usize) -> bool {
        self.query[q].key() == self.reference[r].key()
    }

    /// Exact matches starting at `(q, r)`, at most `cap`
    pub(crate) fn run_forward(&self, q: usize, r: usize, cap: usize) -> usize {
        let limit = cap
            .min(self.query.len().saturating_sub(q))
            .min(self.reference.len().saturating_sub(r));
        (0..limit).take_while(|&n| self.same(q + n, r + n)).count()
    }

    /// Exact matches ending just before `(q, r)`, at most `cap`
    fn run_backward(&self, q: usize, r: usize, cap: usize) -> usize {
        let limit = cap.min(q).min(r);
        (0..limit)
            .take_while(|&n| self.same(q - 1 - n, r - 1 - n))
            .count()
    }

    /// Whether exact matching resumes at `(q, r)` for long enough to commit a gap
    fn resumes_forward(&self, q: usize, r: usize) -> bool {
        let run = self.run_forward(q, r, self.lookahead);
        run == self.lookahead
            || (run > 0 && (q + run == self.query.len() || r + run == self.reference.len()))
    }

    fn resumes_backward(&self, q: usize, r: usize) -> bool {
        let run = self.run_backward(q, r, self.lookahead);
        run == self.lookahead || (run > 0 && (q == run || r == run))
    }

    fn gap_forward(&self, q: usize, r: usize) -> Option<(usize, usize)> {
        self.gaps.iter().copied().find(|&(a, b)| {
            q + a < self.query.len() && r + b < self.reference.len() && self.resumes_forward(q + a, r + b)
        })
    }

    fn gap_backward(&self, q: usize, r: usize) -> Option<(usize, usize)> {
        self.gaps
            .iter()
            .copied()
            .find(|&(a, b)| a < q && b < r && self.resumes_backward(q - a, r - b))
    }

    /// Pieces after the exclusive end `(q, r)`, in walk order
    fn extend_forward(&self, mut q: usize, mut r: usize) -> Vec<Piece> {
        let mut pieces = Vec::new();
        loop {
            let run = self.run_forward(q, r, usize::MAX);
            if run > 0 {
                pieces.push(Piece::Run(run));
                q += run;
                r += run;
            }

            match self.gap_forward(q, r) {
                Some((a, b)) => {
                    pieces.push(Piece::Gap(a, b));
                    q += a;
                    r += b;
                }
                None => break,
            }
        }
        pieces
    }

    /// Pieces before the inclusive start `(q, r)`, nearest first
    fn extend_backward(&self, q: &mut usize, r: &mut usize) -> Vec<Piece> {
        let mut pieces = Vec::new();
        loop {
            let run = self.run_backward(*q, *r, usize::MAX);
            if run > 0 {
                pieces.push(Piece::Run(run));
                *q -= run;
                *r -= run;
            }

            match self.gap_backward(*q, *r) {
                Some((a, b)) => {
                    pieces.push(Piece::Gap(a, b));
                    *q -= a;
                    *r -= b;
                }
                None => break,
            }
        }
        pieces
    }

    /// Extend an anchor of `run` exact matches at `(q, r)` in both directions
    pub(crate) fn extend(&self, q: usize, r: usize, run: usize) -> Alignment {
        debug_assert!(run > 0, "anchor must contain a match");

        let (mut start_q, mut start_r) = (q, r);
        let before = self.extend_backward(&mut start_q, &mut start_r);
        let after = self.extend_forward(q + run, r + run);

        let pieces = before
            .into_iter()
            .rev()
            .chain(std::iter::once(Piece::Run(run)))
            .chain(after);

        let mut segments = Vec::new();
        let (mut q, mut r) = (start_q, start_r);
        for piece in pieces {
            match piece {
                Piece::Run(len) => {
                    segments.extend((0..len).map(|i| Segment::Match {
                        query: q + i,
                        reference: r + i,
                    }));
                    q += len;
                    r += len;
                }
                Piece::Gap(a, b) => {
                    segments.extend((q..q + a).map(|position| Segment::Skip {
                        side: Side::Query,
                        position,
                    }));
                    segments.extend((r..r + b).map(|position| Segment::Skip {
                        side: Side::Reference,
                        position,
                    }));
                    q += a;
                    r += b;
                }
            }
        }

        Alignment::new(segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::Tokenizer;

    fn tokens(text: &str) -> Vec<Token> {
        Tokenizer::new().tokenize(text)
    }

    #[test]
    fn test_gap_options_order() {
        assert!(gap_options(0).is_empty());
        assert_eq!(gap_options(1), vec![(1, 0), (0, 1), (1, 1)]);
        assert_eq!(
            gap_options(2),
            vec![(1, 0), (0, 1), (1, 1), (2, 0), (0, 2), (2, 1), (1, 2), (2, 2)]
        );
    }

    #[test]
    fn test_runs() {
        let query = tokens("a b c d");
        let reference = tokens("x a b c y");
        let gaps = gap_options(1);
        let extender = Extender::new(&query, &reference, &gaps, 2);

        assert_eq!(extender.run_forward(0, 1, usize::MAX), 3);
        assert_eq!(extender.run_forward(0, 1, 2), 2);
        assert_eq!(extender.run_backward(3, 4, usize::MAX), 3);
        assert_eq!(extender.run_forward(3, 4, usize::MAX), 0);
    }

    #[test]
    fn test_extension_bridges_substitution() {
        let query = tokens("one two three four five six");
        let reference = tokens("one two drei vier four five six");

        // One query word replaced by two reference words needs a gap of two
        let gaps = gap_options(1);
        let extender = Extender::new(&query, &reference, &gaps, 2);
        let alignment = extender.extend(0, 0, 2);
        assert_eq!(alignment.query_range(), 0..2);

        let gaps = gap_options(2);
        let extender = Extender::new(&query, &reference, &gaps, 2);
        let alignment = extender.extend(0, 0, 2);
        assert_eq!(alignment.query_range(), 0..6);
        assert_eq!(alignment.reference_range(), 0..7);
        assert_eq!(alignment.skipped(Side::Query).count(), 1);
        assert_eq!(alignment.skipped(Side::Reference).count(), 2);
    }

    #[test]
    fn test_extension_backward_over_insertion() {
        let query = tokens("alpha beta extra gamma delta epsilon");
        let reference = tokens("alpha beta gamma delta epsilon");
        let gaps = gap_options(1);
        let extender = Extender::new(&query, &reference, &gaps, 2);

        // Anchor on "delta epsilon"
        let alignment = extender.extend(4, 3, 2);
        assert_eq!(alignment.query_range(), 0..6);
        assert_eq!(alignment.reference_range(), 0..5);
        assert_eq!(alignment.skipped(Side::Query).collect::<Vec<_>>(), vec![2]);
        assert_eq!(alignment.skipped(Side::Reference).count(), 0);
    }

    #[test]
    fn test_gap_requires_lookahead() {
        // After the gap only one word matches before diverging again
        let query = tokens("a b c X e q r");
        let reference = tokens("a b c d e f g");
        let gaps = gap_options(1);
        let extender = Extender::new(&query, &reference, &gaps, 2);

        let alignment = extender.extend(0, 0, 3);
        assert_eq!(alignment.query_range(), 0..3);
    }

    #[test]
    fn test_gap_accepted_at_sequence_end() {
        let query = tokens("a b c X e");
        let reference = tokens("a b c d e");
        let gaps = gap_options(1);
        let extender = Extender::new(&query, &reference, &gaps, 2);

        let alignment = extender.extend(0, 0, 3);
        assert_eq!(alignment.query_range(), 0..5);
        assert_eq!(alignment.matched_words(), 4);
    }
}
