//! Alignments between a query and a reference token sequence

use crate::text::Token;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Which token sequence a skipped token belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Generated text
    Query,
    /// Reference text
    Reference,
}

/// One step of an alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Segment {
    /// A query token equal to a reference token under the comparison key
    Match {
        /// Query token index
        query: usize,
        /// Reference token index
        reference: usize,
    },
    /// A token without counterpart, absorbed as tolerated deviation
    Skip {
        /// Sequence holding the token
        side: Side,
        /// Token index within that sequence
        position: usize,
    },
}

/// An ordered walk over both token sequences
///
/// Every token between the first and the last segment of either side is
/// visited exactly once and in order. The walk starts and ends with a
/// [`Segment::Match`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Alignment {
    segments: Vec<Segment>,
}

impl Alignment {
    /// Create an alignment from its segments
    ///
    /// # Panics
    ///
    /// Panics if the segments do not form a contiguous, monotonic walk that
    /// begins and ends with a match.
    pub fn new(segments: Vec<Segment>) -> Self {
        assert!(
            matches!(segments.first(), Some(Segment::Match { .. })),
            "alignment must start with a match"
        );
        assert!(
            matches!(segments.last(), Some(Segment::Match { .. })),
            "alignment must end with a match"
        );

        let mut next_query: Option<usize> = None;
        let mut next_reference: Option<usize> = None;

        for segment in &segments {
            match *segment {
                Segment::Match { query, reference } => {
                    advance(&mut next_query, query, Side::Query);
                    advance(&mut next_reference, reference, Side::Reference);
                }
                Segment::Skip {
                    side: Side::Query,
                    position,
                } => advance(&mut next_query, position, Side::Query),
                Segment::Skip {
                    side: Side::Reference,
                    position,
                } => advance(&mut next_reference, position, Side::Reference),
            }
        }

        Self { segments }
    }

    /// All segments in walk order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Matched `(query, reference)` index pairs in walk order
    pub fn matches(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.segments.iter().filter_map(|segment| match *segment {
            Segment::Match { query, reference } => Some((query, reference)),
            Segment::Skip { .. } => None,
        })
    }

    /// Skipped token indices on `side`
    pub fn skipped(&self, side: Side) -> impl Iterator<Item = usize> + '_ {
        self.segments.iter().filter_map(move |segment| match *segment {
            Segment::Skip { side: s, position } if s == side => Some(position),
            _ => None,
        })
    }

    /// First matched pair
    pub fn first_match(&self) -> (usize, usize) {
        match self.segments[0] {
            Segment::Match { query, reference } => (query, reference),
            Segment::Skip { .. } => unreachable!("alignment starts with a match"),
        }
    }

    /// Last matched pair
    pub fn last_match(&self) -> (usize, usize) {
        match self.segments[self.segments.len() - 1] {
            Segment::Match { query, reference } => (query, reference),
            Segment::Skip { .. } => unreachable!("alignment ends with a match"),
        }
    }

    /// Query token indices covered by the alignment
    pub fn query_range(&self) -> Range<usize> {
        self.first_match().0..self.last_match().0 + 1
    }

    /// Reference token indices covered by the alignment
    pub fn reference_range(&self) -> Range<usize> {
        self.first_match().1..self.last_match().1 + 1
    }

    /// Number of matched words
    pub fn matched_words(&self) -> usize {
        self.matches().count()
    }

    /// Characters of the matched query tokens
    pub fn matched_chars(&self, query: &[Token]) -> usize {
        self.matches().map(|(q, _)| query[q].char_len()).sum()
    }

    /// Characters of the tokens skipped on `side`
    pub fn skipped_chars(&self, side: Side, tokens: &[Token]) -> usize {
        self.skipped(side).map(|p| tokens[p].char_len()).sum()
    }

    /// Whether the alignment tolerated any deviation
    pub fn is_exact(&self) -> bool {
        self.skipped(Side::Query).next().is_none() && self.skipped(Side::Reference).next().is_none()
    }
}

fn advance(expected: &mut Option<usize>, position: usize, side: Side) {
    if let Some(want) = *expected {
        assert_eq!(
            position, want,
            "{side:?} positions must be contiguous and increasing"
        );
    }
    *expected = Some(position + 1);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(query: usize, reference: usize) -> Segment {
        Segment::Match { query, reference }
    }

    fn skip(side: Side, position: usize) -> Segment {
        Segment::Skip { side, position }
    }

    #[test]
    fn test_ranges_and_counts() {
        let alignment = Alignment::new(vec![
            m(2, 10),
            m(3, 11),
            skip(Side::Query, 4),
            skip(Side::Reference, 12),
            m(5, 13),
        ]);

        assert_eq!(alignment.query_range(), 2..6);
        assert_eq!(alignment.reference_range(), 10..14);
        assert_eq!(alignment.matched_words(), 3);
        assert_eq!(alignment.skipped(Side::Query).collect::<Vec<_>>(), vec![4]);
        assert_eq!(alignment.skipped(Side::Reference).collect::<Vec<_>>(), vec![12]);
        assert!(!alignment.is_exact());
    }

    #[test]
    fn test_single_match() {
        let alignment = Alignment::new(vec![m(0, 0)]);
        assert_eq!(alignment.first_match(), alignment.last_match());
        assert!(alignment.is_exact());
    }

    #[test]
    #[should_panic(expected = "must start with a match")]
    fn test_leading_skip_panics() {
        Alignment::new(vec![skip(Side::Query, 0), m(1, 0)]);
    }

    #[test]
    #[should_panic(expected = "must end with a match")]
    fn test_trailing_skip_panics() {
        Alignment::new(vec![m(0, 0), skip(Side::Reference, 1)]);
    }

    #[test]
    #[should_panic(expected = "contiguous and increasing")]
    fn test_non_monotonic_panics() {
        Alignment::new(vec![m(3, 3), m(2, 4)]);
    }

    #[test]
    #[should_panic(expected = "contiguous and increasing")]
    fn test_hole_panics() {
        Alignment::new(vec![m(0, 0), m(2, 1)]);
    }

    #[test]
    #[should_panic]
    fn test_empty_panics() {
        Alignment::new(Vec::new());
    }
}
