//! Greedy resolution of overlapping candidate alignments

use super::alignment::{Alignment, Segment, Side};
use crate::text::Token;
use std::cmp::Ordering;
use std::ops::Range;

/// A maximal alignment competing for its query range
#[derive(Debug, Clone)]
pub(crate) struct Candidate {
    pub(crate) alignment: Alignment,
    pub(crate) matched_chars: usize,
    query_range: Range<usize>,
    reference_start: usize,
}

impl Candidate {
    pub(crate) fn new(alignment: Alignment, query: &[Token]) -> Self {
        let matched_chars = alignment.matched_chars(query);
        let query_range = alignment.query_range();
        let reference_start = alignment.first_match().1;
        Self {
            alignment,
            matched_chars,
            query_range,
            reference_start,
        }
    }

    /// Ranking: more matched characters first, then earlier reference start,
    /// then earlier query start.
    fn rank(&self, other: &Self) -> Ordering {
        other
            .matched_chars
            .cmp(&self.matched_chars)
            .then(self.reference_start.cmp(&other.reference_start))
            .then(self.query_range.start.cmp(&other.query_range.start))
    }
}

/// Keep the best candidates that do not overlap on the query side
///
/// A candidate that overlaps accepted ones is cut down to the stretches of
/// its walk whose query tokens are still free, and those compete again.
/// Candidates (and stretches) with fewer than `min_words` matches are
/// dropped. The result is ordered by query start.
pub(crate) fn select_greedy(
    mut candidates: Vec<Candidate>,
    query: &[Token],
    min_words: usize,
) -> Vec<Candidate> {
    candidates.retain(|candidate| candidate.alignment.matched_words() >= min_words);

    // Best last; among equals the earliest discovered is popped first
    candidates.sort_by(Candidate::rank);
    candidates.reverse();

    let mut covered = vec![false; query.len()];
    let mut selected = Vec::new();
    while let Some(candidate) = candidates.pop() {
        let range = candidate.query_range.clone();
        if !covered[range.clone()].iter().any(|&taken| taken) {
            covered[range].fill(true);
            selected.push(candidate);
            continue;
        }

        for part in free_parts(&candidate.alignment, &covered) {
            if part.matched_words() < min_words {
                continue;
            }
            let part = Candidate::new(part, query);
            let at = candidates.partition_point(|other| other.rank(&part) != Ordering::Less);
            candidates.insert(at, part);
        }
    }

    selected.sort_by_key(|candidate| candidate.query_range.start);
    selected
}

/// Sub-walks of `alignment` touching no covered query token, trimmed to
/// begin and end with a match
fn free_parts(alignment: &Alignment, covered: &[bool]) -> Vec<Alignment> {
    let mut parts = Vec::new();
    let mut current = Vec::new();

    for &segment in alignment.segments() {
        let blocked = match segment {
            Segment::Match { query, .. }
            | Segment::Skip {
                side: Side::Query,
                position: query,
            } => covered[query],
            Segment::Skip {
                side: Side::Reference,
                ..
            } => false,
        };

        if blocked {
            push_trimmed(&mut parts, std::mem::take(&mut current));
        } else {
            current.push(segment);
        }
    }
    push_trimmed(&mut parts, current);

    parts
}

fn push_trimmed(parts: &mut Vec<Alignment>, segments: Vec<Segment>) {
    let is_match = |segment: &Segment| matches!(segment, Segment::Match { .. });
    let (Some(first), Some(last)) = (
        segments.iter().position(is_match),
        segments.iter().rposition(is_match),
    ) else {
        return;
    };
    parts.push(Alignment::new(segments[first..=last].to_vec()));
}
