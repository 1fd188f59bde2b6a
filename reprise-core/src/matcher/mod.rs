//! Fuzzy reproduction matcher
//!
//! Matching is seed-and-extend rather than full dynamic programming:
//!
//! 1. An inverted index maps every reference key to its positions.
//! 2. Each query position looks up the reference positions sharing its key; a
//!    run of at least `min_anchor_words` exact matches seeds a candidate.
//! 3. The seed is extended in both directions. Exact matches are consumed
//!    as they come; on a mismatch, gaps of at most `max_gap_words` tokens per
//!    side are tried, and a gap is committed only when exact matching
//!    resumes for `lookahead_words` tokens.
//! 4. Overlapping candidates are resolved greedily by matched characters,
//!    earliest reference start breaking ties. A candidate losing part of its
//!    query range to a better one keeps competing with what is left.
//! 5. Every gap bound up to `max_gap_words` is searched in turn; a looser
//!    bound replaces the tighter result only when it matches at least as
//!    many characters.
//! 6. Alignments below the length thresholds are dropped.

pub mod alignment;
pub mod index;

mod extend;
mod select;

pub use alignment::{Alignment, Segment, Side};
pub use index::ReferenceIndex;

use crate::config::MatchConfig;
use crate::text::Token;
use extend::{gap_options, Extender};
use select::{select_greedy, Candidate};
use std::collections::HashSet;

/// Finds approximately matching passages between two token sequences
#[derive(Debug, Clone)]
pub struct FuzzyMatcher {
    config: MatchConfig,
    /// Gap shapes for each bound from 0 to `max_gap_words`
    gap_levels: Vec<Vec<(usize, usize)>>,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new(MatchConfig::default())
    }
}

impl FuzzyMatcher {
    /// Create a matcher for a validated configuration
    pub fn new(config: MatchConfig) -> Self {
        let gap_levels = (0..=config.max_gap_words()).map(gap_options).collect();
        Self { config, gap_levels }
    }

    /// Active configuration
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Find all accepted alignments of `query` within `reference`
    ///
    /// `index` must have been built from `reference`. The result does not
    /// overlap on the query side and is ordered by query start.
    pub fn find_matches(
        &self,
        query: &[Token],
        reference: &[Token],
        index: &ReferenceIndex,
    ) -> Vec<Alignment> {
        debug_assert!(index.covers(reference), "index was built for another reference");

        if query.is_empty() || reference.is_empty() {
            return Vec::new();
        }

        let mut best: Vec<Candidate> = Vec::new();
        let mut best_chars = 0;
        for bound in 0..self.gap_levels.len() {
            let selected = self.select(query, reference, index, bound);
            let chars: usize = selected.iter().map(|candidate| candidate.matched_chars).sum();
            if chars >= best_chars {
                best = selected;
                best_chars = chars;
            } else {
                log::trace!("gap bound {bound} matches {chars} chars, keeping {best_chars}");
            }
        }

        let accepted: Vec<Alignment> = best
            .into_iter()
            .filter(|candidate| candidate.matched_chars >= self.config.min_length_chars())
            .map(|candidate| candidate.alignment)
            .collect();

        log::trace!("{} query tokens: {} accepted", query.len(), accepted.len());
        accepted
    }

    /// Candidates for one gap bound after greedy selection
    fn select(
        &self,
        query: &[Token],
        reference: &[Token],
        index: &ReferenceIndex,
        bound: usize,
    ) -> Vec<Candidate> {
        let candidates = self.discover(query, reference, index, &self.gap_levels[bound]);
        let candidate_count = candidates.len();
        let selected = select_greedy(candidates, query, self.config.min_length_words());

        log::trace!(
            "gap bound {}: {} candidates, {} selected",
            bound,
            candidate_count,
            selected.len()
        );
        selected
    }

    /// Seed and extend every anchor that is not already part of a candidate
    fn discover(
        &self,
        query: &[Token],
        reference: &[Token],
        index: &ReferenceIndex,
        gaps: &[(usize, usize)],
    ) -> Vec<Candidate> {
        let extender = Extender::new(query, reference, gaps, self.config.lookahead_words());
        let mut seen: HashSet<(usize, usize)> = HashSet::new();
        let mut candidates = Vec::new();

        for (q, token) in query.iter().enumerate() {
            for &r in index.positions(token.key()) {
                // Interior of an exact diagonal seeded one step earlier
                if q > 0 && r > 0 && extender.same(q - 1, r - 1) {
                    continue;
                }
                if seen.contains(&(q, r)) {
                    continue;
                }

                let run = extender.run_forward(q, r, usize::MAX);
                let reaches_end = q + run == query.len() || r + run == reference.len();
                if run < self.config.min_anchor_words() && !reaches_end {
                    continue;
                }

                let alignment = extender.extend(q, r, run);
                seen.extend(alignment.matches());
                candidates.push(Candidate::new(alignment, query));
            }
        }

        candidates
    }
}

/// Find matches with a one-off index over `reference`
pub fn find_matches(query: &[Token], reference: &[Token], config: &MatchConfig) -> Vec<Alignment> {
    let index = ReferenceIndex::build(reference);
    FuzzyMatcher::new(config.clone()).find_matches(query, reference, &index)
}
