//! End-to-end comparison of generated texts against a reference

use crate::config::MatchConfig;
use crate::matcher::FuzzyMatcher;
use crate::report::{ExclusionFilter, ReportedMatch, Reporter};
use crate::text::{ReferenceText, TokenizedText};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Matcher and reporter bundled for repeated comparisons
///
/// A comparator holds no per-comparison state and can be shared between
/// threads.
#[derive(Debug, Clone, Default)]
pub struct Comparator {
    matcher: FuzzyMatcher,
    reporter: Reporter,
}

impl Comparator {
    /// Create a comparator for a validated configuration
    pub fn new(config: MatchConfig) -> Self {
        let reporter = Reporter::new(config.context_words());
        Self {
            matcher: FuzzyMatcher::new(config),
            reporter,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &MatchConfig {
        self.matcher.config()
    }

    /// Report every reproduced passage of `generated` in `reference`
    pub fn compare(&self, generated: &str, reference: &ReferenceText) -> Vec<ReportedMatch> {
        let query = TokenizedText::new(generated);
        self.compare_tokenized(&query, reference)
    }

    /// Like [`Comparator::compare`], discounting passages in `exclusions`
    pub fn compare_with_exclusions(
        &self,
        generated: &str,
        reference: &ReferenceText,
        exclusions: &ExclusionFilter,
    ) -> Vec<ReportedMatch> {
        exclusions.apply_all(self.compare(generated, reference))
    }

    /// Compare an already tokenized text
    pub fn compare_tokenized(
        &self,
        query: &TokenizedText,
        reference: &ReferenceText,
    ) -> Vec<ReportedMatch> {
        let body = reference.body();
        let alignments = self
            .matcher
            .find_matches(query.tokens(), body.tokens(), reference.index());

        log::debug!(
            "compared {} generated tokens against {} reference tokens: {} matches",
            query.len(),
            body.len(),
            alignments.len()
        );

        alignments
            .iter()
            .map(|alignment| {
                self.reporter
                    .report(alignment, query, body, reference.chapters())
            })
            .collect()
    }

    /// Compare many generated texts against one reference
    ///
    /// Results are returned in input order. Runs in parallel when the
    /// `parallel` feature is enabled.
    pub fn compare_many<S>(&self, generated: &[S], reference: &ReferenceText) -> Vec<Vec<ReportedMatch>>
    where
        S: AsRef<str> + Sync,
    {
        #[cfg(feature = "parallel")]
        {
            generated
                .par_iter()
                .map(|text| self.compare(text.as_ref(), reference))
                .collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            generated
                .iter()
                .map(|text| self.compare(text.as_ref(), reference))
                .collect()
        }
    }
}
