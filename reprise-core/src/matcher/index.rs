//! Inverted index over reference tokens

use crate::text::Token;
use smallvec::SmallVec;
use std::collections::HashMap;

/// Ascending token positions sharing one key
pub type Postings = SmallVec<[usize; 4]>;

/// Maps each comparison key to the positions where it occurs
///
/// Built once per reference and never mutated afterwards, so one index can
/// serve any number of concurrent comparisons.
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    postings: HashMap<String, Postings>,
    token_count: usize,
}

impl ReferenceIndex {
    /// Index a token sequence
    pub fn build(tokens: &[Token]) -> Self {
        let mut postings: HashMap<String, Postings> = HashMap::new();

        for (position, token) in tokens.iter().enumerate() {
            match postings.get_mut(token.key()) {
                Some(list) => list.push(position),
                None => {
                    postings.insert(token.key().to_string(), smallvec::smallvec![position]);
                }
            }
        }

        Self {
            postings,
            token_count: tokens.len(),
        }
    }

    /// Positions of `key`, ascending; empty when the key never occurs
    pub fn positions(&self, key: &str) -> &[usize] {
        self.postings.get(key).map(|list| list.as_slice()).unwrap_or(&[])
    }

    /// Number of distinct keys
    pub fn distinct_keys(&self) -> usize {
        self.postings.len()
    }

    /// Number of indexed tokens
    pub fn token_count(&self) -> usize {
        self.token_count
    }

    /// Whether the index was built from `tokens`
    pub(crate) fn covers(&self, tokens: &[Token]) -> bool {
        self.token_count == tokens.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::Tokenizer;

    #[test]
    fn test_positions_are_ascending() {
        let tokens = Tokenizer::new().tokenize("the cat and the dog and THE bird");
        let index = ReferenceIndex::build(&tokens);

        assert_eq!(index.positions("the"), &[0, 3, 6]);
        assert_eq!(index.positions("and"), &[2, 5]);
        assert_eq!(index.positions("bird"), &[7]);
        assert_eq!(index.distinct_keys(), 5);
        assert_eq!(index.token_count(), 8);
    }

    #[test]
    fn test_missing_key() {
        let index = ReferenceIndex::build(&Tokenizer::new().tokenize("alpha beta"));
        assert!(index.positions("gamma").is_empty());
    }

    #[test]
    fn test_empty_reference() {
        let index = ReferenceIndex::build(&[]);
        assert_eq!(index.distinct_keys(), 0);
        assert!(index.positions("anything").is_empty());
    }
}
