//! Word tokenization with stable source offsets

use super::normalize::{fold_char, is_elided};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A single word of a source text
///
/// The span covers the original characters from the first to the last word
/// character, including elided apostrophes inside the word but no leading or
/// trailing punctuation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    key: String,
    start: usize,
    end: usize,
    chars: usize,
}

impl Token {
    /// Create a token from its parts
    pub fn new(key: impl Into<String>, span: Range<usize>, chars: usize) -> Self {
        Self {
            key: key.into(),
            start: span.start,
            end: span.end,
            chars,
        }
    }

    /// Normalized comparison key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Byte offset of the first character in the source text
    pub fn start(&self) -> usize {
        self.start
    }

    /// Byte offset one past the last character in the source text
    pub fn end(&self) -> usize {
        self.end
    }

    /// Byte span in the source text
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Number of characters of the original span
    pub fn char_len(&self) -> usize {
        self.chars
    }

    /// Original text of this token
    pub fn original<'t>(&self, source: &'t str) -> &'t str {
        &source[self.start..self.end]
    }
}

/// Splits text into [`Token`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer;

impl Tokenizer {
    /// Create a new tokenizer
    pub fn new() -> Self {
        Self
    }

    /// Tokenize a whole text
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        self.tokenize_into(text, 0..text.len(), &mut tokens);
        tokens
    }

    /// Tokenize `text[range]`, appending tokens with offsets into `text`
    pub fn tokenize_into(&self, text: &str, range: Range<usize>, tokens: &mut Vec<Token>) {
        let base = range.start;
        let mut key = String::new();
        let mut word: Option<Range<usize>> = None;

        for (i, c) in text[range].char_indices() {
            if is_elided(c) {
                continue;
            }

            let pos = base + i;
            if fold_char(c, &mut key) {
                let end = pos + c.len_utf8();
                match word.as_mut() {
                    Some(span) => span.end = end,
                    None => word = Some(pos..end),
                }
            } else if let Some(span) = word.take() {
                tokens.push(finish_word(text, span, &mut key));
            }
        }

        if let Some(span) = word.take() {
            tokens.push(finish_word(text, span, &mut key));
        }
    }
}

fn finish_word(text: &str, span: Range<usize>, key: &mut String) -> Token {
    let chars = text[span.clone()].chars().count();
    Token::new(std::mem::take(key), span, chars)
}

/// Source text together with its token sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedText {
    text: String,
    tokens: Vec<Token>,
}

impl TokenizedText {
    /// Tokenize `text` with the default tokenizer
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let tokens = Tokenizer::new().tokenize(&text);
        Self { text, tokens }
    }

    /// Pair a text with tokens produced for it elsewhere
    pub(crate) fn from_parts(text: String, tokens: Vec<Token>) -> Self {
        Self { text, tokens }
    }

    /// Original text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Token sequence
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the text contains no words
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Original text of the token at `index`
    pub fn word(&self, index: usize) -> &str {
        self.tokens[index].original(&self.text)
    }

    /// Original text spanning tokens `first..=last`, punctuation included
    pub fn passage(&self, first: usize, last: usize) -> &str {
        &self.text[self.tokens[first].start()..self.tokens[last].end()]
    }
}
