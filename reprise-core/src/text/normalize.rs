//! Comparison-key normalization
//!
//! Keys are case-insensitive and punctuation-insensitive. Apostrophes and
//! typographic double quotes vanish without splitting a word ("don't" and
//! "dont" share a key), all other non-alphanumeric characters separate
//! words, and letters are folded towards ASCII by dropping combining marks
//! after compatibility decomposition.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Check if a character is deleted from keys without splitting the word.
#[inline]
pub fn is_elided(c: char) -> bool {
    matches!(
        c,
        '\'' | // ASCII apostrophe
        '\u{2019}' | // Right single quotation mark
        '\u{201c}' | // Left double quotation mark
        '\u{201d}' // Right double quotation mark
    )
}

/// Fold one character into `key`.
///
/// Returns `true` when the character carries word content, `false` when it
/// separates words. Elided characters must be filtered out beforehand.
pub fn fold_char(c: char, key: &mut String) -> bool {
    if c.is_ascii() {
        if c.is_ascii_alphanumeric() {
            key.push(c.to_ascii_lowercase());
            return true;
        }
        return false;
    }

    let mut word = false;
    for decomposed in std::iter::once(c).nfkd() {
        if is_combining_mark(decomposed) || !decomposed.is_alphanumeric() {
            continue;
        }
        key.extend(decomposed.to_lowercase());
        word = true;
    }
    word
}

/// Normalize a whole passage into space-joined comparison keys.
pub fn normalize_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_word = false;

    for c in text.chars() {
        if is_elided(c) {
            continue;
        }

        let mark = result.len();
        if in_word {
            if !fold_char(c, &mut result) {
                in_word = false;
            }
        } else {
            if !result.is_empty() {
                result.push(' ');
            }
            if fold_char(c, &mut result) {
                in_word = true;
            } else {
                result.truncate(mark);
            }
        }
    }

    result
}
