//! Loading reference texts (books)

use super::chapters::ChapterIndex;
use super::tokenizer::{TokenizedText, Tokenizer};
use crate::error::Result;
use crate::matcher::ReferenceIndex;
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

/// Marker terminating the JSON metadata preamble
pub const METADATA_END_MARKER: &str = "###END METADATA###";

static CHAPTER_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)###\s*chapter\s*###").expect("chapter marker pattern is valid")
});

/// A tokenized, indexed reference text ready for matching
#[derive(Debug, Clone)]
pub struct ReferenceText {
    metadata: BTreeMap<String, String>,
    body: TokenizedText,
    chapters: ChapterIndex,
    index: ReferenceIndex,
}

impl ReferenceText {
    /// Parse a raw reference text
    ///
    /// An optional JSON object preamble ends at [`METADATA_END_MARKER`]. List
    /// values are flattened into numbered keys (`authors0`, `authors1`, ...).
    /// Chapter markers split the body; without markers the body is a single
    /// chapter.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);

        let (metadata, body) = match raw.split_once(METADATA_END_MARKER) {
            Some((preamble, body)) => (parse_metadata(preamble)?, body),
            None => (BTreeMap::new(), raw),
        };

        Ok(Self::from_body(metadata, body.to_string()))
    }

    /// Read and parse a reference text from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::parse(&raw)
    }

    /// Build from an already separated body and metadata
    pub fn from_body(metadata: BTreeMap<String, String>, body: String) -> Self {
        let tokenizer = Tokenizer::new();
        let mut tokens = Vec::new();
        let mut starts = Vec::new();
        let mut cursor = 0;

        for marker in CHAPTER_MARKER.find_iter(&body) {
            tokenizer.tokenize_into(&body, cursor..marker.start(), &mut tokens);
            starts.push(marker.start());
            cursor = marker.end();
        }
        tokenizer.tokenize_into(&body, cursor..body.len(), &mut tokens);

        if tokens.is_empty() {
            log::warn!("reference text contains no words");
        }

        let chapters = ChapterIndex::from_offsets(starts);
        let index = ReferenceIndex::build(&tokens);
        log::debug!(
            "loaded reference: {} tokens, {} chapters, {} distinct keys",
            tokens.len(),
            chapters.len(),
            index.distinct_keys()
        );

        Self {
            metadata,
            body: TokenizedText::from_parts(body, tokens),
            chapters,
            index,
        }
    }

    /// Flattened metadata
    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    /// Metadata value for `key`
    pub fn meta(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// Tokenized body
    pub fn body(&self) -> &TokenizedText {
        &self.body
    }

    /// Chapter boundaries of the body
    pub fn chapters(&self) -> &ChapterIndex {
        &self.chapters
    }

    /// Inverted index over the body tokens
    pub fn index(&self) -> &ReferenceIndex {
        &self.index
    }
}

fn parse_metadata(preamble: &str) -> Result<BTreeMap<String, String>> {
    let mut metadata = BTreeMap::new();
    if preamble.trim().is_empty() {
        return Ok(metadata);
    }

    let raw: Map<String, Value> = serde_json::from_str(preamble)?;
    for (key, value) in raw {
        match value {
            Value::Array(items) => {
                for (idx, item) in items.iter().enumerate() {
                    metadata.insert(format!("{key}{idx}"), scalar_to_string(item));
                }
            }
            Value::Null => {}
            other => {
                metadata.insert(key, scalar_to_string(&other));
            }
        }
    }

    Ok(metadata)
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
