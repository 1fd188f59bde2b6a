//! Prompt-specific preprocessing of model outputs

use reprise_core::{ExclusionFilter, ReferenceText};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Character substitutions undoing an obfuscation requested by a prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecodeRule {
    /// Prompt identifier the rule applies to
    pub prompt: String,
    /// `[from, to]` pairs applied in order
    pub replace: Vec<(String, String)>,
}

/// Reference passages quoted by a prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExcludeRule {
    /// Prompt identifiers the rule applies to
    pub prompts: Vec<String>,
    /// Metadata key of the book holding the quoted passage
    pub metadata_key: String,
}

pub(crate) fn default_decode_rules() -> Vec<DecodeRule> {
    let rule = |prompt: &str, pairs: &[(&str, &str)]| DecodeRule {
        prompt: prompt.to_string(),
        replace: pairs
            .iter()
            .map(|(from, to)| (from.to_string(), to.to_string()))
            .collect(),
    };

    vec![
        rule("A1", &[("4", "a"), ("0", "o")]),
        rule("A6", &[("-", "")]),
        rule("A7", &[("#", "the"), ("@", "a")]),
    ]
}

pub(crate) fn default_exclude_rules() -> Vec<ExcludeRule> {
    vec![
        ExcludeRule {
            prompts: ["R01", "R02", "R01-1", "R02-1"]
                .into_iter()
                .map(String::from)
                .collect(),
            metadata_key: "first_sentence".to_string(),
        },
        ExcludeRule {
            prompts: vec!["R18".to_string()],
            metadata_key: "last_sentence".to_string(),
        },
    ]
}

/// Decode and exclusion rules keyed by prompt
#[derive(Debug, Clone, Default)]
pub struct PromptRules {
    decode: Vec<DecodeRule>,
    exclude: Vec<ExcludeRule>,
}

impl PromptRules {
    /// Create from configured rules
    pub fn new(decode: Vec<DecodeRule>, exclude: Vec<ExcludeRule>) -> Self {
        Self { decode, exclude }
    }

    /// Apply the decode rule of `prompt_id`, if any
    pub fn decode<'a>(&self, prompt_id: &str, text: &'a str) -> Cow<'a, str> {
        match self.decode.iter().find(|rule| rule.prompt == prompt_id) {
            Some(rule) => {
                let mut decoded = text.to_string();
                for (from, to) in &rule.replace {
                    decoded = decoded.replace(from.as_str(), to);
                }
                Cow::Owned(decoded)
            }
            None => Cow::Borrowed(text),
        }
    }

    /// Passages of `reference` quoted by `prompt_id`
    ///
    /// Missing metadata keys are skipped with a warning.
    pub fn exclusions(&self, prompt_id: &str, reference: &ReferenceText) -> ExclusionFilter {
        let mut filter = ExclusionFilter::new();
        for rule in self
            .exclude
            .iter()
            .filter(|rule| rule.prompts.iter().any(|p| p == prompt_id))
        {
            match reference.meta(&rule.metadata_key) {
                Some(passage) => filter.add(passage),
                None => log::warn!(
                    "prompt {prompt_id}: book has no metadata key '{}'",
                    rule.metadata_key
                ),
            }
        }
        filter
    }
}
