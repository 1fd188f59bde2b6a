//! Matcher configuration

use crate::error::{ConfigError, Error, Result};
use serde::{Deserialize, Serialize};

/// Default configuration constants
pub mod defaults {
    /// Minimum matched characters for a reported match
    pub const MIN_LENGTH_CHARS: usize = 0;

    /// Minimum matched words for a reported match
    pub const MIN_LENGTH_WORDS: usize = 8;

    /// Maximum unmatched tokens per side inside a single gap
    pub const MAX_GAP_WORDS: usize = 1;

    /// Minimum exact run that seeds an alignment
    pub const MIN_ANCHOR_WORDS: usize = 2;

    /// Exact tokens required after a gap before it is committed
    pub const LOOKAHEAD_WORDS: usize = 2;

    /// Context tokens shown around a match in its rendering
    pub const CONTEXT_WORDS: usize = 0;

    /// Upper bound accepted for `max_gap_words`
    pub const MAX_SUPPORTED_GAP: usize = 8;

    /// Upper bound accepted for `lookahead_words`
    pub const MAX_SUPPORTED_LOOKAHEAD: usize = 16;
}

/// Validated matcher configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchConfig {
    pub(crate) min_length_chars: usize,
    pub(crate) min_length_words: usize,
    pub(crate) max_gap_words: usize,
    pub(crate) min_anchor_words: usize,
    pub(crate) lookahead_words: usize,
    pub(crate) context_words: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            min_length_chars: defaults::MIN_LENGTH_CHARS,
            min_length_words: defaults::MIN_LENGTH_WORDS,
            max_gap_words: defaults::MAX_GAP_WORDS,
            min_anchor_words: defaults::MIN_ANCHOR_WORDS,
            lookahead_words: defaults::LOOKAHEAD_WORDS,
            context_words: defaults::CONTEXT_WORDS,
        }
    }
}

impl MatchConfig {
    /// Create a configuration builder
    pub fn builder() -> MatchConfigBuilder {
        MatchConfigBuilder::default()
    }

    /// Minimum matched characters for a reported match
    pub fn min_length_chars(&self) -> usize {
        self.min_length_chars
    }

    /// Minimum matched words for a reported match
    pub fn min_length_words(&self) -> usize {
        self.min_length_words
    }

    /// Maximum unmatched tokens per side inside one gap
    pub fn max_gap_words(&self) -> usize {
        self.max_gap_words
    }

    /// Minimum exact run that seeds an alignment
    pub fn min_anchor_words(&self) -> usize {
        self.min_anchor_words
    }

    /// Exact tokens required after a gap before it is committed
    pub fn lookahead_words(&self) -> usize {
        self.lookahead_words
    }

    /// Context tokens shown around a match in its rendering
    pub fn context_words(&self) -> usize {
        self.context_words
    }

    fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.min_anchor_words == 0 {
            return Err(ConfigError::Zero {
                field: "min_anchor_words",
            });
        }

        if self.lookahead_words == 0 {
            return Err(ConfigError::Zero {
                field: "lookahead_words",
            });
        }

        if self.max_gap_words > defaults::MAX_SUPPORTED_GAP {
            return Err(ConfigError::TooLarge {
                field: "max_gap_words",
                value: self.max_gap_words as i64,
                max: defaults::MAX_SUPPORTED_GAP,
            });
        }

        if self.lookahead_words > defaults::MAX_SUPPORTED_LOOKAHEAD {
            return Err(ConfigError::TooLarge {
                field: "lookahead_words",
                value: self.lookahead_words as i64,
                max: defaults::MAX_SUPPORTED_LOOKAHEAD,
            });
        }

        Ok(())
    }
}

/// Fluent builder for [`MatchConfig`]
#[derive(Debug, Default)]
pub struct MatchConfigBuilder {
    min_length_chars: Option<usize>,
    min_length_words: Option<usize>,
    max_gap_words: Option<usize>,
    min_anchor_words: Option<usize>,
    lookahead_words: Option<usize>,
    context_words: Option<usize>,
}

impl MatchConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum matched character count
    pub fn min_length_chars(mut self, chars: usize) -> Self {
        self.min_length_chars = Some(chars);
        self
    }

    /// Set the minimum matched word count
    pub fn min_length_words(mut self, words: usize) -> Self {
        self.min_length_words = Some(words);
        self
    }

    /// Set the per-gap deviation bound
    pub fn max_gap_words(mut self, words: usize) -> Self {
        self.max_gap_words = Some(words);
        self
    }

    /// Set the minimum anchor run length
    pub fn min_anchor_words(mut self, words: usize) -> Self {
        self.min_anchor_words = Some(words);
        self
    }

    /// Set the exact run required after a gap
    pub fn lookahead_words(mut self, words: usize) -> Self {
        self.lookahead_words = Some(words);
        self
    }

    /// Set the number of context tokens in renderings
    pub fn context_words(mut self, words: usize) -> Self {
        self.context_words = Some(words);
        self
    }

    /// Build the configuration
    pub fn build(self) -> std::result::Result<MatchConfig, ConfigError> {
        let defaults = MatchConfig::default();
        let config = MatchConfig {
            min_length_chars: self.min_length_chars.unwrap_or(defaults.min_length_chars),
            min_length_words: self.min_length_words.unwrap_or(defaults.min_length_words),
            max_gap_words: self.max_gap_words.unwrap_or(defaults.max_gap_words),
            min_anchor_words: self.min_anchor_words.unwrap_or(defaults.min_anchor_words),
            lookahead_words: self.lookahead_words.unwrap_or(defaults.lookahead_words),
            context_words: self.context_words.unwrap_or(defaults.context_words),
        };

        config.validate()?;
        Ok(config)
    }
}

/// Unvalidated matcher settings as they appear in a configuration file
///
/// Fields are signed so that negative values survive parsing and can be
/// rejected with a precise message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatchSettings {
    /// Minimum matched characters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length_chars: Option<i64>,
    /// Minimum matched words
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length_words: Option<i64>,
    /// Per-gap deviation bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_gap_words: Option<i64>,
    /// Minimum anchor run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_anchor_words: Option<i64>,
    /// Exact run required after a gap
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lookahead_words: Option<i64>,
    /// Context tokens in renderings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_words: Option<i64>,
}

impl MatchSettings {
    /// Parse settings from a TOML table
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Overlay `other` on top of `self`; values set in `other` win
    pub fn merge(mut self, other: &MatchSettings) -> Self {
        self.min_length_chars = other.min_length_chars.or(self.min_length_chars);
        self.min_length_words = other.min_length_words.or(self.min_length_words);
        self.max_gap_words = other.max_gap_words.or(self.max_gap_words);
        self.min_anchor_words = other.min_anchor_words.or(self.min_anchor_words);
        self.lookahead_words = other.lookahead_words.or(self.lookahead_words);
        self.context_words = other.context_words.or(self.context_words);
        self
    }

    /// Validate and convert into a [`MatchConfig`]
    pub fn to_config(&self) -> Result<MatchConfig> {
        MatchConfig::try_from(self.clone()).map_err(Error::from)
    }
}

fn non_negative(field: &'static str, value: i64) -> std::result::Result<usize, ConfigError> {
    usize::try_from(value).map_err(|_| ConfigError::Negative { field, value })
}

impl TryFrom<MatchSettings> for MatchConfig {
    type Error = ConfigError;

    fn try_from(settings: MatchSettings) -> std::result::Result<Self, Self::Error> {
        let mut builder = MatchConfig::builder();

        if let Some(value) = settings.min_length_chars {
            builder = builder.min_length_chars(non_negative("min_length_chars", value)?);
        }
        if let Some(value) = settings.min_length_words {
            builder = builder.min_length_words(non_negative("min_length_words", value)?);
        }
        if let Some(value) = settings.max_gap_words {
            builder = builder.max_gap_words(non_negative("max_gap_words", value)?);
        }
        if let Some(value) = settings.min_anchor_words {
            builder = builder.min_anchor_words(non_negative("min_anchor_words", value)?);
        }
        if let Some(value) = settings.lookahead_words {
            builder = builder.lookahead_words(non_negative("lookahead_words", value)?);
        }
        if let Some(value) = settings.context_words {
            builder = builder.context_words(non_negative("context_words", value)?);
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MatchConfig::default();
        assert_eq!(config.max_gap_words(), 1);
        assert_eq!(config.min_length_words(), 8);
        assert_eq!(config.min_anchor_words(), 2);
    }

    #[test]
    fn test_builder_overrides() {
        let config = MatchConfig::builder()
            .min_length_chars(40)
            .min_length_words(5)
            .max_gap_words(2)
            .build()
            .unwrap();

        assert_eq!(config.min_length_chars(), 40);
        assert_eq!(config.min_length_words(), 5);
        assert_eq!(config.max_gap_words(), 2);
        assert_eq!(config.lookahead_words(), defaults::LOOKAHEAD_WORDS);
    }

    #[test]
    fn test_builder_rejects_zero_anchor() {
        let err = MatchConfig::builder().min_anchor_words(0).build().unwrap_err();
        assert_eq!(
            err,
            ConfigError::Zero {
                field: "min_anchor_words"
            }
        );
    }

    #[test]
    fn test_builder_rejects_large_gap() {
        let err = MatchConfig::builder().max_gap_words(9).build().unwrap_err();
        assert!(matches!(err, ConfigError::TooLarge { field: "max_gap_words", .. }));
    }

    #[test]
    fn test_settings_reject_negative_threshold() {
        let settings = MatchSettings {
            min_length_chars: Some(-1),
            ..Default::default()
        };

        let err = MatchConfig::try_from(settings).unwrap_err();
        assert_eq!(err.to_string(), "min_length_chars must be non-negative (got -1)");
    }

    #[test]
    fn test_settings_from_toml() {
        let settings = MatchSettings::from_toml_str(
            r#"
            min_length_words = 5
            max_gap_words = 0
            "#,
        )
        .unwrap();

        let config = settings.to_config().unwrap();
        assert_eq!(config.min_length_words(), 5);
        assert_eq!(config.max_gap_words(), 0);
    }

    #[test]
    fn test_settings_unknown_field() {
        let result = MatchSettings::from_toml_str("max_gap = 2");
        assert!(matches!(result, Err(Error::ConfigParse(_))));
    }

    #[test]
    fn test_settings_merge() {
        let base = MatchSettings {
            min_length_words: Some(8),
            max_gap_words: Some(1),
            ..Default::default()
        };
        let overlay = MatchSettings {
            max_gap_words: Some(2),
            ..Default::default()
        };

        let merged = base.merge(&overlay);
        assert_eq!(merged.min_length_words, Some(8));
        assert_eq!(merged.max_gap_words, Some(2));
    }
}
